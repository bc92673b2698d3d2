use crate::opcode::Opcode;
use crate::operations::*;
use crate::platform::Platform;
use crate::state::State;

/// Whether the program counter should take its ordinary two-byte step after
/// an instruction, or stay where the instruction left it (jumps, calls, and
/// the key-wait retry).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Advance {
    Step,
    Hold,
}

/// One instruction-family handler.
pub type Operation = fn(op: u16, state: &mut State, platform: &mut dyn Platform) -> Advance;

/// Selects the handler for an opcode by its high nibble. Families 0, 8, E,
/// and F sub-dispatch internally on the low nibble or byte.
pub fn from_op(op: u16) -> Operation {
    match op.family() {
        0x0 => sys,
        0x1 => jump,
        0x2 => call,
        0x3 => ske,
        0x4 => skne,
        0x5 => skre,
        0x6 => load,
        0x7 => add,
        0x8 => alu,
        0x9 => skrne,
        0xA => loadi,
        0xB => jumpi,
        0xC => rand,
        0xD => draw,
        0xE => key,
        0xF => misc,
        _ => unreachable!("a nibble is four bits"),
    }
}

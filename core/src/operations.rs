use log::warn;

use crate::constants::{
    DISPLAY_HEIGHT, DISPLAY_WIDTH, FONT_HEIGHT, FONT_START, MEMORY_SIZE, STACK_DEPTH,
};
use crate::instruction::Advance;
use crate::opcode::Opcode;
use crate::platform::Platform;
use crate::state::State;

/// Wraps an address-register offset into the 4KiB space. Programs that run
/// I off the top of memory wrap around rather than faulting.
fn mem_index(base: u16, offset: usize) -> usize {
    (base as usize + offset) % MEMORY_SIZE
}

/// Widening add. The flag is derived by dividing the 16-bit sum by 0xFF
/// rather than testing a carry bit, so a sum of exactly 0xFF raises it.
fn alu_add(lhs: u8, rhs: u8) -> (u8, u8) {
    let sum = u16::from(lhs) + u16::from(rhs);
    let flag = u8::from(sum / 0xFF != 0);
    ((sum % 0x100) as u8, flag)
}

/// Widening subtract with the same division-derived flag, inverted: 1 means
/// no borrow. A difference of exactly 0xFF reads as a borrow.
fn alu_sub(lhs: u8, rhs: u8) -> (u8, u8) {
    let diff = u16::from(lhs).wrapping_sub(u16::from(rhs));
    let flag = u8::from(diff / 0xFF == 0);
    ((diff % 0x100) as u8, flag)
}

/// 00E0 / 00EE / 0NNN
pub fn sys(op: u16, state: &mut State, _platform: &mut dyn Platform) -> Advance {
    match op {
        // 00E0: clear the screen
        0x00E0 => {
            state.frame_buffer = [0; DISPLAY_WIDTH * DISPLAY_HEIGHT];
            state.draw_flag = true;
            Advance::Step
        }
        // 00EE: return from subroutine; the popped address is the call site,
        // so the ordinary auto-advance moves past the call
        0x00EE => {
            state.sp = state.sp.wrapping_sub(1);
            state.pc = state.stack[state.sp as usize % STACK_DEPTH];
            Advance::Step
        }
        // 0NNN: machine language subroutines have no machine to run on
        _ => {
            warn!("machine subroutine {:04X} is not supported", op);
            Advance::Step
        }
    }
}

/// 1NNN: PC = NNN
pub fn jump(op: u16, state: &mut State, _platform: &mut dyn Platform) -> Advance {
    state.pc = op.addr();
    Advance::Hold
}

/// 2NNN: STACK.push(PC); PC = NNN
pub fn call(op: u16, state: &mut State, _platform: &mut dyn Platform) -> Advance {
    state.stack[state.sp as usize % STACK_DEPTH] = state.pc;
    state.sp = state.sp.wrapping_add(1);
    state.pc = op.addr();
    Advance::Hold
}

/// 3XNN: skip next if Vx == kk
pub fn ske(op: u16, state: &mut State, _platform: &mut dyn Platform) -> Advance {
    if state.v[op.x() as usize] == op.kk() {
        state.pc = state.pc.wrapping_add(0x2);
    }
    Advance::Step
}

/// 4XNN: skip next if Vx != kk
pub fn skne(op: u16, state: &mut State, _platform: &mut dyn Platform) -> Advance {
    if state.v[op.x() as usize] != op.kk() {
        state.pc = state.pc.wrapping_add(0x2);
    }
    Advance::Step
}

/// 5XY0: skip next if Vx == Vy
pub fn skre(op: u16, state: &mut State, _platform: &mut dyn Platform) -> Advance {
    if state.v[op.x() as usize] == state.v[op.y() as usize] {
        state.pc = state.pc.wrapping_add(0x2);
    }
    Advance::Step
}

/// 6XNN: Vx = kk
pub fn load(op: u16, state: &mut State, _platform: &mut dyn Platform) -> Advance {
    state.v[op.x() as usize] = op.kk();
    Advance::Step
}

/// 7XNN: Vx += kk, flag register untouched
pub fn add(op: u16, state: &mut State, _platform: &mut dyn Platform) -> Advance {
    let x = op.x() as usize;
    let (sum, _) = alu_add(state.v[x], op.kk());
    state.v[x] = sum;
    Advance::Step
}

/// 8XY0..8XYE: the register-to-register ALU family
pub fn alu(op: u16, state: &mut State, _platform: &mut dyn Platform) -> Advance {
    let x = op.x() as usize;
    let y = op.y() as usize;
    match op.n() {
        // 8XY0: Vx = Vy
        0x0 => state.v[x] = state.v[y],
        // 8XY1: Vx |= Vy
        0x1 => state.v[x] |= state.v[y],
        // 8XY2: Vx &= Vy
        0x2 => state.v[x] &= state.v[y],
        // 8XY3: Vx ^= Vy
        0x3 => state.v[x] ^= state.v[y],
        // 8XY4: Vx += Vy; VF = carry
        0x4 => {
            let (sum, flag) = alu_add(state.v[x], state.v[y]);
            state.v[0xF] = flag;
            state.v[x] = sum;
        }
        // 8XY5: Vx -= Vy; VF = 0 on borrow, 1 otherwise
        0x5 => {
            let (diff, flag) = alu_sub(state.v[x], state.v[y]);
            state.v[0xF] = flag;
            state.v[x] = diff;
        }
        // 8XY6: Vx = Vy >> 1, then Vy collapses to its own low bit.
        // The flag register is untouched, and when X == Y the second write
        // reads the freshly shifted register.
        0x6 => {
            state.v[x] = state.v[y] >> 0x1;
            state.v[y] &= 0x01;
        }
        // 8XY7: Vx = Vy - Vx; VF = 0 on borrow, 1 otherwise
        0x7 => {
            let (diff, flag) = alu_sub(state.v[y], state.v[x]);
            state.v[0xF] = flag;
            state.v[x] = diff;
        }
        // 8XYE: mirror of 8XY6 for the high bit
        0xE => {
            state.v[x] = state.v[y] << 0x1;
            state.v[y] &= 0x80;
        }
        _ => warn!("unrecognized ALU opcode {:04X}", op),
    }
    Advance::Step
}

/// 9XY0: skip next if Vx != Vy
pub fn skrne(op: u16, state: &mut State, _platform: &mut dyn Platform) -> Advance {
    if state.v[op.x() as usize] != state.v[op.y() as usize] {
        state.pc = state.pc.wrapping_add(0x2);
    }
    Advance::Step
}

/// ANNN: I = NNN
pub fn loadi(op: u16, state: &mut State, _platform: &mut dyn Platform) -> Advance {
    state.i = op.addr();
    Advance::Step
}

/// BNNN: PC = V0 + NNN
pub fn jumpi(op: u16, state: &mut State, _platform: &mut dyn Platform) -> Advance {
    state.pc = u16::from(state.v[0x0]) + op.addr();
    Advance::Hold
}

/// CXNN: Vx = random byte uniform over 0..=kk
pub fn rand(op: u16, state: &mut State, platform: &mut dyn Platform) -> Advance {
    state.v[op.x() as usize] = platform.random_byte(op.kk());
    Advance::Step
}

/// DXYN: XOR-blit an 8xN sprite from memory at I to (Vx, Vy); VF reports
/// whether any set pixel was toggled off.
///
/// Indexing is linear, as on the original interpreter: a sprite that starts
/// near the right edge spills onto the following row, and pixels past the
/// end of the buffer are dropped.
pub fn draw(op: u16, state: &mut State, _platform: &mut dyn Platform) -> Advance {
    let origin_x = state.v[op.x() as usize] as usize;
    let origin_y = state.v[op.y() as usize] as usize;

    let mut collision = false;
    for row in 0..op.n() as usize {
        let sprite = state.memory[mem_index(state.i, row)];
        let base = origin_x + (origin_y + row) * DISPLAY_WIDTH;
        for bit in 0..8 {
            if sprite & (0x80 >> bit) == 0 {
                continue;
            }
            if let Some(cell) = state.frame_buffer.get_mut(base + bit) {
                if *cell != 0 {
                    collision = true;
                }
                *cell ^= 0xFF;
            }
        }
    }

    state.v[0xF] = u8::from(collision);
    state.draw_flag = true;
    Advance::Step
}

/// EX9E / EXA1: skip on the held key matching / not matching Vx
pub fn key(op: u16, state: &mut State, _platform: &mut dyn Platform) -> Advance {
    let held = state.key == Some(state.v[op.x() as usize]);
    match op.kk() {
        // EX9E: skip next if Vx is held
        0x9E => {
            if held {
                state.pc = state.pc.wrapping_add(0x2);
            }
            Advance::Step
        }
        // EXA1: skip next if Vx isn't held
        0xA1 => {
            if !held {
                state.pc = state.pc.wrapping_add(0x2);
            }
            Advance::Step
        }
        _ => {
            warn!("unrecognized key opcode {:04X}", op);
            Advance::Hold
        }
    }
}

/// FX07..FX65: timers, key wait, and memory traffic
pub fn misc(op: u16, state: &mut State, _platform: &mut dyn Platform) -> Advance {
    let x = op.x() as usize;
    match op.kk() {
        // FX07: Vx = delay timer
        0x07 => state.v[x] = state.delay_timer,
        // FX0A: hold on this instruction until a key is down, then store it
        0x0A => match state.key {
            Some(key) => state.v[x] = key,
            None => return Advance::Hold,
        },
        // FX15: delay timer = Vx
        0x15 => state.delay_timer = state.v[x],
        // FX18: sound timer = Vx
        0x18 => state.sound_timer = state.v[x],
        // FX1E: I += Vx
        0x1E => state.i = state.i.wrapping_add(u16::from(state.v[x])),
        // FX29: I = the font glyph for the digit in Vx
        0x29 => state.i = FONT_START as u16 + u16::from(state.v[x]) * FONT_HEIGHT,
        // FX33: memory[I..I+3] = the decimal digits of Vx
        0x33 => {
            let vx = state.v[x];
            state.memory[mem_index(state.i, 0)] = vx / 100;
            state.memory[mem_index(state.i, 1)] = (vx / 10) % 10;
            state.memory[mem_index(state.i, 2)] = vx % 10;
        }
        // FX55: memory[I..=I+x] = V0..=Vx
        0x55 => {
            for offset in 0..=x {
                state.memory[mem_index(state.i, offset)] = state.v[offset];
            }
        }
        // FX65: V0..=Vx = memory[I..=I+x]
        0x65 => {
            for offset in 0..=x {
                state.v[offset] = state.memory[mem_index(state.i, offset)];
            }
        }
        _ => {
            warn!("unrecognized misc opcode {:04X}", op);
            return Advance::Hold;
        }
    }
    Advance::Step
}

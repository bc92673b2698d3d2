/// # Opcodes
///
/// A Chip-8 opcode is one big-endian 16-bit word. The high nibble picks the
/// instruction family; depending on the family the remaining nibbles carry:
/// - `[_nnn]` a 12-bit address
/// - `[_x__]` the register Vx (or the bound of a register range V0..Vx)
/// - `[__y_]` the register Vy
/// - `[___n]` a 4-bit immediate (sprite height, or a family-8 sub-opcode)
/// - `[__kk]` an 8-bit immediate (or a family-E/F sub-opcode)
pub trait Opcode {
    /// The high nibble, used for top-level dispatch.
    /// `[f___]`
    fn family(&self) -> u8;

    /// The second nibble.
    /// `[_x__]`
    fn x(&self) -> u8;

    /// The third nibble.
    /// `[__y_]`
    fn y(&self) -> u8;

    /// The low nibble.
    /// `[___n]`
    fn n(&self) -> u8;

    /// The low byte.
    /// `[__kk]`
    fn kk(&self) -> u8;

    /// Everything but the high nibble.
    /// `[_nnn]`
    fn addr(&self) -> u16;
}

impl Opcode for u16 {
    fn family(&self) -> u8 {
        ((self & 0xF000) >> 12) as u8
    }

    fn x(&self) -> u8 {
        ((self & 0x0F00) >> 8) as u8
    }

    fn y(&self) -> u8 {
        ((self & 0x00F0) >> 4) as u8
    }

    fn n(&self) -> u8 {
        (self & 0x000F) as u8
    }

    fn kk(&self) -> u8 {
        (self & 0x00FF) as u8
    }

    fn addr(&self) -> u16 {
        self & 0x0FFF
    }
}

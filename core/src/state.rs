use crate::constants::{
    DISPLAY_HEIGHT, DISPLAY_WIDTH, FONT_SET, FONT_START, MEMORY_SIZE, PROGRAM_START, STACK_DEPTH,
};

/// The frame buffer holds one byte per pixel, 0x00 for unset and 0xFF for
/// set, laid out row-major so a display can blit it without unpacking bits.
pub type FrameBuffer = [u8; DISPLAY_WIDTH * DISPLAY_HEIGHT];

/// The Chip-8 machine state
///
/// ## Registers
/// - (v) 16 8-bit registers V0..VF
///     - VF doubles as the flag register for carry, borrow, and collision
/// - (i) a 16-bit index register, used as a 12-bit memory address
/// - (pc) the program counter; starts at the program region
/// - (sp) the stack pointer into `stack`; counts live return addresses
///
/// ## Memory
/// - 4096 bytes of addressable memory in three regions:
///     - 0x000..=0x1FF reserved for the interpreter
///     - 0x050..=0x09F the font sheet, baked in at construction
///     - 0x200..=0xFFF the program region
/// - a 16-slot stack of 16-bit return addresses
///
/// ## Timers
/// - (delay_timer, sound_timer) 8-bit counters decremented at 60Hz only;
///   sound is audible for as long as `sound_timer` is nonzero
///
/// ## Input
/// - (key) the single currently-held key 0x0..=0xF, or None
///
/// ## Display
/// - (frame_buffer) 64x32 monochrome pixels
/// - (draw_flag) raised whenever the buffer is cleared or blitted; the
///   consumer lowers it when it takes the frame
pub struct State {
    pub v: [u8; 16],
    pub i: u16,
    pub pc: u16,
    pub sp: u8,
    pub delay_timer: u8,
    pub sound_timer: u8,
    pub stack: [u16; STACK_DEPTH],
    pub memory: [u8; MEMORY_SIZE],
    pub frame_buffer: FrameBuffer,
    pub draw_flag: bool,
    pub key: Option<u8>,
}

impl State {
    pub fn new() -> Self {
        let mut memory = [0; MEMORY_SIZE];
        memory[FONT_START..FONT_START + FONT_SET.len()].copy_from_slice(&FONT_SET);

        State {
            v: [0; 16],
            i: 0,
            pc: PROGRAM_START as u16,
            sp: 0,
            delay_timer: 0,
            sound_timer: 0,
            stack: [0; STACK_DEPTH],
            memory,
            frame_buffer: [0; DISPLAY_WIDTH * DISPLAY_HEIGHT],
            draw_flag: false,
            key: None,
        }
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}

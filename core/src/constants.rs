/// Pixels in one screen's width.
pub const DISPLAY_WIDTH: usize = 64;

/// Pixels in one screen's height.
pub const DISPLAY_HEIGHT: usize = 32;

/// The full byte-addressable space: 4KiB.
pub const MEMORY_SIZE: usize = 4096;

/// Return addresses the call stack can hold.
pub const STACK_DEPTH: usize = 16;

/// Where ROMs are loaded and where the PC starts.
pub const PROGRAM_START: usize = 0x200;

/// Where the font sheet is baked into memory.
pub const FONT_START: usize = 0x050;

/// Rows of pixels in a single font glyph.
pub const FONT_HEIGHT: u16 = 5;

/// The hardware timers decrement at 60Hz.
pub const TIMER_PERIOD_MS: u32 = 1000 / 60;

/// Nominal gap between instruction cycles; roughly 600Hz.
pub const CYCLE_PERIOD_MS: u32 = 100 / 60;

/// How much one rate-adjust hint stretches or shrinks the cycle period.
pub const CYCLE_PERIOD_STEP_MS: u32 = 100 / 60;

/// The 16 hex digit glyphs, 5 bytes each, resident at [`FONT_START`].
pub const FONT_SET: [u8; 80] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];

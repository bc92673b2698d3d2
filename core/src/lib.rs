pub use chip8::Chip8;
pub use platform::{Cadence, InputPoll, Platform, RateAdjust};
pub use state::{FrameBuffer, State};

mod chip8;
pub mod constants;
mod instruction;
mod opcode;
mod operations;
pub mod platform;
pub mod state;

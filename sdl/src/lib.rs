pub use keymap::keymap;
pub use platform::SdlPlatform;

mod keymap;
mod platform;

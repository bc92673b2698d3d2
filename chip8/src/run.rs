use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use log::{error, info};

use chip8_core::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH};
use chip8_core::{Chip8, Platform};
use chip8_sdl::SdlPlatform;

/// Pixel upscale from the logical frame buffer to the window.
const SCALE: usize = 10;

/// Bring up the platform, load the ROM, and run the machine until the
/// platform reports a quit request.
///
/// Setup failures are logged rather than fatal: a ROM that fails to load
/// leaves the program region empty, and missing platform resources degrade
/// to no-ops inside the boundary.
pub fn run(rom: &Path) {
    let mut platform = match SdlPlatform::new() {
        Ok(platform) => platform,
        Err(e) => {
            error!("SDL could not initialize: {}", e);
            return;
        }
    };
    platform.init(
        DISPLAY_WIDTH,
        DISPLAY_HEIGHT,
        DISPLAY_WIDTH * SCALE,
        DISPLAY_HEIGHT * SCALE,
    );

    let mut chip8 = Chip8::new();
    match File::open(rom) {
        Ok(file) => match chip8.load_rom(&mut BufReader::new(file)) {
            Ok(loaded) => info!("loaded {} byte ROM from {}", loaded, rom.display()),
            Err(e) => error!("failed to read {}: {}; continuing anyway", rom.display(), e),
        },
        Err(e) => error!("failed to open {}: {}; continuing anyway", rom.display(), e),
    }

    loop {
        chip8.emulate_cycle(&mut platform);
        chip8.update_timers(&mut platform);
        if let Some(frame) = chip8.take_frame() {
            platform.draw(frame);
        }
        if chip8.poll_input(&mut platform) {
            break;
        }
    }

    platform.deinit();
}

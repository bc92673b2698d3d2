use std::io;
use std::io::Read;

use log::warn;

use crate::constants::{
    CYCLE_PERIOD_MS, CYCLE_PERIOD_STEP_MS, MEMORY_SIZE, PROGRAM_START, TIMER_PERIOD_MS,
};
use crate::instruction::{self, Advance};
use crate::platform::{Cadence, Platform, RateAdjust};
use crate::state::{FrameBuffer, State};

/// # Chip-8
/// The interpreter context: machine [`State`] plus the two cadences that
/// schedule it.
///
/// The run loop drives it through four operations per iteration:
/// - `emulate_cycle` fetches and executes one instruction when the
///   (adjustable) instruction cadence is ready
/// - `update_timers` gates audio and drains the 60Hz hardware timers
/// - `take_frame` hands the frame buffer out once per draw
/// - `poll_input` feeds key state and the cycle-rate offset back in and
///   reports quit requests
pub struct Chip8 {
    state: State,
    cycle_cadence: Cadence,
    timer_cadence: Cadence,
    /// Stretches the instruction period; raised and lowered one step at a
    /// time by rate-adjust hints and never negative.
    cycle_offset_ms: u32,
}

impl Chip8 {
    pub fn new() -> Self {
        Chip8 {
            state: State::new(),
            cycle_cadence: Cadence::default(),
            timer_cadence: Cadence::default(),
            cycle_offset_ms: 0,
        }
    }

    /// Load a ROM image into the program region.
    ///
    /// Returns how many bytes landed. An image larger than the region is
    /// truncated to fit.
    ///
    /// # Arguments
    /// * `reader` a reader over a raw ROM image
    pub fn load_rom(&mut self, reader: &mut dyn Read) -> Result<usize, io::Error> {
        let region = &mut self.state.memory[PROGRAM_START..];
        let mut loaded = 0;
        while loaded < region.len() {
            let read = reader.read(&mut region[loaded..])?;
            if read == 0 {
                break;
            }
            loaded += read;
        }
        if loaded == region.len() && reader.read(&mut [0u8])? != 0 {
            warn!("ROM image exceeds the program region; truncating");
        }
        Ok(loaded)
    }

    /// Run one fetch-decode-execute cycle if the instruction cadence is
    /// ready; otherwise do nothing.
    pub fn emulate_cycle(&mut self, platform: &mut dyn Platform) {
        let period = CYCLE_PERIOD_MS + self.cycle_offset_ms;
        if !platform.can_advance(&mut self.cycle_cadence, period) {
            return;
        }

        let op = self.fetch();
        if instruction::from_op(op)(op, &mut self.state, platform) == Advance::Step {
            self.state.pc = self.state.pc.wrapping_add(0x2);
        }
    }

    /// Gate audio on the sound timer and decrement both hardware timers
    /// whenever the fixed 60Hz cadence fires.
    ///
    /// The gate is re-asserted every call, not just on the decrement tick,
    /// so a timer loaded mid-period sounds immediately.
    pub fn update_timers(&mut self, platform: &mut dyn Platform) {
        if self.state.sound_timer > 0 {
            platform.play_sound();
        } else {
            platform.stop_sound();
        }

        if platform.can_advance(&mut self.timer_cadence, TIMER_PERIOD_MS) {
            if self.state.delay_timer > 0 {
                self.state.delay_timer -= 1;
            }
            if self.state.sound_timer > 0 {
                self.state.sound_timer -= 1;
            }
        }
    }

    /// Returns the frame buffer if it changed since the last take, lowering
    /// the drawn flag so the same frame is not blitted twice.
    pub fn take_frame(&mut self) -> Option<&FrameBuffer> {
        if self.state.draw_flag {
            self.state.draw_flag = false;
            Some(&self.state.frame_buffer)
        } else {
            None
        }
    }

    /// Poll the platform for input, apply any rate-adjust hint to the
    /// instruction cadence, and report whether a quit was requested.
    pub fn poll_input(&mut self, platform: &mut dyn Platform) -> bool {
        let poll = platform.poll_input(&mut self.state.key);
        match poll.rate {
            Some(RateAdjust::Faster) => {
                if self.cycle_offset_ms > CYCLE_PERIOD_STEP_MS {
                    self.cycle_offset_ms -= CYCLE_PERIOD_STEP_MS;
                }
            }
            Some(RateAdjust::Slower) => {
                self.cycle_offset_ms += CYCLE_PERIOD_STEP_MS;
            }
            None => {}
        }
        poll.quit
    }

    /// The big-endian instruction word under the PC. Fetches off the top of
    /// memory wrap around, matching the data-side addressing.
    fn fetch(&self) -> u16 {
        let pc = self.state.pc as usize % MEMORY_SIZE;
        u16::from_be_bytes([self.state.memory[pc], self.state.memory[(pc + 1) % MEMORY_SIZE]])
    }
}

impl Default for Chip8 {
    fn default() -> Self {
        Self::new()
    }
}

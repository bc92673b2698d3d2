use crate::state::FrameBuffer;

/// One cadence of the timing scheduler.
///
/// A cadence is unarmed until its first query, which records the current tick
/// and reports not-ready. After that it fires whenever a full period has
/// elapsed since the last scheduled fire, and the marker advances by exactly
/// one period rather than to "now", so overrun carries into the next
/// measurement instead of being discarded.
#[derive(Clone, Copy, Default)]
pub struct Cadence {
    last_fire: Option<u32>,
}

impl Cadence {
    /// The carry-forward step: arm on the first query, then fire whenever a
    /// full period sits between the last scheduled fire and `now`.
    fn advance(&mut self, now: u32, period_ms: u32) -> bool {
        match self.last_fire {
            None => {
                self.last_fire = Some(now);
                false
            }
            Some(mark) if now.wrapping_sub(mark) >= period_ms => {
                self.last_fire = Some(mark.wrapping_add(period_ms));
                true
            }
            Some(_) => false,
        }
    }
}

/// A runtime request to stretch or shrink the instruction cadence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RateAdjust {
    Faster,
    Slower,
}

/// What one non-blocking input poll reported.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputPoll {
    pub quit: bool,
    pub rate: Option<RateAdjust>,
}

/// The platform boundary: everything the interpreter needs from the outside
/// world. One concrete implementation exists per deployment target; the
/// engine only ever talks to this trait.
pub trait Platform {
    /// Prepare display, audio, and input for a `pixel_width` x `pixel_height`
    /// frame buffer shown at `output_width` x `output_height`. Failures are
    /// logged and leave the affected resource unusable; they are not fatal.
    fn init(
        &mut self,
        pixel_width: usize,
        pixel_height: usize,
        output_width: usize,
        output_height: usize,
    );

    /// Release everything `init` acquired.
    fn deinit(&mut self);

    /// Blit one frame. No-ops (with a log line) if the display never came up.
    fn draw(&mut self, frame: &FrameBuffer);

    /// Drain pending input without blocking. Key-down events store the held
    /// key in `pressed`; releasing a mapped key restores `None`. The return
    /// value carries the quit request and any rate-adjust hint.
    fn poll_input(&mut self, pressed: &mut Option<u8>) -> InputPoll;

    /// Milliseconds elapsed on the platform's monotonic tick source.
    fn ticks(&mut self) -> u32;

    /// Open the audio gate. Idempotent.
    fn play_sound(&mut self);

    /// Close the audio gate. Idempotent.
    fn stop_sound(&mut self);

    /// A byte uniformly distributed over `0..=mask`.
    fn random_byte(&mut self, mask: u8) -> u8;

    /// Whether `cadence` has a full `period_ms` behind it. See [`Cadence`]
    /// for the carry-forward contract.
    fn can_advance(&mut self, cadence: &mut Cadence, period_ms: u32) -> bool {
        let now = self.ticks();
        cadence.advance(now, period_ms)
    }
}


#[cfg(test)]
mod test_cadence {
    use super::testing::FakePlatform;
    use super::*;

    fn tick_driven() -> FakePlatform {
        let mut platform = FakePlatform::new();
        platform.ready = None;
        platform
    }

    #[test]
    fn test_first_query_arms_without_firing() {
        let mut platform = tick_driven();
        let mut cadence = Cadence::default();
        platform.now = 7;
        assert!(!platform.can_advance(&mut cadence, 10));
    }

    #[test]
    fn test_fires_once_per_elapsed_period() {
        let mut platform = tick_driven();
        let mut cadence = Cadence::default();
        platform.can_advance(&mut cadence, 10);
        platform.now = 10;
        assert!(platform.can_advance(&mut cadence, 10));
        assert!(!platform.can_advance(&mut cadence, 10));
    }

    #[test]
    fn test_overrun_carries_forward() {
        let mut platform = tick_driven();
        let mut cadence = Cadence::default();
        platform.can_advance(&mut cadence, 10);

        // 2.5 periods elapse at once: exactly two fires, and the half period
        // is still banked for the next query.
        platform.now = 25;
        assert!(platform.can_advance(&mut cadence, 10));
        assert!(platform.can_advance(&mut cadence, 10));
        assert!(!platform.can_advance(&mut cadence, 10));

        platform.now = 30;
        assert!(platform.can_advance(&mut cadence, 10));
    }

    #[test]
    fn test_independent_cadences_do_not_interfere() {
        let mut platform = tick_driven();
        let mut fast = Cadence::default();
        let mut slow = Cadence::default();
        platform.can_advance(&mut fast, 1);
        platform.can_advance(&mut slow, 16);

        platform.now = 4;
        assert!(platform.can_advance(&mut fast, 1));
        assert!(!platform.can_advance(&mut slow, 16));
    }

    #[test]
    fn test_survives_tick_rollover() {
        let mut platform = tick_driven();
        let mut cadence = Cadence::default();
        platform.now = u32::MAX - 3;
        platform.can_advance(&mut cadence, 10);
        platform.now = 6;
        assert!(platform.can_advance(&mut cadence, 10));
    }
}

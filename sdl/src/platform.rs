use log::{error, warn};
use rand::rngs::ThreadRng;
use rand::Rng;
use sdl2::audio::{AudioCallback, AudioDevice, AudioSpecDesired, AudioStatus};
use sdl2::event::Event;
use sdl2::keyboard::Keycode;
use sdl2::pixels::PixelFormatEnum;
use sdl2::render::WindowCanvas;
use sdl2::EventPump;
use sdl2::TimerSubsystem;

use chip8_core::platform::{InputPoll, Platform, RateAdjust};
use chip8_core::state::FrameBuffer;

use crate::keymap::keymap;

/// Samples per audio buffer. Well under SDL's recommended minimum, but the
/// buffer has to drain inside one 60Hz timer period or short beeps are lost.
const AUDIO_SAMPLES: u16 = 0x10;

/// Milliseconds one audio buffer spans.
const AUDIO_SAMPLE_TIME_MS: i32 = 10;

/// Square wave swing around the 8-bit bias point.
const AUDIO_AMPLITUDE: u8 = 0x10;

/// The tone is a bare square wave alternating sign every sample.
struct SquareWave {
    amplitude: u8,
}

impl AudioCallback for SquareWave {
    type Channel = u8;

    fn callback(&mut self, out: &mut [u8]) {
        let mut high = true;
        for sample in out.iter_mut() {
            *sample = if high {
                0x80 + self.amplitude
            } else {
                0x80 - self.amplitude
            };
            high = !high;
        }
    }
}

/// The SDL2 platform boundary: window rendering, event-pump input, a gated
/// square-wave tone, the millisecond tick source, and the random source.
///
/// Every resource is optional. If a subsystem fails to come up the failure
/// is logged once and the operations that need it degrade to no-ops, so a
/// machine without (say) audio still runs ROMs.
pub struct SdlPlatform {
    sdl: sdl2::Sdl,
    timer: Option<TimerSubsystem>,
    canvas: Option<WindowCanvas>,
    audio: Option<AudioDevice<SquareWave>>,
    events: Option<EventPump>,
    frame_width: u32,
    frame_height: u32,
    rng: ThreadRng,
}

impl SdlPlatform {
    /// Acquire the SDL context. Subsystems are brought up later by `init`.
    pub fn new() -> Result<Self, String> {
        let sdl = sdl2::init()?;
        Ok(SdlPlatform {
            sdl,
            timer: None,
            canvas: None,
            audio: None,
            events: None,
            frame_width: 0,
            frame_height: 0,
            rng: rand::thread_rng(),
        })
    }

    fn init_display(&mut self, output_width: usize, output_height: usize) {
        let video = match self.sdl.video() {
            Ok(video) => video,
            Err(e) => return error!("video subsystem could not initialize: {}", e),
        };
        let window = match video
            .window("chip8emu", output_width as u32, output_height as u32)
            .position_centered()
            .opengl()
            .build()
        {
            Ok(window) => window,
            Err(e) => return error!("window could not be created: {}", e),
        };
        match window.into_canvas().build() {
            Ok(canvas) => self.canvas = Some(canvas),
            Err(e) => error!("renderer could not be created: {}", e),
        }
    }

    fn init_audio(&mut self) {
        let audio = match self.sdl.audio() {
            Ok(audio) => audio,
            Err(e) => return error!("audio subsystem could not initialize: {}", e),
        };
        let desired = AudioSpecDesired {
            freq: Some(i32::from(AUDIO_SAMPLES) * 1000 / AUDIO_SAMPLE_TIME_MS),
            channels: Some(1),
            samples: Some(AUDIO_SAMPLES),
        };
        match audio.open_playback(None, &desired, |_spec| SquareWave {
            amplitude: AUDIO_AMPLITUDE,
        }) {
            Ok(device) => self.audio = Some(device),
            Err(e) => error!("audio device could not be opened: {}", e),
        }
    }
}

impl Platform for SdlPlatform {
    fn init(
        &mut self,
        pixel_width: usize,
        pixel_height: usize,
        output_width: usize,
        output_height: usize,
    ) {
        self.frame_width = pixel_width as u32;
        self.frame_height = pixel_height as u32;

        match self.sdl.timer() {
            Ok(timer) => self.timer = Some(timer),
            Err(e) => error!("timer subsystem could not initialize: {}", e),
        }
        self.init_display(output_width, output_height);
        self.init_audio();
        match self.sdl.event_pump() {
            Ok(events) => self.events = Some(events),
            Err(e) => error!("event pump could not be created: {}", e),
        }
    }

    fn deinit(&mut self) {
        self.audio = None;
        self.canvas = None;
        self.events = None;
        self.timer = None;
    }

    fn draw(&mut self, frame: &FrameBuffer) {
        let canvas = match self.canvas.as_mut() {
            Some(canvas) => canvas,
            None => return warn!("display never initialized; dropping frame"),
        };

        // RGB24 wants three bytes per pixel; the frame buffer already holds
        // 0x00/0xFF cells, so each byte is just written out three times.
        let texture_creator = canvas.texture_creator();
        let mut texture = match texture_creator.create_texture_streaming(
            PixelFormatEnum::RGB24,
            self.frame_width,
            self.frame_height,
        ) {
            Ok(texture) => texture,
            Err(e) => return error!("texture could not be created: {}", e),
        };

        let filled = texture.with_lock(None, |buffer: &mut [u8], _pitch: usize| {
            for (rgb, &cell) in buffer.chunks_exact_mut(3).zip(frame.iter()) {
                rgb.fill(cell);
            }
        });
        if let Err(e) = filled {
            return error!("texture upload failed: {}", e);
        }

        if let Err(e) = canvas.copy(&texture, None, None) {
            return error!("render copy failed: {}", e);
        }
        canvas.present();
    }

    fn poll_input(&mut self, pressed: &mut Option<u8>) -> InputPoll {
        let mut poll = InputPoll::default();
        let events = match self.events.as_mut() {
            Some(events) => events,
            None => return poll,
        };

        // One event per call; the run loop comes back around every iteration
        if let Some(event) = events.poll_event() {
            match event {
                Event::Quit { .. } => poll.quit = true,
                Event::KeyDown {
                    keycode: Some(keycode),
                    ..
                } => {
                    if let Some(key) = keymap(keycode) {
                        *pressed = Some(key);
                    }
                    match keycode {
                        Keycode::Plus | Keycode::Equals => poll.rate = Some(RateAdjust::Faster),
                        Keycode::Minus | Keycode::Underscore => {
                            poll.rate = Some(RateAdjust::Slower)
                        }
                        _ => {}
                    }
                }
                Event::KeyUp {
                    keycode: Some(keycode),
                    ..
                } => {
                    if keymap(keycode).is_some() {
                        *pressed = None;
                    }
                }
                _ => {}
            }
        }
        poll
    }

    fn ticks(&mut self) -> u32 {
        match self.timer.as_ref() {
            Some(timer) => timer.ticks(),
            None => 0,
        }
    }

    fn play_sound(&mut self) {
        if let Some(device) = self.audio.as_ref() {
            if device.status() != AudioStatus::Playing {
                device.resume();
            }
        }
    }

    fn stop_sound(&mut self) {
        if let Some(device) = self.audio.as_ref() {
            if device.status() == AudioStatus::Playing {
                device.pause();
            }
        }
    }

    fn random_byte(&mut self, mask: u8) -> u8 {
        self.rng.gen_range(0..=mask)
    }
}

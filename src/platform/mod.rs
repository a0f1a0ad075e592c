//! Platform abstraction layer
//!
//! The host supplies:
//! - Input snapshots (one per frame)
//! - Frame timing
//! - A renderer that reads the match after each tick
//! - An audio backend fed with the tick's events
//!
//! [`run_match`] drives them in a single-threaded loop until the input
//! asks to quit.

use std::time::{Duration, Instant};

use crate::audio::{AudioCues, AudioSink};
use crate::consts::{MAX_FRAME_DT, SIM_DT, TARGET_FPS};
use crate::sim::{MatchState, Outcome, TickInput, tick};

/// Produces one input snapshot per frame
pub trait InputSource {
    fn poll(&mut self, state: &MatchState) -> TickInput;
}

/// Draws a finished tick
pub trait RenderSink {
    fn render(&mut self, state: &MatchState);
}

/// Frame pacing; returns the seconds elapsed since the previous frame
pub trait Clock {
    fn frame_dt(&mut self) -> f32;
}

/// Always reports the nominal frame time (tests, headless runs)
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    pub dt: f32,
}

impl Default for FixedClock {
    fn default() -> Self {
        Self { dt: SIM_DT }
    }
}

impl Clock for FixedClock {
    fn frame_dt(&mut self) -> f32 {
        self.dt
    }
}

/// Sleeps to hold the target frame rate and reports real elapsed time
#[derive(Debug)]
pub struct WallClock {
    last: Instant,
    frame: Duration,
}

impl Default for WallClock {
    fn default() -> Self {
        Self::new(TARGET_FPS)
    }
}

impl WallClock {
    pub fn new(fps: u32) -> Self {
        Self {
            last: Instant::now(),
            frame: Duration::from_secs_f32(1.0 / fps.max(1) as f32),
        }
    }
}

impl Clock for WallClock {
    fn frame_dt(&mut self) -> f32 {
        let elapsed = self.last.elapsed();
        if elapsed < self.frame {
            std::thread::sleep(self.frame - elapsed);
        }
        let now = Instant::now();
        let dt = now.duration_since(self.last).as_secs_f32();
        self.last = now;
        dt
    }
}

/// Run frames until the input source sets `quit`. Returns the outcome at
/// that point; a finished match keeps rendering until quit.
pub fn run_match<I, C, R, A>(
    state: &mut MatchState,
    input: &mut I,
    clock: &mut C,
    renderer: &mut R,
    audio: &mut AudioCues<A>,
) -> Outcome
where
    I: InputSource,
    C: Clock,
    R: RenderSink,
    A: AudioSink,
{
    loop {
        let dt = clock.frame_dt().clamp(0.0, MAX_FRAME_DT);
        let frame_input = input.poll(state);
        if frame_input.quit {
            log::info!("Quit after {} ticks", state.time_ticks);
            break;
        }

        let before = state.outcome();
        tick(state, &frame_input, dt);
        if state.outcome() != before {
            log::info!("Match over: {:?}", state.outcome());
        }

        renderer.render(state);
        let events = state.drain_events();
        audio.handle(&events);
    }
    state.outcome()
}

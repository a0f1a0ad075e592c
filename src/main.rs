//! Street Brawl headless driver
//!
//! Runs a full match with a seeded autopilot standing in for the keyboard
//! and logs what a renderer and audio backend would receive.
//!
//! Usage: `street-brawl [CONFIG.json] [--seed N] [--max-ticks N] [--realtime]`

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use street_brawl::audio::{AudioCues, AudioSink, SoundEffect};
use street_brawl::platform::{Clock, FixedClock, InputSource, RenderSink, WallClock, run_match};
use street_brawl::sim::{MatchState, Outcome, TickInput};
use street_brawl::MatchConfig;

/// Command line options
struct Options {
    config_path: Option<String>,
    seed: u64,
    max_ticks: u64,
    realtime: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            config_path: None,
            seed: 12345,
            max_ticks: 60 * 60 * 5,
            realtime: false,
        }
    }
}

impl Options {
    fn parse() -> Self {
        let mut opts = Self::default();
        let mut args = std::env::args().skip(1);
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--seed" => {
                    if let Some(v) = args.next().and_then(|v| v.parse().ok()) {
                        opts.seed = v;
                    }
                }
                "--max-ticks" => {
                    if let Some(v) = args.next().and_then(|v| v.parse().ok()) {
                        opts.max_ticks = v;
                    }
                }
                "--realtime" => opts.realtime = true,
                _ => opts.config_path = Some(arg),
            }
        }
        opts
    }
}

/// Plays the game: close the distance, swing, block incoming shots
struct Autopilot {
    rng: Pcg32,
    max_ticks: u64,
    /// Frames to keep running after the match ends (so the banner shows)
    linger: u32,
}

impl InputSource for Autopilot {
    fn poll(&mut self, state: &MatchState) -> TickInput {
        if state.time_ticks >= self.max_ticks {
            return TickInput {
                quit: true,
                ..Default::default()
            };
        }
        if state.outcome() != Outcome::InProgress {
            self.linger = self.linger.saturating_sub(1);
            return TickInput {
                quit: self.linger == 0,
                ..Default::default()
            };
        }

        let me = state.player.body.rect();
        let mut input = TickInput::default();

        if let Some(target) = state
            .enemies
            .iter()
            .min_by_key(|e| (e.body.rect().center_x() - me.center_x()).abs())
        {
            let dx = target.body.rect().center_x() - me.center_x();
            if dx.abs() > 60 {
                input.move_right = dx > 0;
                input.move_left = dx < 0;
            } else {
                // Tap toward the target to face it, then swing
                input.move_right = dx > 0 && self.rng.random_bool(0.2);
                input.move_left = dx < 0 && self.rng.random_bool(0.2);
                input.attack = self.rng.random_bool(0.7);
            }
        }

        let shot_incoming = state.projectiles.iter().any(|p| {
            let gap = p.rect.center_x() - me.center_x();
            gap.abs() < 80 && (gap > 0) == (p.vx < 0.0)
        });
        if shot_incoming && self.rng.random_bool(0.8) {
            input.block = true;
        }
        input.jump = self.rng.random_bool(0.01);
        input
    }
}

/// Logs HUD changes instead of drawing
#[derive(Default)]
struct LogRenderer {
    last_label: String,
    last_banner: Option<&'static str>,
}

impl RenderSink for LogRenderer {
    fn render(&mut self, state: &MatchState) {
        let hud = state.hud();
        let label = hud.wave_label();
        if label != self.last_label {
            log::info!("{}", label);
            self.last_label = label;
        }
        if hud.banner() != self.last_banner {
            if let Some(banner) = hud.banner() {
                log::info!("{}", banner);
            }
            self.last_banner = hud.banner();
        }
        if state.time_ticks.is_multiple_of(60) {
            log::debug!(
                "t={} player hp {:.0}% enemies {} shots {} enemy hp {:?}",
                state.time_ticks,
                hud.player_health * 100.0,
                state.enemies.len(),
                state.projectiles.len(),
                hud.enemy_health
            );
        }
    }
}

/// Audio backend that only logs cues
struct LogAudio;

impl AudioSink for LogAudio {
    fn play(&mut self, effect: SoundEffect, gain: f32) {
        let tone = effect.tone();
        log::trace!(
            "{:?}: {} Hz for {}s at {:.2}",
            effect,
            tone.freq_hz,
            tone.duration,
            tone.volume * gain
        );
    }
}

fn run(state: &mut MatchState, opts: &Options, clock: &mut impl Clock) -> Outcome {
    let mut input = Autopilot {
        rng: Pcg32::seed_from_u64(opts.seed),
        max_ticks: opts.max_ticks,
        linger: 60,
    };
    run_match(
        state,
        &mut input,
        clock,
        &mut LogRenderer::default(),
        &mut AudioCues::new(LogAudio),
    )
}

#[cfg(not(target_arch = "wasm32"))]
fn init_logging() {
    // A second init (tests) keeps the first logger
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
}

#[cfg(target_arch = "wasm32")]
fn init_logging() {}

fn main() {
    init_logging();

    let opts = Options::parse();
    let config = match &opts.config_path {
        Some(path) => match MatchConfig::load(path) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("{e}; using default config");
                MatchConfig::default()
            }
        },
        None => MatchConfig::default(),
    };

    let mut state = match MatchState::new(&config) {
        Ok(state) => state,
        Err(e) => {
            log::error!("Cannot start match: {e}");
            std::process::exit(1);
        }
    };

    let outcome = if opts.realtime {
        run(&mut state, &opts, &mut WallClock::default())
    } else {
        run(&mut state, &opts, &mut FixedClock::default())
    };

    log::info!(
        "Finished after {} ticks: {:?} (wave {}/{}, player hp {})",
        state.time_ticks,
        outcome,
        state.director.wave_number(),
        state.director.wave_count(),
        state.player.health.current()
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logging_init_is_repeatable() {
        init_logging();
        init_logging();
        log::info!("still logging");
    }

    #[test]
    fn test_headless_match_finishes() {
        init_logging();
        let opts = Options {
            max_ticks: 600,
            ..Options::default()
        };
        let mut state = MatchState::new(&MatchConfig::default()).unwrap();
        run(&mut state, &opts, &mut FixedClock::default());
        assert!(state.time_ticks > 0);
        assert!(state.time_ticks <= 600);
    }
}

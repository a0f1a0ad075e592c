//! Street Brawl - a 2D side-scrolling brawler
//!
//! Core modules:
//! - `sim`: Deterministic simulation (bodies, combat, AI, waves)
//! - `tuning`: Data-driven game balance and wave tables
//! - `audio`: Sound cue mapping for simulation events
//! - `platform`: Input/render/audio boundaries and the frame loop

pub mod audio;
pub mod error;
pub mod platform;
pub mod sim;
pub mod tuning;

pub use error::{ConfigError, ConfigResult};
pub use tuning::{MatchConfig, Tuning};

/// Frame timing constants
pub mod consts {
    /// Target frame rate the tuning numbers were balanced against
    pub const TARGET_FPS: u32 = 60;
    /// Nominal frame time at the target rate
    pub const SIM_DT: f32 = 1.0 / TARGET_FPS as f32;
    /// Longest frame the loop will simulate (hitches get clamped)
    pub const MAX_FRAME_DT: f32 = 0.1;
}

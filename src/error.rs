//! Configuration and construction errors
//!
//! The tick path never fails. Everything that can be malformed (tuning
//! values, wave tables, body dimensions) is rejected up front, before a
//! match starts.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while building a match or loading its configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("rectangle dimensions must be positive, got {width}x{height}")]
    InvalidDimensions { width: i32, height: i32 },

    #[error("maximum health must be positive")]
    ZeroHealth,

    #[error("tuning value '{name}' = {value} must be positive")]
    InvalidValue { name: &'static str, value: f32 },

    #[error("wave table has no waves")]
    EmptyWaveTable,

    #[error("wave {wave} has no enemies")]
    EmptyWave { wave: usize },

    #[error("wave {wave} spawns an enemy at x={x}, outside the arena (width {arena_width})")]
    SpawnOutOfArena { wave: usize, x: i32, arena_width: i32 },

    #[error("failed to read config file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Convenience alias used by constructors
pub type ConfigResult<T> = Result<T, ConfigError>;

//! Deterministic simulation module
//!
//! All gameplay logic lives here. Nothing in this module draws, plays
//! sound or reads devices:
//! - Bodies and platform collision
//! - Combat timers, combos and invulnerability
//! - Player and enemy decision logic
//! - Projectiles, hit resolution and wave progression

pub mod actor;
pub mod body;
pub mod combat;
pub mod health;
pub mod projectile;
pub mod rect;
pub mod state;
pub mod tick;
pub mod timers;
pub mod wave;

pub use actor::{Enemy, EnemyKind, Intent, Player};
pub use body::{Body, Gravity};
pub use combat::{mitigate, resolve_combat};
pub use health::Health;
pub use projectile::{Projectile, Projectiles};
pub use rect::Rect;
pub use state::{GameEvent, Hud, MatchState};
pub use tick::{TickInput, tick};
pub use timers::{AttackTimers, Combo, Timer};
pub use wave::{Archetype, Outcome, WaveDirector, WaveEntry, WaveStep, WaveTable};

//! Match state and the read-only view handed to renderers
//!
//! The match exclusively owns the player, the enemy roster and the
//! projectiles. Collaborators read it after a tick has finished and pull
//! the tick's events with [`MatchState::drain_events`].

use serde::{Deserialize, Serialize};

use super::actor::{Enemy, Player};
use super::body::Gravity;
use super::projectile::Projectiles;
use super::rect::Rect;
use super::wave::{Outcome, WaveDirector};
use crate::error::ConfigResult;
use crate::tuning::{MatchConfig, Tuning};

/// Discrete things that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// The player started a swing
    PlayerAttacked,
    /// A swing got past the grace period and was not blocked (projectile
    /// hits are silent)
    DamageLanded,
    /// A wave's roster was spawned (0-based)
    WaveStarted { index: usize },
    /// The match reached a terminal outcome
    MatchEnded { outcome: Outcome },
}

/// Complete state of one match. Serializes for snapshots; a match is only
/// ever built by [`MatchState::new`].
#[derive(Debug, Clone, Serialize)]
pub struct MatchState {
    pub tuning: Tuning,
    /// Static collision geometry
    pub platforms: Vec<Rect>,
    pub player: Player,
    /// Live enemies of the current wave
    pub enemies: Vec<Enemy>,
    pub projectiles: Projectiles,
    pub director: WaveDirector,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Events produced since the last drain
    #[serde(skip)]
    pub(super) events: Vec<GameEvent>,
}

impl MatchState {
    /// Build a match from a config: validates tuning and the wave table,
    /// places the floor, and spawns the player and the first wave
    pub fn new(config: &MatchConfig) -> ConfigResult<Self> {
        let tuning = config.tuning.clone();
        tuning.validate()?;
        let director = WaveDirector::new(config.wave_table()?, &tuning)?;

        let floor = Rect::new(0, tuning.floor_top(), tuning.arena_width, tuning.floor_height);
        let player = Player::spawn(&tuning)?;
        let enemies = director.first_roster();

        log::info!(
            "Match started: {} waves, {} enemies in wave 1",
            director.wave_count(),
            enemies.len()
        );

        Ok(Self {
            tuning,
            platforms: vec![floor],
            player,
            enemies,
            projectiles: Projectiles::new(),
            director,
            time_ticks: 0,
            events: vec![GameEvent::WaveStarted { index: 0 }],
        })
    }

    pub fn outcome(&self) -> Outcome {
        self.director.outcome()
    }

    pub fn gravity(&self) -> Gravity {
        Gravity {
            accel: self.tuning.gravity,
            terminal: self.tuning.terminal_velocity,
        }
    }

    /// Take the events produced since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Everything a HUD needs, without the renderer poking at internals
    pub fn hud(&self) -> Hud {
        Hud {
            player_health: self.player.health.fraction(),
            enemy_health: self.enemies.first().map(|e| e.health.fraction()),
            wave_number: self.director.wave_number(),
            wave_count: self.director.wave_count(),
            outcome: self.outcome(),
        }
    }
}

/// Health bars, wave progress and the end banner
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hud {
    /// Player health fill in [0, 1]
    pub player_health: f32,
    /// First living enemy's health fill, if any enemy is left
    pub enemy_health: Option<f32>,
    /// 1-based, never past `wave_count`
    pub wave_number: usize,
    pub wave_count: usize,
    pub outcome: Outcome,
}

impl Hud {
    /// "Wave: n/m"
    pub fn wave_label(&self) -> String {
        format!("Wave: {}/{}", self.wave_number, self.wave_count)
    }

    /// Terminal message, if the match is over
    pub fn banner(&self) -> Option<&'static str> {
        match self.outcome {
            Outcome::InProgress => None,
            Outcome::Won => Some("You win!"),
            Outcome::Lost => Some("You lose!"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;

    #[test]
    fn test_new_match() {
        let mut state = MatchState::new(&MatchConfig::default()).unwrap();
        assert_eq!(state.enemies.len(), 2);
        assert!(state.projectiles.is_empty());
        assert_eq!(state.outcome(), Outcome::InProgress);
        assert_eq!(state.platforms, vec![Rect::new(0, 416, 900, 64)]);
        assert_eq!(state.drain_events(), vec![GameEvent::WaveStarted { index: 0 }]);
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn test_rejects_bad_config() {
        let mut config = MatchConfig::default();
        config.waves.clear();
        assert!(matches!(
            MatchState::new(&config),
            Err(ConfigError::EmptyWaveTable)
        ));

        let mut config = MatchConfig::default();
        config.tuning.melee_height = 0;
        assert!(MatchState::new(&config).is_err());
    }

    #[test]
    fn test_hud() {
        let mut state = MatchState::new(&MatchConfig::default()).unwrap();
        state.player.health.take_damage(7);
        let hud = state.hud();
        assert_eq!(hud.player_health, 0.5);
        assert_eq!(hud.enemy_health, Some(1.0));
        assert_eq!(hud.wave_label(), "Wave: 1/3");
        assert_eq!(hud.banner(), None);

        state.enemies.clear();
        assert_eq!(state.hud().enemy_health, None);

        state.director.lose();
        assert_eq!(state.hud().banner(), Some("You lose!"));
    }
}

//! Data-driven game balance
//!
//! Every speed, damage, size and timer the simulation uses lives in
//! [`Tuning`]. A match takes its own copy at construction, so tests and
//! parallel matches can run with independent numbers. Values can be
//! overridden from a JSON file; missing keys keep their defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};
use crate::sim::wave::{Archetype, WaveEntry, WaveTable};

/// Immutable balance constants for one match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Arena ===
    pub arena_width: i32,
    pub arena_height: i32,
    /// Height of the floor slab at the bottom of the arena
    pub floor_height: i32,

    // === Physics (per tick) ===
    pub gravity: f32,
    pub terminal_velocity: f32,

    // === Player ===
    pub player_width: i32,
    pub player_height: i32,
    pub player_spawn_x: i32,
    pub player_max_health: u32,
    pub player_speed: f32,
    /// Vertical launch velocity (negative is up)
    pub jump_velocity: f32,
    pub base_attack_damage: u32,
    /// Seconds between allowed attacks
    pub attack_cooldown: f32,
    /// Seconds the attack hitbox exists
    pub attack_duration: f32,
    /// Seconds allowed between presses to chain a combo
    pub combo_window: f32,
    pub combo_max_stage: u8,
    pub hitbox_base_length: i32,
    pub hitbox_length_per_stage: i32,
    /// Vertical inset of the player hitbox from the body's top and bottom
    pub hitbox_inset: i32,

    // === Shared ===
    /// Grace period after taking damage
    pub invulnerability: f32,
    pub enemy_damage: u32,

    // === Melee enemy ===
    pub melee_width: i32,
    pub melee_height: i32,
    pub melee_max_health: u32,
    pub melee_engage_distance: i32,
    pub melee_speed: f32,
    pub melee_attack_window: f32,
    pub melee_cooldown: f32,
    pub melee_initial_cooldown: f32,
    pub melee_hitbox_length: i32,
    pub melee_hitbox_inset: i32,

    // === Ranged enemy ===
    pub ranged_width: i32,
    pub ranged_height: i32,
    pub ranged_max_health: u32,
    pub ranged_safe_distance: i32,
    pub ranged_retreat_speed: f32,
    pub shoot_cooldown: f32,
    pub shoot_initial_cooldown: f32,

    // === Projectiles ===
    pub projectile_width: i32,
    pub projectile_height: i32,
    pub projectile_speed: f32,
    pub projectile_lifetime: f32,
    /// Horizontal distance from the shooter's center to the spawn point
    pub projectile_spawn_offset: i32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            arena_width: 900,
            arena_height: 480,
            floor_height: 64,

            gravity: 0.8,
            terminal_velocity: 20.0,

            player_width: 42,
            player_height: 64,
            player_spawn_x: 120,
            player_max_health: 14,
            player_speed: 4.5,
            jump_velocity: -12.0,
            base_attack_damage: 3,
            attack_cooldown: 0.22,
            attack_duration: 0.12,
            combo_window: 0.35,
            combo_max_stage: 3,
            hitbox_base_length: 22,
            hitbox_length_per_stage: 8,
            hitbox_inset: 8,

            invulnerability: 0.4,
            enemy_damage: 2,

            melee_width: 36,
            melee_height: 56,
            melee_max_health: 8,
            melee_engage_distance: 48,
            melee_speed: 1.2,
            melee_attack_window: 0.18,
            melee_cooldown: 1.0,
            melee_initial_cooldown: 1.0,
            melee_hitbox_length: 26,
            melee_hitbox_inset: 6,

            ranged_width: 36,
            ranged_height: 56,
            ranged_max_health: 5,
            ranged_safe_distance: 120,
            ranged_retreat_speed: 0.8,
            shoot_cooldown: 1.8,
            shoot_initial_cooldown: 1.5,

            projectile_width: 10,
            projectile_height: 6,
            projectile_speed: 6.0,
            projectile_lifetime: 3.0,
            projectile_spawn_offset: 20,
        }
    }
}

impl Tuning {
    /// Y coordinate of the floor's top surface
    pub fn floor_top(&self) -> i32 {
        self.arena_height - self.floor_height
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> ConfigResult<()> {
        let positive_i32 = [
            ("arena_width", self.arena_width),
            ("arena_height", self.arena_height),
            ("floor_height", self.floor_height),
            ("player_width", self.player_width),
            ("player_height", self.player_height),
            ("melee_width", self.melee_width),
            ("melee_height", self.melee_height),
            ("ranged_width", self.ranged_width),
            ("ranged_height", self.ranged_height),
            ("projectile_width", self.projectile_width),
            ("projectile_height", self.projectile_height),
            ("hitbox_base_length", self.hitbox_base_length),
            ("melee_hitbox_length", self.melee_hitbox_length),
        ];
        for (name, value) in positive_i32 {
            if value <= 0 {
                return Err(ConfigError::InvalidValue {
                    name,
                    value: value as f32,
                });
            }
        }

        let positive_u32 = [
            ("player_max_health", self.player_max_health),
            ("melee_max_health", self.melee_max_health),
            ("ranged_max_health", self.ranged_max_health),
            ("base_attack_damage", self.base_attack_damage),
            ("combo_max_stage", u32::from(self.combo_max_stage)),
        ];
        for (name, value) in positive_u32 {
            if value == 0 {
                return Err(ConfigError::InvalidValue { name, value: 0.0 });
            }
        }

        let positive_f32 = [
            ("gravity", self.gravity),
            ("terminal_velocity", self.terminal_velocity),
            ("player_speed", self.player_speed),
            ("attack_cooldown", self.attack_cooldown),
            ("attack_duration", self.attack_duration),
            ("combo_window", self.combo_window),
            ("invulnerability", self.invulnerability),
            ("melee_speed", self.melee_speed),
            ("melee_attack_window", self.melee_attack_window),
            ("melee_cooldown", self.melee_cooldown),
            ("ranged_retreat_speed", self.ranged_retreat_speed),
            ("shoot_cooldown", self.shoot_cooldown),
            ("projectile_speed", self.projectile_speed),
            ("projectile_lifetime", self.projectile_lifetime),
        ];
        for (name, value) in positive_f32 {
            if !(value > 0.0) {
                return Err(ConfigError::InvalidValue { name, value });
            }
        }

        if self.floor_height >= self.arena_height {
            return Err(ConfigError::InvalidValue {
                name: "floor_height",
                value: self.floor_height as f32,
            });
        }

        // Hitboxes are inset from the attacker's top and bottom; they must
        // keep a positive height or they can never overlap anything
        let insets = [
            ("hitbox_inset", self.hitbox_inset, self.player_height),
            ("melee_hitbox_inset", self.melee_hitbox_inset, self.melee_height),
        ];
        for (name, inset, height) in insets {
            if inset < 0 || height - 2 * inset <= 0 {
                return Err(ConfigError::InvalidValue {
                    name,
                    value: inset as f32,
                });
            }
        }

        let non_negative_i32 = [
            ("hitbox_length_per_stage", self.hitbox_length_per_stage),
            ("melee_engage_distance", self.melee_engage_distance),
            ("ranged_safe_distance", self.ranged_safe_distance),
            ("projectile_spawn_offset", self.projectile_spawn_offset),
        ];
        for (name, value) in non_negative_i32 {
            if value < 0 {
                return Err(ConfigError::InvalidValue {
                    name,
                    value: value as f32,
                });
            }
        }

        let non_negative_f32 = [
            ("melee_initial_cooldown", self.melee_initial_cooldown),
            ("shoot_initial_cooldown", self.shoot_initial_cooldown),
        ];
        for (name, value) in non_negative_f32 {
            if !(value >= 0.0) {
                return Err(ConfigError::InvalidValue { name, value });
            }
        }

        // Negative is up
        if !(self.jump_velocity < 0.0) {
            return Err(ConfigError::InvalidValue {
                name: "jump_velocity",
                value: self.jump_velocity,
            });
        }

        Ok(())
    }
}

/// Everything needed to start a match: balance numbers plus the wave table
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    pub tuning: Tuning,
    pub waves: Vec<Vec<WaveEntry>>,
}

impl Default for MatchConfig {
    fn default() -> Self {
        use Archetype::{Melee, Ranged};
        let wave = |entries: &[(Archetype, i32)]| {
            entries
                .iter()
                .map(|&(archetype, x)| WaveEntry { archetype, x })
                .collect::<Vec<_>>()
        };
        Self {
            tuning: Tuning::default(),
            waves: vec![
                wave(&[(Melee, 520), (Melee, 660)]),
                wave(&[(Melee, 520), (Ranged, 700), (Melee, 760)]),
                wave(&[(Ranged, 520), (Ranged, 660), (Melee, 740)]),
            ],
        }
    }
}

impl MatchConfig {
    /// Parse a JSON document
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.tuning.validate()?;
        Ok(config)
    }

    /// Load from a JSON file on disk
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&json)?;
        log::info!(
            "Loaded match config from {} ({} waves)",
            path.display(),
            config.waves.len()
        );
        Ok(config)
    }

    /// Validated wave table for this config's arena
    pub fn wave_table(&self) -> ConfigResult<WaveTable> {
        WaveTable::new(self.waves.clone(), self.tuning.arena_width)
    }
}

//! Hit points with a post-hit grace period

use serde::{Deserialize, Serialize};

use super::timers::Timer;
use crate::error::{ConfigError, ConfigResult};

/// Current and maximum health plus the invulnerability window
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Health {
    current: u32,
    max: u32,
    /// Length of the grace period started by each landed hit
    grace: f32,
    invulnerable: Timer,
}

impl Health {
    pub fn new(max: u32, grace: f32) -> ConfigResult<Self> {
        if max == 0 {
            return Err(ConfigError::ZeroHealth);
        }
        Ok(Self {
            current: max,
            max,
            grace: grace.max(0.0),
            invulnerable: Timer::default(),
        })
    }

    #[inline]
    pub fn current(&self) -> u32 {
        self.current
    }

    #[inline]
    pub fn max(&self) -> u32 {
        self.max
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.current > 0
    }

    #[inline]
    pub fn is_invulnerable(&self) -> bool {
        self.invulnerable.is_running()
    }

    pub fn invulnerability(&self) -> &Timer {
        &self.invulnerable
    }

    /// Fill fraction for health bars, in [0, 1]
    pub fn fraction(&self) -> f32 {
        self.current as f32 / self.max as f32
    }

    /// Apply a hit. Ignored while invulnerable; otherwise health drops
    /// (saturating at zero) and the grace period restarts, even for a
    /// zero-damage hit. Returns whether the hit was admitted.
    pub fn take_damage(&mut self, amount: u32) -> bool {
        if self.invulnerable.is_running() {
            return false;
        }
        self.current = self.current.saturating_sub(amount);
        self.invulnerable.set(self.grace);
        true
    }

    pub fn tick(&mut self, dt: f32) {
        self.invulnerable.tick(dt);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_rejects_zero_max() {
        assert!(matches!(Health::new(0, 0.4), Err(ConfigError::ZeroHealth)));
    }

    #[test]
    fn test_grace_blocks_rehits() {
        let mut health = Health::new(14, 0.4).unwrap();
        assert!(health.take_damage(2));
        assert_eq!(health.current(), 12);

        let timer_before = health.invulnerability().remaining();
        health.tick(0.1);
        assert!(!health.take_damage(2));
        assert_eq!(health.current(), 12);
        // A rejected hit does not restart the grace period
        assert!(health.invulnerability().remaining() < timer_before);

        health.tick(0.31);
        assert!(health.take_damage(2));
        assert_eq!(health.current(), 10);
    }

    #[test]
    fn test_saturates_at_zero() {
        let mut health = Health::new(3, 0.4).unwrap();
        health.take_damage(10);
        assert_eq!(health.current(), 0);
        assert!(!health.is_alive());
        assert_eq!(health.fraction(), 0.0);
    }

    #[test]
    fn test_zero_damage_still_starts_grace() {
        let mut health = Health::new(5, 0.4).unwrap();
        assert!(health.take_damage(0));
        assert_eq!(health.current(), 5);
        assert!(health.is_invulnerable());
    }

    proptest! {
        #[test]
        fn prop_health_stays_in_bounds(
            max in 1u32..50,
            hits in prop::collection::vec((0u32..20, 0.0f32..0.5), 0..64),
        ) {
            let mut health = Health::new(max, 0.4).unwrap();
            for (amount, dt) in hits {
                health.take_damage(amount);
                health.tick(dt);
                prop_assert!(health.current() <= health.max());
            }
        }

        #[test]
        fn prop_invulnerable_hits_change_nothing(
            amounts in prop::collection::vec(0u32..10, 1..16),
        ) {
            let mut health = Health::new(100, 0.4).unwrap();
            health.take_damage(1);
            let after_first = health.current();
            let grace = health.invulnerability().remaining();
            for amount in amounts {
                prop_assert!(!health.take_damage(amount));
                prop_assert_eq!(health.current(), after_first);
                prop_assert_eq!(health.invulnerability().remaining(), grace);
            }
        }
    }
}

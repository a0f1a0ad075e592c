//! Combat countdown timers
//!
//! All timers count down by the frame's elapsed time and stop at zero.

use serde::{Deserialize, Serialize};

/// A countdown in seconds that never goes negative
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Timer {
    remaining: f32,
}

impl Timer {
    pub fn new(secs: f32) -> Self {
        Self {
            remaining: secs.max(0.0),
        }
    }

    #[inline]
    pub fn set(&mut self, secs: f32) {
        self.remaining = secs.max(0.0);
    }

    /// Count down by `dt`, flooring at zero
    #[inline]
    pub fn tick(&mut self, dt: f32) {
        if self.remaining > 0.0 {
            self.remaining = (self.remaining - dt).max(0.0);
        }
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.remaining > 0.0
    }

    #[inline]
    pub fn remaining(&self) -> f32 {
        self.remaining
    }
}

/// Cooldown plus active window shared by every attacker
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct AttackTimers {
    /// Time until the next attack is legal
    pub cooldown: Timer,
    /// Time the hitbox stays out
    pub active: Timer,
}

impl AttackTimers {
    pub fn with_cooldown(secs: f32) -> Self {
        Self {
            cooldown: Timer::new(secs),
            active: Timer::default(),
        }
    }

    #[inline]
    pub fn ready(&self) -> bool {
        !self.cooldown.is_running()
    }

    /// Open the hitbox window and start the cooldown
    pub fn start(&mut self, active_secs: f32, cooldown_secs: f32) {
        self.active.set(active_secs);
        self.cooldown.set(cooldown_secs);
    }

    pub fn tick(&mut self, dt: f32) {
        self.cooldown.tick(dt);
        self.active.tick(dt);
    }
}

/// Combo chain state (player only)
///
/// Stage 0 means no chain. Each attack inside the window climbs one stage up
/// to `max_stage`; the chain drops back to 0 once the window runs out.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Combo {
    stage: u8,
    max_stage: u8,
    window: Timer,
}

impl Combo {
    pub fn new(max_stage: u8) -> Self {
        Self {
            stage: 0,
            max_stage: max_stage.max(1),
            window: Timer::default(),
        }
    }

    #[inline]
    pub fn stage(&self) -> u8 {
        self.stage
    }

    #[inline]
    pub fn window(&self) -> &Timer {
        &self.window
    }

    /// Register an attack: chain if the window is open, else restart at 1
    pub fn advance(&mut self, window_secs: f32) {
        self.stage = if self.window.is_running() {
            (self.stage + 1).min(self.max_stage)
        } else {
            1
        };
        self.window.set(window_secs);
    }

    pub fn tick(&mut self, dt: f32) {
        self.window.tick(dt);
        if !self.window.is_running() {
            self.stage = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_timer_floors_at_zero() {
        let mut t = Timer::new(0.1);
        t.tick(0.25);
        assert_eq!(t.remaining(), 0.0);
        assert!(!t.is_running());
        t.tick(1.0);
        assert_eq!(t.remaining(), 0.0);
    }

    #[test]
    fn test_negative_set_is_zero() {
        let t = Timer::new(-3.0);
        assert!(!t.is_running());
    }

    #[test]
    fn test_attack_timers() {
        let mut timers = AttackTimers::with_cooldown(1.0);
        assert!(!timers.ready());
        timers.tick(0.6);
        timers.tick(0.6);
        assert!(timers.ready());

        timers.start(0.18, 1.0);
        assert!(timers.active.is_running());
        assert!(!timers.ready());
        timers.tick(0.2);
        assert!(!timers.active.is_running());
        assert!(!timers.ready());
    }

    #[test]
    fn test_combo_chains_and_caps() {
        let mut combo = Combo::new(3);
        assert_eq!(combo.stage(), 0);
        for expected in [1, 2, 3, 3, 3] {
            combo.advance(0.35);
            assert_eq!(combo.stage(), expected);
            combo.tick(0.1);
        }
    }

    #[test]
    fn test_combo_resets_when_window_expires() {
        let mut combo = Combo::new(3);
        combo.advance(0.35);
        combo.tick(0.1);
        combo.advance(0.35);
        assert_eq!(combo.stage(), 2);

        combo.tick(0.2);
        assert_eq!(combo.stage(), 2);
        combo.tick(0.2);
        assert_eq!(combo.stage(), 0);

        // A fresh attack after expiry starts over
        combo.advance(0.35);
        assert_eq!(combo.stage(), 1);
    }

    proptest! {
        #[test]
        fn prop_combo_never_drops_inside_window(gaps in prop::collection::vec(0.0f32..0.34, 1..20)) {
            let mut combo = Combo::new(3);
            combo.advance(0.35);
            let mut last = combo.stage();
            for gap in gaps {
                combo.tick(gap);
                combo.advance(0.35);
                prop_assert!(combo.stage() >= last);
                prop_assert!(combo.stage() <= 3);
                last = combo.stage();
            }
        }
    }
}

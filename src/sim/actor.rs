//! Fighters: the player and the two enemy archetypes
//!
//! Every fighter is the same aggregate (body + health + timers). What
//! differs is how it decides what to do each tick: the player reads the
//! input snapshot, enemies run a small proximity heuristic. Decisions are
//! produced as an [`Intent`] first and applied afterwards, before the body
//! integrates.

use serde::{Deserialize, Serialize};

use super::body::{Body, Gravity};
use super::health::Health;
use super::rect::Rect;
use super::tick::TickInput;
use super::timers::{AttackTimers, Combo, Timer};
use super::wave::Archetype;
use crate::error::ConfigResult;
use crate::tuning::Tuning;

/// What a fighter wants to do this tick
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Intent {
    /// Desired horizontal velocity (pixels per tick)
    pub vx: f32,
    /// New facing direction, 0 to keep the current one
    pub face: i32,
    pub jump: bool,
    /// Start a melee attack
    pub attack: bool,
    /// Hold a guard (player only)
    pub block: bool,
    /// Fire a projectile in this direction (+1 / -1)
    pub fire: Option<i32>,
}

/// Hitbox hanging off the leading edge of `body`
fn leading_hitbox(body: &Rect, facing: i32, length: i32, inset: i32) -> Rect {
    let h = body.h - 2 * inset;
    let y = body.top() + inset;
    if facing >= 0 {
        Rect::new(body.right(), y, length, h)
    } else {
        Rect::new(body.left() - length, y, length, h)
    }
}

/// The player-controlled fighter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub body: Body,
    pub health: Health,
    pub attack: AttackTimers,
    pub combo: Combo,
    pub blocking: bool,
}

impl Player {
    /// Spawn standing on the floor at the configured x
    pub fn spawn(tuning: &Tuning) -> ConfigResult<Self> {
        let y = tuning.floor_top() - tuning.player_height;
        Ok(Self {
            body: Body::new(
                tuning.player_spawn_x,
                y,
                tuning.player_width,
                tuning.player_height,
            )?,
            health: Health::new(tuning.player_max_health, tuning.invulnerability)?,
            attack: AttackTimers::default(),
            combo: Combo::new(tuning.combo_max_stage),
            blocking: false,
        })
    }

    /// Translate the input snapshot into an intent. Blocking pins the
    /// player in place and suppresses jumping and attacking.
    pub fn decide(&self, input: &TickInput, tuning: &Tuning) -> Intent {
        if input.block {
            return Intent {
                block: true,
                ..Intent::default()
            };
        }
        let mut intent = Intent::default();
        if input.move_left {
            intent.vx = -tuning.player_speed;
            intent.face = -1;
        }
        if input.move_right {
            intent.vx = tuning.player_speed;
            intent.face = 1;
        }
        intent.jump = input.jump && self.body.grounded;
        intent.attack = input.attack;
        intent
    }

    /// Apply an intent. Returns true if a new attack started.
    pub fn apply(&mut self, intent: Intent, tuning: &Tuning) -> bool {
        self.blocking = intent.block;
        self.body.vel.x = intent.vx;
        self.body.face(intent.face);
        if intent.jump && self.body.grounded && !self.blocking {
            self.body.vel.y = tuning.jump_velocity;
        }
        intent.attack && !self.blocking && self.attempt_attack(tuning)
    }

    /// Start an attack if the cooldown allows it, chaining the combo
    pub fn attempt_attack(&mut self, tuning: &Tuning) -> bool {
        if !self.attack.ready() {
            return false;
        }
        self.combo.advance(tuning.combo_window);
        self.attack.start(tuning.attack_duration, tuning.attack_cooldown);
        true
    }

    /// Damage dealt at the current combo stage: base at stage 1, +1 per stage
    pub fn effective_damage(&self, base: u32) -> u32 {
        base + u32::from(self.combo.stage().saturating_sub(1))
    }

    /// The active attack hitbox, growing with the combo stage
    pub fn attack_hitbox(&self, tuning: &Tuning) -> Option<Rect> {
        if !self.attack.active.is_running() {
            return None;
        }
        let length = tuning.hitbox_base_length
            + tuning.hitbox_length_per_stage * i32::from(self.combo.stage());
        Some(leading_hitbox(
            self.body.rect(),
            self.body.facing,
            length,
            tuning.hitbox_inset,
        ))
    }

    pub fn update(&mut self, platforms: &[Rect], gravity: Gravity, dt: f32) {
        self.body.integrate(platforms, gravity);
        self.health.tick(dt);
        self.attack.tick(dt);
        self.combo.tick(dt);
    }
}

/// Archetype-specific state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum EnemyKind {
    /// Walks up to the player and swings
    Melee { attack: AttackTimers },
    /// Keeps its distance and shoots
    Ranged { shoot: Timer },
}

/// A hostile fighter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub kind: EnemyKind,
    pub body: Body,
    pub health: Health,
}

impl Enemy {
    /// Spawn standing on the floor at `x`
    pub fn spawn(archetype: Archetype, x: i32, tuning: &Tuning) -> ConfigResult<Self> {
        let (w, h, max_health, kind) = match archetype {
            Archetype::Melee => (
                tuning.melee_width,
                tuning.melee_height,
                tuning.melee_max_health,
                EnemyKind::Melee {
                    attack: AttackTimers::with_cooldown(tuning.melee_initial_cooldown),
                },
            ),
            Archetype::Ranged => (
                tuning.ranged_width,
                tuning.ranged_height,
                tuning.ranged_max_health,
                EnemyKind::Ranged {
                    shoot: Timer::new(tuning.shoot_initial_cooldown),
                },
            ),
        };
        Ok(Self {
            kind,
            body: Body::new(x, tuning.floor_top() - h, w, h)?,
            health: Health::new(max_health, tuning.invulnerability)?,
        })
    }

    pub fn archetype(&self) -> Archetype {
        match self.kind {
            EnemyKind::Melee { .. } => Archetype::Melee,
            EnemyKind::Ranged { .. } => Archetype::Ranged,
        }
    }

    /// Run the archetype's heuristic against the player's body
    pub fn decide(&self, target: &Rect, tuning: &Tuning) -> Intent {
        let dx = target.center_x() - self.body.rect().center_x();
        let toward = if dx > 0 { 1 } else { -1 };
        match &self.kind {
            EnemyKind::Melee { attack } => {
                if dx.abs() > tuning.melee_engage_distance {
                    Intent {
                        vx: toward as f32 * tuning.melee_speed,
                        face: toward,
                        ..Default::default()
                    }
                } else {
                    Intent {
                        attack: attack.ready(),
                        ..Default::default()
                    }
                }
            }
            EnemyKind::Ranged { shoot } => {
                let mut intent = Intent::default();
                if dx.abs() < tuning.ranged_safe_distance {
                    intent.vx = -toward as f32 * tuning.ranged_retreat_speed;
                    intent.face = -toward;
                }
                if !shoot.is_running() {
                    intent.fire = Some(toward);
                }
                intent
            }
        }
    }

    /// Apply an intent and count down the archetype's timers
    pub fn apply(&mut self, intent: Intent, tuning: &Tuning, dt: f32) {
        self.body.vel.x = intent.vx;
        self.body.face(intent.face);
        match &mut self.kind {
            EnemyKind::Melee { attack } => {
                if intent.attack {
                    attack.start(tuning.melee_attack_window, tuning.melee_cooldown);
                }
                attack.tick(dt);
            }
            EnemyKind::Ranged { shoot } => {
                // The shot tick resets the cooldown without counting it down
                if intent.fire.is_some() {
                    shoot.set(tuning.shoot_cooldown);
                } else {
                    shoot.tick(dt);
                }
            }
        }
    }

    /// Melee swing hitbox while the attack window is open
    pub fn attack_hitbox(&self, tuning: &Tuning) -> Option<Rect> {
        match &self.kind {
            EnemyKind::Melee { attack } if attack.active.is_running() => Some(leading_hitbox(
                self.body.rect(),
                self.body.facing,
                tuning.melee_hitbox_length,
                tuning.melee_hitbox_inset,
            )),
            _ => None,
        }
    }

    pub fn update(&mut self, platforms: &[Rect], gravity: Gravity, dt: f32) {
        self.body.integrate(platforms, gravity);
        self.health.tick(dt);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    fn tuning() -> Tuning {
        Tuning::default()
    }

    #[test]
    fn test_player_spawns_on_floor() {
        let t = tuning();
        let player = Player::spawn(&t).unwrap();
        assert_eq!(player.body.rect().bottom(), t.floor_top());
        assert_eq!(player.body.rect().x, 120);
        assert_eq!(player.health.current(), 14);
        assert_eq!(player.combo.stage(), 0);
    }

    #[test]
    fn test_effective_damage_by_stage() {
        let t = tuning();
        let mut player = Player::spawn(&t).unwrap();

        assert!(player.attempt_attack(&t));
        assert_eq!(player.combo.stage(), 1);
        assert_eq!(player.effective_damage(3), 3);

        // Cooldown must elapse, but the combo window must not
        player.attack.tick(0.23);
        player.combo.tick(0.23);
        assert!(player.attempt_attack(&t));
        assert_eq!(player.effective_damage(3), 4);

        player.attack.tick(0.23);
        player.combo.tick(0.23);
        assert!(player.attempt_attack(&t));
        assert_eq!(player.combo.stage(), 3);
        assert_eq!(player.effective_damage(3), 5);
    }

    #[test]
    fn test_attack_respects_cooldown() {
        let t = tuning();
        let mut player = Player::spawn(&t).unwrap();
        assert!(player.attempt_attack(&t));
        player.attack.tick(0.1);
        assert!(!player.attempt_attack(&t));
        assert_eq!(player.combo.stage(), 1);
    }

    #[test]
    fn test_player_hitbox_follows_facing_and_stage() {
        let t = tuning();
        let mut player = Player::spawn(&t).unwrap();
        assert!(player.attack_hitbox(&t).is_none());

        player.attempt_attack(&t);
        let hitbox = player.attack_hitbox(&t).unwrap();
        let body = *player.body.rect();
        assert_eq!(hitbox.left(), body.right());
        assert_eq!(hitbox.w, 22 + 8);
        assert_eq!(hitbox.top(), body.top() + 8);
        assert_eq!(hitbox.h, body.h - 16);

        player.body.facing = -1;
        let hitbox = player.attack_hitbox(&t).unwrap();
        assert_eq!(hitbox.right(), body.left());

        player.attack.tick(t.attack_duration);
        assert!(player.attack_hitbox(&t).is_none());
    }

    #[test]
    fn test_blocking_pins_player() {
        let t = tuning();
        let mut player = Player::spawn(&t).unwrap();
        player.body.grounded = true;
        let input = TickInput {
            move_right: true,
            jump: true,
            attack: true,
            block: true,
            ..Default::default()
        };
        let intent = player.decide(&input, &t);
        assert_eq!(
            intent,
            Intent {
                block: true,
                ..Intent::default()
            }
        );
        let attacked = player.apply(intent, &t);
        assert!(!attacked);
        assert!(player.blocking);
        assert_eq!(player.body.vel, glam::Vec2::ZERO);

        // Letting go of the guard drops it on the next apply
        let intent = player.decide(&TickInput::default(), &t);
        assert!(!intent.block);
        player.apply(intent, &t);
        assert!(!player.blocking);
    }

    #[test]
    fn test_jump_needs_ground() {
        let t = tuning();
        let mut player = Player::spawn(&t).unwrap();
        let input = TickInput {
            jump: true,
            ..Default::default()
        };

        player.body.grounded = false;
        let intent = player.decide(&input, &t);
        player.apply(intent, &t);
        assert_eq!(player.body.vel.y, 0.0);

        player.body.grounded = true;
        let intent = player.decide(&input, &t);
        player.apply(intent, &t);
        assert_eq!(player.body.vel.y, t.jump_velocity);
    }

    #[test]
    fn test_right_wins_over_left() {
        let t = tuning();
        let player = Player::spawn(&t).unwrap();
        let input = TickInput {
            move_left: true,
            move_right: true,
            ..Default::default()
        };
        let intent = player.decide(&input, &t);
        assert_eq!(intent.vx, t.player_speed);
        assert_eq!(intent.face, 1);
    }

    #[test]
    fn test_melee_approaches_then_swings() {
        let t = tuning();
        let target = Rect::new(120, 352, 42, 64);

        let enemy = Enemy::spawn(Archetype::Melee, 520, &t).unwrap();
        let intent = enemy.decide(&target, &t);
        assert_eq!(intent.vx, -t.melee_speed);
        assert_eq!(intent.face, -1);
        assert!(!intent.attack);

        // In range but still on its opening cooldown
        let mut enemy = Enemy::spawn(Archetype::Melee, 170, &t).unwrap();
        let intent = enemy.decide(&target, &t);
        assert_eq!(intent.vx, 0.0);
        assert!(!intent.attack);

        if let EnemyKind::Melee { attack } = &mut enemy.kind {
            attack.cooldown.set(0.0);
        }
        let intent = enemy.decide(&target, &t);
        assert!(intent.attack);
        enemy.apply(intent, &t, DT);
        assert!(enemy.attack_hitbox(&t).is_some());
    }

    #[test]
    fn test_ranged_retreats_and_fires() {
        let t = tuning();
        let target = Rect::new(120, 352, 42, 64);

        // Close: back away from the player, facing away
        let mut enemy = Enemy::spawn(Archetype::Ranged, 200, &t).unwrap();
        let intent = enemy.decide(&target, &t);
        assert_eq!(intent.vx, t.ranged_retreat_speed);
        assert_eq!(intent.face, 1);
        assert_eq!(intent.fire, None);

        // Far: hold position
        let far = Enemy::spawn(Archetype::Ranged, 700, &t).unwrap();
        assert_eq!(far.decide(&target, &t).vx, 0.0);

        if let EnemyKind::Ranged { shoot } = &mut enemy.kind {
            shoot.set(0.0);
        }
        let intent = enemy.decide(&target, &t);
        assert_eq!(intent.fire, Some(-1));
        enemy.apply(intent, &t, DT);
        match &enemy.kind {
            EnemyKind::Ranged { shoot } => assert_eq!(shoot.remaining(), t.shoot_cooldown),
            EnemyKind::Melee { .. } => unreachable!(),
        }
        assert!(enemy.attack_hitbox(&t).is_none());
    }
}

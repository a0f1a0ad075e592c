//! Straight-line projectiles fired by ranged enemies

use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::tuning::Tuning;

/// A single shot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub rect: Rect,
    /// Horizontal velocity (pixels per tick)
    pub vx: f32,
    /// Seconds left before it fizzles
    pub life: f32,
}

/// All live projectiles in a match
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Projectiles {
    items: Vec<Projectile>,
}

impl Projectiles {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fire from the center of `origin` toward `dir` (+1 right, -1 left)
    pub fn spawn(&mut self, origin: &Rect, dir: i32, tuning: &Tuning) {
        let dir = if dir >= 0 { 1 } else { -1 };
        let rect = Rect::new(
            origin.center_x() + dir * tuning.projectile_spawn_offset,
            origin.center_y(),
            tuning.projectile_width,
            tuning.projectile_height,
        );
        log::debug!("Projectile spawned at ({}, {}) dir {}", rect.x, rect.y, dir);
        self.items.push(Projectile {
            rect,
            vx: dir as f32 * tuning.projectile_speed,
            life: tuning.projectile_lifetime,
        });
    }

    /// Move every shot and drop the ones whose lifetime ran out
    pub fn advance(&mut self, dt: f32) {
        for p in &mut self.items {
            p.rect.x += p.vx as i32;
            p.life -= dt;
        }
        self.items.retain(|p| p.life > 0.0);
    }

    /// Remove every shot overlapping `target`, returning how many hit
    pub fn take_hits(&mut self, target: &Rect) -> usize {
        let before = self.items.len();
        self.items.retain(|p| !p.rect.overlaps(target));
        before - self.items.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Projectile> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

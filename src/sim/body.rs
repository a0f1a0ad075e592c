//! Kinematic bodies and platform collision
//!
//! Movement is resolved one axis at a time: move horizontally and push out
//! of platforms, then move vertically and push out again. Velocities are in
//! pixels per tick and get truncated toward zero when applied, so a body
//! resting on the floor alternates between a sub-pixel fall and a snap back
//! onto the surface. Displacements larger than a platform can tunnel
//! through it; that is accepted.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::error::{ConfigError, ConfigResult};

/// Gravity parameters applied to every body
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gravity {
    /// Added to vy each tick
    pub accel: f32,
    /// Cap on downward speed
    pub terminal: f32,
}

/// An axis-aligned moving rectangle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Body {
    rect: Rect,
    pub vel: Vec2,
    pub grounded: bool,
    /// +1 facing right, -1 facing left
    pub facing: i32,
}

impl Body {
    /// Create a body with its top-left at (x, y)
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> ConfigResult<Self> {
        if w <= 0 || h <= 0 {
            return Err(ConfigError::InvalidDimensions {
                width: w,
                height: h,
            });
        }
        Ok(Self {
            rect: Rect::new(x, y, w, h),
            vel: Vec2::ZERO,
            grounded: false,
            facing: 1,
        })
    }

    /// Current bounds. Size never changes after construction.
    #[inline]
    pub fn rect(&self) -> &Rect {
        &self.rect
    }

    /// Turn toward the sign of `dir` (0 keeps the current facing)
    pub fn face(&mut self, dir: i32) {
        if dir != 0 {
            self.facing = dir.signum();
        }
    }

    pub fn apply_gravity(&mut self, gravity: Gravity) {
        self.vel.y = (self.vel.y + gravity.accel).min(gravity.terminal);
    }

    /// Advance one tick: gravity, then X move + resolve, then Y move + resolve
    pub fn integrate(&mut self, platforms: &[Rect], gravity: Gravity) {
        self.apply_gravity(gravity);

        self.rect.x += self.vel.x as i32;
        self.resolve_horizontal(platforms);

        self.rect.y += self.vel.y as i32;
        self.grounded = false;
        self.resolve_vertical(platforms);
    }

    fn resolve_horizontal(&mut self, platforms: &[Rect]) {
        let vx = self.vel.x;
        for platform in platforms {
            if !self.rect.overlaps(platform) {
                continue;
            }
            // Velocity is kept: walking into a wall is a soft push, not a stop
            if vx > 0.0 {
                self.rect.set_right(platform.left());
            } else if vx < 0.0 {
                self.rect.set_left(platform.right());
            }
        }
    }

    fn resolve_vertical(&mut self, platforms: &[Rect]) {
        // Direction is sampled before the loop; landing zeroes vy mid-pass
        let vy = self.vel.y;
        for platform in platforms {
            if !self.rect.overlaps(platform) {
                continue;
            }
            if vy > 0.0 {
                self.rect.set_bottom(platform.top());
                self.vel.y = 0.0;
                self.grounded = true;
            } else if vy < 0.0 {
                self.rect.set_top(platform.bottom());
                self.vel.y = 0.0;
            }
        }
    }
}

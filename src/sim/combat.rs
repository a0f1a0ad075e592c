//! Per-tick hit resolution
//!
//! Runs in a fixed order: the player's swing against enemies, enemy swings
//! against the player, then projectiles against the player. All damage goes
//! through [`Health::take_damage`](super::health::Health::take_damage), so
//! hits during a grace period are dropped.

use super::actor::{Enemy, Player};
use super::projectile::Projectiles;
use super::state::GameEvent;
use crate::tuning::Tuning;

/// Damage that gets through a block: integer half, rounded down
#[inline]
pub fn mitigate(full: u32) -> u32 {
    full / 2
}

/// Apply an incoming enemy hit to the player. With `cue` set, an unblocked
/// hit that lands produces a hit cue.
fn hit_player(player: &mut Player, full: u32, cue: bool, events: &mut Vec<GameEvent>) {
    if player.blocking {
        if player.health.take_damage(mitigate(full)) {
            log::debug!(
                "Blocked hit: {} -> {} (hp {})",
                full,
                mitigate(full),
                player.health.current()
            );
        }
    } else if player.health.take_damage(full) {
        log::debug!("Player hit for {} (hp {})", full, player.health.current());
        if cue {
            events.push(GameEvent::DamageLanded);
        }
    }
}

/// Resolve every hitbox and projectile overlap for this tick
pub fn resolve_combat(
    player: &mut Player,
    enemies: &mut [Enemy],
    projectiles: &mut Projectiles,
    tuning: &Tuning,
    events: &mut Vec<GameEvent>,
) {
    // 1. Player swing vs living enemies
    if let Some(hitbox) = player.attack_hitbox(tuning) {
        let damage = player.effective_damage(tuning.base_attack_damage);
        for enemy in enemies.iter_mut() {
            if !enemy.health.is_alive() || !hitbox.overlaps(enemy.body.rect()) {
                continue;
            }
            if enemy.health.take_damage(damage) {
                log::debug!(
                    "{:?} enemy hit for {} (stage {}, hp {})",
                    enemy.archetype(),
                    damage,
                    player.combo.stage(),
                    enemy.health.current()
                );
                events.push(GameEvent::DamageLanded);
            }
        }
    }

    // 2. Enemy swings vs player
    for enemy in enemies.iter() {
        if !enemy.health.is_alive() {
            continue;
        }
        if let Some(hitbox) = enemy.attack_hitbox(tuning) {
            if hitbox.overlaps(player.body.rect()) {
                hit_player(player, tuning.enemy_damage, true, events);
            }
        }
    }

    // 3. Projectiles vs player; a touching shot is consumed even if the
    // player is invulnerable. Shots land silently.
    let hits = projectiles.take_hits(player.body.rect());
    for _ in 0..hits {
        hit_player(player, tuning.enemy_damage, false, events);
    }
}

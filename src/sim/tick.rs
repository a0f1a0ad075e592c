//! One simulation step
//!
//! Per tick: player intent, enemy AI, integration, projectiles, combat,
//! dead-enemy pruning, then the win/lose check. Timers count down by the
//! elapsed `dt`; movement is per tick.

use super::combat::resolve_combat;
use super::state::{GameEvent, MatchState};
use super::wave::{Outcome, WaveStep};

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub move_left: bool,
    pub move_right: bool,
    pub jump: bool,
    pub attack: bool,
    pub block: bool,
    /// Leave the match loop (not read by `tick`)
    pub quit: bool,
}

/// Advance the match by one frame of `dt` seconds. A finished match is
/// left untouched.
pub fn tick(state: &mut MatchState, input: &TickInput, dt: f32) {
    if state.outcome().is_terminal() {
        return;
    }
    state.time_ticks += 1;

    let gravity = state.gravity();
    let MatchState {
        tuning,
        platforms,
        player,
        enemies,
        projectiles,
        director,
        events,
        ..
    } = state;

    // Player
    let intent = player.decide(input, tuning);
    if player.apply(intent, tuning) {
        events.push(GameEvent::PlayerAttacked);
    }
    player.update(platforms, gravity, dt);

    // Enemies decide against the player's post-move position, then move
    for enemy in enemies.iter_mut() {
        let intent = enemy.decide(player.body.rect(), tuning);
        enemy.apply(intent, tuning, dt);
        if let Some(dir) = intent.fire {
            projectiles.spawn(enemy.body.rect(), dir, tuning);
        }
        enemy.update(platforms, gravity, dt);
    }

    projectiles.advance(dt);

    resolve_combat(player, enemies, projectiles, tuning, events);

    enemies.retain(|e| e.health.is_alive());

    // A dead player loses even if the last enemy fell on the same tick
    if !player.health.is_alive() {
        if director.lose() {
            log::info!("Player defeated on wave {}", director.wave_number());
            events.push(GameEvent::MatchEnded {
                outcome: Outcome::Lost,
            });
        }
        return;
    }

    match director.check(enemies) {
        WaveStep::Unchanged => {}
        WaveStep::Spawned(index) => events.push(GameEvent::WaveStarted { index }),
        WaveStep::Won => events.push(GameEvent::MatchEnded {
            outcome: Outcome::Won,
        }),
    }
}

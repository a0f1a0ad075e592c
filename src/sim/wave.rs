//! Wave table and progression
//!
//! The table is fixed when the match is built. The director swaps in the
//! next roster whenever the current one is wiped out, and flags the match
//! as won once the last wave falls.

use serde::{Deserialize, Serialize};

use super::actor::Enemy;
use crate::error::{ConfigError, ConfigResult};
use crate::tuning::Tuning;

/// Enemy archetype named in the wave table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Archetype {
    Melee,
    Ranged,
}

/// One spawn: which archetype, and where along the floor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaveEntry {
    pub archetype: Archetype,
    pub x: i32,
}

/// Validated, ordered list of waves. Only built through [`WaveTable::new`];
/// it serializes for snapshots but is never read back.
#[derive(Debug, Clone, Serialize)]
pub struct WaveTable {
    waves: Vec<Vec<WaveEntry>>,
}

impl WaveTable {
    /// Build a table, rejecting empty tables, empty waves and spawns
    /// outside `[0, arena_width)`
    pub fn new(waves: Vec<Vec<WaveEntry>>, arena_width: i32) -> ConfigResult<Self> {
        if waves.is_empty() {
            return Err(ConfigError::EmptyWaveTable);
        }
        for (i, wave) in waves.iter().enumerate() {
            if wave.is_empty() {
                return Err(ConfigError::EmptyWave { wave: i });
            }
            if let Some(entry) = wave.iter().find(|e| e.x < 0 || e.x >= arena_width) {
                return Err(ConfigError::SpawnOutOfArena {
                    wave: i,
                    x: entry.x,
                    arena_width,
                });
            }
        }
        Ok(Self { waves })
    }

    pub fn len(&self) -> usize {
        self.waves.len()
    }

    /// Always false for a constructed table
    pub fn is_empty(&self) -> bool {
        self.waves.is_empty()
    }

    pub fn wave(&self, index: usize) -> &[WaveEntry] {
        &self.waves[index]
    }
}

/// Match result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Outcome {
    #[default]
    InProgress,
    Won,
    Lost,
}

impl Outcome {
    #[inline]
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Outcome::InProgress)
    }
}

/// What a director check did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaveStep {
    /// Roster still has enemies, or the match is already over
    Unchanged,
    /// The roster was replaced with this wave
    Spawned(usize),
    /// The last wave was cleared
    Won,
}

/// Owns wave progression and the match outcome
#[derive(Debug, Clone, Serialize)]
pub struct WaveDirector {
    table: WaveTable,
    /// Pre-built rosters, one per wave
    rosters: Vec<Vec<Enemy>>,
    index: usize,
    outcome: Outcome,
}

impl WaveDirector {
    /// Build every roster up front so wave changes cannot fail mid-match
    pub fn new(table: WaveTable, tuning: &Tuning) -> ConfigResult<Self> {
        let rosters = table
            .waves
            .iter()
            .map(|wave| {
                wave.iter()
                    .map(|entry| Enemy::spawn(entry.archetype, entry.x, tuning))
                    .collect::<ConfigResult<Vec<_>>>()
            })
            .collect::<ConfigResult<Vec<_>>>()?;
        Ok(Self {
            table,
            rosters,
            index: 0,
            outcome: Outcome::InProgress,
        })
    }

    /// Fresh roster for the first wave
    pub fn first_roster(&self) -> Vec<Enemy> {
        self.rosters.first().cloned().unwrap_or_default()
    }

    /// Zero-based index of the current wave (equals the count once won)
    pub fn index(&self) -> usize {
        self.index
    }

    /// One-based wave number for display, clamped to the table size
    pub fn wave_number(&self) -> usize {
        (self.index + 1).min(self.table.len())
    }

    pub fn wave_count(&self) -> usize {
        self.table.len()
    }

    pub fn table(&self) -> &WaveTable {
        &self.table
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// Advance if `roster` has been cleared. Does nothing once the match
    /// has an outcome.
    pub fn check(&mut self, roster: &mut Vec<Enemy>) -> WaveStep {
        if self.outcome.is_terminal() || !roster.is_empty() {
            return WaveStep::Unchanged;
        }
        self.index += 1;
        if self.index < self.rosters.len() {
            *roster = self.rosters[self.index].clone();
            log::info!(
                "Wave {}/{} started with {} enemies",
                self.index + 1,
                self.table.len(),
                roster.len()
            );
            WaveStep::Spawned(self.index)
        } else {
            log::info!("All {} waves cleared", self.table.len());
            self.outcome = Outcome::Won;
            WaveStep::Won
        }
    }

    /// Mark the match lost. Returns false if it had already ended.
    pub fn lose(&mut self) -> bool {
        if self.outcome.is_terminal() {
            return false;
        }
        self.outcome = Outcome::Lost;
        true
    }
}

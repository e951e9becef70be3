//! Win/loss bookkeeping and its persistence.

use crate::errors::{StatsError, StatsResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Running record across battles.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BattleTally {
    pub wins: u32,
    pub losses: u32,
    /// Consecutive wins, reset by any loss.
    pub streak: u32,
}

impl BattleTally {
    pub fn record_win(&mut self) {
        self.wins += 1;
        self.streak += 1;
    }

    pub fn record_loss(&mut self) {
        self.losses += 1;
        self.streak = 0;
    }
}

/// Durable storage for the tally. The engine only emits tallies; hosts save them.
pub trait StatsStore: Send + Sync {
    fn load(&self) -> StatsResult<BattleTally>;
    fn save(&self, tally: &BattleTally) -> StatsResult<()>;
}

/// Stores the tally as a small JSON document.
#[derive(Debug, Clone)]
pub struct JsonFileStatsStore {
    path: PathBuf,
}

impl JsonFileStatsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> StatsError {
        StatsError::Io {
            path: self.path.display().to_string(),
            source,
        }
    }
}

impl StatsStore for JsonFileStatsStore {
    /// A missing file is a fresh player, not an error.
    fn load(&self) -> StatsResult<BattleTally> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(BattleTally::default())
            }
            Err(e) => return Err(self.io_error(e)),
        };
        serde_json::from_str(&content).map_err(|source| StatsError::Format {
            path: self.path.display().to_string(),
            source,
        })
    }

    fn save(&self, tally: &BattleTally) -> StatsResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }
        let json = serde_json::to_string_pretty(tally).map_err(|source| StatsError::Format {
            path: self.path.display().to_string(),
            source,
        })?;
        fs::write(&self.path, json).map_err(|e| self.io_error(e))?;
        tracing::debug!(path = %self.path.display(), ?tally, "saved battle tally");
        Ok(())
    }
}

/// Keeps the tally in memory for the lifetime of the process.
#[derive(Debug, Default)]
pub struct MemoryStatsStore {
    tally: Mutex<BattleTally>,
}

impl MemoryStatsStore {
    pub fn new(initial: BattleTally) -> Self {
        Self {
            tally: Mutex::new(initial),
        }
    }
}

impl StatsStore for MemoryStatsStore {
    fn load(&self) -> StatsResult<BattleTally> {
        Ok(*self.tally.lock().unwrap_or_else(|e| e.into_inner()))
    }

    fn save(&self, tally: &BattleTally) -> StatsResult<()> {
        *self.tally.lock().unwrap_or_else(|e| e.into_inner()) = *tally;
        Ok(())
    }
}

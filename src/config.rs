//! Tunable rule constants and host settings, read from a RON file.

use crate::errors::{DataError, DataResult};
use crate::player::Inventory;
use crate::roster::{Roster, TypeChart};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Every field has a default, so a config file only lists what it overrides.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ArenaConfig {
    pub starting_inventory: Inventory,
    /// HP restored by a Potion.
    pub heal_amount: u16,
    pub critical_chance: f64,
    pub critical_multiplier: f64,
    /// Damage is scaled by a uniform roll in `[min, max)`.
    pub variance_min: f64,
    pub variance_max: f64,
    pub roster_path: Option<PathBuf>,
    pub type_chart_path: Option<PathBuf>,
    pub stats_path: PathBuf,
    pub seed: Option<u64>,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        ArenaConfig {
            starting_inventory: Inventory::default(),
            heal_amount: 50,
            critical_chance: 0.1,
            critical_multiplier: 1.5,
            variance_min: 0.85,
            variance_max: 1.0,
            roster_path: None,
            type_chart_path: None,
            stats_path: PathBuf::from("battle_stats.json"),
            seed: None,
        }
    }
}

impl ArenaConfig {
    /// Read a config file. A missing file yields the defaults.
    pub fn load(path: &Path) -> DataResult<Self> {
        if !path.exists() {
            tracing::warn!(path = %path.display(), "config file not found, using defaults");
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path).map_err(|source| DataError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_ron_str(&content, &path.display().to_string())
    }

    pub fn from_ron_str(content: &str, what: &str) -> DataResult<Self> {
        let config: ArenaConfig = ron::from_str(content).map_err(|source| DataError::Parse {
            what: what.to_string(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> DataResult<()> {
        if !(0.0..=1.0).contains(&self.critical_chance) {
            return Err(DataError::MalformedData(format!(
                "critical_chance {} is outside [0, 1]",
                self.critical_chance
            )));
        }
        if self.critical_multiplier < 1.0 {
            return Err(DataError::MalformedData(format!(
                "critical_multiplier {} is below 1",
                self.critical_multiplier
            )));
        }
        if !(self.variance_min > 0.0 && self.variance_min <= self.variance_max) {
            return Err(DataError::MalformedData(format!(
                "variance range [{}, {}) is invalid",
                self.variance_min, self.variance_max
            )));
        }
        Ok(())
    }

    /// The configured roster, or the built-in one.
    pub fn load_roster(&self) -> DataResult<Roster> {
        match &self.roster_path {
            Some(path) => Roster::load(path),
            None => Roster::builtin(),
        }
    }

    /// The configured type chart, or the built-in one.
    pub fn load_type_chart(&self) -> DataResult<TypeChart> {
        match &self.type_chart_path {
            Some(path) => TypeChart::load(path),
            None => TypeChart::builtin(),
        }
    }
}

//! Read-only creature roster and type chart.
//!
//! Both are RON documents. Defaults ship inside the binary; hosts may point
//! the engine at alternative files through [`crate::config::ArenaConfig`].

use crate::errors::{DataError, DataResult};
use schema::{ElementType, SpeciesTemplate, TypeMatchups};
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

const DEFAULT_ROSTER: &str = include_str!("../data/roster.ron");
const DEFAULT_TYPE_CHART: &str = include_str!("../data/type_chart.ron");

/// Ordered list of species a battle may draw from.
#[derive(Debug, Clone)]
pub struct Roster {
    species: Vec<SpeciesTemplate>,
}

impl Roster {
    /// The roster compiled into the crate.
    pub fn builtin() -> DataResult<Self> {
        Self::from_ron_str(DEFAULT_ROSTER, "built-in roster")
    }

    pub fn load(path: &Path) -> DataResult<Self> {
        let content = read_file(path)?;
        Self::from_ron_str(&content, &path.display().to_string())
    }

    pub fn from_ron_str(content: &str, what: &str) -> DataResult<Self> {
        let species: Vec<SpeciesTemplate> =
            ron::from_str(content).map_err(|source| DataError::Parse {
                what: what.to_string(),
                source,
            })?;
        Self::new(species)
    }

    /// Build a roster from templates, checking the bounds the engine relies on.
    pub fn new(species: Vec<SpeciesTemplate>) -> DataResult<Self> {
        if species.is_empty() {
            return Err(DataError::EmptyRoster);
        }

        let mut seen = HashSet::new();
        for template in &species {
            if !seen.insert(template.id) {
                return Err(DataError::DuplicateSpecies(template.id));
            }
            if template.base_stats.hp == 0 {
                return Err(DataError::MalformedData(format!(
                    "{} has zero base HP",
                    template.name
                )));
            }
            for move_template in &template.moves {
                if !(0.0..=1.0).contains(&move_template.accuracy) {
                    return Err(DataError::MalformedData(format!(
                        "{}'s {} has accuracy {} outside [0, 1]",
                        template.name, move_template.name, move_template.accuracy
                    )));
                }
            }
        }

        Ok(Self { species })
    }

    pub fn species(&self) -> &[SpeciesTemplate] {
        &self.species
    }

    pub fn len(&self) -> usize {
        self.species.len()
    }

    pub fn is_empty(&self) -> bool {
        self.species.is_empty()
    }

    pub fn get(&self, species_id: u16) -> Option<&SpeciesTemplate> {
        self.species.iter().find(|s| s.id == species_id)
    }

    /// Case-insensitive lookup by display name.
    pub fn find_by_name(&self, name: &str) -> Option<&SpeciesTemplate> {
        let wanted = name.trim();
        self.species
            .iter()
            .find(|s| s.name.eq_ignore_ascii_case(wanted))
    }
}

/// Maps each attacking type to the defending types it is strong and weak against.
#[derive(Debug, Clone, Default)]
pub struct TypeChart {
    entries: HashMap<ElementType, TypeMatchups>,
}

impl TypeChart {
    pub fn builtin() -> DataResult<Self> {
        Self::from_ron_str(DEFAULT_TYPE_CHART, "built-in type chart")
    }

    pub fn load(path: &Path) -> DataResult<Self> {
        let content = read_file(path)?;
        Self::from_ron_str(&content, &path.display().to_string())
    }

    pub fn from_ron_str(content: &str, what: &str) -> DataResult<Self> {
        let entries: HashMap<ElementType, TypeMatchups> =
            ron::from_str(content).map_err(|source| DataError::Parse {
                what: what.to_string(),
                source,
            })?;
        Self::new(entries)
    }

    /// A defending type may not be both super-effective and weak for the same attacker.
    pub fn new(entries: HashMap<ElementType, TypeMatchups>) -> DataResult<Self> {
        for (attacking, matchups) in &entries {
            if let Some(both) = matchups
                .super_effective
                .iter()
                .find(|t| matchups.weak.contains(t))
            {
                return Err(DataError::MalformedData(format!(
                    "{} lists {} as both super effective and weak",
                    attacking, both
                )));
            }
        }
        Ok(Self { entries })
    }

    pub fn matchups(&self, attacking: ElementType) -> Option<&TypeMatchups> {
        self.entries.get(&attacking)
    }
}

fn read_file(path: &Path) -> DataResult<String> {
    fs::read_to_string(path).map_err(|source| DataError::Io {
        path: path.display().to_string(),
        source,
    })
}

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Persistent status conditions a move can inflict on its target.
///
/// A combatant holds at most one of these at a time. They are informational
/// in the current rule set: logged and displayed, with no mechanical effect.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum StatusEffect {
    Burned,
    Poisoned,
    Paralyzed,
    Asleep,
    Frozen,
    Confused,
}

/// Consumable items held in the player's inventory.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum ItemKind {
    /// Restores a fixed amount of HP.
    #[strum(to_string = "Potion", serialize = "heal", serialize = "potion")]
    Heal,
    /// Restores HP to full.
    #[strum(
        to_string = "Full Restore",
        serialize = "fullRestore",
        serialize = "full_restore",
        serialize = "full"
    )]
    FullRestore,
}

/// Opponent skill tier, fixed for the whole session.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

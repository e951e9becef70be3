//! Battle Arena Engine
//!
//! A one-on-one, turn-based creature battle: the player picks a starter, a
//! random opponent is drawn from the roster, and the two trade half-turns of
//! moves and items until one side faints.

// --- MODULE DECLARATIONS ---
pub mod battle;
pub mod combatant;
pub mod config;
pub mod errors;
pub mod mcp_interface;
pub mod player;
pub mod roster;
pub mod stats_store;

// --- PUBLIC API RE-EXPORTS ---

// --- From the `schema` crate ---
pub use schema::{
    BaseStats, Difficulty, ElementType, ItemKind, MoveCategory, MoveTemplate, SpeciesTemplate,
    StatusEffect, TypeMatchups,
};

// --- From this crate's modules (`src/`) ---

// The state machine and what it hands back to hosts.
pub use battle::engine::BattleEngine;
pub use battle::rng::{RandomSource, SeededRandom, SystemRandom};
pub use battle::snapshot::{ActionResult, CombatantSnapshot, MoveSnapshot, SessionSnapshot};
pub use battle::state::{BattleEvent, GamePhase, Side};

// Core runtime types for a battle.
pub use combatant::{Combatant, MoveInstance};
pub use player::{Inventory, PlayerAction};

// Static data, configuration and persistence.
pub use config::ArenaConfig;
pub use roster::{Roster, TypeChart};
pub use stats_store::{BattleTally, JsonFileStatsStore, MemoryStatsStore, StatsStore};

// Crate-specific error and result types.
pub use errors::{
    ActionError, BattleEngineError, BattleResult, BattleStateError, DataError, DataResult,
    StatsError, StatsResult,
};

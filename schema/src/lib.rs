// Battle Arena Schema - Shared type definitions
// This crate contains the static data types (elements, moves, species,
// items, difficulty tiers) shared between the engine and the data files
// it reads.

// Re-export the main types
pub use battle_data::*;
pub use element_types::*;
pub use species_data::*;

pub mod battle_data;
pub mod element_types;
pub mod species_data;

use crate::battle::state::{GamePhase, Side};
use thiserror::Error;

/// Main error type for the Battle Arena engine
#[derive(Debug, Error)]
pub enum BattleEngineError {
    /// Error related to invalid battle state
    #[error("Battle state error: {0}")]
    BattleState(#[from] BattleStateError),
    /// Error related to invalid player actions
    #[error("Action error: {0}")]
    Action(#[from] ActionError),
    /// Error related to the roster, type chart, or configuration files
    #[error("Data error: {0}")]
    Data(#[from] DataError),
    /// Error related to reading or writing the win/loss tally
    #[error("Stats error: {0}")]
    Stats(#[from] StatsError),
}

/// Errors raised when an entry point is called in a phase that cannot accept it.
///
/// These are integration errors on the host's side and are never used for
/// in-game failures such as "no PP left".
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BattleStateError {
    /// No battle session exists yet
    #[error("No battle is in progress")]
    NoActiveSession,
    /// The engine is in a phase that does not accept this call
    #[error("Cannot {operation} while {phase}")]
    WrongPhase {
        operation: &'static str,
        phase: GamePhase,
    },
    /// The call belongs to the other side's half-turn
    #[error("It is not the {0} side's turn")]
    NotYourTurn(Side),
    /// A calculated batch could not be applied to the session
    #[error("Inconsistent battle state: {0}")]
    InconsistentState(String),
}

/// Errors related to malformed player requests
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    /// The acting combatant does not know this move
    #[error("{pokemon} does not know a move called '{move_name}'")]
    UnknownMove { pokemon: String, move_name: String },
    /// The requested species id is not in the roster
    #[error("No species with id {0} in the roster")]
    UnknownSpecies(u16),
    /// The request could not be parsed
    #[error("Invalid action: {0}")]
    InvalidAction(String),
}

/// Errors related to loading static data and configuration
#[derive(Debug, Error)]
pub enum DataError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse {what}: {source}")]
    Parse {
        what: String,
        #[source]
        source: ron::error::SpannedError,
    },
    #[error("Roster contains no species")]
    EmptyRoster,
    #[error("Roster contains species id {0} more than once")]
    DuplicateSpecies(u16),
    /// Data is malformed or out of range
    #[error("Malformed data: {0}")]
    MalformedData(String),
}

/// Errors related to the persisted win/loss tally
#[derive(Debug, Error)]
pub enum StatsError {
    #[error("Failed to access stats file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Stats file {path} is not valid JSON: {source}")]
    Format {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Type alias for Results using BattleEngineError
pub type BattleResult<T> = Result<T, BattleEngineError>;

/// Type alias for Results using DataError
pub type DataResult<T> = Result<T, DataError>;

/// Type alias for Results using StatsError
pub type StatsResult<T> = Result<T, StatsError>;

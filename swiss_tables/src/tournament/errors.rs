//! Error types for the tournament state machine

use thiserror::Error;

use super::models::{ParticipantId, TableId, TournamentPhase};
use crate::pairing::PairingError;

/// Result type for tournament operations
pub type TournamentResult<T> = Result<T, TournamentError>;

/// Tournament errors
///
/// Every operation that returns one of these leaves the tournament untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TournamentError {
    #[error("Insufficient participants: need {needed}, have {current}")]
    InsufficientParticipants { needed: usize, current: usize },

    #[error("Rank {rank} is outside 1..={table_size} for this table")]
    InvalidRank { rank: u8, table_size: usize },

    #[error("Rank {rank} is already held by another participant at this table")]
    DuplicateRank { rank: u8, holder: ParticipantId },

    /// Advancing would close a round with unscored seats; retry with force
    #[error("{} seat(s) in the current round have no rank yet", unscored.len())]
    IncompleteRound {
        unscored: Vec<(TableId, ParticipantId)>,
    },

    #[error("Tournament not in correct phase: expected {expected}, got {actual}")]
    InvalidPhase {
        expected: TournamentPhase,
        actual: TournamentPhase,
    },

    #[error("Participant not found: {0}")]
    ParticipantNotFound(ParticipantId),

    #[error("Table not found: {0}")]
    TableNotFound(TableId),

    #[error("Round not found: index {0}")]
    RoundNotFound(usize),

    #[error("Participant {participant} is not seated at table {table}")]
    NotSeated {
        participant: ParticipantId,
        table: TableId,
    },

    #[error("Participant name must not be empty")]
    InvalidName,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Loaded state breaks an invariant the operations above maintain
    #[error("Inconsistent tournament state: {0}")]
    InvalidState(String),

    #[error("Pairing error: {0}")]
    Pairing(#[from] PairingError),
}

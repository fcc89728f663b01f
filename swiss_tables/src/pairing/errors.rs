//! Error types for table allocation and pairing

use thiserror::Error;

use crate::tournament::models::ParticipantId;

/// Result type for pairing operations
pub type PairingResult<T> = Result<T, PairingError>;

/// Table allocation and pairing errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PairingError {
    /// Too few participants to seat even a single table
    #[error("Insufficient participants: need {needed}, have {current}")]
    InsufficientParticipants { needed: usize, current: usize },

    /// The table structure does not seat exactly the given participants
    #[error("Table structure seats {expected} participants but {actual} were given")]
    StructureMismatch { expected: usize, actual: usize },

    /// The same participant was handed to the optimizer twice
    #[error("Participant {0} appears more than once in the pairing input")]
    DuplicateParticipant(ParticipantId),
}

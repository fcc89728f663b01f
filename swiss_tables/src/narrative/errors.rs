//! Error types for narrative generation

use thiserror::Error;

/// Result type for narrative generation
pub type NarrativeResult<T> = Result<T, NarrativeError>;

/// Narrative generator failures
///
/// These never reach the tournament; [`narrate`](super::narrate) turns
/// exhaustion into a degraded message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NarrativeError {
    /// The service asked us to slow down
    #[error("Rate limited by narrative service")]
    RateLimited,

    /// Non-success HTTP status other than a rate limit
    #[error("Narrative service returned HTTP {status}")]
    Http { status: u16 },

    /// The service answered without any text
    #[error("Received empty response from narrative service")]
    EmptyResponse,

    /// Connection, timeout or decoding failure
    #[error("Transport error: {0}")]
    Transport(String),
}

//! Narrative generation seam.
//!
//! Flavor text (round hype, final reports) comes from an external generator.
//! This module defines:
//! - The [`NarrativeGenerator`] trait adapters implement
//! - Request/report payload types and prompt builders
//! - [`narrate`]: bounded retries with exponential backoff on rate limits,
//!   degrading to a user-facing message instead of failing
//!
//! Nothing here touches tournament state. Callers build a request from a
//! read-only view of the tournament and show whatever text comes back.

pub mod errors;
pub mod models;
pub mod prompts;
pub mod retry;

use async_trait::async_trait;

pub use errors::{NarrativeError, NarrativeResult};
pub use models::{Citation, NarrativeOutcome, NarrativeReport, NarrativeRequest};
pub use prompts::{final_report_request, round_hype_request};
pub use retry::{
    DEFAULT_BASE_DELAY, DEFAULT_MAX_ATTEMPTS, RetryPolicy, degraded_message, narrate,
};

/// Produces narrative text for a prompt
#[async_trait]
pub trait NarrativeGenerator: Send + Sync {
    /// Make one attempt; retries are the caller's job
    async fn generate(&self, request: &NarrativeRequest) -> NarrativeResult<NarrativeReport>;
}

//! Bounded retries with exponential backoff for narrative generation.

use std::time::Duration;

use log::{error, warn};
use rand::Rng;

use super::errors::NarrativeError;
use super::models::{NarrativeOutcome, NarrativeRequest};
use super::NarrativeGenerator;

/// Default number of attempts before giving up
pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

/// Default backoff base
pub const DEFAULT_BASE_DELAY: Duration = Duration::from_secs(1);

/// Retry policy for narrative generation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first
    pub max_attempts: u32,
    /// Backoff base; attempt `n` waits `base * 2^n` plus up to `base` of jitter
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            base_delay: DEFAULT_BASE_DELAY,
        }
    }
}

impl RetryPolicy {
    /// Backoff before retrying after a rate limit on attempt `attempt` (0-indexed),
    /// without jitter
    #[must_use]
    pub fn backoff(&self, attempt: u32) -> Duration {
        let factor = 1u32.checked_shl(attempt).unwrap_or(u32::MAX);
        self.base_delay.saturating_mul(factor)
    }

    fn backoff_with_jitter(&self, attempt: u32) -> Duration {
        let base_ms = u64::try_from(self.base_delay.as_millis()).unwrap_or(u64::MAX);
        let jitter = if base_ms == 0 {
            0
        } else {
            rand::rng().random_range(0..base_ms)
        };
        self.backoff(attempt)
            .saturating_add(Duration::from_millis(jitter))
    }
}

/// User-facing message when every attempt failed
#[must_use]
pub fn degraded_message(attempts: u32) -> String {
    format!(
        "Failed to generate narrative after {attempts} attempt(s). Tournament play is unaffected."
    )
}

/// Ask the generator for a narrative, retrying per `policy`
///
/// Rate limits wait with exponential backoff; other failures retry straight
/// away. Exhausting the attempts yields [`NarrativeOutcome::Degraded`], so the
/// caller never has to handle an error.
pub async fn narrate<G>(
    generator: &G,
    request: &NarrativeRequest,
    policy: &RetryPolicy,
) -> NarrativeOutcome
where
    G: NarrativeGenerator + ?Sized,
{
    let attempts = policy.max_attempts.max(1);

    for attempt in 0..attempts {
        let is_last = attempt + 1 == attempts;
        match generator.generate(request).await {
            Ok(report) => return NarrativeOutcome::Generated(report),
            Err(NarrativeError::RateLimited) if !is_last => {
                let delay = policy.backoff_with_jitter(attempt);
                warn!(
                    "Narrative generation rate limited (attempt {}), retrying in {:?}",
                    attempt + 1,
                    delay
                );
                tokio::time::sleep(delay).await;
            }
            Err(e) => {
                warn!("Narrative generation failed (attempt {}): {}", attempt + 1, e);
            }
        }
    }

    error!("Narrative generation gave up after {attempts} attempt(s)");
    NarrativeOutcome::Degraded {
        message: degraded_message(attempts),
    }
}

//! Console configuration management.
//!
//! Consolidates all environment variable reads and provides validated configuration.

use std::path::PathBuf;
use std::time::Duration;

use swiss_tables::narrative::{DEFAULT_MAX_ATTEMPTS, RetryPolicy};
use swiss_tables::pairing::DEFAULT_MAX_TRIALS;
use swiss_tables::tournament::{DEFAULT_FINALS_SIZE, DEFAULT_QUALIFYING_ROUNDS, TournamentConfig};

/// Default save file, relative to the working directory
pub const DEFAULT_SAVE_FILE: &str = "tournament.json";

/// Default narrative endpoint
pub const DEFAULT_NARRATIVE_API_URL: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash:generateContent";

/// Default per-request narrative timeout in milliseconds
pub const DEFAULT_NARRATIVE_TIMEOUT_MS: u64 = 30_000;

/// Complete console configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Settings for newly created tournaments
    pub tournament: TournamentConfig,
    /// Fixed RNG seed for reproducible pairings
    pub seed: Option<u64>,
    /// Where the tournament is saved; `None` disables saving
    pub save_file: Option<PathBuf>,
    /// Narrative generator configuration
    pub narrative: NarrativeConfig,
}

/// Narrative generator configuration
#[derive(Debug, Clone)]
pub struct NarrativeConfig {
    /// `generateContent` endpoint
    pub api_url: String,
    /// API key; narrative commands are disabled without one
    pub api_key: Option<String>,
    /// Retry policy for rate-limited or failed calls
    pub retry: RetryPolicy,
    /// Upper bound on a single request, connect through body
    pub timeout: Duration,
}

impl CliConfig {
    /// Load configuration from environment variables
    ///
    /// # Arguments
    ///
    /// * `save_file_override` - Optional save file override (from CLI args)
    /// * `seed_override` - Optional seed override (from CLI args)
    /// * `no_save` - Disable saving entirely (from CLI args)
    ///
    /// # Errors
    ///
    /// Returns error if a variable is set to a value that cannot be parsed
    pub fn from_env(
        save_file_override: Option<PathBuf>,
        seed_override: Option<u64>,
        no_save: bool,
    ) -> Result<Self, ConfigError> {
        let tournament = TournamentConfig {
            qualifying_rounds: parse_env_or("ST_QUALIFYING_ROUNDS", DEFAULT_QUALIFYING_ROUNDS)?,
            finals_size: parse_env_or("ST_FINALS_SIZE", DEFAULT_FINALS_SIZE)?,
            max_pairing_trials: parse_env_or("ST_PAIRING_TRIALS", DEFAULT_MAX_TRIALS)?,
            ..TournamentConfig::default()
        };

        let seed = match seed_override {
            Some(seed) => Some(seed),
            None => parse_env_opt("ST_SEED")?,
        };

        let save_file = if no_save {
            None
        } else {
            Some(
                save_file_override
                    .or_else(|| std::env::var("ST_SAVE_FILE").ok().map(PathBuf::from))
                    .unwrap_or_else(|| PathBuf::from(DEFAULT_SAVE_FILE)),
            )
        };

        let narrative = NarrativeConfig {
            api_url: std::env::var("NARRATIVE_API_URL")
                .unwrap_or_else(|_| DEFAULT_NARRATIVE_API_URL.to_string()),
            api_key: std::env::var("NARRATIVE_API_KEY")
                .ok()
                .filter(|key| !key.trim().is_empty()),
            retry: RetryPolicy {
                max_attempts: parse_env_or("NARRATIVE_MAX_ATTEMPTS", DEFAULT_MAX_ATTEMPTS)?,
                base_delay: Duration::from_millis(parse_env_or(
                    "NARRATIVE_BASE_DELAY_MS",
                    1000u64,
                )?),
            },
            timeout: Duration::from_millis(parse_env_or(
                "NARRATIVE_TIMEOUT_MS",
                DEFAULT_NARRATIVE_TIMEOUT_MS,
            )?),
        };

        Ok(CliConfig {
            tournament,
            seed,
            save_file,
            narrative,
        })
    }

    /// Validate configuration after loading
    ///
    /// # Errors
    ///
    /// Returns the first invalid setting
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.tournament
            .validate()
            .map_err(|e| ConfigError::Invalid {
                var: "ST_*".to_string(),
                reason: e.to_string(),
            })?;

        if self.narrative.retry.max_attempts == 0 {
            return Err(ConfigError::Invalid {
                var: "NARRATIVE_MAX_ATTEMPTS".to_string(),
                reason: "Must be at least 1".to_string(),
            });
        }

        if self.narrative.timeout.is_zero() {
            return Err(ConfigError::Invalid {
                var: "NARRATIVE_TIMEOUT_MS".to_string(),
                reason: "Must be greater than 0".to_string(),
            });
        }

        if !self.narrative.api_url.starts_with("http://")
            && !self.narrative.api_url.starts_with("https://")
        {
            return Err(ConfigError::Invalid {
                var: "NARRATIVE_API_URL".to_string(),
                reason: format!("Must be an http(s) URL, got '{}'", self.narrative.api_url),
            });
        }

        Ok(())
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration for {var}: {reason}")]
    Invalid { var: String, reason: String },
}

/// Helper to parse environment variable with default fallback
///
/// Unset variables fall back to `default`; set but unparsable ones are an error.
fn parse_env_or<T>(key: &str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
{
    Ok(parse_env_opt(key)?.unwrap_or(default))
}

fn parse_env_opt<T>(key: &str) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
{
    match std::env::var(key) {
        Ok(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Invalid {
                var: key.to_string(),
                reason: format!("Cannot parse '{value}'"),
            }),
        Err(_) => Ok(None),
    }
}

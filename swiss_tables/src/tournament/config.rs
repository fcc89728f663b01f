//! Tournament configuration.

use serde::{Deserialize, Serialize};

use super::errors::{TournamentError, TournamentResult};
use crate::pairing::{DEFAULT_MAX_TRIALS, MIN_TABLE_SIZE, TableSize};

/// Default number of qualifying rounds before the finals
pub const DEFAULT_QUALIFYING_ROUNDS: u32 = 3;

/// Default finals table size
pub const DEFAULT_FINALS_SIZE: usize = 4;

/// Tournament configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TournamentConfig {
    /// Swiss rounds played before the finals
    pub qualifying_rounds: u32,
    /// Participants seeded into the finals table from the top of the standings
    pub finals_size: usize,
    /// Minimum roster size to start
    pub min_participants: usize,
    /// Swap trials the pairing optimizer may spend per round
    pub max_pairing_trials: usize,
}

impl Default for TournamentConfig {
    fn default() -> Self {
        Self {
            qualifying_rounds: DEFAULT_QUALIFYING_ROUNDS,
            finals_size: DEFAULT_FINALS_SIZE,
            min_participants: MIN_TABLE_SIZE,
            max_pairing_trials: DEFAULT_MAX_TRIALS,
        }
    }
}

impl TournamentConfig {
    /// Validate configuration
    ///
    /// # Errors
    ///
    /// Returns `TournamentError::InvalidConfig` describing the first bad field.
    pub fn validate(&self) -> TournamentResult<()> {
        if self.qualifying_rounds == 0 {
            return Err(TournamentError::InvalidConfig(
                "qualifying_rounds must be at least 1".to_string(),
            ));
        }

        if TableSize::from_seats(self.finals_size).is_none() {
            return Err(TournamentError::InvalidConfig(format!(
                "finals_size must be 3, 4 or 5, got {}",
                self.finals_size
            )));
        }

        if self.min_participants < MIN_TABLE_SIZE {
            return Err(TournamentError::InvalidConfig(format!(
                "min_participants must be at least {MIN_TABLE_SIZE}, got {}",
                self.min_participants
            )));
        }

        if self.max_pairing_trials == 0 {
            return Err(TournamentError::InvalidConfig(
                "max_pairing_trials must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}

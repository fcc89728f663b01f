//! Tournament module: the round-progression state machine.
//!
//! This module provides tournament management functionality including:
//! - Participant registration (single and bulk, one name per line)
//! - Swiss rounds paired to avoid repeat tablemates
//! - Rank entry with per-table validation
//! - Manual bonus adjustments
//! - Finals seeded from the top of the standings
//!
//! ## Example
//!
//! ```
//! use rand::{SeedableRng, rngs::StdRng};
//! use swiss_tables::tournament::{AdvanceOutcome, Tournament, TournamentConfig};
//!
//! let mut tournament = Tournament::new(TournamentConfig::default()).unwrap();
//! tournament
//!     .add_participants_from_lines("Alice\nBob\nCara\nDev\nEli")
//!     .unwrap();
//!
//! let mut rng = StdRng::seed_from_u64(42);
//! let round = tournament.start(&mut rng).unwrap();
//! assert_eq!(round.tables.len(), 1);
//!
//! // Nobody has been ranked yet, so advancing needs an explicit override
//! assert!(tournament.advance_round(false, &mut rng).is_err());
//! assert_eq!(
//!     tournament.advance_round(true, &mut rng).unwrap(),
//!     AdvanceOutcome::NextRound(2)
//! );
//! ```

pub mod config;
pub mod errors;
pub mod manager;
pub mod models;

pub use config::{DEFAULT_FINALS_SIZE, DEFAULT_QUALIFYING_ROUNDS, TournamentConfig};
pub use errors::{TournamentError, TournamentResult};
pub use manager::{FINAL_TABLE_LABEL, Tournament};
pub use models::{
    AdvanceOutcome, Participant, ParticipantId, Round, Table, TableId, TournamentPhase,
};

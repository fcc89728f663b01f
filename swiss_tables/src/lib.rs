//! # Swiss Tables
//!
//! A Swiss-style tournament engine for games played at shared tables of three
//! to five participants rather than head-to-head.
//!
//! ## Architecture
//!
//! The engine is built from four pure components and one stateful one:
//!
//! - **Table structure allocation**: participant count to table sizes
//! - **Pairing optimization**: seats participants so as few pairs as possible
//!   share a table again, using a bounded randomized local search
//! - **Scoring**: finish rank to points (7, 4, 3, 1, 0)
//! - **Standings**: totals over every round plus bonus adjustments
//! - **Tournament state machine**: registration, swiss rounds, finals,
//!   completion
//!
//! ## Core Modules
//!
//! - [`pairing`]: Allocation and the pairing optimizer
//! - [`scoring`]: Rank type and the points table
//! - [`standings`]: Standings aggregation
//! - [`tournament`]: The tournament aggregate and its phases
//! - [`narrative`]: Optional flavor-text generation, isolated from play
//!
//! ## Example
//!
//! ```
//! use rand::{SeedableRng, rngs::StdRng};
//! use swiss_tables::Tournament;
//!
//! let mut tournament = Tournament::default();
//! tournament.add_participants_from_lines("Ana\nBen\nCy\nDi").unwrap();
//!
//! let mut rng = StdRng::seed_from_u64(1);
//! tournament.start(&mut rng).unwrap();
//! assert_eq!(tournament.current_round_number(), Some(1));
//! ```

/// Narrative generator seam and retry policy.
pub mod narrative;

/// Table allocation and anti-repeat pairing.
pub mod pairing;

/// Finish-rank scoring.
pub mod scoring;

/// Standings aggregation.
pub mod standings;

/// Tournament state machine and data model.
pub mod tournament;

pub use pairing::{TableSize, TableStructure, allocate_tables, generate_pairing};
pub use scoring::{Rank, points_for_rank};
pub use standings::{Standing, compute_standings};
pub use tournament::{
    AdvanceOutcome, Participant, ParticipantId, Round, Table, TableId, Tournament,
    TournamentConfig, TournamentError, TournamentPhase,
};

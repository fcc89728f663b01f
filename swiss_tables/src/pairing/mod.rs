//! Table allocation and anti-repeat pairing.
//!
//! This module implements the two pure building blocks of a round:
//! - Table structure allocation: splitting a roster into tables of 3, 4 or 5
//! - Pairing optimization: seating participants so that as few pairs as
//!   possible share a table again
//!
//! ## Example
//!
//! ```
//! use rand::{SeedableRng, rngs::StdRng};
//! use swiss_tables::pairing::{allocate_tables, generate_pairing};
//! use swiss_tables::tournament::ParticipantId;
//!
//! let roster: Vec<ParticipantId> = (0..9).map(|_| ParticipantId::new()).collect();
//! let structure = allocate_tables(roster.len()).unwrap();
//! let mut rng = StdRng::seed_from_u64(7);
//!
//! let tables = generate_pairing(&roster, &structure, &[], &mut rng).unwrap();
//! assert_eq!(tables.len(), 2);
//! ```

pub mod errors;
pub mod history;
pub mod optimizer;
pub mod structure;

pub use errors::{PairingError, PairingResult};
pub use history::PairHistory;
pub use optimizer::{
    DEFAULT_MAX_TRIALS, PairingOptimizer, PairingReport, generate_pairing, repeat_cost,
};
pub use structure::{MIN_TABLE_SIZE, TableSize, TableStructure, allocate_tables};

//! Anti-repeat table pairing using a bounded randomized local search.

use std::collections::HashSet;

use log::debug;
use rand::{Rng, seq::SliceRandom};

use super::errors::{PairingError, PairingResult};
use super::history::PairHistory;
use super::structure::{TableSize, TableStructure};
use crate::tournament::models::{ParticipantId, Round, Table, TableId};

/// Default number of swap trials per pairing
pub const DEFAULT_MAX_TRIALS: usize = 500;

/// Summary of one optimizer run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PairingReport {
    /// Repeat cost of the initial shuffled order
    pub initial_cost: usize,
    /// Repeat cost of the returned tables
    pub final_cost: usize,
    /// Swap trials actually evaluated
    pub trials: usize,
}

/// Seats participants at tables while avoiding earlier tablemates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PairingOptimizer {
    max_trials: usize,
}

impl Default for PairingOptimizer {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_TRIALS)
    }
}

impl PairingOptimizer {
    #[must_use]
    pub const fn new(max_trials: usize) -> Self {
        Self { max_trials }
    }

    #[must_use]
    pub const fn max_trials(&self) -> usize {
        self.max_trials
    }

    /// Pair one round
    ///
    /// # Arguments
    ///
    /// * `participants` - Everyone to seat this round
    /// * `structure` - Table sizes; must seat exactly `participants.len()`
    /// * `history` - Every earlier round
    /// * `rng` - Source of randomness for the shuffle and swaps
    ///
    /// # Errors
    ///
    /// Returns `StructureMismatch` if the structure seats a different number of
    /// participants, or `DuplicateParticipant` if an id repeats.
    pub fn generate_pairing<R: Rng + ?Sized>(
        &self,
        participants: &[ParticipantId],
        structure: &TableStructure,
        history: &[Round],
        rng: &mut R,
    ) -> PairingResult<Vec<Table>> {
        self.generate_pairing_with_report(participants, structure, history, rng)
            .map(|(tables, _)| tables)
    }

    /// Same as [`generate_pairing`](Self::generate_pairing), also returning
    /// the search summary
    pub fn generate_pairing_with_report<R: Rng + ?Sized>(
        &self,
        participants: &[ParticipantId],
        structure: &TableStructure,
        history: &[Round],
        rng: &mut R,
    ) -> PairingResult<(Vec<Table>, PairingReport)> {
        if structure.total_seats() != participants.len() {
            return Err(PairingError::StructureMismatch {
                expected: structure.total_seats(),
                actual: participants.len(),
            });
        }

        let mut seen = HashSet::with_capacity(participants.len());
        if let Some(&dup) = participants.iter().find(|&&id| !seen.insert(id)) {
            return Err(PairingError::DuplicateParticipant(dup));
        }

        let slots = structure.slots();
        let pair_history = PairHistory::from_rounds(history);

        let mut current = participants.to_vec();
        current.shuffle(rng);

        let initial_cost = order_cost(&current, &slots, &pair_history);
        let mut min_cost = initial_cost;
        let mut best = current.clone();
        let mut trials = 0;

        while trials < self.max_trials && min_cost > 0 && current.len() > 1 {
            trials += 1;
            let i = rng.random_range(0..current.len());
            let j = rng.random_range(0..current.len());
            current.swap(i, j);

            let cost = order_cost(&current, &slots, &pair_history);
            if cost < min_cost {
                min_cost = cost;
                best.clone_from(&current);
            } else {
                current.swap(i, j);
            }
        }

        let report = PairingReport {
            initial_cost,
            final_cost: min_cost,
            trials,
        };
        debug!(
            "Paired {} participants into {} tables: repeat cost {} -> {} after {} trials",
            participants.len(),
            slots.len(),
            report.initial_cost,
            report.final_cost,
            report.trials
        );

        Ok((slice_into_tables(&best, &slots, rng), report))
    }
}

/// Pair one round with the default optimizer
///
/// # Errors
///
/// See [`PairingOptimizer::generate_pairing`].
pub fn generate_pairing<R: Rng + ?Sized>(
    participants: &[ParticipantId],
    structure: &TableStructure,
    history: &[Round],
    rng: &mut R,
) -> PairingResult<Vec<Table>> {
    PairingOptimizer::default().generate_pairing(participants, structure, history, rng)
}

/// Number of pairs sharing a table in `tables` that also shared one in `history`
#[must_use]
pub fn repeat_cost(tables: &[Table], history: &[Round]) -> usize {
    let pair_history = PairHistory::from_rounds(history);
    tables
        .iter()
        .map(|t| pair_history.group_cost(&t.seats))
        .sum()
}

fn chunks<'a>(
    order: &'a [ParticipantId],
    slots: &'a [TableSize],
) -> impl Iterator<Item = &'a [ParticipantId]> + 'a {
    slots.iter().scan(0, move |start, size| {
        let end = *start + size.seats();
        let chunk = &order[*start..end];
        *start = end;
        Some(chunk)
    })
}

fn order_cost(order: &[ParticipantId], slots: &[TableSize], history: &PairHistory) -> usize {
    chunks(order, slots).map(|group| history.group_cost(group)).sum()
}

fn slice_into_tables<R: Rng + ?Sized>(
    order: &[ParticipantId],
    slots: &[TableSize],
    rng: &mut R,
) -> Vec<Table> {
    chunks(order, slots)
        .enumerate()
        .map(|(i, group)| {
            Table::new(
                TableId::from_rng(rng),
                format!("Table {}", i + 1),
                group.to_vec(),
            )
        })
        .collect()
}

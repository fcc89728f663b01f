//! Pairwise co-occurrence history across earlier rounds.

use std::collections::HashMap;

use crate::tournament::models::{ParticipantId, Round, Table};

/// How often each unordered pair of participants has shared a table
#[derive(Debug, Clone, Default)]
pub struct PairHistory {
    counts: HashMap<(ParticipantId, ParticipantId), u32>,
}

fn pair_key(a: ParticipantId, b: ParticipantId) -> (ParticipantId, ParticipantId) {
    if a <= b { (a, b) } else { (b, a) }
}

impl PairHistory {
    /// Build the history from every table of every given round
    pub fn from_rounds(rounds: &[Round]) -> Self {
        let mut history = Self::default();
        for table in rounds.iter().flat_map(|r| r.tables.iter()) {
            history.record_table(table);
        }
        history
    }

    /// Count every pair seated at `table`
    pub fn record_table(&mut self, table: &Table) {
        for (i, &a) in table.seats.iter().enumerate() {
            for &b in &table.seats[i + 1..] {
                *self.counts.entry(pair_key(a, b)).or_insert(0) += 1;
            }
        }
    }

    /// Number of earlier tables the two participants shared
    #[must_use]
    pub fn times_met(&self, a: ParticipantId, b: ParticipantId) -> u32 {
        self.counts.get(&pair_key(a, b)).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn have_met(&self, a: ParticipantId, b: ParticipantId) -> bool {
        self.times_met(a, b) > 0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Repeat pairs in one group: each pair that met before counts once
    #[must_use]
    pub fn group_cost(&self, group: &[ParticipantId]) -> usize {
        if self.is_empty() {
            return 0;
        }
        let mut cost = 0;
        for (i, &a) in group.iter().enumerate() {
            for &b in &group[i + 1..] {
                if self.have_met(a, b) {
                    cost += 1;
                }
            }
        }
        cost
    }
}

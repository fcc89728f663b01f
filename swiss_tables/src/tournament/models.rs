//! Tournament data models: participants, tables, rounds and phase.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::pairing::TableSize;
use crate::scoring::Rank;

/// Stable participant identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticipantId(pub Uuid);

impl ParticipantId {
    /// Generate a fresh random identifier
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ParticipantId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Table identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TableId(pub Uuid);

impl TableId {
    /// Draw an identifier from the given RNG so seeded runs stay reproducible
    pub fn from_rng<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self(uuid::Builder::from_random_bytes(rng.random()).into_uuid())
    }
}

impl std::fmt::Display for TableId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Registered participant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub id: ParticipantId,
    pub name: String,
    /// Manually entered score adjustment, independent of table ranks
    pub bonus: i64,
}

impl Participant {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: ParticipantId::new(),
            name: name.into(),
            bonus: 0,
        }
    }
}

/// One table in a round
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    pub id: TableId,
    /// Display label, e.g. "Table 2"
    pub label: String,
    /// Seated participants in seating order
    pub seats: Vec<ParticipantId>,
    /// Recorded finish ranks; absent entries are unscored
    pub ranks: BTreeMap<ParticipantId, Rank>,
}

impl Table {
    pub fn new(id: TableId, label: impl Into<String>, seats: Vec<ParticipantId>) -> Self {
        Self {
            id,
            label: label.into(),
            seats,
            ranks: BTreeMap::new(),
        }
    }

    /// Table size, or `None` if the seat count is illegal
    #[must_use]
    pub fn size(&self) -> Option<TableSize> {
        TableSize::from_seats(self.seats.len())
    }

    #[must_use]
    pub fn is_seated(&self, participant: ParticipantId) -> bool {
        self.seats.contains(&participant)
    }

    #[must_use]
    pub fn rank_of(&self, participant: ParticipantId) -> Option<Rank> {
        self.ranks.get(&participant).copied()
    }

    /// Seats without a recorded rank
    pub fn unscored(&self) -> impl Iterator<Item = ParticipantId> + '_ {
        self.seats
            .iter()
            .copied()
            .filter(|id| !self.ranks.contains_key(id))
    }

    #[must_use]
    pub fn is_fully_scored(&self) -> bool {
        self.unscored().next().is_none()
    }
}

/// One round of play
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    /// Round number (1-indexed)
    pub number: u32,
    pub tables: Vec<Table>,
    pub is_final: bool,
    pub created_at: DateTime<Utc>,
}

impl Round {
    pub fn new(number: u32, tables: Vec<Table>, is_final: bool) -> Self {
        Self {
            number,
            tables,
            is_final,
            created_at: Utc::now(),
        }
    }

    #[must_use]
    pub fn table(&self, table_id: TableId) -> Option<&Table> {
        self.tables.iter().find(|t| t.id == table_id)
    }

    pub(crate) fn table_mut(&mut self, table_id: TableId) -> Option<&mut Table> {
        self.tables.iter_mut().find(|t| t.id == table_id)
    }

    /// Table a participant sits at in this round
    #[must_use]
    pub fn table_of(&self, participant: ParticipantId) -> Option<&Table> {
        self.tables.iter().find(|t| t.is_seated(participant))
    }

    /// Recorded rank for a participant in this round, if any
    #[must_use]
    pub fn rank_of(&self, participant: ParticipantId) -> Option<Rank> {
        self.table_of(participant).and_then(|t| t.rank_of(participant))
    }

    /// Every (table, participant) seat that has no rank yet
    #[must_use]
    pub fn unscored_seats(&self) -> Vec<(TableId, ParticipantId)> {
        self.tables
            .iter()
            .flat_map(|t| t.unscored().map(move |p| (t.id, p)))
            .collect()
    }

    #[must_use]
    pub fn is_fully_scored(&self) -> bool {
        self.tables.iter().all(Table::is_fully_scored)
    }
}

/// Tournament phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TournamentPhase {
    /// Accepting participants
    Registration,
    /// Rounds in progress
    Active,
    /// Finals closed
    Completed,
}

impl std::fmt::Display for TournamentPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TournamentPhase::Registration => write!(f, "registration"),
            TournamentPhase::Active => write!(f, "active"),
            TournamentPhase::Completed => write!(f, "completed"),
        }
    }
}

/// Result of a successful `advance_round`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdvanceOutcome {
    /// A new qualifying round was paired
    NextRound(u32),
    /// The finals table was seeded with these participants, best first
    FinalsSeeded(Vec<ParticipantId>),
    /// The finals closed and the tournament is over
    Completed,
}

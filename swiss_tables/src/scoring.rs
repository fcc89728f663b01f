//! Finish-rank scoring.

use serde::{Deserialize, Serialize};

/// Points awarded for 1st through 5th place
pub const POINTS_BY_RANK: [u32; 5] = [7, 4, 3, 1, 0];

/// Finish position within a table, 1 (winner) through 5
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rank(u8);

impl Rank {
    pub const FIRST: Rank = Rank(1);
    pub const MAX: u8 = 5;

    /// Validate a raw rank; only 1..=5 are representable
    #[must_use]
    pub const fn new(value: u8) -> Option<Self> {
        if value >= 1 && value <= Self::MAX {
            Some(Self(value))
        } else {
            None
        }
    }

    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Points this finish is worth
    #[must_use]
    pub const fn points(self) -> u32 {
        POINTS_BY_RANK[(self.0 - 1) as usize]
    }
}

impl TryFrom<u8> for Rank {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Rank::new(value)
            .ok_or_else(|| format!("rank must be between 1 and {}, got {value}", Rank::MAX))
    }
}

impl From<Rank> for u8 {
    fn from(rank: Rank) -> Self {
        rank.0
    }
}

impl std::fmt::Display for Rank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let suffix = match self.0 {
            1 => "st",
            2 => "nd",
            3 => "rd",
            _ => "th",
        };
        write!(f, "{}{suffix}", self.0)
    }
}

/// Points for an optional finish; unranked seats score nothing
#[must_use]
pub fn points_for_rank(rank: Option<Rank>) -> u32 {
    rank.map_or(0, Rank::points)
}

/// Points for an unvalidated rank; anything outside 1..=5 scores nothing
#[must_use]
pub fn points_for_raw_rank(rank: u32) -> u32 {
    u8::try_from(rank)
        .ok()
        .and_then(Rank::new)
        .map_or(0, Rank::points)
}

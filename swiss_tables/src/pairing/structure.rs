//! Table structure allocation: how many tables of each size a round needs.

use serde::{Deserialize, Serialize};

use super::errors::{PairingError, PairingResult};

/// Fewest participants that can fill a table
pub const MIN_TABLE_SIZE: usize = 3;

/// Legal table sizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TableSize {
    Three,
    Four,
    Five,
}

impl TableSize {
    /// Number of seats at a table of this size
    #[must_use]
    pub const fn seats(self) -> usize {
        match self {
            Self::Three => 3,
            Self::Four => 4,
            Self::Five => 5,
        }
    }

    /// Map a seat count back to a table size
    #[must_use]
    pub const fn from_seats(seats: usize) -> Option<Self> {
        match seats {
            3 => Some(Self::Three),
            4 => Some(Self::Four),
            5 => Some(Self::Five),
            _ => None,
        }
    }
}

impl std::fmt::Display for TableSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.seats())
    }
}

/// Multiset of table sizes for one round
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableStructure {
    pub threes: usize,
    pub fours: usize,
    pub fives: usize,
}

impl TableStructure {
    #[must_use]
    pub const fn new(threes: usize, fours: usize, fives: usize) -> Self {
        Self {
            threes,
            fours,
            fives,
        }
    }

    /// Number of tables of the given size
    #[must_use]
    pub const fn count(&self, size: TableSize) -> usize {
        match size {
            TableSize::Three => self.threes,
            TableSize::Four => self.fours,
            TableSize::Five => self.fives,
        }
    }

    /// Total seats across every table
    #[must_use]
    pub const fn total_seats(&self) -> usize {
        self.threes * 3 + self.fours * 4 + self.fives * 5
    }

    #[must_use]
    pub const fn table_count(&self) -> usize {
        self.threes + self.fours + self.fives
    }

    /// Table sizes in seating order: all fives, then fours, then threes.
    ///
    /// Physical table numbering follows this order.
    #[must_use]
    pub fn slots(&self) -> Vec<TableSize> {
        let mut slots = Vec::with_capacity(self.table_count());
        slots.extend(std::iter::repeat_n(TableSize::Five, self.fives));
        slots.extend(std::iter::repeat_n(TableSize::Four, self.fours));
        slots.extend(std::iter::repeat_n(TableSize::Three, self.threes));
        slots
    }
}

/// Split `total_participants` into tables of 3, 4 or 5.
///
/// Favors tables of four, converts fours into fives to absorb a remainder of
/// one to three, and only falls back to threes when there are not enough fours
/// to convert.
///
/// # Errors
///
/// Returns `PairingError::InsufficientParticipants` for fewer than three
/// participants.
///
/// # Examples
///
/// ```
/// use swiss_tables::pairing::allocate_tables;
///
/// let structure = allocate_tables(10).unwrap();
/// assert_eq!((structure.threes, structure.fours, structure.fives), (0, 0, 2));
/// ```
pub fn allocate_tables(total_participants: usize) -> PairingResult<TableStructure> {
    if total_participants < MIN_TABLE_SIZE {
        return Err(PairingError::InsufficientParticipants {
            needed: MIN_TABLE_SIZE,
            current: total_participants,
        });
    }

    let mut fours = total_participants / 4;
    let mut fives = 0;
    let mut threes = 0;

    match total_participants % 4 {
        1 => {
            // Unreachable with count4 == 0 once n >= 3.
            if fours >= 1 {
                fours -= 1;
                fives += 1;
            }
        }
        2 => {
            if fours >= 2 {
                fours -= 2;
                fives += 2;
            } else {
                fours = 0;
                fives = 0;
                threes = 2;
            }
        }
        3 => {
            if fours >= 3 {
                fours -= 3;
                fives += 3;
            } else {
                threes = 1;
            }
        }
        _ => {}
    }

    Ok(TableStructure::new(threes, fours, fives))
}

//! Standings aggregation over every recorded round.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::scoring::points_for_rank;
use crate::tournament::models::{Participant, ParticipantId, Round};

/// One participant's line in the standings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standing {
    /// 1-indexed position after sorting
    pub position: usize,
    pub participant_id: ParticipantId,
    pub name: String,
    /// Points from table finishes
    pub round_points: i64,
    /// Manual bonus adjustment
    pub bonus: i64,
    /// `round_points + bonus`
    pub total: i64,
    /// Rounds in which the participant has a recorded rank
    pub rounds_scored: usize,
}

/// Rank the roster by total score
///
/// Totals are the sum of points for every recorded finish plus the bonus
/// adjustment, saturating at the `i64` bounds. Sorted best first; ties keep roster order.
#[must_use]
pub fn compute_standings(roster: &[Participant], rounds: &[Round]) -> Vec<Standing> {
    let mut earned: HashMap<ParticipantId, (i64, usize)> = HashMap::new();

    for table in rounds.iter().flat_map(|r| r.tables.iter()) {
        for (&participant, &rank) in &table.ranks {
            let entry = earned.entry(participant).or_insert((0, 0));
            entry.0 = entry.0.saturating_add(i64::from(points_for_rank(Some(rank))));
            entry.1 += 1;
        }
    }

    let mut standings: Vec<Standing> = roster
        .iter()
        .map(|p| {
            let (round_points, rounds_scored) = earned.get(&p.id).copied().unwrap_or((0, 0));
            Standing {
                position: 0,
                participant_id: p.id,
                name: p.name.clone(),
                round_points,
                bonus: p.bonus,
                total: round_points.saturating_add(p.bonus),
                rounds_scored,
            }
        })
        .collect();

    // Vec::sort_by is stable
    standings.sort_by(|a, b| b.total.cmp(&a.total));
    for (i, standing) in standings.iter_mut().enumerate() {
        standing.position = i + 1;
    }
    standings
}

/// The first `count` participants of the standings, best first
#[must_use]
pub fn top_participants(standings: &[Standing], count: usize) -> Vec<ParticipantId> {
    standings
        .iter()
        .take(count)
        .map(|s| s.participant_id)
        .collect()
}

//! Prompt builders for round hype and the final tournament report.

use std::collections::HashMap;

use super::models::NarrativeRequest;
use crate::standings::Standing;
use crate::tournament::models::{Participant, ParticipantId, Table};

/// Leaders quoted in a round hype prompt
const HYPE_LEADERS: usize = 5;

const HYPE_PERSONA: &str = "Act as a highly dramatic, enthusiastic tournament commentator.";
const REPORT_PERSONA: &str = "Act as a professional, authoritative sports commentator for a major \
                              competitive gaming league.";

fn describe_tables(tables: &[Table], roster: &[Participant]) -> String {
    let names: HashMap<ParticipantId, &str> =
        roster.iter().map(|p| (p.id, p.name.as_str())).collect();

    tables
        .iter()
        .map(|t| {
            let seated: Vec<&str> = t
                .seats
                .iter()
                .map(|id| names.get(id).copied().unwrap_or("unknown"))
                .collect();
            format!("{} ({} players): {}", t.label, t.seats.len(), seated.join(", "))
        })
        .collect::<Vec<_>>()
        .join("; ")
}

fn describe_standings(standings: &[Standing]) -> String {
    standings
        .iter()
        .map(|s| format!("#{}: {} ({} pts)", s.position, s.name, s.total))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Short announcer blurb for the start of a round
#[must_use]
pub fn round_hype_request(
    round_label: &str,
    tables: &[Table],
    roster: &[Participant],
    standings: &[Standing],
) -> NarrativeRequest {
    let leaders = &standings[..standings.len().min(HYPE_LEADERS)];
    let context = format!(
        "Write a short, exciting single paragraph (at most 4 sentences) announcing the start of \
         {round_label} in a board game tournament.\n\
         Current leaders: {}.\n\
         Current pairings: {}.\n\
         Focus on rivalries, the tension of this round and the leaders' pursuit of victory. \
         Do not include citations.",
        describe_standings(leaders),
        describe_tables(tables, roster),
    );
    NarrativeRequest::new(context).with_system_instruction(HYPE_PERSONA)
}

/// Analytical wrap-up once the tournament has completed
///
/// Returns `None` when there are no standings to report on.
#[must_use]
pub fn final_report_request(
    standings: &[Standing],
    total_rounds: usize,
) -> Option<NarrativeRequest> {
    let champion = standings.first()?;
    let context = format!(
        "Write an analytical sports report (at most 2 paragraphs) summarizing a \
         {total_rounds}-round board game tournament that just concluded.\n\
         The champion is {} with {} total points.\n\
         Full final standings: {}.\n\
         Mention the winner's dominance or resilience, and draw a comparison to a current major \
         professional competition using search results.",
        champion.name,
        champion.total,
        describe_standings(standings),
    );
    Some(
        NarrativeRequest::new(context)
            .with_system_instruction(REPORT_PERSONA)
            .with_search(),
    )
}

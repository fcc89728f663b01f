//! Console session: owns one tournament, runs commands against it and keeps
//! the save file current.

use std::fmt::Write as _;
use std::path::PathBuf;

use anyhow::{Context, Result, anyhow, bail};
use log::{info, warn};
use rand::{SeedableRng, rngs::StdRng};
use swiss_tables::narrative::{
    NarrativeGenerator, NarrativeOutcome, RetryPolicy, final_report_request, narrate,
    round_hype_request,
};
use swiss_tables::tournament::{
    AdvanceOutcome, ParticipantId, TableId, Tournament, TournamentConfig, TournamentError,
    TournamentPhase,
};
use swiss_tables::{Rank, Standing};

use crate::commands::{COMMAND_HELP, Command};
use crate::config::CliConfig;

/// What the console should do after a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Print this and read the next command
    Output(String),
    /// Leave the console
    Quit,
}

/// A running console session
pub struct Session {
    tournament: Tournament,
    rng: StdRng,
    save_file: Option<PathBuf>,
    narrator: Option<Box<dyn NarrativeGenerator>>,
    retry: RetryPolicy,
}

impl Session {
    /// Open a session, resuming from the save file if one exists
    ///
    /// # Errors
    ///
    /// Returns error if the save file cannot be read or parsed, holds an
    /// inconsistent tournament, or the tournament configuration is invalid.
    ///
    /// A resumed tournament keeps the configuration it was saved with.
    pub fn open(
        config: &CliConfig,
        narrator: Option<Box<dyn NarrativeGenerator>>,
    ) -> Result<Self> {
        let tournament = match &config.save_file {
            Some(path) if path.exists() => {
                let json = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read {}", path.display()))?;
                let tournament: Tournament = serde_json::from_str(&json)
                    .with_context(|| format!("Failed to parse {}", path.display()))?;
                tournament
                    .validate()
                    .with_context(|| format!("Invalid tournament in {}", path.display()))?;
                let drift = config_drift(tournament.config(), &config.tournament);
                if !drift.is_empty() {
                    warn!(
                        "Ignoring ST_* settings that differ from {}: {}",
                        path.display(),
                        drift.join(", ")
                    );
                }
                info!(
                    "Resumed {} tournament with {} participant(s) from {}",
                    tournament.phase(),
                    tournament.participants().len(),
                    path.display()
                );
                tournament
            }
            _ => Tournament::new(config.tournament.clone())?,
        };

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        };

        Ok(Self {
            tournament,
            rng,
            save_file: config.save_file.clone(),
            narrator,
            retry: config.narrative.retry,
        })
    }

    #[must_use]
    pub fn tournament(&self) -> &Tournament {
        &self.tournament
    }

    /// Run one command
    ///
    /// State-changing commands save the tournament once they succeed.
    ///
    /// # Errors
    ///
    /// Returns error for rejected tournament operations, bad table or seat
    /// numbers, and save failures. A rejected operation leaves the tournament
    /// unchanged.
    pub async fn execute(&mut self, command: Command) -> Result<Reply> {
        let mutating = command.is_mutating();

        let output = match command {
            Command::Add(names) => {
                let added = self
                    .tournament
                    .add_participants_from_lines(&names.join("\n"))?;
                format!(
                    "Added {} participant(s); {} registered",
                    added.len(),
                    self.tournament.participants().len()
                )
            }
            Command::Remove(number) => {
                let id = self.participant_at(number)?;
                let removed = self.tournament.remove_participant(id)?;
                format!("Removed {}", removed.name)
            }
            Command::List => self.render_roster(),
            Command::Start => {
                self.tournament.start(&mut self.rng)?;
                self.render_round()
            }
            Command::Show => self.render_round(),
            Command::Rank { table, seat, rank } => {
                let (index, table_id, id) = self.seat_at(table, seat)?;
                self.tournament.record_rank(index, table_id, id, rank)?;
                let rank = Rank::new(rank).map_or_else(|| rank.to_string(), |r| r.to_string());
                format!("{} finished {} at table {}", self.name(id), rank, table)
            }
            Command::Unrank { table, seat } => {
                let (index, table_id, id) = self.seat_at(table, seat)?;
                match self.tournament.clear_rank(index, table_id, id)? {
                    Some(rank) => format!("Cleared {}'s {} place", self.name(id), rank),
                    None => format!("{} had no rank recorded", self.name(id)),
                }
            }
            Command::Bonus { participant, delta } => {
                let id = self.participant_at(participant)?;
                let bonus = self.tournament.adjust_bonus(id, delta)?;
                format!("{} bonus is now {:+}", self.name(id), bonus)
            }
            Command::SetBonus { participant, value } => {
                let id = self.participant_at(participant)?;
                self.tournament.set_bonus(id, value)?;
                format!("{} bonus is now {:+}", self.name(id), value)
            }
            Command::Next { force } => self.advance(force)?,
            Command::Standings => render_standings(&self.tournament.standings()),
            Command::Hype => self.hype().await?,
            Command::Report => self.report().await?,
            Command::Reset { confirmed: false } => {
                "This discards the roster and every round. Type 'reset!' to confirm.".to_string()
            }
            Command::Reset { confirmed: true } => {
                self.tournament.reset();
                "Tournament reset; registration is open".to_string()
            }
            Command::Help => COMMAND_HELP.to_string(),
            Command::Quit => return Ok(Reply::Quit),
        };

        if mutating {
            self.save()?;
        }
        Ok(Reply::Output(output))
    }

    /// Write the tournament to the save file, if saving is enabled
    ///
    /// # Errors
    ///
    /// Returns error if serialization or the write fails.
    pub fn save(&self) -> Result<()> {
        let Some(path) = &self.save_file else {
            return Ok(());
        };
        let json = serde_json::to_string_pretty(&self.tournament)
            .context("Failed to serialize tournament")?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write {}", path.display()))
    }

    fn advance(&mut self, force: bool) -> Result<String> {
        let closing = self
            .tournament
            .current_round_number()
            .map(|n| self.tournament.round_label(n));

        match self.tournament.advance_round(force, &mut self.rng) {
            Ok(AdvanceOutcome::NextRound(_)) => Ok(self.render_round()),
            Ok(AdvanceOutcome::FinalsSeeded(finalists)) => {
                let names: Vec<&str> = finalists.iter().map(|id| self.name(*id)).collect();
                Ok(format!(
                    "Finals seeded: {}\n\n{}",
                    names.join(", "),
                    self.render_round()
                ))
            }
            Ok(AdvanceOutcome::Completed) => {
                let standings = self.tournament.standings();
                let champion = standings
                    .first()
                    .map_or("nobody", |s| s.name.as_str());
                Ok(format!(
                    "Tournament complete! Champion: {}\n\n{}",
                    champion,
                    render_standings(&standings)
                ))
            }
            Err(TournamentError::IncompleteRound { unscored }) => {
                let names: Vec<&str> = unscored.iter().map(|(_, id)| self.name(*id)).collect();
                Ok(format!(
                    "{} has {} unscored seat(s): {}\nType 'next!' to close it anyway.",
                    closing.unwrap_or_else(|| "The round".to_string()),
                    unscored.len(),
                    names.join(", ")
                ))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn hype(&self) -> Result<String> {
        let Some(narrator) = &self.narrator else {
            return Ok(narrative_disabled());
        };
        let round = self
            .tournament
            .current_round()
            .ok_or_else(|| anyhow!("The tournament has not started"))?;

        let request = round_hype_request(
            &self.tournament.round_label(round.number),
            &round.tables,
            self.tournament.participants(),
            &self.tournament.standings(),
        );
        let outcome = narrate(narrator.as_ref(), &request, &self.retry).await;
        Ok(render_narrative(&outcome))
    }

    async fn report(&self) -> Result<String> {
        let Some(narrator) = &self.narrator else {
            return Ok(narrative_disabled());
        };
        if self.tournament.phase() != TournamentPhase::Completed {
            bail!("The final report is available once the tournament has completed");
        }

        let rounds_played = self.tournament.rounds().len();
        let request = final_report_request(&self.tournament.standings(), rounds_played)
            .ok_or_else(|| anyhow!("No participants to report on"))?;
        let outcome = narrate(narrator.as_ref(), &request, &self.retry).await;
        Ok(render_narrative(&outcome))
    }

    // === Lookups ===

    fn name(&self, id: ParticipantId) -> &str {
        self.tournament
            .participant(id)
            .map_or("unknown", |p| p.name.as_str())
    }

    fn participant_at(&self, number: usize) -> Result<ParticipantId> {
        self.tournament
            .participants()
            .get(number.wrapping_sub(1))
            .map(|p| p.id)
            .ok_or_else(|| anyhow!("No participant {number}; type 'list' to see the roster"))
    }

    fn seat_at(&self, table: usize, seat: usize) -> Result<(usize, TableId, ParticipantId)> {
        let index = self
            .tournament
            .current_round_index()
            .ok_or_else(|| anyhow!("The tournament has not started"))?;
        let round = self
            .tournament
            .round(index)
            .ok_or_else(|| anyhow!("Round {} is missing", index + 1))?;
        let table_ref = round
            .tables
            .get(table.wrapping_sub(1))
            .ok_or_else(|| anyhow!("No table {table} this round"))?;
        let id = *table_ref
            .seats
            .get(seat.wrapping_sub(1))
            .ok_or_else(|| anyhow!("Table {table} has no seat {seat}"))?;
        Ok((index, table_ref.id, id))
    }

    // === Rendering ===

    fn render_roster(&self) -> String {
        let participants = self.tournament.participants();
        let mut out = format!(
            "Participants ({}), {}:",
            participants.len(),
            self.tournament.phase()
        );
        for (i, p) in participants.iter().enumerate() {
            let _ = write!(out, "\n  {:>2}. {}", i + 1, p.name);
            if p.bonus != 0 {
                let _ = write!(out, " (bonus {:+})", p.bonus);
            }
        }
        out
    }

    fn render_round(&self) -> String {
        let Some(round) = self.tournament.current_round() else {
            return "The tournament has not started; type 'start' once registration is done"
                .to_string();
        };

        let mut out = self.tournament.round_label(round.number);
        match self.tournament.completed_at() {
            Some(at) => {
                let _ = write!(out, " (completed {})", at.format("%Y-%m-%d %H:%M UTC"));
            }
            None => {
                let unscored = round.unscored_seats().len();
                if unscored > 0 {
                    let _ = write!(out, " ({unscored} unscored)");
                }
            }
        }

        for (t, table) in round.tables.iter().enumerate() {
            let _ = write!(out, "\n  [{}] {}", t + 1, table.label);
            for (s, id) in table.seats.iter().enumerate() {
                let rank = table
                    .rank_of(*id)
                    .map_or_else(|| "-".to_string(), |r| r.to_string());
                let _ = write!(out, "\n      {}. {:<20} {}", s + 1, self.name(*id), rank);
            }
        }
        out
    }
}

fn render_standings(standings: &[Standing]) -> String {
    if standings.is_empty() {
        return "No participants registered".to_string();
    }
    let mut out = format!(
        "{:>4}  {:<20} {:>6} {:>6} {:>6}",
        "Pos", "Name", "Points", "Bonus", "Total"
    );
    for s in standings {
        let _ = write!(
            out,
            "\n{:>4}  {:<20} {:>6} {:>+6} {:>6}",
            s.position, s.name, s.round_points, s.bonus, s.total
        );
    }
    out
}

fn render_narrative(outcome: &NarrativeOutcome) -> String {
    let mut out = outcome.text().to_string();
    if !outcome.sources().is_empty() {
        out.push_str("\n\nSources:");
        for source in outcome.sources() {
            let _ = write!(out, "\n  - {} <{}>", source.title, source.uri);
        }
    }
    out
}

fn narrative_disabled() -> String {
    "Narrative generation is not configured; set NARRATIVE_API_KEY to enable it".to_string()
}

/// Settings where a saved tournament differs from the configured ones
fn config_drift(saved: &TournamentConfig, configured: &TournamentConfig) -> Vec<String> {
    let mut drift = Vec::new();
    let mut compare = |name: &str, saved: usize, configured: usize| {
        if saved != configured {
            drift.push(format!("{name} {saved} (saved) vs {configured}"));
        }
    };
    compare(
        "qualifying_rounds",
        saved.qualifying_rounds as usize,
        configured.qualifying_rounds as usize,
    );
    compare("finals_size", saved.finals_size, configured.finals_size);
    compare(
        "min_participants",
        saved.min_participants,
        configured.min_participants,
    );
    compare(
        "max_pairing_trials",
        saved.max_pairing_trials,
        configured.max_pairing_trials,
    );
    drift
}

//! Tournament state machine: registration, swiss rounds, finals, completion.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use log::{info, warn};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::config::TournamentConfig;
use super::errors::{TournamentError, TournamentResult};
use super::models::{
    AdvanceOutcome, Participant, ParticipantId, Round, Table, TableId, TournamentPhase,
};
use crate::pairing::{PairingOptimizer, TableSize, allocate_tables};
use crate::scoring::Rank;
use crate::standings::{Standing, compute_standings, top_participants};

/// Label given to the single finals table
pub const FINAL_TABLE_LABEL: &str = "Final Table";

/// A single tournament: roster, append-only rounds and phase
///
/// All mutation goes through the methods below. Each method validates first
/// and only then mutates, so a returned error means nothing changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tournament {
    config: TournamentConfig,
    phase: TournamentPhase,
    participants: Vec<Participant>,
    rounds: Vec<Round>,
    /// Index into `rounds` of the round being played
    current_round: usize,
    created_at: DateTime<Utc>,
    started_at: Option<DateTime<Utc>>,
    completed_at: Option<DateTime<Utc>>,
}

impl Default for Tournament {
    fn default() -> Self {
        Self::with_valid_config(TournamentConfig::default())
    }
}

impl Tournament {
    /// Create an empty tournament in registration
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the configuration does not validate.
    pub fn new(config: TournamentConfig) -> TournamentResult<Self> {
        config.validate()?;
        Ok(Self::with_valid_config(config))
    }

    fn with_valid_config(config: TournamentConfig) -> Self {
        Self {
            config,
            phase: TournamentPhase::Registration,
            participants: Vec::new(),
            rounds: Vec::new(),
            current_round: 0,
            created_at: Utc::now(),
            started_at: None,
            completed_at: None,
        }
    }

    // === Queries ===

    #[must_use]
    pub fn config(&self) -> &TournamentConfig {
        &self.config
    }

    #[must_use]
    pub fn phase(&self) -> TournamentPhase {
        self.phase
    }

    #[must_use]
    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    #[must_use]
    pub fn participant(&self, id: ParticipantId) -> Option<&Participant> {
        self.participants.iter().find(|p| p.id == id)
    }

    #[must_use]
    pub fn rounds(&self) -> &[Round] {
        &self.rounds
    }

    #[must_use]
    pub fn round(&self, index: usize) -> Option<&Round> {
        self.rounds.get(index)
    }

    /// Index of the round being played, if the tournament has started
    #[must_use]
    pub fn current_round_index(&self) -> Option<usize> {
        (!self.rounds.is_empty()).then_some(self.current_round)
    }

    #[must_use]
    pub fn current_round(&self) -> Option<&Round> {
        self.rounds.get(self.current_round)
    }

    #[must_use]
    pub fn current_round_number(&self) -> Option<u32> {
        self.current_round().map(|r| r.number)
    }

    /// Display name of a round number: "Round n" or "Finals"
    #[must_use]
    pub fn round_label(&self, number: u32) -> String {
        if number > self.config.qualifying_rounds {
            "Finals".to_string()
        } else {
            format!("Round {number}")
        }
    }

    /// Seats of the current round without a rank
    #[must_use]
    pub fn unscored_seats(&self) -> Vec<(TableId, ParticipantId)> {
        self.current_round()
            .map(Round::unscored_seats)
            .unwrap_or_default()
    }

    /// Standings over every round recorded so far
    #[must_use]
    pub fn standings(&self) -> Vec<Standing> {
        compute_standings(&self.participants, &self.rounds)
    }

    /// Overall leader once the finals have closed
    #[must_use]
    pub fn champion(&self) -> Option<Standing> {
        if self.phase != TournamentPhase::Completed {
            return None;
        }
        self.standings().into_iter().next()
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    #[must_use]
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    // === Registration ===

    /// Register a participant
    ///
    /// # Errors
    ///
    /// Returns `InvalidPhase` after the tournament has started, or
    /// `InvalidName` for a blank name.
    pub fn add_participant(&mut self, name: &str) -> TournamentResult<ParticipantId> {
        self.expect_phase(TournamentPhase::Registration)?;

        let name = name.trim();
        if name.is_empty() {
            return Err(TournamentError::InvalidName);
        }

        let participant = Participant::new(name);
        let id = participant.id;
        self.participants.push(participant);
        Ok(id)
    }

    /// Register one participant per non-blank line of `text`
    ///
    /// # Errors
    ///
    /// Returns `InvalidPhase` after the tournament has started.
    pub fn add_participants_from_lines(
        &mut self,
        text: &str,
    ) -> TournamentResult<Vec<ParticipantId>> {
        self.expect_phase(TournamentPhase::Registration)?;

        let added: Vec<Participant> = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(Participant::new)
            .collect();
        let ids = added.iter().map(|p| p.id).collect();
        self.participants.extend(added);
        Ok(ids)
    }

    /// Remove a participant before the tournament starts
    ///
    /// # Errors
    ///
    /// Returns `InvalidPhase` after the tournament has started, or
    /// `ParticipantNotFound`.
    pub fn remove_participant(&mut self, id: ParticipantId) -> TournamentResult<Participant> {
        self.expect_phase(TournamentPhase::Registration)?;

        let index = self
            .participants
            .iter()
            .position(|p| p.id == id)
            .ok_or(TournamentError::ParticipantNotFound(id))?;
        Ok(self.participants.remove(index))
    }

    // === Play ===

    /// Leave registration and pair round 1
    ///
    /// # Errors
    ///
    /// Returns `InvalidPhase` outside registration, or
    /// `InsufficientParticipants` if the roster is too small.
    pub fn start<R: Rng + ?Sized>(&mut self, rng: &mut R) -> TournamentResult<&Round> {
        self.expect_phase(TournamentPhase::Registration)?;

        if self.participants.len() < self.config.min_participants {
            return Err(TournamentError::InsufficientParticipants {
                needed: self.config.min_participants,
                current: self.participants.len(),
            });
        }

        let tables = self.pair_next_round(rng)?;

        self.rounds.push(Round::new(1, tables, false));
        self.current_round = 0;
        self.phase = TournamentPhase::Active;
        self.started_at = Some(Utc::now());

        info!(
            "Tournament started with {} participants",
            self.participants.len()
        );
        Ok(&self.rounds[0])
    }

    /// Record a finish rank for a seated participant
    ///
    /// Re-recording the same participant overwrites their previous rank.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPhase` unless active, `RoundNotFound`, `TableNotFound`,
    /// `NotSeated`, `InvalidRank` if the rank exceeds the table size, or
    /// `DuplicateRank` if another seat already holds it.
    pub fn record_rank(
        &mut self,
        round_index: usize,
        table_id: TableId,
        participant_id: ParticipantId,
        rank: u8,
    ) -> TournamentResult<()> {
        self.expect_phase(TournamentPhase::Active)?;
        let table = self.seated_table_mut(round_index, table_id, participant_id)?;

        let table_size = table.seats.len();
        let rank = Rank::new(rank)
            .filter(|r| usize::from(r.get()) <= table_size)
            .ok_or(TournamentError::InvalidRank { rank, table_size })?;

        if let Some((&holder, _)) = table
            .ranks
            .iter()
            .find(|&(&holder, &held)| held == rank && holder != participant_id)
        {
            return Err(TournamentError::DuplicateRank {
                rank: rank.get(),
                holder,
            });
        }

        table.ranks.insert(participant_id, rank);
        Ok(())
    }

    /// Remove a recorded rank, returning it if there was one
    ///
    /// # Errors
    ///
    /// Same lookup errors as [`record_rank`](Self::record_rank).
    pub fn clear_rank(
        &mut self,
        round_index: usize,
        table_id: TableId,
        participant_id: ParticipantId,
    ) -> TournamentResult<Option<Rank>> {
        self.expect_phase(TournamentPhase::Active)?;
        let table = self.seated_table_mut(round_index, table_id, participant_id)?;
        Ok(table.ranks.remove(&participant_id))
    }

    /// Add `delta` to a participant's bonus, returning the new bonus
    ///
    /// # Errors
    ///
    /// Returns `ParticipantNotFound`.
    pub fn adjust_bonus(
        &mut self,
        participant_id: ParticipantId,
        delta: i64,
    ) -> TournamentResult<i64> {
        let participant = self.participant_mut(participant_id)?;
        participant.bonus = participant.bonus.saturating_add(delta);
        Ok(participant.bonus)
    }

    /// Overwrite a participant's bonus
    ///
    /// # Errors
    ///
    /// Returns `ParticipantNotFound`.
    pub fn set_bonus(&mut self, participant_id: ParticipantId, bonus: i64) -> TournamentResult<()> {
        self.participant_mut(participant_id)?.bonus = bonus;
        Ok(())
    }

    /// Close the current round and move on
    ///
    /// After a qualifying round before the last, a new round is paired against
    /// the full history. After the last qualifying round, the top of the
    /// standings is seated at a single finals table. After the finals, the
    /// tournament completes.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPhase` unless active, and `IncompleteRound` if seats are
    /// unscored and `force_if_incomplete` is false.
    pub fn advance_round<R: Rng + ?Sized>(
        &mut self,
        force_if_incomplete: bool,
        rng: &mut R,
    ) -> TournamentResult<AdvanceOutcome> {
        self.expect_phase(TournamentPhase::Active)?;
        let current = self
            .current_round()
            .ok_or(TournamentError::RoundNotFound(self.current_round))?;

        let unscored = current.unscored_seats();
        if !unscored.is_empty() {
            if !force_if_incomplete {
                return Err(TournamentError::IncompleteRound { unscored });
            }
            warn!(
                "Closing round {} with {} unscored seat(s)",
                current.number,
                unscored.len()
            );
        }

        let closed_number = current.number;

        if current.is_final {
            self.phase = TournamentPhase::Completed;
            self.completed_at = Some(Utc::now());
            info!("Tournament completed after {} rounds", self.rounds.len());
            return Ok(AdvanceOutcome::Completed);
        }

        if closed_number < self.config.qualifying_rounds {
            let tables = self.pair_next_round(rng)?;
            self.push_round(Round::new(closed_number + 1, tables, false));
            info!("Round {} paired", closed_number + 1);
            return Ok(AdvanceOutcome::NextRound(closed_number + 1));
        }

        let finalists = top_participants(&self.standings(), self.config.finals_size);
        let table = Table::new(TableId::from_rng(rng), FINAL_TABLE_LABEL, finalists.clone());
        self.push_round(Round::new(closed_number + 1, vec![table], true));
        info!("Finals seeded with {} participants", finalists.len());
        Ok(AdvanceOutcome::FinalsSeeded(finalists))
    }

    /// Discard everything and return to an empty registration
    pub fn reset(&mut self) {
        *self = Self::with_valid_config(self.config.clone());
        info!("Tournament reset");
    }

    /// Check a tournament that did not come from `new`, e.g. one loaded from
    /// a save file
    ///
    /// Operations on a tournament that passes can index its rounds and tables
    /// without panicking.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` for a bad configuration and `InvalidState` for
    /// the first broken invariant.
    pub fn validate(&self) -> TournamentResult<()> {
        self.config.validate()?;

        let invalid = |reason: String| Err(TournamentError::InvalidState(reason));

        let mut roster = HashSet::new();
        for participant in &self.participants {
            if !roster.insert(participant.id) {
                return invalid(format!("participant {} listed twice", participant.id));
            }
        }

        if self.rounds.is_empty() {
            if self.phase != TournamentPhase::Registration {
                return invalid(format!("{} tournament has no rounds", self.phase));
            }
            return Ok(());
        }

        if self.phase == TournamentPhase::Registration {
            let count = self.rounds.len();
            return invalid(format!("{count} round(s) recorded during registration"));
        }
        if self.current_round >= self.rounds.len() {
            return invalid(format!(
                "current round index {} but only {} round(s)",
                self.current_round,
                self.rounds.len()
            ));
        }

        for (index, round) in self.rounds.iter().enumerate() {
            if round.is_final && index + 1 != self.rounds.len() {
                return invalid(format!("round {} is final but not the last", round.number));
            }

            let mut seated = HashSet::new();
            for table in &round.tables {
                if TableSize::from_seats(table.seats.len()).is_none() {
                    return invalid(format!(
                        "{} in round {} has {} seats",
                        table.label,
                        round.number,
                        table.seats.len()
                    ));
                }
                for seat in &table.seats {
                    if !roster.contains(seat) {
                        return invalid(format!("seat for unknown participant {seat}"));
                    }
                    if !seated.insert(*seat) {
                        return invalid(format!(
                            "participant {seat} seated twice in round {}",
                            round.number
                        ));
                    }
                }

                let mut ranks_seen = HashSet::new();
                for (participant, rank) in &table.ranks {
                    if !table.is_seated(*participant) {
                        return invalid(format!(
                            "{} ranks unseated participant {participant}",
                            table.label
                        ));
                    }
                    if usize::from(rank.get()) > table.seats.len() {
                        return invalid(format!(
                            "rank {rank} at {} exceeds its {} seats",
                            table.label,
                            table.seats.len()
                        ));
                    }
                    if !ranks_seen.insert(*rank) {
                        return invalid(format!("rank {rank} held twice at {}", table.label));
                    }
                }
            }
        }

        Ok(())
    }

    // === Helpers ===

    fn expect_phase(&self, expected: TournamentPhase) -> TournamentResult<()> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(TournamentError::InvalidPhase {
                expected,
                actual: self.phase,
            })
        }
    }

    fn participant_mut(&mut self, id: ParticipantId) -> TournamentResult<&mut Participant> {
        self.participants
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(TournamentError::ParticipantNotFound(id))
    }

    fn seated_table_mut(
        &mut self,
        round_index: usize,
        table_id: TableId,
        participant_id: ParticipantId,
    ) -> TournamentResult<&mut Table> {
        let table = self
            .rounds
            .get_mut(round_index)
            .ok_or(TournamentError::RoundNotFound(round_index))?
            .table_mut(table_id)
            .ok_or(TournamentError::TableNotFound(table_id))?;

        if !table.is_seated(participant_id) {
            return Err(TournamentError::NotSeated {
                participant: participant_id,
                table: table_id,
            });
        }
        Ok(table)
    }

    fn pair_next_round<R: Rng + ?Sized>(&self, rng: &mut R) -> TournamentResult<Vec<Table>> {
        let roster: Vec<ParticipantId> = self.participants.iter().map(|p| p.id).collect();
        let structure = allocate_tables(roster.len())?;
        let optimizer = PairingOptimizer::new(self.config.max_pairing_trials);
        Ok(optimizer.generate_pairing(&roster, &structure, &self.rounds, rng)?)
    }

    fn push_round(&mut self, round: Round) {
        self.rounds.push(round);
        self.current_round = self.rounds.len() - 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    fn registered(n: usize) -> Tournament {
        let mut tournament = Tournament::default();
        for i in 0..n {
            tournament.add_participant(&format!("Player {i}")).unwrap();
        }
        tournament
    }

    /// Rank every seat of the current round in seating order
    fn score_current_round(tournament: &mut Tournament) {
        let index = tournament.current_round_index().unwrap();
        let tables: Vec<(TableId, Vec<ParticipantId>)> = tournament
            .current_round()
            .unwrap()
            .tables
            .iter()
            .map(|t| (t.id, t.seats.clone()))
            .collect();
        for (table_id, seats) in tables {
            for (i, participant) in seats.into_iter().enumerate() {
                tournament
                    .record_rank(index, table_id, participant, (i + 1) as u8)
                    .unwrap();
            }
        }
    }

    #[test]
    fn test_start_requires_three() {
        let mut tournament = registered(2);
        let mut rng = StdRng::seed_from_u64(1);
        let err = tournament.start(&mut rng).unwrap_err();
        assert_eq!(
            err,
            TournamentError::InsufficientParticipants {
                needed: 3,
                current: 2
            }
        );
        assert_eq!(tournament.phase(), TournamentPhase::Registration);
        assert!(tournament.rounds().is_empty());
    }

    #[test]
    fn test_start_pairs_round_one() {
        let mut tournament = registered(10);
        let mut rng = StdRng::seed_from_u64(1);
        let round = tournament.start(&mut rng).unwrap();
        assert_eq!(round.number, 1);
        assert!(!round.is_final);
        assert_eq!(round.tables.len(), 2);
        assert_eq!(tournament.phase(), TournamentPhase::Active);
        assert!(tournament.started_at().is_some());
    }

    #[test]
    fn test_registration_closed_after_start() {
        let mut tournament = registered(4);
        let mut rng = StdRng::seed_from_u64(1);
        tournament.start(&mut rng).unwrap();

        let id = tournament.participants()[0].id;
        assert!(matches!(
            tournament.add_participant("Late"),
            Err(TournamentError::InvalidPhase { .. })
        ));
        assert!(matches!(
            tournament.remove_participant(id),
            Err(TournamentError::InvalidPhase { .. })
        ));
    }

    #[test]
    fn test_blank_name_rejected() {
        let mut tournament = Tournament::default();
        assert_eq!(
            tournament.add_participant("   "),
            Err(TournamentError::InvalidName)
        );
    }

    #[test]
    fn test_bulk_registration_skips_blank_lines() {
        let mut tournament = Tournament::default();
        let ids = tournament
            .add_participants_from_lines("Alice\n\n  Bob  \n   \nCara\n")
            .unwrap();
        assert_eq!(ids.len(), 3);
        let names: Vec<_> = tournament
            .participants()
            .iter()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(names, vec!["Alice", "Bob", "Cara"]);
    }

    #[test]
    fn test_rank_validation() {
        let mut tournament = registered(3);
        let mut rng = StdRng::seed_from_u64(4);
        tournament.start(&mut rng).unwrap();

        let table = tournament.current_round().unwrap().tables[0].clone();
        let (a, b) = (table.seats[0], table.seats[1]);

        assert_eq!(
            tournament.record_rank(0, table.id, a, 4),
            Err(TournamentError::InvalidRank {
                rank: 4,
                table_size: 3
            })
        );
        assert_eq!(
            tournament.record_rank(0, table.id, a, 0),
            Err(TournamentError::InvalidRank {
                rank: 0,
                table_size: 3
            })
        );

        tournament.record_rank(0, table.id, a, 1).unwrap();
        assert_eq!(
            tournament.record_rank(0, table.id, b, 1),
            Err(TournamentError::DuplicateRank { rank: 1, holder: a })
        );

        // Re-recording your own rank is an overwrite
        tournament.record_rank(0, table.id, a, 1).unwrap();
        tournament.record_rank(0, table.id, a, 2).unwrap();
        tournament.record_rank(0, table.id, b, 1).unwrap();
    }

    #[test]
    fn test_rank_lookup_errors() {
        let mut tournament = registered(4);
        let mut rng = StdRng::seed_from_u64(4);
        tournament.start(&mut rng).unwrap();
        let table_id = tournament.current_round().unwrap().tables[0].id;
        let seated = tournament.participants()[0].id;
        let stranger = ParticipantId::new();
        let bogus_table = TableId::from_rng(&mut rng);

        assert_eq!(
            tournament.record_rank(5, table_id, seated, 1),
            Err(TournamentError::RoundNotFound(5))
        );
        assert_eq!(
            tournament.record_rank(0, bogus_table, seated, 1),
            Err(TournamentError::TableNotFound(bogus_table))
        );
        assert_eq!(
            tournament.record_rank(0, table_id, stranger, 1),
            Err(TournamentError::NotSeated {
                participant: stranger,
                table: table_id
            })
        );
    }

    #[test]
    fn test_clear_rank() {
        let mut tournament = registered(3);
        let mut rng = StdRng::seed_from_u64(4);
        tournament.start(&mut rng).unwrap();
        let table = tournament.current_round().unwrap().tables[0].clone();

        tournament.record_rank(0, table.id, table.seats[0], 2).unwrap();
        assert_eq!(
            tournament.clear_rank(0, table.id, table.seats[0]),
            Ok(Rank::new(2))
        );
        assert_eq!(tournament.clear_rank(0, table.id, table.seats[0]), Ok(None));
        assert_eq!(tournament.unscored_seats().len(), 3);
    }

    #[test]
    fn test_incomplete_round_needs_force() {
        let mut tournament = registered(8);
        let mut rng = StdRng::seed_from_u64(6);
        tournament.start(&mut rng).unwrap();
        let before = tournament.clone();

        let err = tournament.advance_round(false, &mut rng).unwrap_err();
        match err {
            TournamentError::IncompleteRound { unscored } => assert_eq!(unscored.len(), 8),
            other => panic!("Expected IncompleteRound, got {other:?}"),
        }
        assert_eq!(tournament, before);

        let outcome = tournament.advance_round(true, &mut rng).unwrap();
        assert_eq!(outcome, AdvanceOutcome::NextRound(2));
        assert_eq!(tournament.current_round_number(), Some(2));
    }

    #[test]
    fn test_full_lifecycle() {
        let mut tournament = registered(9);
        let mut rng = StdRng::seed_from_u64(12);
        tournament.start(&mut rng).unwrap();

        for expected in 2..=3 {
            score_current_round(&mut tournament);
            assert_eq!(
                tournament.advance_round(false, &mut rng).unwrap(),
                AdvanceOutcome::NextRound(expected)
            );
        }

        score_current_round(&mut tournament);
        let standings = tournament.standings();
        let outcome = tournament.advance_round(false, &mut rng).unwrap();
        let expected: Vec<_> = standings.iter().take(4).map(|s| s.participant_id).collect();
        assert_eq!(outcome, AdvanceOutcome::FinalsSeeded(expected.clone()));

        let finals = tournament.current_round().unwrap();
        assert!(finals.is_final);
        assert_eq!(finals.number, 4);
        assert_eq!(finals.tables.len(), 1);
        assert_eq!(finals.tables[0].label, FINAL_TABLE_LABEL);
        assert_eq!(finals.tables[0].seats, expected);
        assert_eq!(tournament.round_label(4), "Finals");
        assert_eq!(tournament.round_label(2), "Round 2");

        score_current_round(&mut tournament);
        assert_eq!(
            tournament.advance_round(false, &mut rng).unwrap(),
            AdvanceOutcome::Completed
        );
        assert_eq!(tournament.phase(), TournamentPhase::Completed);
        assert!(tournament.champion().is_some());
        assert!(matches!(
            tournament.advance_round(true, &mut rng),
            Err(TournamentError::InvalidPhase { .. })
        ));
    }

    #[test]
    fn test_bonus_adjustments() {
        let mut tournament = registered(3);
        let id = tournament.participants()[1].id;

        assert_eq!(tournament.adjust_bonus(id, 2), Ok(2));
        assert_eq!(tournament.adjust_bonus(id, -5), Ok(-3));
        tournament.set_bonus(id, 10).unwrap();
        assert_eq!(tournament.standings()[0].participant_id, id);
        assert_eq!(tournament.standings()[0].total, 10);

        let stranger = ParticipantId::new();
        assert_eq!(
            tournament.adjust_bonus(stranger, 1),
            Err(TournamentError::ParticipantNotFound(stranger))
        );
    }

    #[test]
    fn test_reset_clears_everything_but_config() {
        let config = TournamentConfig {
            qualifying_rounds: 2,
            ..TournamentConfig::default()
        };
        let mut tournament = Tournament::new(config.clone()).unwrap();
        tournament.add_participants_from_lines("A\nB\nC\nD").unwrap();
        let id = tournament.participants()[0].id;
        tournament.adjust_bonus(id, 3).unwrap();
        let mut rng = StdRng::seed_from_u64(2);
        tournament.start(&mut rng).unwrap();

        tournament.reset();
        assert_eq!(tournament.phase(), TournamentPhase::Registration);
        assert!(tournament.participants().is_empty());
        assert!(tournament.rounds().is_empty());
        assert!(tournament.current_round().is_none());
        assert_eq!(tournament.config(), &config);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = TournamentConfig {
            finals_size: 7,
            ..TournamentConfig::default()
        };
        assert!(matches!(
            Tournament::new(config),
            Err(TournamentError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_serde_round_trip_preserves_state() {
        let mut tournament = registered(5);
        let mut rng = StdRng::seed_from_u64(3);
        tournament.start(&mut rng).unwrap();
        let table = tournament.current_round().unwrap().tables[0].clone();
        tournament.record_rank(0, table.id, table.seats[0], 1).unwrap();

        let json = serde_json::to_string(&tournament).unwrap();
        let restored: Tournament = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, tournament);
        assert!(restored.validate().is_ok());
    }

    /// Serialize an active tournament, let `edit` corrupt the JSON, and load it
    fn tampered(edit: impl FnOnce(&mut serde_json::Value)) -> Tournament {
        let mut tournament = registered(7);
        tournament.start(&mut StdRng::seed_from_u64(11)).unwrap();
        let mut value = serde_json::to_value(&tournament).unwrap();
        edit(&mut value);
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_validate_accepts_every_phase() {
        let mut tournament = registered(5);
        assert!(tournament.validate().is_ok());

        let mut rng = StdRng::seed_from_u64(8);
        tournament.start(&mut rng).unwrap();
        while tournament.phase() == TournamentPhase::Active {
            score_current_round(&mut tournament);
            tournament.advance_round(false, &mut rng).unwrap();
            assert!(tournament.validate().is_ok());
        }
    }

    #[test]
    fn test_validate_rejects_current_round_out_of_range() {
        let tournament = tampered(|v| v["current_round"] = serde_json::json!(5));
        let err = tournament.validate().unwrap_err();
        assert!(matches!(err, TournamentError::InvalidState(_)));
        assert!(err.to_string().contains("current round index 5"));
    }

    #[test]
    fn test_validate_rejects_oversized_table() {
        let tournament = tampered(|v| {
            let first = v["rounds"][0]["tables"][0]["seats"].clone();
            let second = v["rounds"][0]["tables"][1]["seats"].clone();
            let mut merged = first.as_array().unwrap().clone();
            merged.extend(second.as_array().unwrap().iter().cloned());
            v["rounds"][0]["tables"][0]["seats"] = merged.into();
            v["rounds"][0]["tables"].as_array_mut().unwrap().truncate(1);
        });
        let err = tournament.validate().unwrap_err();
        assert!(err.to_string().contains("has 7 seats"));
    }

    #[test]
    fn test_validate_rejects_duplicate_and_oversized_ranks() {
        let tournament = tampered(|v| {
            let seats = v["rounds"][0]["tables"][0]["seats"].clone();
            let ranks = &mut v["rounds"][0]["tables"][0]["ranks"];
            ranks[seats[0].as_str().unwrap()] = serde_json::json!(2);
            ranks[seats[1].as_str().unwrap()] = serde_json::json!(2);
        });
        let err = tournament.validate().unwrap_err().to_string();
        assert!(err.contains("held twice"), "{err}");

        // Tables of 7 split 4 + 3; rank 4 does not fit the table of three
        let tournament = tampered(|v| {
            let tables = v["rounds"][0]["tables"].as_array_mut().unwrap();
            let small = tables
                .iter_mut()
                .find(|t| t["seats"].as_array().unwrap().len() == 3)
                .unwrap();
            let seat = small["seats"][0].as_str().unwrap().to_string();
            small["ranks"][seat.as_str()] = serde_json::json!(4);
        });
        let err = tournament.validate().unwrap_err().to_string();
        assert!(err.contains("exceeds"), "{err}");
    }

    #[test]
    fn test_validate_rejects_unknown_seat_and_bad_config() {
        let tournament = tampered(|v| {
            v["participants"].as_array_mut().unwrap().remove(0);
        });
        let err = tournament.validate().unwrap_err().to_string();
        assert!(err.contains("unknown participant"), "{err}");

        let tournament = tampered(|v| v["config"]["finals_size"] = serde_json::json!(9));
        assert!(matches!(
            tournament.validate(),
            Err(TournamentError::InvalidConfig(_))
        ));
    }
}

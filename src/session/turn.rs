//! Rounds, turns, drawing and the countdown.
//!
//! A round replays the whole deck. Turns rotate through the fixed player
//! order and the rotation carries over from one round to the next.

use std::time::{SystemTime, UNIX_EPOCH};

use rustc_hash::FxHashSet;

use super::engine::{Session, LOG_TARGET};
use super::state::{TurnRecord, TurnSummary};
use super::timer::TickOutcome;
use crate::cards::{total_points, CardId};
use crate::core::{GameError, GameResult, TeamIndex, MAX_ROUNDS};

/// Outcome of `Session::next_round`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoundAdvance {
    /// The given round has started.
    Advanced { round: u8 },
    /// The final round is over; no further round exists.
    GameComplete,
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}

impl Session {
    /// Start round `round` (1-3) with the full deck in the draw pile.
    ///
    /// The player rotation is not touched.
    pub fn start_round(&mut self, round: u8) -> GameResult<()> {
        if !(1..=MAX_ROUNDS).contains(&round) {
            return Err(GameError::InvalidRound(round));
        }
        if self.state.turn_active {
            return Err(GameError::TurnAlreadyActive);
        }

        self.begin_round(round);
        self.notify();
        Ok(())
    }

    fn begin_round(&mut self, round: u8) {
        let state = &mut self.state;
        state.round = round;
        state.round_in_progress = true;
        state.game_complete = false;
        state.turn_active = false;
        state.current_card = None;
        state.turn_guessed_cards.clear();
        state.turn_skipped_cards.clear();
        state.turn_reshuffled_cards.clear();
        state.guessed_once.clear();
        state.draw_pile = state.deck.iter().map(|c| c.id.clone()).collect();
        state.discard_pile.clear();

        for (_, scores) in state.team_scores.iter_mut() {
            if scores.len() < usize::from(round) {
                scores.resize(usize::from(round), 0);
            }
        }

        tracing::info!(
            target: LOG_TARGET,
            round,
            next_player = ?state.current_player_name(),
            "round started"
        );
    }

    /// Start the current player's turn: draw the first card and start the
    /// countdown.
    pub fn start_turn(&mut self) -> GameResult<()> {
        if self.state.game_complete {
            return Err(GameError::GameAlreadyComplete);
        }
        if self.state.card_selection_phase {
            return Err(GameError::DraftInProgress);
        }
        if self.state.turn_active {
            return Err(GameError::TurnAlreadyActive);
        }
        if self.state.draw_pile.is_empty() {
            return Err(GameError::DeckExhausted);
        }
        if self.state.player_order.is_empty() {
            return Err(GameError::NotConfigured(
                "player order must be generated before starting a turn",
            ));
        }

        let seconds = self.state.configured_timer_seconds();
        self.state.turn_active = true;
        self.state.turn_guessed_cards.clear();
        self.state.turn_skipped_cards.clear();
        self.state.turn_reshuffled_cards.clear();
        self.state.last_turn_summary = None;

        self.draw_card();
        self.state.timer.start(seconds);

        tracing::info!(
            target: LOG_TARGET,
            player = ?self.state.current_player_name(),
            round = self.state.round,
            seconds,
            "turn started"
        );
        self.notify();
        Ok(())
    }

    /// Mark the current card as guessed. A new card is drawn only while
    /// time remains.
    pub fn guess_current(&mut self) -> GameResult<()> {
        if !self.state.turn_active {
            return Err(GameError::NoActiveTurn);
        }
        let card = self.state.current_card.take().ok_or(GameError::NoCurrentCard)?;

        tracing::debug!(target: LOG_TARGET, card = %card.id, points = card.points, "card guessed");
        self.state.turn_guessed_cards.push(card);

        if self.state.timer.has_time_left() {
            self.draw_card();
        }

        self.notify();
        Ok(())
    }

    /// Put the current card aside for this turn and draw another.
    pub fn skip_current(&mut self) -> GameResult<()> {
        if !self.state.turn_active {
            return Err(GameError::NoActiveTurn);
        }
        let card = self.state.current_card.take().ok_or(GameError::NoCurrentCard)?;

        tracing::debug!(target: LOG_TARGET, card = %card.id, "card skipped");
        self.state.turn_skipped_cards.push(card);
        self.draw_card();

        self.notify();
        Ok(())
    }

    /// Draw the next card into the current slot.
    ///
    /// When the pile is empty, the cards skipped during this turn (and only
    /// those) are shuffled back in first.
    fn draw_card(&mut self) {
        let state = &mut self.state;

        if state.draw_pile.is_empty() && !state.turn_skipped_cards.is_empty() {
            let skipped = std::mem::take(&mut state.turn_skipped_cards);
            let mut ids: Vec<CardId> = skipped.iter().map(|c| c.id.clone()).collect();
            self.rng.shuffle(&mut ids);

            tracing::debug!(target: LOG_TARGET, count = ids.len(), "reshuffled skipped cards");
            state.draw_pile.extend(ids);
            state.turn_reshuffled_cards.extend(skipped);
        }

        state.current_card = None;
        while let Some(id) = state.draw_pile.pop_front() {
            let card = state.deck_card(&id).cloned();
            if card.is_some() {
                state.current_card = card;
                break;
            }
            tracing::warn!(target: LOG_TARGET, card = %id, "draw pile id not in deck");
        }
    }

    /// Finish the active turn: score it, log it, return unresolved cards to
    /// the draw pile and pass to the next player.
    pub fn end_turn(&mut self) -> GameResult<TurnSummary> {
        let summary = self.finalize_turn()?;
        self.notify();
        Ok(summary)
    }

    fn finalize_turn(&mut self) -> GameResult<TurnSummary> {
        if !self.state.turn_active {
            return Err(GameError::NoActiveTurn);
        }
        let player = self
            .state
            .player_order
            .get(self.state.current_player_index)
            .cloned()
            .ok_or(GameError::NotConfigured("no current player"))?;
        let team_index = self
            .state
            .team_index_for_player(&player)
            .ok_or(GameError::NotConfigured("current player has no team"))?;

        self.state.timer.stop();

        let configured = self.state.configured_timer_seconds();
        let duration_sec = configured.saturating_sub(self.state.timer_seconds()).max(1);
        let points = total_points(&self.state.turn_guessed_cards);
        let round = self.state.round;

        let scores = &mut self.state.team_scores[team_index];
        let slot = usize::from(round - 1);
        if scores.len() <= slot {
            scores.resize(slot + 1, 0);
        }
        scores[slot] += points;

        let team = &self.state.teams[team_index.index()];
        let record = TurnRecord {
            team_id: team.id.clone(),
            round,
            guessed_card_ids: self.state.turn_guessed_cards.iter().map(|c| c.id.clone()).collect(),
            skipped_card_ids: self.state.turn_skipped_cards.iter().map(|c| c.id.clone()).collect(),
            duration_sec,
            timestamp: now_millis(),
        };
        let summary = TurnSummary {
            player_name: player.clone(),
            team_name: team.name.clone(),
            guessed_count: self.state.turn_guessed_cards.len(),
            skipped_count: self.state.turn_skipped_cards.len(),
            points,
            guessed_cards: self.state.turn_guessed_cards.clone(),
            skipped_cards: self.state.turn_skipped_cards.clone(),
        };

        self.state.history.push_back(record);
        self.state
            .guessed_once
            .extend(self.state.turn_guessed_cards.iter().map(|c| c.id.clone()));

        let returned = self.return_unresolved_cards();

        let state = &mut self.state;
        state.last_turn_summary = Some(summary.clone());
        state.turn_active = false;
        state.current_card = None;
        state.turn_guessed_cards.clear();
        state.turn_skipped_cards.clear();
        state.turn_reshuffled_cards.clear();
        state.current_player_index = (state.current_player_index + 1) % state.player_order.len();
        self.sync_current_team();

        tracing::info!(
            target: LOG_TARGET,
            %player,
            team = %team_index,
            round,
            points,
            duration_sec,
            returned,
            "turn ended"
        );
        Ok(summary)
    }

    /// Insert this turn's skipped cards and any in-flight card at random
    /// positions in the draw pile, skipping ids already there.
    fn return_unresolved_cards(&mut self) -> usize {
        let state = &mut self.state;
        let mut present: FxHashSet<CardId> = state.draw_pile.iter().cloned().collect();

        let unresolved = state
            .turn_skipped_cards
            .iter()
            .chain(state.current_card.as_ref())
            .map(|c| c.id.clone());

        let mut returned = 0;
        for id in unresolved {
            if present.insert(id.clone()) {
                let position = self.rng.insert_position(state.draw_pile.len());
                state.draw_pile.insert(position, id);
                returned += 1;
            }
        }
        returned
    }

    /// Move from round 1 to 2 or 2 to 3. From round 3 the game ends instead.
    ///
    /// A turn still in progress is ended first so its points count toward
    /// the round being left. Only a round that was started can be left.
    pub fn next_round(&mut self) -> GameResult<RoundAdvance> {
        let started = self.state.round_in_progress || self.state.game_complete;
        if self.state.deck.is_empty() || !started {
            return Err(GameError::NotConfigured(
                "a round must be started before advancing to the next",
            ));
        }
        if self.state.turn_active {
            self.finalize_turn()?;
        }

        let outcome = if self.state.round >= MAX_ROUNDS {
            self.state.game_complete = true;
            self.state.round_in_progress = false;
            tracing::info!(
                target: LOG_TARGET,
                totals = ?TeamIndex::all().map(|t| self.state.team_total(t)).collect::<Vec<_>>(),
                "game complete"
            );
            RoundAdvance::GameComplete
        } else {
            let round = self.state.round + 1;
            self.begin_round(round);
            RoundAdvance::Advanced { round }
        };

        self.notify();
        Ok(outcome)
    }

    /// Advance the countdown by one second. Called by the host once per
    /// second; does nothing when no countdown is running.
    pub fn tick(&mut self) -> TickOutcome {
        let outcome = self.state.timer.tick();
        match outcome {
            TickOutcome::Idle => return outcome,
            TickOutcome::Expired => {
                tracing::info!(
                    target: LOG_TARGET,
                    player = ?self.state.current_player_name(),
                    "turn timer expired"
                );
            }
            TickOutcome::Running { .. } => {}
        }
        self.notify();
        outcome
    }

    /// Stop the countdown and restore the configured turn length.
    pub fn reset_timer(&mut self) {
        let seconds = self.state.configured_timer_seconds();
        self.state.timer.reset(seconds);
        self.notify();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Card, CardCatalog};
    use crate::core::{GameConfig, Team};
    use std::collections::VecDeque;
    use std::sync::Arc;

    fn ids(list: &[&str]) -> VecDeque<CardId> {
        list.iter().map(|s| CardId::new(*s)).collect()
    }

    /// Configured two-player session with a hand-built deck and round 1 started.
    fn session_with_deck(deck: &[(&str, u8)], seconds: u32) -> Session {
        let catalog = Arc::new(CardCatalog::default());
        let mut session = Session::with_seed(catalog, 99);
        session
            .configure(
                GameConfig::new()
                    .with_team(Team::new("t1", "Tigers").with_player("A"))
                    .with_team(Team::new("t2", "Lions").with_player("B"))
                    .with_category("Bollywood")
                    .with_deck_size(deck.len().max(1))
                    .with_timer_seconds(seconds),
            )
            .unwrap();
        session.generate_player_order().unwrap();
        session.state.deck = deck
            .iter()
            .map(|(id, points)| Card::new(*id, id.to_uppercase(), "Bollywood", *points))
            .collect();
        session.start_round(1).unwrap();
        session
    }

    #[test]
    fn test_start_round_rejects_bad_numbers() {
        let mut session = session_with_deck(&[("a", 1)], 30);
        assert_eq!(session.start_round(0), Err(GameError::InvalidRound(0)));
        assert_eq!(session.start_round(4), Err(GameError::InvalidRound(4)));
        assert_eq!(session.state().round, 1);
    }

    #[test]
    fn test_start_round_creates_zero_baseline() {
        let mut session = session_with_deck(&[("a", 1)], 30);
        session.start_round(3).unwrap();
        for team in TeamIndex::all() {
            assert_eq!(session.state().team_scores[team].as_slice(), &[0, 0, 0]);
        }
    }

    #[test]
    fn test_turn_preconditions() {
        let mut session = session_with_deck(&[("a", 1)], 30);
        assert_eq!(session.guess_current(), Err(GameError::NoActiveTurn));
        assert_eq!(session.skip_current(), Err(GameError::NoActiveTurn));
        assert!(matches!(session.end_turn(), Err(GameError::NoActiveTurn)));

        session.start_turn().unwrap();
        assert_eq!(session.start_turn(), Err(GameError::TurnAlreadyActive));

        session.guess_current().unwrap();
        assert_eq!(session.guess_current(), Err(GameError::NoCurrentCard));
        assert_eq!(session.skip_current(), Err(GameError::NoCurrentCard));
    }

    #[test]
    fn test_start_turn_on_empty_pile() {
        let mut session = session_with_deck(&[("a", 1)], 30);
        session.start_turn().unwrap();
        session.guess_current().unwrap();
        session.end_turn().unwrap();

        assert_eq!(session.start_turn(), Err(GameError::DeckExhausted));
    }

    #[test]
    fn test_single_card_guess_empties_pile() {
        let mut session = session_with_deck(&[("a", 2)], 30);
        session.start_turn().unwrap();
        session.guess_current().unwrap();

        let state = session.state();
        assert!(state.draw_pile.is_empty());
        assert!(state.current_card.is_none());
        assert!(state.turn_reshuffled_cards.is_empty());
        assert_eq!(state.turn_guessed_cards.len(), 1);
    }

    #[test]
    fn test_skips_then_reshuffle() {
        let mut session = session_with_deck(&[("a", 1), ("b", 1), ("c", 1)], 30);
        session.start_turn().unwrap();

        session.skip_current().unwrap();
        session.skip_current().unwrap();
        assert_eq!(session.state().turn_skipped_cards.len(), 2);

        // Third skip empties the pile and recycles all three skipped cards.
        session.skip_current().unwrap();

        let state = session.state();
        assert!(state.turn_skipped_cards.is_empty());
        assert_eq!(state.turn_reshuffled_cards.len(), 3);
        let current = state.current_card.as_ref().unwrap();
        assert!(["a", "b", "c"].contains(&current.id.as_str()));

        let mut remaining: Vec<_> = state.draw_pile.iter().cloned().collect();
        remaining.push(current.id.clone());
        remaining.sort();
        assert_eq!(remaining, ids(&["a", "b", "c"]).into_iter().collect::<Vec<_>>());
    }

    #[test]
    fn test_guess_after_expiry_does_not_draw() {
        let mut session = session_with_deck(&[("a", 1), ("b", 1)], 2);
        session.start_turn().unwrap();
        assert!(matches!(session.tick(), TickOutcome::Running { remaining: 1 }));
        assert_eq!(session.tick(), TickOutcome::Expired);

        session.guess_current().unwrap();
        let state = session.state();
        assert!(state.current_card.is_none());
        assert_eq!(state.draw_pile.len(), 1);
        assert!(state.turn_active);
    }

    #[test]
    fn test_end_turn_scores_and_returns_cards() {
        let mut session = session_with_deck(&[("a", 3), ("b", 1), ("c", 2), ("d", 4)], 30);
        session.state.draw_pile = ids(&["a", "b", "c", "d"]);

        session.start_turn().unwrap();
        session.guess_current().unwrap(); // a
        session.skip_current().unwrap(); // b
        session.tick();
        session.tick();

        let summary = session.end_turn().unwrap();
        assert_eq!(summary.player_name, session.state().player_order[0]);
        assert_eq!(summary.points, 3);
        assert_eq!(summary.guessed_count, 1);
        assert_eq!(summary.skipped_count, 1);

        let state = session.state();
        assert!(!state.turn_active);
        assert!(!state.timer.is_running());
        assert_eq!(state.current_player_index, 1);
        assert_eq!(state.current_team_index, 1);
        assert_eq!(state.round_score(TeamIndex::new(0), 1), 3);
        assert_eq!(state.round_score(TeamIndex::new(1), 1), 0);

        // b (skipped) and c (in flight) go back; d never left.
        let mut pile: Vec<_> = state.draw_pile.iter().map(|c| c.as_str()).collect();
        pile.sort_unstable();
        assert_eq!(pile, vec!["b", "c", "d"]);
        assert!(state.guessed_once.contains(&CardId::new("a")));

        let record = state.history.last().unwrap();
        assert_eq!(record.team_id.as_str(), "t1");
        assert_eq!(record.round, 1);
        assert_eq!(record.duration_sec, 2);
        assert_eq!(record.guessed_card_ids, vec![CardId::new("a")]);
        assert_eq!(record.skipped_card_ids, vec![CardId::new("b")]);
        assert_eq!(state.last_turn_summary.as_ref(), Some(&summary));
    }

    #[test]
    fn test_immediate_end_has_minimum_duration() {
        let mut session = session_with_deck(&[("a", 1), ("b", 1)], 30);
        session.start_turn().unwrap();
        session.end_turn().unwrap();

        let state = session.state();
        assert_eq!(state.history[0].duration_sec, 1);
        assert_eq!(state.draw_pile.len(), 2);
    }

    #[test]
    fn test_reshuffled_cards_not_returned_twice() {
        let mut session = session_with_deck(&[("a", 1), ("b", 1)], 30);
        session.start_turn().unwrap();
        session.skip_current().unwrap();
        session.skip_current().unwrap(); // reshuffle: both back in the pile
        session.end_turn().unwrap();

        let state = session.state();
        let mut pile: Vec<_> = state.draw_pile.iter().map(|c| c.as_str()).collect();
        pile.sort_unstable();
        assert_eq!(pile, vec!["a", "b"]);
    }

    #[test]
    fn test_next_round_finalizes_active_turn() {
        let mut session = session_with_deck(&[("a", 4), ("b", 1)], 30);
        session.state.draw_pile = ids(&["a", "b"]);
        session.start_turn().unwrap();
        session.guess_current().unwrap();

        let outcome = session.next_round().unwrap();
        assert_eq!(outcome, RoundAdvance::Advanced { round: 2 });

        let state = session.state();
        assert!(!state.turn_active);
        assert!(state.turn_guessed_cards.is_empty());
        assert!(state.guessed_once.is_empty());
        assert_eq!(state.round_score(TeamIndex::new(0), 1), 4);
        assert_eq!(state.round_score(TeamIndex::new(0), 2), 0);
        assert_eq!(state.draw_pile.len(), 2);
        assert_eq!(state.current_player_index, 1);
    }

    #[test]
    fn test_next_round_after_third_completes_game() {
        let mut session = session_with_deck(&[("a", 1)], 30);
        assert_eq!(session.next_round().unwrap(), RoundAdvance::Advanced { round: 2 });
        assert_eq!(session.next_round().unwrap(), RoundAdvance::Advanced { round: 3 });
        assert_eq!(session.next_round().unwrap(), RoundAdvance::GameComplete);

        let state = session.state();
        assert_eq!(state.round, 3);
        assert!(state.game_complete);
        assert_eq!(session.phase(), crate::session::GamePhase::GameComplete);
    }

    #[test]
    fn test_start_round_refused_mid_turn() {
        let mut session = session_with_deck(&[("a", 3), ("b", 1)], 30);
        session.start_turn().unwrap();
        session.guess_current().unwrap();

        assert_eq!(session.start_round(2), Err(GameError::TurnAlreadyActive));
        let state = session.state();
        assert!(state.turn_active);
        assert_eq!(state.round, 1);
        assert_eq!(state.turn_guessed_cards.len(), 1);
    }

    #[test]
    fn test_no_turn_after_game_complete() {
        let mut session = session_with_deck(&[("a", 2), ("b", 1)], 30);
        for _ in 0..3 {
            session.next_round().unwrap();
        }
        assert!(session.state().game_complete);

        assert_eq!(session.start_turn(), Err(GameError::GameAlreadyComplete));
        let state = session.state();
        assert!(!state.turn_active);
        assert_eq!(state.round_score(TeamIndex::new(0), 3), 0);
        assert_eq!(session.next_round(), Ok(RoundAdvance::GameComplete));
    }

    #[test]
    fn test_no_turn_while_drafting() {
        let mut session = session_with_deck(&[("a", 1)], 30);
        session.state.card_selection_phase = true;

        assert_eq!(session.start_turn(), Err(GameError::DraftInProgress));
        assert!(!session.state().turn_active);
        assert!(session.state().current_card.is_none());
    }

    #[test]
    fn test_next_round_requires_started_round() {
        let mut session = Session::with_seed(Arc::new(CardCatalog::default()), 1);
        assert!(matches!(session.next_round(), Err(GameError::NotConfigured(_))));

        let state = session.state();
        assert_eq!(state.round, 1);
        assert!(!state.round_in_progress);
        assert_eq!(session.phase(), crate::session::GamePhase::Setup);

        // A sealed deck alone is not enough; round 1 must have begun.
        let mut session = session_with_deck(&[("a", 1)], 30);
        session.state.round_in_progress = false;
        assert!(matches!(session.next_round(), Err(GameError::NotConfigured(_))));
        assert_eq!(session.state().round, 1);
    }

    #[test]
    fn test_reset_timer() {
        let mut session = session_with_deck(&[("a", 1), ("b", 1)], 10);
        session.start_turn().unwrap();
        session.tick();
        session.reset_timer();

        assert_eq!(session.state().timer_seconds(), 10);
        assert_eq!(session.tick(), TickOutcome::Idle);
    }

    #[test]
    fn test_reset_cancels_timer() {
        let mut session = session_with_deck(&[("a", 1)], 10);
        session.start_turn().unwrap();
        session.reset();

        assert!(!session.state().timer.is_running());
        assert_eq!(session.tick(), TickOutcome::Idle);
    }
}

//! Card draft and deck sealing.
//!
//! Each player in turn order is shown 16 cards nobody has seen before and
//! keeps 8 of them. The kept cards of all players become the deck. A quick
//! deck can be built instead with `build_deck`, skipping the draft.

use std::collections::BTreeSet;

use rustc_hash::FxHashSet;

use super::engine::{Session, LOG_TARGET};
use crate::cards::{Card, CardCatalog, CardId};
use crate::core::{GameError, GameResult, GameRng, CANDIDATES_PER_PLAYER, PICKS_PER_PLAYER};

/// Sample a fresh set of candidates from the configured categories,
/// excluding every card already shown.
fn draw_candidates(
    catalog: &CardCatalog,
    categories: &BTreeSet<String>,
    shown: &[Card],
    rng: &mut GameRng,
) -> GameResult<Vec<Card>> {
    let shown: FxHashSet<&CardId> = shown.iter().map(|c| &c.id).collect();
    let unused: Vec<Card> = catalog
        .cards_in_categories(categories)
        .filter(|c| !shown.contains(&c.id))
        .cloned()
        .collect();

    if unused.len() < CANDIDATES_PER_PLAYER {
        return Err(GameError::InsufficientCards {
            available: unused.len(),
            required: CANDIDATES_PER_PLAYER,
        });
    }

    Ok(rng.sample(&unused, CANDIDATES_PER_PLAYER))
}

impl Session {
    /// Begin the draft with the first player in turn order.
    pub fn start_card_selection(&mut self) -> GameResult<()> {
        let config = self.state.config.as_ref().ok_or(GameError::NotConfigured(
            "game must be configured before starting card selection",
        ))?;
        if self.state.player_order.is_empty() {
            return Err(GameError::NotConfigured(
                "player order must be generated before starting card selection",
            ));
        }
        if self.state.turn_active {
            return Err(GameError::TurnAlreadyActive);
        }
        if self.state.round_in_progress {
            return Err(GameError::RoundInProgress);
        }

        let candidates =draw_candidates(&self.catalog, &config.categories, &[], &mut self.rng)?;

        self.state.card_selection_phase = true;
        self.state.current_player_selection_index = 0;
        self.state.selected_cards.clear();
        self.state.player_selections.clear();
        self.state.all_shown_cards = candidates.clone();
        self.state.current_player_cards = candidates;

        tracing::info!(
            target: LOG_TARGET,
            player = ?self.state.current_player_name(),
            players = self.state.player_order.len(),
            "card selection started"
        );
        self.notify();
        Ok(())
    }

    /// Record the current drafter's picks and move to the next drafter,
    /// sealing the deck after the last one.
    ///
    /// If the next drafter cannot be shown a full set of unseen cards the
    /// picks are rejected with `InsufficientCards` and the draft stays on
    /// the current player.
    pub fn select_cards(&mut self, picks: &[CardId]) -> GameResult<()> {
        if !self.state.card_selection_phase {
            return Err(GameError::NotInDraftPhase);
        }

        if picks.len() != PICKS_PER_PLAYER {
            return Err(GameError::InvalidSelectionSize {
                expected: PICKS_PER_PLAYER,
                actual: picks.len(),
            });
        }
        let mut distinct: FxHashSet<&CardId> = FxHashSet::default();
        if let Some(repeated) = picks.iter().find(|id| !distinct.insert(*id)) {
            return Err(GameError::DuplicateSelection(repeated.clone()));
        }

        let chosen = picks
            .iter()
            .map(|id| {
                self.state
                    .current_player_cards
                    .iter()
                    .find(|c| &c.id == id)
                    .cloned()
                    .ok_or_else(|| GameError::SelectionNotFromOptions(id.clone()))
            })
            .collect::<GameResult<Vec<Card>>>()?;

        let next_index = self.state.current_player_selection_index + 1;
        let next_candidates = if next_index < self.state.player_order.len() {
            let config = self
                .state
                .config
                .as_ref()
                .ok_or(GameError::NotConfigured("draft running without configuration"))?;
            Some(draw_candidates(
                &self.catalog,
                &config.categories,
                &self.state.all_shown_cards,
                &mut self.rng,
            )?)
        } else {
            None
        };

        let player = self.state.player_order[self.state.current_player_selection_index].clone();
        tracing::debug!(target: LOG_TARGET, %player, "cards selected");
        self.state.selected_cards.extend(chosen.iter().cloned());
        self.state.player_selections.insert(player, chosen);
        self.state.current_player_selection_index = next_index;

        match next_candidates {
            Some(candidates) => {
                self.state.all_shown_cards.extend(candidates.iter().cloned());
                self.state.current_player_cards = candidates;
            }
            None => self.finish_card_selection(),
        }

        self.notify();
        Ok(())
    }

    fn finish_card_selection(&mut self) {
        self.state.card_selection_phase = false;
        self.state.deck = self.state.selected_cards.clone();
        self.seal_deck();

        tracing::info!(
            target: LOG_TARGET,
            deck_size = self.state.deck.len(),
            "card selection completed"
        );
    }

    /// Build a random deck of the configured size without a draft, with at
    /// least one card from every category.
    pub fn build_deck(&mut self) -> GameResult<()> {
        let config = self.state.config.as_ref().ok_or(GameError::NotConfigured(
            "game must be configured before building deck",
        ))?;
        if self.state.turn_active {
            return Err(GameError::TurnAlreadyActive);
        }
        if self.state.round_in_progress {
            return Err(GameError::RoundInProgress);
        }
        self.catalog.validate_deck_constraints(
            &config.categories,
            config.deck_size,
            config.min_categories,
        )?;

        let mut deck = Vec::with_capacity(config.deck_size);
        let mut remaining = Vec::new();
        for category in &config.categories {
            let pool: Vec<&Card> = self.catalog.cards_in_category(category).collect();
            let Some(&pick) = self.rng.choose(&pool) else {
                continue;
            };
            deck.push(pick.clone());
            remaining.extend(pool.into_iter().filter(|c| c.id != pick.id).cloned());
        }

        while deck.len() < config.deck_size && !remaining.is_empty() {
            let index = self.rng.gen_range_usize(0..remaining.len());
            deck.push(remaining.swap_remove(index));
        }

        if deck.len() < config.deck_size {
            return Err(GameError::InsufficientCards {
                available: deck.len(),
                required: config.deck_size,
            });
        }

        self.rng.shuffle(&mut deck);

        self.state.card_selection_phase = false;
        self.state.current_player_selection_index = 0;
        self.state.deck = deck;
        self.seal_deck();

        tracing::info!(
            target: LOG_TARGET,
            deck_size = self.state.deck.len(),
            "deck built"
        );
        self.notify();
        Ok(())
    }

    /// Refill the draw pile from the deck and drop transient draft data.
    fn seal_deck(&mut self) {
        self.state.draw_pile = self.state.deck.iter().map(|c| c.id.clone()).collect();
        self.state.discard_pile.clear();
        self.state.current_player_cards.clear();
        self.state.all_shown_cards.clear();
        self.state.current_player_selection_index = 0;
    }
}

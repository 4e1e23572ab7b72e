//! The session object: owns the state, the RNG, the catalog and the
//! listeners, and exposes the command surface.
//!
//! Setup commands live here. Draft commands are in `draft.rs`, round and
//! turn commands in `turn.rs`.

use std::sync::Arc;

use super::observer::{Listeners, Subscription};
use super::order;
use super::state::{GamePhase, SessionState};
use crate::cards::CardCatalog;
use crate::core::{GameConfig, GameError, GameResult, GameRng, TeamIndex, TEAM_COUNT};

pub(crate) const LOG_TARGET: &str = "chhota_pandit::session";

/// A single game session.
///
/// Commands validate before they mutate: an `Err` means nothing changed
/// and no listener was called.
///
/// ## Example
///
/// ```
/// use std::sync::Arc;
/// use chhota_pandit::cards::{Card, CardCatalog};
/// use chhota_pandit::core::{GameConfig, Team};
/// use chhota_pandit::session::Session;
///
/// let cards = (0..40)
///     .map(|i| Card::new(format!("c{i}"), format!("Card {i}"), "Bollywood", 1 + (i % 4) as u8))
///     .collect();
/// let catalog = Arc::new(CardCatalog::new(cards).unwrap());
///
/// let mut session = Session::with_seed(catalog, 1);
/// session
///     .configure(
///         GameConfig::new()
///             .with_team(Team::new("t1", "Tigers").with_player("A"))
///             .with_team(Team::new("t2", "Lions").with_player("B"))
///             .with_category("Bollywood")
///             .with_deck_size(16),
///     )
///     .unwrap();
/// session.generate_player_order().unwrap();
/// session.start_card_selection().unwrap();
///
/// while session.state().card_selection_phase {
///     let picks: Vec<_> = session.state().current_player_cards[..8]
///         .iter()
///         .map(|c| c.id.clone())
///         .collect();
///     session.select_cards(&picks).unwrap();
/// }
///
/// assert_eq!(session.state().deck.len(), 16);
/// ```
pub struct Session {
    pub(crate) catalog: Arc<CardCatalog>,
    pub(crate) state: SessionState,
    pub(crate) listeners: Listeners,
    pub(crate) rng: GameRng,
}

impl Session {
    /// Create a session with an entropy-seeded RNG.
    #[must_use]
    pub fn new(catalog: Arc<CardCatalog>) -> Self {
        Self::with_rng(catalog, GameRng::from_entropy())
    }

    /// Create a session whose every random choice is reproducible.
    #[must_use]
    pub fn with_seed(catalog: Arc<CardCatalog>, seed: u64) -> Self {
        Self::with_rng(catalog, GameRng::new(seed))
    }

    fn with_rng(catalog: Arc<CardCatalog>, rng: GameRng) -> Self {
        tracing::debug!(
            target: LOG_TARGET,
            seed = rng.seed(),
            cards = catalog.len(),
            "session created"
        );
        Self {
            catalog,
            state: SessionState::default(),
            listeners: Listeners::new(),
            rng,
        }
    }

    // === Read side ===

    #[must_use]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    #[must_use]
    pub fn catalog(&self) -> &CardCatalog {
        &self.catalog
    }

    #[must_use]
    pub fn phase(&self) -> GamePhase {
        self.state.phase()
    }

    #[must_use]
    pub fn current_player_name(&self) -> Option<&str> {
        self.state.current_player_name()
    }

    #[must_use]
    pub fn is_round_complete(&self) -> bool {
        self.state.is_round_complete()
    }

    // === Subscriptions ===

    pub fn subscribe(&mut self, listener: impl FnMut(&SessionState) + 'static) -> Subscription {
        self.listeners.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, subscription: Subscription) -> bool {
        self.listeners.unsubscribe(subscription)
    }

    pub(crate) fn notify(&mut self) {
        self.listeners.notify(&self.state);
    }

    // === Setup ===

    /// Install a new configuration, discarding any game in progress.
    pub fn configure(&mut self, config: GameConfig) -> GameResult<()> {
        config.validate()?;

        self.clear_state();
        self.state.timer.reset(config.timer_seconds);
        self.state.teams = config.teams.clone();
        self.state.team_order = config.teams.iter().map(|t| t.id.clone()).collect();
        self.state.current_team_index = 0;

        tracing::info!(
            target: LOG_TARGET,
            teams = ?self.state.team_order,
            categories = ?config.categories,
            deck_size = config.deck_size,
            timer_seconds = config.timer_seconds,
            "session configured"
        );
        self.state.config = Some(config);

        self.notify();
        Ok(())
    }

    /// Shuffle each team and interleave them into the fixed turn order.
    pub fn generate_player_order(&mut self) -> GameResult<()> {
        if self.state.teams.len() != TEAM_COUNT {
            return Err(GameError::NotConfigured(
                "teams must be configured before generating player order",
            ));
        }
        if self.state.card_selection_phase || !self.state.deck.is_empty() {
            return Err(GameError::PlayerOrderLocked);
        }

        let shuffled = order::generate_player_order(
            &mut self.rng,
            &self.state.teams[0].players,
            &self.state.teams[1].players,
        );
        tracing::info!(target: LOG_TARGET, order = ?shuffled, "player order generated");

        self.state.player_order = shuffled;
        self.state.current_player_index = 0;
        self.sync_current_team();

        self.notify();
        Ok(())
    }

    /// Return to the initial state. Listeners stay subscribed.
    pub fn reset(&mut self) {
        self.clear_state();
        tracing::info!(target: LOG_TARGET, "session reset");
        self.notify();
    }

    /// Replace the state with a fresh one, cancelling the countdown but
    /// keeping its handle sequence.
    fn clear_state(&mut self) {
        let mut timer = std::mem::take(&mut self.state.timer);
        timer.reset(crate::core::DEFAULT_TIMER_SECONDS);
        self.state = SessionState {
            timer,
            ..SessionState::default()
        };
    }

    /// Point `current_team_index` at the team of the current player.
    pub(crate) fn sync_current_team(&mut self) {
        let team = self
            .state
            .player_order
            .get(self.state.current_player_index)
            .and_then(|p| self.state.team_index_for_player(p));
        if let Some(TeamIndex(index)) = team {
            self.state.current_team_index = usize::from(index);
        }
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("catalog_size", &self.catalog.len())
            .field("phase", &self.state.phase())
            .field("round", &self.state.round)
            .field("listeners", &self.listeners)
            .finish()
    }
}

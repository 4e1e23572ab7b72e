//! Session state: the single mutable aggregate of a game.
//!
//! The session owns one `SessionState` and is its only writer. Listeners
//! and callers get it by shared reference.
//!
//! ## Card accounting during a round
//!
//! Every deck card is in exactly one place: the draw pile, the current
//! card slot, this turn's skipped or guessed list, or `guessed_once`
//! (guessed in an earlier turn of this round).

use std::collections::{BTreeMap, VecDeque};

use im::Vector;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::timer::Countdown;
use crate::cards::{Card, CardId};
use crate::core::{GameConfig, Team, TeamId, TeamIndex, TeamMap, MAX_ROUNDS};

/// Points per round for one team, indexed by `round - 1`.
pub type RoundScores = SmallVec<[u32; MAX_ROUNDS as usize]>;

/// One completed turn, as stored in the history log.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TurnRecord {
    pub team_id: TeamId,
    pub round: u8,
    pub guessed_card_ids: Vec<CardId>,
    pub skipped_card_ids: Vec<CardId>,
    pub duration_sec: u32,
    /// Milliseconds since the Unix epoch.
    pub timestamp: u64,
}

/// What the last turn achieved, kept for the between-turns screen.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TurnSummary {
    pub player_name: String,
    pub team_name: String,
    pub guessed_count: usize,
    pub skipped_count: usize,
    pub points: u32,
    pub guessed_cards: Vec<Card>,
    pub skipped_cards: Vec<Card>,
}

/// Coarse lifecycle position, derived from the state fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Teams, order or deck not ready yet.
    Setup,
    /// Players are picking their cards.
    Drafting,
    /// Deck sealed, no round started.
    Ready,
    /// Round in progress, waiting for the next player to start.
    TurnIdle,
    TurnActive,
    /// Every deck card has been guessed this round.
    RoundComplete,
    GameComplete,
}

/// Full session state.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    // === Configuration ===
    pub config: Option<GameConfig>,
    pub teams: Vec<Team>,
    /// Team ids in turn-alternation order.
    pub team_order: Vec<TeamId>,
    /// Team of the player whose turn is next.
    pub current_team_index: usize,
    /// All players, interleaved by team. Fixed once generated.
    pub player_order: Vec<String>,

    // === Draft ===
    pub card_selection_phase: bool,
    pub current_player_selection_index: usize,
    /// Candidates shown to the player currently drafting.
    pub current_player_cards: Vec<Card>,
    /// Every candidate shown to any drafting player so far.
    pub all_shown_cards: Vec<Card>,
    pub player_selections: BTreeMap<String, Vec<Card>>,
    pub selected_cards: Vec<Card>,

    // === Deck ===
    pub deck: Vec<Card>,
    /// Cards left to draw this round; front is drawn next.
    pub draw_pile: VecDeque<CardId>,
    pub discard_pile: Vec<CardId>,

    // === Progression ===
    pub round: u8,
    pub round_in_progress: bool,
    pub game_complete: bool,
    /// Index into `player_order`. Carries over between rounds.
    pub current_player_index: usize,
    pub turn_active: bool,
    pub current_card: Option<Card>,

    // === Per-turn scratch ===
    pub turn_guessed_cards: Vec<Card>,
    pub turn_skipped_cards: Vec<Card>,
    /// Skipped cards already cycled back into the draw pile this turn.
    pub turn_reshuffled_cards: Vec<Card>,

    // === Scoring ===
    /// Cards guessed at least once this round.
    pub guessed_once: FxHashSet<CardId>,
    pub team_scores: TeamMap<RoundScores>,
    pub history: Vector<TurnRecord>,
    pub last_turn_summary: Option<TurnSummary>,

    pub timer: Countdown,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            config: None,
            teams: Vec::new(),
            team_order: Vec::new(),
            current_team_index: 0,
            player_order: Vec::new(),
            card_selection_phase: false,
            current_player_selection_index: 0,
            current_player_cards: Vec::new(),
            all_shown_cards: Vec::new(),
            player_selections: BTreeMap::new(),
            selected_cards: Vec::new(),
            deck: Vec::new(),
            draw_pile: VecDeque::new(),
            discard_pile: Vec::new(),
            round: 1,
            round_in_progress: false,
            game_complete: false,
            current_player_index: 0,
            turn_active: false,
            current_card: None,
            turn_guessed_cards: Vec::new(),
            turn_skipped_cards: Vec::new(),
            turn_reshuffled_cards: Vec::new(),
            guessed_once: FxHashSet::default(),
            team_scores: TeamMap::with_default(),
            history: Vector::new(),
            last_turn_summary: None,
            timer: Countdown::default(),
        }
    }
}

impl SessionState {
    /// Player drafting right now, or whose turn it is outside the draft.
    #[must_use]
    pub fn current_player_name(&self) -> Option<&str> {
        let index = if self.card_selection_phase {
            self.current_player_selection_index
        } else {
            self.current_player_index
        };
        self.player_order.get(index).map(String::as_str)
    }

    #[must_use]
    pub fn team_index_for_player(&self, player: &str) -> Option<TeamIndex> {
        self.teams
            .iter()
            .position(|t| t.has_player(player))
            .map(|i| TeamIndex::new(i as u8))
    }

    #[must_use]
    pub fn team_for_player(&self, player: &str) -> Option<&Team> {
        self.teams.iter().find(|t| t.has_player(player))
    }

    #[must_use]
    pub fn current_team(&self) -> Option<&Team> {
        self.current_player_name()
            .and_then(|player| self.team_for_player(player))
    }

    /// Seconds left on the turn countdown.
    #[must_use]
    pub fn timer_seconds(&self) -> u32 {
        self.timer.remaining()
    }

    /// Configured turn length.
    #[must_use]
    pub fn configured_timer_seconds(&self) -> u32 {
        self.config
            .as_ref()
            .map_or(crate::core::DEFAULT_TIMER_SECONDS, |c| c.timer_seconds)
    }

    /// True once every deck card has been guessed this round.
    #[must_use]
    pub fn is_round_complete(&self) -> bool {
        self.guessed_once.len() == self.deck.len()
    }

    #[must_use]
    pub fn round_score(&self, team: TeamIndex, round: u8) -> u32 {
        round
            .checked_sub(1)
            .and_then(|r| self.team_scores[team].get(usize::from(r)).copied())
            .unwrap_or(0)
    }

    /// Sum over every round played so far.
    #[must_use]
    pub fn team_total(&self, team: TeamIndex) -> u32 {
        self.team_scores[team].iter().sum()
    }

    /// Look up a deck card by id.
    #[must_use]
    pub fn deck_card(&self, id: &CardId) -> Option<&Card> {
        self.deck.iter().find(|c| &c.id == id)
    }

    #[must_use]
    pub fn phase(&self) -> GamePhase {
        if self.game_complete {
            GamePhase::GameComplete
        } else if self.card_selection_phase {
            GamePhase::Drafting
        } else if self.turn_active {
            GamePhase::TurnActive
        } else if self.deck.is_empty() {
            GamePhase::Setup
        } else if !self.round_in_progress {
            GamePhase::Ready
        } else if self.is_round_complete() {
            GamePhase::RoundComplete
        } else {
            GamePhase::TurnIdle
        }
    }
}

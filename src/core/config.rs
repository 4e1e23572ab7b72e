//! Game configuration.
//!
//! A `GameConfig` is supplied once per game through `Session::configure`.
//! It is validated as a whole at that boundary, so gameplay code never
//! has to second-guess team or category data.

use std::collections::BTreeSet;

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use super::error::{GameError, GameResult};
use super::team::{Team, TEAM_COUNT};

/// Turn length used when a configuration does not specify one.
pub const DEFAULT_TIMER_SECONDS: u32 = 60;

/// Cards shown to each player during the draft.
pub const CANDIDATES_PER_PLAYER: usize = 16;

/// Cards each player keeps from their candidates.
pub const PICKS_PER_PLAYER: usize = 8;

/// Number of rounds in a game.
pub const MAX_ROUNDS: u8 = 3;

fn default_timer_seconds() -> u32 {
    DEFAULT_TIMER_SECONDS
}

fn default_min_categories() -> usize {
    1
}

/// Complete game configuration.
///
/// ## Example
///
/// ```
/// use chhota_pandit::core::{GameConfig, Team};
///
/// let config = GameConfig::new()
///     .with_team(Team::new("t1", "Tigers").with_players(["A", "B"]))
///     .with_team(Team::new("t2", "Lions").with_players(["C", "D"]))
///     .with_category("Bollywood")
///     .with_deck_size(32)
///     .with_timer_seconds(45);
///
/// assert!(config.validate().is_ok());
/// assert_eq!(config.player_count(), 4);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameConfig {
    /// The two competing teams, in turn-alternation order.
    pub teams: Vec<Team>,

    /// Card categories in play.
    pub categories: BTreeSet<String>,

    /// Deck size for a quick (non-drafted) deck.
    pub deck_size: usize,

    /// Seconds per turn.
    #[serde(default = "default_timer_seconds")]
    pub timer_seconds: u32,

    /// Fewest categories a game may be played with.
    #[serde(default = "default_min_categories")]
    pub min_categories: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            teams: Vec::new(),
            categories: BTreeSet::new(),
            deck_size: 0,
            timer_seconds: DEFAULT_TIMER_SECONDS,
            min_categories: default_min_categories(),
        }
    }
}

impl GameConfig {
    /// Create an empty configuration to be filled with the builder methods.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a configuration from JSON.
    ///
    /// Missing or mistyped fields are reported as `InvalidConfig`.
    pub fn from_json(json: &str) -> GameResult<Self> {
        serde_json::from_str(json).map_err(|e| GameError::InvalidConfig(e.to_string()))
    }

    #[must_use]
    pub fn with_team(mut self, team: Team) -> Self {
        self.teams.push(team);
        self
    }

    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.categories.insert(category.into());
        self
    }

    #[must_use]
    pub fn with_deck_size(mut self, deck_size: usize) -> Self {
        self.deck_size = deck_size;
        self
    }

    #[must_use]
    pub fn with_timer_seconds(mut self, seconds: u32) -> Self {
        self.timer_seconds = seconds;
        self
    }

    #[must_use]
    pub fn with_min_categories(mut self, min: usize) -> Self {
        self.min_categories = min;
        self
    }

    /// Total number of players across both teams.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.teams.iter().map(|t| t.players.len()).sum()
    }

    /// Check every structural requirement of a playable game.
    pub fn validate(&self) -> GameResult<()> {
        let invalid = |msg: String| Err(GameError::InvalidConfig(msg));

        if self.teams.len() != TEAM_COUNT {
            return invalid(format!(
                "exactly {} teams required, got {}",
                TEAM_COUNT,
                self.teams.len()
            ));
        }

        let mut team_ids = FxHashSet::default();
        let mut players = FxHashSet::default();
        for team in &self.teams {
            if team.id.as_str().is_empty() {
                return invalid("team id must not be empty".to_string());
            }
            if !team_ids.insert(team.id.as_str()) {
                return invalid(format!("duplicate team id {}", team.id));
            }
            if team.players.is_empty() {
                return invalid(format!("team {} has no players", team.id));
            }
            for player in &team.players {
                if player.is_empty() {
                    return invalid(format!("team {} has an unnamed player", team.id));
                }
                if !players.insert(player.as_str()) {
                    return invalid(format!("player {} appears more than once", player));
                }
            }
        }

        if self.categories.is_empty() {
            return invalid("at least one category must be selected".to_string());
        }
        if self.categories.len() < self.min_categories {
            return invalid(format!(
                "at least {} categories must be selected",
                self.min_categories
            ));
        }
        if self.deck_size == 0 {
            return invalid("deck size must be positive".to_string());
        }
        if self.timer_seconds == 0 {
            return invalid("timer must be at least one second".to_string());
        }

        Ok(())
    }
}

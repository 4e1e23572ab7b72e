//! Core building blocks: teams, configuration, RNG and errors.
//!
//! Nothing in here knows about rounds or turns; the session module
//! combines these pieces into the game state machine.

pub mod config;
pub mod error;
pub mod rng;
pub mod team;

pub use config::{
    GameConfig, CANDIDATES_PER_PLAYER, DEFAULT_TIMER_SECONDS, MAX_ROUNDS, PICKS_PER_PLAYER,
};
pub use error::{GameError, GameResult};
pub use rng::GameRng;
pub use team::{Team, TeamId, TeamIndex, TeamMap, TEAM_COUNT};

//! # chhota-pandit
//!
//! Game-session engine for a two-team party word-guessing game.
//!
//! Players draft a shared deck of trivia cards, then take timed turns
//! describing cards to their teammates over three rounds. The crate owns
//! the rules and bookkeeping; rendering and the clock live with the host.
//!
//! ## Design Principles
//!
//! 1. **Single writer**: `Session` owns the state and is the only thing that
//!    mutates it. Readers get `&SessionState`.
//!
//! 2. **Validate, then mutate**: a command that returns `Err` has changed
//!    nothing and notified no one.
//!
//! 3. **Reproducible**: all randomness flows through a seeded `GameRng`, so
//!    a seed plus a command sequence replays a game exactly.
//!
//! ## Modules
//!
//! - `core`: Teams, configuration, RNG and errors
//! - `cards`: Card definitions and the catalog
//! - `session`: Draft, rounds, turns, timer and subscriptions

pub mod cards;
pub mod core;
pub mod session;

// Re-export commonly used types
pub use crate::cards::{Card, CardCatalog, CardId};
pub use crate::core::{GameConfig, GameError, GameResult, GameRng, Team, TeamId, TeamIndex};
pub use crate::session::{
    GamePhase, RoundAdvance, Session, SessionState, Subscription, TickOutcome, TurnRecord,
    TurnSummary,
};

//! The game session state machine.
//!
//! ## Lifecycle
//!
//! 1. `configure` with two teams, categories and deck size
//! 2. `generate_player_order`
//! 3. `start_card_selection` then `select_cards` once per player
//!    (or `build_deck` to skip the draft)
//! 4. `start_round(1)`, then turns: `start_turn`, `guess_current` /
//!    `skip_current`, `end_turn`
//! 5. `next_round` until it reports `GameComplete`
//!
//! Every successful command notifies subscribers once.

mod draft;
pub mod engine;
pub mod observer;
pub mod order;
pub mod state;
pub mod timer;
mod turn;

pub use engine::Session;
pub use observer::{Listeners, Subscription};
pub use state::{GamePhase, RoundScores, SessionState, TurnRecord, TurnSummary};
pub use timer::{Countdown, TickOutcome, TimerHandle};
pub use turn::RoundAdvance;

//! Error taxonomy for session commands.
//!
//! Every rejected command leaves the session exactly as it was, so callers
//! can surface the message and retry once the precondition is fixed.

use thiserror::Error;

use crate::cards::CardId;

/// Errors returned by session commands and catalog construction.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("not configured: {0}")]
    NotConfigured(&'static str),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("invalid card catalog: {0}")]
    InvalidCatalog(String),

    #[error("not enough cards: {available} available, {required} required")]
    InsufficientCards { available: usize, required: usize },

    #[error("player order is fixed once the draft has started")]
    PlayerOrderLocked,

    #[error("not in card selection phase")]
    NotInDraftPhase,

    #[error("player must select exactly {expected} cards, got {actual}")]
    InvalidSelectionSize { expected: usize, actual: usize },

    #[error("card {0} is not among the current player's options")]
    SelectionNotFromOptions(CardId),

    #[error("card {0} was selected more than once")]
    DuplicateSelection(CardId),

    #[error("card selection is in progress")]
    DraftInProgress,

    #[error("a round is in progress")]
    RoundInProgress,

    #[error("the game is already complete")]
    GameAlreadyComplete,

    #[error("a turn is already active")]
    TurnAlreadyActive,

    #[error("no cards left in draw pile")]
    DeckExhausted,

    #[error("no active turn")]
    NoActiveTurn,

    #[error("no current card")]
    NoCurrentCard,

    #[error("round must be 1, 2 or 3, got {0}")]
    InvalidRound(u8),
}

/// Result alias used throughout the crate.
pub type GameResult<T> = Result<T, GameError>;

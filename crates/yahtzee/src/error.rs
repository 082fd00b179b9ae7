// ABOUTME: Error types for the yahtzee library.
// ABOUTME: Covers rule violations, malformed input, and unknown games.

use crate::category::Category;
use crate::engine::GameId;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("Game is over")]
    GameOver,

    #[error("Game is already over and cannot be cancelled")]
    GameAlreadyOver,

    #[error("A turn is already in progress")]
    TurnInProgress,

    #[error("No turn is in progress")]
    NoTurnInProgress,

    #[error("Dice have not been rolled yet")]
    NotRolled,

    #[error("Turn is already complete")]
    TurnComplete,

    #[error("Maximum of {0} rolls reached for this turn")]
    MaxRollsReached(u8),

    #[error("Category {0} has already been scored")]
    AlreadyScored(Category),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Scorecard is not complete")]
    NotComplete,

    #[error("Unknown game: {0}")]
    UnknownGame(GameId),

    #[error("Storage error: {0}")]
    Storage(String),
}

pub type Result<T> = std::result::Result<T, Error>;

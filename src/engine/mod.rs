// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Round engine for the lyric guessing game.
//!
//! This module provides the game modes, the round state and the state
//! machine that reacts to guesses, skips and clock ticks.

pub mod mode;
pub mod round;

pub use mode::{Mode, ParseModeError};
pub use round::{
    GuessOutcome, RoundEngine, RoundSnapshot, RoundState, CORRECT_GUESS_BONUS, MAX_STRIKES,
    REVEAL_STRIKES, WRONG_GUESS_PENALTY,
};

use thiserror::Error;

/// Errors raised by the round engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EngineError {
    /// A round cannot start without songs
    #[error("cannot start a round: the song catalog is empty")]
    EmptyCatalog,
    /// Play again was requested before any round was started
    #[error("no previous mode to play again")]
    NoMode,
}

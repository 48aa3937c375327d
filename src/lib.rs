// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! lyricguess: a timed lyric guessing game for the terminal.
//!
//! A round shows lyric lines from a random song one at a time; type the
//! title before the clock runs out.

pub mod catalog;
pub mod config;
pub mod engine;
pub mod timing;
pub mod ui;

pub use catalog::{Catalog, Song};
pub use engine::{EngineError, GuessOutcome, Mode, RoundEngine, RoundSnapshot, RoundState};

// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Round state machine.
//!
//! A round picks random songs from the catalog and reveals their lyrics one
//! line per wrong guess. Correct guesses score and buy back time, wrong
//! guesses cost a second, and the round ends when the clock reaches zero.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use super::{EngineError, Mode};
use crate::catalog::{Catalog, Song};

/// Seconds added for a correct guess (capped at the mode budget)
pub const CORRECT_GUESS_BONUS: u32 = 3;
/// Seconds removed for a wrong guess
pub const WRONG_GUESS_PENALTY: u32 = 1;
/// Wrong guesses that may still reveal a new line
pub const REVEAL_STRIKES: u8 = 4;
/// Wrong guesses after which the song is forfeited
pub const MAX_STRIKES: u8 = 5;

/// Mutable state of the current round
#[derive(Debug, Clone, PartialEq)]
pub struct RoundState {
    /// Active mode, `None` on the home screen
    pub mode: Option<Mode>,
    /// Songs guessed correctly this round
    pub score: u32,
    /// Seconds left on the clock
    pub time_remaining: u32,
    /// Song being guessed
    pub current_song: Option<Song>,
    /// Leading lyric lines shown for the current song
    pub revealed_count: usize,
    /// Wrong guesses against the current song
    pub incorrect_guesses: u8,
    /// Set once time has run out
    pub is_over: bool,
}

impl Default for RoundState {
    fn default() -> Self {
        Self {
            mode: None,
            score: 0,
            time_remaining: 0,
            current_song: None,
            revealed_count: 1,
            incorrect_guesses: 0,
            is_over: false,
        }
    }
}

impl RoundState {
    /// Lyric lines currently visible
    pub fn revealed_lyrics(&self) -> &[String] {
        match &self.current_song {
            Some(song) => {
                let count = self.revealed_count.min(song.lyrics.len());
                &song.lyrics[..count]
            }
            None => &[],
        }
    }

    /// Whether a round is in progress and accepting input
    pub fn is_active(&self) -> bool {
        self.mode.is_some() && !self.is_over
    }
}

/// What happened to a submitted guess
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuessOutcome {
    /// Guess was blank or no round is accepting guesses
    Ignored,
    /// Title matched, a new song is up
    Correct {
        /// Title of the song just guessed
        title: String,
    },
    /// Wrong, and one more lyric line was revealed
    Revealed,
    /// Wrong, nothing left to reveal
    Strike,
    /// Wrong for the last time, the song was replaced
    Forfeited {
        /// Title of the song given up
        title: String,
    },
}

/// Read-only view of a round for rendering
#[derive(Debug, Clone, PartialEq)]
pub struct RoundSnapshot {
    pub mode: Option<Mode>,
    pub score: u32,
    pub time_remaining: u32,
    /// Time budget of the mode, 0 on the home screen
    pub initial_time: u32,
    pub revealed_lyrics: Vec<String>,
    /// Total lyric lines of the current song
    pub total_lines: usize,
    pub strikes: u8,
    pub max_strikes: u8,
    pub is_over: bool,
}

/// State machine for a single player's rounds
#[derive(Debug)]
pub struct RoundEngine<R = StdRng> {
    catalog: Catalog,
    state: RoundState,
    last_mode: Option<Mode>,
    rng: R,
}

impl RoundEngine<StdRng> {
    /// Create an engine with an entropy-seeded RNG
    pub fn new(catalog: Catalog) -> Self {
        Self::with_rng(catalog, StdRng::from_entropy())
    }

    /// Create an engine whose song selection is reproducible
    pub fn with_seed(catalog: Catalog, seed: u64) -> Self {
        Self::with_rng(catalog, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> RoundEngine<R> {
    /// Create an engine with a caller-supplied RNG
    pub fn with_rng(catalog: Catalog, rng: R) -> Self {
        Self {
            catalog,
            state: RoundState::default(),
            last_mode: None,
            rng,
        }
    }

    /// Song catalog the engine draws from
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Current round state
    pub fn state(&self) -> &RoundState {
        &self.state
    }

    /// Lyric lines currently visible
    pub fn revealed_lyrics(&self) -> &[String] {
        self.state.revealed_lyrics()
    }

    /// Start a fresh round in the given mode
    ///
    /// Fails without touching the current state when the catalog is empty.
    pub fn start(&mut self, mode: Mode) -> Result<(), EngineError> {
        if self.catalog.is_empty() {
            return Err(EngineError::EmptyCatalog);
        }

        self.state.mode = Some(mode);
        self.state.score = 0;
        self.state.time_remaining = mode.initial_time();
        self.state.incorrect_guesses = 0;
        self.state.is_over = false;
        self.last_mode = Some(mode);
        self.select_random_song();

        info!(
            mode = %mode,
            songs = self.catalog.len(),
            "round started"
        );
        Ok(())
    }

    /// Restart with the most recently started mode
    pub fn play_again(&mut self) -> Result<(), EngineError> {
        let mode = self.state.mode.or(self.last_mode).ok_or(EngineError::NoMode)?;
        self.start(mode)
    }

    /// Pick the next song uniformly at random, repeats allowed
    fn select_random_song(&mut self) {
        if let Some(song) = self.catalog.songs().choose(&mut self.rng) {
            self.state.current_song = Some(song.clone());
            self.state.revealed_count = 1;
            self.state.incorrect_guesses = 0;
            debug!(title = %song.title, "song selected");
        }
    }

    /// Check a guess against the current song's title
    ///
    /// Comparison ignores surrounding whitespace and case.
    pub fn submit_guess(&mut self, text: &str) -> GuessOutcome {
        if self.state.is_over {
            return GuessOutcome::Ignored;
        }
        let Some(mode) = self.state.mode else {
            return GuessOutcome::Ignored;
        };
        let Some(song) = self.state.current_song.as_ref() else {
            return GuessOutcome::Ignored;
        };
        let guess = text.trim();
        if guess.is_empty() {
            return GuessOutcome::Ignored;
        }

        if guess.to_lowercase() == song.title.to_lowercase() {
            let title = song.title.clone();
            self.state.score += 1;
            self.state.time_remaining =
                (self.state.time_remaining + CORRECT_GUESS_BONUS).min(mode.initial_time());
            debug!(
                score = self.state.score,
                time = self.state.time_remaining,
                "correct guess"
            );
            self.select_random_song();
            return GuessOutcome::Correct { title };
        }

        let line_count = song.lyrics.len();
        let title = song.title.clone();
        let prior_strikes = self.state.incorrect_guesses;

        self.state.time_remaining = self.state.time_remaining.saturating_sub(WRONG_GUESS_PENALTY);
        self.state.incorrect_guesses += 1;

        let outcome = if prior_strikes < REVEAL_STRIKES && self.state.revealed_count < line_count {
            self.state.revealed_count += 1;
            GuessOutcome::Revealed
        } else if self.state.incorrect_guesses >= MAX_STRIKES {
            self.select_random_song();
            GuessOutcome::Forfeited { title }
        } else {
            GuessOutcome::Strike
        };

        debug!(
            strikes = self.state.incorrect_guesses,
            revealed = self.state.revealed_count,
            time = self.state.time_remaining,
            outcome = ?outcome,
            "wrong guess"
        );

        if self.state.time_remaining == 0 {
            self.finish();
        }
        outcome
    }

    /// Move on to another song without penalty
    ///
    /// Returns whether a skip took place.
    pub fn skip(&mut self) -> bool {
        if self.state.is_over || self.state.mode.is_none() || self.state.current_song.is_none() {
            return false;
        }
        debug!("song skipped");
        self.select_random_song();
        true
    }

    /// Advance the clock by one second
    ///
    /// Returns `true` on the tick that ends the round. Ticks outside an
    /// active round are ignored.
    pub fn tick(&mut self) -> bool {
        if self.state.is_over || self.state.mode.is_none() || self.state.time_remaining == 0 {
            return false;
        }

        self.state.time_remaining -= 1;
        if self.state.time_remaining == 0 {
            self.finish();
            return true;
        }
        false
    }

    /// Leave the round and go back to mode selection
    pub fn return_home(&mut self) {
        self.state.mode = None;
        self.state.is_over = false;
        debug!("returned home");
    }

    fn finish(&mut self) {
        self.state.is_over = true;
        info!(score = self.state.score, "round over");
    }

    /// Render-ready copy of the round
    pub fn snapshot(&self) -> RoundSnapshot {
        RoundSnapshot {
            mode: self.state.mode,
            score: self.state.score,
            time_remaining: self.state.time_remaining,
            initial_time: self.state.mode.map(|m| m.initial_time()).unwrap_or(0),
            revealed_lyrics: self.state.revealed_lyrics().to_vec(),
            total_lines: self
                .state
                .current_song
                .as_ref()
                .map(|s| s.lyrics.len())
                .unwrap_or(0),
            strikes: self.state.incorrect_guesses,
            max_strikes: MAX_STRIKES,
            is_over: self.state.is_over,
        }
    }
}

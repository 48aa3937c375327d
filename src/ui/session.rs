// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Game session: the round engine plus the view state around it.
//!
//! Key presses and clock ticks come in, engine calls and screen changes go
//! out. Nothing here touches the terminal, so the whole flow is testable.

use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyModifiers};
use rand::rngs::StdRng;
use rand::Rng;
use tracing::warn;

use crate::catalog::DEFAULT_SUGGESTIONS;
use crate::engine::{GuessOutcome, Mode, RoundEngine};

/// How long a status message stays up
const STATUS_TIMEOUT: Duration = Duration::from_secs(3);

/// Which screen is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Mode selection
    Home,
    /// Round in progress
    Round,
    /// Time ran out
    GameOver,
}

/// Change the caller has to react to (clock and exit handling)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Nothing to do
    Stay,
    /// A round began, start the clock
    RoundStarted,
    /// Time ran out, stop the clock
    RoundFinished,
    /// Back on the home screen, stop the clock
    ReturnedHome,
    /// Exit the application
    Quit,
}

/// View state that is not part of the round itself
#[derive(Debug, Clone, Default)]
pub struct UiState {
    /// Guess being typed
    pub input: String,
    /// Titles matching the input
    pub suggestions: Vec<String>,
    /// Highlighted suggestion
    pub selected_suggestion: Option<usize>,
    /// Highlighted entry of the mode menu
    pub menu_index: usize,
    /// Help text visible
    pub show_help: bool,
    /// Status message
    pub status_message: Option<String>,
    /// Status message timestamp
    pub status_time: Option<Instant>,
}

impl UiState {
    /// Set a status message that will be displayed temporarily
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
        self.status_time = Some(Instant::now());
    }

    /// Clear expired status message
    pub fn clear_expired_status(&mut self) {
        if let Some(time) = self.status_time {
            if time.elapsed() > STATUS_TIMEOUT {
                self.status_message = None;
                self.status_time = None;
            }
        }
    }

    fn clear_input(&mut self) {
        self.input.clear();
        self.suggestions.clear();
        self.selected_suggestion = None;
    }
}

/// A player's session across rounds
#[derive(Debug)]
pub struct Session<R = StdRng> {
    engine: RoundEngine<R>,
    ui: UiState,
    suggestion_limit: usize,
}

impl<R: Rng> Session<R> {
    /// Create a session on the home screen
    pub fn new(engine: RoundEngine<R>) -> Self {
        Self {
            engine,
            ui: UiState::default(),
            suggestion_limit: DEFAULT_SUGGESTIONS,
        }
    }

    /// Set how many suggestions are offered
    pub fn with_suggestion_limit(mut self, limit: usize) -> Self {
        self.suggestion_limit = limit;
        self
    }

    /// Highlight a mode on the home menu
    pub fn with_default_mode(mut self, mode: Mode) -> Self {
        self.ui.menu_index = Mode::ALL.iter().position(|m| *m == mode).unwrap_or(0);
        self
    }

    pub fn engine(&self) -> &RoundEngine<R> {
        &self.engine
    }

    pub fn ui(&self) -> &UiState {
        &self.ui
    }

    /// Current screen, derived from the round state
    pub fn screen(&self) -> Screen {
        let state = self.engine.state();
        match (state.mode, state.is_over) {
            (None, _) => Screen::Home,
            (Some(_), false) => Screen::Round,
            (Some(_), true) => Screen::GameOver,
        }
    }

    /// Clear expired status message
    pub fn clear_expired_status(&mut self) {
        self.ui.clear_expired_status();
    }

    /// Start a round in `mode`
    pub fn start(&mut self, mode: Mode) -> Transition {
        self.begin(|engine| engine.start(mode))
    }

    fn begin<F>(&mut self, start: F) -> Transition
    where
        F: FnOnce(&mut RoundEngine<R>) -> Result<(), crate::engine::EngineError>,
    {
        match start(&mut self.engine) {
            Ok(()) => {
                self.ui.clear_input();
                self.ui.status_message = None;
                self.ui.status_time = None;
                Transition::RoundStarted
            }
            Err(e) => {
                warn!(error = %e, "could not start round");
                self.ui.set_status(e.to_string());
                Transition::Stay
            }
        }
    }

    /// Advance the round clock
    pub fn on_tick(&mut self) -> Transition {
        if self.engine.tick() {
            self.ui.clear_input();
            self.ui.set_status("Time's up!");
            Transition::RoundFinished
        } else {
            Transition::Stay
        }
    }

    /// Handle a key press
    pub fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> Transition {
        if code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
            return Transition::Quit;
        }
        if code == KeyCode::F(1) {
            self.ui.show_help = !self.ui.show_help;
            return Transition::Stay;
        }
        if self.ui.show_help && code == KeyCode::Esc {
            self.ui.show_help = false;
            return Transition::Stay;
        }

        match self.screen() {
            Screen::Home => self.handle_home_key(code),
            Screen::Round => self.handle_round_key(code, modifiers),
            Screen::GameOver => self.handle_game_over_key(code),
        }
    }

    fn handle_home_key(&mut self, code: KeyCode) -> Transition {
        match code {
            KeyCode::Char(c @ '1'..='3') => {
                let index = (c as usize) - ('1' as usize);
                self.ui.menu_index = index;
                self.start(Mode::ALL[index])
            }
            KeyCode::Up => {
                self.ui.menu_index = self.ui.menu_index.checked_sub(1).unwrap_or(Mode::ALL.len() - 1);
                Transition::Stay
            }
            KeyCode::Down => {
                self.ui.menu_index = (self.ui.menu_index + 1) % Mode::ALL.len();
                Transition::Stay
            }
            KeyCode::Enter => self.start(Mode::ALL[self.ui.menu_index % Mode::ALL.len()]),
            KeyCode::Char('?') => {
                self.ui.show_help = !self.ui.show_help;
                Transition::Stay
            }
            KeyCode::Char('q') | KeyCode::Esc => Transition::Quit,
            _ => Transition::Stay,
        }
    }

    fn handle_round_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> Transition {
        match (code, modifiers) {
            (KeyCode::Char('s'), KeyModifiers::CONTROL) => {
                if self.engine.skip() {
                    self.ui.clear_input();
                    self.ui.set_status("Skipped");
                }
                Transition::Stay
            }
            (KeyCode::Char(c), KeyModifiers::NONE) | (KeyCode::Char(c), KeyModifiers::SHIFT) => {
                self.ui.input.push(c);
                self.refresh_suggestions();
                Transition::Stay
            }
            (KeyCode::Backspace, _) => {
                self.ui.input.pop();
                self.refresh_suggestions();
                Transition::Stay
            }
            (KeyCode::Tab, _) => {
                let index = self.ui.selected_suggestion.unwrap_or(0);
                if let Some(title) = self.ui.suggestions.get(index).cloned() {
                    self.ui.input = title;
                    self.refresh_suggestions();
                }
                Transition::Stay
            }
            (KeyCode::Down, _) => {
                let count = self.ui.suggestions.len();
                if count > 0 {
                    self.ui.selected_suggestion = Some(match self.ui.selected_suggestion {
                        Some(i) => (i + 1) % count,
                        None => 0,
                    });
                }
                Transition::Stay
            }
            (KeyCode::Up, _) => {
                let count = self.ui.suggestions.len();
                if count > 0 {
                    self.ui.selected_suggestion = Some(match self.ui.selected_suggestion {
                        Some(0) | None => count - 1,
                        Some(i) => i - 1,
                    });
                }
                Transition::Stay
            }
            (KeyCode::Enter, _) => self.submit(),
            (KeyCode::Esc, _) => {
                self.engine.return_home();
                self.ui.clear_input();
                Transition::ReturnedHome
            }
            _ => Transition::Stay,
        }
    }

    fn handle_game_over_key(&mut self, code: KeyCode) -> Transition {
        match code {
            KeyCode::Char('r') | KeyCode::Enter => self.begin(|engine| engine.play_again()),
            KeyCode::Char('h') | KeyCode::Esc => {
                self.engine.return_home();
                Transition::ReturnedHome
            }
            KeyCode::Char('?') => {
                self.ui.show_help = !self.ui.show_help;
                Transition::Stay
            }
            KeyCode::Char('q') => Transition::Quit,
            _ => Transition::Stay,
        }
    }

    /// Submit the highlighted suggestion, or the typed text
    fn submit(&mut self) -> Transition {
        let guess = self
            .ui
            .selected_suggestion
            .and_then(|i| self.ui.suggestions.get(i).cloned())
            .unwrap_or_else(|| self.ui.input.clone());

        let outcome = self.engine.submit_guess(&guess);
        if outcome == GuessOutcome::Ignored {
            return Transition::Stay;
        }
        self.ui.clear_input();

        let status = match outcome {
            GuessOutcome::Correct { title } => format!("Correct! \"{}\" +1", title),
            GuessOutcome::Revealed => "Wrong! Here's another line".to_string(),
            GuessOutcome::Strike => "Wrong! No more lines to show".to_string(),
            GuessOutcome::Forfeited { title } => format!("Out of guesses, it was \"{}\"", title),
            GuessOutcome::Ignored => String::new(),
        };
        self.ui.set_status(status);

        if self.engine.state().is_over {
            self.ui.set_status("Time's up!");
            Transition::RoundFinished
        } else {
            Transition::Stay
        }
    }

    fn refresh_suggestions(&mut self) {
        self.ui.suggestions = self
            .engine
            .catalog()
            .suggest(&self.ui.input, self.suggestion_limit)
            .into_iter()
            .map(str::to_string)
            .collect();
        self.ui.selected_suggestion = None;
    }
}

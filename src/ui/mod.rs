// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Terminal UI for lyricguess.
//!
//! Provides a ratatui-based terminal interface with the mode menu, the
//! round view (stats, revealed lyrics, guess input with suggestions) and
//! the game over popup.

mod home;
mod round;
pub mod session;

pub use home::ModeMenuWidget;
pub use round::{LyricsWidget, StatsWidget};
pub use session::{Screen, Session, Transition, UiState};

use std::io::{self, Stdout};
use std::thread;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame, Terminal,
};
use tokio::sync::mpsc::{self, UnboundedSender};
use tokio::time::{self, MissedTickBehavior};
use tracing::{info, warn};

use crate::engine::RoundSnapshot;
use crate::timing::Ticker;

/// Events feeding the UI loop
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Key pressed
    Key(KeyEvent),
    /// One second of round time passed
    Tick,
}

/// Terminal UI application
pub struct App {
    /// Engine plus view state
    session: Session,
    /// Terminal handle
    terminal: Terminal<CrosstermBackend<Stdout>>,
    /// Round clock
    ticker: Ticker,
    /// Target frame rate
    frame_rate: u32,
    /// Whether to continue running
    running: bool,
}

impl App {
    /// Take over the terminal for `session`
    pub fn new(session: Session, ticker: Ticker) -> io::Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        Ok(Self {
            session,
            terminal,
            ticker,
            frame_rate: 30,
            running: true,
        })
    }

    /// Set frame rate
    pub fn set_frame_rate(&mut self, fps: u32) {
        self.frame_rate = fps.clamp(1, 120);
    }

    /// Run until the player quits
    pub async fn run(&mut self) -> Result<()> {
        let (tx, mut rx) = mpsc::unbounded_channel();
        spawn_input_reader(tx.clone());

        if self.session.screen() == Screen::Round {
            self.ticker.start(tx.clone(), AppEvent::Tick);
        }

        let mut frames = time::interval(Duration::from_millis(1000 / self.frame_rate as u64));
        frames.set_missed_tick_behavior(MissedTickBehavior::Skip);

        while self.running {
            self.draw()?;

            tokio::select! {
                Some(event) = rx.recv() => {
                    let transition = match event {
                        AppEvent::Key(key) => self.session.handle_key(key.code, key.modifiers),
                        AppEvent::Tick => self.session.on_tick(),
                    };
                    self.apply(transition, &tx);
                }
                _ = frames.tick() => {
                    self.session.clear_expired_status();
                }
            }
        }

        self.ticker.stop();
        Ok(())
    }

    /// Start or stop the clock to follow the session
    fn apply(&mut self, transition: Transition, tx: &UnboundedSender<AppEvent>) {
        match transition {
            Transition::Stay => {}
            Transition::RoundStarted => {
                self.ticker.stop();
                self.ticker.start(tx.clone(), AppEvent::Tick);
            }
            Transition::RoundFinished => {
                self.ticker.stop();
                info!(score = self.session.engine().state().score, "final score");
            }
            Transition::ReturnedHome => self.ticker.stop(),
            Transition::Quit => self.running = false,
        }
    }

    /// Draw the UI
    pub fn draw(&mut self) -> io::Result<()> {
        let snapshot = self.session.engine().snapshot();
        let ui = self.session.ui().clone();
        let screen = self.session.screen();

        self.terminal.draw(|frame| {
            let area = frame.area();

            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(3), // Title
                    Constraint::Min(8),    // Screen
                    Constraint::Length(1), // Status bar
                ])
                .split(area);

            render_title(frame, chunks[0]);
            match screen {
                Screen::Home => render_home(frame, chunks[1], &ui),
                Screen::Round => render_round(frame, chunks[1], &snapshot, &ui),
                Screen::GameOver => {
                    render_round(frame, chunks[1], &snapshot, &ui);
                    render_game_over(frame, area, &snapshot);
                }
            }
            render_status_bar(frame, chunks[2], screen, &ui);

            if ui.show_help {
                render_help_overlay(frame, area);
            }
        })?;

        Ok(())
    }

    /// Cleanup terminal on drop
    fn cleanup(&mut self) -> io::Result<()> {
        disable_raw_mode()?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen)?;
        self.terminal.show_cursor()?;
        Ok(())
    }
}

impl Drop for App {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}

/// Forward key presses from the terminal until the receiver goes away
fn spawn_input_reader(tx: UnboundedSender<AppEvent>) {
    thread::spawn(move || {
        while !tx.is_closed() {
            match event::poll(Duration::from_millis(50)) {
                Ok(true) => match event::read() {
                    Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                        if tx.send(AppEvent::Key(key)).is_err() {
                            break;
                        }
                    }
                    Ok(_) => {}
                    Err(e) => {
                        warn!(error = %e, "terminal read failed");
                        break;
                    }
                },
                Ok(false) => {}
                Err(e) => {
                    warn!(error = %e, "terminal poll failed");
                    break;
                }
            }
        }
    });
}

/// Render the title bar
fn render_title(frame: &mut Frame, area: Rect) {
    let title = Paragraph::new("Lyric Guessing Game")
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(title, area);
}

/// Render the mode menu
fn render_home(frame: &mut Frame, area: Rect, ui: &UiState) {
    let block = Block::default().borders(Borders::ALL).title(" Home ");
    frame.render_widget(ModeMenuWidget::new(ui.menu_index).block(block), area);
}

/// Render the round view
fn render_round(frame: &mut Frame, area: Rect, snapshot: &RoundSnapshot, ui: &UiState) {
    let suggestion_rows = ui.suggestions.len() as u16;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),               // Stats
            Constraint::Min(4),                  // Lyrics
            Constraint::Length(3),               // Guess input
            Constraint::Length(suggestion_rows), // Suggestions
        ])
        .split(area);

    let stats = StatsWidget::new(snapshot).block(Block::default().borders(Borders::ALL));
    frame.render_widget(stats, chunks[0]);

    let lyrics = LyricsWidget::new(snapshot)
        .block(Block::default().borders(Borders::ALL).title(" Lyrics "));
    frame.render_widget(lyrics, chunks[1]);

    render_input(frame, chunks[2], snapshot, ui);
    render_suggestions(frame, chunks[3], ui);
}

/// Render the guess input box
fn render_input(frame: &mut Frame, area: Rect, snapshot: &RoundSnapshot, ui: &UiState) {
    let block = Block::default().borders(Borders::ALL).title(" Your guess ");
    let inner = block.inner(area);

    let text = if ui.input.is_empty() && !snapshot.is_over {
        Span::styled("Enter your guess", Style::default().fg(Color::DarkGray))
    } else {
        Span::styled(ui.input.as_str(), Style::default().fg(Color::White))
    };
    frame.render_widget(Paragraph::new(text).block(block), area);

    if !snapshot.is_over {
        let x = inner.x + (ui.input.chars().count() as u16).min(inner.width.saturating_sub(1));
        frame.set_cursor_position((x, inner.y));
    }
}

/// Render the suggestion list under the input
fn render_suggestions(frame: &mut Frame, area: Rect, ui: &UiState) {
    let lines: Vec<Line> = ui
        .suggestions
        .iter()
        .enumerate()
        .map(|(i, title)| {
            if ui.selected_suggestion == Some(i) {
                Line::from(Span::styled(
                    format!(" ▶ {}", title),
                    Style::default().fg(Color::Black).bg(Color::Cyan),
                ))
            } else {
                Line::from(Span::styled(
                    format!("   {}", title),
                    Style::default().fg(Color::Cyan),
                ))
            }
        })
        .collect();
    frame.render_widget(Paragraph::new(lines), area);
}

/// Render the game over popup
fn render_game_over(frame: &mut Frame, area: Rect, snapshot: &RoundSnapshot) {
    let popup = centered(area, 36, 7);
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Game Over! ")
        .style(Style::default().bg(Color::Black));

    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("Your final score: {}", snapshot.score),
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("r: Play Again   h: Return Home"),
    ];

    frame.render_widget(
        Paragraph::new(text).alignment(Alignment::Center).block(block),
        popup,
    );
}

/// Render status bar
fn render_status_bar(frame: &mut Frame, area: Rect, screen: Screen, ui: &UiState) {
    let text = if let Some(ref msg) = ui.status_message {
        Span::styled(msg.as_str(), Style::default().fg(Color::Yellow))
    } else {
        let hint = match screen {
            Screen::Home => " 1-3/Enter: Start | Up/Down: Select | F1: Help | q: Quit",
            Screen::Round => " Enter: Guess | Tab: Complete | Ctrl+S: Skip | Esc: Home | F1: Help",
            Screen::GameOver => " r: Play Again | h: Home | q: Quit",
        };
        Span::styled(hint, Style::default().fg(Color::DarkGray))
    };

    frame.render_widget(Paragraph::new(text), area);
}

/// Render help overlay
fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let help_area = centered(area, 50, 16);
    frame.render_widget(Clear, help_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Help ")
        .style(Style::default().bg(Color::Black));

    let help_text = vec![
        Line::from(Span::styled("Home", Style::default().add_modifier(Modifier::BOLD))),
        Line::from("  1/2/3       30 seconds / 1 minute / 5 minutes"),
        Line::from("  Enter       Start highlighted mode"),
        Line::from(""),
        Line::from(Span::styled("Round", Style::default().add_modifier(Modifier::BOLD))),
        Line::from("  Enter       Submit guess"),
        Line::from("  Tab         Complete suggestion"),
        Line::from("  Up/Down     Highlight suggestion"),
        Line::from("  Ctrl+S      Skip song"),
        Line::from("  Esc         Return home"),
        Line::from(""),
        Line::from(Span::styled("Other", Style::default().add_modifier(Modifier::BOLD))),
        Line::from("  F1          Toggle help"),
        Line::from("  Ctrl+C      Quit"),
    ];

    frame.render_widget(Paragraph::new(help_text).block(block), help_area);
}

/// Rect of at most `width` x `height` centred in `area`
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width - width) / 2;
    let y = area.y + (area.height - height) / 2;
    Rect::new(x, y, width, height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered() {
        let area = Rect::new(0, 0, 100, 40);
        assert_eq!(centered(area, 50, 16), Rect::new(25, 12, 50, 16));

        let small = Rect::new(0, 0, 20, 10);
        assert_eq!(centered(small, 50, 16), Rect::new(0, 0, 20, 10));
    }
}

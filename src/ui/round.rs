// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Round display widgets.

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget, Wrap},
};

use crate::engine::RoundSnapshot;

/// Seconds left at which the clock turns red
const LOW_TIME: u32 = 10;

/// Score, clock and strikes on one line
pub struct StatsWidget<'a> {
    snapshot: &'a RoundSnapshot,
    block: Option<Block<'a>>,
}

impl<'a> StatsWidget<'a> {
    /// Create a new stats widget
    pub fn new(snapshot: &'a RoundSnapshot) -> Self {
        Self {
            snapshot,
            block: None,
        }
    }

    /// Set the block wrapper
    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }
}

impl Widget for StatsWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let area = if let Some(block) = self.block {
            let inner = block.inner(area);
            block.render(area, buf);
            inner
        } else {
            area
        };

        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(14), // Score
                Constraint::Length(2),  // Spacer
                Constraint::Length(16), // Time
                Constraint::Length(2),  // Spacer
                Constraint::Length(16), // Strikes
                Constraint::Min(0),     // Mode
            ])
            .split(area);

        let score = format!("Score: {}", self.snapshot.score);
        Paragraph::new(score)
            .style(Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
            .render(chunks[0], buf);

        let time_style = if self.snapshot.time_remaining <= LOW_TIME {
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        };
        Paragraph::new(format!("Time: {}s", self.snapshot.time_remaining))
            .style(time_style)
            .render(chunks[2], buf);

        Paragraph::new(strike_meter(self.snapshot.strikes, self.snapshot.max_strikes))
            .style(Style::default().fg(Color::Yellow))
            .render(chunks[4], buf);

        if let Some(mode) = self.snapshot.mode {
            Paragraph::new(mode.label())
                .style(Style::default().fg(Color::DarkGray))
                .render(chunks[5], buf);
        }
    }
}

/// Strikes as filled and empty marks, e.g. `✗✗···`
fn strike_meter(strikes: u8, max: u8) -> String {
    let used = strikes.min(max) as usize;
    "✗".repeat(used) + &"·".repeat(max as usize - used)
}

/// Revealed lyric lines with a hint of how many remain
pub struct LyricsWidget<'a> {
    snapshot: &'a RoundSnapshot,
    block: Option<Block<'a>>,
}

impl<'a> LyricsWidget<'a> {
    pub fn new(snapshot: &'a RoundSnapshot) -> Self {
        Self {
            snapshot,
            block: None,
        }
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }
}

impl Widget for LyricsWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut lines: Vec<Line> = self
            .snapshot
            .revealed_lyrics
            .iter()
            .map(|line| Line::from(Span::styled(line.as_str(), Style::default().fg(Color::White))))
            .collect();

        let hidden = self
            .snapshot
            .total_lines
            .saturating_sub(self.snapshot.revealed_lyrics.len());
        if hidden > 0 {
            lines.push(Line::from(Span::styled(
                format!("… {} more line{}", hidden, if hidden == 1 { "" } else { "s" }),
                Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
            )));
        }

        let mut paragraph = Paragraph::new(lines).wrap(Wrap { trim: true });
        if let Some(block) = self.block {
            paragraph = paragraph.block(block);
        }
        paragraph.render(area, buf);
    }
}

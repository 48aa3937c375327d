// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Mode selection menu widget.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget},
};

use crate::engine::Mode;

/// Menu listing the round modes
pub struct ModeMenuWidget<'a> {
    selected: usize,
    block: Option<Block<'a>>,
}

impl<'a> ModeMenuWidget<'a> {
    /// Create a menu with `selected` highlighted
    pub fn new(selected: usize) -> Self {
        Self {
            selected,
            block: None,
        }
    }

    /// Set the block wrapper
    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }
}

impl Widget for ModeMenuWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut lines = vec![
            Line::from(Span::styled(
                "Select a game mode:",
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
        ];

        for (i, mode) in Mode::ALL.iter().enumerate() {
            let (marker, style) = if i == self.selected {
                ("▶ ", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
            } else {
                ("  ", Style::default().fg(Color::White))
            };
            lines.push(Line::from(vec![
                Span::styled(marker, style),
                Span::styled(format!("{}  ", i + 1), Style::default().fg(Color::DarkGray)),
                Span::styled(mode.label(), style),
            ]));
        }

        let mut paragraph = Paragraph::new(lines);
        if let Some(block) = self.block {
            paragraph = paragraph.block(block);
        }
        paragraph.render(area, buf);
    }
}

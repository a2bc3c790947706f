// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Main UI rendering for the chat TUI

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

use super::app::ChatApp;
use super::keymap::KEY_HINTS;
use crate::chat::log::wrap_line;
use crate::chat::{sanitize_for_terminal, Bubble, Sender, ThemeState, UiState};

/// Colours for one theme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Color,
    pub text: Color,
    pub user: Color,
    pub bot: Color,
    pub meta: Color,
    pub bar: Color,
    pub error: Color,
}

impl Palette {
    pub fn for_theme(theme: ThemeState) -> Self {
        match theme {
            ThemeState::Dark => Self {
                background: Color::Reset,
                text: Color::White,
                user: Color::Cyan,
                bot: Color::White,
                meta: Color::DarkGray,
                bar: Color::DarkGray,
                error: Color::Red,
            },
            ThemeState::Light => Self {
                background: Color::White,
                text: Color::Black,
                user: Color::Blue,
                bot: Color::Black,
                meta: Color::Gray,
                bar: Color::Gray,
                error: Color::Red,
            },
        }
    }
}

/// Main draw function for the chat TUI
pub fn draw(frame: &mut Frame, app: &mut ChatApp) {
    let area = frame.area();
    let palette = Palette::for_theme(app.controller.theme());

    frame.render_widget(
        Block::default().style(Style::default().bg(palette.background).fg(palette.text)),
        area,
    );

    let [title, chat, input, hints] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(3),
        Constraint::Length(3),
        Constraint::Length(1),
    ])
    .areas(area);

    render_title_bar(frame, app, title, palette);

    app.message_area_width = chat.width;
    render_messages(frame, app.controller.ui_mut(), chat, palette);

    render_input(frame, app.controller.ui(), input, palette);

    frame.render_widget(
        Paragraph::new(Span::styled(KEY_HINTS, Style::default().fg(palette.meta))),
        hints,
    );
}

fn render_title_bar(frame: &mut Frame, app: &ChatApp, area: Rect, palette: Palette) {
    let ui = app.controller.ui();
    let mut spans = vec![
        Span::styled(
            format!(" {} ", ui.log.bot_name()),
            Style::default().bold(),
        ),
        Span::raw(format!("· {} ", app.endpoint())),
        Span::raw(format!("· {} ", ui.send_state().label())),
    ];
    if ui.queued_count() > 0 {
        spans.push(Span::raw(format!("· {} queued ", ui.queued_count())));
    }
    spans.push(Span::raw(format!("· {} ", ui.theme().label())));
    if let Some(status) = &app.status_message {
        spans.push(Span::styled(
            format!("· {}", status),
            Style::default().fg(palette.error),
        ));
    }

    frame.render_widget(
        Paragraph::new(Line::from(spans)).style(Style::default().bg(palette.bar)),
        area,
    );
}

fn render_messages(frame: &mut Frame, ui: &mut UiState, area: Rect, palette: Palette) {
    let lines: Vec<Line> = ui
        .log
        .bubbles()
        .iter()
        .flat_map(|bubble| bubble_lines(bubble, area.width, palette))
        .collect();

    let scroll = ui.log.scroll_mut();
    scroll.update_viewport_height(area.height);
    let offset = scroll.sync(lines.len());

    frame.render_widget(
        Paragraph::new(lines).scroll((offset.min(u16::MAX as usize) as u16, 0)),
        area,
    );
}

/// Lines for one bubble: wrapped text, footer, blank separator. Must produce
/// exactly `ScrollState::bubble_height` lines.
pub fn bubble_lines(bubble: &Bubble, width: u16, palette: Palette) -> Vec<Line<'static>> {
    let content_width = width.saturating_sub(4).max(1) as usize;
    let text = sanitize_for_terminal(&bubble.raw_text());

    let style = if bubble.is_typing() {
        Style::default().fg(palette.meta).italic()
    } else {
        match bubble.sender() {
            Sender::User => Style::default().fg(palette.user),
            Sender::Bot => Style::default().fg(palette.bot),
        }
    };

    let mut lines: Vec<Line<'static>> = Vec::new();
    for line in text.lines() {
        for chunk in wrap_line(line, content_width) {
            lines.push(Line::from(Span::styled(format!("  {}", chunk), style)));
        }
    }
    if lines.is_empty() {
        lines.push(Line::from(Span::styled("  ".to_string(), style)));
    }

    if let Some(meta) = bubble.meta() {
        lines.push(Line::from(Span::styled(
            format!("  {}", meta),
            Style::default().fg(palette.meta),
        )));
    }
    lines.push(Line::default());
    lines
}

fn render_input(frame: &mut Frame, ui: &UiState, area: Rect, palette: Palette) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.meta))
        .title(" Message ");
    let inner = block.inner(area);

    // Keep the cursor visible on long input
    let column = ui.input.cursor_column();
    let visible = inner.width.saturating_sub(1) as usize;
    let skip = column.saturating_sub(visible);
    let shown: String = ui.input.text().chars().skip(skip).collect();

    frame.render_widget(
        Paragraph::new(sanitize_for_terminal(&shown)).block(block),
        area,
    );
    frame.set_cursor_position((inner.x + (column - skip) as u16, inner.y));
}

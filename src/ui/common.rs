//! Widgets shared by every screen.

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

pub fn draw_title(f: &mut Frame, area: Rect, text: &str, color: Color) {
    let title = Paragraph::new(text)
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    f.render_widget(title, area);
}

pub fn draw_controls(f: &mut Frame, area: Rect, text: &str) {
    let controls = Paragraph::new(text)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Gray));
    f.render_widget(controls, area);
}

/// One-line status message. Errors render red, everything else green.
pub fn draw_status(f: &mut Frame, area: Rect, status: Option<&Status>) {
    let line = match status {
        Some(Status::Info(text)) => Line::from(Span::styled(
            text.as_str(),
            Style::default().fg(Color::Green),
        )),
        Some(Status::Error(text)) => Line::from(Span::styled(
            format!("✗ {}", text),
            Style::default().fg(Color::Red),
        )),
        None => Line::from(""),
    };
    f.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}

/// Feedback from the last action, shown until the next one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Info(String),
    Error(String),
}

pub fn row_style(selected: bool) -> Style {
    if selected {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    }
}

/// Moves a list cursor, wrapping at both ends. No-op for an empty list.
pub fn step_selection(index: usize, len: usize, down: bool) -> usize {
    if len == 0 {
        return 0;
    }
    let index = index.min(len - 1);
    if down {
        (index + 1) % len
    } else if index == 0 {
        len - 1
    } else {
        index - 1
    }
}

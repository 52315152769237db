use cardsharp::economy::OpenOutcome;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::common::{draw_controls, draw_title};

/// Shown after a successful purchase.
pub struct OpenResultScreen;

impl OpenResultScreen {
    pub fn draw(&self, f: &mut Frame, area: Rect, outcome: &OpenOutcome) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(2)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Length(7), // Reveal
                Constraint::Min(0),    // Filler
                Constraint::Length(3), // Controls
            ])
            .split(area);

        draw_title(f, chunks[0], "Lootbox Opened", Color::Cyan);

        let prize = match &outcome.prize {
            Some(item) => Span::styled(
                item.as_str(),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
            None => Span::styled("nothing", Style::default().fg(Color::Gray)),
        };
        let lines = vec![
            Line::from(""),
            Line::from(format!("You opened a {} lootbox and won:", outcome.lootbox)),
            Line::from(prize),
            Line::from(""),
            Line::from(Span::styled(
                format!("-{} coins, {} left", outcome.cost, outcome.new_balance),
                Style::default().fg(Color::Gray),
            )),
        ];
        f.render_widget(
            Paragraph::new(lines)
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL)),
            chunks[1],
        );

        draw_controls(f, chunks[3], "[Enter] Open another  [Esc] Back to lootboxes");
    }
}

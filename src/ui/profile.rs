use cardsharp::player::PlayerRecord;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use super::common::{draw_controls, draw_title};

/// Read-only view of one player's record.
pub struct ProfileScreen;

impl ProfileScreen {
    pub fn draw(&self, f: &mut Frame, area: Rect, record: &PlayerRecord) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(2)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Length(5), // Totals
                Constraint::Min(3),    // Inventory
                Constraint::Length(3), // Controls
            ])
            .split(area);

        draw_title(f, chunks[0], &record.name, Color::Cyan);

        let label = Style::default().fg(Color::Gray);
        let totals = vec![
            Line::from(vec![
                Span::styled("Balance:     ", label),
                Span::styled(
                    format!("{} coins", record.balance),
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(vec![
                Span::styled("Total spent: ", label),
                Span::raw(format!("{} coins", record.total_spent)),
            ]),
            Line::from(vec![
                Span::styled("Items owned: ", label),
                Span::raw(record.inventory.len().to_string()),
            ]),
        ];
        f.render_widget(
            Paragraph::new(totals)
                .alignment(Alignment::Left)
                .block(Block::default().borders(Borders::ALL).title(" Wallet ")),
            chunks[1],
        );

        let block = Block::default().borders(Borders::ALL).title(" Inventory ");
        let inner = block.inner(chunks[2]);
        f.render_widget(block, chunks[2]);

        let counts = inventory_counts(&record.inventory);
        if counts.is_empty() {
            let empty = Paragraph::new("Nothing yet. Open a lootbox!")
                .style(Style::default().fg(Color::Gray))
                .alignment(Alignment::Center);
            f.render_widget(empty, inner);
        } else {
            let lines: Vec<Line> = counts
                .iter()
                .map(|(item, n)| Line::from(format!("{} x{}", item, n)))
                .collect();
            f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner);
        }

        draw_controls(f, chunks[3], "[Esc] Back");
    }
}

/// Groups identical inventory entries, in order of first acquisition.
pub fn inventory_counts(inventory: &[String]) -> Vec<(&str, usize)> {
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for item in inventory {
        match counts.iter_mut().find(|(name, _)| *name == item.as_str()) {
            Some((_, n)) => *n += 1,
            None => counts.push((item.as_str(), 1)),
        }
    }
    counts
}

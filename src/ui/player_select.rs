use cardsharp::leaderboard::RankedPlayer;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::common::{draw_controls, draw_status, draw_title, row_style, step_selection, Status};

/// Leaderboard doubling as the player picker.
pub struct PlayerSelectScreen {
    pub selected_index: usize,
}

impl PlayerSelectScreen {
    pub fn new() -> Self {
        Self { selected_index: 0 }
    }

    pub fn move_up(&mut self, len: usize) {
        self.selected_index = step_selection(self.selected_index, len, false);
    }

    pub fn move_down(&mut self, len: usize) {
        self.selected_index = step_selection(self.selected_index, len, true);
    }

    pub fn selected<'a>(&self, players: &'a [RankedPlayer]) -> Option<&'a RankedPlayer> {
        players.get(self.selected_index)
    }

    /// Keeps the cursor inside a list that may have shrunk.
    pub fn clamp(&mut self, len: usize) {
        if self.selected_index >= len {
            self.selected_index = len.saturating_sub(1);
        }
    }

    pub fn draw(
        &self,
        f: &mut Frame,
        area: Rect,
        players: &[RankedPlayer],
        current: Option<&str>,
        status: Option<&Status>,
    ) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(2)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Min(5),    // Leaderboard
                Constraint::Length(1), // Status
                Constraint::Length(3), // Controls
            ])
            .split(area);

        draw_title(f, chunks[0], "Players by Total Spent", Color::Cyan);
        self.draw_leaderboard(f, chunks[1], players, current);
        draw_status(f, chunks[2], status);
        draw_controls(
            f,
            chunks[3],
            "[Enter] Select  [N] New  [I] Inspect  [L] Log out  [Esc] Back",
        );
    }

    fn draw_leaderboard(
        &self,
        f: &mut Frame,
        area: Rect,
        players: &[RankedPlayer],
        current: Option<&str>,
    ) {
        let block = Block::default().borders(Borders::ALL).title(" Leaderboard ");
        let inner = block.inner(area);
        f.render_widget(block, area);

        if players.is_empty() {
            let empty = Paragraph::new("No players found. Press [N] to create one.")
                .style(Style::default().fg(Color::Gray))
                .alignment(Alignment::Center);
            f.render_widget(empty, inner);
            return;
        }

        let lines: Vec<Line> = players
            .iter()
            .enumerate()
            .map(|(i, row)| {
                let marker = if current == Some(row.name.as_str()) {
                    " *"
                } else {
                    ""
                };
                Line::from(Span::styled(
                    format!("{}{}", row.line(), marker),
                    row_style(i == self.selected_index),
                ))
            })
            .collect();
        f.render_widget(Paragraph::new(lines), inner);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows() -> Vec<RankedPlayer> {
        vec![
            RankedPlayer {
                rank: 1,
                name: "whale".to_string(),
                total_spent: 900.0,
            },
            RankedPlayer {
                rank: 2,
                name: "minnow".to_string(),
                total_spent: 10.0,
            },
        ]
    }

    #[test]
    fn test_selection_follows_cursor() {
        let players = rows();
        let mut screen = PlayerSelectScreen::new();
        assert_eq!(screen.selected(&players).unwrap().name, "whale");
        screen.move_down(players.len());
        assert_eq!(screen.selected(&players).unwrap().name, "minnow");
    }

    #[test]
    fn test_clamp_after_shrink() {
        let mut screen = PlayerSelectScreen { selected_index: 4 };
        screen.clamp(2);
        assert_eq!(screen.selected_index, 1);
        screen.clamp(0);
        assert_eq!(screen.selected_index, 0);
        assert!(screen.selected(&[]).is_none());
    }
}

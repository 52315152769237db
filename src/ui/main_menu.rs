use cardsharp::player::PlayerRecord;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::common::{draw_controls, draw_status, draw_title, row_style, step_selection, Status};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Lootboxes,
    Players,
    Quit,
}

impl MenuChoice {
    pub const ALL: [MenuChoice; 3] = [MenuChoice::Lootboxes, MenuChoice::Players, MenuChoice::Quit];

    fn label(self) -> &'static str {
        match self {
            MenuChoice::Lootboxes => "[W] Open lootboxes",
            MenuChoice::Players => "[P] Players",
            MenuChoice::Quit => "[Q] Quit",
        }
    }

    /// The single-letter shortcut for each entry.
    pub fn from_key(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'w' => Some(MenuChoice::Lootboxes),
            'p' => Some(MenuChoice::Players),
            'q' => Some(MenuChoice::Quit),
            _ => None,
        }
    }
}

pub struct MainMenuScreen {
    pub selected_index: usize,
}

impl MainMenuScreen {
    pub fn new() -> Self {
        Self { selected_index: 0 }
    }

    pub fn move_up(&mut self) {
        self.selected_index = step_selection(self.selected_index, MenuChoice::ALL.len(), false);
    }

    pub fn move_down(&mut self) {
        self.selected_index = step_selection(self.selected_index, MenuChoice::ALL.len(), true);
    }

    pub fn selected(&self) -> MenuChoice {
        MenuChoice::ALL[self.selected_index.min(MenuChoice::ALL.len() - 1)]
    }

    pub fn draw(
        &self,
        f: &mut Frame,
        area: Rect,
        player: Option<&PlayerRecord>,
        lootbox_count: usize,
        status: Option<&Status>,
    ) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(2)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Length(4), // Session
                Constraint::Length(1), // Spacer
                Constraint::Min(5),    // Menu
                Constraint::Length(1), // Status
                Constraint::Length(3), // Controls
            ])
            .split(area);

        draw_title(f, chunks[0], "CardSharp Lootbox Shop", Color::Cyan);

        let mut session = match player {
            Some(record) => vec![
                Line::from(vec![
                    Span::raw("Playing as "),
                    Span::styled(record.name.as_str(), Style::default().fg(Color::Cyan)),
                ]),
                Line::from(format!(
                    "Balance: {} coins    Spent: {} coins    Items: {}",
                    record.balance,
                    record.total_spent,
                    record.inventory.len()
                )),
            ],
            None => vec![Line::from(Span::styled(
                "No player selected. Pick one under [P] Players.",
                Style::default().fg(Color::Gray),
            ))],
        };
        session.push(Line::from(Span::styled(
            format!("{} lootboxes on offer", lootbox_count),
            Style::default().fg(Color::Gray),
        )));
        f.render_widget(
            Paragraph::new(session).alignment(Alignment::Center),
            chunks[1],
        );

        let block = Block::default().borders(Borders::ALL).title(" Menu ");
        let inner = block.inner(chunks[3]);
        f.render_widget(block, chunks[3]);

        let lines: Vec<Line> = MenuChoice::ALL
            .iter()
            .enumerate()
            .map(|(i, choice)| {
                let selected = i == self.selected_index;
                let prefix = if selected { "> " } else { "  " };
                Line::from(Span::styled(
                    format!("{}{}", prefix, choice.label()),
                    row_style(selected),
                ))
            })
            .collect();
        f.render_widget(Paragraph::new(lines), inner);

        draw_status(f, chunks[4], status);
        draw_controls(f, chunks[5], "[↑↓] Navigate  [Enter] Choose  [W/P/Q] Shortcuts");
    }
}

use cardsharp::catalog::{Catalog, LootboxDefinition};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::common::{draw_controls, draw_status, draw_title, row_style, step_selection, Status};

/// Catalog browser with a confirm step before any coins are spent.
pub struct LootboxMenuScreen {
    pub selected_index: usize,
    pub confirming: bool,
}

impl LootboxMenuScreen {
    pub fn new() -> Self {
        Self {
            selected_index: 0,
            confirming: false,
        }
    }

    pub fn move_up(&mut self, len: usize) {
        self.selected_index = step_selection(self.selected_index, len, false);
    }

    pub fn move_down(&mut self, len: usize) {
        self.selected_index = step_selection(self.selected_index, len, true);
    }

    pub fn selected<'a>(&self, catalog: &'a Catalog) -> Option<&'a LootboxDefinition> {
        catalog.values().nth(self.selected_index)
    }

    pub fn draw(
        &self,
        f: &mut Frame,
        area: Rect,
        catalog: &Catalog,
        balance: u64,
        status: Option<&Status>,
    ) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(2)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Length(1), // Balance
                Constraint::Min(6),    // List + details
                Constraint::Length(1), // Status
                Constraint::Length(3), // Controls
            ])
            .split(area);

        draw_title(f, chunks[0], "Lootboxes", Color::Cyan);

        let balance_line = Paragraph::new(Line::from(vec![
            Span::styled("Balance: ", Style::default().fg(Color::Gray)),
            Span::styled(
                format!("{} coins", balance),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
        ]))
        .alignment(Alignment::Center);
        f.render_widget(balance_line, chunks[1]);

        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
            .split(chunks[2]);
        self.draw_list(f, body[0], catalog, balance);
        self.draw_details(f, body[1], self.selected(catalog));

        draw_status(f, chunks[3], status);

        let controls = match (self.confirming, self.selected(catalog)) {
            (true, Some(def)) => format!(
                "Open {} for {} coins?  [Y/Enter] Yes  [N/Esc] No",
                def.name, def.cost
            ),
            _ => "[↑↓] Navigate  [Enter] Open  [R] Reload  [Esc] Back".to_string(),
        };
        draw_controls(f, chunks[4], &controls);
    }

    fn draw_list(&self, f: &mut Frame, area: Rect, catalog: &Catalog, balance: u64) {
        let block = Block::default().borders(Borders::ALL).title(" Shop ");
        let inner = block.inner(area);
        f.render_widget(block, area);

        if catalog.is_empty() {
            let empty = Paragraph::new("No lootboxes available.")
                .style(Style::default().fg(Color::Gray))
                .alignment(Alignment::Center);
            f.render_widget(empty, inner);
            return;
        }

        let lines: Vec<Line> = catalog
            .values()
            .enumerate()
            .map(|(i, def)| {
                let selected = i == self.selected_index;
                let mut style = row_style(selected);
                if def.cost > balance && !selected {
                    style = style.fg(Color::DarkGray);
                }
                Line::from(Span::styled(
                    format!("{} - Cost: {}", def.name, def.cost),
                    style,
                ))
            })
            .collect();
        f.render_widget(Paragraph::new(lines), inner);
    }

    fn draw_details(&self, f: &mut Frame, area: Rect, selected: Option<&LootboxDefinition>) {
        let block = Block::default().borders(Borders::ALL).title(" Contents ");
        let inner = block.inner(area);
        f.render_widget(block, area);

        let Some(def) = selected else {
            return;
        };
        if def.items.is_empty() {
            let empty = Paragraph::new("This box is empty.")
                .style(Style::default().fg(Color::Gray))
                .alignment(Alignment::Center);
            f.render_widget(empty, inner);
            return;
        }

        let lines: Vec<Line> = def
            .items
            .iter()
            .map(|entry| {
                let label = entry.item.as_deref().unwrap_or("(nothing)");
                Line::from(vec![
                    Span::raw(format!("{:<20}", label)),
                    Span::styled(
                        format!("{:>6.1}%", entry.chance * 100.0),
                        Style::default().fg(Color::Gray),
                    ),
                ])
            })
            .collect();
        f.render_widget(Paragraph::new(lines), inner);
    }
}

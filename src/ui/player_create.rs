use cardsharp::core::MAX_PLAYER_NAME_LEN;
use cardsharp::player::validate_name;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::common::{draw_controls, draw_title};

pub struct PlayerCreateScreen {
    pub name_input: String,
    pub cursor_position: usize,
    pub validation_error: Option<String>,
}

impl PlayerCreateScreen {
    pub fn new() -> Self {
        Self {
            name_input: String::new(),
            cursor_position: 0,
            validation_error: None,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn draw(&self, f: &mut Frame, area: Rect, starting_balance: u64) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(2)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Length(1), // Spacer
                Constraint::Length(4), // Input label + field
                Constraint::Length(1), // Spacer
                Constraint::Length(4), // Rules
                Constraint::Length(2), // Validation
                Constraint::Min(0),    // Filler
                Constraint::Length(3), // Controls
            ])
            .split(area);

        draw_title(f, chunks[0], "New Player", Color::Cyan);

        f.render_widget(Paragraph::new("Player Name:"), chunks[2]);

        let input_area = Rect {
            x: chunks[2].x,
            y: chunks[2].y + 1,
            width: chunks[2].width,
            height: 3,
        };
        let input_widget = Paragraph::new(self.input_with_cursor())
            .block(Block::default().borders(Borders::ALL))
            .style(Style::default().fg(Color::White));
        f.render_widget(input_widget, input_area);

        let rules = vec![
            Line::from(format!("• 1-{} characters", MAX_PLAYER_NAME_LEN)),
            Line::from("• Letters, numbers, spaces, hyphens, underscores"),
            Line::from(format!("• Starts with {} coins", starting_balance)),
        ];
        f.render_widget(
            Paragraph::new(rules).style(Style::default().fg(Color::Gray)),
            chunks[4],
        );

        let validation_text = if let Some(error) = &self.validation_error {
            Line::from(Span::styled(
                format!("✗ {}", error),
                Style::default().fg(Color::Red),
            ))
        } else if !self.name_input.is_empty() {
            Line::from(Span::styled(
                "✓ Name is valid",
                Style::default().fg(Color::Green),
            ))
        } else {
            Line::from("")
        };
        f.render_widget(Paragraph::new(validation_text), chunks[5]);

        draw_controls(f, chunks[7], "[Enter] Create Player    [Esc] Cancel");
    }

    fn input_with_cursor(&self) -> String {
        let mut text: String = self.name_input.chars().take(self.cursor_position).collect();
        text.push('_');
        text.extend(self.name_input.chars().skip(self.cursor_position));
        text
    }

    fn byte_offset(&self, char_index: usize) -> usize {
        self.name_input
            .char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or(self.name_input.len())
    }

    pub fn handle_char_input(&mut self, c: char) {
        let at = self.byte_offset(self.cursor_position);
        self.name_input.insert(at, c);
        self.cursor_position += 1;
        self.validate();
    }

    pub fn handle_backspace(&mut self) {
        if self.cursor_position > 0 {
            let at = self.byte_offset(self.cursor_position - 1);
            self.name_input.remove(at);
            self.cursor_position -= 1;
            self.validate();
        }
    }

    pub fn validate(&mut self) {
        self.validation_error = validate_name(&self.name_input).err();
    }

    pub fn is_valid(&self) -> bool {
        self.validation_error.is_none() && !self.name_input.is_empty()
    }

    /// The name exactly as typed; surrounding whitespace is rejected, not
    /// trimmed.
    pub fn name(&self) -> &str {
        &self.name_input
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(text: &str) -> PlayerCreateScreen {
        let mut screen = PlayerCreateScreen::new();
        for c in text.chars() {
            screen.handle_char_input(c);
        }
        screen
    }

    #[test]
    fn test_valid_name() {
        let screen = typed("Lucky_7");
        assert!(screen.is_valid());
        assert_eq!(screen.name(), "Lucky_7");
    }

    #[test]
    fn test_empty_is_not_valid() {
        assert!(!PlayerCreateScreen::new().is_valid());
    }

    #[test]
    fn test_path_characters_rejected() {
        let screen = typed("../root");
        assert!(!screen.is_valid());
        assert!(screen.validation_error.is_some());
    }

    #[test]
    fn test_trailing_space_rejected() {
        assert!(!typed("bob ").is_valid());
    }

    #[test]
    fn test_backspace_with_multibyte_chars() {
        let mut screen = typed("Zoë");
        screen.handle_backspace();
        assert_eq!(screen.name(), "Zo");
        assert_eq!(screen.cursor_position, 2);
        assert!(screen.is_valid());
    }

    #[test]
    fn test_cursor_rendering() {
        assert_eq!(typed("ab").input_with_cursor(), "ab_");
    }
}

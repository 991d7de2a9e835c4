use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

/// Single-line text field. `cursor` counts chars, not bytes.
#[derive(Debug, Clone)]
pub struct InputField {
    pub value: String,
    pub cursor: usize,
    pub placeholder: String,
    pub label: String,
    pub focused: bool,
}

impl InputField {
    pub fn new(label: &str, placeholder: &str) -> Self {
        Self {
            value: String::new(),
            cursor: 0,
            placeholder: placeholder.to_string(),
            label: label.to_string(),
            focused: false,
        }
    }

    fn byte_index(&self) -> usize {
        self.value
            .char_indices()
            .nth(self.cursor)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }

    fn char_len(&self) -> usize {
        self.value.chars().count()
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.clear();
                true
            }
            KeyCode::Char(c) => {
                let at = self.byte_index();
                self.value.insert(at, c);
                self.cursor += 1;
                true
            }
            KeyCode::Backspace => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                    let at = self.byte_index();
                    self.value.remove(at);
                }
                true
            }
            KeyCode::Delete => {
                if self.cursor < self.char_len() {
                    let at = self.byte_index();
                    self.value.remove(at);
                }
                true
            }
            KeyCode::Left => {
                self.cursor = self.cursor.saturating_sub(1);
                true
            }
            KeyCode::Right => {
                if self.cursor < self.char_len() {
                    self.cursor += 1;
                }
                true
            }
            KeyCode::Home => {
                self.cursor = 0;
                true
            }
            KeyCode::End => {
                self.cursor = self.char_len();
                true
            }
            _ => false,
        }
    }

    /// Insert pasted text at the cursor; line breaks are dropped.
    pub fn insert_str(&mut self, text: &str) {
        let cleaned: String = text.chars().filter(|c| !matches!(c, '\n' | '\r')).collect();
        let at = self.byte_index();
        self.value.insert_str(at, &cleaned);
        self.cursor += cleaned.chars().count();
    }

    pub fn render(&self, f: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(self.label.as_str())
            .border_style(if self.focused {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default().fg(Color::Gray)
            });

        let text = if self.value.is_empty() && !self.focused {
            Line::from(Span::styled(
                &self.placeholder,
                Style::default().fg(Color::DarkGray),
            ))
        } else if self.focused {
            let (before, after) = self.value.split_at(self.byte_index());
            Line::from(vec![
                Span::raw(before),
                Span::styled("│", Style::default().fg(Color::Yellow)),
                Span::raw(after),
            ])
        } else {
            Line::from(Span::raw(&self.value))
        };

        let paragraph = Paragraph::new(text).block(block);
        f.render_widget(paragraph, area);
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn typed(text: &str) -> InputField {
        let mut field = InputField::new("URL", "");
        for c in text.chars() {
            field.handle_key(key(KeyCode::Char(c)));
        }
        field
    }

    #[test]
    fn typing_appends_at_cursor() {
        let mut field = typed("youtu.be/ab");
        field.handle_key(key(KeyCode::Left));
        field.handle_key(key(KeyCode::Char('X')));
        assert_eq!(field.value, "youtu.be/aXb");
        assert_eq!(field.cursor, 11);
    }

    #[test]
    fn editing_around_multibyte_chars() {
        let mut field = typed("é🎥z");
        field.handle_key(key(KeyCode::Left));
        field.handle_key(key(KeyCode::Backspace));
        assert_eq!(field.value, "éz");

        field.handle_key(key(KeyCode::Home));
        field.handle_key(key(KeyCode::Delete));
        assert_eq!(field.value, "z");
        assert_eq!(field.cursor, 0);
    }

    #[test]
    fn cursor_stays_in_bounds() {
        let mut field = typed("ab");
        field.handle_key(key(KeyCode::Right));
        assert_eq!(field.cursor, 2);
        field.handle_key(key(KeyCode::Home));
        field.handle_key(key(KeyCode::Left));
        field.handle_key(key(KeyCode::Backspace));
        assert_eq!(field.cursor, 0);
        assert_eq!(field.value, "ab");
    }

    #[test]
    fn paste_strips_newlines() {
        let mut field = typed("x");
        field.handle_key(key(KeyCode::Home));
        field.insert_str("https://youtu.be/abc\n");
        assert_eq!(field.value, "https://youtu.be/abcx");
        assert_eq!(field.cursor, 20);
    }

    #[test]
    fn ctrl_u_clears() {
        let mut field = typed("abc");
        field.handle_key(KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL));
        assert!(field.value.is_empty());
        assert_eq!(field.cursor, 0);
    }
}

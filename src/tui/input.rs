use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::color::Color as AppColor;

use super::widgets::{contrast_fg, to_color};

/// Outcome from handing a key to the query input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputOutcome {
    /// Text or cursor changed (or the key was ignored).
    Edited,
    /// User pressed Enter.
    Submit,
}

/// Single-line input for the color query. The cursor is a byte offset that
/// always sits on a char boundary.
pub struct QueryInput {
    prompt: String,
    content: String,
    cursor: usize,
}

impl QueryInput {
    pub fn new(prompt: &str) -> Self {
        Self {
            prompt: prompt.to_string(),
            content: String::new(),
            cursor: 0,
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn handle_key_event(&mut self, key: KeyEvent) -> InputOutcome {
        match key.code {
            KeyCode::Enter => return InputOutcome::Submit,
            KeyCode::Char(c) if key.modifiers.contains(KeyModifiers::CONTROL) => match c {
                'a' => self.cursor = 0,
                'e' => self.cursor = self.content.len(),
                'u' => {
                    self.content.drain(..self.cursor);
                    self.cursor = 0;
                }
                'k' => self.content.truncate(self.cursor),
                _ => {}
            },
            KeyCode::Char(c) => {
                self.content.insert(self.cursor, c);
                self.cursor += c.len_utf8();
            }
            KeyCode::Backspace if self.cursor > 0 => {
                let prev = self.prev_char_boundary();
                self.content.drain(prev..self.cursor);
                self.cursor = prev;
            }
            KeyCode::Delete if self.cursor < self.content.len() => {
                let next = self.next_char_boundary();
                self.content.drain(self.cursor..next);
            }
            KeyCode::Left if self.cursor > 0 => self.cursor = self.prev_char_boundary(),
            KeyCode::Right if self.cursor < self.content.len() => {
                self.cursor = self.next_char_boundary();
            }
            KeyCode::Home => self.cursor = 0,
            KeyCode::End => self.cursor = self.content.len(),
            _ => {}
        }
        InputOutcome::Edited
    }

    fn prev_char_boundary(&self) -> usize {
        self.content[..self.cursor]
            .char_indices()
            .next_back()
            .map_or(0, |(i, _)| i)
    }

    fn next_char_boundary(&self) -> usize {
        self.content[self.cursor..]
            .chars()
            .next()
            .map_or(self.cursor, |c| self.cursor + c.len_utf8())
    }

    /// Build the widget for rendering, with an optional swatch of the color
    /// currently typed.
    pub fn widget(&self, preview: Option<AppColor>) -> QueryInputWidget<'_> {
        QueryInputWidget {
            input: self,
            preview,
        }
    }
}

pub struct QueryInputWidget<'a> {
    input: &'a QueryInput,
    preview: Option<AppColor>,
}

impl Widget for QueryInputWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let prompt_style = Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD);
        let cursor_style = Style::default().fg(Color::Black).bg(Color::White);

        let content = &self.input.content;
        let (before, rest) = content.split_at(self.input.cursor);
        let mut spans = vec![Span::styled(self.input.prompt.clone(), prompt_style)];
        spans.push(Span::raw(before.to_string()));

        // Render cursor character (or space if at end)
        match rest.chars().next() {
            Some(c) => {
                let (at, after) = rest.split_at(c.len_utf8());
                spans.push(Span::styled(at.to_string(), cursor_style));
                spans.push(Span::raw(after.to_string()));
            }
            None => spans.push(Span::styled(" ", cursor_style)),
        }

        if let Some(color) = self.preview {
            spans.push(Span::raw("  "));
            spans.push(Span::styled(
                format!(" {} ", color.to_hex()),
                Style::default()
                    .bg(to_color(&color))
                    .fg(contrast_fg(&color)),
            ));
        }

        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}

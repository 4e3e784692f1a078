//! Text input with live character count.
//!
//! Owns the edit buffer and a byte-offset cursor. Wrapping is greedy at the
//! character level so cursor math and the rendered text always agree. The
//! submit event carries the raw buffer; validation (trimming, the in-flight
//! gate) belongs to the reducer, not the input widget.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::{Block, Paragraph};
use unicode_width::UnicodeWidthChar;

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;
use crate::tui::theme::Palette;

/// Tallest the input grows before it starts scrolling internally.
const MAX_VISIBLE_LINES: u16 = 5;
/// Borders (1 top + 1 bottom).
const VERTICAL_OVERHEAD: u16 = 2;

#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Enter pressed; carries the raw buffer contents.
    Submit(String),
    ContentChanged,
}

pub struct InputBox {
    pub buffer: String,
    /// Byte offset into `buffer`.
    cursor: usize,
    /// Border/text color pulled from the active palette each frame.
    pub style: Style,
}

impl InputBox {
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
            cursor: 0,
            style: Style::default(),
        }
    }

    pub fn char_count(&self) -> usize {
        self.buffer.chars().count()
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
        self.cursor = 0;
    }

    /// Replace the buffer (history recall) with the cursor at the end.
    pub fn set_text(&mut self, text: String) {
        self.cursor = text.len();
        self.buffer = text;
    }

    /// Required height for the current buffer at the given outer width.
    pub fn calculate_height(&self, width: u16) -> u16 {
        let inner = inner_width(width);
        let lines = wrap_chars(&self.buffer, inner).len() as u16;
        lines.min(MAX_VISIBLE_LINES).max(1) + VERTICAL_OVERHEAD
    }

    fn sync_palette(&mut self, palette: &Palette) {
        self.style = Style::default().fg(palette.user);
    }

    pub fn render_with_palette(&mut self, frame: &mut Frame, area: Rect, palette: &Palette) {
        self.sync_palette(palette);
        self.render(frame, area);
    }
}

impl Default for InputBox {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for InputBox {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let inner = inner_width(area.width);
        let lines = wrap_chars(&self.buffer, inner);
        let (cursor_row, cursor_col) = cursor_position(&self.buffer, self.cursor, inner);

        // Scroll so the cursor row is always visible.
        let visible = (area.height.saturating_sub(VERTICAL_OVERHEAD)).max(1) as usize;
        let first = (cursor_row + 1).saturating_sub(visible);
        let window = lines
            .iter()
            .skip(first)
            .take(visible)
            .cloned()
            .collect::<Vec<_>>()
            .join("\n");

        let title = format!("Input ({} chars)", self.char_count());
        let block = Block::bordered()
            .border_type(ratatui::widgets::BorderType::Rounded)
            .border_style(self.style)
            .title(title);

        frame.render_widget(Paragraph::new(window).block(block).style(self.style), area);

        frame.set_cursor_position((
            area.x + 1 + cursor_col,
            area.y + 1 + (cursor_row - first) as u16,
        ));
    }
}

impl EventHandler for InputBox {
    type Event = InputEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<InputEvent> {
        match event {
            TuiEvent::InputChar(c) => {
                self.buffer.insert(self.cursor, *c);
                self.cursor += c.len_utf8();
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Paste(text) => {
                self.buffer.insert_str(self.cursor, text);
                self.cursor += text.len();
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Backspace => {
                if self.cursor > 0 {
                    let prev = prev_char_boundary(&self.buffer, self.cursor);
                    self.buffer.drain(prev..self.cursor);
                    self.cursor = prev;
                    Some(InputEvent::ContentChanged)
                } else {
                    None
                }
            }
            TuiEvent::Delete => {
                if self.cursor < self.buffer.len() {
                    let next = next_char_boundary(&self.buffer, self.cursor);
                    self.buffer.drain(self.cursor..next);
                    Some(InputEvent::ContentChanged)
                } else {
                    None
                }
            }
            TuiEvent::CursorLeft => {
                if self.cursor > 0 {
                    self.cursor = prev_char_boundary(&self.buffer, self.cursor);
                    Some(InputEvent::ContentChanged)
                } else {
                    None
                }
            }
            TuiEvent::CursorRight => {
                if self.cursor < self.buffer.len() {
                    self.cursor = next_char_boundary(&self.buffer, self.cursor);
                    Some(InputEvent::ContentChanged)
                } else {
                    None
                }
            }
            TuiEvent::CursorHome => {
                let line_start = self.buffer[..self.cursor]
                    .rfind('\n')
                    .map(|i| i + 1)
                    .unwrap_or(0);
                (self.cursor != line_start).then(|| {
                    self.cursor = line_start;
                    InputEvent::ContentChanged
                })
            }
            TuiEvent::CursorEnd => {
                let line_end = self.buffer[self.cursor..]
                    .find('\n')
                    .map(|i| self.cursor + i)
                    .unwrap_or(self.buffer.len());
                (self.cursor != line_end).then(|| {
                    self.cursor = line_end;
                    InputEvent::ContentChanged
                })
            }
            TuiEvent::Submit => Some(InputEvent::Submit(self.buffer.clone())),
            _ => None,
        }
    }
}

fn inner_width(width: u16) -> usize {
    width.saturating_sub(2).max(1) as usize
}

fn prev_char_boundary(s: &str, index: usize) -> usize {
    let mut i = index - 1;
    while !s.is_char_boundary(i) {
        i -= 1;
    }
    i
}

fn next_char_boundary(s: &str, index: usize) -> usize {
    let mut i = index + 1;
    while i < s.len() && !s.is_char_boundary(i) {
        i += 1;
    }
    i
}

/// Greedy character-level wrap; logical newlines always break.
fn wrap_chars(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    for logical in text.split('\n') {
        let mut line = String::new();
        let mut col = 0usize;
        for c in logical.chars() {
            let w = c.width().unwrap_or(0);
            if col + w > width && !line.is_empty() {
                lines.push(std::mem::take(&mut line));
                col = 0;
            }
            line.push(c);
            col += w;
        }
        lines.push(line);
    }
    lines
}

/// Display row/column of a byte offset, under the same greedy wrap.
fn cursor_position(text: &str, cursor: usize, width: usize) -> (usize, u16) {
    let mut row = 0usize;
    let mut col = 0usize;
    let mut line_has_chars = false;
    for (i, c) in text.char_indices() {
        if i >= cursor {
            break;
        }
        if c == '\n' {
            row += 1;
            col = 0;
            line_has_chars = false;
            continue;
        }
        let w = c.width().unwrap_or(0);
        if col + w > width && line_has_chars {
            row += 1;
            col = 0;
        }
        col += w;
        line_has_chars = true;
    }
    (row, col as u16)
}

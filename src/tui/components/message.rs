//! Single chat bubble.
//!
//! A transient widget: created fresh each frame from a transcript entry and
//! the active palette. Markdown is applied to bot messages only; user text
//! is rendered raw so nothing the user typed is ever interpreted as markup.

use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::Text;
use ratatui::widgets::{Block, Padding, Paragraph, Widget, Wrap};

use crate::core::state::{Message, MessageKind, Sender};
use crate::tui::markdown;
use crate::tui::theme::Palette;

/// Horizontal padding (per side) between the border and text content.
const CONTENT_PAD_H: u16 = 1;
/// Borders (1 left + 1 right) plus padding.
const HORIZONTAL_OVERHEAD: u16 = 2 + CONTENT_PAD_H * 2;
/// Borders (1 top + 1 bottom).
const VERTICAL_OVERHEAD: u16 = 2;

pub struct MessageBubble<'a> {
    pub message: &'a Message,
    pub palette: &'a Palette,
    pub show_timestamp: bool,
}

impl<'a> MessageBubble<'a> {
    pub fn new(message: &'a Message, palette: &'a Palette, show_timestamp: bool) -> Self {
        Self {
            message,
            palette,
            show_timestamp,
        }
    }

    fn accent(&self) -> Style {
        let color = match (self.message.sender, self.message.kind) {
            (_, MessageKind::Error) => self.palette.error,
            (Sender::User, _) => self.palette.user,
            (Sender::Bot, _) => self.palette.bot,
        };
        Style::default().fg(color)
    }

    fn title(&self) -> String {
        let who = match (self.message.sender, self.message.kind) {
            (_, MessageKind::Error) => "error",
            (Sender::User, _) => "you",
            (Sender::Bot, _) => "bot",
        };
        if self.show_timestamp {
            format!("{} · {}", who, self.message.at.format("%H:%M"))
        } else {
            who.to_string()
        }
    }

    fn body(&self) -> Text<'static> {
        let content = self.message.content.trim();
        match self.message.sender {
            Sender::Bot => markdown::render(content, self.accent().fg.unwrap_or_default(), self.palette),
            Sender::User => Text::from(content.to_owned()).style(self.accent()),
        }
    }

    /// Build the paragraph once so height prediction and rendering agree.
    pub fn paragraph(&self) -> Paragraph<'static> {
        let border = self.accent().add_modifier(Modifier::DIM);
        Paragraph::new(self.body())
            .block(
                Block::bordered()
                    .title(self.title())
                    .border_type(ratatui::widgets::BorderType::Rounded)
                    .border_style(border)
                    .title_style(self.accent())
                    .padding(Padding::horizontal(CONTENT_PAD_H)),
            )
            .wrap(Wrap { trim: false })
    }

    /// Rendered height at the given width, borders included.
    pub fn height(&self, width: u16) -> u16 {
        if width <= HORIZONTAL_OVERHEAD {
            // Terminal too narrow for borders + padding; still occupy a row.
            return 1;
        }
        let lines = self.paragraph().line_count(width) as u16;
        lines.max(VERTICAL_OVERHEAD + 1)
    }
}

impl<'a> Widget for MessageBubble<'a> {
    fn render(self, area: Rect, buf: &mut ratatui::buffer::Buffer) {
        self.paragraph().render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::settings::Theme;

    fn palette() -> Palette {
        Palette::for_theme(Theme::Dark)
    }

    fn render_to_strings(bubble: MessageBubble<'_>, width: u16, height: u16) -> Vec<String> {
        let area = Rect::new(0, 0, width, height);
        let mut buf = ratatui::buffer::Buffer::empty(area);
        bubble.render(area, &mut buf);
        (0..height)
            .map(|y| {
                (0..width)
                    .filter_map(|x| buf.cell((x, y)).map(|c| c.symbol().to_string()))
                    .collect::<String>()
            })
            .collect()
    }

    #[test]
    fn test_user_title_and_raw_content() {
        let message = Message::user("**not bold**");
        let p = palette();
        let bubble = MessageBubble::new(&message, &p, false);
        let rows = render_to_strings(bubble, 30, 4);
        assert!(rows[0].contains("you"));
        // User text is never parsed as markdown: the asterisks survive.
        assert!(rows.iter().any(|r| r.contains("**not bold**")));
    }

    #[test]
    fn test_bot_markdown_strips_emphasis_markers() {
        let message = Message::bot("**bold** word");
        let p = palette();
        let bubble = MessageBubble::new(&message, &p, false);
        let rows = render_to_strings(bubble, 30, 4);
        assert!(rows.iter().any(|r| r.contains("bold word")));
        assert!(!rows.iter().any(|r| r.contains("**")));
    }

    #[test]
    fn test_error_kind_gets_error_title() {
        let message = Message::bot_error("busy");
        let p = palette();
        let bubble = MessageBubble::new(&message, &p, false);
        let rows = render_to_strings(bubble, 30, 4);
        assert!(rows[0].contains("error"));
        assert!(rows.iter().any(|r| r.contains("busy")));
    }

    #[test]
    fn test_timestamp_in_title_when_enabled() {
        let message = Message::user("hi");
        let p = palette();
        let bubble = MessageBubble::new(&message, &p, true);
        let expected = format!("you · {}", message.at.format("%H:%M"));
        let rows = render_to_strings(bubble, 30, 4);
        assert!(rows[0].contains(&expected), "got {:?}", rows[0]);
    }

    #[test]
    fn test_height_single_line() {
        let message = Message::user("hi");
        let p = palette();
        let bubble = MessageBubble::new(&message, &p, false);
        // 1 content line + 2 border rows
        assert_eq!(bubble.height(40), 3);
    }

    #[test]
    fn test_height_degenerate_width() {
        let message = Message::user("hello world");
        let p = palette();
        let bubble = MessageBubble::new(&message, &p, false);
        assert_eq!(bubble.height(HORIZONTAL_OVERHEAD), 1);
        assert_eq!(bubble.height(0), 1);
    }

    #[test]
    fn test_height_grows_with_wrapping() {
        let message = Message::user("a sentence that will definitely wrap across lines");
        let p = palette();
        let bubble = MessageBubble::new(&message, &p, false);
        assert!(bubble.height(16) > bubble.height(70));
    }
}

//! Scrollable conversation transcript.
//!
//! Renders one [`MessageBubble`] per transcript entry inside a
//! `tui-scrollview`. When the auto-scroll setting is on, the view sticks to
//! the newest message; scrolling up releases the stick until End re-enables
//! it.

use ratatui::Frame;
use ratatui::layout::{Rect, Size};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::state::App;
use crate::tui::component::EventHandler;
use crate::tui::event::TuiEvent;
use crate::tui::theme::Palette;

use super::message::MessageBubble;

pub struct TranscriptState {
    pub scroll: ScrollViewState,
    /// Follow the newest message. Released by scrolling up, restored by End.
    pub stick_to_bottom: bool,
}

impl TranscriptState {
    pub fn new() -> Self {
        Self {
            scroll: ScrollViewState::default(),
            stick_to_bottom: true,
        }
    }
}

impl EventHandler for TranscriptState {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<()> {
        match event {
            TuiEvent::ScrollUp => {
                self.stick_to_bottom = false;
                self.scroll.scroll_up();
            }
            TuiEvent::ScrollDown => self.scroll.scroll_down(),
            TuiEvent::ScrollPageUp => {
                self.stick_to_bottom = false;
                self.scroll.scroll_page_up();
            }
            TuiEvent::ScrollPageDown => self.scroll.scroll_page_down(),
            TuiEvent::ScrollToBottom => {
                self.stick_to_bottom = true;
                self.scroll.scroll_to_bottom();
            }
            _ => return None,
        }
        Some(())
    }
}

pub fn draw_transcript(
    frame: &mut Frame,
    area: Rect,
    app: &App,
    palette: &Palette,
    state: &mut TranscriptState,
) {
    // One column reserved for the scrollbar.
    let content_width = area.width.saturating_sub(1);

    let bubbles: Vec<MessageBubble> = app
        .transcript
        .iter()
        .map(|m| MessageBubble::new(m, palette, app.settings.show_timestamps))
        .collect();

    let heights: Vec<u16> = bubbles.iter().map(|b| b.height(content_width)).collect();
    let total_height: u16 = heights.iter().sum();

    let mut scroll_view = ScrollView::new(Size::new(content_width, total_height))
        .vertical_scrollbar_visibility(ScrollbarVisibility::Always)
        .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

    let mut y: u16 = 0;
    for (bubble, height) in bubbles.into_iter().zip(&heights) {
        scroll_view.render_widget(bubble.paragraph(), Rect::new(0, y, content_width, *height));
        y += height;
    }

    // Auto-scroll applies only if the setting is on at the moment of draw.
    if app.settings.auto_scroll && state.stick_to_bottom {
        state.scroll.scroll_to_bottom();
    }

    frame.render_stateful_widget(scroll_view, area, &mut state.scroll);
}

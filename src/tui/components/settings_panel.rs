//! Settings overlay.
//!
//! A modal visibility toggle over the main view (Ctrl+O), with the four
//! bound controls. Every change is emitted immediately as a
//! [`SettingUpdate`] so the reducer can apply and persist it; the panel
//! itself holds nothing but the selected row.

use ratatui::Frame;
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, Padding, Paragraph};

use crate::core::action::SettingUpdate;
use crate::core::settings::{MEMORY_LIMIT_MAX, MEMORY_LIMIT_MIN, Settings};
use crate::tui::event::TuiEvent;
use crate::tui::theme::Palette;

const ROWS: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelOutcome {
    Change(SettingUpdate),
    Dismiss,
}

#[derive(Default)]
pub struct SettingsPanelState {
    selected: usize,
}

impl SettingsPanelState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle_event(&mut self, event: &TuiEvent, settings: &Settings) -> Option<PanelOutcome> {
        match event {
            TuiEvent::ScrollUp => {
                self.selected = self.selected.saturating_sub(1);
                None
            }
            TuiEvent::ScrollDown => {
                self.selected = (self.selected + 1).min(ROWS - 1);
                None
            }
            TuiEvent::InputChar(' ') | TuiEvent::Submit => match self.selected {
                0 => Some(PanelOutcome::Change(SettingUpdate::AutoScroll(
                    !settings.auto_scroll,
                ))),
                1 => Some(PanelOutcome::Change(SettingUpdate::ShowTimestamps(
                    !settings.show_timestamps,
                ))),
                2 => Some(PanelOutcome::Change(SettingUpdate::SoundNotifications(
                    !settings.sound_notifications,
                ))),
                _ => None,
            },
            TuiEvent::CursorLeft if self.selected == 3 => {
                let lowered = settings.memory_limit.saturating_sub(1).max(MEMORY_LIMIT_MIN);
                (lowered != settings.memory_limit)
                    .then_some(PanelOutcome::Change(SettingUpdate::MemoryLimit(lowered)))
            }
            TuiEvent::CursorRight if self.selected == 3 => {
                let raised = (settings.memory_limit + 1).min(MEMORY_LIMIT_MAX);
                (raised != settings.memory_limit)
                    .then_some(PanelOutcome::Change(SettingUpdate::MemoryLimit(raised)))
            }
            TuiEvent::Escape | TuiEvent::OpenSettings => Some(PanelOutcome::Dismiss),
            _ => None,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, settings: &Settings, palette: &Palette) {
        let popup = centered(area, 40, 8);
        frame.render_widget(Clear, popup);

        let checkbox = |on: bool| if on { "[x]" } else { "[ ]" };
        let rows = [
            format!("{} Auto-scroll", checkbox(settings.auto_scroll)),
            format!("{} Show timestamps", checkbox(settings.show_timestamps)),
            format!("{} Sound notifications", checkbox(settings.sound_notifications)),
            format!("Memory limit: ◂ {} ▸", settings.memory_limit),
        ];

        let lines: Vec<Line> = rows
            .into_iter()
            .enumerate()
            .map(|(i, text)| {
                let style = if i == self.selected {
                    Style::default()
                        .fg(palette.accent)
                        .add_modifier(Modifier::REVERSED)
                } else {
                    Style::default().fg(palette.fg)
                };
                Line::from(Span::styled(text, style))
            })
            .collect();

        let block = Block::bordered()
            .title("Settings")
            .title_style(Style::default().fg(palette.accent))
            .border_style(Style::default().fg(palette.accent))
            .padding(Padding::horizontal(1));

        frame.render_widget(Paragraph::new(lines).block(block), popup);
    }
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let [h] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(area);
    let [rect] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(h);
    rect
}

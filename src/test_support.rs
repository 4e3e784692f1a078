//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use ratatui::buffer::Buffer;

use crate::core::settings::{Settings, Theme};
use crate::core::state::App;

/// Creates a fresh App with default settings against a dummy server label.
pub fn test_app() -> App {
    App::new(Settings::default(), Theme::default(), "test".to_string())
}

/// Flattens a render buffer into one string, rows separated by newlines.
pub fn buffer_text(buffer: &Buffer) -> String {
    let area = buffer.area;
    (0..area.height)
        .map(|y| {
            (0..area.width)
                .filter_map(|x| buffer.cell((x, y)).map(|c| c.symbol()))
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

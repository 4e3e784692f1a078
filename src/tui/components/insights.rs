//! Sidebar insight panels: memory counts and per-turn analytics.
//!
//! Purely presentational; every figure comes from `App`. Each panel is
//! collapsible to a single header line (visual state only, owned by the
//! TUI, never persisted).

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::core::state::App;
use crate::tui::theme::Palette;

/// One header line; content starts below it when expanded.
pub const HEADER_HEIGHT: u16 = 1;
pub const MEMORY_PANEL_HEIGHT: u16 = HEADER_HEIGHT + 1;
pub const ANALYTICS_PANEL_HEIGHT: u16 = HEADER_HEIGHT + 4;

pub fn section_header(title: &str, hint: &str, collapsed: bool, palette: &Palette) -> Line<'static> {
    let arrow = if collapsed { "▸" } else { "▾" };
    Line::from(vec![
        Span::styled(
            format!("{arrow} {title} "),
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("({hint})"), Style::default().fg(palette.dim)),
    ])
}

/// "412.73ms" / "840ms": the raw number with a unit, nothing rounded.
pub fn format_response_time(ms: Option<f64>) -> String {
    match ms {
        Some(v) => format!("{v}ms"),
        None => "—".to_string(),
    }
}

pub fn draw_memory_insights(
    frame: &mut Frame,
    area: Rect,
    app: &App,
    palette: &Palette,
    collapsed: bool,
) {
    let mut lines = vec![section_header("Memory Insights", "Alt+1", collapsed, palette)];
    if !collapsed {
        lines.push(stat_line("Memories recalled", app.total_memories.to_string(), palette));
    }
    frame.render_widget(Paragraph::new(lines), area);
}

pub fn draw_analytics(
    frame: &mut Frame,
    area: Rect,
    app: &App,
    palette: &Palette,
    collapsed: bool,
) {
    let mut lines = vec![section_header("Analytics", "Alt+2", collapsed, palette)];
    if !collapsed {
        lines.push(stat_line(
            "Response time",
            format_response_time(app.last_response_ms),
            palette,
        ));
        lines.push(stat_line("Memory hits", app.memory_hits.to_string(), palette));
        lines.push(stat_line(
            "Messages",
            format!("{} messages", app.total_messages),
            palette,
        ));
        lines.push(stat_line("Session", app.session_duration(), palette));
    }
    frame.render_widget(Paragraph::new(lines), area);
}

fn stat_line(label: &str, value: String, palette: &Palette) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {label}: "), Style::default().fg(palette.dim)),
        Span::styled(value, Style::default().fg(palette.fg)),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::settings::Theme;
    use crate::test_support::{buffer_text, test_app};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn draw<F: Fn(&mut Frame, Rect)>(f: F) -> String {
        let backend = TestBackend::new(38, 8);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.area();
                f(frame, area)
            })
            .unwrap();
        buffer_text(terminal.backend().buffer())
    }

    #[test]
    fn test_format_response_time() {
        assert_eq!(format_response_time(None), "—");
        assert_eq!(format_response_time(Some(840.0)), "840ms");
        assert_eq!(format_response_time(Some(412.73)), "412.73ms");
    }

    #[test]
    fn test_memory_panel_shows_count() {
        let mut app = test_app();
        app.total_memories = 3;
        let palette = Palette::for_theme(Theme::Dark);
        let text = draw(|f, area| draw_memory_insights(f, area, &app, &palette, false));
        assert!(text.contains("Memories recalled: 3"));
    }

    #[test]
    fn test_collapsed_panel_hides_content() {
        let mut app = test_app();
        app.total_memories = 3;
        let palette = Palette::for_theme(Theme::Dark);
        let text = draw(|f, area| draw_memory_insights(f, area, &app, &palette, true));
        assert!(text.contains("Memory Insights"));
        assert!(!text.contains("Memories recalled"));
        assert!(text.contains("▸"));
    }

    #[test]
    fn test_analytics_panel_lines() {
        let mut app = test_app();
        app.last_response_ms = Some(412.73);
        app.memory_hits = 4;
        app.total_messages = 7;
        let palette = Palette::for_theme(Theme::Dark);
        let text = draw(|f, area| draw_analytics(f, area, &app, &palette, false));
        assert!(text.contains("Response time: 412.73ms"));
        assert!(text.contains("Memory hits: 4"));
        assert!(text.contains("7 messages"));
        assert!(text.contains("Session: 00:0"));
    }
}

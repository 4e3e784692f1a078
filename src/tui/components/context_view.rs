//! Prompt-context panel.
//!
//! Shows what the server says it assembled for the last turn: either a short
//! note (cache hits) verbatim, or a fixed-order plain-text summary. Absent
//! fields render as empty sections with their headings retained, so the
//! panel's shape is stable turn over turn.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::widgets::{Paragraph, Wrap};

use crate::api::ContextReport;
use crate::core::state::App;
use crate::tui::theme::Palette;

use super::insights::section_header;

const PROMPT_DIVIDER: &str = "----------------------------";

/// Plain-text rendering of a context report. Section order is fixed.
pub fn format_context(report: &ContextReport) -> String {
    if let Some(note) = &report.note {
        return note.clone();
    }

    let bullets = |items: &[String]| -> String {
        items
            .iter()
            .map(|item| format!("- {item}"))
            .collect::<Vec<_>>()
            .join("\n")
    };

    let episodic = report
        .episodic
        .iter()
        .map(|e| format!("- {}", e.user))
        .collect::<Vec<_>>()
        .join("\n");

    let short_term = report
        .short_term
        .iter()
        .map(|turn| format!("{}: {}", turn.role, turn.content))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "USER PERSONA:\n{}\n\nKNOWN FACTS:\n{}\n\nKNOWN PROCESSES:\n{}\n\n\
         EPISODIC CONTEXT:\n{}\n\nSHORT TERM:\n{}\n\n\
         {PROMPT_DIVIDER}\nFINAL PROMPT\n{PROMPT_DIVIDER}\n{}",
        bullets(&report.persona),
        bullets(&report.knowledge),
        bullets(&report.process),
        episodic,
        short_term,
        report.final_prompt.as_deref().unwrap_or_default(),
    )
}

pub fn draw_context(
    frame: &mut Frame,
    area: Rect,
    app: &App,
    palette: &Palette,
    collapsed: bool,
) {
    let mut lines = vec![section_header("Context", "Alt+3", collapsed, palette)];
    if !collapsed
        && let Some(report) = &app.context_report
    {
        let body = format_context(report);
        for raw in body.lines() {
            lines.push(Line::styled(
                format!("  {raw}"),
                Style::default().fg(palette.dim),
            ));
        }
    }
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), area);
}

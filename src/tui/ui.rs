//! Frame composition: title bar, transcript, sidebar, input, overlay.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::Span;
use ratatui::widgets::Block;

use crate::core::state::App;
use crate::tui::TuiState;
use crate::tui::components::{context_view, insights};
use crate::tui::theme::Palette;

/// Sidebar width, sized for the analytics labels plus a short context body.
const SIDEBAR_WIDTH: u16 = 34;

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState) {
    let palette = Palette::for_theme(app.theme);
    let frame_area = frame.area();

    // Theme background over the whole frame.
    frame.render_widget(
        Block::default().style(Style::default().bg(palette.bg).fg(palette.fg)),
        frame_area,
    );

    use Constraint::{Length, Min};
    let input_height = tui.input_box.calculate_height(frame_area.width);
    let [title_area, main_area, input_area] =
        Layout::vertical([Length(1), Min(0), Length(input_height)]).areas(frame_area);

    draw_title_bar(frame, title_area, app, &palette);

    let [chat_area, side_area] =
        Layout::horizontal([Min(30), Length(SIDEBAR_WIDTH)]).areas(main_area);

    super::components::transcript::draw_transcript(
        frame,
        chat_area,
        app,
        &palette,
        &mut tui.transcript,
    );
    draw_sidebar(frame, side_area, app, &palette, &tui.collapsed);

    tui.input_box.render_with_palette(frame, input_area, &palette);

    if let Some(panel) = &tui.settings_panel {
        panel.render(frame, frame_area, &app.settings, &palette);
    }
}

fn draw_title_bar(frame: &mut Frame, area: Rect, app: &App, palette: &Palette) {
    let title = if app.status_message.is_empty() {
        format!("Mnemo ({})", app.server_label)
    } else {
        format!("Mnemo ({}) | {}", app.server_label, app.status_message)
    };
    frame.render_widget(
        Span::styled(title, Style::default().fg(palette.accent)),
        area,
    );
}

fn draw_sidebar(frame: &mut Frame, area: Rect, app: &App, palette: &Palette, collapsed: &[bool; 3]) {
    use Constraint::{Length, Min};
    let memory_height = if collapsed[0] {
        insights::HEADER_HEIGHT
    } else {
        insights::MEMORY_PANEL_HEIGHT
    };
    let analytics_height = if collapsed[1] {
        insights::HEADER_HEIGHT
    } else {
        insights::ANALYTICS_PANEL_HEIGHT
    };

    let [memory_area, analytics_area, context_area] = Layout::vertical([
        Length(memory_height + 1),
        Length(analytics_height + 1),
        Min(0),
    ])
    .areas(area);

    insights::draw_memory_insights(frame, memory_area, app, palette, collapsed[0]);
    insights::draw_analytics(frame, analytics_area, app, palette, collapsed[1]);
    context_view::draw_context(frame, context_area, app, palette, collapsed[2]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::action::THINKING_STATUS;
    use crate::core::settings::Theme;
    use crate::core::state::Message;
    use crate::test_support::{buffer_text, test_app};
    use crate::tui::TuiState;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn draw(app: &App) -> String {
        let backend = TestBackend::new(90, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut tui = TuiState::new();
        terminal.draw(|f| draw_ui(f, app, &mut tui)).unwrap();
        buffer_text(terminal.backend().buffer())
    }

    #[test]
    fn test_draw_ui_smoke() {
        let app = test_app();
        let text = draw(&app);
        assert!(text.contains("Mnemo"));
        assert!(text.contains("Memory Insights"));
        assert!(text.contains("Analytics"));
        assert!(text.contains("Context"));
        assert!(text.contains("0 chars"));
    }

    #[test]
    fn test_typing_indicator_in_title_bar() {
        let mut app = test_app();
        app.is_waiting = true;
        app.status_message = THINKING_STATUS.to_string();
        let text = draw(&app);
        assert!(text.contains(THINKING_STATUS));
    }

    #[test]
    fn test_transcript_and_sidebar_share_frame() {
        let mut app = test_app();
        app.transcript.push(Message::user("ping"));
        app.transcript.push(Message::bot("pong"));
        app.total_memories = 2;
        let text = draw(&app);
        assert!(text.contains("ping"));
        assert!(text.contains("pong"));
        assert!(text.contains("Memories recalled: 2"));
    }

    #[test]
    fn test_settings_overlay_drawn_when_open() {
        let app = test_app();
        let backend = TestBackend::new(90, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut tui = TuiState::new();
        tui.settings_panel = Some(crate::tui::components::SettingsPanelState::new());
        terminal.draw(|f| draw_ui(f, &app, &mut tui)).unwrap();
        let text = buffer_text(terminal.backend().buffer());
        assert!(text.contains("Settings"));
        assert!(text.contains("Auto-scroll"));
        assert!(text.contains("Memory limit"));
    }

    #[test]
    fn test_light_theme_paints_background() {
        let mut app = test_app();
        app.theme = Theme::Light;
        let backend = TestBackend::new(40, 10);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut tui = TuiState::new();
        terminal.draw(|f| draw_ui(f, &app, &mut tui)).unwrap();
        let cell = terminal.backend().buffer().cell((0, 0)).unwrap();
        assert_eq!(cell.style().bg, Some(ratatui::style::Color::White));
    }
}

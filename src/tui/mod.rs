//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI, and
//! translates keyboard events into `core::Action` values. This is the only
//! module that knows about ratatui and crossterm.
//!
//! ## Event loop shape
//!
//! One synchronous loop owns the `App`. Network calls run on spawned tokio
//! tasks and come back through an `mpsc` channel as a single action each;
//! the in-flight gate in the reducer means at most one is ever pending. A
//! background tick task fires once a second so the session-duration display
//! stays current.
//!
//! ## Redraw strategy
//!
//! - **Waiting** (request in flight): draws every ~80ms so the status line
//!   stays lively.
//! - **Idle**: sleeps up to 250ms, redrawing only on events, actions, or
//!   the tick.

mod component;
mod components;
mod event;
pub mod markdown;
pub mod theme;
mod ui;

use std::io::stdout;
use std::path::PathBuf;
use std::sync::{Arc, mpsc};
use std::time::Duration;

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;
use log::{debug, error, info, warn};

use crate::api::{ChatTransport, HttpChatClient};
use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::persist;
use crate::core::settings::{Settings, Theme};
use crate::core::state::App;
use crate::tui::component::EventHandler;
use crate::tui::components::{InputBox, InputEvent, PanelOutcome, SettingsPanelState, TranscriptState};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// TUI-specific presentation state (not part of core business logic).
pub struct TuiState {
    pub transcript: TranscriptState,
    pub input_box: InputBox,
    /// Settings overlay (None = hidden).
    pub settings_panel: Option<SettingsPanelState>,
    /// Collapse flags for the sidebar sections: insights, analytics,
    /// context. Bound to Alt+1..3 at startup; never persisted.
    pub collapsed: [bool; 3],
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            transcript: TranscriptState::new(),
            input_box: InputBox::new(),
            settings_panel: None,
            collapsed: [false; 3],
        }
    }
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        // Enable the Kitty keyboard protocol unconditionally (allows
        // Shift+Enter detection); terminals that don't support it ignore it.
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,
            SetCursorStyle::SteadyBlock,
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
            )
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, keyboard enhancement)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            PopKeyboardEnhancementFlags,
            DisableMouseCapture,
            DisableBracketedPaste,
            Hide
        );
    }
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    // Persisted state is loaded once at startup; malformed blobs fall back
    // to defaults with a logged warning.
    let data_dir = persist::data_dir()
        .map_err(|e| {
            warn!("No data directory: {e}; settings will not persist");
            e
        })
        .ok();
    let (settings, theme) = match &data_dir {
        Some(dir) => {
            let settings = persist::load_settings(dir).unwrap_or_else(|e| {
                warn!("Failed to load settings: {e}; using defaults");
                Settings::default()
            });
            (settings, persist::load_theme(dir))
        }
        None => (Settings::default(), Theme::default()),
    };

    let server_label = config
        .base_url
        .trim_start_matches("http://")
        .trim_start_matches("https://")
        .trim_end_matches('/')
        .to_string();
    let mut app = App::new(settings, theme, server_label);
    let mut tui = TuiState::new();

    let client: Arc<dyn ChatTransport> = Arc::new(HttpChatClient::new(
        config.base_url.clone(),
        config.user_id.clone(),
    ));

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();

    // Session-duration tick, once a second for the process lifetime.
    let tick_tx = tx.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(1));
        loop {
            interval.tick().await;
            if tick_tx.send(Action::Tick).is_err() {
                break;
            }
        }
    });

    let mut needs_redraw = true; // Force first frame

    'main: loop {
        if needs_redraw {
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui))?;
            needs_redraw = false;
        }

        // Short poll while waiting keeps the status line lively.
        let timeout = if app.is_waiting {
            Duration::from_millis(80)
        } else {
            Duration::from_millis(250)
        };

        let first_event = poll_event_timeout(timeout);
        if first_event.is_some() {
            needs_redraw = true;
        }

        for tui_event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            // Resize just needs a redraw (already flagged above)
            if matches!(tui_event, TuiEvent::Resize) {
                continue;
            }

            // Ctrl+C always quits regardless of what's open
            if matches!(tui_event, TuiEvent::ForceQuit) {
                if update(&mut app, Action::Quit) == Effect::Quit {
                    break 'main;
                }
                continue;
            }

            // When the settings overlay is open, it takes every event.
            if let Some(panel) = tui.settings_panel.as_mut() {
                match panel.handle_event(&tui_event, &app.settings) {
                    Some(PanelOutcome::Change(change)) => {
                        let effect = update(&mut app, Action::UpdateSetting(change));
                        apply_effect(effect, &app, &data_dir);
                    }
                    Some(PanelOutcome::Dismiss) => tui.settings_panel = None,
                    None => {}
                }
                continue;
            }

            match tui_event {
                TuiEvent::OpenSettings => {
                    tui.settings_panel = Some(SettingsPanelState::new());
                }
                TuiEvent::ToggleTheme => {
                    let effect = update(&mut app, Action::ToggleTheme);
                    apply_effect(effect, &app, &data_dir);
                }
                TuiEvent::ToggleSection(index) => {
                    let slot = &mut tui.collapsed[index as usize];
                    *slot = !*slot;
                }
                TuiEvent::ExportChat => {
                    let _ = update(&mut app, Action::ExportChat);
                }
                TuiEvent::VoiceInput => {
                    let _ = update(&mut app, Action::VoiceInput);
                }
                TuiEvent::HistoryPrev => {
                    if let Some(text) = app.history_prev() {
                        tui.input_box.set_text(text);
                    }
                }
                TuiEvent::HistoryNext => {
                    if let Some(text) = app.history_next() {
                        tui.input_box.set_text(text);
                    }
                }
                TuiEvent::Escape => {
                    if update(&mut app, Action::Quit) == Effect::Quit {
                        break 'main;
                    }
                }
                TuiEvent::ScrollUp
                | TuiEvent::ScrollDown
                | TuiEvent::ScrollPageUp
                | TuiEvent::ScrollPageDown
                | TuiEvent::ScrollToBottom => {
                    tui.transcript.handle_event(&tui_event);
                }
                _ => {
                    if let Some(InputEvent::Submit(text)) = tui.input_box.handle_event(&tui_event)
                    {
                        let effect = update(&mut app, Action::Submit(text));
                        if let Effect::SpawnRequest { message } = effect {
                            // Accepted: clear the buffer and dispatch.
                            tui.input_box.clear();
                            spawn_request(
                                message,
                                app.settings.memory_limit,
                                client.clone(),
                                tx.clone(),
                            );
                        }
                    }
                }
            }
        }

        // Background task actions (chat outcomes, ticks)
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            let effect = update(&mut app, action);
            if effect == Effect::Quit {
                break 'main;
            }
            apply_effect(effect, &app, &data_dir);
        }
    }

    ratatui::restore();
    Ok(())
}

/// Perform the persistence effects the reducer asked for. Failures are
/// logged and the session carries on with its in-memory state.
fn apply_effect(effect: Effect, app: &App, data_dir: &Option<PathBuf>) {
    let Some(dir) = data_dir else { return };
    match effect {
        Effect::PersistSettings => {
            if let Err(e) = persist::save_settings(dir, &app.settings) {
                warn!("Failed to persist settings: {e}");
            }
        }
        Effect::PersistTheme => {
            if let Err(e) = persist::save_theme(dir, app.theme) {
                warn!("Failed to persist theme: {e}");
            }
        }
        _ => {}
    }
}

/// Issue the one network call for this turn. No timeout and no cancellation:
/// the reducer's gate stays closed until the call settles.
fn spawn_request(
    message: String,
    memory_limit: u32,
    client: Arc<dyn ChatTransport>,
    tx: mpsc::Sender<Action>,
) {
    info!("Dispatching chat request ({} chars)", message.chars().count());
    tokio::spawn(async move {
        let started = std::time::Instant::now();
        let result = client.send(&message, memory_limit).await;
        let elapsed_ms = started.elapsed().as_millis() as f64;

        let action = match result {
            Ok(reply) => Action::ResponseArrived { reply, elapsed_ms },
            Err(e) => {
                error!("Chat request failed: {e}");
                Action::RequestFailed(e.to_string())
            }
        };
        if tx.send(action).is_err() {
            warn!("Failed to deliver chat outcome: receiver dropped");
        }
    });
}

//! # Actions
//!
//! Everything that can happen in Mnemo becomes an `Action`. The user presses
//! Enter? That's `Action::Submit`. The server answers? That's
//! `Action::ResponseArrived`.
//!
//! `update()` takes the current state and an action and mutates the state,
//! returning an `Effect` describing the I/O the caller must perform (spawn
//! the request, persist a file, quit). No I/O happens here, which is what
//! makes the send/receive contract testable without a terminal or a server.

use log::debug;

use crate::api::ChatReply;

use super::settings::Settings;
use super::state::{App, Message};

/// Text shown in the status line while a request is in flight.
pub const THINKING_STATUS: &str = "AI is thinking...";
/// Fixed transcript message for transport-level failures.
pub const NETWORK_ERROR_TEXT: &str = "Network error. Please try again.";

#[derive(Debug, Clone)]
pub enum Action {
    /// User submitted the input buffer.
    Submit(String),
    /// The chat call settled successfully (the reply may still carry an
    /// application error). `elapsed_ms` is the locally measured latency,
    /// used when the server does not report its own.
    ResponseArrived { reply: ChatReply, elapsed_ms: f64 },
    /// The chat call failed at the transport level.
    RequestFailed(String),
    /// One settings control changed.
    UpdateSetting(SettingUpdate),
    ToggleTheme,
    /// One-second timer tick; drives the session-duration display.
    Tick,
    /// Export is a stub with no observable effect.
    ExportChat,
    /// Voice input is a stub with no observable effect.
    VoiceInput,
    Quit,
}

/// A change to exactly one settings field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingUpdate {
    AutoScroll(bool),
    ShowTimestamps(bool),
    SoundNotifications(bool),
    MemoryLimit(u32),
}

/// I/O the caller must perform after an update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Dispatch the chat request for this message text.
    SpawnRequest { message: String },
    /// Write the full settings object to disk now.
    PersistSettings,
    /// Write the theme preference to disk now.
    PersistTheme,
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::Submit(text) => {
            let trimmed = text.trim();
            // Empty input and send-while-busy are silent no-ops.
            if trimmed.is_empty() || app.is_waiting {
                return Effect::None;
            }

            app.transcript.push(Message::user(trimmed));
            app.input_history.push(trimmed.to_string());
            app.history_browse = None;
            app.total_messages += 1;

            app.is_waiting = true;
            app.status_message = THINKING_STATUS.to_string();

            Effect::SpawnRequest {
                message: trimmed.to_string(),
            }
        }

        Action::ResponseArrived { reply, elapsed_ms } => {
            // Indicator clears first, in every outcome.
            clear_typing_indicator(app);

            if let Some(error) = reply.error {
                app.transcript.push(Message::bot_error(error));
                return Effect::None;
            }

            app.total_memories = reply.recalled_memories();
            app.last_response_ms = Some(reply.processing_time.unwrap_or(elapsed_ms));
            app.memory_hits = reply.memory_count.unwrap_or(0);

            app.transcript
                .push(Message::bot(reply.response.unwrap_or_default()));

            if let Some(context) = reply.context {
                app.context_report = Some(context);
            }

            Effect::None
        }

        Action::RequestFailed(reason) => {
            clear_typing_indicator(app);
            debug!("request failed: {reason}");
            app.transcript.push(Message::bot_error(NETWORK_ERROR_TEXT));
            Effect::None
        }

        Action::UpdateSetting(change) => {
            match change {
                SettingUpdate::AutoScroll(v) => app.settings.auto_scroll = v,
                SettingUpdate::ShowTimestamps(v) => app.settings.show_timestamps = v,
                SettingUpdate::SoundNotifications(v) => app.settings.sound_notifications = v,
                SettingUpdate::MemoryLimit(v) => {
                    app.settings.memory_limit = Settings::clamp_memory_limit(v)
                }
            }
            Effect::PersistSettings
        }

        Action::ToggleTheme => {
            app.theme = app.theme.toggled();
            Effect::PersistTheme
        }

        Action::Tick => Effect::None,

        // Stubs: bound in the UI, deliberately without behavior.
        Action::ExportChat | Action::VoiceInput => Effect::None,

        Action::Quit => Effect::Quit,
    }
}

fn clear_typing_indicator(app: &mut App) {
    app.is_waiting = false;
    app.status_message.clear();
}

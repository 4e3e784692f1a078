//! # Application State
//!
//! Core business state for Mnemo. This module contains domain data only -
//! no TUI-specific types. Presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── transcript: Vec<Message>       // append-only conversation
//! ├── input_history: Vec<String>     // raw sent texts, for recall
//! ├── history_browse: Option<usize>  // None = not browsing
//! ├── total_messages: u64            // user sends this session
//! ├── total_memories: u64            // hits from the last reply
//! ├── memory_hits: u64               // server-reported hit figure
//! ├── last_response_ms: Option<f64>  // latest turn's latency
//! ├── context_report: Option<..>     // latest prompt-debug payload
//! ├── settings / theme               // persisted preferences
//! ├── status_message: String         // typing indicator text
//! ├── is_waiting: bool               // one request in flight
//! └── session_start: Instant         // fixed at startup
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.
//! This keeps things predictable, so no surprise mutations.

use std::time::Instant;

use chrono::{DateTime, Local};

use crate::api::ContextReport;

use super::settings::{Settings, Theme};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Bot,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Normal,
    Error,
}

/// One transcript entry. Immutable once appended; never removed.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub sender: Sender,
    pub kind: MessageKind,
    pub content: String,
    pub at: DateTime<Local>,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            sender: Sender::User,
            kind: MessageKind::Normal,
            content: content.into(),
            at: Local::now(),
        }
    }

    pub fn bot(content: impl Into<String>) -> Self {
        Self {
            sender: Sender::Bot,
            kind: MessageKind::Normal,
            content: content.into(),
            at: Local::now(),
        }
    }

    pub fn bot_error(content: impl Into<String>) -> Self {
        Self {
            sender: Sender::Bot,
            kind: MessageKind::Error,
            content: content.into(),
            at: Local::now(),
        }
    }
}

pub struct App {
    pub transcript: Vec<Message>,
    pub input_history: Vec<String>,
    pub history_browse: Option<usize>,
    pub total_messages: u64,
    pub total_memories: u64,
    pub memory_hits: u64,
    pub last_response_ms: Option<f64>,
    pub context_report: Option<ContextReport>,
    pub settings: Settings,
    pub theme: Theme,
    pub status_message: String,
    pub is_waiting: bool,
    pub session_start: Instant,
    /// Server label shown in the title bar (host the client talks to).
    pub server_label: String,
}

impl App {
    pub fn new(settings: Settings, theme: Theme, server_label: String) -> Self {
        Self {
            transcript: Vec::new(),
            input_history: Vec::new(),
            history_browse: None,
            total_messages: 0,
            total_memories: 0,
            memory_hits: 0,
            last_response_ms: None,
            context_report: None,
            settings,
            theme,
            status_message: String::new(),
            is_waiting: false,
            session_start: Instant::now(),
            server_label,
        }
    }

    /// Elapsed session time formatted MM:SS; minutes overflow past 99
    /// naturally rather than capping.
    pub fn session_duration(&self) -> String {
        format_duration_secs(self.session_start.elapsed().as_secs())
    }

    /// Step backwards through sent inputs. Returns the entry to load into
    /// the input buffer, or None when there is no history.
    pub fn history_prev(&mut self) -> Option<String> {
        if self.input_history.is_empty() {
            return None;
        }
        let index = match self.history_browse {
            None => self.input_history.len() - 1,
            Some(i) => i.saturating_sub(1),
        };
        self.history_browse = Some(index);
        Some(self.input_history[index].clone())
    }

    /// Step forwards through sent inputs. Walking past the newest entry
    /// leaves browsing and clears the buffer.
    pub fn history_next(&mut self) -> Option<String> {
        match self.history_browse {
            None => None,
            Some(i) if i + 1 < self.input_history.len() => {
                self.history_browse = Some(i + 1);
                Some(self.input_history[i + 1].clone())
            }
            Some(_) => {
                self.history_browse = None;
                Some(String::new())
            }
        }
    }
}

pub fn format_duration_secs(total_secs: u64) -> String {
    format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
}

//! # TUI Components
//!
//! Stateless panels receive everything as props (`insights`, `context_view`,
//! `message`); stateful ones own their presentation state and emit
//! high-level events (`input_box`, `transcript`, `settings_panel`). Each
//! file keeps its state, events, rendering and tests together.

pub mod context_view;
pub mod input_box;
pub mod insights;
pub mod message;
pub mod settings_panel;
pub mod transcript;

pub use input_box::{InputBox, InputEvent};
pub use settings_panel::{PanelOutcome, SettingsPanelState};
pub use transcript::TranscriptState;

//! # Core Application Logic
//!
//! This module contains Mnemo's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (app data)     │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │  • Settings + persist   │
//!                    │                         │
//!                    │  No terminal. No HTTP.  │
//!                    └───────────┬─────────────┘
//!                                │
//!            ┌───────────────────┼───────────────────┐
//!            ▼                   ▼                   ▼
//!     ┌────────────┐      ┌────────────┐      ┌────────────┐
//!     │    TUI     │      │ Transport  │      │ ~/.mnemo/  │
//!     │  Adapter   │      │  Adapter   │      │  (files)   │
//!     │ (ratatui)  │      │ (reqwest)  │      │            │
//!     └────────────┘      └────────────┘      └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct, all application state in one place
//! - [`action`]: The `Action` enum and `update()` reducer
//! - [`settings`]: User settings and the light/dark theme
//! - [`persist`]: Settings/theme files under `~/.mnemo/`
//! - [`config`]: Startup configuration (server URL, identity)

pub mod action;
pub mod config;
pub mod persist;
pub mod settings;
pub mod state;

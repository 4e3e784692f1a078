//! # Transport Adapter
//!
//! Everything that touches the network lives here: the wire types for the
//! chat endpoint and the HTTP client that performs the single outbound call
//! per user turn. The rest of the crate talks to [`ChatTransport`], never to
//! `reqwest` directly.

pub mod client;
pub mod types;

pub use client::{ChatTransport, ClientError, HttpChatClient};
pub use types::{ChatReply, ChatRequest, ContextReport, EpisodeRef, SemanticHits, ShortTermTurn};

//! HTTP transport for the chat endpoint.
//!
//! One request type, non-streaming: POST the user's message plus the
//! configured memory limit, await a JSON reply. The transport is behind the
//! [`ChatTransport`] trait so the reducer and TUI can be exercised with a
//! fake in tests.

use std::fmt;

use async_trait::async_trait;
use log::debug;

use super::types::{ChatReply, ChatRequest};

/// Errors the transport can surface. Both map to the same fixed message in
/// the transcript; the distinction is kept for diagnostics.
#[derive(Debug)]
pub enum ClientError {
    /// Network-level failure (DNS, connection refused, reset mid-body).
    Network(String),
    /// The body arrived but was not valid JSON for the reply shape.
    Parse(String),
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientError::Network(msg) => write!(f, "network error: {msg}"),
            ClientError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for ClientError {}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ClientError::Parse(e.to_string())
        } else {
            ClientError::Network(e.to_string())
        }
    }
}

/// The single operation the rest of the app needs from the network.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    async fn send(&self, message: &str, memory_limit: u32) -> Result<ChatReply, ClientError>;
}

/// Real transport: one `reqwest` client pointed at a fixed base URL.
pub struct HttpChatClient {
    http: reqwest::Client,
    base_url: String,
    user_id: Option<String>,
}

impl HttpChatClient {
    pub fn new(base_url: String, user_id: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            user_id,
        }
    }

    fn chat_url(&self) -> String {
        format!("{}/chat", self.base_url)
    }
}

#[async_trait]
impl ChatTransport for HttpChatClient {
    async fn send(&self, message: &str, memory_limit: u32) -> Result<ChatReply, ClientError> {
        let request = ChatRequest {
            message: message.to_string(),
            memory_limit,
            user_id: self.user_id.clone(),
        };

        debug!(
            "POST {} ({} chars, memory_limit={})",
            self.chat_url(),
            message.chars().count(),
            memory_limit
        );

        // The server reports application failures (e.g. 400 on an empty
        // message) as a JSON body with an `error` field, so the status code
        // is not checked here; non-JSON bodies become a Parse error.
        let response = self.http.post(self.chat_url()).json(&request).send().await?;
        let reply: ChatReply = response.json().await?;

        if reply.cache_hit {
            debug!("reply served from the server's semantic cache");
        }

        Ok(reply)
    }
}

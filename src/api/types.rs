//! Wire types for the chat endpoint.
//!
//! The server answers every request with a single JSON object. All fields
//! are optional except the success/error discrimination: a reply either
//! carries `error` (application failure, shown as an error bubble) or
//! `response` (markdown text). The rest is retrieval metadata used by the
//! insight panels.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of the one outbound request type: `POST {base}/chat`.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ChatRequest {
    pub message: String,
    pub memory_limit: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

/// The server's reply. Unknown fields (e.g. `timestamp`) are ignored.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct ChatReply {
    pub error: Option<String>,
    pub response: Option<String>,
    #[serde(default)]
    pub cache_hit: bool,
    #[serde(default)]
    pub episodic_hits: Vec<Value>,
    #[serde(default)]
    pub semantic_hits: SemanticHits,
    /// Server-side processing time in milliseconds.
    pub processing_time: Option<f64>,
    /// Server's own count of memories woven into the prompt.
    pub memory_count: Option<u64>,
    pub context: Option<ContextReport>,
}

impl ChatReply {
    /// Combined size of the two retrieval hit lists.
    pub fn recalled_memories(&self) -> u64 {
        (self.episodic_hits.len() + self.semantic_hits.len()) as u64
    }
}

/// Semantic retrieval hits.
///
/// The server sends a flat (empty) list on cache hits and a per-type map on
/// the full retrieval path. Both shapes count by total length.
#[derive(Deserialize, Debug, Clone)]
#[serde(untagged)]
pub enum SemanticHits {
    Flat(Vec<Value>),
    Grouped {
        #[serde(default)]
        persona: Vec<Value>,
        #[serde(default)]
        knowledge: Vec<Value>,
        #[serde(default)]
        process: Vec<Value>,
    },
}

impl Default for SemanticHits {
    fn default() -> Self {
        SemanticHits::Flat(Vec::new())
    }
}

impl SemanticHits {
    pub fn len(&self) -> usize {
        match self {
            SemanticHits::Flat(items) => items.len(),
            SemanticHits::Grouped {
                persona,
                knowledge,
                process,
            } => persona.len() + knowledge.len() + process.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Debug view of the prompt the server assembled, forwarded verbatim to the
/// context panel. A `note` short-circuits the structured sections.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct ContextReport {
    pub note: Option<String>,
    #[serde(default)]
    pub persona: Vec<String>,
    #[serde(default)]
    pub knowledge: Vec<String>,
    #[serde(default)]
    pub process: Vec<String>,
    #[serde(default)]
    pub episodic: Vec<EpisodeRef>,
    #[serde(default)]
    pub short_term: Vec<ShortTermTurn>,
    pub final_prompt: Option<String>,
}

/// One retrieved episode; only the user side is surfaced.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct EpisodeRef {
    #[serde(default)]
    pub user: String,
}

/// One recent conversational turn from the server's short-term window.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct ShortTermTurn {
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serialization_without_user_id() {
        let req = ChatRequest {
            message: "hello".to_string(),
            memory_limit: 3,
            user_id: None,
        };
        let serialized = serde_json::to_string(&req).unwrap();
        assert_eq!(serialized, r#"{"message":"hello","memory_limit":3}"#);
    }

    #[test]
    fn test_request_serialization_with_user_id() {
        let req = ChatRequest {
            message: "hi".to_string(),
            memory_limit: 5,
            user_id: Some("alice".to_string()),
        };
        let serialized = serde_json::to_string(&req).unwrap();
        assert_eq!(
            serialized,
            r#"{"message":"hi","memory_limit":5,"user_id":"alice"}"#
        );
    }

    #[test]
    fn test_reply_full_retrieval_path() {
        let body = r#"{
            "response": "Rust is a systems language.",
            "cache_hit": false,
            "episodic_hits": [{"user": "tell me about rust"}],
            "semantic_hits": {
                "persona": [{"content": "likes terse answers"}],
                "knowledge": [{"content": "user writes Go"}, {"content": "user is learning Rust"}],
                "process": []
            },
            "processing_time": 412.73,
            "memory_count": 4,
            "timestamp": 1700000000.0
        }"#;
        let reply: ChatReply = serde_json::from_str(body).unwrap();
        assert!(reply.error.is_none());
        assert_eq!(reply.response.as_deref(), Some("Rust is a systems language."));
        assert_eq!(reply.episodic_hits.len(), 1);
        assert_eq!(reply.semantic_hits.len(), 3);
        assert_eq!(reply.recalled_memories(), 4);
        assert_eq!(reply.processing_time, Some(412.73));
        assert_eq!(reply.memory_count, Some(4));
    }

    #[test]
    fn test_reply_cache_hit_path() {
        let body = r#"{
            "response": "cached answer",
            "cache_hit": true,
            "episodic_hits": [],
            "semantic_hits": [],
            "processing_time": 1.62,
            "memory_count": 0,
            "context": {"note": "Response served from semantic cache"}
        }"#;
        let reply: ChatReply = serde_json::from_str(body).unwrap();
        assert!(reply.cache_hit);
        assert_eq!(reply.recalled_memories(), 0);
        let context = reply.context.unwrap();
        assert_eq!(
            context.note.as_deref(),
            Some("Response served from semantic cache")
        );
    }

    #[test]
    fn test_reply_error_only() {
        let reply: ChatReply = serde_json::from_str(r#"{"error": "Empty message"}"#).unwrap();
        assert_eq!(reply.error.as_deref(), Some("Empty message"));
        assert!(reply.response.is_none());
        assert_eq!(reply.recalled_memories(), 0);
    }

    #[test]
    fn test_semantic_hits_flat_counts_by_length() {
        let hits: SemanticHits = serde_json::from_str(r#"[1, 2, 3]"#).unwrap();
        assert_eq!(hits.len(), 3);
        assert!(!hits.is_empty());
    }

    #[test]
    fn test_context_report_sparse_fields_default() {
        let context: ContextReport =
            serde_json::from_str(r#"{"persona": ["night owl"]}"#).unwrap();
        assert_eq!(context.persona, vec!["night owl".to_string()]);
        assert!(context.knowledge.is_empty());
        assert!(context.short_term.is_empty());
        assert!(context.note.is_none());
        assert!(context.final_prompt.is_none());
    }

    #[test]
    fn test_context_report_short_term_turns() {
        let context: ContextReport = serde_json::from_str(
            r#"{"short_term": [{"role": "user", "content": "hi"}, {"role": "assistant", "content": "hello"}]}"#,
        )
        .unwrap();
        assert_eq!(context.short_term.len(), 2);
        assert_eq!(context.short_term[0].role, "user");
        assert_eq!(context.short_term[1].content, "hello");
    }
}

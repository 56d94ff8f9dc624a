use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::atomic::{AtomicI64, Ordering};

/// One turn in a conversation.
///
/// Serialized camelCase so the records match what the store already holds
/// from earlier versions of the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: String,
    pub content: String,
    pub sender: Sender,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub is_error: bool,
    /// Full upstream payload for assistant turns, kept for feedback
    /// submission. Opaque: no schema is assumed beyond what the feedback
    /// sender inspects.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_response: Option<Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Assistant,
}

impl Message {
    /// A user turn with the raw input text.
    pub fn user(content: impl Into<String>) -> Self {
        Self::build(content.into(), Sender::User, false, None)
    }

    /// An assistant turn with sanitized content and the upstream payload.
    pub fn assistant(content: impl Into<String>, raw_response: Option<Value>) -> Self {
        Self::build(content.into(), Sender::Assistant, false, raw_response)
    }

    /// An assistant-side failure notice.
    pub fn error(content: impl Into<String>) -> Self {
        Self::build(content.into(), Sender::Assistant, true, None)
    }

    fn build(content: String, sender: Sender, is_error: bool, raw_response: Option<Value>) -> Self {
        Self {
            id: next_message_id(),
            content,
            sender,
            timestamp: Utc::now(),
            is_error,
            raw_response,
        }
    }
}

/// Creation-time-derived id: milliseconds since epoch, bumped past the last
/// issued id so two messages created in the same millisecond still order
/// correctly as strings of equal length.
fn next_message_id() -> String {
    static LAST: AtomicI64 = AtomicI64::new(0);
    let now = Utc::now().timestamp_millis();
    let mut prev = LAST.load(Ordering::Relaxed);
    loop {
        let next = now.max(prev + 1);
        match LAST.compare_exchange_weak(prev, next, Ordering::Relaxed, Ordering::Relaxed) {
            Ok(_) => return next.to_string(),
            Err(observed) => prev = observed,
        }
    }
}

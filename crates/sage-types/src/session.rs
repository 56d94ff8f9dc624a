use crate::message::Message;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Title given to every freshly created session. Auto-derivation from the
/// first user message only happens while the title still reads this value.
pub const DEFAULT_SESSION_TITLE: &str = "New Chat";

const TITLE_MAX_CHARS: usize = 30;

/// A named, ordered conversation the user can switch between.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatSession {
    pub id: String,
    pub title: String,
    /// Content of the most recent message, cached for list previews.
    pub last_message: String,
    /// Last-activity time, refreshed on every message update.
    pub timestamp: DateTime<Utc>,
    pub messages: Vec<Message>,
}

impl ChatSession {
    pub fn new() -> Self {
        Self::with_id(Uuid::new_v4().to_string())
    }

    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: DEFAULT_SESSION_TITLE.to_string(),
            last_message: String::new(),
            timestamp: Utc::now(),
            messages: Vec::new(),
        }
    }

    pub fn has_default_title(&self) -> bool {
        self.title == DEFAULT_SESSION_TITLE
    }
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}

/// First 30 characters of the first message, with an ellipsis marker when
/// truncated. Counts chars, not bytes, so multi-byte content never splits.
pub fn derive_title(first_message: &str) -> String {
    let mut title: String = first_message.chars().take(TITLE_MAX_CHARS).collect();
    if first_message.chars().count() > TITLE_MAX_CHARS {
        title.push_str("...");
    }
    title
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_title_kept_verbatim() {
        assert_eq!(derive_title("What is gravity?"), "What is gravity?");
    }

    #[test]
    fn test_long_title_truncated_with_ellipsis() {
        let content = "Explain the difference between speed and velocity";
        let title = derive_title(content);
        assert_eq!(title, "Explain the difference between...");
        assert_eq!(title.chars().count(), 33);
    }

    #[test]
    fn test_multibyte_title_counts_chars() {
        let content = "é".repeat(40);
        assert_eq!(derive_title(&content), format!("{}...", "é".repeat(30)));
    }
}

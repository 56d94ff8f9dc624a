use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;

/// Feedback on one assistant answer. `response` is the upstream payload (or
/// the part of it the server echoed back) attached to the message.
#[derive(Debug, Clone, Serialize)]
pub struct FeedbackRequest {
    pub question: String,
    pub response: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

/// Best-effort feedback submission. Failures are logged and swallowed;
/// nothing here may disturb the conversation flow.
pub struct FeedbackSender {
    http_client: reqwest::Client,
    url: String,
}

impl FeedbackSender {
    pub fn new(base_url: &str) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            http_client,
            url: format!("{}/feedback", base_url.trim_end_matches('/')),
        })
    }

    pub async fn send(&self, feedback: FeedbackRequest) {
        match self.http_client.post(&self.url).json(&feedback).send().await {
            Ok(response) if response.status().is_success() => {
                tracing::debug!("feedback delivered");
            }
            Ok(response) => {
                tracing::warn!(status = %response.status(), "feedback rejected by server");
            }
            Err(err) => {
                tracing::warn!(%err, "feedback submission failed");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_feedback_payload_shape() {
        let feedback = FeedbackRequest {
            question: "What is gravity?".to_string(),
            response: json!({"answer": "Gravity pulls things down."}),
            rating: Some(5),
            comment: None,
        };
        let encoded = serde_json::to_value(&feedback).unwrap();
        assert_eq!(encoded["question"], "What is gravity?");
        assert_eq!(encoded["rating"], 5);
        assert!(encoded.get("comment").is_none());
    }
}

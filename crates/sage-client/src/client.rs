use crate::config::ClientConfig;
use crate::error::{AskError, Result, TransportError};
use crate::sanitize::sanitize;
use crate::transport::{AskTransport, HttpTransport, RawReply};
use sage_types::AnswerMode;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

/// Outbound question payload.
#[derive(Debug, Clone, Serialize)]
pub struct AskRequest {
    pub question: String,
    pub mode: String,
    pub student_level: f64,
    pub max_concepts: u32,
}

impl AskRequest {
    pub fn new(question: impl Into<String>, mode: AnswerMode) -> Self {
        Self {
            question: question.into(),
            mode: "enhanced".to_string(),
            student_level: mode.student_level(),
            max_concepts: 5,
        }
    }
}

/// A fully successful ask: display text plus the untouched upstream payload
/// (kept for feedback submission).
#[derive(Debug, Clone)]
pub struct Answer {
    pub cleaned: String,
    pub raw: Value,
}

/// Asks the tutor service a question with bounded retries.
///
/// Only transport failures (connect errors, timeouts) are retried, with
/// linear backoff between attempts. Anything the server actually said, good
/// or bad, is terminal on the first attempt that said it.
pub struct AskClient {
    transport: Arc<dyn AskTransport>,
    config: ClientConfig,
}

impl AskClient {
    pub fn new(config: ClientConfig) -> anyhow::Result<Self> {
        let transport = HttpTransport::new(&config.base_url)?;
        Ok(Self {
            transport: Arc::new(transport),
            config,
        })
    }

    /// Swap in a different transport (tests, alternative wire protocols).
    pub fn with_transport(transport: Arc<dyn AskTransport>, config: ClientConfig) -> Self {
        Self { transport, config }
    }

    pub async fn ask(&self, question: &str, mode: AnswerMode) -> Result<Answer> {
        let request = AskRequest::new(question, mode);
        let max_attempts = self.config.max_attempts.max(1);

        for attempt in 1..=max_attempts {
            let attempt_result =
                match tokio::time::timeout(self.config.attempt_timeout, self.transport.send(&request))
                    .await
                {
                    Ok(sent) => sent,
                    Err(_) => Err(TransportError::Timeout),
                };

            match attempt_result {
                Ok(reply) => return classify_reply(reply),
                Err(err) if attempt < max_attempts => {
                    let backoff = self.config.backoff_step * attempt;
                    tracing::debug!(
                        %err,
                        attempt,
                        backoff_ms = backoff.as_millis() as u64,
                        "transport failure, backing off before retry"
                    );
                    tokio::time::sleep(backoff).await;
                }
                Err(err) => {
                    tracing::warn!(%err, attempts = max_attempts, "all attempts failed");
                    return Err(AskError::Unavailable);
                }
            }
        }

        Err(AskError::Unavailable)
    }
}

/// Turns a received reply into an answer or a terminal error. Pure.
fn classify_reply(reply: RawReply) -> Result<Answer> {
    let data: Value = match serde_json::from_str(&reply.body) {
        Ok(value) => value,
        Err(_) if !reply.ok => {
            return Err(AskError::Status {
                status: reply.status,
                message: status_message(reply.status),
            })
        }
        Err(_) => return Err(AskError::InvalidJson),
    };

    if !reply.ok {
        let message = server_message(&data).unwrap_or_else(|| status_message(reply.status));
        return Err(AskError::Status {
            status: reply.status,
            message,
        });
    }

    if data.get("success").and_then(Value::as_bool) == Some(false) {
        let message = server_message(&data).unwrap_or_else(|| "AI returned an error".to_string());
        return Err(AskError::Upstream(message));
    }

    let raw_answer = data
        .pointer("/response/answer")
        .and_then(Value::as_str)
        .unwrap_or_default();
    if raw_answer.is_empty() {
        return Err(AskError::EmptyAnswer);
    }

    let cleaned = sanitize(raw_answer);
    if cleaned.is_empty() {
        return Err(AskError::EmptySanitized);
    }

    Ok(Answer { cleaned, raw: data })
}

fn server_message(data: &Value) -> Option<String> {
    data.get("error")
        .and_then(Value::as_str)
        .or_else(|| data.get("message").and_then(Value::as_str))
        .map(str::to_string)
}

fn status_message(status: u16) -> String {
    match reqwest::StatusCode::from_u16(status)
        .ok()
        .and_then(|s| s.canonical_reason())
    {
        Some(reason) => format!("HTTP {}: {}", status, reason),
        None => format!("HTTP {}", status),
    }
}

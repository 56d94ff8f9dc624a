use std::time::Duration;

/// Default tutor service endpoint.
pub const DEFAULT_BASE_URL: &str = "http://185.136.234.250:5001";

/// Tuning for the retrying ask client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    /// Total attempts per question, including the first.
    pub max_attempts: u32,
    /// Independent deadline for each attempt; an elapsed deadline cancels
    /// the in-flight call and counts as a transport failure.
    pub attempt_timeout: Duration,
    /// Backoff between attempts grows linearly: step, 2 * step, ...
    pub backoff_step: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            max_attempts: 3,
            attempt_timeout: Duration::from_secs(15),
            backoff_step: Duration::from_millis(500),
        }
    }
}

impl ClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts;
        self
    }

    pub fn with_attempt_timeout(mut self, timeout: Duration) -> Self {
        self.attempt_timeout = timeout;
        self
    }

    pub fn with_backoff_step(mut self, step: Duration) -> Self {
        self.backoff_step = step;
        self
    }
}

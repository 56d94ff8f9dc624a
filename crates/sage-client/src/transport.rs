use crate::client::AskRequest;
use crate::error::TransportError;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};

/// A received reply, before any interpretation. Classification of the body
/// happens in the client so it stays pure and testable.
#[derive(Debug, Clone)]
pub struct RawReply {
    pub status: u16,
    pub ok: bool,
    pub body: String,
}

/// One network round-trip for a question. Behind a trait so the retry loop
/// can be exercised without a server.
#[async_trait]
pub trait AskTransport: Send + Sync {
    async fn send(&self, request: &AskRequest) -> std::result::Result<RawReply, TransportError>;
}

/// Production transport: POSTs the question to `{base_url}/ask`.
pub struct HttpTransport {
    http_client: reqwest::Client,
    url: String,
}

impl HttpTransport {
    pub fn new(base_url: &str) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http_client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            http_client,
            url: format!("{}/ask", base_url.trim_end_matches('/')),
        })
    }
}

#[async_trait]
impl AskTransport for HttpTransport {
    async fn send(&self, request: &AskRequest) -> std::result::Result<RawReply, TransportError> {
        let response = self
            .http_client
            .post(&self.url)
            .json(request)
            .send()
            .await
            .map_err(classify_reqwest_error)?;

        let status = response.status();
        let body = response.text().await.map_err(classify_reqwest_error)?;

        Ok(RawReply {
            status: status.as_u16(),
            ok: status.is_success(),
            body,
        })
    }
}

fn classify_reqwest_error(err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        TransportError::Timeout
    } else {
        TransportError::Network(err.to_string())
    }
}

pub mod client;
pub mod config;
pub mod error;
pub mod feedback;
pub mod sanitize;
pub mod transport;

pub use client::{Answer, AskClient, AskRequest};
pub use config::{ClientConfig, DEFAULT_BASE_URL};
pub use error::{AskError, TransportError};
pub use feedback::{FeedbackRequest, FeedbackSender};
pub use sanitize::{sanitize, strip_reasoning};
pub use transport::{AskTransport, HttpTransport, RawReply};

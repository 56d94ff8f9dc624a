//! # Sage - session-backed AI tutor chat core
//!
//! Sage is the engine behind a tutor chat client:
//! - **Answer sanitization** (reasoning blocks and markdown stripped for display)
//! - **Bounded retries** (transport failures only, linear backoff, per-attempt deadline)
//! - **Persistent sessions** (write-through history over a pluggable key-value store)
//! - **One controller** tying input, fetch, and history together
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use sage::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let storage = FileStorage::new("./sage-state")?;
//!     let store = SessionStore::load(Box::new(storage))?;
//!     let client = AskClient::new(ClientConfig::default())?;
//!
//!     let mut chat = ChatController::new(store, client);
//!     chat.send_message("What is gravity?").await?;
//!
//!     for message in chat.messages() {
//!         println!("{:?}: {}", message.sender, message.content);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! Sage consists of several composable crates:
//!
//! - **sage-types**: Core data model (Message, ChatSession, AnswerMode)
//! - **sage-client**: Sanitizer, retrying ask client, feedback sender
//! - **sage-store**: Session store over injected key-value storage
//! - **sage-chat**: Conversation controller

pub use sage_chat as chat;
pub use sage_client as client;
pub use sage_store as store;
pub use sage_types as types;

pub use sage_chat::{ChatController, ChatError};
pub use sage_client::{Answer, AskClient, AskError, ClientConfig, FeedbackSender};
pub use sage_store::{FileStorage, MemoryStorage, SessionStore, StateStorage, StoreError};
pub use sage_types::{AnswerMode, ChatSession, Message, Sender};

/// Everything needed to wire up a working chat in one import.
pub mod prelude {
    pub use sage_chat::{ChatController, ChatError, FAILURE_NOTICE};
    pub use sage_client::{
        sanitize, Answer, AskClient, AskError, AskTransport, ClientConfig, FeedbackRequest,
        FeedbackSender,
    };
    pub use sage_store::{FileStorage, MemoryStorage, SessionStore, StateStorage, StoreError};
    pub use sage_types::{AnswerMode, ChatSession, Message, Sender};
}

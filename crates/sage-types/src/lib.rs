pub mod message;
pub mod mode;
pub mod session;

pub use message::{Message, Sender};
pub use mode::AnswerMode;
pub use session::{derive_title, ChatSession, DEFAULT_SESSION_TITLE};

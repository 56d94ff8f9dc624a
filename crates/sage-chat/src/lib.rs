pub mod controller;

pub use controller::{ChatController, ChatError, FAILURE_NOTICE};

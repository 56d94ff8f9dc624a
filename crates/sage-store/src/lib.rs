pub mod error;
pub mod storage;
pub mod store;

pub use error::{Result, StoreError};
pub use storage::{FileStorage, MemoryStorage, StateStorage};
pub use store::SessionStore;

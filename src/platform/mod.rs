//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Key/value storage (LocalStorage on web, JSON file on native)
//! - The mini-app host handshake

pub mod host;
pub mod storage;

pub use host::{HostContext, PlayerNamespace, signal_ready};
#[cfg(not(target_arch = "wasm32"))]
pub use storage::FileStore;
#[cfg(target_arch = "wasm32")]
pub use storage::LocalStore;
pub use storage::{KeyValueStore, MemoryStore, StorageError, load_json, save_json};

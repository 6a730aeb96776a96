// Adapters layer: concrete implementations of the domain ports (http client, key-value stores).

pub mod http;
pub mod storage;

pub use storage::{MemoryStore, TomlFileStore};

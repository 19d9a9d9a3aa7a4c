//! Infrastructure: key-value storage and markdown rendering

mod kv_store;
mod markdown;

pub use kv_store::{FileStore, KeyValueStore, MemoryStore, StoreError};
pub use markdown::markdown_to_html;

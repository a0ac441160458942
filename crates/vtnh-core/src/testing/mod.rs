//! In-memory backends for testing without a browser.

mod memory_document;
mod memory_store;

pub use memory_document::{MemoryDocument, NodeId};
pub use memory_store::MemoryStore;

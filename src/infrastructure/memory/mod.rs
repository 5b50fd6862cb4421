//! In-memory backend

pub mod store;

pub use store::MemoryStore;

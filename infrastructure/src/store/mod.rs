//! History store adapters

pub mod memory;

pub use memory::MemoryHistoryStore;

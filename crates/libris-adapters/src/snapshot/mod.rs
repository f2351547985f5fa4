//! Library snapshot adapters.
//!
//! - [`InMemorySnapshot`]: thread-safe store implementing `LibrarySnapshot`
//! - [`loader`]: JSON snapshot documents resolved into the entity graph

pub mod loader;
mod memory;

pub use loader::SnapshotDocument;
pub use memory::InMemorySnapshot;

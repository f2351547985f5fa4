//! Infrastructure adapters for Libris.
//!
//! This crate implements the ports defined in `libris-core::application::ports`
//! and owns everything that touches the outside world: snapshot files,
//! rulebook configuration and the tracing subscriber.

pub mod error;
pub mod logging;
pub mod rulebook;
pub mod snapshot;

// Re-export commonly used adapters
pub use error::AdapterError;
pub use logging::{LogSettings, init_logging};
pub use rulebook::RulebookLoader;
pub use snapshot::InMemorySnapshot;

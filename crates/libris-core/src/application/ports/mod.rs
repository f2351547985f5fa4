//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `libris-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `LibrarySnapshot`: read access to readers, catalog, loans and taxonomy
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (The policy services themselves)

pub mod output;

pub use output::LibrarySnapshot;
#[cfg(any(test, feature = "mocks"))]
pub use output::MockLibrarySnapshot;

//! Service implementations
//!
//! In-memory implementations of the collaborator traits, used by the demo
//! binary and by tests that drive the pipeline with live updates.

pub mod in_memory;
pub mod snapshot_source;

#[cfg(test)]
mod tests;

// Re-export all service implementations
pub use in_memory::{InMemoryCatalogRepository, InMemoryLibraryRepository};
pub use snapshot_source::SnapshotSource;

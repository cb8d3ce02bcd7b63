//! Live catalog aggregation and ranking
//!
//! Merges the bundled and installed catalog streams into one list and keeps
//! it ordered by name or by the user's favorites as any input changes.

pub mod aggregator;
pub mod core;
pub mod error;
pub mod scenario;
pub mod services;
pub mod traits;

// Re-export commonly used types
pub use aggregator::{CatalogAggregator, OrderedCatalogStream};
pub use crate::core::{combine_latest, CatalogMerger, FavoritesRankStream, RankPolicy};
pub use error::{AggregatorError, AggregatorResult};
pub use scenario::{Scenario, ScenarioStep};
pub use services::{InMemoryCatalogRepository, InMemoryLibraryRepository, SnapshotSource};
pub use traits::{
    CatalogRepository, CatalogStream, FavoriteIdStream, LibraryRepository, MockCatalogRepository,
    MockLibraryRepository, SourceStream,
};

//! Test fixtures and data for aggregator tests
//!
//! Consistent catalog data used across all test suites.

use shared::{Catalog, SourceId};

/// Standard test data and fixtures
pub struct TestFixtures;

impl TestFixtures {
    pub const BATOTO_ID: i64 = 1;
    pub const AGGREGATOR_ID: i64 = 2;
    pub const COMICK_ID: i64 = 3;
    pub const MANGADEX_ID: i64 = 4;

    /// The bundled catalog used by the reference scenario
    pub fn batoto() -> Catalog {
        Catalog::internal(Self::BATOTO_ID, "Batoto")
    }

    /// The installed catalog used by the reference scenario
    pub fn aggregator() -> Catalog {
        Catalog::installed(Self::AGGREGATOR_ID, "Aggregator")
    }

    pub fn comick() -> Catalog {
        Catalog::installed(Self::COMICK_ID, "Comick")
    }

    pub fn mangadex() -> Catalog {
        Catalog::internal(Self::MANGADEX_ID, "MangaDex")
    }

    pub fn internal_catalogs() -> Vec<Catalog> {
        vec![Self::batoto()]
    }

    pub fn installed_catalogs() -> Vec<Catalog> {
        vec![Self::aggregator()]
    }

    pub fn favorites(ids: &[i64]) -> Vec<SourceId> {
        ids.iter().copied().map(SourceId).collect()
    }
}

//! Test helpers and builder patterns for aggregator tests
//!
//! Builders wire in-memory collaborators with sensible defaults; helpers wrap
//! the stream plumbing with timeouts so a stuck pipeline fails fast.

use std::time::Duration;

use aggregator::{
    AggregatorError, CatalogAggregator, InMemoryCatalogRepository, InMemoryLibraryRepository,
    OrderedCatalogStream,
};
use futures_util::StreamExt;
use shared::{Catalog, SourceId};
use tokio::time::timeout;

use super::fixtures::TestFixtures;

pub type TestAggregator = CatalogAggregator<InMemoryCatalogRepository, InMemoryLibraryRepository>;

/// Builder for aggregators over in-memory collaborators
pub struct AggregatorBuilder {
    internal: Option<Vec<Catalog>>,
    installed: Option<Vec<Catalog>>,
    favorites: Option<Vec<SourceId>>,
}

impl AggregatorBuilder {
    /// Reference scenario: Batoto bundled, Aggregator installed, no favorites
    pub fn new() -> Self {
        Self {
            internal: Some(TestFixtures::internal_catalogs()),
            installed: Some(TestFixtures::installed_catalogs()),
            favorites: Some(Vec::new()),
        }
    }

    /// All sources silent until the test publishes
    pub fn silent() -> Self {
        Self {
            internal: None,
            installed: None,
            favorites: None,
        }
    }

    pub fn with_internal(mut self, catalogs: Vec<Catalog>) -> Self {
        self.internal = Some(catalogs);
        self
    }

    pub fn with_installed(mut self, catalogs: Vec<Catalog>) -> Self {
        self.installed = Some(catalogs);
        self
    }

    pub fn with_favorites(mut self, ids: &[i64]) -> Self {
        self.favorites = Some(TestFixtures::favorites(ids));
        self
    }

    pub fn without_favorites(mut self) -> Self {
        self.favorites = None;
        self
    }

    pub fn build(self) -> TestAggregator {
        let catalogs = InMemoryCatalogRepository::new();
        if let Some(internal) = self.internal {
            catalogs.publish_internal(internal);
        }
        if let Some(installed) = self.installed {
            catalogs.publish_installed(installed);
        }

        let library = InMemoryLibraryRepository::new();
        if let Some(favorites) = self.favorites {
            library.publish_favorites(favorites);
        }

        CatalogAggregator::new(catalogs, library)
    }
}

/// Stream helpers shared by the test suites
pub struct TestHelpers;

impl TestHelpers {
    pub const TIMEOUT: Duration = Duration::from_millis(500);
    pub const IDLE_WINDOW: Duration = Duration::from_millis(30);

    /// Next successful emission
    pub async fn next_emission(stream: &mut OrderedCatalogStream) -> Vec<Catalog> {
        match timeout(Self::TIMEOUT, stream.next()).await {
            Ok(Some(Ok(catalogs))) => catalogs,
            Ok(Some(Err(error))) => panic!("expected catalogs, got error: {error}"),
            Ok(None) => panic!("expected catalogs, stream ended"),
            Err(_) => panic!("no emission within {:?}", Self::TIMEOUT),
        }
    }

    /// Next emission, which must be an error
    pub async fn next_error(stream: &mut OrderedCatalogStream) -> AggregatorError {
        match timeout(Self::TIMEOUT, stream.next()).await {
            Ok(Some(Err(error))) => error,
            Ok(Some(Ok(catalogs))) => panic!("expected an error, got {catalogs:?}"),
            Ok(None) => panic!("expected an error, stream ended"),
            Err(_) => panic!("no error within {:?}", Self::TIMEOUT),
        }
    }

    /// Assert nothing is emitted for a short window
    pub async fn assert_idle(stream: &mut OrderedCatalogStream) {
        if let Ok(item) = timeout(Self::IDLE_WINDOW, stream.next()).await {
            panic!("expected no emission, got {item:?}");
        }
    }

    /// Assert the stream has ended
    pub async fn assert_closed(stream: &mut OrderedCatalogStream) {
        match timeout(Self::TIMEOUT, stream.next()).await {
            Ok(None) => {}
            Ok(Some(item)) => panic!("expected end of stream, got {item:?}"),
            Err(_) => panic!("stream still open after {:?}", Self::TIMEOUT),
        }
    }

    pub fn ids(catalogs: &[Catalog]) -> Vec<i64> {
        catalogs.iter().map(|catalog| catalog.id().0).collect()
    }

    pub fn names(catalogs: &[Catalog]) -> Vec<&str> {
        catalogs.iter().map(Catalog::name).collect()
    }

    /// Subscribers still attached to any of the three sources
    pub fn live_subscriptions(aggregator: &TestAggregator) -> usize {
        aggregator.catalogs().internal().subscriber_count()
            + aggregator.catalogs().installed().subscriber_count()
            + aggregator.library().favorites().subscriber_count()
    }
}

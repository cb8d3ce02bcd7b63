//! Collaborator trait definitions with mockall annotations for testing
//!
//! The pipeline never loads or persists anything itself. Catalog lists and
//! favorite ids arrive from these collaborators as live snapshot streams.

use futures_util::stream::BoxStream;
use shared::{Catalog, SharedResult, SourceId, Stamped};

/// Live, replayable sequence of snapshots.
///
/// Each item is a complete snapshot replacing the previous one, stamped with
/// its place in the publication order. An `Err` item terminates the stream.
pub type SourceStream<T> = BoxStream<'static, Stamped<SharedResult<T>>>;

/// Live stream of catalog lists
pub type CatalogStream = SourceStream<Vec<Catalog>>;

/// Live stream of ordered favorite source ids
pub type FavoriteIdStream = SourceStream<Vec<SourceId>>;

/// Provider of the bundled and installed catalog lists
#[mockall::automock]
pub trait CatalogRepository: Send + Sync {
    /// Subscribe to the catalogs bundled with the application
    fn internal_catalogs(&self) -> CatalogStream;

    /// Subscribe to the installed catalogs, re-emitting on install and uninstall
    fn installed_catalogs(&self) -> CatalogStream;
}

/// Provider of the user's favorite sources
#[mockall::automock]
pub trait LibraryRepository: Send + Sync {
    /// Subscribe to the favorite source ids, in user-chosen order
    fn favorite_source_ids(&self) -> FavoriteIdStream;
}

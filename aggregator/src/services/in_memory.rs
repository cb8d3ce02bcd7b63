//! In-memory collaborator implementations
//!
//! Stand-ins for the database-backed catalog and library stores. Every
//! mutation publishes a fresh snapshot; published snapshots are never touched
//! again.

use shared::{Catalog, SourceId, SourceKind};

use crate::services::snapshot_source::SnapshotSource;
use crate::traits::{CatalogRepository, CatalogStream, FavoriteIdStream, LibraryRepository};

/// Catalog repository backed by two snapshot sources
#[derive(Clone)]
pub struct InMemoryCatalogRepository {
    internal: SnapshotSource<Vec<Catalog>>,
    installed: SnapshotSource<Vec<Catalog>>,
}

impl InMemoryCatalogRepository {
    /// Create a repository whose sources have not emitted yet
    pub fn new() -> Self {
        Self {
            internal: SnapshotSource::new(SourceKind::Internal),
            installed: SnapshotSource::new(SourceKind::Installed),
        }
    }

    /// Create a repository seeded with both catalog lists
    pub fn with_catalogs(internal: Vec<Catalog>, installed: Vec<Catalog>) -> Self {
        Self {
            internal: SnapshotSource::with_initial(SourceKind::Internal, internal),
            installed: SnapshotSource::with_initial(SourceKind::Installed, installed),
        }
    }

    pub fn internal(&self) -> &SnapshotSource<Vec<Catalog>> {
        &self.internal
    }

    pub fn installed(&self) -> &SnapshotSource<Vec<Catalog>> {
        &self.installed
    }

    pub fn publish_internal(&self, catalogs: Vec<Catalog>) -> usize {
        self.internal.publish(catalogs)
    }

    pub fn publish_installed(&self, catalogs: Vec<Catalog>) -> usize {
        self.installed.publish(catalogs)
    }

    /// Install a catalog, replacing any installed catalog with the same id
    pub fn install(&self, catalog: Catalog) -> usize {
        self.installed.update(|latest| {
            let mut next = latest.cloned().unwrap_or_default();
            match next.iter().position(|existing| existing.id() == catalog.id()) {
                Some(index) => next[index] = catalog,
                None => next.push(catalog),
            }
            next
        })
    }

    pub fn uninstall(&self, id: SourceId) -> usize {
        self.installed.update(|latest| {
            latest
                .map(|catalogs| catalogs.iter().filter(|catalog| catalog.id() != id).cloned().collect::<Vec<_>>())
                .unwrap_or_default()
        })
    }

    pub fn fail_internal(&self, message: impl Into<String>) {
        self.internal.fail(message);
    }

    pub fn fail_installed(&self, message: impl Into<String>) {
        self.installed.fail(message);
    }

    pub fn complete(&self) {
        self.internal.complete();
        self.installed.complete();
    }
}

impl Default for InMemoryCatalogRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogRepository for InMemoryCatalogRepository {
    fn internal_catalogs(&self) -> CatalogStream {
        self.internal.subscribe()
    }

    fn installed_catalogs(&self) -> CatalogStream {
        self.installed.subscribe()
    }
}

/// Library repository exposing the ordered favorite source ids
#[derive(Clone)]
pub struct InMemoryLibraryRepository {
    favorites: SnapshotSource<Vec<SourceId>>,
}

impl InMemoryLibraryRepository {
    pub fn new() -> Self {
        Self {
            favorites: SnapshotSource::new(SourceKind::Favorites),
        }
    }

    pub fn with_favorites(ids: Vec<SourceId>) -> Self {
        Self {
            favorites: SnapshotSource::with_initial(SourceKind::Favorites, ids),
        }
    }

    pub fn favorites(&self) -> &SnapshotSource<Vec<SourceId>> {
        &self.favorites
    }

    pub fn publish_favorites(&self, ids: Vec<SourceId>) -> usize {
        self.favorites.publish(ids)
    }

    /// Append a favorite; an already favorited id keeps its position
    pub fn add_favorite(&self, id: SourceId) -> usize {
        self.favorites.update(|latest| {
            let mut next = latest.cloned().unwrap_or_default();
            if !next.contains(&id) {
                next.push(id);
            }
            next
        })
    }

    pub fn remove_favorite(&self, id: SourceId) -> usize {
        self.favorites.update(|latest| {
            latest
                .map(|ids| ids.iter().copied().filter(|favorite| *favorite != id).collect::<Vec<_>>())
                .unwrap_or_default()
        })
    }

    pub fn fail(&self, message: impl Into<String>) {
        self.favorites.fail(message);
    }

    pub fn complete(&self) {
        self.favorites.complete();
    }
}

impl Default for InMemoryLibraryRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl LibraryRepository for InMemoryLibraryRepository {
    fn favorite_source_ids(&self) -> FavoriteIdStream {
        self.favorites.subscribe()
    }
}

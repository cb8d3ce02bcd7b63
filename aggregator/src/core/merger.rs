//! Merging of the bundled and installed catalog streams

use shared::Catalog;

use crate::core::combine::combine_latest;
use crate::traits::CatalogStream;

/// Combines the internal and installed catalog streams into one list stream
pub struct CatalogMerger {
    internal: CatalogStream,
    installed: CatalogStream,
}

impl CatalogMerger {
    pub fn new(internal: CatalogStream, installed: CatalogStream) -> Self {
        Self { internal, installed }
    }

    /// Live stream of `internal ++ installed`, re-emitted whenever either side emits
    pub fn into_stream(self) -> CatalogStream {
        combine_latest(self.internal, self.installed, |internal, installed| {
            merge(internal, installed)
        })
    }
}

/// Concatenate two catalog snapshots, internal group first
pub fn merge(internal: &[Catalog], installed: &[Catalog]) -> Vec<Catalog> {
    let mut merged = Vec::with_capacity(internal.len() + installed.len());
    merged.extend_from_slice(internal);
    merged.extend_from_slice(installed);
    merged
}

//! Core shared types and identifiers

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::errors::SharedError;

static OBSERVATION_COUNTER: AtomicU64 = AtomicU64::new(1);
static PUBLICATION_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Stable numeric identity of a catalog source
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SourceId(pub i64);

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for SourceId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// Identity of the source backing a catalog
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceInfo {
    pub id: SourceId,
    pub name: String,
    #[serde(default)]
    pub lang: String,
}

impl SourceInfo {
    pub fn new(id: impl Into<SourceId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            lang: String::new(),
        }
    }
}

/// Catalog bundled with the application
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogInternal {
    pub source: SourceInfo,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub nsfw: bool,
}

/// Catalog added from an externally installed package
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogInstalled {
    pub source: SourceInfo,
    #[serde(default)]
    pub description: String,
    pub pkg_name: String,
    #[serde(default)]
    pub version_name: String,
    #[serde(default)]
    pub version_code: u32,
    #[serde(default)]
    pub nsfw: bool,
}

/// A catalog snapshot as seen by the aggregation pipeline
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Catalog {
    Internal(CatalogInternal),
    Installed(CatalogInstalled),
}

impl Catalog {
    /// Shorthand for a bundled catalog with no description
    pub fn internal(id: impl Into<SourceId>, name: impl Into<String>) -> Self {
        Catalog::Internal(CatalogInternal {
            source: SourceInfo::new(id, name),
            description: String::new(),
            nsfw: false,
        })
    }

    /// Shorthand for an installed catalog; the package name is derived from the source name
    pub fn installed(id: impl Into<SourceId>, name: impl Into<String>) -> Self {
        let name = name.into();
        let pkg_name = format!("catalog.{}", name.to_lowercase().replace(' ', "_"));
        Catalog::Installed(CatalogInstalled {
            source: SourceInfo::new(id, name),
            description: String::new(),
            pkg_name,
            version_name: String::new(),
            version_code: 0,
            nsfw: false,
        })
    }

    pub fn source(&self) -> &SourceInfo {
        match self {
            Catalog::Internal(catalog) => &catalog.source,
            Catalog::Installed(catalog) => &catalog.source,
        }
    }

    pub fn id(&self) -> SourceId {
        self.source().id
    }

    pub fn name(&self) -> &str {
        &self.source().name
    }

    pub fn is_installed(&self) -> bool {
        matches!(self, Catalog::Installed(_))
    }
}

/// Ordering policy applied to the merged catalog list
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CatalogSort {
    #[default]
    Name,
    Favorites,
}

impl fmt::Display for CatalogSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogSort::Name => write!(f, "name"),
            CatalogSort::Favorites => write!(f, "favorites"),
        }
    }
}

impl std::str::FromStr for CatalogSort {
    type Err = SharedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "name" => Ok(CatalogSort::Name),
            "favorites" => Ok(CatalogSort::Favorites),
            _ => Err(SharedError::InvalidSort {
                value: s.to_string(),
            }),
        }
    }
}

/// Rank of each favorited source, by position in the favorites collection.
///
/// Rebuilt wholesale from every favorites snapshot. Sources missing from the
/// map are unranked.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteRankMap {
    ranks: HashMap<SourceId, usize>,
}

impl FavoriteRankMap {
    /// Assign dense ranks in iteration order; a repeated id keeps its first rank
    pub fn from_ids<I>(ids: I) -> Self
    where
        I: IntoIterator<Item = SourceId>,
    {
        let mut ranks = HashMap::new();
        for id in ids {
            let next = ranks.len();
            ranks.entry(id).or_insert(next);
        }
        Self { ranks }
    }

    pub fn rank_of(&self, id: SourceId) -> Option<usize> {
        self.ranks.get(&id).copied()
    }

    pub fn contains(&self, id: SourceId) -> bool {
        self.ranks.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.ranks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty()
    }
}

/// Which upstream collaborator a snapshot stream belongs to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    Internal,
    Installed,
    Favorites,
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceKind::Internal => write!(f, "internal"),
            SourceKind::Installed => write!(f, "installed"),
            SourceKind::Favorites => write!(f, "favorites"),
        }
    }
}

/// Identifier attached to the log events of a single `observe` call
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ObservationId(u64);

impl ObservationId {
    pub fn next() -> Self {
        Self(OBSERVATION_COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for ObservationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "observe#{}", self.0)
    }
}

/// A value tagged with its position in the process-wide publication order.
///
/// Every snapshot or failure a source publishes draws the next sequence
/// number, so items queued on different streams can still be consumed in the
/// order they were published.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Stamped<T> {
    pub seq: u64,
    pub value: T,
}

impl<T> Stamped<T> {
    /// Stamp `value` with the next sequence number
    pub fn next(value: T) -> Self {
        Self {
            seq: PUBLICATION_COUNTER.fetch_add(1, Ordering::SeqCst),
            value,
        }
    }

    pub fn with_seq(seq: u64, value: T) -> Self {
        Self { seq, value }
    }

    /// Transform the value, keeping its place in the publication order
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Stamped<U> {
        Stamped {
            seq: self.seq,
            value: f(self.value),
        }
    }

    pub fn into_inner(self) -> T {
        self.value
    }
}

//! Ranking policies for merged catalog lists
//!
//! Pure functions: a policy orders a snapshot and never touches shared state.

use std::cmp::Ordering;

use shared::{Catalog, FavoriteRankMap};

/// Rank given to catalogs that are not favorited
pub const UNRANKED: usize = usize::MAX;

/// Ordering strategy applied to one merged snapshot
#[derive(Debug, Clone, Copy)]
pub enum RankPolicy<'a> {
    /// Code-point order of the catalog name
    Name,
    /// Favorite rank first, then name
    Favorites(&'a FavoriteRankMap),
}

impl RankPolicy<'_> {
    pub fn compare(&self, a: &Catalog, b: &Catalog) -> Ordering {
        match self {
            RankPolicy::Name => compare_by_name(a, b),
            RankPolicy::Favorites(ranks) => rank_of(ranks, a)
                .cmp(&rank_of(ranks, b))
                .then_with(|| compare_by_name(a, b)),
        }
    }

    /// Sort a snapshot in place. Entries that compare equal keep their relative order.
    pub fn apply(&self, catalogs: &mut [Catalog]) {
        catalogs.sort_by(|a, b| self.compare(a, b));
    }

    pub fn sorted(&self, mut catalogs: Vec<Catalog>) -> Vec<Catalog> {
        self.apply(&mut catalogs);
        catalogs
    }
}

fn compare_by_name(a: &Catalog, b: &Catalog) -> Ordering {
    a.name().cmp(b.name())
}

fn rank_of(ranks: &FavoriteRankMap, catalog: &Catalog) -> usize {
    ranks.rank_of(catalog.id()).unwrap_or(UNRANKED)
}

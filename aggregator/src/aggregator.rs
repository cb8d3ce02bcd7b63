//! Catalog aggregator
//!
//! Wires the catalog merger, the favorites rank transform and the ranking
//! policies into one live stream of ordered catalog lists.

use futures_util::future;
use futures_util::stream::{self, BoxStream, StreamExt};
use shared::{
    observation_debug, observation_error, observation_info, Catalog, CatalogSort, FavoriteRankMap,
    ObservationId,
};

use crate::core::{combine_latest, CatalogMerger, FavoritesRankStream, RankPolicy};
use crate::error::{AggregatorError, AggregatorResult};
use crate::traits::{CatalogRepository, LibraryRepository};

/// Live stream of ordered catalog lists
pub type OrderedCatalogStream = BoxStream<'static, AggregatorResult<Vec<Catalog>>>;

/// Entry point of the pipeline, built on injected collaborators
pub struct CatalogAggregator<C, L>
where
    C: CatalogRepository,
    L: LibraryRepository,
{
    catalogs: C,
    library: L,
}

impl<C, L> CatalogAggregator<C, L>
where
    C: CatalogRepository,
    L: LibraryRepository,
{
    /// Create new aggregator with injected collaborators
    pub fn new(catalogs: C, library: L) -> Self {
        Self { catalogs, library }
    }

    pub fn catalogs(&self) -> &C {
        &self.catalogs
    }

    pub fn library(&self) -> &L {
        &self.library
    }

    /// Observe the merged catalogs ordered by `sort`.
    ///
    /// Every call subscribes to the collaborators immediately and builds its
    /// own subscription graph; dropping the returned stream cancels all of
    /// it. An upstream failure is delivered once and ends the stream.
    pub fn observe(&self, sort: CatalogSort) -> OrderedCatalogStream {
        let observation = ObservationId::next();
        observation_info!(observation, sort = %sort, "Subscribing to catalog sources");

        let merged = CatalogMerger::new(
            self.catalogs.internal_catalogs(),
            self.catalogs.installed_catalogs(),
        )
        .into_stream();

        let ordered = match sort {
            CatalogSort::Name => merged
                .map(|snapshot| {
                    snapshot.map(|result| result.map(|catalogs| RankPolicy::Name.sorted(catalogs)))
                })
                .boxed(),
            CatalogSort::Favorites => {
                let ranks = FavoritesRankStream::new(self.library.favorite_source_ids()).into_stream();
                combine_latest(merged, ranks, |catalogs: &Vec<Catalog>, ranks: &FavoriteRankMap| {
                    RankPolicy::Favorites(ranks).sorted(catalogs.clone())
                })
            }
        };

        ordered
            .map(move |snapshot| match snapshot.into_inner() {
                Ok(catalogs) => {
                    observation_debug!(observation, count = catalogs.len(), "Emitting ordered catalogs");
                    Ok(catalogs)
                }
                Err(error) => {
                    observation_error!(observation, error = %error, "Upstream failed, closing stream");
                    Err(AggregatorError::from(error))
                }
            })
            .map(Some)
            .chain(stream::once(async move {
                observation_debug!(observation, "Catalog stream closed");
                None
            }))
            .filter_map(future::ready)
            .boxed()
    }
}

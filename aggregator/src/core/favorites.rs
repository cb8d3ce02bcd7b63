//! Favorite ids to rank map transform

use futures_util::stream::StreamExt;
use shared::FavoriteRankMap;

use crate::traits::{FavoriteIdStream, SourceStream};

/// Live stream of rank maps
pub type RankMapStream = SourceStream<FavoriteRankMap>;

/// Rebuilds a `FavoriteRankMap` from every favorites snapshot, one map per snapshot
pub struct FavoritesRankStream {
    favorites: FavoriteIdStream,
}

impl FavoritesRankStream {
    pub fn new(favorites: FavoriteIdStream) -> Self {
        Self { favorites }
    }

    pub fn into_stream(self) -> RankMapStream {
        self.favorites
            .map(|snapshot| snapshot.map(|ids| ids.map(FavoriteRankMap::from_ids)))
            .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::stream;
    use shared::{SharedError, SourceId, SourceKind, Stamped};

    fn favorites(snapshots: Vec<shared::SharedResult<Vec<SourceId>>>) -> FavoriteIdStream {
        stream::iter(snapshots.into_iter().map(Stamped::next)).boxed()
    }

    #[tokio::test]
    async fn test_one_rank_map_per_snapshot() {
        let snapshots = vec![
            Ok(vec![SourceId(1)]),
            Ok(vec![SourceId(2), SourceId(1)]),
            Ok(Vec::new()),
        ];

        let maps: Vec<_> = FavoritesRankStream::new(favorites(snapshots))
            .into_stream()
            .collect()
            .await;

        assert_eq!(maps.len(), 3);
        let first = maps[0].value.as_ref().unwrap();
        assert_eq!(first.rank_of(SourceId(1)), Some(0));

        let second = maps[1].value.as_ref().unwrap();
        assert_eq!(second.rank_of(SourceId(2)), Some(0));
        assert_eq!(second.rank_of(SourceId(1)), Some(1));

        assert!(maps[2].value.as_ref().unwrap().is_empty());
        assert!(maps[0].seq < maps[1].seq && maps[1].seq < maps[2].seq);
    }

    #[tokio::test]
    async fn test_failure_passes_through() {
        let failure = SharedError::source_failed(SourceKind::Favorites, "library locked");
        let snapshots = vec![Ok(vec![SourceId(1)]), Err(failure.clone())];

        let maps: Vec<_> = FavoritesRankStream::new(favorites(snapshots))
            .into_stream()
            .collect()
            .await;

        assert_eq!(maps.len(), 2);
        assert_eq!(maps[1].value, Err(failure));
    }
}

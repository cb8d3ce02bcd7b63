//! Core pipeline operators
//!
//! Pure stream transforms with no I/O dependencies. Upstream snapshots flow
//! in, ordered catalog lists flow out.

pub mod combine;
pub mod favorites;
pub mod merger;
pub mod rank;

pub use combine::combine_latest;
pub use favorites::{FavoritesRankStream, RankMapStream};
pub use merger::CatalogMerger;
pub use rank::RankPolicy;

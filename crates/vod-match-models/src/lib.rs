pub mod media;
pub mod catalog;
pub mod metadata;
pub mod cache_record;
pub mod stream;

pub use media::{CanonicalQuery, MediaType};
pub use catalog::{CatalogEntry, Episode, ResolvedResource};
pub use metadata::{MetadataDetails, SeasonSummary};
pub use cache_record::CacheRecord;
pub use stream::StreamItem;

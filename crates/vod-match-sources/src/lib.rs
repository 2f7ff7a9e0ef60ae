pub mod traits;
pub mod error;
pub mod http;
pub mod store;
pub mod catalog;
pub mod douban;
pub mod tmdb;

pub use traits::{FetchRequest, HttpFetcher, KeyValueStore, MetadataClient};
pub use error::SourceError;
pub use http::ReqwestFetcher;
pub use store::{JsonFileStore, MemoryStore};
pub use catalog::{CatalogClient, CatalogPage, RawCatalogItem};
pub use douban::DoubanClient;
pub use tmdb::TmdbClient;

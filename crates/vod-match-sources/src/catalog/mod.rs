pub mod api;
pub mod client;

pub use api::{CatalogPage, RawCatalogItem};
pub use client::CatalogClient;

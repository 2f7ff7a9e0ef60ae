pub mod config;
pub mod paths;

pub use config::{CatalogConfig, Config, EngineConfig, MappingConfig, MetadataConfig, ReviewSiteConfig, TMDB_TOKEN_ENV};
pub use paths::{PathManager, container_base_path};

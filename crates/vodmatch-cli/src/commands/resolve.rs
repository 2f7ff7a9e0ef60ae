use crate::output::Output;
use color_eyre::Result;
use std::sync::Arc;
use vod_match_config::{Config, PathManager, TMDB_TOKEN_ENV};
use vod_match_core::ResolutionEngine;
use vod_match_models::{CanonicalQuery, MediaType};
use vod_match_sources::{HttpFetcher, JsonFileStore, KeyValueStore, MemoryStore, ReqwestFetcher, TmdbClient};

pub struct ResolveArgs {
    pub title: String,
    pub tmdb_id: String,
    pub media_type: MediaType,
    pub imdb_id: Option<String>,
    pub season: u32,
    pub episode: Option<u32>,
    pub streams: bool,
    pub no_cache: bool,
}

impl ResolveArgs {
    fn query(&self) -> CanonicalQuery {
        let mut query = match self.media_type {
            MediaType::Movie => CanonicalQuery::movie(self.title.clone(), self.tmdb_id.clone()),
            MediaType::Tv => CanonicalQuery::tv(self.title.clone(), self.tmdb_id.clone(), self.season),
        };
        if let Some(imdb_id) = &self.imdb_id {
            query = query.with_imdb_id(imdb_id.clone());
        }
        if let Some(episode) = self.episode {
            query = query.with_episode(episode);
        }
        query
    }
}

pub async fn run_resolve(args: ResolveArgs, output: &Output) -> Result<()> {
    tracing::debug!("Resolve command started");

    let path_manager = PathManager::default();
    let config_file = path_manager.config_file();
    let config = Config::load_or_default(&config_file)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to load config from {}: {}", config_file.display(), e))?;
    config
        .validate()
        .map_err(|e| color_eyre::eyre::eyre!("Configuration validation failed: {}", e))?;

    if !config.is_metadata_configured() {
        output.warn(format!(
            "No TMDB token configured (metadata.api_token or {}); IMDb id lookups will fail",
            TMDB_TOKEN_ENV
        ));
    }

    let fetcher: Arc<dyn HttpFetcher> = Arc::new(
        ReqwestFetcher::from_config(&config.engine)
            .map_err(|e| color_eyre::eyre::eyre!("Failed to create HTTP client: {}", e))?,
    );
    let metadata = Arc::new(TmdbClient::new(fetcher.clone(), &config.metadata));
    let store: Arc<dyn KeyValueStore> = if args.no_cache {
        Arc::new(MemoryStore::new())
    } else {
        Arc::new(JsonFileStore::new(&path_manager.result_cache_dir()))
    };
    let engine = ResolutionEngine::new(&config, fetcher, metadata, store);

    let query = args.query();
    if args.streams {
        let streams = engine.load_streams(&query).await;
        output.streams(&query, &streams);
    } else {
        let resource = engine.resolve(&query).await;
        output.resource(&query, resource.as_ref());
    }
    Ok(())
}

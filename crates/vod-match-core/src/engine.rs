use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};
use vod_match_config::{Config, MappingConfig};
use vod_match_models::{CanonicalQuery, MediaType, ResolvedResource, StreamItem};
use vod_match_sources::{CatalogClient, DoubanClient, HttpFetcher, KeyValueStore, MetadataClient};
use crate::cache::ResultCache;
use crate::filter::{classify, partition, MatchTarget};
use crate::id_matching::{find_matching_candidate, find_sole_anime_candidate};
use crate::id_resolver::IdResolver;
use crate::mapping::MappingTables;
use crate::search::search_catalog;
use crate::season::{self, detect_merged_season};
use crate::streams::streams_for;
use crate::title::{split_title, TitleNormalizer};

/// Why a search attempt produced no resource (logged, never returned)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Unresolved {
    /// The catalog returned nothing for the keyword
    NoHits,
    /// Hits came back but none were same-name or similar
    NotFound,
    /// Candidates exist but none could be confirmed
    Ambiguous(usize),
}

impl fmt::Display for Unresolved {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Unresolved::NoHits => write!(f, "no catalog hits"),
            Unresolved::NotFound => write!(f, "no matching candidates"),
            Unresolved::Ambiguous(n) => write!(f, "{} candidates, none confirmed", n),
        }
    }
}

/// One catalog search with the title and season it is matched against
#[derive(Debug, Clone)]
struct SearchAttempt {
    title: String,
    season: u32,
    season_title: Option<String>,
}

/// Orchestrates cache, title handling, id cross-referencing and catalog
/// matching for one query at a time
pub struct ResolutionEngine {
    fetcher: Arc<dyn HttpFetcher>,
    metadata: Arc<dyn MetadataClient>,
    catalog: CatalogClient,
    resolver: IdResolver,
    cache: ResultCache,
    normalizer: TitleNormalizer,
    mapping_config: MappingConfig,
    excluded_genres: Vec<String>,
}

impl ResolutionEngine {
    pub fn new(
        config: &Config,
        fetcher: Arc<dyn HttpFetcher>,
        metadata: Arc<dyn MetadataClient>,
        store: Arc<dyn KeyValueStore>,
    ) -> Self {
        let catalog = CatalogClient::new(fetcher.clone(), config.catalog.endpoint.clone());
        let douban = DoubanClient::new(
            fetcher.clone(),
            config.review_site.clone(),
            config.engine.user_agent.clone(),
        );
        let cache = ResultCache::new(store, config.engine.cache_namespace.clone(), config.engine.cache_ttl());

        Self {
            fetcher,
            metadata: metadata.clone(),
            catalog,
            resolver: IdResolver::new(metadata, douban),
            cache,
            normalizer: TitleNormalizer::default(),
            mapping_config: config.mappings.clone(),
            excluded_genres: config.catalog.excluded_genres.clone(),
        }
    }

    pub fn cache(&self) -> &ResultCache {
        &self.cache
    }

    /// Locate the catalog entry for a query
    ///
    /// 1. Fresh cache entry for the query's key
    /// 2. Season-1 entry reused when the catalog merged this season into it
    /// 3. Catalog search by canonical title, confirmed by industry id or the
    ///    anime heuristic
    /// 4. One retry searching by the season title
    ///
    /// A found resource is cached under the query's key. Failures of any
    /// collaborator end in `None`.
    pub async fn resolve(&self, query: &CanonicalQuery) -> Option<ResolvedResource> {
        info!(
            "Resolving {} '{}' (tmdb {}, season {})",
            query.media_type, query.series_name, query.tmdb_id, query.season
        );
        let key = self.cache.key_for(query);

        if let Some(cached) = self.cache.get(&key).await {
            return Some(cached);
        }
        if let Some(merged) = self.reuse_merged_season(query, &key).await {
            return Some(merged);
        }

        let mappings = MappingTables::load(self.fetcher.as_ref(), &self.mapping_config).await;
        let resource = self.resolve_uncached(query, &mappings).await?;
        self.cache.set(&key, &resource).await;
        info!("Resolved '{}' -> '{}' ({} episodes)", query.series_name, resource.title, resource.episode_count());
        Some(resource)
    }

    /// Streams of the resolved resource, empty when nothing resolves
    pub async fn load_streams(&self, query: &CanonicalQuery) -> Vec<StreamItem> {
        match self.resolve(query).await {
            Some(resource) => streams_for(&resource, query),
            None => Vec::new(),
        }
    }

    /// Serve a later season from the season-1 entry when that entry holds
    /// more episodes than season 1 really has
    async fn reuse_merged_season(&self, query: &CanonicalQuery, key: &str) -> Option<ResolvedResource> {
        if !query.is_tv() || query.season <= 1 {
            return None;
        }
        let season_one_key = self.cache.key(MediaType::Tv, &query.tmdb_id, 1);
        let season_one = self.cache.get(&season_one_key).await?;

        let true_count = match self.metadata.details(MediaType::Tv, &query.tmdb_id).await {
            Ok(Some(details)) => details.season_episode_count(1),
            Ok(None) => 0,
            Err(e) => {
                warn!("Failed to fetch season info for tv {}: {}", query.tmdb_id, e);
                0
            }
        };
        if !detect_merged_season(&season_one, true_count) {
            debug!(
                "Season 1 of tv {} has {} catalog episodes for {} real ones, not merged",
                query.tmdb_id,
                season_one.episode_count(),
                true_count
            );
            return None;
        }

        info!(
            "Season {} of tv {} is merged into season 1 ({} > {} episodes)",
            query.season,
            query.tmdb_id,
            season_one.episode_count(),
            true_count
        );
        self.cache.set(key, &season_one).await;
        Some(season_one)
    }

    async fn resolve_uncached(&self, query: &CanonicalQuery, mappings: &MappingTables) -> Option<ResolvedResource> {
        let title = self.normalizer.canonical_title(mappings, &query.series_name, &query.tmdb_id);
        let imdb_id = self.resolver.industry_id_for_query(mappings, query).await;
        let season_title = query.is_tv().then(|| {
            self.normalizer
                .canonical_title(mappings, &season::season_title(&title, query.season), &query.tmdb_id)
        });
        debug!(
            "Canonical title '{}', season title {:?}, industry id {:?}",
            title, season_title, imdb_id
        );

        let mut attempts = vec![SearchAttempt {
            title,
            season: query.season,
            season_title: season_title.clone(),
        }];
        if let Some(season_title) = season_title {
            attempts.push(SearchAttempt {
                title: season_title,
                season: 1,
                season_title: None,
            });
        }

        for attempt in &attempts {
            match self.search_attempt(query, attempt, imdb_id.as_deref(), mappings).await {
                Ok(resource) => return Some(resource),
                Err(reason) => info!("No match for '{}' (season {}): {}", attempt.title, attempt.season, reason),
            }
        }
        None
    }

    async fn search_attempt(
        &self,
        query: &CanonicalQuery,
        attempt: &SearchAttempt,
        imdb_id: Option<&str>,
        mappings: &MappingTables,
    ) -> Result<ResolvedResource, Unresolved> {
        let tokens = split_title(&attempt.title);
        let keyword = tokens.first().cloned().unwrap_or_else(|| attempt.title.clone());
        if keyword.is_empty() {
            return Err(Unresolved::NoHits);
        }

        let hits = search_catalog(&self.catalog, &keyword).await;
        if hits.is_empty() {
            return Err(Unresolved::NoHits);
        }

        let target = MatchTarget {
            title: &attempt.title,
            tokens: &tokens,
            media_type: query.media_type,
            season: attempt.season,
            season_title: attempt.season_title.as_deref(),
        };
        let entries = hits.iter().map(classify).collect();
        let candidates = partition(&self.normalizer, &target, entries, &self.excluded_genres);
        debug!(
            "'{}': {} hits, {} same-name, {} similar",
            keyword,
            hits.len(),
            candidates.same_name.len(),
            candidates.similar.len()
        );
        if candidates.is_empty() {
            return Err(Unresolved::NotFound);
        }

        if let Some(imdb_id) = imdb_id {
            if let Some(found) = find_matching_candidate(&self.resolver, mappings, candidates.ordered(), imdb_id).await {
                return Ok(found.clone());
            }
        }
        if let Some(found) =
            find_sole_anime_candidate(&self.resolver, query.media_type, &query.tmdb_id, &candidates.same_name).await
        {
            return Ok(found.clone());
        }

        Err(Unresolved::Ambiguous(candidates.len()))
    }
}

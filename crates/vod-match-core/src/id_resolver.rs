use regex::Regex;
use std::sync::{Arc, LazyLock};
use tracing::{debug, warn};
use vod_match_models::{CanonicalQuery, MediaType};
use vod_match_sources::{DoubanClient, MetadataClient};
use crate::mapping::MappingTables;
use crate::season::is_simple_match;

static INDUSTRY_ID: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"tt\d+").expect("valid regex"));

/// Keywords that mark Japanese animation on each source
#[derive(Debug, Clone, Copy)]
pub struct AnimeMarkers {
    pub metadata_genre: &'static str,
    pub metadata_country: &'static str,
    pub review_genre: &'static str,
    pub review_country: &'static str,
}

pub const ANIME_MARKERS: AnimeMarkers = AnimeMarkers {
    metadata_genre: "动画",
    metadata_country: "Japan",
    review_genre: "动画",
    review_country: "日本",
};

/// First `tt<digits>` token in a page
pub fn extract_industry_id(text: &str) -> Option<String> {
    INDUSTRY_ID.find(text).map(|m| m.as_str().to_string())
}

/// Cross-reference between the metadata service, the review site and the
/// manual mapping tables
///
/// Every lookup degrades to "not found" on failure; errors are logged and
/// never reach the caller.
#[derive(Clone)]
pub struct IdResolver {
    metadata: Arc<dyn MetadataClient>,
    douban: DoubanClient,
    markers: AnimeMarkers,
}

impl IdResolver {
    pub fn new(metadata: Arc<dyn MetadataClient>, douban: DoubanClient) -> Self {
        Self {
            metadata,
            douban,
            markers: ANIME_MARKERS,
        }
    }

    /// Industry id of a review-site entry
    ///
    /// 1. Manual mapping (`douban.<id>`)
    /// 2. First `tt<digits>` on the review site's description page
    pub async fn resolve_industry_id(&self, mappings: &MappingTables, douban_id: &str) -> Option<String> {
        if let Some(imdb_id) = mappings.imdb_for_douban(douban_id) {
            debug!("ID resolver: douban {} -> {} (mapping)", douban_id, imdb_id);
            return Some(imdb_id.to_string());
        }

        match self.douban.description(douban_id).await {
            Ok(page) => {
                let imdb_id = extract_industry_id(&page);
                debug!("ID resolver: douban {} -> {:?} (description page)", douban_id, imdb_id);
                imdb_id
            }
            Err(e) => {
                warn!("ID resolver: failed to fetch douban description for {}: {}", douban_id, e);
                None
            }
        }
    }

    /// Industry id the catalog candidates are checked against
    ///
    /// A caller-supplied id is trusted for movies and first seasons. Later
    /// seasons look up episode 1 of the season, since series-level ids do
    /// not distinguish seasons. The manual mapping is the last resort.
    pub async fn industry_id_for_query(&self, mappings: &MappingTables, query: &CanonicalQuery) -> Option<String> {
        if let Some(imdb_id) = query.imdb_id() {
            if is_simple_match(query.media_type, query.season) {
                return Some(imdb_id.to_string());
            }
        }

        let season = (query.is_tv() && query.season > 1).then_some(query.season);
        match self.metadata.imdb_id(query.media_type, &query.tmdb_id, season).await {
            Ok(Some(imdb_id)) => return Some(imdb_id),
            Ok(None) => debug!("ID resolver: no industry id for {} {}", query.media_type, query.tmdb_id),
            Err(e) => warn!(
                "ID resolver: industry id lookup failed for {} {}: {}",
                query.media_type, query.tmdb_id, e
            ),
        }

        mappings
            .imdb_for_tmdb(query.media_type, &query.tmdb_id, query.season)
            .map(str::to_string)
    }

    /// Genre and country of the metadata record say Japanese animation
    pub async fn is_anime_on_metadata(&self, media_type: MediaType, tmdb_id: &str) -> bool {
        match self.metadata.details(media_type, tmdb_id).await {
            Ok(Some(details)) => {
                details.genres.iter().any(|g| g == self.markers.metadata_genre)
                    && details
                        .production_countries
                        .iter()
                        .any(|c| c == self.markers.metadata_country)
            }
            Ok(None) => false,
            Err(e) => {
                warn!("ID resolver: details lookup failed for {} {}: {}", media_type, tmdb_id, e);
                false
            }
        }
    }

    /// Review-site description mentions both the genre and the country
    pub async fn is_anime_on_review_site(&self, douban_id: &str) -> bool {
        match self.douban.description(douban_id).await {
            Ok(page) => page.contains(self.markers.review_genre) && page.contains(self.markers.review_country),
            Err(e) => {
                warn!("ID resolver: failed to fetch douban description for {}: {}", douban_id, e);
                false
            }
        }
    }
}

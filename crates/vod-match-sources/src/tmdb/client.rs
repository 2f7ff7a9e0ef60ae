use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::debug;
use vod_match_config::MetadataConfig;
use vod_match_models::{MediaType, MetadataDetails};
use crate::error::SourceError;
use crate::tmdb::api::{TmdbDetails, TmdbExternalIds};
use crate::traits::{FetchRequest, HttpFetcher, MetadataClient};

/// TMDB v3 as the canonical metadata service
#[derive(Clone)]
pub struct TmdbClient {
    fetcher: Arc<dyn HttpFetcher>,
    base_url: String,
    token: Option<String>,
    language: String,
}

impl TmdbClient {
    pub fn new(fetcher: Arc<dyn HttpFetcher>, config: &MetadataConfig) -> Self {
        Self {
            fetcher,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.resolved_token(),
            language: config.language.clone(),
        }
    }

    fn request(&self, path: &str) -> FetchRequest {
        let mut request = FetchRequest::new(format!("{}/{}", self.base_url, path))
            .header("Accept", "application/json");
        if let Some(token) = &self.token {
            request = request.header("Authorization", format!("Bearer {}", token));
        }
        request
    }

    /// GET and decode; 404 means "unknown id" rather than an error
    async fn get<T: DeserializeOwned>(&self, request: FetchRequest) -> Result<Option<T>, SourceError> {
        let value = match self.fetcher.fetch_json(&request).await {
            Ok(value) => value,
            Err(e) if e.is_not_found() => {
                debug!("TMDB: {} not found", request.describe());
                return Ok(None);
            }
            Err(e) => return Err(e),
        };
        serde_json::from_value(value)
            .map(Some)
            .map_err(|e| SourceError::parse(request.describe(), e))
    }
}

/// Path of the external-id document; season lookups use episode 1 of the season
pub fn external_ids_path(media_type: MediaType, id: &str, season: Option<u32>) -> String {
    match (media_type, season) {
        (MediaType::Tv, Some(season)) => format!("tv/{}/season/{}/episode/1/external_ids", id, season),
        _ => format!("{}/{}/external_ids", media_type.as_str(), id),
    }
}

#[async_trait]
impl MetadataClient for TmdbClient {
    async fn details(
        &self,
        media_type: MediaType,
        id: &str,
    ) -> Result<Option<MetadataDetails>, SourceError> {
        let request = self
            .request(&format!("{}/{}", media_type.as_str(), id))
            .query("language", self.language.clone());
        let details: Option<TmdbDetails> = self.get(request).await?;
        Ok(details.map(MetadataDetails::from))
    }

    async fn imdb_id(
        &self,
        media_type: MediaType,
        id: &str,
        season: Option<u32>,
    ) -> Result<Option<String>, SourceError> {
        let request = self.request(&external_ids_path(media_type, id, season));
        let ids: Option<TmdbExternalIds> = self.get(request).await?;
        Ok(ids.and_then(TmdbExternalIds::imdb_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    /// Serves canned bodies by URL, 404 for anything else
    struct CannedFetcher {
        bodies: HashMap<String, String>,
    }

    #[async_trait]
    impl HttpFetcher for CannedFetcher {
        async fn fetch_text(&self, request: &FetchRequest) -> Result<String, SourceError> {
            self.bodies.get(&request.url).cloned().ok_or(SourceError::Status {
                url: request.describe(),
                status: 404,
            })
        }
    }

    fn client(bodies: &[(&str, &str)]) -> TmdbClient {
        let fetcher = CannedFetcher {
            bodies: bodies.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect(),
        };
        TmdbClient::new(Arc::new(fetcher), &MetadataConfig::default())
    }

    #[test]
    fn test_external_ids_path() {
        assert_eq!(external_ids_path(MediaType::Movie, "550", None), "movie/550/external_ids");
        assert_eq!(external_ids_path(MediaType::Tv, "1399", None), "tv/1399/external_ids");
        assert_eq!(
            external_ids_path(MediaType::Tv, "1399", Some(2)),
            "tv/1399/season/2/episode/1/external_ids"
        );
    }

    #[tokio::test]
    async fn test_details_maps_names() {
        let client = client(&[(
            "https://api.themoviedb.org/3/tv/100",
            r#"{
                "genres": [{"id": 16, "name": "动画"}],
                "production_countries": [{"iso_3166_1": "JP", "name": "Japan"}],
                "seasons": [{"season_number": 1, "episode_count": 12}]
            }"#,
        )]);

        let details = client.details(MediaType::Tv, "100").await.unwrap().unwrap();
        assert_eq!(details.genres, vec!["动画".to_string()]);
        assert_eq!(details.production_countries, vec!["Japan".to_string()]);
        assert_eq!(details.season_episode_count(1), 12);
    }

    #[tokio::test]
    async fn test_unknown_id_is_none() {
        let client = client(&[]);
        assert!(client.details(MediaType::Movie, "1").await.unwrap().is_none());
        assert!(client.imdb_id(MediaType::Movie, "1", None).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_blank_imdb_id_is_none() {
        let client = client(&[
            ("https://api.themoviedb.org/3/tv/7/season/2/episode/1/external_ids", r#"{"imdb_id": "tt7654321"}"#),
            ("https://api.themoviedb.org/3/tv/8/external_ids", r#"{"imdb_id": ""}"#),
        ]);
        assert_eq!(
            client.imdb_id(MediaType::Tv, "7", Some(2)).await.unwrap().as_deref(),
            Some("tt7654321")
        );
        assert_eq!(client.imdb_id(MediaType::Tv, "8", None).await.unwrap(), None);
    }
}

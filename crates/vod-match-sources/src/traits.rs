use async_trait::async_trait;
use vod_match_models::{MediaType, MetadataDetails};
use crate::error::SourceError;

/// A GET request: URL, query parameters and extra headers
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchRequest {
    pub url: String,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
}

impl FetchRequest {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            query: Vec::new(),
            headers: Vec::new(),
        }
    }

    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((key.into(), value.into()));
        self
    }

    /// Human readable `url?k=v&k=v` form for logs (not percent-encoded)
    pub fn describe(&self) -> String {
        if self.query.is_empty() {
            return self.url.clone();
        }
        let params = self
            .query
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join("&");
        format!("{}?{}", self.url, params)
    }
}

/// Raw page fetching
#[async_trait]
pub trait HttpFetcher: Send + Sync {
    async fn fetch_text(&self, request: &FetchRequest) -> Result<String, SourceError>;

    async fn fetch_json(&self, request: &FetchRequest) -> Result<serde_json::Value, SourceError> {
        let body = self.fetch_text(request).await?;
        serde_json::from_str(&body).map_err(|e| SourceError::parse(request.describe(), e))
    }
}

/// The canonical metadata service (titles, genres, seasons, external ids)
#[async_trait]
pub trait MetadataClient: Send + Sync {
    /// Detail document of a movie or series; `Ok(None)` when the id is unknown
    async fn details(
        &self,
        media_type: MediaType,
        id: &str,
    ) -> Result<Option<MetadataDetails>, SourceError>;

    /// Industry id of an item
    ///
    /// With `season` set (series only) the lookup targets episode 1 of that
    /// season, which is how per-season industry ids are exposed.
    async fn imdb_id(
        &self,
        media_type: MediaType,
        id: &str,
        season: Option<u32>,
    ) -> Result<Option<String>, SourceError>;
}

/// String-keyed storage for cache envelopes
///
/// Reads and writes are independent round trips; there is no compare-and-swap.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, SourceError>;
    async fn set(&self, key: &str, value: String) -> Result<(), SourceError>;
    async fn remove(&self, key: &str) -> Result<(), SourceError>;
}

// In-memory stand-ins for the network collaborators

use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use vod_match_config::{Config, ReviewSiteConfig};
use vod_match_models::{CatalogEntry, Episode, MediaType, MetadataDetails};
use vod_match_sources::{DoubanClient, FetchRequest, HttpFetcher, MetadataClient, SourceError};

pub const CATALOG_ENDPOINT: &str = "https://catalog.example.com/api.php/provide/vod/";
pub const DOUBAN_DESC: &str = "https://www.douban.com/doubanapp/h5/movie";

/// Serves canned bodies keyed by `FetchRequest::describe()`; 404 otherwise
#[derive(Default)]
pub struct FakeFetcher {
    bodies: HashMap<String, String>,
    requests: Mutex<Vec<String>>,
}

impl FakeFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_body(mut self, url: &str, body: &str) -> Self {
        self.bodies.insert(url.to_string(), body.to_string());
        self
    }

    pub fn with_catalog_page(self, keyword: &str, page: u32, body: &str) -> Self {
        let url = format!("{}?ac=detail&wd={}&pg={}", CATALOG_ENDPOINT, keyword, page);
        self.with_body(&url, body)
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl HttpFetcher for FakeFetcher {
    async fn fetch_text(&self, request: &FetchRequest) -> Result<String, SourceError> {
        let key = request.describe();
        self.requests.lock().unwrap().push(key.clone());
        self.bodies.get(&key).cloned().ok_or(SourceError::Status { url: key, status: 404 })
    }
}

/// Metadata service backed by maps; unknown ids are `Ok(None)`
#[derive(Default)]
pub struct FakeMetadata {
    details: HashMap<(MediaType, String), MetadataDetails>,
    imdb_ids: HashMap<(MediaType, String, Option<u32>), String>,
}

impl FakeMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_details(mut self, media_type: MediaType, id: &str, details: MetadataDetails) -> Self {
        self.details.insert((media_type, id.to_string()), details);
        self
    }

    pub fn with_imdb(mut self, media_type: MediaType, id: &str, season: Option<u32>, imdb_id: &str) -> Self {
        self.imdb_ids
            .insert((media_type, id.to_string(), season), imdb_id.to_string());
        self
    }
}

#[async_trait]
impl MetadataClient for FakeMetadata {
    async fn details(&self, media_type: MediaType, id: &str) -> Result<Option<MetadataDetails>, SourceError> {
        Ok(self.details.get(&(media_type, id.to_string())).cloned())
    }

    async fn imdb_id(
        &self,
        media_type: MediaType,
        id: &str,
        season: Option<u32>,
    ) -> Result<Option<String>, SourceError> {
        Ok(self.imdb_ids.get(&(media_type, id.to_string(), season)).cloned())
    }
}

pub fn douban_client(fetcher: Arc<FakeFetcher>) -> DoubanClient {
    DoubanClient::new(fetcher, ReviewSiteConfig::default(), "test-agent")
}

/// Defaults pointed at the fake endpoints, with no mapping tables
pub fn test_config() -> Config {
    let mut config = Config::default();
    config.catalog.endpoint = CATALOG_ENDPOINT.to_string();
    config.mappings.id_mapping = None;
    config.mappings.title_mapping = None;
    config.metadata.api_token = None;
    config
}

/// Raw catalog hit; a play list with "集" labels makes it a series
pub fn catalog_item(name: &str, play_url: &str) -> Value {
    json!({
        "vod_name": name,
        "vod_sub": "",
        "vod_content": "<p>简介</p>",
        "vod_class": "剧情",
        "vod_play_url": play_url,
        "vod_douban_id": 0,
    })
}

pub fn catalog_item_with_douban(name: &str, play_url: &str, douban_id: u64) -> Value {
    let mut item = catalog_item(name, play_url);
    item["vod_douban_id"] = json!(douban_id);
    item
}

pub fn catalog_page(items: &[Value], pagecount: u32) -> String {
    json!({
        "code": 1,
        "msg": "数据列表",
        "page": 1,
        "pagecount": pagecount,
        "list": items,
    })
    .to_string()
}

/// `第1集$url#第2集$url...`
pub fn series_play_url(episodes: usize) -> String {
    (1..=episodes)
        .map(|i| format!("第{}集$https://cdn.example.com/{}.m3u8", i, i))
        .collect::<Vec<_>>()
        .join("#")
}

pub fn entry(title: &str, media_type: MediaType, episodes: usize) -> CatalogEntry {
    CatalogEntry {
        title: title.to_string(),
        subtitle: String::new(),
        description: String::new(),
        genre: String::new(),
        media_type,
        douban_id: None,
        episodes: (1..=episodes)
            .map(|i| Episode {
                title: format!("第{}集", i),
                url: format!("https://cdn.example.com/{}/{}.m3u8", title, i),
            })
            .collect(),
    }
}

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Environment variable that overrides `metadata.api_token`
pub const TMDB_TOKEN_ENV: &str = "VODMATCH_TMDB_TOKEN";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub review_site: ReviewSiteConfig,
    #[serde(default)]
    pub metadata: MetadataConfig,
    #[serde(default)]
    pub mappings: MappingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Per-call network timeout
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Lifetime of a resolved result in the cache
    #[serde(default = "default_cache_ttl_hours")]
    pub cache_ttl_hours: u64,
    /// Prefix of every cache key, keeps several catalogs apart in one store
    #[serde(default = "default_cache_namespace")]
    pub cache_namespace: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// VOD collection API endpoint (`ac=detail&wd=..&pg=..`)
    #[serde(default = "default_catalog_endpoint")]
    pub endpoint: String,
    /// Entries whose genre label contains any of these are dropped
    #[serde(default = "default_excluded_genres")]
    pub excluded_genres: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewSiteConfig {
    /// Description page, `{id}` is replaced by the review-site id
    #[serde(default = "default_desc_url_template")]
    pub desc_url_template: String,
    #[serde(default = "default_referer_template")]
    pub referer_template: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetadataConfig {
    #[serde(default = "default_metadata_base_url")]
    pub base_url: String,
    /// v4 read access token, sent as a bearer token
    #[serde(default)]
    pub api_token: Option<String>,
    #[serde(default = "default_metadata_language")]
    pub language: String,
}

/// Sources of the manual mapping tables: an http(s) URL or a local JSON file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MappingConfig {
    #[serde(default = "default_id_mapping")]
    pub id_mapping: Option<String>,
    #[serde(default = "default_title_mapping")]
    pub title_mapping: Option<String>,
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (iPhone; CPU iPhone OS 18_5 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/18.5 Mobile/15E148 Safari/604.1".to_string()
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_cache_ttl_hours() -> u64 {
    24
}

fn default_cache_namespace() -> String {
    "vodmatch.dytt".to_string()
}

fn default_catalog_endpoint() -> String {
    "http://caiji.dyttzyapi.com/api.php/provide/vod/from/dyttm3u8/at/json/".to_string()
}

fn default_excluded_genres() -> Vec<String> {
    vec!["短剧".to_string()]
}

fn default_desc_url_template() -> String {
    "https://www.douban.com/doubanapp/h5/movie/{id}/desc".to_string()
}

fn default_referer_template() -> String {
    "https://m.douban.com/movie/subject/{id}/".to_string()
}

fn default_metadata_base_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_metadata_language() -> String {
    "zh-CN".to_string()
}

fn default_id_mapping() -> Option<String> {
    Some("https://raw.githubusercontent.com/suiyuran/forward/main/data/id-mapping.json".to_string())
}

fn default_title_mapping() -> Option<String> {
    Some("https://raw.githubusercontent.com/suiyuran/forward/main/data/title-mapping.json".to_string())
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            request_timeout_secs: default_request_timeout_secs(),
            cache_ttl_hours: default_cache_ttl_hours(),
            cache_namespace: default_cache_namespace(),
        }
    }
}

impl EngineConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_hours * 3600)
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            endpoint: default_catalog_endpoint(),
            excluded_genres: default_excluded_genres(),
        }
    }
}

impl Default for ReviewSiteConfig {
    fn default() -> Self {
        Self {
            desc_url_template: default_desc_url_template(),
            referer_template: default_referer_template(),
        }
    }
}

impl ReviewSiteConfig {
    pub fn desc_url(&self, id: &str) -> String {
        self.desc_url_template.replace("{id}", id)
    }

    pub fn referer(&self, id: &str) -> String {
        self.referer_template.replace("{id}", id)
    }
}

impl Default for MetadataConfig {
    fn default() -> Self {
        Self {
            base_url: default_metadata_base_url(),
            api_token: None,
            language: default_metadata_language(),
        }
    }
}

impl MetadataConfig {
    /// Token from the environment first, then from the file
    pub fn resolved_token(&self) -> Option<String> {
        std::env::var(TMDB_TOKEN_ENV)
            .ok()
            .filter(|t| !t.trim().is_empty())
            .or_else(|| self.api_token.clone().filter(|t| !t.trim().is_empty()))
    }
}

impl Default for MappingConfig {
    fn default() -> Self {
        Self {
            id_mapping: default_id_mapping(),
            title_mapping: default_title_mapping(),
        }
    }
}

impl Config {
    pub fn load_from_file(path: &PathBuf) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load the file if present, defaults otherwise
    pub fn load_or_default(path: &PathBuf) -> anyhow::Result<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save_to_file(&self, path: &PathBuf) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.engine.request_timeout_secs == 0 {
            return Err(anyhow::anyhow!("engine.request_timeout_secs must be greater than zero"));
        }
        if self.engine.cache_ttl_hours == 0 {
            return Err(anyhow::anyhow!("engine.cache_ttl_hours must be greater than zero"));
        }
        if self.engine.cache_namespace.trim().is_empty() {
            return Err(anyhow::anyhow!("engine.cache_namespace cannot be empty"));
        }
        if !is_http_url(&self.catalog.endpoint) {
            return Err(anyhow::anyhow!("catalog.endpoint must be an http(s) URL: {}", self.catalog.endpoint));
        }
        if !self.review_site.desc_url_template.contains("{id}") {
            return Err(anyhow::anyhow!("review_site.desc_url_template must contain an {{id}} placeholder"));
        }
        if !is_http_url(&self.metadata.base_url) {
            return Err(anyhow::anyhow!("metadata.base_url must be an http(s) URL: {}", self.metadata.base_url));
        }
        Ok(())
    }

    pub fn is_metadata_configured(&self) -> bool {
        self.metadata.resolved_token().is_some()
    }
}

fn is_http_url(value: &str) -> bool {
    value.starts_with("http://") || value.starts_with("https://")
}

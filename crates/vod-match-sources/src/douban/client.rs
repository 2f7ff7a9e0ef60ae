use std::sync::Arc;
use vod_match_config::ReviewSiteConfig;
use crate::error::SourceError;
use crate::traits::{FetchRequest, HttpFetcher};

/// Review-site description pages
///
/// The page is returned as raw text; callers scan it for an industry id or
/// for genre/country keywords.
#[derive(Clone)]
pub struct DoubanClient {
    fetcher: Arc<dyn HttpFetcher>,
    config: ReviewSiteConfig,
    user_agent: String,
}

impl DoubanClient {
    pub fn new(fetcher: Arc<dyn HttpFetcher>, config: ReviewSiteConfig, user_agent: impl Into<String>) -> Self {
        Self {
            fetcher,
            config,
            user_agent: user_agent.into(),
        }
    }

    pub fn description_request(&self, douban_id: &str) -> FetchRequest {
        FetchRequest::new(self.config.desc_url(douban_id))
            .header("User-Agent", self.user_agent.clone())
            .header("Referer", self.config.referer(douban_id))
    }

    pub async fn description(&self, douban_id: &str) -> Result<String, SourceError> {
        self.fetcher.fetch_text(&self.description_request(douban_id)).await
    }
}

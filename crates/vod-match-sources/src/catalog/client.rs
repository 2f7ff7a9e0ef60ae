use std::sync::Arc;
use crate::catalog::api::CatalogPage;
use crate::error::SourceError;
use crate::traits::{FetchRequest, HttpFetcher};

/// Client of a VOD collection API (`ac=detail&wd=<keyword>&pg=<page>`)
#[derive(Clone)]
pub struct CatalogClient {
    fetcher: Arc<dyn HttpFetcher>,
    endpoint: String,
}

impl CatalogClient {
    pub fn new(fetcher: Arc<dyn HttpFetcher>, endpoint: impl Into<String>) -> Self {
        Self {
            fetcher,
            endpoint: endpoint.into(),
        }
    }

    pub fn page_request(&self, keyword: &str, page: u32) -> FetchRequest {
        FetchRequest::new(self.endpoint.clone())
            .query("ac", "detail")
            .query("wd", keyword)
            .query("pg", page.to_string())
    }

    /// Fetch one result page
    pub async fn search_page(&self, keyword: &str, page: u32) -> Result<CatalogPage, SourceError> {
        let request = self.page_request(keyword, page);
        let value = self.fetcher.fetch_json(&request).await?;
        serde_json::from_value(value).map_err(|e| SourceError::parse(request.describe(), e))
    }
}

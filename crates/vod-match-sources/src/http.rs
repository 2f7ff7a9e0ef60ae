use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;
use vod_match_config::EngineConfig;
use crate::error::SourceError;
use crate::traits::{FetchRequest, HttpFetcher};

/// `HttpFetcher` backed by a shared reqwest client with a fixed timeout
#[derive(Clone)]
pub struct ReqwestFetcher {
    client: Client,
}

impl ReqwestFetcher {
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self, SourceError> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()
            .map_err(|e| SourceError::Transport {
                url: String::new(),
                message: format!("could not build HTTP client: {}", e),
            })?;
        Ok(Self { client })
    }

    pub fn from_config(engine: &EngineConfig) -> Result<Self, SourceError> {
        Self::new(&engine.user_agent, engine.request_timeout())
    }
}

fn transport_error(request: &FetchRequest, e: reqwest::Error) -> SourceError {
    let message = if e.is_timeout() {
        format!("timed out: {}", e)
    } else {
        e.to_string()
    };
    SourceError::Transport {
        url: request.describe(),
        message,
    }
}

#[async_trait]
impl HttpFetcher for ReqwestFetcher {
    async fn fetch_text(&self, request: &FetchRequest) -> Result<String, SourceError> {
        let mut builder = self.client.get(&request.url).query(&request.query);
        for (key, value) in &request.headers {
            builder = builder.header(key.as_str(), value.as_str());
        }

        let response = builder
            .send()
            .await
            .map_err(|e| transport_error(request, e))?;

        let status = response.status();
        if !status.is_success() {
            debug!("GET {} returned HTTP {}", request.describe(), status);
            return Err(SourceError::Status {
                url: request.describe(),
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(|e| transport_error(request, e))
    }
}

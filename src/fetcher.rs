use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{Client, StatusCode};
use thiserror::Error;
use tracing::info;

pub const DEFAULT_USER_AGENT: &str = "LaunchKit/0.1 (+marketing asset generator)";

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error: {0}")] Http(String),
    #[error("upstream returned status {0}")] Status(StatusCode),
    #[error("body error: {0}")] Body(String),
    #[error("Other: {0}")] Other(String),
}

/// A successfully fetched upstream resource.
#[derive(Debug, Clone)]
pub struct FetchedResource {
    pub status: StatusCode,
    pub content_type: Option<String>,
    pub body: Bytes,
}

impl FetchedResource {
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Single-attempt GET used by the extractors. Non-success statuses are errors.
#[async_trait]
pub trait ResourceFetcher: Send + Sync {
    async fn get(&self, url: &str) -> Result<FetchedResource, FetchError>;
}

pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(user_agent: &str) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(user_agent)
            .build()
            .map_err(|e| FetchError::Other(e.to_string()))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl ResourceFetcher for HttpFetcher {
    async fn get(&self, url: &str) -> Result<FetchedResource, FetchError> {
        info!("🔗 Fetching {}", url);

        let response = self.client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Http(e.to_string()))?;

        let status = response.status();
        info!("📥 {} responded with {}", url, status);

        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|ct| ct.to_str().ok())
            .map(|ct| ct.to_string());

        let body = response.bytes().await
            .map_err(|e| FetchError::Body(e.to_string()))?;

        Ok(FetchedResource { status, content_type, body })
    }
}

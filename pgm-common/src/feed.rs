//! Bulk load source: `{ "results": [...] }` from a file or an http(s) URL

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use tracing::debug;

use crate::programme::Feed;
use crate::Result;

/// Where the initial catalog comes from when storage is empty
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedSource {
    File(PathBuf),
    Url(String),
}

impl FeedSource {
    /// `http://` and `https://` locations are URLs, anything else is a path
    pub fn parse(location: &str) -> Self {
        let lower = location.to_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            FeedSource::Url(location.to_string())
        } else {
            FeedSource::File(PathBuf::from(location))
        }
    }

    pub async fn fetch(&self) -> Result<Feed> {
        debug!("Fetching feed from {}", self);
        match self {
            FeedSource::File(path) => {
                let bytes = tokio::fs::read(path).await?;
                Ok(serde_json::from_slice(&bytes)?)
            }
            FeedSource::Url(url) => {
                let client = reqwest::Client::builder()
                    .timeout(Duration::from_secs(30))
                    .build()?;
                let response = client.get(url).send().await?.error_for_status()?;
                Ok(response.json::<Feed>().await?)
            }
        }
    }
}

impl fmt::Display for FeedSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedSource::File(path) => write!(f, "{}", path.display()),
            FeedSource::Url(url) => write!(f, "{}", url),
        }
    }
}

use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::{Client, Url};
use thiserror::Error;
use tracing::debug;

use crate::config::Settings;
use crate::listing::ListingEntry;

/// Project page on the portal, relative to the base URL. Used when a listing
/// row carries no link of its own.
const PROJECT_PAGE: &str = "Main.asp?ACTION=ViewProject&PROJECT_NO=";

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("bad detail link {href:?}: {reason}")]
    BadLink { href: String, reason: String },
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },
    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Where detail pages come from.
pub enum DetailSource {
    /// Live portal.
    Http { client: Client, base: Url },
    /// Saved pages, one `<PROJ_NUM>.html` per project.
    Directory(PathBuf),
}

impl DetailSource {
    pub fn http(settings: &Settings) -> Result<Self> {
        let base = Url::parse(&settings.base_url)
            .with_context(|| format!("Invalid base URL {}", settings.base_url))?;
        let mut builder = Client::builder().user_agent(settings.user_agent.clone());
        if let Some(secs) = settings.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build().context("Failed to create HTTP client")?;
        Ok(DetailSource::Http { client, base })
    }

    pub fn directory(dir: impl Into<PathBuf>) -> Self {
        DetailSource::Directory(dir.into())
    }

    /// Detail page body for one listing entry.
    pub async fn fetch(&self, entry: &ListingEntry) -> Result<String, FetchError> {
        match self {
            DetailSource::Http { client, base } => {
                let url = detail_url(base, entry)?;
                fetch_page(client, url).await
            }
            DetailSource::Directory(dir) => {
                let path = dir.join(format!("{}.html", entry.number));
                let read = tokio::fs::read(&path).await;
                match read {
                    Ok(bytes) => Ok(String::from_utf8_lossy(&bytes).into_owned()),
                    Err(source) => Err(FetchError::Read { path, source }),
                }
            }
        }
    }
}

/// Resolve an entry's link against `base`. Absolute links pass through.
pub fn detail_url(base: &Url, entry: &ListingEntry) -> Result<Url, FetchError> {
    let href = entry
        .href
        .clone()
        .unwrap_or_else(|| format!("{}{}", PROJECT_PAGE, entry.number));
    base.join(href.trim()).map_err(|e| FetchError::BadLink {
        reason: e.to_string(),
        href,
    })
}

async fn fetch_page(client: &Client, url: Url) -> Result<String, FetchError> {
    let start = Instant::now();
    let response = client
        .get(url.clone())
        .send()
        .await
        .map_err(|source| FetchError::Request {
            url: url.to_string(),
            source,
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let body = response.text().await.map_err(|source| FetchError::Request {
        url: url.to_string(),
        source,
    })?;
    debug!(
        "Fetched {} ({} bytes) in {}ms",
        url,
        body.len(),
        start.elapsed().as_millis()
    );
    Ok(body)
}

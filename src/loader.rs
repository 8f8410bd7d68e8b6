//! Dataset loading.
//!
//! The dataset is fetched once per page load from a [`DatasetSource`] and
//! parsed into a [`Dataset`]. There is no caching, no timeout, and no retry:
//! a failed load is reported once as a [`LoadError`] and the caller decides
//! what to show.
//!
//! # Sources
//!
//! | Location | Source |
//! |----------|--------|
//! | `http://…`, `https://…` | [`HttpSource`] (always revalidates) |
//! | anything else | [`FileSource`] |

use std::path::PathBuf;

use async_trait::async_trait;
use reqwest::header::{CACHE_CONTROL, PRAGMA};
use thiserror::Error;
use tracing::{debug, info};

use research_catalog_core::Dataset;

/// Why the dataset could not be loaded.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("request to {url} failed with status {status}")]
    Status { url: String, status: u16 },

    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("dataset at {location} is not valid: {source}")]
    Parse {
        location: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Somewhere a dataset document can be fetched from.
#[async_trait]
pub trait DatasetSource: Send + Sync {
    /// Human-readable location, shown in the failure status line.
    fn location(&self) -> &str;

    /// Fetch the raw document body.
    async fn fetch(&self) -> Result<String, LoadError>;
}

/// Dataset document on the local filesystem.
pub struct FileSource {
    path: PathBuf,
    location: String,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let location = path.display().to_string();
        Self { path, location }
    }
}

#[async_trait]
impl DatasetSource for FileSource {
    fn location(&self) -> &str {
        &self.location
    }

    async fn fetch(&self) -> Result<String, LoadError> {
        tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| LoadError::Io {
                path: self.path.clone(),
                source,
            })
    }
}

/// Dataset document served over HTTP.
///
/// Every fetch sends `Cache-Control: no-cache` so intermediaries revalidate.
pub struct HttpSource {
    url: String,
    client: reqwest::Client,
}

impl HttpSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl DatasetSource for HttpSource {
    fn location(&self) -> &str {
        &self.url
    }

    async fn fetch(&self) -> Result<String, LoadError> {
        let request_error = |source: reqwest::Error| LoadError::Request {
            url: self.url.clone(),
            source,
        };

        let resp = self
            .client
            .get(&self.url)
            .header(CACHE_CONTROL, "no-cache")
            .header(PRAGMA, "no-cache")
            .send()
            .await
            .map_err(request_error)?;

        let status = resp.status();
        debug!("GET {} -> {}", self.url, status);
        if !status.is_success() {
            return Err(LoadError::Status {
                url: self.url.clone(),
                status: status.as_u16(),
            });
        }

        resp.text().await.map_err(request_error)
    }
}

/// Pick a source for `location`: HTTP for `http(s)://` URLs, a file otherwise.
pub fn source_from_location(location: &str) -> Box<dyn DatasetSource> {
    let trimmed = location.trim();
    let lower = trimmed.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        Box::new(HttpSource::new(trimmed))
    } else {
        Box::new(FileSource::new(trimmed))
    }
}

/// Fetch and parse the dataset.
pub async fn load(source: &dyn DatasetSource) -> Result<Dataset, LoadError> {
    info!("loading dataset from {}", source.location());
    let body = source.fetch().await?;
    let dataset = Dataset::from_json(&body).map_err(|source_err| LoadError::Parse {
        location: source.location().to_string(),
        source: source_err,
    })?;
    info!(
        "loaded dataset: {} projects, {} articles, {} manuals",
        dataset.projects.len(),
        dataset.articles.len(),
        dataset.manuals.len()
    );
    Ok(dataset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_source_selection() {
        assert_eq!(
            source_from_location("https://example.org/data.json").location(),
            "https://example.org/data.json"
        );
        assert_eq!(source_from_location(" data/data.json ").location(), "data/data.json");
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("data.json");
        fs::write(
            &path,
            r#"{"version": "1", "projects": [{"id": "P-1"}], "articles": [], "manuals": []}"#,
        )
        .unwrap();

        let ds = load(&FileSource::new(&path)).await.unwrap();
        assert_eq!(ds.projects.len(), 1);
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let tmp = TempDir::new().unwrap();
        let err = load(&FileSource::new(tmp.path().join("nope.json")))
            .await
            .unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }

    #[tokio::test]
    async fn test_unparseable_file_is_parse_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("data.json");
        fs::write(&path, "<html>not found</html>").unwrap();
        let err = load(&FileSource::new(&path)).await.unwrap_err();
        assert!(matches!(err, LoadError::Parse { .. }));
    }
}

use crate::error::{FolioError, Result};
use std::path::PathBuf;
use std::time::Duration;

const USER_AGENT: &str = concat!("folio/", env!("CARGO_PKG_VERSION"));

/// Read-once access to remote text and JSON documents.
pub trait FetchJson {
    fn fetch_text(&self, url: &str) -> Result<String>;

    fn fetch_json(&self, url: &str) -> Result<serde_json::Value> {
        let text = self.fetch_text(url)?;
        Ok(serde_json::from_str(&text)?)
    }
}

/// Blocking HTTP fetcher. Non-success statuses are reported as errors.
pub struct HttpFetcher {
    agent: ureq::Agent,
}

impl HttpFetcher {
    pub fn new() -> Self {
        let agent = ureq::config::Config::builder()
            .http_status_as_error(false)
            .timeout_global(Some(Duration::from_secs(10)))
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl FetchJson for HttpFetcher {
    fn fetch_text(&self, url: &str) -> Result<String> {
        tracing::debug!(url, "fetching");
        let response = self
            .agent
            .get(url)
            .header("User-Agent", USER_AGENT)
            .header("Accept", "application/json, text/csv, */*")
            .call()?;

        let status = response.status().as_u16();
        if status >= 400 {
            return Err(FolioError::Status {
                status,
                url: url.to_string(),
            });
        }

        Ok(response.into_body().read_to_string()?)
    }
}

/// Where a data file comes from: a local path or an `http(s)` URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Path(PathBuf),
    Url(String),
}

impl Source {
    pub fn parse(input: &str) -> Self {
        let lower = input.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            Source::Url(input.to_string())
        } else {
            Source::Path(PathBuf::from(input))
        }
    }

    pub fn read_to_string(&self, fetcher: &dyn FetchJson) -> Result<String> {
        match self {
            Source::Path(path) => Ok(std::fs::read_to_string(path)?),
            Source::Url(url) => fetcher.fetch_text(url),
        }
    }
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Source::Path(path) => write!(f, "{}", path.display()),
            Source::Url(url) => f.write_str(url),
        }
    }
}

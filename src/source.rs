use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use kiwa_core::Table;
use reqwest::header::CACHE_CONTROL;
use tokio::fs;
use tracing::{debug, info};

use crate::error::SourceError;
use crate::proposal::Proposal;

/// Somewhere raw text can be fetched from.
#[async_trait]
pub trait TextSource: Send + Sync {
    fn location(&self) -> &str;
    async fn fetch_text(&self) -> Result<String, SourceError>;
}

#[derive(Debug, Clone)]
pub struct FsSource {
    pub path: PathBuf,
    location: String,
}

impl FsSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let location = path.display().to_string();
        Self { path, location }
    }
}

#[async_trait]
impl TextSource for FsSource {
    fn location(&self) -> &str {
        &self.location
    }

    async fn fetch_text(&self) -> Result<String, SourceError> {
        let text = fs::read_to_string(&self.path)
            .await
            .map_err(|e| SourceError::unavailable(&self.location, e))?;
        Ok(strip_bom(text))
    }
}

#[derive(Debug, Clone)]
pub struct HttpSource {
    url: String,
    client: reqwest::Client,
}

impl HttpSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, SourceError> {
        let url = url.into();
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SourceError::unavailable(&url, e))?;
        Ok(Self { url, client })
    }
}

#[async_trait]
impl TextSource for HttpSource {
    fn location(&self) -> &str {
        &self.url
    }

    async fn fetch_text(&self) -> Result<String, SourceError> {
        // always revalidate; the annex is edited live
        let resp = self
            .client
            .get(&self.url)
            .header(CACHE_CONTROL, "no-cache")
            .send()
            .await
            .map_err(|e| SourceError::unavailable(&self.url, e))?;
        let status = resp.status();
        if !status.is_success() {
            return Err(SourceError::unavailable(&self.url, format!("HTTP {status}")));
        }
        resp.text()
            .await
            .map_err(|e| SourceError::unavailable(&self.url, e))
    }
}

/// reqwest's `text()` drops a leading BOM; local files get the same.
fn strip_bom(text: String) -> String {
    match text.strip_prefix('\u{feff}') {
        Some(rest) => rest.to_string(),
        None => text,
    }
}

/// `http://` / `https://` locations go over the network, `file://` and
/// anything else is a local path.
pub fn open_source(location: &str, timeout: Duration) -> Result<Box<dyn TextSource>, SourceError> {
    let lower = location.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        return Ok(Box::new(HttpSource::new(location, timeout)?));
    }
    let path = location.strip_prefix("file://").unwrap_or(location);
    Ok(Box::new(FsSource::new(path)))
}

/// Fetch and deserialize the proposal document, applying the year patch.
pub async fn load_proposal(
    source: &dyn TextSource,
    force_year: Option<u32>,
) -> Result<Proposal, SourceError> {
    let raw = source.fetch_text().await?;
    let mut proposal = Proposal::from_json(&raw).map_err(|e| SourceError::InvalidDocument {
        location: source.location().to_string(),
        source: e,
    })?;
    if let Some(year) = force_year {
        proposal.patch_year(year);
    }
    info!(
        location = %source.location(),
        apps = proposal.aplicativos.len(),
        "proposal loaded"
    );
    Ok(proposal)
}

/// Fetch and parse a TSV annex. An empty blob gives the empty table.
pub async fn load_table(source: &dyn TextSource) -> Result<Table, SourceError> {
    let raw = source.fetch_text().await?;
    let table = Table::parse(&raw);
    if table.is_empty() {
        debug!(location = %source.location(), "annex source is empty");
    }
    info!(
        location = %source.location(),
        rows = table.len(),
        ragged = table.ragged_rows().len(),
        "annex loaded"
    );
    Ok(table)
}

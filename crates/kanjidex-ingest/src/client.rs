use std::time::Duration;

use kanjidex_config::kanjivg::KanjiVgConfig;
use serde::Deserialize;

use crate::index::KvgIndex;

const GITHUB_JSON: &str = "application/vnd.github.v3+json";

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Request to {url} returned status {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("Release {0} has no downloadable assets")]
    NoAssets(String),

    #[error("Invalid format: {0}")]
    InvalidFormat(String),
}

#[derive(Debug, Clone, Deserialize)]
pub struct Release {
    pub tag_name: String,
    #[serde(default)]
    pub assets: Vec<ReleaseAsset>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReleaseAsset {
    pub name: String,
    pub browser_download_url: String,
}

impl Release {
    /// The full archive (`kanjivg-<date>-all.zip`), or the first asset when no
    /// asset follows that naming
    pub fn archive_asset(&self) -> Option<&ReleaseAsset> {
        self.assets
            .iter()
            .find(|a| a.name.ends_with("-all.zip"))
            .or_else(|| self.assets.first())
    }
}

/// HTTP access to the KanjiVG index and GitHub releases
#[derive(Clone)]
pub struct KanjiVgClient {
    client: reqwest::Client,
    config: KanjiVgConfig,
}

impl KanjiVgClient {
    pub fn new(config: KanjiVgConfig) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self { client, config })
    }

    /// Fetch `kvg-index.json`
    pub async fn fetch_index(&self) -> Result<KvgIndex, FetchError> {
        let url = &self.config.index_url;
        tracing::info!("Fetching KanjiVG index from {url}");

        let response = self.client.get(url).send().await?;
        let body = Self::check_status(url, response)?.text().await?;

        let index =
            KvgIndex::from_json(&body).map_err(|e| FetchError::InvalidFormat(e.to_string()))?;
        tracing::info!("Fetched {} index entries", index.len());
        Ok(index)
    }

    /// Describe the latest KanjiVG release through the GitHub REST API
    pub async fn latest_release(&self) -> Result<Release, FetchError> {
        let url = &self.config.release_url;
        tracing::info!("Looking up latest KanjiVG release at {url}");

        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, GITHUB_JSON)
            .send()
            .await?;

        let release = Self::check_status(url, response)?.json::<Release>().await?;
        tracing::info!("Latest release is {}", release.tag_name);
        Ok(release)
    }

    /// Download the release archive into memory
    pub async fn download_archive(&self, release: &Release) -> Result<Vec<u8>, FetchError> {
        let asset = release
            .archive_asset()
            .ok_or_else(|| FetchError::NoAssets(release.tag_name.clone()))?;
        let url = &asset.browser_download_url;
        tracing::info!("Downloading {} from {url}", asset.name);

        let response = self.client.get(url).send().await?;
        let bytes = Self::check_status(url, response)?.bytes().await?;

        tracing::info!("Downloaded {} bytes", bytes.len());
        Ok(bytes.to_vec())
    }

    fn check_status(
        url: &str,
        response: reqwest::Response,
    ) -> Result<reqwest::Response, FetchError> {
        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Err(FetchError::Status {
                url: url.to_string(),
                status,
            });
        }
        Ok(response)
    }
}

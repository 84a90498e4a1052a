use std::env;

use serde::{Deserialize, Serialize};

pub const DEFAULT_INDEX_URL: &str =
    "https://raw.githubusercontent.com/KanjiVG/kanjivg/refs/heads/master/kvg-index.json";
pub const DEFAULT_RELEASE_URL: &str =
    "https://api.github.com/repos/KanjiVG/kanjivg/releases/latest";

/// Where the KanjiVG index and release archive are fetched from
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KanjiVgConfig {
    pub index_url: String,
    /// GitHub API endpoint describing the latest release
    pub release_url: String,
    /// GitHub rejects API requests without a user agent
    pub user_agent: String,
    pub timeout_seconds: u64,
}

impl Default for KanjiVgConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl KanjiVgConfig {
    pub fn new() -> Self {
        let index_url =
            env::var("KVG_INDEX_URL").unwrap_or_else(|_| DEFAULT_INDEX_URL.to_string());

        let release_url =
            env::var("KVG_RELEASE_URL").unwrap_or_else(|_| DEFAULT_RELEASE_URL.to_string());

        let user_agent = env::var("KANJIDEX_USER_AGENT")
            .unwrap_or_else(|_| format!("kanjidex/{}", env!("CARGO_PKG_VERSION")));

        let timeout_seconds = env::var("HTTP_TIMEOUT_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(30); // 30 seconds default

        Self {
            index_url,
            release_url,
            user_agent,
            timeout_seconds,
        }
    }
}

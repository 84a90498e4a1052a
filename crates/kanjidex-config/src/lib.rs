use std::env;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use self::kanjivg::KanjiVgConfig;

pub mod kanjivg;

/// Records live in `<data_dir>/kanji`, one JSON file per character
pub const RECORDS_DIR_NAME: &str = "kanji";
/// Reserved for keyword data, created but not written yet
pub const KEYWORDS_DIR_NAME: &str = "keywords";

fn default_data_dir() -> PathBuf {
    env::var("KANJIDEX_DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("./data"))
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Root of the on-disk dataset
    pub data_dir: PathBuf,
    pub kanjivg: KanjiVgConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    pub fn new() -> Self {
        Config {
            data_dir: default_data_dir(),
            kanjivg: KanjiVgConfig::new(),
        }
    }

    /// Load config from a JSON file, fields missing from the file fall back to
    /// the environment defaults
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        tracing::info!("Loading config from {}", path.display());
        let file = File::open(path)
            .with_context(|| format!("Failed to open config file {}", path.display()))?;
        let reader = BufReader::new(file);
        let config = serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(config)
    }

    pub fn records_dir(&self) -> PathBuf {
        self.data_dir.join(RECORDS_DIR_NAME)
    }

    pub fn keywords_dir(&self) -> PathBuf {
        self.data_dir.join(KEYWORDS_DIR_NAME)
    }
}

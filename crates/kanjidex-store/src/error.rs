use std::io;

use kanjidex_lang_japanese::Kanji;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("No record for {0}")]
    NotFound(Kanji),

    #[error("Record for {kanji} is not valid JSON: {source}")]
    Malformed {
        kanji: Kanji,
        #[source]
        source: serde_json::Error,
    },

    #[error("Record for {kanji} is inconsistent: {reason}")]
    Inconsistent { kanji: Kanji, reason: String },

    #[error("Source error: {0}")]
    Source(#[from] SourceError),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl StoreError {
    /// Errors confined to a single record. A batch logs these and moves on,
    /// anything else aborts it.
    pub fn is_item_level(&self) -> bool {
        !matches!(self, StoreError::Io(_))
    }
}

/// Failure reading enrichment data from an external source
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("Entry {entry} is not valid UTF-8")]
    NotUtf8 { entry: String },

    #[error("Archive error: {0}")]
    Archive(String),

    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

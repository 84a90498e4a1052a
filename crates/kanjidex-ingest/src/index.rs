use std::collections::BTreeMap;
use std::path::Path;

use kanjidex_store::SourceError;
use serde::Deserialize;

/// Supplies the characters a bootstrap pass should create records for.
///
/// Candidates are raw keys from the upstream index and may include entries
/// that are not kanji; the driver validates them.
pub trait IndexSource {
    fn candidates(&self) -> Result<Vec<String>, SourceError>;
}

impl IndexSource for Vec<String> {
    fn candidates(&self) -> Result<Vec<String>, SourceError> {
        Ok(self.clone())
    }
}

/// Parsed `kvg-index.json`: character -> stroke file names.
///
/// ```json
/// { "一": ["04e00.svg"], "丁": ["04e01.svg", "04e01-Kaisho.svg"] }
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct KvgIndex {
    entries: BTreeMap<String, Vec<String>>,
}

impl KvgIndex {
    pub fn from_json(json: &str) -> Result<Self, SourceError> {
        serde_json::from_str(json).map_err(|e| SourceError::InvalidFormat(e.to_string()))
    }

    pub fn load_from_file(path: &Path) -> Result<Self, SourceError> {
        tracing::info!("Loading KanjiVG index from file: {}", path.display());
        let json = std::fs::read_to_string(path)?;
        let index = Self::from_json(&json)?;
        tracing::info!("Loaded {} index entries from file", index.len());
        Ok(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl IndexSource for KvgIndex {
    fn candidates(&self) -> Result<Vec<String>, SourceError> {
        Ok(self.entries.keys().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INDEX: &str = r#"{
        "一": ["04e00.svg"],
        "丁": ["04e01.svg", "04e01-Kaisho.svg"],
        "A": ["00041.svg"]
    }"#;

    #[test]
    fn test_candidates_are_index_keys() {
        let index = KvgIndex::from_json(INDEX).unwrap();
        assert_eq!(index.len(), 3);
        assert_eq!(
            index.candidates().unwrap(),
            vec!["A".to_string(), "一".to_string(), "丁".to_string()]
        );
    }

    #[test]
    fn test_rejects_wrong_shape() {
        assert!(matches!(
            KvgIndex::from_json(r#"["一"]"#),
            Err(SourceError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kvg-index.json");
        std::fs::write(&path, INDEX).unwrap();

        assert_eq!(KvgIndex::load_from_file(&path).unwrap().len(), 3);
        assert!(matches!(
            KvgIndex::load_from_file(&dir.path().join("missing.json")),
            Err(SourceError::Io(_))
        ));
    }
}

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use kanjidex_lang_japanese::{Kanji, KanjiRecord};

use crate::error::StoreError;
use crate::slot::SlotGuard;

const RECORD_EXTENSION: &str = "json";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateOutcome {
    Created,
    AlreadyExists,
}

/// Keyed storage of one record per kanji
pub trait RecordStore {
    /// Load the record for `kanji`
    fn read(&self, kanji: Kanji) -> Result<KanjiRecord, StoreError>;

    /// Persist `record`, replacing whatever its slot held before.
    ///
    /// Readers observe either the previous or the new record, never a mix.
    fn write(&self, record: &KanjiRecord) -> Result<(), StoreError>;

    /// Persist `record` only if its slot is empty
    fn create_if_absent(&self, record: &KanjiRecord) -> Result<CreateOutcome, StoreError>;

    /// All characters that currently have a record, in code point order
    fn keys(&self) -> Result<Vec<Kanji>, StoreError>;
}

/// Record store backed by a directory of `<kanji>.json` files.
///
/// Files are named by the character itself so the dataset stays easy to
/// browse by hand.
#[derive(Debug, Clone)]
pub struct FileRecordStore {
    records_dir: PathBuf,
}

impl FileRecordStore {
    pub fn new(records_dir: impl Into<PathBuf>) -> Self {
        Self {
            records_dir: records_dir.into(),
        }
    }

    /// Create the records directory and the reserved keyword directory
    pub fn init_layout(records_dir: &Path, keywords_dir: &Path) -> Result<Self, StoreError> {
        fs::create_dir_all(records_dir)?;
        fs::create_dir_all(keywords_dir)?;
        tracing::debug!(
            records = %records_dir.display(),
            keywords = %keywords_dir.display(),
            "dataset layout ready"
        );
        Ok(Self::new(records_dir))
    }

    pub fn records_dir(&self) -> &Path {
        &self.records_dir
    }

    pub fn slot_path(&self, kanji: Kanji) -> PathBuf {
        self.records_dir.join(format!("{}.{RECORD_EXTENSION}", kanji.as_char()))
    }

    fn serialize(record: &KanjiRecord) -> Result<Vec<u8>, StoreError> {
        let mut contents =
            serde_json::to_vec_pretty(record).map_err(|source| StoreError::Malformed {
                kanji: record.kanji,
                source,
            })?;
        contents.push(b'\n');
        Ok(contents)
    }
}

impl RecordStore for FileRecordStore {
    fn read(&self, kanji: Kanji) -> Result<KanjiRecord, StoreError> {
        let path = self.slot_path(kanji);
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(StoreError::NotFound(kanji));
            }
            Err(e) => return Err(StoreError::Io(e)),
        };

        let record: KanjiRecord = serde_json::from_str(&contents)
            .map_err(|source| StoreError::Malformed { kanji, source })?;

        if record.kanji != kanji {
            return Err(StoreError::Inconsistent {
                kanji,
                reason: format!("slot holds the record for {}", record.kanji),
            });
        }

        Ok(record)
    }

    fn write(&self, record: &KanjiRecord) -> Result<(), StoreError> {
        let path = self.slot_path(record.kanji);
        let contents = Self::serialize(record)?;
        SlotGuard::stage(&path, &contents)?.commit(&path)?;
        tracing::debug!(kanji = %record.kanji, "record written");
        Ok(())
    }

    fn create_if_absent(&self, record: &KanjiRecord) -> Result<CreateOutcome, StoreError> {
        let path = self.slot_path(record.kanji);

        // Cheap check first so re-runs don't stage thousands of temp files
        if path.exists() {
            tracing::info!("{}.json already exists and was not created", record.kanji);
            return Ok(CreateOutcome::AlreadyExists);
        }

        let contents = Self::serialize(record)?;
        if SlotGuard::stage(&path, &contents)?.commit_new(&path)? {
            tracing::debug!(kanji = %record.kanji, "record created");
            Ok(CreateOutcome::Created)
        } else {
            tracing::info!("{}.json already exists and was not created", record.kanji);
            Ok(CreateOutcome::AlreadyExists)
        }
    }

    fn keys(&self) -> Result<Vec<Kanji>, StoreError> {
        let entries = match fs::read_dir(&self.records_dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::warn!(
                    "records directory {} does not exist",
                    self.records_dir.display()
                );
                return Ok(vec![]);
            }
            Err(e) => return Err(StoreError::Io(e)),
        };

        let mut keys = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some(RECORD_EXTENSION) {
                continue;
            }

            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                tracing::warn!("skipping {}: file name is not UTF-8", path.display());
                continue;
            };

            match Kanji::new(stem) {
                Ok(kanji) => keys.push(kanji),
                Err(e) => tracing::warn!("skipping {}: {e}", path.display()),
            }
        }

        keys.sort();
        Ok(keys)
    }
}

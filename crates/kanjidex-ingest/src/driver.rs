use std::collections::BTreeSet;
use std::fmt;

use kanjidex_lang_japanese::{Kanji, KanjiRecord};
use kanjidex_store::{CreateOutcome, MergeOutcome, RecordStore, StoreError, SvgSource, enrich_svg};

use crate::index::IndexSource;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BootstrapReport {
    pub created: usize,
    pub existing: usize,
    /// Index keys that are not a single kanji
    pub invalid: usize,
    pub failed: usize,
}

impl fmt::Display for BootstrapReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} created, {} already existed, {} invalid, {} failed",
            self.created, self.existing, self.invalid, self.failed
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnrichReport {
    pub updated: usize,
    pub unchanged: usize,
    /// Records without an archive entry
    pub missing: usize,
    pub failed: usize,
}

impl fmt::Display for EnrichReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} updated, {} unchanged, {} missing from archive, {} failed",
            self.updated, self.unchanged, self.missing, self.failed
        )
    }
}

/// Create an empty record for every valid kanji in `index`.
///
/// Existing records are never touched, so this can be re-run after the
/// dataset has been enriched. Only I/O failures abort the pass.
pub fn bootstrap<R, I>(store: &R, index: &I) -> Result<BootstrapReport, StoreError>
where
    R: RecordStore + ?Sized,
    I: IndexSource + ?Sized,
{
    let candidates = index.candidates()?;
    tracing::info!("Bootstrapping records for {} index entries", candidates.len());

    let mut report = BootstrapReport::default();
    let mut seen = BTreeSet::new();

    for candidate in candidates {
        let kanji = match Kanji::new(&candidate) {
            Ok(kanji) => kanji,
            Err(e) => {
                tracing::warn!("{e}");
                report.invalid += 1;
                continue;
            }
        };

        if !seen.insert(kanji) {
            continue;
        }

        match store.create_if_absent(&KanjiRecord::new(kanji)) {
            Ok(CreateOutcome::Created) => report.created += 1,
            Ok(CreateOutcome::AlreadyExists) => report.existing += 1,
            Err(e) if e.is_item_level() => {
                tracing::error!("Error when creating {kanji}.json: {e}");
                report.failed += 1;
            }
            Err(e) => return Err(e),
        }
    }

    tracing::info!("Bootstrap finished: {report}");
    Ok(report)
}

/// Merge stroke markup from `svgs` into every stored record
pub fn enrich<R, S>(store: &R, svgs: &mut S) -> Result<EnrichReport, StoreError>
where
    R: RecordStore + ?Sized,
    S: SvgSource + ?Sized,
{
    let keys = store.keys()?;
    tracing::info!("Merging SVG data into {} records", keys.len());

    let mut report = EnrichReport::default();

    for kanji in keys {
        match enrich_svg(store, kanji, &mut *svgs) {
            Ok(MergeOutcome::Updated) => report.updated += 1,
            Ok(MergeOutcome::Unchanged) => report.unchanged += 1,
            Ok(MergeOutcome::Missing) => report.missing += 1,
            Err(e) if e.is_item_level() => {
                tracing::error!("Skipping {kanji}: {e}");
                report.failed += 1;
            }
            Err(e) => return Err(e),
        }
    }

    tracing::info!("SVG merge finished: {report}");
    Ok(report)
}

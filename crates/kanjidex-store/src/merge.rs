use std::collections::HashMap;
use std::hash::BuildHasher;

use kanjidex_lang_japanese::{HexCode, Kanji, KanjiRecord};

use crate::error::{SourceError, StoreError};
use crate::store::RecordStore;

/// Stroke-order markup keyed by hex code
pub trait SvgSource {
    /// Markup for `hex` with surrounding whitespace trimmed, None if the
    /// source has no entry for it
    fn svg(&mut self, hex: &HexCode) -> Result<Option<String>, SourceError>;
}

impl<S: BuildHasher> SvgSource for HashMap<HexCode, String, S> {
    fn svg(&mut self, hex: &HexCode) -> Result<Option<String>, SourceError> {
        Ok(self.get(hex).map(|markup| markup.trim().to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    /// The record's SVG was set to a new value
    Updated,
    /// The record already held the same markup
    Unchanged,
    /// The source has no entry for the record, nothing was written
    Missing,
}

/// Hex code stored in the record, checked to name the record's own character
pub fn stored_hex_code(record: &KanjiRecord) -> Result<HexCode, StoreError> {
    let hex = HexCode::parse(&record.hexadecimal).map_err(|e| StoreError::Inconsistent {
        kanji: record.kanji,
        reason: format!("hexadecimal {:?}: {e}", record.hexadecimal),
    })?;

    if hex.kanji() != record.kanji {
        return Err(StoreError::Inconsistent {
            kanji: record.kanji,
            reason: format!("hexadecimal {} belongs to {}", hex, hex.kanji()),
        });
    }

    Ok(hex)
}

/// Copy the stroke markup for `kanji` from `svgs` into its stored record.
///
/// Running this again with the same source leaves the record byte for byte
/// the same. A record without a source entry keeps its previous `svg`.
pub fn enrich_svg<R, S>(
    store: &R,
    kanji: Kanji,
    svgs: &mut S,
) -> Result<MergeOutcome, StoreError>
where
    R: RecordStore + ?Sized,
    S: SvgSource + ?Sized,
{
    let mut record = store.read(kanji)?;
    let hex = stored_hex_code(&record)?;

    let Some(markup) = svgs.svg(&hex)? else {
        tracing::warn!(
            "{} not found in the archive, {} left unchanged",
            hex.svg_entry_path(),
            kanji
        );
        return Ok(MergeOutcome::Missing);
    };

    let outcome = if record.svg == markup {
        MergeOutcome::Unchanged
    } else {
        MergeOutcome::Updated
    };

    record.svg = markup;
    store.write(&record)?;

    tracing::debug!(%kanji, %hex, ?outcome, "svg merged");
    Ok(outcome)
}

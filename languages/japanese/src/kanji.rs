use std::fmt;
use std::ops::RangeInclusive;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Unicode blocks accepted as kanji or radicals
pub const KANJI_RANGES: [(KanjiBlock, RangeInclusive<u32>); 5] = [
    (KanjiBlock::Unified, 0x4E00..=0x9FFF),
    (KanjiBlock::ExtensionA, 0x3400..=0x4DBF),
    (KanjiBlock::ExtensionB, 0x20000..=0x2A6DF),
    (KanjiBlock::Compatibility, 0xF900..=0xFAFF),
    (KanjiBlock::RadicalsSupplement, 0x2E80..=0x2EFF),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KanjiBlock {
    Unified,
    ExtensionA,
    ExtensionB,
    Compatibility,
    RadicalsSupplement,
}

impl KanjiBlock {
    pub fn as_str(&self) -> &'static str {
        match self {
            KanjiBlock::Unified => "CJK Unified Ideographs",
            KanjiBlock::ExtensionA => "CJK Unified Ideographs Extension A",
            KanjiBlock::ExtensionB => "CJK Unified Ideographs Extension B",
            KanjiBlock::Compatibility => "CJK Compatibility Ideographs",
            KanjiBlock::RadicalsSupplement => "CJK Radicals Supplement",
        }
    }
}

/// Find the block a character belongs to, None if it is not a kanji
pub fn block_of(c: char) -> Option<KanjiBlock> {
    let code_point = c as u32;
    KANJI_RANGES
        .iter()
        .find(|(_, range)| range.contains(&code_point))
        .map(|(block, _)| *block)
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KanjiError {
    #[error("{0:?} is not a single character")]
    NotSingleChar(String),

    #[error("{0} is not a valid kanji")]
    OutOfRange(char),

    #[error("{0:?} is not a hexadecimal code point")]
    InvalidHex(String),

    #[error("U+{0:X} is not a Unicode scalar value")]
    NotAScalar(u32),
}

/// A single character inside one of the recognized kanji blocks.
///
/// Can only be built through validation, so holding a `Kanji` means the
/// character has already been checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Kanji(char);

impl Kanji {
    /// Validate text that should hold exactly one Unicode scalar value
    pub fn new(text: &str) -> Result<Self, KanjiError> {
        let mut chars = text.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::from_char(c),
            _ => Err(KanjiError::NotSingleChar(text.to_string())),
        }
    }

    pub fn from_char(c: char) -> Result<Self, KanjiError> {
        match block_of(c) {
            Some(_) => Ok(Self(c)),
            None => Err(KanjiError::OutOfRange(c)),
        }
    }

    pub fn as_char(&self) -> char {
        self.0
    }

    pub fn code_point(&self) -> u32 {
        self.0 as u32
    }

    pub fn block(&self) -> KanjiBlock {
        // Construction guarantees membership
        block_of(self.0).unwrap_or(KanjiBlock::Unified)
    }
}

impl fmt::Display for Kanji {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for Kanji {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_char(self.0)
    }
}

impl<'de> Deserialize<'de> for Kanji {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Kanji::new(&text).map_err(serde::de::Error::custom)
    }
}

/// Returns whether `text` is a single kanji or radical.
///
/// Length is counted in Unicode scalar values, so characters outside the
/// BMP (Extension B) count as one. Rejections are reported as a warning.
pub fn is_valid(text: &str) -> bool {
    match Kanji::new(text) {
        Ok(_) => true,
        Err(e) => {
            tracing::warn!("{e}");
            false
        }
    }
}

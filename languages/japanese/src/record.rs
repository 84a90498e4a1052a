use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::hexcode::HexCode;
use crate::jlpt::JlptLevel;
use crate::kanji::Kanji;

/// Per-character record persisted as one JSON file.
///
/// Everything besides the character and its hex code starts out empty and is
/// filled in by later enrichment passes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KanjiRecord {
    pub kanji: Kanji,
    /// Stored as text so a damaged code is reported by the store, not by serde
    pub hexadecimal: String,
    #[serde(default)]
    pub jpdb_keyword: Option<String>,
    #[serde(default)]
    pub rtk_keyword: Option<String>,
    #[serde(default)]
    pub kklc_keyword: Option<String>,
    #[serde(default)]
    pub frequency: Option<u32>,
    #[serde(default)]
    pub jouyou_level: Option<u8>,
    #[serde(rename = "JLPT", default)]
    pub jlpt: Option<JlptLevel>,
    #[serde(default)]
    pub onyomi: Vec<String>,
    #[serde(default)]
    pub kunyomi: Vec<String>,
    #[serde(default)]
    pub components: Vec<String>,
    #[serde(default)]
    pub strokes: Option<u32>,
    /// Raw stroke-order markup, empty until the SVG pass runs
    #[serde(default)]
    pub svg: String,
    /// Fields written by other tools, kept so a rewrite never drops them
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl KanjiRecord {
    /// Fresh record for the bootstrap pass
    pub fn new(kanji: Kanji) -> Self {
        Self {
            kanji,
            hexadecimal: HexCode::from_kanji(kanji).to_string(),
            jpdb_keyword: None,
            rtk_keyword: None,
            kklc_keyword: None,
            frequency: None,
            jouyou_level: None,
            jlpt: None,
            onyomi: vec![],
            kunyomi: vec![],
            components: vec![],
            strokes: None,
            svg: String::new(),
            extra: Map::new(),
        }
    }
}

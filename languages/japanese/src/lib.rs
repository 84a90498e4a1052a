pub mod hexcode;
pub mod jlpt;
pub mod kanji;
pub mod record;

pub use hexcode::{HEX_PAD, HEX_WIDTH, HexCode, decode, encode};
pub use jlpt::JlptLevel;
pub use kanji::{KANJI_RANGES, Kanji, KanjiBlock, KanjiError, block_of, is_valid};
pub use record::KanjiRecord;

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::kanji::{Kanji, KanjiError};

/// Fixed width of a hex code, enough for every code point up to U+FFFFF
pub const HEX_WIDTH: usize = 5;
pub const HEX_PAD: char = '0';

/// Directory prefix of stroke files inside the KanjiVG archive
pub const SVG_ENTRY_DIR: &str = "kanji";

/// Lowercase, zero padded code point of a kanji, e.g. `04e00` for 一.
///
/// This is the naming scheme KanjiVG uses for its stroke files.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HexCode {
    code: String,
    kanji: Kanji,
}

impl HexCode {
    pub fn from_kanji(kanji: Kanji) -> Self {
        let digits = format!("{:x}", kanji.code_point());
        let padding = HEX_WIDTH.saturating_sub(digits.len());
        let mut code = String::with_capacity(HEX_WIDTH);
        code.extend(std::iter::repeat_n(HEX_PAD, padding));
        code.push_str(&digits);
        Self { code, kanji }
    }

    /// Parse and revalidate a hex code, normalizing it to the padded form
    pub fn parse(hex: &str) -> Result<Self, KanjiError> {
        decode(hex).map(Self::from_kanji)
    }

    /// Parse a KanjiVG file name such as `04e00.svg`.
    ///
    /// Variant files (`04e00-Kaisho.svg`) are not plain stroke data and are
    /// rejected.
    pub fn from_svg_file_name(name: &str) -> Result<Self, KanjiError> {
        let stem = name.strip_suffix(".svg").unwrap_or(name);
        if stem.len() != HEX_WIDTH {
            return Err(KanjiError::InvalidHex(stem.to_string()));
        }
        Self::parse(stem)
    }

    pub fn as_str(&self) -> &str {
        &self.code
    }

    pub fn kanji(&self) -> Kanji {
        self.kanji
    }

    /// Path of the stroke file for this code inside the release archive
    pub fn svg_entry_path(&self) -> String {
        format!("{SVG_ENTRY_DIR}/{}.svg", self.code)
    }
}

impl fmt::Display for HexCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.code)
    }
}

impl Serialize for HexCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.code)
    }
}

impl<'de> Deserialize<'de> for HexCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        HexCode::parse(&text).map_err(serde::de::Error::custom)
    }
}

/// Encode a single kanji as its hex code
pub fn encode(text: &str) -> Result<HexCode, KanjiError> {
    let kanji = Kanji::new(text).inspect_err(|e| tracing::warn!("{e}"))?;
    Ok(HexCode::from_kanji(kanji))
}

/// Decode a hex code back into a kanji.
///
/// The decoded character is validated again, so a code that names a
/// non-kanji code point fails instead of producing an arbitrary character.
/// Every rejection is reported as a warning.
pub fn decode(hex: &str) -> Result<Kanji, KanjiError> {
    decode_code_point(hex).inspect_err(|e| tracing::warn!("{e}"))
}

fn decode_code_point(hex: &str) -> Result<Kanji, KanjiError> {
    if hex.is_empty() || hex.len() > 8 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(KanjiError::InvalidHex(hex.to_string()));
    }

    let code_point =
        u32::from_str_radix(hex, 16).map_err(|_| KanjiError::InvalidHex(hex.to_string()))?;
    let c = char::from_u32(code_point).ok_or(KanjiError::NotAScalar(code_point))?;

    Kanji::from_char(c)
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::kanji::KANJI_RANGES;

    #[test]
    fn test_encode_known_values() {
        assert_eq!(encode("一").unwrap().as_str(), "04e00");
        assert_eq!(encode("𠀀").unwrap().as_str(), "20000");
        assert_eq!(encode("⺀").unwrap().as_str(), "02e80");
        assert_eq!(encode("龥").unwrap().as_str(), "09fa5");
    }

    #[test]
    fn test_encode_rejects_invalid_input() {
        assert_eq!(encode("a"), Err(KanjiError::OutOfRange('a')));
        assert_eq!(
            encode("一二"),
            Err(KanjiError::NotSingleChar("一二".to_string()))
        );
        assert!(encode("").is_err());
    }

    #[test]
    fn test_decode_known_values() {
        assert_eq!(decode("04e00").unwrap().as_char(), '一');
        assert_eq!(decode("4E00").unwrap().as_char(), '一');
        assert_eq!(decode("00000"), Err(KanjiError::OutOfRange('\0')));
        assert_eq!(decode("0d800"), Err(KanjiError::NotAScalar(0xD800)));
        assert!(matches!(decode("zz"), Err(KanjiError::InvalidHex(_))));
        assert!(matches!(decode("+4e00"), Err(KanjiError::InvalidHex(_))));
        assert!(matches!(decode(""), Err(KanjiError::InvalidHex(_))));
    }

    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl io::Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn warnings_from(f: impl FnOnce()) -> String {
        let buffer = LogBuffer::default();
        let writer = buffer.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();
        tracing::subscriber::with_default(subscriber, f);
        let bytes = buffer.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn test_decode_warns_on_every_rejection() {
        for hex in ["zz", "0d800", "00041"] {
            let logs = warnings_from(|| assert!(decode(hex).is_err()));
            assert!(logs.contains("WARN"), "{hex}: {logs:?}");
        }

        let logs = warnings_from(|| assert!(decode("04e00").is_ok()));
        assert!(logs.is_empty(), "{logs:?}");
    }

    #[test]
    fn test_round_trip_over_all_ranges() {
        for (_, range) in KANJI_RANGES {
            for code_point in range {
                let c = char::from_u32(code_point).unwrap();
                let hex = encode(&c.to_string()).unwrap();
                assert_eq!(hex.as_str().len(), HEX_WIDTH);
                assert_eq!(decode(hex.as_str()).unwrap().as_char(), c);
            }
        }
    }

    #[test]
    fn test_svg_names() {
        let hex = encode("水").unwrap();
        assert_eq!(hex.svg_entry_path(), "kanji/06c34.svg");
        assert_eq!(HexCode::from_svg_file_name("06c34.svg"), Ok(hex));
        assert!(HexCode::from_svg_file_name("06c34-Kaisho.svg").is_err());
        assert!(HexCode::from_svg_file_name("00041.svg").is_err());
    }

    #[test]
    fn test_parse_normalizes_padding() {
        assert_eq!(HexCode::parse("4E00").unwrap().as_str(), "04e00");
    }
}

use std::fs::File;
use std::io::{self, Cursor, Read, Seek};
use std::path::{Path, PathBuf};

use kanjidex_lang_japanese::HexCode;
use kanjidex_store::{SourceError, SvgSource};
use zip::ZipArchive;
use zip::result::ZipError;

fn into_text(entry: String, bytes: Vec<u8>) -> Result<String, SourceError> {
    let text = String::from_utf8(bytes).map_err(|_| SourceError::NotUtf8 { entry })?;
    Ok(text.trim().to_string())
}

/// Stroke files read straight out of a KanjiVG release ZIP
pub struct ZipSvgSource<R> {
    archive: ZipArchive<R>,
}

impl<R: Read + Seek> ZipSvgSource<R> {
    pub fn new(reader: R) -> Result<Self, SourceError> {
        let archive = ZipArchive::new(reader).map_err(|e| SourceError::Archive(e.to_string()))?;
        tracing::debug!("opened archive with {} entries", archive.len());
        Ok(Self { archive })
    }

    pub fn len(&self) -> usize {
        self.archive.len()
    }

    pub fn is_empty(&self) -> bool {
        self.archive.len() == 0
    }
}

impl ZipSvgSource<Cursor<Vec<u8>>> {
    /// Wrap an archive downloaded into memory
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, SourceError> {
        Self::new(Cursor::new(bytes))
    }
}

impl ZipSvgSource<File> {
    pub fn open(path: &Path) -> Result<Self, SourceError> {
        tracing::info!("Opening KanjiVG archive: {}", path.display());
        Self::new(File::open(path)?)
    }
}

impl<R: Read + Seek> SvgSource for ZipSvgSource<R> {
    fn svg(&mut self, hex: &HexCode) -> Result<Option<String>, SourceError> {
        let name = hex.svg_entry_path();
        let mut bytes = Vec::new();
        {
            let mut entry = match self.archive.by_name(&name) {
                Ok(entry) => entry,
                Err(ZipError::FileNotFound) => return Ok(None),
                Err(e) => return Err(SourceError::Archive(e.to_string())),
            };
            entry.read_to_end(&mut bytes)?;
        }
        into_text(name, bytes).map(Some)
    }
}

/// Stroke files from an already extracted release, `<root>/kanji/<hex>.svg`
pub struct DirSvgSource {
    root: PathBuf,
}

impl DirSvgSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl SvgSource for DirSvgSource {
    fn svg(&mut self, hex: &HexCode) -> Result<Option<String>, SourceError> {
        let path = self.root.join(hex.svg_entry_path());
        match std::fs::read(&path) {
            Ok(bytes) => into_text(path.display().to_string(), bytes).map(Some),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(SourceError::Io(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kanjidex_lang_japanese::encode;
    use std::io::Write;
    use zip::write::SimpleFileOptions;

    fn build_zip(entries: &[(&str, &[u8])]) -> Vec<u8> {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        for (name, contents) in entries {
            writer.start_file(*name, SimpleFileOptions::default()).unwrap();
            writer.write_all(contents).unwrap();
        }
        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn test_zip_entry_trimmed() {
        let bytes = build_zip(&[
            ("kanji/04e00.svg", b"\n<svg>ichi</svg>\n\n".as_slice()),
            ("kanji/04e00-Kaisho.svg", b"<svg>kaisho</svg>".as_slice()),
        ]);
        let mut source = ZipSvgSource::from_bytes(bytes).unwrap();
        assert_eq!(source.len(), 2);

        let ichi = encode("一").unwrap();
        assert_eq!(source.svg(&ichi).unwrap(), Some("<svg>ichi</svg>".to_string()));
    }

    #[test]
    fn test_zip_missing_entry() {
        let bytes = build_zip(&[("kanji/04e00.svg", b"<svg/>".as_slice())]);
        let mut source = ZipSvgSource::from_bytes(bytes).unwrap();
        assert_eq!(source.svg(&encode("二").unwrap()).unwrap(), None);
    }

    #[test]
    fn test_zip_entry_not_utf8() {
        let bytes = build_zip(&[("kanji/04e00.svg", [0xff, 0xfe, 0x00].as_slice())]);
        let mut source = ZipSvgSource::from_bytes(bytes).unwrap();
        assert!(matches!(
            source.svg(&encode("一").unwrap()),
            Err(SourceError::NotUtf8 { .. })
        ));
    }

    #[test]
    fn test_not_a_zip() {
        assert!(matches!(
            ZipSvgSource::from_bytes(b"<html>rate limited</html>".to_vec()),
            Err(SourceError::Archive(_))
        ));
    }

    #[test]
    fn test_extracted_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("kanji")).unwrap();
        std::fs::write(dir.path().join("kanji/20000.svg"), "  <svg>ext-b</svg>  ").unwrap();

        let mut source = DirSvgSource::new(dir.path());
        assert_eq!(
            source.svg(&encode("𠀀").unwrap()).unwrap(),
            Some("<svg>ext-b</svg>".to_string())
        );
        assert_eq!(source.svg(&encode("一").unwrap()).unwrap(), None);
    }
}

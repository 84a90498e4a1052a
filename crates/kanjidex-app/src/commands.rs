use std::path::Path;

use anyhow::{Context, Result};
use kanjidex_config::Config;
use kanjidex_ingest::{DirSvgSource, KanjiVgClient, KvgIndex, ZipSvgSource};
use kanjidex_lang_japanese::{HexCode, Kanji, decode};
use kanjidex_store::FileRecordStore;

fn open_store(config: &Config) -> Result<FileRecordStore> {
    FileRecordStore::init_layout(&config.records_dir(), &config.keywords_dir())
        .with_context(|| format!("Failed to prepare dataset at {}", config.data_dir.display()))
}

pub async fn init(config: &Config, index_path: Option<&Path>) -> Result<()> {
    let store = open_store(config)?;

    let index = match index_path {
        Some(path) => KvgIndex::load_from_file(path)?,
        None => {
            let client = KanjiVgClient::new(config.kanjivg.clone())?;
            client
                .fetch_index()
                .await
                .context("Failed to fetch the KanjiVG index")?
        }
    };

    let report = kanjidex_ingest::bootstrap(&store, &index).context("Bootstrap aborted")?;
    println!("{report}");
    Ok(())
}

pub async fn svg(config: &Config, archive_path: Option<&Path>) -> Result<()> {
    let store = open_store(config)?;

    let report = match archive_path {
        Some(path) if path.is_dir() => {
            kanjidex_ingest::enrich(&store, &mut DirSvgSource::new(path))
        }
        Some(path) => kanjidex_ingest::enrich(&store, &mut ZipSvgSource::open(path)?),
        None => {
            let client = KanjiVgClient::new(config.kanjivg.clone())?;
            let release = client
                .latest_release()
                .await
                .context("Failed to look up the latest KanjiVG release")?;
            let bytes = client
                .download_archive(&release)
                .await
                .context("Failed to download the KanjiVG release")?;
            kanjidex_ingest::enrich(&store, &mut ZipSvgSource::from_bytes(bytes)?)
        }
    }
    .context("SVG merge aborted")?;

    println!("{report}");
    Ok(())
}

pub fn check(text: &str) {
    match Kanji::new(text) {
        Ok(kanji) => println!(
            "{kanji}\tU+{:04X}\t{}\t{}",
            kanji.code_point(),
            HexCode::from_kanji(kanji),
            kanji.block().as_str()
        ),
        Err(e) => println!("{e}"),
    }
}

pub fn decode_hex(hex: &str) {
    match decode(hex) {
        Ok(kanji) => println!("{kanji}"),
        Err(e) => println!("{e}"),
    }
}

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "kanjidex", about = "Build a local kanji dataset from KanjiVG", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Show per-record progress
    #[arg(long, short = 'v', global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only report errors
    #[arg(long, short = 'q', global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Path to a JSON config file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Dataset root, overrides the config file and KANJIDEX_DATA_DIR
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create an empty record for every kanji in the KanjiVG index
    Init {
        /// Read the index from a local kvg-index.json instead of downloading it
        #[arg(long)]
        index: Option<PathBuf>,
    },

    /// Fill in stroke-order SVG data from the latest KanjiVG release
    Svg {
        /// Use a local release ZIP or extracted release directory
        #[arg(long)]
        archive: Option<PathBuf>,
    },

    /// Check whether text is a single kanji and show its hex code
    Check {
        text: String,
    },

    /// Convert a hex code back into its kanji
    Decode {
        hex: String,
    },
}

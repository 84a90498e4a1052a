mod archive;
mod client;
mod driver;
mod index;

pub use archive::{DirSvgSource, ZipSvgSource};
pub use client::{FetchError, KanjiVgClient, Release, ReleaseAsset};
pub use driver::{BootstrapReport, EnrichReport, bootstrap, enrich};
pub use index::{IndexSource, KvgIndex};

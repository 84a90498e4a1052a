pub mod error;
pub mod merge;
pub mod slot;
pub mod store;

pub use error::{SourceError, StoreError};
pub use merge::{MergeOutcome, SvgSource, enrich_svg, stored_hex_code};
pub use store::{CreateOutcome, FileRecordStore, RecordStore};

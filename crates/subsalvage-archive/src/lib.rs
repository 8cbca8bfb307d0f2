//! Archive parsing and subtitle entry selection.
//!
//! # Architecture
//!
//! - `format.rs` - Format detection and decompression
//! - `extract/` - Per-format entry sources
//! - `entry.rs` - Owned archive entries
//! - `select.rs` - Subtitle entry priority

pub use entry::{ArchiveEntry, extension_of};
pub use error::{Error, Result};
pub use extract::{EntrySource, read_entries};
pub use format::{ArchiveFormat, TarCompress, detect_format};
pub use select::{
    SUBTITLE_EXTENSIONS, TEXT_EXTENSIONS, extract_subtitle_entry, select_entry, select_index,
};

pub mod entry;
pub mod extract;
pub mod format;
pub mod select;
mod error;

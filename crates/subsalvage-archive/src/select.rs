//! Picks the one archive entry most likely to be the subtitle.

use tracing::debug;

use crate::entry::ArchiveEntry;
use crate::error::{Error, Result};

/// Extensions of subtitle formats that are always plain text.
pub const TEXT_EXTENSIONS: [&str; 4] = ["srt", "ssa", "ass", "vtt"];

/// Every recognized subtitle extension, including binary-capable ones.
pub const SUBTITLE_EXTENSIONS: [&str; 7] = ["srt", "ssa", "ass", "vtt", "sub", "idx", "txt"];

/// Index of the preferred entry, or `None` when `entries` is empty.
///
/// Priority: first text-native subtitle, then first subtitle of any kind,
/// then simply the first entry.
pub fn select_index(entries: &[ArchiveEntry]) -> Option<usize> {
    if entries.is_empty() {
        return None;
    }

    let has_any = |entry: &ArchiveEntry, exts: &[&str]| {
        entry
            .extension()
            .is_some_and(|ext| exts.contains(&ext.as_str()))
    };

    entries
        .iter()
        .position(|e| has_any(e, &TEXT_EXTENSIONS))
        .or_else(|| entries.iter().position(|e| has_any(e, &SUBTITLE_EXTENSIONS)))
        .or(Some(0))
}

/// Consume the parsed entries and keep only the selected one.
pub fn select_entry(mut entries: Vec<ArchiveEntry>) -> Result<ArchiveEntry> {
    let index = select_index(&entries).ok_or(Error::EmptyArchive)?;
    let entry = entries.swap_remove(index);
    debug!(name = %entry.name, len = entry.len(), "selected archive entry");
    Ok(entry)
}

/// Parse `data` and return its subtitle entry.
pub fn extract_subtitle_entry(data: &[u8]) -> Result<ArchiveEntry> {
    select_entry(crate::extract::read_entries(data)?)
}

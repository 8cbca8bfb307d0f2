//! Archive parsing for ZIP, TAR and compressed single-file payloads.
//!
//! Everything happens in memory: the payload is borrowed, entries are copied
//! out as owned [`ArchiveEntry`] values and the archive itself is dropped.

use tracing::{debug, warn};

use crate::entry::ArchiveEntry;
use crate::error::{Error, Result};
use crate::format::{self, ArchiveFormat, TarCompress};

#[cfg(feature = "tar")]
mod tar;
#[cfg(feature = "zip")]
mod zip;

#[cfg(feature = "tar")]
pub use tar::TarSource;
#[cfg(feature = "zip")]
pub use zip::ZipSource;

/// Name given to a compressed single file that carries no name of its own.
pub const UNNAMED_ENTRY: &str = "subtitle";

/// Archive-specific entry source.
///
/// Yields regular files only; directories are skipped by the source.
pub trait EntrySource {
    fn entries(&mut self) -> Result<Box<dyn Iterator<Item = Result<ArchiveEntry>> + '_>>;
    fn format(&self) -> ArchiveFormat;
}

/// Parse `data` into every file entry it contains, in archive order.
///
/// Unreadable individual entries are skipped with a warning so that one bad
/// member does not hide the rest of the archive.
pub fn read_entries(data: &[u8]) -> Result<Vec<ArchiveEntry>> {
    let format = format::detect_format(data).ok_or(Error::UnsupportedFormat)?;
    debug!(?format, len = data.len(), "parsing archive");

    let entries = match format {
        ArchiveFormat::Zip => read_zip(data)?,
        ArchiveFormat::Tar(codec) => read_tar(data, codec)?,
    };

    Ok(entries)
}

#[cfg(feature = "zip")]
fn read_zip(data: &[u8]) -> Result<Vec<ArchiveEntry>> {
    collect(&mut ZipSource::new(data)?)
}

#[cfg(not(feature = "zip"))]
fn read_zip(_data: &[u8]) -> Result<Vec<ArchiveEntry>> {
    Err(Error::UnsupportedFormat)
}

fn read_tar(data: &[u8], codec: TarCompress) -> Result<Vec<ArchiveEntry>> {
    let decompressed = codec.decompress(data)?;

    if format::is_tar_header(&decompressed.bytes) {
        return read_tar_stream(decompressed.bytes);
    }

    // A bare compressed file (`movie.srt.gz`) rather than a tarball.
    let name = decompressed
        .original_name
        .unwrap_or_else(|| UNNAMED_ENTRY.to_string());
    debug!(%name, ?codec, "compressed payload is a single file");
    Ok(vec![ArchiveEntry::new(name, decompressed.bytes)])
}

#[cfg(feature = "tar")]
fn read_tar_stream(bytes: Vec<u8>) -> Result<Vec<ArchiveEntry>> {
    collect(&mut TarSource::new(bytes))
}

#[cfg(not(feature = "tar"))]
fn read_tar_stream(_bytes: Vec<u8>) -> Result<Vec<ArchiveEntry>> {
    Err(Error::UnsupportedFormat)
}

fn collect<S: EntrySource>(source: &mut S) -> Result<Vec<ArchiveEntry>> {
    let format = source.format();
    let mut entries = Vec::new();

    for entry in source.entries()? {
        match entry {
            Ok(entry) if entry.is_metadata() => {
                debug!(name = %entry.name, "skipping archiver metadata entry");
            }
            Ok(entry) => entries.push(entry),
            Err(Error::EntryReadFailed { name, source }) => {
                warn!(?format, %name, error = %source, "skipping unreadable entry");
            }
            Err(e) => return Err(e),
        }
    }

    Ok(entries)
}

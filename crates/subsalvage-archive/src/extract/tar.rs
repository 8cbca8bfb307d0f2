use std::io::{Cursor, Read};

use crate::entry::ArchiveEntry;
use crate::error::{Error, Result};
use crate::extract::EntrySource;
use crate::format::{ArchiveFormat, TarCompress};

/// Tar stream that has already been decompressed into memory.
pub struct TarSource {
    archive: ::tar::Archive<Cursor<Vec<u8>>>,
}

impl TarSource {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self {
            archive: ::tar::Archive::new(Cursor::new(bytes)),
        }
    }
}

impl EntrySource for TarSource {
    fn entries(&mut self) -> Result<Box<dyn Iterator<Item = Result<ArchiveEntry>> + '_>> {
        let entries = self.archive.entries().map_err(|_| Error::Corrupted)?;

        let iter = entries.filter_map(|entry| {
            let mut entry = match entry {
                Ok(e) => e,
                Err(_) => return Some(Err(Error::Corrupted)),
            };
            if !entry.header().entry_type().is_file() {
                return None;
            }

            let name = match entry.path() {
                Ok(p) => p.to_string_lossy().replace('\\', "/"),
                Err(_) => return Some(Err(Error::Corrupted)),
            };
            let mut bytes = Vec::new();
            if let Err(source) = entry.read_to_end(&mut bytes) {
                return Some(Err(Error::EntryReadFailed { name, source }));
            }

            Some(Ok(ArchiveEntry::new(name, bytes)))
        });

        Ok(Box::new(iter))
    }

    fn format(&self) -> ArchiveFormat {
        ArchiveFormat::Tar(TarCompress::None)
    }
}

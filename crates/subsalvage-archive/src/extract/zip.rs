use std::io::{self, Cursor, Read};

use crate::entry::ArchiveEntry;
use crate::error::{Error, Result};
use crate::extract::EntrySource;
use crate::format::ArchiveFormat;

pub struct ZipSource<'a> {
    archive: ::zip::ZipArchive<Cursor<&'a [u8]>>,
}

impl<'a> ZipSource<'a> {
    pub fn new(data: &'a [u8]) -> Result<Self> {
        let archive = ::zip::ZipArchive::new(Cursor::new(data)).map_err(|_| Error::Corrupted)?;
        Ok(Self { archive })
    }

    pub fn len(&self) -> usize {
        self.archive.len()
    }

    pub fn is_empty(&self) -> bool {
        self.archive.len() == 0
    }
}

impl EntrySource for ZipSource<'_> {
    fn entries(&mut self) -> Result<Box<dyn Iterator<Item = Result<ArchiveEntry>> + '_>> {
        let archive = &mut self.archive;
        let count = archive.len();

        let iter = (0..count).filter_map(move |index| {
            // Per-member failures (encryption, unsupported method) skip only that member.
            let name = archive
                .name_for_index(index)
                .map_or_else(|| format!("#{index}"), str::to_string);
            let mut file = match archive.by_index(index) {
                Ok(f) => f,
                Err(e) => {
                    let source = io::Error::other(e);
                    return Some(Err(Error::EntryReadFailed { name, source }));
                }
            };
            if file.is_dir() {
                return None;
            }

            let mut bytes = Vec::with_capacity(file.size().min(1 << 24) as usize);
            if let Err(source) = file.read_to_end(&mut bytes) {
                return Some(Err(Error::EntryReadFailed { name, source }));
            }

            Some(Ok(ArchiveEntry::new(name, bytes)))
        });

        Ok(Box::new(iter))
    }

    fn format(&self) -> ArchiveFormat {
        ArchiveFormat::Zip
    }
}

use std::io;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("unsupported archive format")]
    UnsupportedFormat,

    #[error("archive is corrupted")]
    Corrupted,

    #[error("archive is empty")]
    EmptyArchive,

    #[error("failed to read entry '{name}': {source}")]
    EntryReadFailed { name: String, source: io::Error },

    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

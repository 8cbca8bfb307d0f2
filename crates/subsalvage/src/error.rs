use subsalvage_text::DecodeError;

use crate::result::ExtractionResult;

#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("archive is empty")]
    EmptyArchive,

    #[error("failed to read archive: {0}")]
    Archive(#[source] subsalvage_archive::Error),

    #[error("no candidate encoding produced readable text")]
    NoCandidateEncoding,

    #[error("unable to recover subtitle text from {filename}")]
    UnrecoverablePayload { filename: String, details: String },

    #[error("malformed MicroDVD input: {0}")]
    MalformedConversionInput(String),
}

impl ExtractError {
    /// Structured failure for callers; never loses the diagnostic dump.
    pub fn into_result(self, filename: Option<String>) -> ExtractionResult {
        let error = self.to_string();
        let (filename, details) = match self {
            Self::UnrecoverablePayload { filename, details } => (Some(filename), Some(details)),
            _ => (filename, None),
        };
        ExtractionResult::Failure {
            error,
            filename,
            details,
        }
    }
}

impl From<subsalvage_archive::Error> for ExtractError {
    fn from(e: subsalvage_archive::Error) -> Self {
        match e {
            subsalvage_archive::Error::EmptyArchive => Self::EmptyArchive,
            other => Self::Archive(other),
        }
    }
}

impl From<DecodeError> for ExtractError {
    fn from(e: DecodeError) -> Self {
        match e {
            DecodeError::NoCandidateEncoding => Self::NoCandidateEncoding,
        }
    }
}

pub type Result<T> = std::result::Result<T, ExtractError>;

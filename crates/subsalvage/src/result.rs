use serde::Serialize;

/// The engine's only output. Exactly one variant is produced per call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ExtractionResult {
    /// Decoded text; `content` is never empty.
    Success {
        content: String,
        filename: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        encoding: Option<String>,
    },
    /// Opaque binary subtitle container passed through undecoded.
    SuccessBinary {
        filename: String,
        #[serde(serialize_with = "hex::serde::serialize")]
        buffer: Vec<u8>,
    },
    Failure {
        error: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        filename: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        details: Option<String>,
    },
}

impl ExtractionResult {
    pub fn is_success(&self) -> bool {
        !matches!(self, Self::Failure { .. })
    }

    pub fn is_binary(&self) -> bool {
        matches!(self, Self::SuccessBinary { .. })
    }

    pub fn content(&self) -> Option<&str> {
        match self {
            Self::Success { content, .. } => Some(content),
            _ => None,
        }
    }

    pub fn buffer(&self) -> Option<&[u8]> {
        match self {
            Self::SuccessBinary { buffer, .. } => Some(buffer),
            _ => None,
        }
    }

    pub fn filename(&self) -> Option<&str> {
        match self {
            Self::Success { filename, .. } | Self::SuccessBinary { filename, .. } => Some(filename),
            Self::Failure { filename, .. } => filename.as_deref(),
        }
    }

    pub fn encoding(&self) -> Option<&str> {
        match self {
            Self::Success { encoding, .. } => encoding.as_deref(),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failure { error, .. } => Some(error),
            _ => None,
        }
    }

    pub fn details(&self) -> Option<&str> {
        match self {
            Self::Failure { details, .. } => details.as_deref(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors() {
        let ok = ExtractionResult::Success {
            content: "1\n".into(),
            filename: "a.srt".into(),
            encoding: Some("utf-8".into()),
        };
        assert!(ok.is_success());
        assert!(!ok.is_binary());
        assert_eq!(ok.content(), Some("1\n"));
        assert_eq!(ok.filename(), Some("a.srt"));
        assert_eq!(ok.encoding(), Some("utf-8"));
        assert_eq!(ok.error(), None);

        let bin = ExtractionResult::SuccessBinary {
            filename: "a.sub".into(),
            buffer: vec![0, 1],
        };
        assert!(bin.is_success());
        assert!(bin.is_binary());
        assert_eq!(bin.buffer(), Some(&[0u8, 1][..]));
        assert_eq!(bin.content(), None);

        let fail = ExtractionResult::Failure {
            error: "archive is empty".into(),
            filename: None,
            details: None,
        };
        assert!(!fail.is_success());
        assert_eq!(fail.filename(), None);
        assert_eq!(fail.error(), Some("archive is empty"));
    }

    #[test]
    fn serializes_with_status_tag() {
        let bin = ExtractionResult::SuccessBinary {
            filename: "a.sub".into(),
            buffer: vec![0x00, 0xBA],
        };
        let json = serde_json::to_value(&bin).unwrap();
        assert_eq!(json["status"], "success_binary");
        assert_eq!(json["buffer"], "00ba");

        let ok = ExtractionResult::Success {
            content: "x".into(),
            filename: "a.srt".into(),
            encoding: None,
        };
        let json = serde_json::to_value(&ok).unwrap();
        assert_eq!(json["status"], "success");
        assert!(json.get("encoding").is_none());
    }
}

use once_cell::sync::Lazy;
use regex::Regex;
use subsalvage_archive::extension_of;
use tracing::debug;

/// Extensions that may hold a bitmap (VobSub) container instead of text.
pub const BINARY_CAPABLE_EXTENSIONS: [&str; 2] = ["sub", "idx"];

/// Bytes inspected when deciding between MicroDVD and VobSub.
pub const SAMPLE_LEN: usize = 100;

static FRAME_TIMING: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\{\d+\}\{\d+\}").unwrap());

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Classification {
    /// Passed through untouched.
    Binary,
    Text,
}

pub fn classify(filename: &str, bytes: &[u8]) -> Classification {
    let binary_capable = extension_of(filename)
        .is_some_and(|ext| BINARY_CAPABLE_EXTENSIONS.contains(&ext.as_str()));
    if !binary_capable {
        return Classification::Text;
    }

    let sample = latin1_sample(bytes);
    let class = if FRAME_TIMING.is_match(&sample) {
        Classification::Text
    } else {
        Classification::Binary
    };
    debug!(filename, ?class, "classified binary-capable payload");
    class
}

/// First [`SAMPLE_LEN`] bytes, one char per byte, with a UTF-8 BOM skipped.
fn latin1_sample(bytes: &[u8]) -> String {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    bytes[..bytes.len().min(SAMPLE_LEN)]
        .iter()
        .map(|&b| char::from(b))
        .collect()
}

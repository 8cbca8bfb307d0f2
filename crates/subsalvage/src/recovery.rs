//! Last-resort text recovery once the encoding trial has given up.
//!
//! Stages run in order and the first acceptable candidate wins:
//!
//! 1. Reinterpret the bytes as Latin-1 and pull out well-formed cues
//!    (MicroDVD lines for `.sub`, numbered SRT blocks for `.srt`).
//! 2. Keep printable runs that contain actual words.
//! 3. Force a lenient UTF-8 decode.
//!
//! A candidate is accepted only when it sanitizes to something non-blank and
//! not garbled. When every stage fails the caller gets a hex dump.

use once_cell::sync::Lazy;
use regex::Regex;
use subsalvage_archive::extension_of;
use subsalvage_text::{is_blank, is_garbled, sanitize};
use tracing::{debug, warn};

use crate::error::{ExtractError, Result};
use crate::hexdump::hex_dump;
use crate::microdvd;
use crate::options::ExtractOptions;

pub const LATIN1_LABEL: &str = "latin1";
pub const UTF8_LABEL: &str = "utf-8";

/// Minimum length of a printable run kept by stage 2.
pub const MIN_PRINTABLE_RUN: usize = 10;

static MICRODVD_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{\d+\}\{\d+\}[^\r\n]*").unwrap());

static SRT_BLOCK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        concat!(
            r"\b\d+[ \t]*\r?\n",
            r"\d{1,2}:\d{2}:\d{2}[,.]\d{3}[ \t]*-->[ \t]*\d{1,2}:\d{2}:\d{2}[,.]\d{3}[^\r\n]*",
            r"(?:\r?\n[^\r\n]*\S[^\r\n]*)*",
        ),
    )
    .unwrap()
});

static PRINTABLE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\x20-\x7E\x{A0}-\x{FF}\t]{10,}").unwrap());

static WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\p{L}{3}").unwrap());

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    Structured,
    PrintableRuns,
    ForcedUtf8,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Recovered {
    pub text: String,
    pub filename: String,
    pub encoding: &'static str,
    pub stage: Stage,
}

/// Run the fallback stages over `bytes`.
///
/// Fails with [`ExtractError::UnrecoverablePayload`] carrying a hex dump of
/// the first [`ExtractOptions::hexdump_limit`] bytes.
pub fn recover(bytes: &[u8], filename: &str, options: &ExtractOptions) -> Result<Recovered> {
    let raw = latin1(bytes);

    if let Some(recovered) = structured(&raw, filename, options) {
        return Ok(recovered);
    }

    if let Some(text) = accept(&printable_runs(&raw)) {
        debug!(filename, "recovered printable runs");
        return Ok(Recovered {
            text,
            filename: filename.to_string(),
            encoding: LATIN1_LABEL,
            stage: Stage::PrintableRuns,
        });
    }

    if let Some(text) = accept(&String::from_utf8_lossy(bytes)) {
        debug!(filename, "recovered by forced utf-8 decode");
        return Ok(Recovered {
            text,
            filename: filename.to_string(),
            encoding: UTF8_LABEL,
            stage: Stage::ForcedUtf8,
        });
    }

    warn!(filename, len = bytes.len(), "payload is unrecoverable");
    Err(ExtractError::UnrecoverablePayload {
        filename: filename.to_string(),
        details: hex_dump(bytes, options.hexdump_limit),
    })
}

/// Each byte as the code point of the same value.
fn latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

fn accept(candidate: &str) -> Option<String> {
    let text = sanitize(candidate);
    (!is_blank(&text) && !is_garbled(&text)).then_some(text)
}

fn structured(raw: &str, filename: &str, options: &ExtractOptions) -> Option<Recovered> {
    let (candidate, filename) = match extension_of(filename).as_deref() {
        Some("sub") => {
            let cues = join_matches(&MICRODVD_LINE, raw, "\n");
            if cues.is_empty() {
                return None;
            }
            if !options.convert_microdvd {
                (cues, filename.to_string())
            } else {
                match microdvd::convert_or_original(&cues, options.frame_rate) {
                    (srt, true) => (srt, microdvd::srt_filename(filename)),
                    (cues, false) => (cues, filename.to_string()),
                }
            }
        }
        Some("srt") => (join_matches(&SRT_BLOCK, raw, "\n\n"), filename.to_string()),
        _ => return None,
    };

    let text = accept(&candidate)?;
    debug!(%filename, "recovered structured cues");
    Some(Recovered {
        text,
        filename,
        encoding: LATIN1_LABEL,
        stage: Stage::Structured,
    })
}

fn printable_runs(raw: &str) -> String {
    PRINTABLE_RUN
        .find_iter(raw)
        .map(|m| m.as_str().trim())
        .filter(|run| run.chars().count() >= MIN_PRINTABLE_RUN && WORD.is_match(run))
        .collect::<Vec<_>>()
        .join("\n")
}

fn join_matches(re: &Regex, haystack: &str, sep: &str) -> String {
    re.find_iter(haystack)
        .map(|m| m.as_str().trim())
        .collect::<Vec<_>>()
        .join(sep)
}

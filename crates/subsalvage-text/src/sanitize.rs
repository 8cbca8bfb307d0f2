//! Normalization applied to every decoded text before it is returned.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::garbled::{BOM, REPLACEMENT_CHAR};

static CR_BEFORE_LF: Lazy<Regex> = Lazy::new(|| Regex::new(r"\r+\n").unwrap());
static BLANK_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").unwrap());

/// Leading junk: replacement characters, BOMs, and C0 controls other than
/// tab, line feed and carriage return.
fn is_leading_junk(c: char) -> bool {
    match c {
        REPLACEMENT_CHAR | BOM => true,
        '\t' | '\n' | '\r' => false,
        c => c < ' ',
    }
}

/// Strip the BOM and leading junk, normalize line endings to `\n` and
/// collapse runs of blank lines. Idempotent.
pub fn sanitize(text: &str) -> String {
    let text = text.strip_prefix(BOM).unwrap_or(text);
    let text = text.trim_start_matches(is_leading_junk);
    let text = CR_BEFORE_LF.replace_all(text, "\n");
    BLANK_RUN.replace_all(&text, "\n\n").into_owned()
}

/// True when `text` has nothing but whitespace.
pub fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

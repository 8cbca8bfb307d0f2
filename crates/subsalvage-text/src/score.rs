//! Readability scoring for candidate decodes.
//!
//! The weights are empirically tuned. Only the relative order of scores
//! matters.

use encoding_rs::Encoding;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::garbled::is_garbled;

pub const WEIGHT_DIGITS: i32 = 1;
pub const WEIGHT_LETTERS: i32 = 3;
pub const WEIGHT_PUNCTUATION: i32 = 1;
pub const WEIGHT_READABLE_LINE: i32 = 2;
pub const WEIGHT_SRT_TIMESTAMP: i32 = 3;
pub const WEIGHT_SEQUENCE_NUMBER: i32 = 2;

pub const CLEAN_BONUS: i32 = 5;
pub const GARBLED_PENALTY: i32 = -5;
pub const ARABIC_CODE_PAGE_BONUS: i32 = 5;

pub const READABLE_LINE_MIN: usize = 5;
pub const READABLE_LINE_MAX: usize = 100;

/// Code pages that get [`ARABIC_CODE_PAGE_BONUS`] on Arabic text.
pub fn is_arabic_code_page(encoding: &Encoding) -> bool {
    encoding == encoding_rs::WINDOWS_1256 || encoding == encoding_rs::ISO_8859_6
}

static SRT_TIMESTAMP: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\d{2}:\d{2}:\d{2}[,.]\d{3}\s*-->\s*\d{2}:\d{2}:\d{2}[,.]\d{3}").unwrap()
});

static ARABIC_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\x{0600}-\x{06FF}]{3,}").unwrap());

fn is_arabic(c: char) -> bool {
    ('\u{0600}'..='\u{06FF}').contains(&c)
}

fn is_punctuation(c: char) -> bool {
    matches!(
        c,
        '.' | ',' | '!' | '?' | ';' | ':' | '\'' | '"' | '-' | '(' | ')' | '،' | '؛' | '؟'
    )
}

fn has_readable_line(text: &str) -> bool {
    text.lines().any(|line| {
        let len = line.chars().count();
        (READABLE_LINE_MIN..=READABLE_LINE_MAX).contains(&len)
    })
}

fn has_leading_sequence_number(text: &str) -> bool {
    text.trim_start_matches(|c: char| c == '\u{FEFF}' || c.is_whitespace())
        .lines()
        .next()
        .map(str::trim)
        .is_some_and(|line| !line.is_empty() && line.chars().all(|c| c.is_ascii_digit()))
}

pub fn has_arabic_run(text: &str) -> bool {
    ARABIC_RUN.is_match(text)
}

/// Subtitle-likeness of `text`, before the garbled adjustment.
pub fn readability(text: &str) -> i32 {
    let mut score = 0;

    if text.chars().any(|c| c.is_ascii_digit()) {
        score += WEIGHT_DIGITS;
    }
    if text.chars().any(|c| c.is_ascii_alphabetic() || is_arabic(c)) {
        score += WEIGHT_LETTERS;
    }
    if text.chars().any(is_punctuation) {
        score += WEIGHT_PUNCTUATION;
    }
    if has_readable_line(text) {
        score += WEIGHT_READABLE_LINE;
    }
    if SRT_TIMESTAMP.is_match(text) {
        score += WEIGHT_SRT_TIMESTAMP;
    }
    if has_leading_sequence_number(text) {
        score += WEIGHT_SEQUENCE_NUMBER;
    }

    score
}

/// Full quality score of `text` decoded with `encoding`.
///
/// Returns the score together with the garbled verdict it was built from.
pub fn quality(text: &str, encoding: &'static Encoding) -> (i32, bool) {
    let garbled = is_garbled(text);
    let mut score = readability(text) + if garbled { GARBLED_PENALTY } else { CLEAN_BONUS };

    if is_arabic_code_page(encoding) && has_arabic_run(text) {
        score += ARABIC_CODE_PAGE_BONUS;
    }

    (score, garbled)
}

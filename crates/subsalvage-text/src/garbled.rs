//! Mojibake / corruption heuristic.

use once_cell::sync::Lazy;
use regex::Regex;

pub const REPLACEMENT_CHAR: char = '\u{FFFD}';
pub const BOM: char = '\u{FEFF}';

/// Garbled-marker density above which text is considered corrupted.
pub const GARBLED_RATIO_THRESHOLD: f64 = 0.01;

static DOUBLED_REPLACEMENT: Lazy<Regex> = Lazy::new(|| Regex::new("\u{FFFD}{2}").unwrap());

static REPLACEMENT_NEXT_TO_LETTER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\x{FFFD}\p{L}|\p{L}\x{FFFD}").unwrap());

// UTF-8 BOM read as Latin-1
static BOM_LEFTOVER: Lazy<Regex> = Lazy::new(|| Regex::new("\u{EF}\u{BB}\u{BF}").unwrap());

// UTF-8 two-byte sequences read as Latin-1 / windows-1252
static LATIN1_MOJIBAKE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\x{C3}[\x{80}-\x{BF}]").unwrap());
static PUNCT_MOJIBAKE: Lazy<Regex> = Lazy::new(|| Regex::new("\u{E2}\u{20AC}").unwrap());

/// Number of corruption markers found in `text`.
pub fn garbled_count(text: &str) -> usize {
    let replacements = text.chars().filter(|&c| c == REPLACEMENT_CHAR).count();
    // a BOM anywhere but the first position is a leftover
    let stray_boms = text.chars().skip(1).filter(|&c| c == BOM).count();

    let patterns = [
        &*DOUBLED_REPLACEMENT,
        &*REPLACEMENT_NEXT_TO_LETTER,
        &*BOM_LEFTOVER,
        &*LATIN1_MOJIBAKE,
        &*PUNCT_MOJIBAKE,
    ];
    let signatures: usize = patterns.iter().map(|re| re.find_iter(text).count()).sum();

    replacements + stray_boms + signatures
}

/// True when `text` looks corrupted. Empty text is always garbled.
pub fn is_garbled(text: &str) -> bool {
    let len = text.chars().count();
    if len == 0 {
        return true;
    }
    garbled_count(text) as f64 / len as f64 > GARBLED_RATIO_THRESHOLD
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_is_garbled() {
        assert!(is_garbled(""));
    }

    #[test]
    fn hundred_letters_is_clean() {
        assert!(!is_garbled(&"a".repeat(100)));
    }

    #[test]
    fn hundred_replacements_is_garbled() {
        assert!(is_garbled(&REPLACEMENT_CHAR.to_string().repeat(100)));
    }

    #[test]
    fn one_replacement_in_hundred_is_at_threshold() {
        // 99 letters + 1 U+FFFD at the end: the replacement and its letter
        // neighbour give 2 markers over 100 chars.
        let text = format!("{}{}", "a".repeat(99), REPLACEMENT_CHAR);
        assert_eq!(garbled_count(&text), 2);
        assert!(is_garbled(&text));

        // a lone replacement surrounded by spaces in a long text stays under
        let text = format!("{} {} {}", "a".repeat(100), REPLACEMENT_CHAR, "b".repeat(100));
        assert_eq!(garbled_count(&text), 1);
        assert!(!is_garbled(&text));
    }

    #[test]
    fn utf8_read_as_latin1_is_garbled() {
        // "café déjà vu" encoded UTF-8 and decoded windows-1252
        assert!(is_garbled("cafÃ© dÃ©jÃ  vu"));
    }

    #[test]
    fn smart_quote_mojibake_is_garbled() {
        assert!(is_garbled("Itâ€™s fine"));
    }

    #[test]
    fn bom_leftover_is_garbled() {
        assert!(is_garbled("ï»¿Hello"));
        assert_eq!(garbled_count("\u{FEFF}Hello"), 0);
        assert_eq!(garbled_count("Hel\u{FEFF}lo"), 1);
    }

    #[test]
    fn legitimate_accents_are_clean() {
        assert!(!is_garbled("Ça va? Très bien, merci. Ünïcödé ñ"));
    }

    #[test]
    fn arabic_is_clean() {
        assert!(!is_garbled("مرحبا بالعالم"));
    }
}

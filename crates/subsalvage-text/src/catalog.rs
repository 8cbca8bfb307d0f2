//! Candidate legacy encodings tried when a payload is not valid UTF-8.

use encoding_rs::Encoding;

/// Trial order. Earlier entries win exact score ties (except against UTF-8),
/// but every candidate is always tried.
pub const ENCODING_CATALOG: [&str; 40] = [
    "utf-8",
    "windows-1256",
    "iso-8859-6",
    "windows-1252",
    "iso-8859-1",
    "iso-8859-15",
    "windows-1250",
    "iso-8859-2",
    "windows-1251",
    "koi8-r",
    "koi8-u",
    "iso-8859-5",
    "ibm866",
    "x-mac-cyrillic",
    "windows-1253",
    "iso-8859-7",
    "windows-1254",
    "iso-8859-9",
    "windows-1255",
    "iso-8859-8",
    "windows-1257",
    "iso-8859-13",
    "iso-8859-4",
    "windows-1258",
    "windows-874",
    "tis-620",
    "iso-8859-3",
    "iso-8859-10",
    "iso-8859-14",
    "iso-8859-16",
    "macintosh",
    "gbk",
    "gb18030",
    "big5",
    "shift_jis",
    "euc-jp",
    "iso-2022-jp",
    "euc-kr",
    "utf-16le",
    "utf-16be",
];

/// Resolve a label to an encoding. Unknown labels yield `None`.
pub fn resolve(label: &str) -> Option<&'static Encoding> {
    Encoding::for_label(label.trim().as_bytes())
}

pub fn is_utf8_label(label: &str) -> bool {
    resolve(label) == Some(encoding_rs::UTF_8)
}

/// Candidate labels: the caller's preference first, then the catalog, with
/// case-insensitive duplicates removed.
pub fn candidates(preferred: Option<&str>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(ENCODING_CATALOG.len() + 1);

    let preferred = preferred
        .map(|p| p.trim().to_ascii_lowercase())
        .filter(|p| !p.is_empty());

    for label in preferred
        .into_iter()
        .chain(ENCODING_CATALOG.iter().map(|l| l.to_string()))
    {
        if !out.iter().any(|seen| seen.eq_ignore_ascii_case(&label)) {
            out.push(label);
        }
    }

    out
}

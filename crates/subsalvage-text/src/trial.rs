//! Decode bytes of unknown encoding: strict UTF-8 first, then a scored trial
//! over the encoding catalog.

use encoding_rs::Encoding;
use tracing::{debug, trace};

use crate::catalog::{self, is_utf8_label};
use crate::error::DecodeError;
use crate::garbled::is_garbled;
use crate::sanitize::{is_blank, sanitize};
use crate::score::quality;

/// One candidate decode inside the trial loop.
#[derive(Clone, Debug)]
pub struct DecodeAttempt {
    pub encoding: String,
    pub text: String,
    pub quality: i32,
    pub is_garbled: bool,
}

/// A successful decode: sanitized text plus the label it was decoded with.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Decoded {
    pub text: String,
    pub encoding: String,
}

/// Strict UTF-8. Fails on any invalid sequence.
pub fn decode_strict_utf8(bytes: &[u8]) -> Option<&str> {
    std::str::from_utf8(bytes).ok()
}

/// Lenient decode with replacement characters. `None` only for unknown labels.
pub fn decode_lenient(bytes: &[u8], label: &str) -> Option<String> {
    let encoding = catalog::resolve(label)?;
    Some(decode_with(bytes, encoding))
}

fn decode_with(bytes: &[u8], encoding: &'static Encoding) -> String {
    let (text, _had_errors) = encoding.decode_without_bom_handling(bytes);
    text.into_owned()
}

/// UTF-16 payloads announce themselves with a BOM; honour it before trying
/// single-byte code pages, which would happily decode them as NUL-riddled text.
fn decode_utf16_bom(bytes: &[u8]) -> Option<Decoded> {
    let (encoding, bom_len) = Encoding::for_bom(bytes)?;
    if encoding == encoding_rs::UTF_8 {
        return None;
    }
    let text = sanitize(&decode_with(&bytes[bom_len..], encoding));
    if is_blank(&text) || is_garbled(&text) {
        trace!(encoding = encoding.name(), "byte-order mark decode rejected");
        return None;
    }
    Some(Decoded {
        text,
        encoding: encoding.name().to_ascii_lowercase(),
    })
}

/// Score every candidate and return the best attempt, garbled or not.
///
/// Ties go to the earlier candidate, except that a UTF-8 candidate always
/// wins an exact tie.
pub fn best_attempt(bytes: &[u8], preferred: Option<&str>) -> Option<DecodeAttempt> {
    let mut best: Option<DecodeAttempt> = None;

    for label in catalog::candidates(preferred) {
        let Some(encoding) = catalog::resolve(&label) else {
            trace!(%label, "unknown encoding label, skipping");
            continue;
        };

        let text = decode_with(bytes, encoding);
        if is_blank(&text) {
            continue;
        }

        let (quality, is_garbled) = quality(&text, encoding);
        trace!(%label, quality, is_garbled, "scored candidate");

        let replace = match &best {
            None => true,
            Some(current) => {
                quality > current.quality
                    || (quality == current.quality
                        && encoding == encoding_rs::UTF_8
                        && !is_utf8_label(&current.encoding))
            }
        };

        if replace {
            best = Some(DecodeAttempt {
                encoding: label,
                text,
                quality,
                is_garbled,
            });
        }
    }

    best
}

/// Decode `bytes` into subtitle text.
///
/// Runs the strict UTF-8 fast path (when no preference or a UTF-8 preference
/// is given), then the scored trial loop. Fails with
/// [`DecodeError::NoCandidateEncoding`] when nothing readable comes out.
pub fn decode(bytes: &[u8], preferred: Option<&str>) -> Result<Decoded, DecodeError> {
    let utf8_allowed = preferred.is_none_or(|p| p.trim().is_empty() || is_utf8_label(p));

    if utf8_allowed {
        if let Some(text) = decode_strict_utf8(bytes) {
            let text = sanitize(text);
            if !is_blank(&text) {
                debug!(len = bytes.len(), "strict utf-8 decode succeeded");
                return Ok(Decoded {
                    text,
                    encoding: "utf-8".to_string(),
                });
            }
        }
    }

    if let Some(decoded) = decode_utf16_bom(bytes) {
        debug!(encoding = %decoded.encoding, "decoded by byte-order mark");
        return Ok(decoded);
    }

    let Some(winner) = best_attempt(bytes, preferred) else {
        debug!("no candidate encoding produced text");
        return Err(DecodeError::NoCandidateEncoding);
    };

    debug!(
        encoding = %winner.encoding,
        quality = winner.quality,
        garbled = winner.is_garbled,
        "selected candidate encoding"
    );

    if winner.is_garbled {
        return Err(DecodeError::NoCandidateEncoding);
    }

    let text = sanitize(&winner.text);
    if is_blank(&text) {
        return Err(DecodeError::NoCandidateEncoding);
    }

    Ok(Decoded {
        text,
        encoding: winner.encoding,
    })
}

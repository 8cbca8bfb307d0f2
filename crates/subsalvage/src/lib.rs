//! Turn downloaded subtitle payloads into clean subtitle text.
//!
//! A payload is usually an archive holding one subtitle among other files, in
//! an encoding nobody recorded. [`extract_from_archive`] picks the subtitle
//! entry and hands it to [`decode_text`], which:
//!
//! - passes VobSub bitmap containers through as [`ExtractionResult::SuccessBinary`];
//! - decodes text with [`subsalvage_text::decode`] (strict UTF-8, then a scored
//!   trial over legacy code pages);
//! - converts MicroDVD `.sub` files to SRT;
//! - falls back to the [`recovery`] chain when no encoding reads cleanly, and
//!   finally to an [`ExtractionResult::Failure`] carrying a hex dump.
//!
//! Every call returns exactly one [`ExtractionResult`]; nothing panics on bad
//! input.
//!
//! ```
//! let result = subsalvage::decode_text(
//!     b"1\r\n00:00:01,000 --> 00:00:02,000\r\nHello\r\n",
//!     "movie.srt",
//!     None,
//! );
//! assert_eq!(result.encoding(), Some("utf-8"));
//! assert_eq!(result.content(), Some("1\n00:00:01,000 --> 00:00:02,000\nHello\n"));
//! ```

pub mod cache;
pub mod classify;
pub mod hexdump;
pub mod microdvd;
pub mod recovery;

mod error;
mod extractor;
mod options;
mod result;

pub use cache::{ContentKey, MemoryCache, ResultCache};
pub use classify::{Classification, classify};
pub use error::{ExtractError, Result};
pub use extractor::Extractor;
pub use hexdump::hex_dump;
pub use microdvd::{convert as convert_microdvd, frame_to_time};
pub use options::{DEFAULT_FRAME_RATE, DEFAULT_HEXDUMP_LIMIT, ExtractOptions};
pub use result::ExtractionResult;

/// [`Extractor::extract_from_archive`] with default options and no cache.
pub fn extract_from_archive(payload: &[u8], preferred_encoding: Option<&str>) -> ExtractionResult {
    Extractor::default().extract_from_archive(payload, preferred_encoding)
}

/// [`Extractor::decode_text`] with default options and no cache.
pub fn decode_text(
    bytes: &[u8],
    filename_hint: &str,
    preferred_encoding: Option<&str>,
) -> ExtractionResult {
    Extractor::default().decode_text(bytes, filename_hint, preferred_encoding)
}

//! Text recovery for subtitle payloads of unknown encoding.
//!
//! - `trial.rs` - Strict UTF-8 fast path and scored encoding trials
//! - `catalog.rs` - Candidate legacy encodings
//! - `score.rs` - Readability weights
//! - `garbled.rs` - Mojibake detection
//! - `sanitize.rs` - BOM, control character and line ending normalization

pub use catalog::ENCODING_CATALOG;
pub use error::DecodeError;
pub use garbled::{garbled_count, is_garbled};
pub use sanitize::{is_blank, sanitize};
pub use trial::{DecodeAttempt, Decoded, best_attempt, decode, decode_lenient, decode_strict_utf8};

pub mod catalog;
pub mod garbled;
pub mod sanitize;
pub mod score;
pub mod trial;
mod error;

use std::fmt;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::cache::{ContentKey, ResultCache};
use crate::classify::{Classification, classify};
use crate::error::ExtractError;
use crate::microdvd;
use crate::options::ExtractOptions;
use crate::recovery;
use crate::result::ExtractionResult;

/// A configured engine. Cheap to clone and safe to share between threads.
#[derive(Clone, Default)]
pub struct Extractor {
    options: ExtractOptions,
    cache: Option<Arc<dyn ResultCache>>,
}

impl fmt::Debug for Extractor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Extractor")
            .field("options", &self.options)
            .field("cached", &self.cache.is_some())
            .finish()
    }
}

impl Extractor {
    pub fn new(options: ExtractOptions) -> Self {
        Self {
            options,
            cache: None,
        }
    }

    pub fn with_cache(mut self, cache: Arc<dyn ResultCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn options(&self) -> &ExtractOptions {
        &self.options
    }

    /// Pick the subtitle entry out of an archive payload and decode it.
    pub fn extract_from_archive(
        &self,
        payload: &[u8],
        preferred_encoding: Option<&str>,
    ) -> ExtractionResult {
        self.cached(
            || ContentKey::for_archive(payload, preferred_encoding, &self.options),
            || match subsalvage_archive::extract_subtitle_entry(payload) {
                Ok(entry) => {
                    debug!(name = %entry.name, "decoding archive entry");
                    self.decode_uncached(&entry.bytes, entry.file_name(), preferred_encoding)
                }
                Err(e) => {
                    warn!(error = %e, len = payload.len(), "archive could not be read");
                    ExtractError::from(e).into_result(None)
                }
            },
        )
    }

    /// Decode a single subtitle file whose name is `filename_hint`.
    pub fn decode_text(
        &self,
        bytes: &[u8],
        filename_hint: &str,
        preferred_encoding: Option<&str>,
    ) -> ExtractionResult {
        self.cached(
            || ContentKey::for_text(bytes, filename_hint, preferred_encoding, &self.options),
            || self.decode_uncached(bytes, filename_hint, preferred_encoding),
        )
    }

    fn cached(
        &self,
        key: impl FnOnce() -> ContentKey,
        run: impl FnOnce() -> ExtractionResult,
    ) -> ExtractionResult {
        let Some(cache) = &self.cache else {
            return run();
        };

        let key = key();
        if let Some(hit) = cache.get(&key) {
            debug!(%key, "result cache hit");
            return hit;
        }

        let result = run();
        cache.insert(key, result.clone());
        result
    }

    fn decode_uncached(
        &self,
        bytes: &[u8],
        filename: &str,
        preferred_encoding: Option<&str>,
    ) -> ExtractionResult {
        if classify(filename, bytes) == Classification::Binary {
            return ExtractionResult::SuccessBinary {
                filename: filename.to_string(),
                buffer: bytes.to_vec(),
            };
        }

        match subsalvage_text::decode(bytes, preferred_encoding).map_err(ExtractError::from) {
            Ok(decoded) => {
                let (content, filename) = self.finish_text(decoded.text, filename);
                ExtractionResult::Success {
                    content,
                    filename,
                    encoding: Some(decoded.encoding),
                }
            }
            Err(e) => {
                warn!(filename, error = %e, "running recovery");
                self.recover(bytes, filename)
            }
        }
    }

    fn recover(&self, bytes: &[u8], filename: &str) -> ExtractionResult {
        match recovery::recover(bytes, filename, &self.options) {
            Ok(recovered) => {
                debug!(stage = ?recovered.stage, filename = %recovered.filename, "recovered text");
                ExtractionResult::Success {
                    content: recovered.text,
                    filename: recovered.filename,
                    encoding: Some(recovered.encoding.to_string()),
                }
            }
            Err(e) => e.into_result(Some(filename.to_string())),
        }
    }

    /// Convert decoded MicroDVD to SRT when enabled.
    fn finish_text(&self, text: String, filename: &str) -> (String, String) {
        let is_sub = subsalvage_archive::extension_of(filename).as_deref() == Some("sub");
        if !(self.options.convert_microdvd && is_sub && microdvd::is_microdvd(&text)) {
            return (text, filename.to_string());
        }

        match microdvd::convert_or_original(&text, self.options.frame_rate) {
            (srt, true) => (srt, microdvd::srt_filename(filename)),
            (_, false) => (text, filename.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoryCache;

    #[test]
    fn extractor_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Extractor>();
    }

    #[test]
    fn microdvd_text_becomes_srt() {
        let result =
            Extractor::default().decode_text(b"{0}{25}Hello\n{25}{50}World", "movie.sub", None);
        assert_eq!(result.filename(), Some("movie.srt"));
        assert_eq!(result.encoding(), Some("utf-8"));
        assert_eq!(
            result.content(),
            Some(concat!(
                "1\n00:00:00,000 --> 00:00:01,000\nHello\n\n",
                "2\n00:00:01,000 --> 00:00:02,000\nWorld\n\n",
            ))
        );
    }

    #[test]
    fn conversion_can_be_disabled() {
        let extractor = Extractor::new(ExtractOptions::default().convert_microdvd(false));
        let result = extractor.decode_text(b"{0}{25}Hello", "movie.sub", None);
        assert_eq!(result.filename(), Some("movie.sub"));
        assert_eq!(result.content(), Some("{0}{25}Hello"));
    }

    #[test]
    fn frame_rate_option_applies() {
        let extractor = Extractor::new(ExtractOptions::default().frame_rate(50.0));
        let result = extractor.decode_text(b"{50}{100}Hi", "movie.sub", None);
        assert_eq!(result.content(), Some("1\n00:00:01,000 --> 00:00:02,000\nHi\n\n"));
    }

    #[test]
    fn cache_returns_identical_results() {
        let cache = Arc::new(MemoryCache::new());
        let extractor = Extractor::default().with_cache(cache.clone());

        let srt = b"1\n00:00:01,000 --> 00:00:02,000\nHi\n";
        let first = extractor.decode_text(srt, "a.srt", None);
        assert_eq!(cache.len(), 1);
        let second = extractor.decode_text(srt, "a.srt", None);
        assert_eq!(first, second);
        assert_eq!(cache.len(), 1);

        extractor.decode_text(srt, "b.srt", None);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn debug_hides_cache_internals() {
        let extractor = Extractor::default().with_cache(Arc::new(MemoryCache::new()));
        assert!(format!("{extractor:?}").contains("cached: true"));
    }
}

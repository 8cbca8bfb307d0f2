//! Optional caller-owned result cache keyed by content hash.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Mutex, PoisonError};

use sha2::{Digest, Sha256};

use crate::options::ExtractOptions;
use crate::result::ExtractionResult;

/// SHA-256 hex digest identifying one engine call.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ContentKey(String);

impl ContentKey {
    pub fn for_archive(payload: &[u8], preferred: Option<&str>, options: &ExtractOptions) -> Self {
        Self::derive(b"archive", payload, "", preferred, options)
    }

    pub fn for_text(
        bytes: &[u8],
        filename: &str,
        preferred: Option<&str>,
        options: &ExtractOptions,
    ) -> Self {
        Self::derive(b"text", bytes, filename, preferred, options)
    }

    fn derive(
        kind: &[u8],
        bytes: &[u8],
        filename: &str,
        preferred: Option<&str>,
        options: &ExtractOptions,
    ) -> Self {
        let mut hasher = Sha256::new();
        // Length prefixes keep adjacent fields from running into each other.
        for field in [
            kind,
            bytes,
            filename.as_bytes(),
            preferred.unwrap_or_default().as_bytes(),
        ] {
            hasher.update((field.len() as u64).to_le_bytes());
            hasher.update(field);
        }
        hasher.update([u8::from(preferred.is_some())]);
        hasher.update(options.frame_rate.to_bits().to_le_bytes());
        hasher.update([u8::from(options.convert_microdvd)]);
        hasher.update((options.hexdump_limit as u64).to_le_bytes());
        Self(hex::encode(hasher.finalize()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub trait ResultCache: Send + Sync {
    fn get(&self, key: &ContentKey) -> Option<ExtractionResult>;
    fn insert(&self, key: ContentKey, result: ExtractionResult);
}

/// Unbounded in-process cache.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<ContentKey, ExtractionResult>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<ContentKey, ExtractionResult>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ResultCache for MemoryCache {
    fn get(&self, key: &ContentKey) -> Option<ExtractionResult> {
        self.lock().get(key).cloned()
    }

    fn insert(&self, key: ContentKey, result: ExtractionResult) {
        self.lock().insert(key, result);
    }
}

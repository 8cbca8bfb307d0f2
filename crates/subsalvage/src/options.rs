use serde::Deserialize;

pub const DEFAULT_FRAME_RATE: f64 = 25.0;
pub const DEFAULT_HEXDUMP_LIMIT: usize = 512;

/// Engine configuration, loadable from TOML.
///
/// ```
/// use subsalvage::ExtractOptions;
///
/// let options = ExtractOptions::default().frame_rate(23.976).hexdump_limit(256);
/// assert_eq!(options.hexdump_limit, 256);
/// ```
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExtractOptions {
    /// Frames per second assumed for MicroDVD input without a rate header.
    pub frame_rate: f64,
    pub convert_microdvd: bool,
    /// Bytes of the payload rendered into a failure's hex dump.
    pub hexdump_limit: usize,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            frame_rate: DEFAULT_FRAME_RATE,
            convert_microdvd: true,
            hexdump_limit: DEFAULT_HEXDUMP_LIMIT,
        }
    }
}

impl ExtractOptions {
    pub fn frame_rate(mut self, fps: f64) -> Self {
        self.frame_rate = fps;
        self
    }

    pub fn convert_microdvd(mut self, enabled: bool) -> Self {
        self.convert_microdvd = enabled;
        self
    }

    pub fn hexdump_limit(mut self, bytes: usize) -> Self {
        self.hexdump_limit = bytes;
        self
    }
}

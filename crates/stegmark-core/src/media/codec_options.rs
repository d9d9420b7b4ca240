/// Default upper bound of bits read while looking for the terminator
pub const DEFAULT_SCAN_LIMIT: usize = 100_000;

/// Codec configuration for watermark extraction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodecOptions {
    /// Maximum number of pixels visited while looking for the terminator.
    /// The effective bound is the smaller of this value and the pixel count,
    /// which keeps extraction from images without a watermark cheap.
    pub scan_limit: usize,
}

impl Default for CodecOptions {
    fn default() -> Self {
        Self {
            scan_limit: DEFAULT_SCAN_LIMIT,
        }
    }
}

impl CodecOptions {
    pub fn with_scan_limit(mut self, scan_limit: usize) -> Self {
        self.scan_limit = scan_limit;
        self
    }

    /// The scan bound for a carrier of `pixel_count` pixels
    pub fn scan_limit_for(&self, pixel_count: usize) -> usize {
        self.scan_limit.min(pixel_count)
    }
}

//! Engine constants and tuning parameters

/// Edge length in pixels of one mosaic tile
pub const TILE_SIZE: u32 = 30;

/// Edge length of the square scratch raster used for fingerprinting
///
/// Every source is resampled to this size before averaging, so analysis cost
/// is independent of native resolution.
pub const FINGERPRINT_SAMPLE_SIZE: u32 = 30;

/// Widest target canvas the engine will tile
///
/// Wider targets are downscaled proportionally before tiling. The bound
/// exists purely to cap tile count for very large inputs.
pub const MAX_TARGET_WIDTH: u32 = 2000;

/// Score penalty added per prior use of a source
pub const USAGE_PENALTY: f64 = 20.0;

/// Number of lowest-scoring candidates eligible for random selection
///
/// A deterministic arg-min produces visible streaking when many tiles share a
/// target color; picking uniformly among the near-best breaks the pattern up.
pub const CANDIDATES_CONSIDERED: usize = 3;

/// Tile rows composited per step before control returns to the caller
pub const ROWS_PER_STEP: usize = 5;

/// JPEG quality of the encoded mosaic, out of 100
pub const JPEG_QUALITY: u8 = 90;

/// Portion of the overall progress range consumed by source analysis
pub const ANALYSIS_PROGRESS_SHARE: f64 = 30.0;

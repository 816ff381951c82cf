//! Source image analysis
//!
//! Decodes candidate source images and reduces each to an average-color
//! fingerprint consumed by the matcher.

/// Average-color computation over rasters and tile regions
pub mod fingerprint;
/// Source records and batch analysis
pub mod sources;

pub use sources::SourceImage;

//! Source records and batch analysis
//!
//! Each candidate source is decoded once and reduced to an average-color
//! fingerprint. Usage counts accumulate over a single engine run and are never
//! shared between runs: the engine consumes its sources by value.

use image::{DynamicImage, RgbImage};
use log::warn;

use crate::analysis::fingerprint;
use crate::io::configuration::FINGERPRINT_SAMPLE_SIZE;
use crate::io::progress::ProgressReporter;

/// One analyzed candidate: decoded raster, color fingerprint, reuse tally
#[derive(Debug)]
pub struct SourceImage {
    fingerprint: [u8; 3],
    image: DynamicImage,
    usage_count: usize,
}

impl SourceImage {
    /// Analyze an already-decoded image
    pub fn from_image(image: DynamicImage) -> Self {
        let fingerprint = fingerprint::fingerprint(&image);
        Self {
            fingerprint,
            image,
            usage_count: 0,
        }
    }

    /// Analyze raw encoded bytes
    ///
    /// Total over its input: a buffer that fails to decode degrades to a black
    /// placeholder with a pure-black fingerprint instead of failing, so one
    /// corrupt source never sinks a whole run.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        image::load_from_memory(bytes).map_or_else(
            |error| {
                warn!("source image failed to decode, degrading to black fingerprint: {error}");
                Self::black_placeholder()
            },
            Self::from_image,
        )
    }

    fn black_placeholder() -> Self {
        let raster = RgbImage::new(FINGERPRINT_SAMPLE_SIZE, FINGERPRINT_SAMPLE_SIZE);
        Self {
            fingerprint: [0, 0, 0],
            image: DynamicImage::ImageRgb8(raster),
            usage_count: 0,
        }
    }

    /// Average-color fingerprint, one mean per RGB channel
    pub const fn fingerprint(&self) -> [u8; 3] {
        self.fingerprint
    }

    /// Decoded raster this source paints tiles with
    pub const fn image(&self) -> &DynamicImage {
        &self.image
    }

    /// Number of tiles this source has been chosen for in the current run
    pub const fn usage_count(&self) -> usize {
        self.usage_count
    }

    pub(crate) const fn record_use(&mut self) {
        self.usage_count += 1;
    }
}

/// Analyze an ordered collection of raw image buffers
///
/// Produces one record per input, in input order, reporting progress after
/// each source. Decode failures degrade per [`SourceImage::from_bytes`].
pub fn analyze_sources(
    inputs: &[impl AsRef<[u8]>],
    reporter: &mut ProgressReporter,
) -> Vec<SourceImage> {
    let total = inputs.len();
    let mut sources = Vec::with_capacity(total);
    for (index, input) in inputs.iter().enumerate() {
        sources.push(SourceImage::from_bytes(input.as_ref()));
        reporter.source_analyzed(index + 1, total);
    }
    sources
}

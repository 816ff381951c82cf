//! Mosaic engine: matching, compositing, and orchestration
//!
//! One generation run flows through three stages in strict sequence: source
//! analysis, tile matching interleaved with compositing, and a final encode.

/// Tile painting onto the output canvas
pub mod compositor;
/// Stepwise engine executor and run configuration
pub mod executor;
/// Penalized-distance candidate scoring
pub mod matcher;

pub use executor::{EngineConfig, MosaicEngine, RandomSelector};

use crate::analysis::sources::analyze_sources;
use crate::io::error::{MosaicError, Result};
use crate::io::image::{EncodedMosaic, decode_target};
use crate::io::progress::ProgressReporter;

/// Generate a photomosaic from raw image bytes with default settings
///
/// Sources are matched by fingerprint similarity with a reuse penalty and
/// randomized tie-breaking, so repeat runs over identical inputs may produce
/// different mosaics. `observer` receives overall progress in percent.
///
/// # Errors
///
/// Returns [`MosaicError::EmptySourceSet`] for an empty source collection and
/// [`MosaicError::TargetDecode`] if the target bytes cannot be decoded;
/// encoding failures surface as [`MosaicError::Encode`]
pub fn generate_mosaic(
    target: &[u8],
    sources: &[impl AsRef<[u8]>],
    observer: impl FnMut(f64) + 'static,
) -> Result<EncodedMosaic> {
    generate_mosaic_with(
        target,
        sources,
        EngineConfig::default(),
        RandomSelector::from_entropy(),
        ProgressReporter::new(observer),
    )
}

/// Generate a photomosaic with explicit configuration, randomness, and
/// progress reporting
///
/// Seeding the [`RandomSelector`] makes candidate tie-breaking reproducible.
///
/// # Errors
///
/// As [`generate_mosaic`], plus [`MosaicError::InvalidParameter`] when the
/// configuration fails validation
pub fn generate_mosaic_with(
    target: &[u8],
    sources: &[impl AsRef<[u8]>],
    config: EngineConfig,
    selector: RandomSelector,
    mut reporter: ProgressReporter,
) -> Result<EncodedMosaic> {
    config.validate()?;
    if sources.is_empty() {
        return Err(MosaicError::EmptySourceSet);
    }

    let decoded = decode_target(target)?;
    let analyzed = analyze_sources(sources, &mut reporter);
    MosaicEngine::new(decoded, analyzed, config, selector, reporter)?.finish()
}

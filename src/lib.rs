//! Photomosaic generation by average-color tile matching
//!
//! The engine reconstructs a target image as a grid of caller-supplied source
//! images: every source is reduced to an average-color fingerprint, every tile
//! region of the target is matched against those fingerprints with a reuse
//! penalty and randomized tie-breaking, and the winning sources are painted
//! into an output canvas that is finally encoded as a JPEG.

#![forbid(unsafe_code)]

/// Source image fingerprinting and per-run usage accounting
pub mod analysis;
/// Matching, compositing, and the stepwise mosaic executor
pub mod engine;
/// Input/output operations, progress reporting, and error handling
pub mod io;
/// Mathematical utilities for color comparison
pub mod math;
/// Tile grid layout over the output canvas
pub mod spatial;

pub use io::error::{MosaicError, Result};

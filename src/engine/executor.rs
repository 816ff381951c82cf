//! Stepwise engine executor and run configuration
//!
//! The executor owns every piece of per-run state: the scaled target, the
//! analyzed sources with their usage counters, the output canvas, and the
//! progress reporter. Work advances in bounded row batches so a caller can
//! interleave other work (or drop the engine to cancel) between steps.

use image::{DynamicImage, RgbImage};
use log::debug;
use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::analysis::fingerprint::region_average;
use crate::analysis::sources::SourceImage;
use crate::engine::compositor::{paint_tile, prepare_tiles};
use crate::engine::matcher::shortlist;
use crate::io::configuration::{
    CANDIDATES_CONSIDERED, JPEG_QUALITY, MAX_TARGET_WIDTH, ROWS_PER_STEP, TILE_SIZE, USAGE_PENALTY,
};
use crate::io::error::{MosaicError, Result, invalid_parameter};
use crate::io::image::{EncodedMosaic, constrain_width, encode_canvas};
use crate::io::progress::ProgressReporter;
use crate::spatial::grid::TileGrid;

/// Engine parameters controlling tiling, matching, and encoding behavior
#[derive(Clone, Copy, Debug)]
pub struct EngineConfig {
    /// Edge length in pixels of one mosaic tile
    pub tile_size: u32,
    /// Widest canvas the engine will tile; wider targets are downscaled
    pub max_target_width: u32,
    /// Score penalty added per prior use of a source
    pub usage_penalty: f64,
    /// Number of lowest-scoring candidates eligible for random selection
    pub candidates_considered: usize,
    /// Tile rows composited per step before control returns to the caller
    pub rows_per_step: usize,
    /// JPEG quality of the encoded artifact, 1 to 100
    pub jpeg_quality: u8,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tile_size: TILE_SIZE,
            max_target_width: MAX_TARGET_WIDTH,
            usage_penalty: USAGE_PENALTY,
            candidates_considered: CANDIDATES_CONSIDERED,
            rows_per_step: ROWS_PER_STEP,
            jpeg_quality: JPEG_QUALITY,
        }
    }
}

impl EngineConfig {
    /// Reject configurations the engine cannot run with
    ///
    /// # Errors
    ///
    /// Returns [`MosaicError::InvalidParameter`] for zero-sized tiles, a zero
    /// width bound, an empty candidate window, a zero row batch, a
    /// non-finite or negative penalty, or an out-of-range JPEG quality
    pub fn validate(&self) -> Result<()> {
        if self.tile_size == 0 {
            return Err(invalid_parameter(
                "tile_size",
                &self.tile_size,
                &"tile edge must be at least one pixel",
            ));
        }
        if self.max_target_width == 0 {
            return Err(invalid_parameter(
                "max_target_width",
                &self.max_target_width,
                &"width bound must be at least one pixel",
            ));
        }
        if !self.usage_penalty.is_finite() || self.usage_penalty < 0.0 {
            return Err(invalid_parameter(
                "usage_penalty",
                &self.usage_penalty,
                &"penalty must be finite and non-negative",
            ));
        }
        if self.candidates_considered == 0 {
            return Err(invalid_parameter(
                "candidates_considered",
                &self.candidates_considered,
                &"selection needs at least one candidate",
            ));
        }
        if self.rows_per_step == 0 {
            return Err(invalid_parameter(
                "rows_per_step",
                &self.rows_per_step,
                &"each step must composite at least one row",
            ));
        }
        if self.jpeg_quality == 0 || self.jpeg_quality > 100 {
            return Err(invalid_parameter(
                "jpeg_quality",
                &self.jpeg_quality,
                &"quality must lie between 1 and 100",
            ));
        }
        Ok(())
    }
}

/// Random source of tie-breaking choices
///
/// Entropy seeding keeps repeat runs over identical inputs intentionally
/// non-deterministic; fixed seeding exists for reproducible tests.
pub struct RandomSelector {
    rng: StdRng,
}

impl RandomSelector {
    /// Create a selector seeded from operating system entropy
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Create a deterministic selector for reproducible runs
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Pick an index uniformly at random from `0..len`
    ///
    /// Returns 0 for empty or single-element ranges.
    pub fn pick_index(&mut self, len: usize) -> usize {
        if len <= 1 {
            return 0;
        }
        self.rng.random_range(0..len)
    }
}

/// Stepwise photomosaic executor
///
/// Construction scales the target, fingerprint-matches nothing yet, and
/// prepares one tile-sized raster per source. Each [`step`](Self::step)
/// matches and paints a bounded batch of rows; [`finish`](Self::finish)
/// drives any remaining rows and encodes the canvas.
pub struct MosaicEngine {
    config: EngineConfig,
    target: RgbImage,
    grid: TileGrid,
    sources: Vec<SourceImage>,
    tiles: Vec<RgbImage>,
    canvas: RgbImage,
    next_row: u32,
    selector: RandomSelector,
    reporter: ProgressReporter,
}

impl MosaicEngine {
    /// Build an engine over a decoded target and analyzed sources
    ///
    /// The engine takes ownership of its sources: usage counters are scoped
    /// to this run and cannot leak into a concurrent one.
    ///
    /// # Errors
    ///
    /// Returns [`MosaicError::InvalidParameter`] for an invalid configuration
    /// and [`MosaicError::EmptySourceSet`] when no sources are supplied
    pub fn new(
        target: DynamicImage,
        sources: Vec<SourceImage>,
        config: EngineConfig,
        selector: RandomSelector,
        reporter: ProgressReporter,
    ) -> Result<Self> {
        config.validate()?;
        if sources.is_empty() {
            return Err(MosaicError::EmptySourceSet);
        }

        let target = constrain_width(target, config.max_target_width).to_rgb8();
        let (width, height) = target.dimensions();
        let grid = TileGrid::new(width, height, config.tile_size);
        let rows = grid.rows();
        let cols = grid.cols();
        debug!("compositing {width}x{height} canvas as {rows} rows by {cols} columns");

        let tiles = prepare_tiles(&sources, config.tile_size);
        let canvas = RgbImage::new(width, height);

        Ok(Self {
            config,
            target,
            grid,
            sources,
            tiles,
            canvas,
            next_row: 0,
            selector,
            reporter,
        })
    }

    /// Match and paint the next batch of tile rows
    ///
    /// Processes at most `rows_per_step` rows, reports progress, and returns
    /// whether rows remain. Returning between batches bounds continuous
    /// compute time so interactive callers stay responsive.
    ///
    /// # Errors
    ///
    /// Returns [`MosaicError::EmptySourceSet`] if the source array is empty;
    /// the constructor makes that unreachable for engine-built state
    pub fn step(&mut self) -> Result<bool> {
        let total_rows = self.grid.rows();
        if self.next_row >= total_rows {
            return Ok(false);
        }

        let batch_end = self
            .next_row
            .saturating_add(self.config.rows_per_step as u32)
            .min(total_rows);
        while self.next_row < batch_end {
            self.composite_row(self.next_row)?;
            self.next_row += 1;
        }

        self.reporter
            .rows_composited(self.next_row as usize, total_rows as usize);
        Ok(self.next_row < total_rows)
    }

    fn composite_row(&mut self, row: u32) -> Result<()> {
        let grid = self.grid;
        for rect in grid.row_rects(row) {
            let tile_color = region_average(&self.target, rect);
            let candidates = shortlist(
                tile_color,
                &self.sources,
                self.config.usage_penalty,
                self.config.candidates_considered,
            );
            let pick = self.selector.pick_index(candidates.len());
            let chosen = candidates
                .get(pick)
                .map(|candidate| candidate.index)
                .ok_or(MosaicError::EmptySourceSet)?;

            if let Some(source) = self.sources.get_mut(chosen) {
                source.record_use();
            }
            if let Some(tile) = self.tiles.get(chosen) {
                paint_tile(&mut self.canvas, tile, rect);
            }
        }
        Ok(())
    }

    /// Drive all remaining batches, encode the canvas, and report completion
    ///
    /// # Errors
    ///
    /// Propagates step failures and returns [`MosaicError::Encode`] if JPEG
    /// serialization of the finished canvas fails
    pub fn finish(mut self) -> Result<EncodedMosaic> {
        while self.step()? {}

        let artifact = encode_canvas(&self.canvas, self.config.jpeg_quality)?;
        self.reporter.complete();
        Ok(artifact)
    }

    /// Canvas dimensions in pixels, equal to the scaled target's
    pub fn dimensions(&self) -> (u32, u32) {
        self.canvas.dimensions()
    }

    /// The tile layout this run composites
    pub const fn grid(&self) -> TileGrid {
        self.grid
    }

    /// Tile rows matched and painted so far
    pub const fn rows_completed(&self) -> u32 {
        self.next_row
    }

    /// The analyzed sources owned by this run
    pub fn sources(&self) -> &[SourceImage] {
        &self.sources
    }

    /// Per-source selection tallies, in source order
    pub fn usage_counts(&self) -> Vec<usize> {
        self.sources.iter().map(SourceImage::usage_count).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn solid_target(width: u32, height: u32, color: [u8; 3]) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb(color)))
    }

    fn solid_source(color: [u8; 3]) -> SourceImage {
        SourceImage::from_image(DynamicImage::ImageRgb8(RgbImage::from_pixel(
            10,
            10,
            Rgb(color),
        )))
    }

    fn test_engine(target: DynamicImage, sources: Vec<SourceImage>) -> MosaicEngine {
        match MosaicEngine::new(
            target,
            sources,
            EngineConfig::default(),
            RandomSelector::seeded(42),
            ProgressReporter::disabled(),
        ) {
            Ok(engine) => engine,
            Err(error) => unreachable!("engine construction failed: {error}"),
        }
    }

    #[test]
    fn validation_rejects_zero_tile_size() {
        let config = EngineConfig {
            tile_size: 0,
            ..EngineConfig::default()
        };

        assert!(matches!(
            config.validate(),
            Err(MosaicError::InvalidParameter { parameter: "tile_size", .. })
        ));
    }

    #[test]
    fn validation_rejects_out_of_range_quality() {
        let config = EngineConfig {
            jpeg_quality: 0,
            ..EngineConfig::default()
        };

        assert!(config.validate().is_err());
    }

    #[test]
    fn empty_source_set_is_rejected_before_any_work() {
        let result = MosaicEngine::new(
            solid_target(60, 60, [255, 0, 0]),
            Vec::new(),
            EngineConfig::default(),
            RandomSelector::seeded(1),
            ProgressReporter::disabled(),
        );

        assert!(matches!(result, Err(MosaicError::EmptySourceSet)));
    }

    #[test]
    fn steps_advance_in_row_batches() {
        // 7 rows of tiles with the default batch of 5: two steps, then done
        let mut engine = test_engine(solid_target(30, 210, [80, 80, 80]), vec![
            solid_source([80, 80, 80]),
        ]);

        assert_eq!(engine.grid().rows(), 7);
        assert_eq!(engine.step().ok(), Some(true));
        assert_eq!(engine.rows_completed(), 5);
        assert_eq!(engine.step().ok(), Some(false));
        assert_eq!(engine.rows_completed(), 7);
        assert_eq!(engine.step().ok(), Some(false));
    }

    #[test]
    fn usage_counts_sum_to_tile_count() {
        let mut engine = test_engine(solid_target(64, 64, [120, 60, 30]), vec![
            solid_source([120, 60, 30]),
            solid_source([10, 200, 90]),
            solid_source([220, 220, 220]),
        ]);

        while engine.step().ok() == Some(true) {}

        assert_eq!(engine.sources().len(), 3);
        let total: usize = engine.usage_counts().iter().sum();
        assert_eq!(total as u64, engine.grid().tile_count());
        assert_eq!(engine.grid().tile_count(), 9);
    }

    #[test]
    fn selection_stays_within_the_candidate_window() {
        // Two near matches and two far colors with no penalty: only the near
        // pair should ever be chosen for a uniform target
        let config = EngineConfig {
            usage_penalty: 0.0,
            candidates_considered: 2,
            ..EngineConfig::default()
        };
        let sources = vec![
            solid_source([10, 10, 10]),
            solid_source([12, 12, 12]),
            solid_source([200, 200, 200]),
            solid_source([250, 250, 250]),
        ];
        let mut engine = match MosaicEngine::new(
            solid_target(150, 150, [11, 11, 11]),
            sources,
            config,
            RandomSelector::seeded(7),
            ProgressReporter::disabled(),
        ) {
            Ok(engine) => engine,
            Err(error) => unreachable!("engine construction failed: {error}"),
        };

        while engine.step().ok() == Some(true) {}

        let counts = engine.usage_counts();
        assert_eq!(counts.iter().sum::<usize>(), 25);
        assert_eq!(counts.get(2), Some(&0));
        assert_eq!(counts.get(3), Some(&0));
    }
}

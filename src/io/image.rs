//! Image decoding, target scaling, and mosaic encoding

use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, ExtendedColorType, RgbImage};
use log::debug;
use std::io::Cursor;
use std::path::Path;

use crate::io::error::{MosaicError, Result};

/// Decode an image from a filesystem path
///
/// # Errors
///
/// Returns [`MosaicError::ImageLoad`] if the file cannot be opened or decoded
pub fn load_image(path: &Path) -> Result<DynamicImage> {
    image::open(path).map_err(|source| MosaicError::ImageLoad {
        path: path.to_path_buf(),
        source,
    })
}

/// Decode the target image from raw encoded bytes
///
/// # Errors
///
/// Returns [`MosaicError::TargetDecode`] if the bytes do not decode to a
/// supported image format; target decode failures are fatal to the run
pub fn decode_target(bytes: &[u8]) -> Result<DynamicImage> {
    image::load_from_memory(bytes).map_err(|source| MosaicError::TargetDecode { source })
}

/// Downscale `image` proportionally so its width does not exceed `max_width`
///
/// Narrower images pass through untouched. Height scales by the same ratio as
/// width, never below one pixel.
pub fn constrain_width(image: DynamicImage, max_width: u32) -> DynamicImage {
    let width = image.width();
    let height = image.height();
    if width <= max_width {
        return image;
    }

    let ratio = f64::from(max_width) / f64::from(width);
    let scaled_height = ((f64::from(height) * ratio).round() as u32).max(1);
    debug!("downscaling target from {width}x{height} to {max_width}x{scaled_height}");
    image.resize_exact(max_width, scaled_height, FilterType::Triangle)
}

/// Finished mosaic artifact: compressed raster plus its pixel dimensions
#[derive(Clone, Debug)]
pub struct EncodedMosaic {
    bytes: Vec<u8>,
    width: u32,
    height: u32,
}

impl EncodedMosaic {
    /// Encoded JPEG bytes
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Consume the artifact, yielding its encoded bytes
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Number of encoded bytes
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the encoding produced no bytes
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Canvas width in pixels
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Canvas height in pixels
    pub const fn height(&self) -> u32 {
        self.height
    }
}

/// Encode the painted canvas as a JPEG at the given quality
///
/// # Errors
///
/// Returns [`MosaicError::Encode`] if JPEG serialization fails
pub fn encode_canvas(canvas: &RgbImage, quality: u8) -> Result<EncodedMosaic> {
    let mut bytes = Vec::new();
    let mut encoder = JpegEncoder::new_with_quality(Cursor::new(&mut bytes), quality);
    encoder
        .encode(
            canvas.as_raw(),
            canvas.width(),
            canvas.height(),
            ExtendedColorType::Rgb8,
        )
        .map_err(|source| MosaicError::Encode { source })?;

    Ok(EncodedMosaic {
        bytes,
        width: canvas.width(),
        height: canvas.height(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn constrain_width_caps_wide_targets() {
        let wide = DynamicImage::ImageRgb8(RgbImage::new(4000, 40));

        let constrained = constrain_width(wide, 2000);

        assert_eq!(constrained.width(), 2000);
        assert_eq!(constrained.height(), 20);
    }

    #[test]
    fn constrain_width_keeps_narrow_targets_untouched() {
        let narrow = DynamicImage::ImageRgb8(RgbImage::new(100, 80));

        let constrained = constrain_width(narrow, 2000);

        assert_eq!(constrained.width(), 100);
        assert_eq!(constrained.height(), 80);
    }

    #[test]
    fn constrain_width_rounds_the_scaled_height() {
        let image = DynamicImage::ImageRgb8(RgbImage::new(333, 100));

        let constrained = constrain_width(image, 100);

        assert_eq!(constrained.width(), 100);
        assert_eq!(constrained.height(), 30);
    }

    #[test]
    fn encode_canvas_round_trips_through_the_decoder() {
        let canvas = RgbImage::from_pixel(40, 30, Rgb([200, 40, 10]));

        let artifact = match encode_canvas(&canvas, 90) {
            Ok(artifact) => artifact,
            Err(error) => unreachable!("encoding a valid canvas failed: {error}"),
        };

        assert!(!artifact.is_empty());
        assert_eq!(artifact.width(), 40);
        assert_eq!(artifact.height(), 30);

        let decoded = image::load_from_memory(artifact.bytes());
        assert_eq!(
            decoded.map(|image| (image.width(), image.height())).ok(),
            Some((40, 30))
        );
    }

    #[test]
    fn load_image_reads_from_disk() {
        let Ok(directory) = tempfile::tempdir() else {
            unreachable!("temp directory creation failed");
        };
        let path = directory.path().join("solid.png");
        let written = RgbImage::from_pixel(12, 8, Rgb([5, 250, 5])).save(&path);
        assert!(written.is_ok());

        let loaded = load_image(&path);

        assert_eq!(
            loaded.map(|image| (image.width(), image.height())).ok(),
            Some((12, 8))
        );
    }

    #[test]
    fn load_image_reports_missing_files() {
        let Ok(directory) = tempfile::tempdir() else {
            unreachable!("temp directory creation failed");
        };
        let absent = directory.path().join("absent.png");

        let result = load_image(&absent);

        assert!(matches!(result, Err(MosaicError::ImageLoad { .. })));
    }
}

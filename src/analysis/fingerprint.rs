//! Average-color computation over rasters and tile regions

use image::{DynamicImage, RgbImage, imageops::FilterType};

use crate::io::configuration::FINGERPRINT_SAMPLE_SIZE;
use crate::spatial::grid::TileRect;

/// Unweighted per-channel mean over every pixel, rounded to integer
pub fn average_color(image: &RgbImage) -> [u8; 3] {
    let samples = u64::from(image.width()) * u64::from(image.height());
    if samples == 0 {
        return [0, 0, 0];
    }

    let mut sums = [0.0_f64; 3];
    for pixel in image.pixels() {
        for (sum, &channel) in sums.iter_mut().zip(pixel.0.iter()) {
            *sum += f64::from(channel);
        }
    }
    sums.map(|sum| (sum / samples as f64).round() as u8)
}

/// Reduce an image to a single average-color fingerprint
///
/// The image is stretched into a fixed-size square scratch raster before
/// averaging, so analysis cost is independent of native resolution. Aspect
/// distortion in the scratch raster is accepted.
pub fn fingerprint(image: &DynamicImage) -> [u8; 3] {
    let scratch = image
        .resize_exact(
            FINGERPRINT_SAMPLE_SIZE,
            FINGERPRINT_SAMPLE_SIZE,
            FilterType::Triangle,
        )
        .to_rgb8();
    average_color(&scratch)
}

/// Mean color over one tile's actual pixel extent in `image`
///
/// Boundary tiles average over their clipped width and height only; pixels
/// outside the raster contribute nothing.
pub fn region_average(image: &RgbImage, rect: TileRect) -> [u8; 3] {
    let mut sums = [0.0_f64; 3];
    let mut samples = 0_u64;

    for y in rect.y..rect.y.saturating_add(rect.height) {
        for x in rect.x..rect.x.saturating_add(rect.width) {
            if let Some(pixel) = image.get_pixel_checked(x, y) {
                for (sum, &channel) in sums.iter_mut().zip(pixel.0.iter()) {
                    *sum += f64::from(channel);
                }
                samples += 1;
            }
        }
    }

    if samples == 0 {
        return [0, 0, 0];
    }
    sums.map(|sum| (sum / samples as f64).round() as u8)
}

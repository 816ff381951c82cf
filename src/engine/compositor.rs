//! Tile painting onto the output canvas

use image::{RgbImage, imageops::FilterType};

use crate::analysis::sources::SourceImage;
use crate::spatial::grid::TileRect;

/// Scale every source raster to the nominal tile size, in source order
///
/// Painting always stretches a source to the nominal tile extent regardless of
/// its native aspect ratio, so the resample happens once per source here
/// rather than once per tile.
pub fn prepare_tiles(sources: &[SourceImage], tile_size: u32) -> Vec<RgbImage> {
    sources
        .iter()
        .map(|source| {
            source
                .image()
                .resize_exact(tile_size, tile_size, FilterType::Triangle)
                .to_rgb8()
        })
        .collect()
}

/// Copy `tile` into `canvas` at the rect origin, clipped to the rect extent
///
/// Boundary rects narrower than the tile copy only the overlapping
/// sub-rectangle, mirroring canvas clipping at the image edge.
pub fn paint_tile(canvas: &mut RgbImage, tile: &RgbImage, rect: TileRect) {
    for dy in 0..rect.height.min(tile.height()) {
        for dx in 0..rect.width.min(tile.width()) {
            if let Some(&pixel) = tile.get_pixel_checked(dx, dy) {
                if let Some(destination) = canvas.get_pixel_mut_checked(rect.x + dx, rect.y + dy) {
                    *destination = pixel;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, Rgb};

    #[test]
    fn prepared_tiles_match_the_nominal_size() {
        let sources = vec![SourceImage::from_image(DynamicImage::ImageRgb8(
            RgbImage::from_pixel(100, 40, Rgb([17, 34, 51])),
        ))];

        let tiles = prepare_tiles(&sources, 30);

        assert_eq!(
            tiles.first().map(image::RgbImage::dimensions),
            Some((30, 30))
        );
    }

    #[test]
    fn painting_fills_the_rect_extent() {
        let mut canvas = RgbImage::new(60, 60);
        let tile = RgbImage::from_pixel(30, 30, Rgb([250, 10, 10]));

        paint_tile(
            &mut canvas,
            &tile,
            TileRect {
                x: 30,
                y: 0,
                width: 30,
                height: 30,
            },
        );

        assert_eq!(canvas.get_pixel_checked(45, 15), Some(&Rgb([250, 10, 10])));
        assert_eq!(canvas.get_pixel_checked(15, 15), Some(&Rgb([0, 0, 0])));
    }

    #[test]
    fn clipped_rects_paint_only_their_overlap() {
        let mut canvas = RgbImage::new(35, 30);
        let tile = RgbImage::from_pixel(30, 30, Rgb([9, 200, 9]));

        paint_tile(
            &mut canvas,
            &tile,
            TileRect {
                x: 30,
                y: 0,
                width: 5,
                height: 30,
            },
        );

        assert_eq!(canvas.get_pixel_checked(34, 29), Some(&Rgb([9, 200, 9])));
        assert_eq!(canvas.get_pixel_checked(29, 0), Some(&Rgb([0, 0, 0])));
    }
}

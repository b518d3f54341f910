// SPDX-License-Identifier: MPL-2.0
//! Re-centering a canvas on its visible pixels.
//!
//! The declared bounding box of an emoji is rarely balanced around the
//! artwork, so after rasterization the content is shifted until the center
//! of its tight bounding box sits on the canvas center.

use image_rs::{imageops, Rgb, RgbImage};

/// Inclusive bounds of all pixels different from the background.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibleBounds {
    pub min_x: u32,
    pub min_y: u32,
    pub max_x: u32,
    pub max_y: u32,
}

/// Finds the tight bounding box of non-`background` pixels.
#[must_use]
pub fn visible_bounds(canvas: &RgbImage, background: Rgb<u8>) -> Option<VisibleBounds> {
    let mut bounds: Option<VisibleBounds> = None;
    for (x, y, pixel) in canvas.enumerate_pixels() {
        if *pixel == background {
            continue;
        }
        bounds = Some(match bounds {
            None => VisibleBounds {
                min_x: x,
                min_y: y,
                max_x: x,
                max_y: y,
            },
            Some(b) => VisibleBounds {
                min_x: b.min_x.min(x),
                min_y: b.min_y.min(y),
                max_x: b.max_x.max(x),
                max_y: b.max_y.max(y),
            },
        });
    }
    bounds
}

/// Returns a copy of `canvas` shifted so its visible content is centered.
///
/// Content pushed past an edge is clipped. A canvas with nothing but
/// background is returned unchanged.
#[must_use]
pub fn center_visible(canvas: &RgbImage, background: Rgb<u8>) -> RgbImage {
    let Some(bounds) = visible_bounds(canvas, background) else {
        return canvas.clone();
    };
    let (dx, dy) = centering_offset(canvas.dimensions(), bounds);
    if dx == 0 && dy == 0 {
        return canvas.clone();
    }

    let (width, height) = canvas.dimensions();
    let mut centered = RgbImage::from_pixel(width, height, background);
    imageops::replace(&mut centered, canvas, dx, dy);
    centered
}

// Ties round to even so a residual half-pixel offset rounds to zero and a
// second pass is a no-op.
fn centering_offset((width, height): (u32, u32), bounds: VisibleBounds) -> (i64, i64) {
    let canvas_cx = (f64::from(width) - 1.0) / 2.0;
    let canvas_cy = (f64::from(height) - 1.0) / 2.0;
    let bbox_cx = (f64::from(bounds.min_x) + f64::from(bounds.max_x)) / 2.0;
    let bbox_cy = (f64::from(bounds.min_y) + f64::from(bounds.max_y)) / 2.0;
    (
        (canvas_cx - bbox_cx).round_ties_even() as i64,
        (canvas_cy - bbox_cy).round_ties_even() as i64,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::SENTINEL;

    const INK: Rgb<u8> = Rgb([12, 34, 56]);

    fn canvas_with_block(x: u32, y: u32, w: u32, h: u32) -> RgbImage {
        let mut canvas = RgbImage::from_pixel(64, 64, SENTINEL);
        for py in y..y + h {
            for px in x..x + w {
                canvas.put_pixel(px, py, INK);
            }
        }
        canvas
    }

    #[test]
    fn background_only_canvas_is_unchanged() {
        let canvas = RgbImage::from_pixel(64, 64, SENTINEL);
        assert_eq!(visible_bounds(&canvas, SENTINEL), None);
        assert_eq!(center_visible(&canvas, SENTINEL), canvas);
    }

    #[test]
    fn off_center_block_moves_to_center() {
        let canvas = canvas_with_block(0, 0, 10, 10);
        let centered = center_visible(&canvas, SENTINEL);
        let bounds = visible_bounds(&centered, SENTINEL).expect("content should remain");
        // bbox center 4.5 -> 31.5, shift 27
        assert_eq!(
            bounds,
            VisibleBounds {
                min_x: 27,
                min_y: 27,
                max_x: 36,
                max_y: 36
            }
        );
        assert_eq!(
            centered.pixels().filter(|p| **p == INK).count(),
            canvas.pixels().filter(|p| **p == INK).count()
        );
    }

    #[test]
    fn centering_is_idempotent() {
        for (x, y, w, h) in [
            (0, 0, 7, 3),
            (50, 3, 11, 20),
            (5, 40, 1, 1),
            (3, 3, 11, 11),
            (0, 0, 10, 10),
            (0, 0, 64, 63),
        ] {
            let once = center_visible(&canvas_with_block(x, y, w, h), SENTINEL);
            let twice = center_visible(&once, SENTINEL);
            assert_eq!(twice, once, "block {w}x{h} at ({x},{y}) moved on second pass");
        }
    }

    #[test]
    fn offset_rounds_ties_to_even() {
        // bbox center 0.0 -> 31.5, shift 32; bbox center 63.0 -> -31.5, shift -32
        let bounds = VisibleBounds {
            min_x: 0,
            min_y: 63,
            max_x: 0,
            max_y: 63,
        };
        assert_eq!(centering_offset((64, 64), bounds), (32, -32));

        // bbox center 1.0 -> 30.5, shift 30
        let bounds = VisibleBounds {
            min_x: 1,
            min_y: 2,
            max_x: 1,
            max_y: 2,
        };
        assert_eq!(centering_offset((64, 64), bounds), (30, 30));
    }

    #[test]
    fn single_pixel_lands_on_lower_middle_column() {
        let canvas = canvas_with_block(1, 1, 1, 1);
        let centered = center_visible(&canvas, SENTINEL);
        assert_eq!(
            visible_bounds(&centered, SENTINEL),
            Some(VisibleBounds {
                min_x: 31,
                min_y: 31,
                max_x: 31,
                max_y: 31
            })
        );
    }

    #[test]
    fn odd_width_block_is_centered_with_even_rounding() {
        // bbox center (3 + 13) / 2 = 8.0 -> 31.5 - 8.0 = 23.5, ties to 24
        let canvas = canvas_with_block(3, 3, 11, 11);
        let centered = center_visible(&canvas, SENTINEL);
        assert_eq!(
            visible_bounds(&centered, SENTINEL),
            Some(VisibleBounds {
                min_x: 27,
                min_y: 27,
                max_x: 37,
                max_y: 37
            })
        );
    }

    #[test]
    fn centered_content_is_untouched() {
        let canvas = canvas_with_block(27, 27, 10, 10);
        assert_eq!(center_visible(&canvas, SENTINEL), canvas);
    }
}

// SPDX-License-Identifier: MPL-2.0
//! Raster (PNG) assets as canvas input.

use super::{ALPHA_THRESHOLD, SENTINEL};
use crate::domain::raster::CanvasSize;
use crate::error::Result;
use image_rs::imageops::{self, FilterType};
use image_rs::{Rgb, RgbImage, RgbaImage};
use std::path::Path;

/// Loads a PNG and converts it with [`canvas_from_rgba`].
///
/// # Errors
///
/// Returns [`Error::Image`](crate::error::Error::Image) if the file cannot be
/// opened or decoded.
pub fn load_png_canvas<P: AsRef<Path>>(path: P, size: CanvasSize) -> Result<RgbImage> {
    let image = image_rs::open(path)?.to_rgba8();
    Ok(canvas_from_rgba(&image, size))
}

/// Resizes to exactly N×N with Lanczos3 and maps mostly transparent pixels
/// to the sentinel.
#[must_use]
pub fn canvas_from_rgba(image: &RgbaImage, size: CanvasSize) -> RgbImage {
    let n = size.value();
    let resized = if image.dimensions() == (n, n) {
        image.clone()
    } else {
        imageops::resize(image, n, n, FilterType::Lanczos3)
    };

    RgbImage::from_fn(n, n, |x, y| {
        let [r, g, b, a] = resized.get_pixel(x, y).0;
        if a < ALPHA_THRESHOLD {
            SENTINEL
        } else {
            Rgb([r, g, b])
        }
    })
}

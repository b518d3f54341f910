// SPDX-License-Identifier: MPL-2.0
//! Canvas production and post-processing.
//!
//! Every source path ends in the same representation: an N×N `RgbImage`
//! whose background is the [`SENTINEL`] color. Centering and quantization
//! only ever look at that image.

pub mod centering;
pub mod placement;
pub mod png_source;
pub mod quantize;
pub mod rasterizer;
pub mod resvg_backend;

use crate::domain::raster::CanvasSize;
use image_rs::{Rgb, RgbImage};
use tiny_skia::Pixmap;

pub use centering::center_visible;
pub use placement::Placement;
pub use quantize::{quantize, QuantizeOptions};
pub use rasterizer::rasterize;

/// Background marker color. Never produced by OpenMoji artwork.
pub const SENTINEL: Rgb<u8> = Rgb([255, 0, 255]);

/// Pixels less opaque than this become background when a source carries alpha.
pub const ALPHA_THRESHOLD: u8 = 128;

/// A canvas filled with [`SENTINEL`].
#[must_use]
pub fn blank_canvas(size: CanvasSize) -> RgbImage {
    RgbImage::from_pixel(size.value(), size.value(), SENTINEL)
}

/// Flattens a tiny-skia pixmap onto a sentinel canvas, dropping alpha.
pub(crate) fn pixmap_to_canvas(pixmap: &Pixmap) -> RgbImage {
    let mut canvas = RgbImage::from_pixel(pixmap.width(), pixmap.height(), SENTINEL);
    for (pixel, source) in canvas.pixels_mut().zip(pixmap.pixels()) {
        let color = source.demultiply();
        if color.alpha() >= ALPHA_THRESHOLD {
            *pixel = Rgb([color.red(), color.green(), color.blue()]);
        }
    }
    canvas
}

#[cfg(test)]
mod tests {
    use super::*;
    use tiny_skia::Color;

    #[test]
    fn blank_canvas_is_all_sentinel() {
        let canvas = blank_canvas(CanvasSize::new(16));
        assert_eq!(canvas.dimensions(), (16, 16));
        assert!(canvas.pixels().all(|p| *p == SENTINEL));
    }

    #[test]
    fn pixmap_alpha_below_threshold_becomes_sentinel() {
        let mut pixmap = Pixmap::new(2, 1).expect("failed to allocate pixmap");
        pixmap.fill(Color::from_rgba8(10, 200, 30, 255));
        let canvas = pixmap_to_canvas(&pixmap);
        assert_eq!(*canvas.get_pixel(0, 0), Rgb([10, 200, 30]));

        pixmap.fill(Color::from_rgba8(10, 200, 30, 100));
        let canvas = pixmap_to_canvas(&pixmap);
        assert_eq!(*canvas.get_pixel(1, 0), SENTINEL);
    }
}

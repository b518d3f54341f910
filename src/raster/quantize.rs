// SPDX-License-Identifier: MPL-2.0
//! Canvas to RGB565 pixel array.

use crate::config::defaults::{DEFAULT_DARK_BOOST, DEFAULT_DARK_THRESHOLD};
use crate::domain::raster::Rgb565;
use image_rs::{Rgb, RgbImage};

/// Tuning for [`quantize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuantizeOptions {
    /// Pixel treated as background and written as [`Rgb565::TRANSPARENT`].
    pub background: Rgb<u8>,
    /// A pixel whose channels are all at or below this is "near black".
    pub dark_threshold: u8,
    /// Replacement for near-black pixels, which would otherwise collide
    /// with the transparent value or vanish on the panel.
    pub dark_boost: Rgb<u8>,
}

impl Default for QuantizeOptions {
    fn default() -> Self {
        Self {
            background: super::SENTINEL,
            dark_threshold: DEFAULT_DARK_THRESHOLD,
            dark_boost: Rgb(DEFAULT_DARK_BOOST),
        }
    }
}

/// Converts one pixel.
#[must_use]
pub fn quantize_pixel(pixel: Rgb<u8>, options: &QuantizeOptions) -> Rgb565 {
    if pixel == options.background {
        return Rgb565::TRANSPARENT;
    }
    let Rgb([r, g, b]) = if pixel.0.iter().all(|c| *c <= options.dark_threshold) {
        options.dark_boost
    } else {
        pixel
    };
    Rgb565::from_rgb888(r, g, b)
}

/// Flattens the canvas row-major into raw RGB565 values.
#[must_use]
pub fn quantize(canvas: &RgbImage, options: &QuantizeOptions) -> Vec<u16> {
    canvas
        .pixels()
        .map(|pixel| quantize_pixel(*pixel, options).value())
        .collect()
}

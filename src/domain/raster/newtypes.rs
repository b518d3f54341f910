// SPDX-License-Identifier: MPL-2.0
//! Raster newtypes.
//!
//! This module provides type-safe wrappers for raster values,
//! ensuring they are always within valid ranges.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// =============================================================================
// Canvas Size Bounds
// =============================================================================

/// Canvas edge length bounds in pixels.
pub mod canvas_bounds {
    /// Minimum canvas edge length.
    pub const MIN: u32 = 8;
    /// Maximum canvas edge length.
    pub const MAX: u32 = 256;
    /// Default canvas edge length (one 64x64 HUB75 panel).
    pub const DEFAULT: u32 = 64;
}

// =============================================================================
// CanvasSize
// =============================================================================

/// Edge length of the square output canvas, guaranteed to be within valid range (8–256).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanvasSize(u32);

impl CanvasSize {
    /// Creates a new canvas size, clamping the value to the valid range.
    #[must_use]
    pub fn new(pixels: u32) -> Self {
        Self(pixels.clamp(canvas_bounds::MIN, canvas_bounds::MAX))
    }

    /// Returns the edge length in pixels.
    #[must_use]
    pub fn value(self) -> u32 {
        self.0
    }

    /// Returns the number of pixels on the canvas.
    #[must_use]
    pub fn pixel_count(self) -> usize {
        (self.0 as usize) * (self.0 as usize)
    }
}

impl Default for CanvasSize {
    fn default() -> Self {
        Self(canvas_bounds::DEFAULT)
    }
}

// =============================================================================
// YAxis
// =============================================================================

/// Vertical direction of drawing space relative to the canvas.
///
/// OpenMoji SVGs are Y-down like the LED matrix, so the default maps drawing
/// rows straight onto canvas rows. `Up` mirrors the drawing inside its
/// bounding box for asset sets authored Y-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum YAxis {
    #[default]
    Down,
    Up,
}

impl FromStr for YAxis {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "down" => Ok(YAxis::Down),
            "up" => Ok(YAxis::Up),
            other => Err(format!("unknown y-axis '{}', expected 'down' or 'up'", other)),
        }
    }
}

impl fmt::Display for YAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            YAxis::Down => f.write_str("down"),
            YAxis::Up => f.write_str("up"),
        }
    }
}

// =============================================================================
// Rgb565
// =============================================================================

/// A 16-bit color: 5 bits red, 6 bits green, 5 bits blue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb565(u16);

impl Rgb565 {
    /// Reserved "nothing here" value written for background pixels.
    pub const TRANSPARENT: Rgb565 = Rgb565(0x0000);

    /// Wraps a raw 16-bit value.
    #[must_use]
    pub const fn from_raw(value: u16) -> Self {
        Self(value)
    }

    /// Encodes an RGB888 color by truncating each channel.
    #[must_use]
    pub const fn from_rgb888(r: u8, g: u8, b: u8) -> Self {
        Self((((r & 0xF8) as u16) << 8) | (((g & 0xFC) as u16) << 3) | ((b >> 3) as u16))
    }

    /// Decodes back to RGB888; the truncated low bits come back as zero.
    #[must_use]
    pub const fn to_rgb888(self) -> [u8; 3] {
        let r = ((self.0 >> 11) & 0x1F) as u8;
        let g = ((self.0 >> 5) & 0x3F) as u8;
        let b = (self.0 & 0x1F) as u8;
        [r << 3, g << 2, b << 3]
    }

    /// Returns the raw 16-bit value.
    #[must_use]
    pub const fn value(self) -> u16 {
        self.0
    }
}

// SPDX-License-Identifier: MPL-2.0
//! Raster domain types.
//!
//! - [`CanvasSize`]: edge length of the square output canvas
//! - [`YAxis`]: vertical direction of drawing space
//! - [`Rgb565`]: packed 16-bit output color

pub mod newtypes;

pub use newtypes::{CanvasSize, Rgb565, YAxis};

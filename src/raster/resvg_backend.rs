// SPDX-License-Identifier: MPL-2.0
//! Reference renderer backed by resvg.
//!
//! Handles everything resvg supports (gradients, masks, text), at the cost
//! of anti-aliased edges. Partially covered pixels are snapped to either
//! their color or background using [`ALPHA_THRESHOLD`](super::ALPHA_THRESHOLD).

use super::pixmap_to_canvas;
use super::placement::Placement;
use crate::domain::raster::{CanvasSize, YAxis};
use crate::error::{Error, Result};
use crate::vector::ViewBox;
use image_rs::RgbImage;
use resvg::usvg;
use std::fs;
use std::path::Path;
use tiny_skia::Pixmap;

/// Reads an SVG file and renders it with resvg.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be read, otherwise see
/// [`render_svg_data`].
pub fn render_svg_file<P: AsRef<Path>>(
    path: P,
    size: CanvasSize,
    y_axis: YAxis,
) -> Result<RgbImage> {
    let data = fs::read(path)?;
    render_svg_data(&data, size, y_axis)
}

/// Renders SVG bytes onto a sentinel canvas using the same fit-and-center
/// placement as the primitive rasterizer.
///
/// # Errors
///
/// Returns [`Error::Svg`] if usvg rejects the document and [`Error::Render`]
/// if the pixel buffer cannot be allocated.
pub fn render_svg_data(data: &[u8], size: CanvasSize, y_axis: YAxis) -> Result<RgbImage> {
    let tree = usvg::Tree::from_data(data, &usvg::Options::default())
        .map_err(|e| Error::Svg(e.to_string()))?;

    // usvg has already mapped the viewBox onto this size
    let tree_size = tree.size();
    let view_box = ViewBox::from_size(tree_size.width(), tree_size.height());
    let placement = Placement::fit(&view_box, size, y_axis);

    let mut pixmap = Pixmap::new(size.value(), size.value())
        .ok_or_else(|| Error::Render("failed to allocate canvas".into()))?;
    resvg::render(&tree, placement.transform(), &mut pixmap.as_mut());

    Ok(pixmap_to_canvas(&pixmap))
}

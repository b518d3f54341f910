// SPDX-License-Identifier: MPL-2.0
//! Scan conversion of a [`Drawing`] onto an N×N canvas.
//!
//! Primitives are drawn in document order with hard-edged (non anti-aliased)
//! fills and strokes so every canvas pixel is either untouched background or
//! exactly one source color. Later primitives overwrite earlier ones.

use super::placement::Placement;
use super::{pixmap_to_canvas, SENTINEL};
use crate::domain::raster::{CanvasSize, YAxis};
use crate::error::{Error, Result};
use crate::vector::{Color, Drawing, Primitive, Style};
use image_rs::RgbImage;
use log::debug;
use tiny_skia::{Paint, Path, PathBuilder, Pixmap, Point, Rect, Stroke, Transform};

/// Renders `drawing` into a sentinel-filled canvas of `size`×`size` pixels.
///
/// The drawing's declared bounding box is fitted and centered by
/// [`Placement::fit`]; individual primitives that turn out to be degenerate
/// are skipped.
///
/// # Errors
///
/// Returns [`Error::Render`] if the pixel buffer cannot be allocated.
pub fn rasterize(drawing: &Drawing, size: CanvasSize, y_axis: YAxis) -> Result<RgbImage> {
    let mut pixmap = Pixmap::new(size.value(), size.value())
        .ok_or_else(|| Error::Render("failed to allocate canvas".into()))?;
    let [red, green, blue] = SENTINEL.0;
    pixmap.fill(tiny_skia::Color::from_rgba8(red, green, blue, 255));

    let placement = Placement::fit(&drawing.view_box, size, y_axis);
    let mut painter = Painter {
        pixmap: &mut pixmap,
        transform: placement.transform(),
        min_stroke_width: placement.pixel_in_drawing_units(),
    };
    for primitive in &drawing.children {
        painter.draw(primitive);
    }

    Ok(pixmap_to_canvas(&pixmap))
}

struct Painter<'a> {
    pixmap: &'a mut Pixmap,
    transform: Transform,
    /// One canvas pixel, in drawing units.
    min_stroke_width: f32,
}

impl Painter<'_> {
    fn draw(&mut self, primitive: &Primitive) {
        match primitive {
            Primitive::Group(children) => {
                for child in children {
                    self.draw(child);
                }
            }
            Primitive::Rect {
                x,
                y,
                width,
                height,
                style,
            } => match Rect::from_xywh(*x, *y, *width, *height) {
                Some(rect) => self.fill_and_stroke(&PathBuilder::from_rect(rect), style),
                None => debug!("skipping degenerate rect {}x{}", width, height),
            },
            Primitive::Circle { cx, cy, r, style } => match PathBuilder::from_circle(*cx, *cy, *r) {
                Some(path) => self.fill_and_stroke(&path, style),
                None => debug!("skipping degenerate circle r={}", r),
            },
            Primitive::Ellipse {
                cx,
                cy,
                rx,
                ry,
                style,
            } => match Rect::from_xywh(cx - rx, cy - ry, rx * 2.0, ry * 2.0)
                .and_then(PathBuilder::from_oval)
            {
                Some(path) => self.fill_and_stroke(&path, style),
                None => debug!("skipping degenerate ellipse {}x{}", rx, ry),
            },
            Primitive::Line { from, to, style } => {
                if let Some(path) = polyline_path(&[*from, *to], false) {
                    self.stroke(&path, style);
                }
            }
            Primitive::Polygon { points, style } => {
                if points.len() >= 3 {
                    if let Some(path) = polyline_path(points, true) {
                        self.fill_and_stroke(&path, style);
                    }
                } else if let Some(path) = polyline_path(points, false) {
                    self.stroke(&path, style);
                }
            }
            Primitive::Polyline { points, style } | Primitive::Path { points, style } => {
                if points.len() >= 3 {
                    if let Some(area) = polyline_path(points, true) {
                        self.fill(&area, style);
                    }
                }
                if let Some(outline) = polyline_path(points, false) {
                    self.stroke(&outline, style);
                }
            }
        }
    }

    fn fill_and_stroke(&mut self, path: &Path, style: &Style) {
        self.fill(path, style);
        self.stroke(path, style);
    }

    fn fill(&mut self, path: &Path, style: &Style) {
        let Some(color) = style.fill else {
            return;
        };
        self.pixmap
            .fill_path(path, &solid_paint(color), style.fill_rule, self.transform, None);
    }

    fn stroke(&mut self, path: &Path, style: &Style) {
        let Some(color) = style.stroke else {
            return;
        };
        if style.stroke_width <= 0.0 {
            return;
        }
        let stroke = Stroke {
            width: style.stroke_width.max(self.min_stroke_width),
            line_cap: style.line_cap,
            line_join: style.line_join,
            ..Stroke::default()
        };
        self.pixmap
            .stroke_path(path, &solid_paint(color), &stroke, self.transform, None);
    }
}

fn solid_paint(color: Color) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color_rgba8(color.red, color.green, color.blue, 255);
    paint.anti_alias = false;
    paint
}

fn polyline_path(points: &[Point], close: bool) -> Option<Path> {
    let (first, rest) = points.split_first()?;
    let mut builder = PathBuilder::new();
    builder.move_to(first.x, first.y);
    for point in rest {
        builder.line_to(point.x, point.y);
    }
    if close {
        builder.close();
    }
    builder.finish()
}

// SPDX-License-Identifier: MPL-2.0
//! Mapping from drawing space onto the canvas.

use crate::domain::raster::{CanvasSize, YAxis};
use crate::vector::ViewBox;
use tiny_skia::Transform;

/// Smallest bounding box extent considered; avoids division by zero.
const MIN_EXTENT: f32 = 1e-6;

/// Uniform scale and centering offsets that fit a bounding box into the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub scale: f32,
    pub offset_x: f32,
    pub offset_y: f32,
    view_box: ViewBox,
    y_axis: YAxis,
}

impl Placement {
    /// Fits `view_box` into an N×N canvas, preserving aspect ratio.
    #[must_use]
    pub fn fit(view_box: &ViewBox, size: CanvasSize, y_axis: YAxis) -> Self {
        let n = size.value() as f32;
        let width = view_box.width.max(MIN_EXTENT);
        let height = view_box.height.max(MIN_EXTENT);
        let scale = (n / width).min(n / height);

        Self {
            scale,
            offset_x: (n - width * scale) / 2.0,
            offset_y: (n - height * scale) / 2.0,
            view_box: ViewBox {
                width,
                height,
                ..*view_box
            },
            y_axis,
        }
    }

    /// Drawing-space to canvas-space transform.
    #[must_use]
    pub fn transform(&self) -> Transform {
        let s = self.scale;
        let tx = self.offset_x - self.view_box.min_x * s;
        match self.y_axis {
            YAxis::Down => {
                Transform::from_row(s, 0.0, 0.0, s, tx, self.offset_y - self.view_box.min_y * s)
            }
            YAxis::Up => {
                let top = self.view_box.min_y + self.view_box.height;
                Transform::from_row(s, 0.0, 0.0, -s, tx, self.offset_y + top * s)
            }
        }
    }

    /// Length in drawing units that covers one canvas pixel.
    #[must_use]
    pub fn pixel_in_drawing_units(&self) -> f32 {
        1.0 / self.scale
    }
}

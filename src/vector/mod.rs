// SPDX-License-Identifier: MPL-2.0
//! Normalized vector drawing model.
//!
//! An SVG document is parsed once into a [`Drawing`]: a tree of
//! [`Primitive`]s whose coordinates are already in drawing space (element
//! transforms baked in) and whose [`Style`] is fully resolved (inheritance
//! applied, colors decoded). The rasterizer therefore never looks at raw
//! attributes.

pub mod color;
pub mod parse;
pub mod path_data;
pub mod transform;

use tiny_skia::{FillRule, LineCap, LineJoin, Point};

pub use color::Color;
pub use parse::{load_drawing, parse_drawing};

/// Bounding box declared by the source document (`viewBox`, or `width`/`height`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewBox {
    pub min_x: f32,
    pub min_y: f32,
    pub width: f32,
    pub height: f32,
}

impl ViewBox {
    /// Creates a box anchored at the origin.
    pub fn from_size(width: f32, height: f32) -> Self {
        Self {
            min_x: 0.0,
            min_y: 0.0,
            width,
            height,
        }
    }
}

/// Resolved paint attributes of a leaf primitive.
///
/// `None` colors mean "skip this pass".
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Style {
    pub fill: Option<Color>,
    pub stroke: Option<Color>,
    pub stroke_width: f32,
    pub fill_rule: FillRule,
    pub line_cap: LineCap,
    pub line_join: LineJoin,
}

impl Default for Style {
    /// SVG initial values: black fill, no stroke, width 1.
    fn default() -> Self {
        Self {
            fill: Some(Color::BLACK),
            stroke: None,
            stroke_width: 1.0,
            fill_rule: FillRule::Winding,
            line_cap: LineCap::Butt,
            line_join: LineJoin::Miter,
        }
    }
}

/// A drawable element of the tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        style: Style,
    },
    Circle {
        cx: f32,
        cy: f32,
        r: f32,
        style: Style,
    },
    Ellipse {
        cx: f32,
        cy: f32,
        rx: f32,
        ry: f32,
        style: Style,
    },
    Line {
        from: Point,
        to: Point,
        style: Style,
    },
    Polygon {
        points: Vec<Point>,
        style: Style,
    },
    Polyline {
        points: Vec<Point>,
        style: Style,
    },
    /// Point sequence yielded by the path data parser: end points and
    /// control points, in command order.
    Path {
        points: Vec<Point>,
        style: Style,
    },
    Group(Vec<Primitive>),
}

impl Primitive {
    /// Number of leaf primitives in this subtree.
    pub fn leaf_count(&self) -> usize {
        match self {
            Primitive::Group(children) => children.iter().map(Primitive::leaf_count).sum(),
            _ => 1,
        }
    }
}

/// A parsed vector document.
#[derive(Debug, Clone, PartialEq)]
pub struct Drawing {
    pub view_box: ViewBox,
    pub children: Vec<Primitive>,
}

impl Drawing {
    /// Number of leaf primitives in the whole drawing.
    pub fn leaf_count(&self) -> usize {
        self.children.iter().map(Primitive::leaf_count).sum()
    }
}

// SPDX-License-Identifier: MPL-2.0
//! SVG document to [`Drawing`].
//!
//! Walks the XML event stream with `quick-xml`, keeping a stack of open
//! elements. Each open element carries the style and transform its children
//! inherit; shapes are resolved against that context and appended to the
//! nearest open container. Elements that cannot be resolved are skipped
//! without failing the document.

use super::color::parse_color;
use super::path_data::parse_path_points;
use super::transform::{is_axis_aligned, mean_scale, parse_transform};
use super::{Drawing, Primitive, Style, ViewBox};
use crate::error::{Error, Result};
use log::debug;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::collections::HashMap;
use std::f32::consts::TAU;
use std::fs;
use std::path::Path;
use tiny_skia::{FillRule, LineCap, LineJoin, Point, Transform};

/// Elements whose content never renders directly.
const NON_RENDERING: &[&str] = &[
    "defs",
    "clipPath",
    "mask",
    "symbol",
    "pattern",
    "marker",
    "linearGradient",
    "radialGradient",
    "filter",
    "style",
    "script",
    "title",
    "desc",
    "metadata",
    "text",
    "image",
    "foreignObject",
];

/// Containers whose children are drawn as a group.
const CONTAINERS: &[&str] = &["svg", "g", "a", "switch"];

/// Number of vertices used when an ellipse has to become a polygon.
const ELLIPSE_POLYGON_SEGMENTS: usize = 32;

/// Reads and parses an SVG file.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be read and [`Error::Svg`] if it
/// is not a well-formed SVG document.
pub fn load_drawing<P: AsRef<Path>>(path: P, fallback_size: f32) -> Result<Drawing> {
    let text = fs::read_to_string(path)?;
    parse_drawing(&text, fallback_size)
}

/// Parses SVG text. `fallback_size` is used as the bounding box when the
/// root declares neither `viewBox` nor `width`/`height`.
///
/// # Errors
///
/// Returns [`Error::Svg`] when the XML is malformed, the root element is not
/// `<svg>`, or the document ends with unclosed elements.
pub fn parse_drawing(text: &str, fallback_size: f32) -> Result<Drawing> {
    let mut reader = Reader::from_str(text);
    reader.config_mut().trim_text(true);

    let mut view_box: Option<ViewBox> = None;
    let mut stack: Vec<Frame> = Vec::new();
    let mut finished: Option<Vec<Primitive>> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => {
                if finished.is_some() {
                    continue;
                }
                let attrs = Attributes::from_element(e)?;
                let name = local_name(e);
                if view_box.is_none() {
                    view_box = Some(open_root(&name, &attrs, fallback_size)?);
                    let style = resolve_style(&Style::default(), &attrs);
                    stack.push(Frame::container(style, Transform::identity()));
                    continue;
                }
                let frame = open_element(&mut stack, &name, &attrs);
                stack.push(frame);
            }
            Ok(Event::Empty(ref e)) => {
                if finished.is_some() {
                    continue;
                }
                let attrs = Attributes::from_element(e)?;
                let name = local_name(e);
                if view_box.is_none() {
                    // <svg/> with no content
                    view_box = Some(open_root(&name, &attrs, fallback_size)?);
                    finished = Some(Vec::new());
                    continue;
                }
                // Empty containers contribute nothing, shapes are appended
                let _ = open_element(&mut stack, &name, &attrs);
            }
            Ok(Event::End(_)) => {
                let Some(frame) = stack.pop() else {
                    continue;
                };
                let FrameKind::Container(children) = frame.kind else {
                    continue;
                };
                match stack.last_mut() {
                    Some(parent) => {
                        if !children.is_empty() {
                            parent.push(Primitive::Group(children));
                        }
                    }
                    None => finished = Some(children),
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                return Err(Error::Svg(format!(
                    "malformed XML at byte {}: {}",
                    reader.error_position(),
                    e
                )))
            }
        }
    }

    let view_box = view_box.ok_or_else(|| Error::Svg("document has no <svg> element".into()))?;
    let children =
        finished.ok_or_else(|| Error::Svg("document ends inside an open element".into()))?;

    Ok(Drawing { view_box, children })
}

// =============================================================================
// Element stack
// =============================================================================

enum FrameKind {
    Container(Vec<Primitive>),
    /// Subtree that is parsed for well-formedness but not drawn.
    Skip,
}

struct Frame {
    kind: FrameKind,
    style: Style,
    transform: Transform,
}

impl Frame {
    fn container(style: Style, transform: Transform) -> Self {
        Self {
            kind: FrameKind::Container(Vec::new()),
            style,
            transform,
        }
    }

    fn skip() -> Self {
        Self {
            kind: FrameKind::Skip,
            style: Style::default(),
            transform: Transform::identity(),
        }
    }

    fn is_skip(&self) -> bool {
        matches!(self.kind, FrameKind::Skip)
    }

    fn push(&mut self, primitive: Primitive) {
        if let FrameKind::Container(children) = &mut self.kind {
            children.push(primitive);
        }
    }
}

/// Handles a start or empty tag below the root and returns the frame its
/// children (if any) should use.
fn open_element(stack: &mut [Frame], name: &str, attrs: &Attributes) -> Frame {
    let Some(parent) = stack.last_mut() else {
        return Frame::skip();
    };
    if parent.is_skip() || NON_RENDERING.contains(&name) || attrs.get("display") == Some("none") {
        return Frame::skip();
    }

    let style = resolve_style(&parent.style, attrs);
    let transform = match attrs.get("transform") {
        Some(value) => match parse_transform(value) {
            Some(local) => parent.transform.pre_concat(local),
            None => {
                debug!("ignoring malformed transform '{}' on <{}>", value, name);
                parent.transform
            }
        },
        None => parent.transform,
    };

    if CONTAINERS.contains(&name) {
        return Frame::container(style, transform);
    }

    match build_shape(name, attrs, style, transform) {
        Some(primitive) => parent.push(primitive),
        None => debug!("skipping <{}>: missing or invalid geometry", name),
    }
    // Shapes may carry <title> and the like; none of it renders.
    Frame::skip()
}

fn open_root(name: &str, attrs: &Attributes, fallback_size: f32) -> Result<ViewBox> {
    if name != "svg" {
        return Err(Error::Svg(format!("root element is <{}>, expected <svg>", name)));
    }

    if let Some(view_box) = attrs.get("viewBox").and_then(parse_view_box) {
        return Ok(view_box);
    }
    let width = attrs.length("width");
    let height = attrs.length("height");
    Ok(ViewBox::from_size(
        width.unwrap_or(fallback_size),
        height.unwrap_or(fallback_size),
    ))
}

fn parse_view_box(value: &str) -> Option<ViewBox> {
    let numbers = parse_number_list(value)?;
    match numbers.as_slice() {
        &[min_x, min_y, width, height] if width > 0.0 && height > 0.0 => Some(ViewBox {
            min_x,
            min_y,
            width,
            height,
        }),
        _ => None,
    }
}

// =============================================================================
// Attributes and style
// =============================================================================

/// Attribute values by local name, with `style="..."` declarations merged on
/// top of presentation attributes.
struct Attributes {
    values: HashMap<String, String>,
}

impl Attributes {
    fn from_element(element: &BytesStart<'_>) -> Result<Self> {
        let mut values = HashMap::new();
        for attr in element.attributes() {
            let attr = attr.map_err(|e| Error::Svg(e.to_string()))?;
            let key = String::from_utf8_lossy(attr.key.local_name().as_ref()).to_string();
            let value = attr.unescape_value()?.to_string();
            values.insert(key, value);
        }

        if let Some(style) = values.get("style").cloned() {
            for declaration in style.split(';') {
                if let Some((key, value)) = declaration.split_once(':') {
                    values.insert(key.trim().to_string(), value.trim().to_string());
                }
            }
        }

        Ok(Self { values })
    }

    fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    fn length(&self, key: &str) -> Option<f32> {
        self.get(key).and_then(parse_length)
    }

    fn length_or_zero(&self, key: &str) -> Option<f32> {
        match self.get(key) {
            Some(value) => parse_length(value),
            None => Some(0.0),
        }
    }
}

fn local_name(element: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(element.local_name().as_ref()).to_string()
}

/// Parses a plain number or a `px` length. Percentages and other units are
/// not resolvable without a viewport and yield `None`.
fn parse_length(value: &str) -> Option<f32> {
    let value = value.trim();
    let number = value.strip_suffix("px").unwrap_or(value);
    number.trim().parse::<f32>().ok().filter(|v| v.is_finite())
}

fn parse_number_list(value: &str) -> Option<Vec<f32>> {
    value
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<f32>().ok())
        .collect()
}

fn resolve_style(parent: &Style, attrs: &Attributes) -> Style {
    let mut style = *parent;

    match attrs.get("fill") {
        Some("inherit") | None => {}
        Some(value) => style.fill = parse_color(value),
    }
    match attrs.get("stroke") {
        Some("inherit") | None => {}
        Some(value) => style.stroke = parse_color(value),
    }
    if let Some(width) = attrs.length("stroke-width").filter(|w| *w >= 0.0) {
        style.stroke_width = width;
    }
    match attrs.get("fill-rule") {
        Some("evenodd") => style.fill_rule = FillRule::EvenOdd,
        Some("nonzero") => style.fill_rule = FillRule::Winding,
        _ => {}
    }
    match attrs.get("stroke-linecap") {
        Some("butt") => style.line_cap = LineCap::Butt,
        Some("round") => style.line_cap = LineCap::Round,
        Some("square") => style.line_cap = LineCap::Square,
        _ => {}
    }
    match attrs.get("stroke-linejoin") {
        Some("miter") => style.line_join = LineJoin::Miter,
        Some("round") => style.line_join = LineJoin::Round,
        Some("bevel") => style.line_join = LineJoin::Bevel,
        _ => {}
    }

    style
}

// =============================================================================
// Shapes
// =============================================================================

fn build_shape(
    name: &str,
    attrs: &Attributes,
    mut style: Style,
    transform: Transform,
) -> Option<Primitive> {
    style.stroke_width *= mean_scale(&transform);

    match name {
        "rect" => {
            let x = attrs.length_or_zero("x")?;
            let y = attrs.length_or_zero("y")?;
            let width = attrs.length("width")?;
            let height = attrs.length("height")?;
            if width <= 0.0 || height <= 0.0 {
                return None;
            }
            Some(bake_rect(x, y, width, height, style, &transform))
        }
        "circle" => {
            let cx = attrs.length_or_zero("cx")?;
            let cy = attrs.length_or_zero("cy")?;
            let r = attrs.length("r").filter(|r| *r > 0.0)?;
            Some(bake_ellipse(cx, cy, r, r, true, style, &transform))
        }
        "ellipse" => {
            let cx = attrs.length_or_zero("cx")?;
            let cy = attrs.length_or_zero("cy")?;
            let rx = attrs.length("rx").filter(|r| *r > 0.0)?;
            let ry = attrs.length("ry").filter(|r| *r > 0.0)?;
            Some(bake_ellipse(cx, cy, rx, ry, false, style, &transform))
        }
        "line" => {
            let from = map_point(
                &transform,
                attrs.length_or_zero("x1")?,
                attrs.length_or_zero("y1")?,
            );
            let to = map_point(
                &transform,
                attrs.length_or_zero("x2")?,
                attrs.length_or_zero("y2")?,
            );
            Some(Primitive::Line { from, to, style })
        }
        "polygon" | "polyline" => {
            let numbers = parse_number_list(attrs.get("points")?)?;
            let mut points: Vec<Point> = numbers
                .chunks_exact(2)
                .map(|pair| Point::from_xy(pair[0], pair[1]))
                .collect();
            if points.len() < 2 {
                return None;
            }
            transform.map_points(&mut points);
            if name == "polygon" {
                Some(Primitive::Polygon { points, style })
            } else {
                Some(Primitive::Polyline { points, style })
            }
        }
        "path" => {
            let mut points = parse_path_points(attrs.get("d")?)?;
            if points.len() < 2 {
                return None;
            }
            transform.map_points(&mut points);
            Some(Primitive::Path { points, style })
        }
        _ => None,
    }
}

fn map_point(transform: &Transform, x: f32, y: f32) -> Point {
    let mut points = [Point::from_xy(x, y)];
    transform.map_points(&mut points);
    points[0]
}

fn bake_rect(
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    style: Style,
    transform: &Transform,
) -> Primitive {
    let mut corners = [
        Point::from_xy(x, y),
        Point::from_xy(x + width, y),
        Point::from_xy(x + width, y + height),
        Point::from_xy(x, y + height),
    ];
    transform.map_points(&mut corners);

    if !is_axis_aligned(transform) {
        return Primitive::Polygon {
            points: corners.to_vec(),
            style,
        };
    }

    let (left, right) = min_max(corners[0].x, corners[2].x);
    let (top, bottom) = min_max(corners[0].y, corners[2].y);
    Primitive::Rect {
        x: left,
        y: top,
        width: right - left,
        height: bottom - top,
        style,
    }
}

fn bake_ellipse(
    cx: f32,
    cy: f32,
    rx: f32,
    ry: f32,
    is_circle: bool,
    style: Style,
    transform: &Transform,
) -> Primitive {
    if !is_axis_aligned(transform) {
        let mut points: Vec<Point> = (0..ELLIPSE_POLYGON_SEGMENTS)
            .map(|i| {
                let t = TAU * i as f32 / ELLIPSE_POLYGON_SEGMENTS as f32;
                Point::from_xy(cx + rx * t.cos(), cy + ry * t.sin())
            })
            .collect();
        transform.map_points(&mut points);
        return Primitive::Polygon { points, style };
    }

    let center = map_point(transform, cx, cy);
    let rx = rx * transform.sx.abs();
    let ry = ry * transform.sy.abs();
    if is_circle && (rx - ry).abs() < f32::EPSILON {
        Primitive::Circle {
            cx: center.x,
            cy: center.y,
            r: rx,
            style,
        }
    } else {
        Primitive::Ellipse {
            cx: center.x,
            cy: center.y,
            rx,
            ry,
            style,
        }
    }
}

fn min_max(a: f32, b: f32) -> (f32, f32) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vector::Color;
    use crate::test_utils::{assert_abs_diff_eq, COORD_EPSILON};
    use std::fs;
    use tempfile::tempdir;

    const RED: Color = Color::new(255, 0, 0);

    fn parse(svg: &str) -> Drawing {
        parse_drawing(svg, 64.0).expect("svg should parse")
    }

    #[test]
    fn view_box_is_taken_from_root() {
        let drawing = parse(r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 72 72"></svg>"#);
        assert_eq!(
            drawing.view_box,
            ViewBox {
                min_x: 0.0,
                min_y: 0.0,
                width: 72.0,
                height: 72.0
            }
        );
        assert!(drawing.children.is_empty());
    }

    #[test]
    fn width_and_height_used_without_view_box() {
        let drawing = parse(r#"<svg width="30px" height="20"/>"#);
        assert_eq!(drawing.view_box, ViewBox::from_size(30.0, 20.0));
    }

    #[test]
    fn fallback_size_used_without_any_dimensions() {
        let drawing = parse("<svg><rect width='1' height='1'/></svg>");
        assert_eq!(drawing.view_box, ViewBox::from_size(64.0, 64.0));
    }

    #[test]
    fn shapes_become_primitives_in_document_order() {
        let drawing = parse(
            r##"<svg viewBox="0 0 10 10">
                <rect x="1" y="2" width="3" height="4" fill="#ff0000"/>
                <circle cx="5" cy="5" r="2"/>
                <ellipse cx="5" cy="5" rx="2" ry="1"/>
                <line x1="0" y1="0" x2="10" y2="10" stroke="red"/>
                <polygon points="0,0 10,0 10,10"/>
                <polyline points="0 0 5 5 10 0"/>
                <path d="M0 0 L10 0 L10 10 Z"/>
            </svg>"##,
        );
        assert_eq!(drawing.children.len(), 7);
        assert!(matches!(
            drawing.children[0],
            Primitive::Rect { x, y, width, height, style }
                if x == 1.0 && y == 2.0 && width == 3.0 && height == 4.0 && style.fill == Some(RED)
        ));
        assert!(matches!(drawing.children[1], Primitive::Circle { r, .. } if r == 2.0));
        assert!(matches!(drawing.children[2], Primitive::Ellipse { .. }));
        assert!(matches!(
            drawing.children[3],
            Primitive::Line { style, .. } if style.stroke == Some(RED)
        ));
        assert!(matches!(drawing.children[4], Primitive::Polygon { ref points, .. } if points.len() == 3));
        assert!(matches!(drawing.children[5], Primitive::Polyline { ref points, .. } if points.len() == 3));
        assert!(matches!(drawing.children[6], Primitive::Path { ref points, .. } if points.len() == 3));
    }

    #[test]
    fn groups_nest_and_pass_style_down() {
        let drawing = parse(
            r##"<svg viewBox="0 0 72 72">
                <g id="line" fill="none" stroke="#000000" stroke-width="2" stroke-linecap="round">
                    <circle cx="36" cy="36" r="23"/>
                    <g><path d="M1 1 L2 2" stroke="blue"/></g>
                </g>
            </svg>"##,
        );
        let Primitive::Group(children) = &drawing.children[0] else {
            panic!("expected group");
        };
        let Primitive::Circle { style, .. } = &children[0] else {
            panic!("expected circle");
        };
        assert_eq!(style.fill, None);
        assert_eq!(style.stroke, Some(Color::BLACK));
        assert_eq!(style.stroke_width, 2.0);
        assert_eq!(style.line_cap, LineCap::Round);

        let Primitive::Group(inner) = &children[1] else {
            panic!("expected inner group");
        };
        let Primitive::Path { style, .. } = &inner[0] else {
            panic!("expected path");
        };
        assert_eq!(style.stroke, Some(Color::new(0, 0, 255)));
        assert_eq!(style.fill, None);
    }

    #[test]
    fn root_presentation_attributes_are_inherited() {
        let drawing = parse(
            r#"<svg viewBox="0 0 10 10" fill="red"><circle cx="5" cy="5" r="2"/></svg>"#,
        );
        let Primitive::Circle { style, .. } = &drawing.children[0] else {
            panic!("expected circle");
        };
        assert_eq!(style.fill, Some(RED));
    }

    #[test]
    fn style_attribute_overrides_presentation_attributes() {
        let drawing = parse(
            r#"<svg viewBox="0 0 10 10"><rect width="5" height="5" fill="blue" style="fill: red; stroke:#00ff00"/></svg>"#,
        );
        let Primitive::Rect { style, .. } = &drawing.children[0] else {
            panic!("expected rect");
        };
        assert_eq!(style.fill, Some(RED));
        assert_eq!(style.stroke, Some(Color::new(0, 255, 0)));
    }

    #[test]
    fn unrecognized_fill_fails_closed() {
        let drawing = parse(
            r#"<svg viewBox="0 0 10 10"><rect width="5" height="5" fill="url(#grad)"/></svg>"#,
        );
        let Primitive::Rect { style, .. } = &drawing.children[0] else {
            panic!("expected rect");
        };
        assert_eq!(style.fill, None);
    }

    #[test]
    fn shapes_missing_required_geometry_are_skipped() {
        let drawing = parse(
            r#"<svg viewBox="0 0 10 10">
                <circle cx="5" cy="5"/>
                <rect x="1" width="abc" height="2"/>
                <ellipse rx="2"/>
                <polygon points="1"/>
                <path d="nonsense"/>
                <rect width="2" height="2"/>
            </svg>"#,
        );
        assert_eq!(drawing.children.len(), 1);
        assert!(matches!(drawing.children[0], Primitive::Rect { .. }));
    }

    #[test]
    fn non_rendering_content_is_ignored() {
        let drawing = parse(
            r#"<svg viewBox="0 0 10 10">
                <title>Emoji</title>
                <defs><rect id="r" width="1" height="1"/></defs>
                <g display="none"><rect width="1" height="1"/></g>
                <rect width="2" height="2"><title>tooltip</title></rect>
            </svg>"#,
        );
        assert_eq!(drawing.leaf_count(), 1);
    }

    #[test]
    fn translate_and_scale_are_baked_into_rects_and_circles() {
        let drawing = parse(
            r#"<svg viewBox="0 0 100 100">
                <g transform="translate(10 20) scale(2)">
                    <rect x="1" y="1" width="2" height="3" stroke="red" stroke-width="1.5"/>
                    <circle cx="5" cy="5" r="1"/>
                </g>
            </svg>"#,
        );
        let Primitive::Group(children) = &drawing.children[0] else {
            panic!("expected group");
        };
        let Primitive::Rect { x, y, width, height, style } = children[0] else {
            panic!("expected rect");
        };
        assert_abs_diff_eq!(x, 12.0);
        assert_abs_diff_eq!(y, 22.0);
        assert_abs_diff_eq!(width, 4.0);
        assert_abs_diff_eq!(height, 6.0);
        assert_abs_diff_eq!(style.stroke_width, 3.0, epsilon = COORD_EPSILON);

        let Primitive::Circle { cx, cy, r, .. } = children[1] else {
            panic!("expected circle");
        };
        assert_abs_diff_eq!(cx, 20.0);
        assert_abs_diff_eq!(cy, 30.0);
        assert_abs_diff_eq!(r, 2.0);
    }

    #[test]
    fn rotated_rect_becomes_polygon() {
        let drawing = parse(
            r#"<svg viewBox="0 0 10 10"><rect width="4" height="2" transform="rotate(30 5 5)"/></svg>"#,
        );
        assert!(matches!(
            drawing.children[0],
            Primitive::Polygon { ref points, .. } if points.len() == 4
        ));
    }

    #[test]
    fn non_uniform_scale_turns_circle_into_ellipse() {
        let drawing = parse(
            r#"<svg viewBox="0 0 10 10"><circle r="1" transform="scale(2 1)"/></svg>"#,
        );
        assert!(matches!(
            drawing.children[0],
            Primitive::Ellipse { rx, ry, .. } if rx == 2.0 && ry == 1.0
        ));
    }

    #[test]
    fn malformed_documents_are_svg_errors() {
        for svg in ["<svg>oops", "<html></html>", "", "<svg><g></svg>"] {
            match parse_drawing(svg, 64.0) {
                Err(Error::Svg(message)) => assert!(!message.is_empty()),
                other => panic!("expected Svg error for {svg:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn load_drawing_reads_from_disk() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let svg_path = temp_dir.path().join("1F534.svg");
        fs::write(
            &svg_path,
            r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 72 72"><circle cx="36" cy="36" r="30" fill="#EA5A47"/></svg>"##,
        )
        .expect("failed to write svg");

        let drawing = load_drawing(&svg_path, 64.0).expect("svg should load");
        assert_eq!(drawing.leaf_count(), 1);
    }

    #[test]
    fn load_missing_file_returns_io_error() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        match load_drawing(temp_dir.path().join("missing.svg"), 64.0) {
            Err(Error::Io(_)) => {}
            other => panic!("expected Io error, got {other:?}"),
        }
    }
}

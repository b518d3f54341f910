// SPDX-License-Identifier: MPL-2.0
//! SVG path data (`d` attribute) to point sequence.
//!
//! Curves are not flattened: a cubic contributes its two control points and
//! its end point, a quadratic its control point and end point. Elliptical
//! arcs have no control points, so they contribute one point every 45
//! degrees of sweep. Parsing stops at the first malformed token and keeps
//! what was read so far.

use std::f32::consts::{FRAC_PI_4, TAU};
use tiny_skia::Point;

/// Parses path data into its point sequence.
///
/// Returns `None` when the data does not start with a command.
pub fn parse_path_points(data: &str) -> Option<Vec<Point>> {
    let mut lexer = Lexer::new(data);
    let mut points = Vec::new();

    let mut current = Point::from_xy(0.0, 0.0);
    let mut subpath_start = Point::from_xy(0.0, 0.0);
    // Reflection sources for S and T
    let mut last_cubic_ctrl: Option<Point> = None;
    let mut last_quad_ctrl: Option<Point> = None;

    let mut command = lexer.next_command()?;
    if !matches!(command, b'M' | b'm') {
        return None;
    }

    loop {
        let relative = command.is_ascii_lowercase();
        let base = if relative { current } else { Point::from_xy(0.0, 0.0) };
        let mut cubic_ctrl = None;
        let mut quad_ctrl = None;

        let ok = match command.to_ascii_uppercase() {
            b'M' => lexer.point(base).map(|p| {
                points.push(p);
                current = p;
                subpath_start = p;
            }),
            b'L' => lexer.point(base).map(|p| {
                points.push(p);
                current = p;
            }),
            b'H' => lexer.number().map(|x| {
                let p = Point::from_xy(x + base.x, current.y);
                points.push(p);
                current = p;
            }),
            b'V' => lexer.number().map(|y| {
                let p = Point::from_xy(current.x, y + base.y);
                points.push(p);
                current = p;
            }),
            b'C' => (|| {
                let c1 = lexer.point(base)?;
                let c2 = lexer.point(base)?;
                let end = lexer.point(base)?;
                points.extend([c1, c2, end]);
                cubic_ctrl = Some(c2);
                current = end;
                Some(())
            })(),
            b'S' => (|| {
                let c1 = reflect(last_cubic_ctrl, current);
                let c2 = lexer.point(base)?;
                let end = lexer.point(base)?;
                points.extend([c1, c2, end]);
                cubic_ctrl = Some(c2);
                current = end;
                Some(())
            })(),
            b'Q' => (|| {
                let c = lexer.point(base)?;
                let end = lexer.point(base)?;
                points.extend([c, end]);
                quad_ctrl = Some(c);
                current = end;
                Some(())
            })(),
            b'T' => lexer.point(base).map(|end| {
                let c = reflect(last_quad_ctrl, current);
                points.extend([c, end]);
                quad_ctrl = Some(c);
                current = end;
            }),
            b'A' => (|| {
                let rx = lexer.number()?;
                let ry = lexer.number()?;
                let rotation = lexer.number()?;
                let large_arc = lexer.flag()?;
                let sweep = lexer.flag()?;
                let end = lexer.point(base)?;
                arc_points(current, rx, ry, rotation, large_arc, sweep, end, &mut points);
                current = end;
                Some(())
            })(),
            b'Z' => {
                current = subpath_start;
                Some(())
            }
            _ => None,
        };

        if ok.is_none() {
            break;
        }
        last_cubic_ctrl = cubic_ctrl;
        last_quad_ctrl = quad_ctrl;

        command = match lexer.next_command() {
            Some(next) => next,
            None if lexer.at_end() => break,
            // Implicit repetition; a repeated moveto is a lineto
            None => match command {
                b'M' => b'L',
                b'm' => b'l',
                b'Z' | b'z' => break,
                other => other,
            },
        };
    }

    Some(points)
}

fn reflect(control: Option<Point>, around: Point) -> Point {
    match control {
        Some(c) => Point::from_xy(2.0 * around.x - c.x, 2.0 * around.y - c.y),
        None => around,
    }
}

/// Appends points along an SVG elliptical arc (endpoint parameterization),
/// ending exactly at `to`.
#[allow(clippy::too_many_arguments)]
fn arc_points(
    from: Point,
    rx: f32,
    ry: f32,
    rotation_deg: f32,
    large_arc: bool,
    sweep: bool,
    to: Point,
    out: &mut Vec<Point>,
) {
    if from == to {
        return;
    }
    let (mut rx, mut ry) = (rx.abs(), ry.abs());
    if rx == 0.0 || ry == 0.0 {
        out.push(to);
        return;
    }

    let (sin_phi, cos_phi) = rotation_deg.to_radians().sin_cos();
    let dx2 = (from.x - to.x) / 2.0;
    let dy2 = (from.y - to.y) / 2.0;
    let x1p = cos_phi * dx2 + sin_phi * dy2;
    let y1p = -sin_phi * dx2 + cos_phi * dy2;

    let lambda = (x1p * x1p) / (rx * rx) + (y1p * y1p) / (ry * ry);
    if lambda > 1.0 {
        let s = lambda.sqrt();
        rx *= s;
        ry *= s;
    }

    let num = rx * rx * ry * ry - rx * rx * y1p * y1p - ry * ry * x1p * x1p;
    let den = rx * rx * y1p * y1p + ry * ry * x1p * x1p;
    if den == 0.0 {
        out.push(to);
        return;
    }
    let mut coef = (num / den).max(0.0).sqrt();
    if large_arc == sweep {
        coef = -coef;
    }
    let cxp = coef * rx * y1p / ry;
    let cyp = -coef * ry * x1p / rx;
    let cx = cos_phi * cxp - sin_phi * cyp + (from.x + to.x) / 2.0;
    let cy = sin_phi * cxp + cos_phi * cyp + (from.y + to.y) / 2.0;

    let ux = (x1p - cxp) / rx;
    let uy = (y1p - cyp) / ry;
    let vx = (-x1p - cxp) / rx;
    let vy = (-y1p - cyp) / ry;
    let theta1 = uy.atan2(ux);
    let mut delta = (ux * vy - uy * vx).atan2(ux * vx + uy * vy);
    if !sweep && delta > 0.0 {
        delta -= TAU;
    } else if sweep && delta < 0.0 {
        delta += TAU;
    }

    // Tolerance keeps an exact quarter turn from rounding up to an extra segment
    let segments = (delta.abs() / FRAC_PI_4 - 1e-3).ceil().max(1.0) as usize;
    for i in 1..segments {
        let t = theta1 + delta * (i as f32) / (segments as f32);
        let (sin_t, cos_t) = t.sin_cos();
        out.push(Point::from_xy(
            cx + rx * cos_t * cos_phi - ry * sin_t * sin_phi,
            cy + rx * cos_t * sin_phi + ry * sin_t * cos_phi,
        ));
    }
    out.push(to);
}

/// Byte cursor over path data.
struct Lexer<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Lexer<'a> {
    fn new(data: &'a str) -> Self {
        Self {
            data: data.as_bytes(),
            pos: 0,
        }
    }

    fn skip_separators(&mut self) {
        while self.pos < self.data.len()
            && (self.data[self.pos].is_ascii_whitespace() || self.data[self.pos] == b',')
        {
            self.pos += 1;
        }
    }

    fn at_end(&mut self) -> bool {
        self.skip_separators();
        self.pos >= self.data.len()
    }

    /// Consumes a command letter if one is next.
    fn next_command(&mut self) -> Option<u8> {
        self.skip_separators();
        let byte = *self.data.get(self.pos)?;
        let is_command = byte.is_ascii_alphabetic() && byte != b'e' && byte != b'E';
        if is_command {
            self.pos += 1;
            Some(byte)
        } else {
            None
        }
    }

    fn number(&mut self) -> Option<f32> {
        self.skip_separators();
        let start = self.pos;
        let bytes = self.data;
        let mut end = start;

        if matches!(bytes.get(end), Some(b'+' | b'-')) {
            end += 1;
        }
        let mut seen_dot = false;
        let mut seen_digit = false;
        while let Some(&b) = bytes.get(end) {
            if b.is_ascii_digit() {
                seen_digit = true;
            } else if b == b'.' && !seen_dot {
                seen_dot = true;
            } else {
                break;
            }
            end += 1;
        }
        if !seen_digit {
            return None;
        }
        if matches!(bytes.get(end), Some(b'e' | b'E')) {
            let mut exp_end = end + 1;
            if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
                exp_end += 1;
            }
            if bytes.get(exp_end).is_some_and(u8::is_ascii_digit) {
                while bytes.get(exp_end).is_some_and(u8::is_ascii_digit) {
                    exp_end += 1;
                }
                end = exp_end;
            }
        }

        let text = std::str::from_utf8(&bytes[start..end]).ok()?;
        let value = text.parse::<f32>().ok()?;
        self.pos = end;
        Some(value)
    }

    /// Arc flags may be written without separators (`a1 1 0 011 1`).
    fn flag(&mut self) -> Option<bool> {
        self.skip_separators();
        let value = match self.data.get(self.pos)? {
            b'0' => false,
            b'1' => true,
            _ => return None,
        };
        self.pos += 1;
        Some(value)
    }

    fn point(&mut self, base: Point) -> Option<Point> {
        let x = self.number()?;
        let y = self.number()?;
        Some(Point::from_xy(base.x + x, base.y + y))
    }
}

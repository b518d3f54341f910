// SPDX-License-Identifier: MPL-2.0
//! SVG `transform` attribute parsing.

use tiny_skia::Transform;

/// Parses a transform list such as `translate(10 5) rotate(45, 36, 36)`.
///
/// Returns `None` if any entry is malformed; callers treat that as "no
/// transform" rather than dropping the element.
pub fn parse_transform(value: &str) -> Option<Transform> {
    let mut result = Transform::identity();
    let mut rest = value.trim();

    while !rest.is_empty() {
        let open = rest.find('(')?;
        let close = rest.find(')')?;
        if close < open {
            return None;
        }
        let name = rest[..open].trim().trim_start_matches(',').trim();
        let args = parse_args(&rest[open + 1..close])?;
        result = result.pre_concat(single_transform(name, &args)?);
        rest = rest[close + 1..].trim_start_matches(|c: char| c == ',' || c.is_whitespace());
    }

    Some(result)
}

fn parse_args(args: &str) -> Option<Vec<f32>> {
    args.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<f32>().ok())
        .collect()
}

fn single_transform(name: &str, args: &[f32]) -> Option<Transform> {
    match (name, args) {
        ("matrix", &[a, b, c, d, e, f]) => Some(Transform::from_row(a, b, c, d, e, f)),
        ("translate", &[tx]) => Some(Transform::from_translate(tx, 0.0)),
        ("translate", &[tx, ty]) => Some(Transform::from_translate(tx, ty)),
        ("scale", &[s]) => Some(Transform::from_scale(s, s)),
        ("scale", &[sx, sy]) => Some(Transform::from_scale(sx, sy)),
        ("rotate", &[angle]) => Some(Transform::from_rotate(angle)),
        ("rotate", &[angle, cx, cy]) => Some(
            Transform::from_translate(cx, cy)
                .pre_concat(Transform::from_rotate(angle))
                .pre_concat(Transform::from_translate(-cx, -cy)),
        ),
        ("skewX", &[angle]) => Some(Transform::from_skew(angle.to_radians().tan(), 0.0)),
        ("skewY", &[angle]) => Some(Transform::from_skew(0.0, angle.to_radians().tan())),
        _ => None,
    }
}

/// Returns whether the transform keeps axis-aligned shapes axis-aligned.
pub fn is_axis_aligned(ts: &Transform) -> bool {
    ts.kx == 0.0 && ts.ky == 0.0
}

/// Factor by which the transform scales lengths on average (used for stroke widths).
pub fn mean_scale(ts: &Transform) -> f32 {
    (ts.sx * ts.sy - ts.kx * ts.ky).abs().sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{assert_abs_diff_eq, COORD_EPSILON};
    use tiny_skia::Point;

    fn apply(ts: Transform, x: f32, y: f32) -> Point {
        let mut points = [Point::from_xy(x, y)];
        ts.map_points(&mut points);
        points[0]
    }

    #[test]
    fn translate_with_single_argument_defaults_y_to_zero() {
        let ts = parse_transform("translate(5)").expect("valid transform");
        let p = apply(ts, 1.0, 1.0);
        assert_abs_diff_eq!(p.x, 6.0);
        assert_abs_diff_eq!(p.y, 1.0);
    }

    #[test]
    fn list_applies_rightmost_first() {
        // scale first, then translate
        let ts = parse_transform("translate(10,0) scale(2)").expect("valid transform");
        let p = apply(ts, 1.0, 1.0);
        assert_abs_diff_eq!(p.x, 12.0);
        assert_abs_diff_eq!(p.y, 2.0);
    }

    #[test]
    fn rotate_about_center_keeps_center_fixed() {
        let ts = parse_transform("rotate(90 36 36)").expect("valid transform");
        let center = apply(ts, 36.0, 36.0);
        assert_abs_diff_eq!(center.x, 36.0, epsilon = COORD_EPSILON * 10.0);
        assert_abs_diff_eq!(center.y, 36.0, epsilon = COORD_EPSILON * 10.0);

        let p = apply(ts, 46.0, 36.0);
        assert_abs_diff_eq!(p.x, 36.0, epsilon = COORD_EPSILON * 10.0);
        assert_abs_diff_eq!(p.y, 46.0, epsilon = COORD_EPSILON * 10.0);
        assert!(!is_axis_aligned(&ts));
    }

    #[test]
    fn matrix_maps_like_svg() {
        let ts = parse_transform("matrix(1 0 0 1 3 4)").expect("valid transform");
        let p = apply(ts, 1.0, 1.0);
        assert_abs_diff_eq!(p.x, 4.0);
        assert_abs_diff_eq!(p.y, 5.0);
        assert!(is_axis_aligned(&ts));
    }

    #[test]
    fn mean_scale_of_uniform_scale() {
        let ts = parse_transform("scale(3)").expect("valid transform");
        assert_abs_diff_eq!(mean_scale(&ts), 3.0, epsilon = COORD_EPSILON);
    }

    #[test]
    fn malformed_lists_are_rejected() {
        assert!(parse_transform("translate(1,").is_none());
        assert!(parse_transform("wobble(3)").is_none());
        assert!(parse_transform("scale(a)").is_none());
    }
}

//! Rotation, flip and coordinate-space mapping.
//!
//! Two rotation directions exist and every caller must pick one:
//!
//! - [`to_document`] places frame-local points into document space, turning
//!   them clockwise on screen by the shape's stored angle.
//! - [`to_local`] is the inverse, used to bring pointer samples into the
//!   shape's unrotated axes.
//!
//! Both are thin wrappers over [`rotate_points_about_point`], whose raw
//! sign convention (positive radians turn counter-clockwise on a y-down
//! screen) should not leak into callers.

use hvacdraw_core::constants::DIM_MAX;
use hvacdraw_core::{GeometryError, Point, Rect};

use crate::model::ExtraFlags;

/// Sine and cosine magnitudes below this snap to zero so that quarter
/// turns stay exact.
const TRIG_SNAP: f64 = 1e-4;

/// Rotate points in place about `center`.
///
/// A zero angle is a no-op. For angle `a` each point maps to
/// `x' = dx·cos a + dy·sin a + cx`, `y' = −dx·sin a + dy·cos a + cy`.
pub fn rotate_points_about_point(center: Point, radians: f64, points: &mut [Point]) {
    if radians == 0.0 {
        return;
    }

    let mut sin = radians.sin();
    let mut cos = radians.cos();
    if cos.abs() < TRIG_SNAP {
        cos = 0.0;
    }
    if sin.abs() < TRIG_SNAP {
        sin = 0.0;
    }

    for p in points.iter_mut() {
        let dx = p.x - center.x;
        let dy = p.y - center.y;
        p.x = dx * cos + dy * sin + center.x;
        p.y = -dx * sin + dy * cos + center.y;
    }
}

/// Rotate points in place about the center of `frame`.
pub fn rotate_points_about_center(frame: &Rect, radians: f64, points: &mut [Point]) {
    rotate_points_about_point(frame.center(), radians, points);
}

/// Map frame-local points into document space for a shape rotated by
/// `angle_deg`.
pub fn to_document(frame: &Rect, angle_deg: f64, points: &mut [Point]) {
    rotate_points_about_center(frame, -angle_deg.to_radians(), points);
}

/// Map document points into the unrotated axes of a shape rotated by
/// `angle_deg`.
pub fn to_local(frame: &Rect, angle_deg: f64, points: &mut [Point]) {
    rotate_points_about_center(frame, angle_deg.to_radians(), points);
}

/// Single-point form of [`to_local`] about an explicit center.
pub fn point_to_local(center: Point, angle_deg: f64, p: Point) -> Point {
    let mut pts = [p];
    rotate_points_about_point(center, angle_deg.to_radians(), &mut pts);
    pts[0]
}

/// Single-point form of [`to_document`] about an explicit center.
pub fn point_to_document(center: Point, angle_deg: f64, p: Point) -> Point {
    let mut pts = [p];
    rotate_points_about_point(center, -angle_deg.to_radians(), &mut pts);
    pts[0]
}

/// Bounding box of `frame` after rotating it by `angle_deg` about its center.
pub fn rotated_bounds(frame: &Rect, angle_deg: f64) -> Rect {
    if angle_deg == 0.0 {
        return *frame;
    }
    let mut corners = frame.to_polygon();
    to_document(frame, angle_deg, &mut corners);
    Rect::bounding(&corners).unwrap_or(*frame)
}

/// Normalize an angle into `[0, 360)`.
pub fn normalize_degrees(angle: f64) -> f64 {
    let a = angle % 360.0;
    if a < 0.0 {
        a + 360.0
    } else {
        a
    }
}

/// Map a dimension-space point (`0..=DIM_MAX`) onto `frame`.
pub fn map_dimension_to_frame(pt: Point, frame: &Rect) -> Point {
    Point::new(
        pt.x / DIM_MAX * frame.width + frame.x,
        pt.y / DIM_MAX * frame.height + frame.y,
    )
}

/// Exact inverse of [`map_dimension_to_frame`].
pub fn map_frame_to_dimension(pt: Point, frame: &Rect) -> Result<Point, GeometryError> {
    if frame.width == 0.0 || frame.height == 0.0 {
        return Err(GeometryError::DegenerateFrame {
            width: frame.width,
            height: frame.height,
        });
    }
    Ok(Point::new(
        (pt.x - frame.x) / frame.width * DIM_MAX,
        (pt.y - frame.y) / frame.height * DIM_MAX,
    ))
}

/// Mirror normalized `0..1` points according to the flip flags.
pub fn flip_normalized(points: &mut [Point], flags: ExtraFlags) {
    for p in points.iter_mut() {
        if flags.flip_horizontal() {
            p.x = 1.0 - p.x;
        }
        if flags.flip_vertical() {
            p.y = 1.0 - p.y;
        }
    }
}

/// Mirror a dimension-space point according to the flip flags.
pub fn flip_dimension_point(p: Point, flags: ExtraFlags) -> Point {
    Point::new(
        if flags.flip_horizontal() {
            DIM_MAX - p.x
        } else {
            p.x
        },
        if flags.flip_vertical() {
            DIM_MAX - p.y
        } else {
            p.y
        },
    )
}

/// Even-odd ray casting point-in-polygon test.
///
/// The polygon may or may not repeat its first point at the end.
pub fn point_in_polygon(p: &Point, poly: &[Point]) -> bool {
    let n = poly.len();
    if n < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let (pi, pj) = (poly[i], poly[j]);
        if (pi.y > p.y) != (pj.y > p.y) {
            let x_cross = (pj.x - pi.x) * (p.y - pi.y) / (pj.y - pi.y) + pi.x;
            if p.x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Distance from `p` to the segment `a`-`b`.
pub fn distance_to_segment(p: &Point, a: &Point, b: &Point) -> f64 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let len_sq = dx * dx + dy * dy;
    if len_sq == 0.0 {
        return p.distance_to(a);
    }
    let t = (((p.x - a.x) * dx + (p.y - a.y) * dy) / len_sq).clamp(0.0, 1.0);
    p.distance_to(&Point::new(a.x + t * dx, a.y + t * dy))
}

/// True when `p` lies within `tolerance` of any segment of the polyline.
pub fn point_near_polyline(p: &Point, poly: &[Point], tolerance: f64) -> bool {
    poly.windows(2)
        .any(|seg| distance_to_segment(p, &seg[0], &seg[1]) <= tolerance)
}

/// Axis of a scan line used by [`polygon_line_intersections`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanLine {
    /// The line `y = value`; intersections are reported as x values.
    Horizontal,
    /// The line `x = value`; intersections are reported as y values.
    Vertical,
}

/// Intersections of a closed polygon with an axis-aligned scan line.
///
/// Zero-length edges are skipped and hits closer than one unit to an
/// earlier hit are merged. At most three values are returned; callers
/// only look at the first two.
pub fn polygon_line_intersections(poly: &[Point], value: f64, scan: ScanLine) -> Vec<f64> {
    let mut hits: Vec<f64> = Vec::with_capacity(3);
    let n = poly.len();
    if n < 2 {
        return hits;
    }

    for i in 0..n {
        let a = poly[i];
        let b = poly[(i + 1) % n];
        if a.approx_eq(&b, 1e-9) {
            continue;
        }

        // Swap axes so the scan is always "u = value", solving for v.
        let (au, av, bu, bv) = match scan {
            ScanLine::Horizontal => (a.y, a.x, b.y, b.x),
            ScanLine::Vertical => (a.x, a.y, b.x, b.y),
        };
        if value < au.min(bu) || value > au.max(bu) {
            continue;
        }
        let du = if bu - au == 0.0 { 1.0 } else { bu - au };
        let v = (bv - av) / du * (value - au) + av;
        if v < av.min(bv) || v > av.max(bv) {
            continue;
        }
        if hits.iter().any(|h| (h - v).abs() <= 1.0) {
            continue;
        }
        hits.push(v);
        if hits.len() == 3 {
            break;
        }
    }
    hits
}

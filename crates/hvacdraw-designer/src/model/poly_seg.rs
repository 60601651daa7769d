//! Segment lists for outlines that need true curves or per-segment editing.
//!
//! A [`PolyList`] is an ordered sequence of segments whose endpoints are
//! stored relative to the list origin. The first segment only positions
//! the pen. Arc segments are flattened with `lyon`'s arc sampler.

use hvacdraw_core::{Point, Rect};
use lyon::geom::{point, vector, Angle, Arc};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Segment geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SegKind {
    /// Straight line to `pt`.
    Line,
    /// Circular arc to `pt`; `param` is the signed bow (sagitta) of the arc
    /// measured from the chord midpoint.
    ArcLine,
    /// Quarter ellipse to `pt`, bowing toward the quadrant in `short_ref`.
    ArcSegLine,
}

/// Quadrant tag of an elliptical corner segment: which frame corner the
/// segment rounds off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShortRef {
    #[default]
    None,
    TopLeft,
    TopRight,
    BottomRight,
    BottomLeft,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PolySeg {
    pub kind: SegKind,
    /// Endpoint relative to the list origin.
    pub pt: Point,
    #[serde(default)]
    pub param: f64,
    #[serde(default)]
    pub short_ref: ShortRef,
}

impl PolySeg {
    pub fn line(pt: Point) -> Self {
        Self {
            kind: SegKind::Line,
            pt,
            param: 0.0,
            short_ref: ShortRef::None,
        }
    }

    pub fn arc(pt: Point, bow: f64) -> Self {
        Self {
            kind: SegKind::ArcLine,
            pt,
            param: bow,
            short_ref: ShortRef::None,
        }
    }

    pub fn corner(pt: Point, quadrant: ShortRef) -> Self {
        Self {
            kind: SegKind::ArcSegLine,
            pt,
            param: 0.0,
            short_ref: quadrant,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PolyList {
    /// Origin the segment endpoints are relative to.
    pub offset: Point,
    pub segs: Vec<PolySeg>,
    pub closed: bool,
}

impl PolyList {
    /// Straight-segment list through `points` (absolute coordinates).
    pub fn from_points(points: &[Point], offset: Point, closed: bool) -> Self {
        let mut list = Self {
            offset,
            segs: points
                .iter()
                .map(|p| PolySeg::line(Point::new(p.x - offset.x, p.y - offset.y)))
                .collect(),
            closed,
        };
        if closed {
            list.close();
        }
        list
    }

    /// Rounded-rectangle outline with elliptical corners of size `corner`,
    /// relative to the frame origin.
    #[cfg(test)]
    pub(crate) fn rounded_rect(width: f64, height: f64, corner: f64) -> Self {
        let c = corner.min(width / 2.0).min(height / 2.0).max(0.0);
        let segs = vec![
            PolySeg::line(Point::new(c, 0.0)),
            PolySeg::line(Point::new(width - c, 0.0)),
            PolySeg::corner(Point::new(width, c), ShortRef::TopRight),
            PolySeg::line(Point::new(width, height - c)),
            PolySeg::corner(Point::new(width - c, height), ShortRef::BottomRight),
            PolySeg::line(Point::new(c, height)),
            PolySeg::corner(Point::new(0.0, height - c), ShortRef::BottomLeft),
            PolySeg::line(Point::new(0.0, c)),
            PolySeg::corner(Point::new(c, 0.0), ShortRef::TopLeft),
        ];
        Self {
            offset: Point::default(),
            segs,
            closed: true,
        }
    }

    pub fn len(&self) -> usize {
        self.segs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segs.is_empty()
    }

    /// Make the last endpoint coincide with the first.
    pub fn close(&mut self) {
        self.closed = true;
        if let (Some(first), Some(last)) = (self.segs.first().copied(), self.segs.last()) {
            if !first.pt.approx_eq(&last.pt, 1e-9) {
                self.segs.push(PolySeg::line(first.pt));
            }
        }
    }

    /// For a closed list, first and last endpoints coincide.
    pub fn is_consistent(&self) -> bool {
        if !self.closed {
            return true;
        }
        match (self.segs.first(), self.segs.last()) {
            (Some(first), Some(last)) => first.pt.approx_eq(&last.pt, 1e-6),
            _ => true,
        }
    }

    /// Flatten to absolute points, using `arc_samples` points per arc.
    pub fn to_points(&self, arc_samples: usize) -> Vec<Point> {
        let mut out = Vec::with_capacity(self.segs.len() * 2);
        let Some(first) = self.segs.first() else {
            return out;
        };
        let mut current = first.pt;
        out.push(current);

        for seg in &self.segs[1..] {
            match seg.kind {
                SegKind::Line => out.push(seg.pt),
                SegKind::ArcLine => flatten_bow(current, seg.pt, seg.param, arc_samples, &mut out),
                SegKind::ArcSegLine => {
                    flatten_corner(current, seg.pt, seg.short_ref, arc_samples, &mut out)
                }
            }
            current = seg.pt;
        }

        for p in out.iter_mut() {
            p.x += self.offset.x;
            p.y += self.offset.y;
        }
        out
    }

    /// Scale endpoints (and the origin) by `sx`, `sy`. Circular bows scale
    /// by the geometric mean of the two factors.
    pub fn scale(&mut self, sx: f64, sy: f64) {
        self.offset = Point::new(self.offset.x * sx, self.offset.y * sy);
        let bow_scale = (sx * sy).abs().sqrt();
        for seg in &mut self.segs {
            seg.pt = Point::new(seg.pt.x * sx, seg.pt.y * sy);
            if seg.kind == SegKind::ArcLine {
                seg.param *= bow_scale;
            }
        }
    }

    /// Mirror the list inside a `width × height` box.
    pub fn mirror(&mut self, horizontal: bool, width: f64, height: f64) {
        for seg in &mut self.segs {
            if horizontal {
                seg.pt.x = width - seg.pt.x;
            } else {
                seg.pt.y = height - seg.pt.y;
            }
            // Mirroring reverses the winding, so bows change side.
            seg.param = -seg.param;
            seg.short_ref = match (seg.short_ref, horizontal) {
                (ShortRef::TopLeft, true) => ShortRef::TopRight,
                (ShortRef::TopRight, true) => ShortRef::TopLeft,
                (ShortRef::BottomLeft, true) => ShortRef::BottomRight,
                (ShortRef::BottomRight, true) => ShortRef::BottomLeft,
                (ShortRef::TopLeft, false) => ShortRef::BottomLeft,
                (ShortRef::BottomLeft, false) => ShortRef::TopLeft,
                (ShortRef::TopRight, false) => ShortRef::BottomRight,
                (ShortRef::BottomRight, false) => ShortRef::TopRight,
                (ShortRef::None, _) => ShortRef::None,
            };
        }
    }

    /// True when every segment is a straight line.
    pub fn is_straight(&self) -> bool {
        self.segs.iter().all(|s| s.kind == SegKind::Line)
    }

    /// Bounding box of the flattened outline in absolute coordinates.
    pub fn bounds(&self, arc_samples: usize) -> Option<Rect> {
        Rect::bounding(&self.to_points(arc_samples))
    }

    /// Endpoints of segment `index` (`index >= 1`), relative to the origin.
    pub fn segment(&self, index: usize) -> Option<(Point, Point)> {
        if index == 0 || index >= self.segs.len() {
            return None;
        }
        Some((self.segs[index - 1].pt, self.segs[index].pt))
    }

    /// Drag segment `index` by `(dx, dy)`.
    ///
    /// Horizontal segments only move vertically and vertical segments only
    /// move horizontally, so neighbouring segments keep their direction.
    /// Returns false when the index does not name a segment.
    pub fn move_segment(&mut self, index: usize, dx: f64, dy: f64) -> bool {
        let Some((a, b)) = self.segment(index) else {
            return false;
        };
        let (mx, my) = if (a.y - b.y).abs() < 1e-9 {
            (0.0, dy)
        } else if (a.x - b.x).abs() < 1e-9 {
            (dx, 0.0)
        } else {
            (dx, dy)
        };

        let last = self.segs.len() - 1;
        for i in [index - 1, index] {
            self.segs[i].pt = self.segs[i].pt.offset(mx, my);
            if self.closed && (i == 0 || i == last) {
                let twin = if i == 0 { last } else { 0 };
                if twin != index - 1 && twin != index {
                    self.segs[twin].pt = self.segs[i].pt;
                }
            }
        }
        true
    }
}

/// Circular arc from `a` to `b` with signed sagitta `bow`.
fn flatten_bow(a: Point, b: Point, bow: f64, samples: usize, out: &mut Vec<Point>) {
    let chord = a.distance_to(&b);
    if bow.abs() < 1e-9 || chord < 1e-9 {
        out.push(b);
        return;
    }

    let mid = Point::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0);
    let (nx, ny) = (-(b.y - a.y) / chord, (b.x - a.x) / chord);
    let apex = Point::new(mid.x + nx * bow, mid.y + ny * bow);
    let radius = (chord * chord / 4.0 + bow * bow) / (2.0 * bow.abs());
    let center_offset = bow - bow.signum() * radius;
    let center = Point::new(mid.x + nx * center_offset, mid.y + ny * center_offset);

    let start = (a.y - center.y).atan2(a.x - center.x);
    let end = (b.y - center.y).atan2(b.x - center.x);
    let apex_angle = (apex.y - center.y).atan2(apex.x - center.x);
    let minor = wrap_angle(end - start);
    let major = minor - minor.signum() * 2.0 * PI;
    let passes_apex = |sweep: f64| {
        let mid = start + sweep / 2.0;
        wrap_angle(mid - apex_angle).abs() < 1e-6
    };
    let sweep = if passes_apex(minor) { minor } else { major };

    push_arc(center, radius, radius, start, sweep, samples, out);
    if let Some(last) = out.last_mut() {
        *last = b;
    }
}

/// Quarter ellipse from `a` to `b` rounding off the `quadrant` corner.
fn flatten_corner(a: Point, b: Point, quadrant: ShortRef, samples: usize, out: &mut Vec<Point>) {
    let (min_x, max_x) = (a.x.min(b.x), a.x.max(b.x));
    let (min_y, max_y) = (a.y.min(b.y), a.y.max(b.y));
    let center = match quadrant {
        ShortRef::TopLeft => Point::new(max_x, max_y),
        ShortRef::TopRight => Point::new(min_x, max_y),
        ShortRef::BottomRight => Point::new(min_x, min_y),
        ShortRef::BottomLeft => Point::new(max_x, min_y),
        ShortRef::None => {
            out.push(b);
            return;
        }
    };
    let rx = max_x - min_x;
    let ry = max_y - min_y;
    if rx < 1e-9 || ry < 1e-9 {
        out.push(b);
        return;
    }

    let start = ((a.y - center.y) / ry).atan2((a.x - center.x) / rx);
    let end = ((b.y - center.y) / ry).atan2((b.x - center.x) / rx);
    push_arc(center, rx, ry, start, wrap_angle(end - start), samples, out);
    if let Some(last) = out.last_mut() {
        *last = b;
    }
}

fn push_arc(
    center: Point,
    rx: f64,
    ry: f64,
    start: f64,
    sweep: f64,
    samples: usize,
    out: &mut Vec<Point>,
) {
    let arc = Arc {
        center: point(center.x, center.y),
        radii: vector(rx, ry),
        start_angle: Angle::radians(start),
        sweep_angle: Angle::radians(sweep),
        x_rotation: Angle::radians(0.0),
    };
    let samples = samples.max(2);
    for i in 1..samples {
        let p = arc.sample(i as f64 / (samples - 1) as f64);
        out.push(Point::new(p.x, p.y));
    }
}

/// Wrap into `(-PI, PI]`.
fn wrap_angle(angle: f64) -> f64 {
    let mut a = angle % (2.0 * PI);
    if a <= -PI {
        a += 2.0 * PI;
    } else if a > PI {
        a -= 2.0 * PI;
    }
    a
}

//! Perimeter and hook-point resolution.
//!
//! Connection targets are expressed in dimension space (`0..=DIM_MAX` on
//! both axes, independent of the frame size). This module maps them onto
//! a shape's actual outline in document space:
//!
//! - plain shapes map the target linearly onto the frame;
//! - rounded rectangles pull corner targets inward and slide edge targets
//!   that fall in a corner's sweep onto the rounded outline;
//! - the result is rotated into document space unless unrotated output is
//!   requested.

use hvacdraw_core::constants::{CUSTOM_HOOK_BASE, DIM_MAX, ROUND_FACTOR};
use hvacdraw_core::{HookError, Point};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::trace;

use crate::model::{Hookable, PolyPointsOptions, Shape};
use crate::transform::{
    flip_dimension_point, map_dimension_to_frame, map_frame_to_dimension,
    polygon_line_intersections, to_document, ScanLine,
};

/// Hook point identifier.
///
/// Named points have fixed ids; ids from `CUSTOM_HOOK_BASE` upward index
/// into the shape's connect points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HookId(pub u32);

impl HookId {
    pub const TOP_LEFT: HookId = HookId(1);
    pub const TOP_RIGHT: HookId = HookId(2);
    pub const BOTTOM_LEFT: HookId = HookId(3);
    pub const BOTTOM_RIGHT: HookId = HookId(4);
    pub const TOP_CENTER: HookId = HookId(5);
    pub const BOTTOM_CENTER: HookId = HookId(6);
    pub const LEFT_CENTER: HookId = HookId(7);
    pub const RIGHT_CENTER: HookId = HookId(8);

    pub const CORNER_TOP_LEFT: HookId = HookId(201);
    pub const CORNER_TOP_RIGHT: HookId = HookId(202);
    pub const CORNER_BOTTOM_LEFT: HookId = HookId(203);
    pub const CORNER_BOTTOM_RIGHT: HookId = HookId(204);
    pub const EDGE_TOP: HookId = HookId(205);
    pub const EDGE_BOTTOM: HookId = HookId(206);
    pub const EDGE_LEFT: HookId = HookId(207);
    pub const EDGE_RIGHT: HookId = HookId(208);
    pub const CENTER: HookId = HookId(209);

    /// Attach point, mirrored with the shape.
    pub const ATTACH: HookId = HookId(220);
    /// Attach point in unflipped coordinates.
    pub const ATTACH_FIXED: HookId = HookId(221);

    pub fn custom(index: usize) -> HookId {
        HookId(CUSTOM_HOOK_BASE + index as u32)
    }

    pub fn is_custom(self) -> bool {
        self.0 >= CUSTOM_HOOK_BASE
    }

    /// Dimension-space position of the fixed named points.
    fn named_point(self) -> Option<Point> {
        let (x, y) = match self {
            HookId::CORNER_TOP_LEFT => (0.0, 0.0),
            HookId::CORNER_TOP_RIGHT => (DIM_MAX, 0.0),
            HookId::CORNER_BOTTOM_LEFT => (0.0, DIM_MAX),
            HookId::CORNER_BOTTOM_RIGHT => (DIM_MAX, DIM_MAX),
            HookId::EDGE_TOP => (DIM_MAX / 2.0, 0.0),
            HookId::EDGE_BOTTOM => (DIM_MAX / 2.0, DIM_MAX),
            HookId::EDGE_LEFT => (0.0, DIM_MAX / 2.0),
            HookId::EDGE_RIGHT => (DIM_MAX, DIM_MAX / 2.0),
            HookId::CENTER => (DIM_MAX / 2.0, DIM_MAX / 2.0),
            _ => return None,
        };
        Some(Point::new(x, y))
    }

    /// Fallback positions for ids 1..=4 when the shape does not list them.
    fn legacy_point(self) -> Option<Point> {
        let (x, y) = match self.0 {
            1 => (DIM_MAX / 2.0, 0.0),
            2 => (DIM_MAX, DIM_MAX / 2.0),
            3 => (DIM_MAX / 2.0, DIM_MAX),
            4 => (0.0, DIM_MAX / 2.0),
            _ => return None,
        };
        Some(Point::new(x, y))
    }
}

impl fmt::Display for HookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A hook point offered by a shape, in dimension space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HookPoint {
    pub id: HookId,
    pub point: Point,
}

/// A resolved point in document space, carrying the id of its target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerimeterPoint {
    pub point: Point,
    pub id: Option<HookId>,
}

/// A dimension-space target, optionally tagged with a hook id.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetPoint {
    pub point: Point,
    pub id: Option<HookId>,
}

impl TargetPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            point: Point::new(x, y),
            id: None,
        }
    }

    pub fn with_id(point: Point, id: HookId) -> Self {
        Self {
            point,
            id: Some(id),
        }
    }
}

impl From<Point> for TargetPoint {
    fn from(point: Point) -> Self {
        Self { point, id: None }
    }
}

/// Points a connector may hook to.
///
/// Shapes using explicit connect points expose one hook per point;
/// everything else offers the four edge midpoints.
pub fn hook_points(shape: &Shape) -> Vec<HookPoint> {
    if shape.flags.use_connect() && !shape.connect_points.is_empty() {
        return shape
            .connect_points
            .iter()
            .enumerate()
            .map(|(i, p)| HookPoint {
                id: HookId::custom(i),
                point: *p,
            })
            .collect();
    }

    let half = DIM_MAX / 2.0;
    vec![
        HookPoint {
            id: HookId::TOP_CENTER,
            point: Point::new(half, 0.0),
        },
        HookPoint {
            id: HookId::RIGHT_CENTER,
            point: Point::new(DIM_MAX, half),
        },
        HookPoint {
            id: HookId::BOTTOM_CENTER,
            point: Point::new(half, DIM_MAX),
        },
        HookPoint {
            id: HookId::LEFT_CENTER,
            point: Point::new(0.0, half),
        },
    ]
}

/// Connection targets offered to a connector being dropped on the shape.
///
/// Explicit connect points win (mirrored by the flip flags). Polygons offer
/// the four edge midpoints; other kinds offer sixteen points at quarter
/// divisions of the perimeter, clockwise from the top-left corner.
pub fn target_points(shape: &Shape) -> Vec<Point> {
    if shape.flags.use_connect() && !shape.connect_points.is_empty() {
        return shape
            .connect_points
            .iter()
            .map(|p| flip_dimension_point(*p, shape.extra_flags))
            .collect();
    }

    let d = DIM_MAX;
    let raw: &[(f64, f64)] = if shape.kind.as_polygon().is_some() {
        &[(0.5, 0.0), (1.0, 0.5), (0.5, 1.0), (0.0, 0.5)]
    } else {
        &[
            (0.0, 0.0),
            (0.25, 0.0),
            (0.5, 0.0),
            (0.75, 0.0),
            (1.0, 0.0),
            (1.0, 0.25),
            (1.0, 0.5),
            (1.0, 0.75),
            (1.0, 1.0),
            (0.75, 1.0),
            (0.5, 1.0),
            (0.25, 1.0),
            (0.0, 1.0),
            (0.0, 0.75),
            (0.0, 0.5),
            (0.0, 0.25),
        ]
    };
    raw.iter().map(|&(x, y)| Point::new(x * d, y * d)).collect()
}

/// Dimension-space target on the outline closest to a document point,
/// used for continuous connections.
///
/// The point is brought into the shape's local axes, optionally snapped to
/// `grid` and clamped to the frame, then projected onto each outline edge
/// along the axis the edge is least aligned with.
pub fn nearest_target(shape: &Shape, p: Point, grid: Option<f64>) -> Option<Point> {
    let frame = shape.frame();
    let mut local = shape.to_local_point(p);
    if let Some(spacing) = grid.filter(|s| *s > 0.0) {
        local.x = ((local.x / spacing).round() * spacing).clamp(frame.x, frame.right());
        local.y = ((local.y / spacing).round() * spacing).clamp(frame.y, frame.bottom());
    }

    let outline = shape.poly_points(PolyPointsOptions::absolute());
    let mut best: Option<(f64, Point)> = None;
    for edge in outline.windows(2) {
        let (a, b) = (edge[0], edge[1]);
        if a.approx_eq(&b, 1e-9) {
            continue;
        }
        let dx = if b.x - a.x == 0.0 { 1.0 } else { b.x - a.x };
        let dy = if b.y - a.y == 0.0 { 1.0 } else { b.y - a.y };
        let (hit, distance) = if (dy / dx).abs() > 1.0 {
            let x = a.x + (local.y - a.y) * (dx / dy);
            (Point::new(x, local.y), (x - local.x).abs())
        } else {
            let y = a.y + (local.x - a.x) * (dy / dx);
            (Point::new(local.x, y), (y - local.y).abs())
        };

        let span = hvacdraw_core::Rect::from_corners(a, b).inflate(1.0, 1.0);
        let within = hit.x >= span.x
            && hit.x <= span.right()
            && hit.y >= span.y
            && hit.y <= span.bottom();
        if within && best.map_or(true, |(d, _)| distance < d) {
            best = Some((distance, hit));
        }
    }

    best.and_then(|(_, hit)| map_frame_to_dimension(hit, &frame).ok())
}

/// Resolve dimension-space targets to points on the shape's perimeter.
///
/// # Arguments
/// * `shape` - Shape whose frame and outline are used
/// * `targets` - Dimension-space targets
/// * `hook` - Hook being resolved, if any; attach hooks skip corner logic
/// * `unrotated` - Return frame-axis points instead of document points
///
/// # Errors
/// `InvalidTarget` when `targets` is empty or holds non-finite values.
pub fn perimeter_points(
    shape: &Shape,
    targets: &[TargetPoint],
    hook: Option<HookId>,
    unrotated: bool,
) -> Result<Vec<PerimeterPoint>, HookError> {
    if targets.is_empty() {
        return Err(HookError::InvalidTarget {
            reason: "empty target list".to_string(),
        });
    }
    if let Some(bad) = targets
        .iter()
        .find(|t| !(t.point.x.is_finite() && t.point.y.is_finite()))
    {
        return Err(HookError::InvalidTarget {
            reason: format!("non-finite target {}", bad.point),
        });
    }

    let frame = shape.frame();
    let mut out: Vec<PerimeterPoint> = targets
        .iter()
        .map(|t| PerimeterPoint {
            point: map_dimension_to_frame(t.point, &frame),
            id: t.id,
        })
        .collect();

    let rounded = shape.kind.rounded_corner(&shape.outline_context()).is_some();
    if rounded && !shape.flags.use_connect() && hook != Some(HookId::ATTACH) {
        follow_rounded_corners(shape, targets, &mut out);
    }

    if !unrotated && shape.rotation != 0.0 {
        let mut pts: Vec<Point> = out.iter().map(|p| p.point).collect();
        to_document(&frame, shape.rotation, &mut pts);
        for (p, rotated) in out.iter_mut().zip(pts) {
            p.point = rotated;
        }
    }

    trace!(shape = %shape.id, count = out.len(), "Perimeter points resolved");
    Ok(out)
}

fn follow_rounded_corners(shape: &Shape, targets: &[TargetPoint], out: &mut [PerimeterPoint]) {
    let inset = shape.corner_size() * ROUND_FACTOR;
    let outline = shape.poly_points(PolyPointsOptions::absolute());
    let d = DIM_MAX;

    for (t, p) in targets.iter().zip(out.iter_mut()) {
        let (tx, ty) = (t.point.x, t.point.y);
        let pt = &mut p.point;
        if tx == 0.0 && ty == 0.0 {
            pt.x += inset;
            pt.y += inset;
        } else if tx == 0.0 && ty == d {
            pt.x += inset;
            pt.y -= inset;
        } else if tx == d && ty == 0.0 {
            pt.x -= inset;
            pt.y += inset;
        } else if tx == d && ty == d {
            pt.x -= inset;
            pt.y -= inset;
        } else if tx < d / 4.0 {
            if let Some(x) = extreme(&outline, pt.y, ScanLine::Horizontal, f64::min) {
                pt.x = x;
            }
        } else if tx > 3.0 * d / 4.0 {
            if let Some(x) = extreme(&outline, pt.y, ScanLine::Horizontal, f64::max) {
                pt.x = x;
            }
        } else if ty < d / 4.0 {
            if let Some(y) = extreme(&outline, pt.x, ScanLine::Vertical, f64::min) {
                pt.y = y;
            }
        } else if ty > 3.0 * d / 4.0 {
            if let Some(y) = extreme(&outline, pt.x, ScanLine::Vertical, f64::max) {
                pt.y = y;
            }
        }
    }
}

/// First two scan hits reduced with `pick`.
fn extreme(outline: &[Point], value: f64, scan: ScanLine, pick: fn(f64, f64) -> f64) -> Option<f64> {
    let hits = polygon_line_intersections(outline, value, scan);
    let first = *hits.first()?;
    Some(hits.get(1).map_or(first, |second| pick(first, *second)))
}

/// Dimension-space position of a hook id on this shape.
fn hook_dimension_point(shape: &Shape, hook: HookId) -> Result<Point, HookError> {
    match hook {
        HookId::ATTACH => return Ok(flip_dimension_point(shape.attach_point, shape.extra_flags)),
        HookId::ATTACH_FIXED => return Ok(shape.attach_point),
        _ => {}
    }
    if let Some(p) = hook.named_point() {
        return Ok(p);
    }
    if let Some(hp) = hook_points(shape).into_iter().find(|hp| hp.id == hook) {
        return Ok(hp.point);
    }
    hook.legacy_point()
        .ok_or(HookError::UnknownHookPoint { id: hook.0 })
}

/// Document-space position of a hook on this shape.
pub fn hook_to_point(shape: &Shape, hook: HookId) -> Result<Point, HookError> {
    let dim = hook_dimension_point(shape, hook)?;
    let resolved = perimeter_points(shape, &[TargetPoint::with_id(dim, hook)], Some(hook), false)?;
    resolved
        .first()
        .map(|p| p.point)
        .ok_or_else(|| HookError::InvalidTarget {
            reason: format!("hook {} resolved to nothing", hook),
        })
}

//! Shape-parameter knob and dimension-line offset.

use hvacdraw_core::constants::RRECT_FIXED_DIM;
use hvacdraw_core::{ActionError, Point, EPSILON};

use super::{ActionSession, RejectReason, TrackContext, TrackOutcome};
use crate::model::{Shape, ShapeKindData};
use crate::vertex_gen::ShapeFamily;

/// How the pointer maps to `shape_param` for a given shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum ParamAxis {
    /// Rounded-rectangle corner, as a fraction of `min(w, h)` or of the
    /// fixed reference size.
    Corner { fixed: bool },
    /// Octagon cut, as a fraction of `min(w, h)`.
    OctagonCut,
    FromLeft,
    FromRight,
    FromTop,
    FromBottom,
}

pub(super) fn param_axis(shape: &Shape) -> Option<ParamAxis> {
    match &shape.kind {
        ShapeKindData::Rect(_) => Some(ParamAxis::Corner {
            fixed: shape.more_flags.fixed_rounded_rect(),
        }),
        ShapeKindData::Polygon(poly) if poly.poly_list.is_none() => {
            let axis = match poly.family? {
                ShapeFamily::Octagon => ParamAxis::OctagonCut,
                ShapeFamily::Parallelogram
                | ShapeFamily::ArrowLeft
                | ShapeFamily::Trapezoid
                | ShapeFamily::TrapezoidDown
                | ShapeFamily::Hexagon
                | ShapeFamily::PentagonLeft
                | ShapeFamily::Storage
                | ShapeFamily::Display => ParamAxis::FromLeft,
                ShapeFamily::ArrowRight | ShapeFamily::Delay => ParamAxis::FromRight,
                ShapeFamily::ArrowTop | ShapeFamily::Input => ParamAxis::FromTop,
                ShapeFamily::ArrowBottom | ShapeFamily::Pentagon | ShapeFamily::Document => {
                    ParamAxis::FromBottom
                }
                ShapeFamily::Diamond
                | ShapeFamily::Terminal
                | ShapeFamily::Triangle
                | ShapeFamily::TriangleDown => return None,
            };
            Some(axis)
        }
        _ => None,
    }
}

/// Parameter value for a knob dragged to `local`, a point relative to the
/// frame origin in the shape's unrotated axes.
///
/// Mirrored shapes read the pointer mirrored so the knob follows the
/// visible outline. Returns `None` for shapes without a parameter.
pub fn modify_param(shape: &Shape, local: Point) -> Option<f64> {
    let axis = param_axis(shape)?;
    let frame = shape.frame();
    let (w, h) = (frame.width, frame.height);

    let mut p = local;
    if shape.extra_flags.flip_horizontal() {
        p.x = w - p.x;
    }
    if shape.extra_flags.flip_vertical() {
        p.y = h - p.y;
    }

    let min_side = w.min(h);
    let value = match axis {
        ParamAxis::Corner { fixed } => {
            let base = if fixed { RRECT_FIXED_DIM } else { min_side };
            if base <= 0.0 {
                return None;
            }
            (p.x / base).clamp(0.0, 0.5)
        }
        ParamAxis::OctagonCut => {
            if min_side <= 0.0 {
                return None;
            }
            (p.x / min_side).clamp(0.0, 0.5)
        }
        ParamAxis::FromLeft => p.x.clamp(0.0, w),
        ParamAxis::FromRight => (w - p.x).clamp(0.0, w),
        ParamAxis::FromTop => p.y.clamp(0.0, h),
        ParamAxis::FromBottom => (h - p.y).clamp(0.0, h),
    };
    Some(value)
}

pub(super) fn track_modify(
    shape: &mut Shape,
    session: &mut ActionSession,
    ctx: &TrackContext<'_>,
    pointer: Point,
) -> Result<TrackOutcome, ActionError> {
    let local = session.local_pointer(pointer);
    let frame = shape.frame();
    let relative = Point::new(local.x - frame.x, local.y - frame.y);
    let Some(param) = modify_param(shape, relative) else {
        return Ok(TrackOutcome::Rejected(RejectReason::NoChange));
    };
    if (param - shape.shape_param).abs() < EPSILON {
        return Ok(TrackOutcome::accepted(shape));
    }

    let before = shape.clone();
    shape.set_shape_param(param)?;
    if !ctx.text_fits(shape) {
        *shape = before;
        return Ok(TrackOutcome::Rejected(RejectReason::TextDoesNotFit));
    }
    Ok(TrackOutcome::accepted(shape))
}

/// Slide the dimension line perpendicular to the measured edge.
pub(super) fn track_dimension(
    shape: &mut Shape,
    session: &mut ActionSession,
    pointer: Point,
) -> Result<TrackOutcome, ActionError> {
    let local = session.local_pointer(pointer);
    shape.dimension_offset = session.start_dimension_offset + (local.y - session.start_local.y);
    Ok(TrackOutcome::accepted(shape))
}

//! Rotation knob.

use hvacdraw_core::{ActionError, Point, Rect};

use super::{ActionSession, RejectReason, TrackContext, TrackOutcome};
use crate::model::{PolyPointsOptions, Shape};
use crate::transform::{normalize_degrees, to_document};

/// Angle of `pointer` around `pivot`, clockwise on screen from the
/// positive x axis, in `[0, 360)`.
pub(super) fn pointer_angle(pivot: Point, pointer: Point) -> Option<f64> {
    let dx = pointer.x - pivot.x;
    let dy = pointer.y - pivot.y;
    if dx == 0.0 && dy == 0.0 {
        return None;
    }
    Some(normalize_degrees(dy.atan2(dx).to_degrees()))
}

/// Round `angle` to the nearest multiple of `increment`.
pub(super) fn snap_angle(angle: f64, increment: f64) -> f64 {
    if increment <= 0.0 {
        return angle;
    }
    normalize_degrees((angle / increment).round() * increment)
}

/// Rotate toward the pointer. Angles whose rotated outline would leave
/// the document are skipped without changing the shape.
pub(super) fn track_rotate(
    shape: &mut Shape,
    session: &mut ActionSession,
    ctx: &TrackContext<'_>,
    pointer: Point,
) -> Result<TrackOutcome, ActionError> {
    let Some(mut angle) = pointer_angle(session.pivot, pointer) else {
        return Ok(TrackOutcome::Rejected(RejectReason::NoChange));
    };
    if ctx.snaps_active(session.modifiers) {
        angle = snap_angle(angle, ctx.config.rotate_snap(session.modifiers.enhance));
    }

    let mut outline = shape.poly_points(PolyPointsOptions::absolute());
    to_document(&shape.frame(), angle, &mut outline);
    let Some(bounds) = Rect::bounding(&outline) else {
        return Ok(TrackOutcome::Rejected(RejectReason::Degenerate));
    };
    if ctx.out_of_bounds(&bounds) {
        return Ok(TrackOutcome::Rejected(RejectReason::OutOfBounds));
    }

    session.rotation_candidate = angle;
    if angle != shape.rotation {
        shape.set_rotation(angle);
    }
    Ok(TrackOutcome::accepted(shape))
}

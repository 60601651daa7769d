//! Dragging one segment of a polygon outline.

use hvacdraw_core::constants::{MAX_POLY_POINTS, MIN_DIM};
use hvacdraw_core::{ActionError, Point, Rect};

use super::resize::place;
use super::{ActionSession, RejectReason, TrackContext, TrackOutcome, TriggerKind};
use crate::model::{PolyList, PolyPointsOptions, Shape};
use crate::snap_guides::snap_value_to_grid;
use crate::transform::rotated_bounds;
use crate::vertex_gen::NormalizedPolygon;

const ARC_SAMPLES: usize = MAX_POLY_POINTS / 4;

/// Segment list to edit, relative to the frame origin. Polygons without an
/// explicit list are converted from their outline.
pub(super) fn editable_list(shape: &Shape, segment: usize) -> Result<PolyList, ActionError> {
    let list = match shape.kind.as_polygon().and_then(|p| p.poly_list.clone()) {
        Some(list) => list,
        None => PolyList::from_points(
            &shape.poly_points(PolyPointsOptions::absolute().relative()),
            Point::default(),
            true,
        ),
    };
    if list.segment(segment).is_none() {
        return Err(ActionError::UnsupportedTrigger {
            trigger: TriggerKind::MovePolySeg { segment }.to_string(),
            reason: format!("outline has no segment {}", segment),
        });
    }
    Ok(list)
}

/// An edited outline refitted to its own bounds.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct Refit {
    /// New frame in the unrotated axes of `start`.
    pub local: Rect,
    pub list: PolyList,
    pub vertices: Vec<Point>,
}

/// Move `segment` of `list` by `delta` and refit the frame to the result.
/// `None` when the outline collapses below `MIN_DIM`.
pub(super) fn refit(list: &PolyList, start: &Rect, segment: usize, delta: Point) -> Option<Refit> {
    let mut list = list.clone();
    if !list.move_segment(segment, delta.x, delta.y) {
        return None;
    }
    let bounds = list.bounds(ARC_SAMPLES)?;
    if bounds.width < MIN_DIM || bounds.height < MIN_DIM {
        return None;
    }
    list.offset = list.offset.offset(-bounds.x, -bounds.y);

    let vertices = list
        .to_points(ARC_SAMPLES)
        .into_iter()
        .map(|p| {
            Point::new(
                (p.x / bounds.width).clamp(0.0, 1.0),
                (p.y / bounds.height).clamp(0.0, 1.0),
            )
        })
        .collect();

    Some(Refit {
        local: Rect::new(
            start.x + bounds.x,
            start.y + bounds.y,
            bounds.width,
            bounds.height,
        ),
        list,
        vertices,
    })
}

pub(super) fn track_poly_seg(
    shape: &mut Shape,
    session: &mut ActionSession,
    ctx: &TrackContext<'_>,
    segment: usize,
    pointer: Point,
) -> Result<TrackOutcome, ActionError> {
    let Some(start_list) = &session.poly_list else {
        return Ok(TrackOutcome::Rejected(RejectReason::NoChange));
    };
    let local = session.local_pointer(pointer);
    let mut delta = Point::new(local.x - session.start_local.x, local.y - session.start_local.y);
    if ctx.grid_active(session.modifiers) {
        let spacing = ctx.config.grid.spacing;
        delta = Point::new(
            snap_value_to_grid(delta.x, spacing),
            snap_value_to_grid(delta.y, spacing),
        );
    }

    let Some(fit) = refit(start_list, &session.start_frame, segment, delta) else {
        return Ok(TrackOutcome::Rejected(RejectReason::Degenerate));
    };
    let frame = place(session, &fit.local);
    if ctx.out_of_bounds(&rotated_bounds(&frame, shape.rotation)) {
        return Ok(TrackOutcome::Rejected(RejectReason::OutOfBounds));
    }

    let before = shape.clone();
    shape.replace_outline(frame, fit.list, NormalizedPolygon::new(fit.vertices))?;
    if !ctx.text_fits(shape) {
        *shape = before;
        return Ok(TrackOutcome::Rejected(RejectReason::TextDoesNotFit));
    }
    Ok(TrackOutcome::accepted(shape))
}

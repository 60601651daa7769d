//! Resize handles, free move and container-driven resize.

use hvacdraw_core::constants::MIN_DIM;
use hvacdraw_core::{ActionError, Point, Rect};
use hvacdraw_settings::DocumentBounds;

use super::{ActionSession, RejectReason, TrackContext, TrackOutcome, TriggerKind};
use crate::model::Shape;
use crate::snap_guides::{dynamic_offsets, resize_drag_rect, snap_to_grid, DragEdges, SnapResult};
use crate::transform::{point_to_document, rotated_bounds};

/// Position of a resize handle on `frame`.
pub(super) fn handle_point(trigger: TriggerKind, frame: &Rect) -> Option<Point> {
    let c = frame.center();
    let p = match trigger {
        TriggerKind::TopLeft => Point::new(frame.x, frame.y),
        TriggerKind::TopCenter => Point::new(c.x, frame.y),
        TriggerKind::TopRight => Point::new(frame.right(), frame.y),
        TriggerKind::CenterRight => Point::new(frame.right(), c.y),
        TriggerKind::BottomRight => Point::new(frame.right(), frame.bottom()),
        TriggerKind::BottomCenter => Point::new(c.x, frame.bottom()),
        TriggerKind::BottomLeft => Point::new(frame.x, frame.bottom()),
        TriggerKind::CenterLeft => Point::new(frame.x, c.y),
        _ => return None,
    };
    Some(p)
}

/// Placement of the candidate along one axis.
#[derive(Debug, Clone, Copy)]
enum Span {
    /// Grows away from `anchor`, toward `sign`.
    Anchored { anchor: f64, sign: f64 },
    /// Stays centered on `center`.
    Centered { center: f64 },
}

impl Span {
    fn anchored(anchor: f64, handle: f64) -> (Span, f64) {
        let d = handle - anchor;
        let sign = if d < 0.0 { -1.0 } else { 1.0 };
        (Span::Anchored { anchor, sign }, d.abs())
    }

    fn start(self, size: f64) -> f64 {
        match self {
            Span::Anchored { anchor, sign } if sign < 0.0 => anchor - size,
            Span::Anchored { anchor, .. } => anchor,
            Span::Centered { center } => center - size / 2.0,
        }
    }
}

/// Candidate frame in the start frame's unrotated axes for a handle at
/// `handle`.
///
/// Dragging past the opposite side flips the anchor. With a lock, corners
/// derive the dimension that changed less from the one that changed more,
/// and edge handles derive the other dimension and keep it centered.
pub(super) fn candidate_rect(
    trigger: TriggerKind,
    start: &Rect,
    handle: Point,
    lock: Option<f64>,
    pin: Option<&PinLimits>,
) -> Option<Rect> {
    let c = start.center();
    let fixed_x = (Span::Anchored { anchor: start.x, sign: 1.0 }, start.width);
    let fixed_y = (Span::Anchored { anchor: start.y, sign: 1.0 }, start.height);

    let ((mut sx, mut w), (mut sy, mut h)) = match trigger {
        TriggerKind::TopLeft => (
            Span::anchored(start.right(), handle.x),
            Span::anchored(start.bottom(), handle.y),
        ),
        TriggerKind::TopRight => (
            Span::anchored(start.x, handle.x),
            Span::anchored(start.bottom(), handle.y),
        ),
        TriggerKind::BottomRight => (
            Span::anchored(start.x, handle.x),
            Span::anchored(start.y, handle.y),
        ),
        TriggerKind::BottomLeft => (
            Span::anchored(start.right(), handle.x),
            Span::anchored(start.y, handle.y),
        ),
        TriggerKind::TopCenter => (fixed_x, Span::anchored(start.bottom(), handle.y)),
        TriggerKind::BottomCenter => (fixed_x, Span::anchored(start.y, handle.y)),
        TriggerKind::CenterLeft => (Span::anchored(start.right(), handle.x), fixed_y),
        TriggerKind::CenterRight => (Span::anchored(start.x, handle.x), fixed_y),
        _ => return None,
    };

    if let Some(ratio) = lock {
        match trigger {
            TriggerKind::TopCenter | TriggerKind::BottomCenter => {
                w = h / ratio;
                sx = Span::Centered { center: c.x };
            }
            TriggerKind::CenterLeft | TriggerKind::CenterRight => {
                h = w * ratio;
                sy = Span::Centered { center: c.y };
            }
            _ => {
                let dw = (w / start.width - 1.0).abs();
                let dh = (h / start.height - 1.0).abs();
                if dw >= dh {
                    h = w * ratio;
                } else {
                    w = h / ratio;
                }
            }
        }
        if let Some(limits) = pin {
            let s = limits.proportional_scale(sx, w, sy, h);
            w *= s;
            h *= s;
        }
        let (lw, lh) = clamp_locked(w, h, ratio);
        w = lw;
        h = lh;
    } else {
        w = w.max(MIN_DIM);
        h = h.max(MIN_DIM);
    }

    Some(Rect::new(sx.start(w), sy.start(h), w, h))
}

/// Raise a locked size to `MIN_DIM` on its smaller side, keeping the
/// ratio.
fn clamp_locked(w: f64, h: f64, ratio: f64) -> (f64, f64) {
    if w > 0.0 && h > 0.0 {
        let s = (MIN_DIM / w).max(MIN_DIM / h).max(1.0);
        (w * s, h * s)
    } else if ratio >= 1.0 {
        (MIN_DIM, MIN_DIM * ratio)
    } else {
        (MIN_DIM / ratio, MIN_DIM)
    }
}

/// Document limits a locked resize of an unrotated shape is scaled into.
#[derive(Debug, Clone, Copy)]
pub(super) struct PinLimits {
    pub left: f64,
    pub top: f64,
    /// Right and bottom limits, when the document does not grow.
    pub right: Option<f64>,
    pub bottom: Option<f64>,
}

impl PinLimits {
    /// Limits at the session margins. A start frame already past a margin
    /// keeps its own edge as the limit.
    pub(super) fn for_session(session: &ActionSession, doc: &DocumentBounds) -> Self {
        let start = &session.start_frame;
        let m = &session.margins;
        PinLimits {
            left: m.left.min(start.x),
            top: m.top.min(start.y),
            right: doc
                .no_auto_grow
                .then(|| (doc.width - m.right).max(start.right())),
            bottom: doc
                .no_auto_grow
                .then(|| (doc.height - m.bottom).max(start.bottom())),
        }
    }

    /// Factor (at most 1) that keeps the far edges inside the limits.
    fn proportional_scale(&self, sx: Span, w: f64, sy: Span, h: f64) -> f64 {
        let mut s: f64 = 1.0;
        let mut limit = |anchor: f64, sign: f64, size: f64, lo: f64, hi: Option<f64>| {
            if size <= 0.0 {
                return;
            }
            let room = if sign < 0.0 {
                Some(anchor - lo)
            } else {
                hi.map(|hi| hi - anchor)
            };
            if let Some(room) = room.filter(|r| *r > 0.0 && size > *r) {
                s = s.min(room / size);
            }
        };
        if let Span::Anchored { anchor, sign } = sx {
            limit(anchor, sign, w, self.left, self.right);
        }
        if let Span::Anchored { anchor, sign } = sy {
            limit(anchor, sign, h, self.top, self.bottom);
        }
        s
    }
}

/// Document frame for a candidate given in the start frame's local axes.
pub(super) fn place(session: &ActionSession, local: &Rect) -> Rect {
    let center = point_to_document(
        session.start_frame.center(),
        session.start_rotation,
        local.center(),
    );
    Rect::new(
        center.x - local.width / 2.0,
        center.y - local.height / 2.0,
        local.width,
        local.height,
    )
}

/// Bounds-check `local`, apply it and verify the text still fits.
pub(super) fn apply_local_rect(
    shape: &mut Shape,
    session: &ActionSession,
    ctx: &TrackContext<'_>,
    local: &Rect,
) -> Result<TrackOutcome, ActionError> {
    if !(local.width > 0.0 && local.height > 0.0) {
        return Ok(TrackOutcome::Rejected(RejectReason::Degenerate));
    }
    let frame = place(session, local);
    if ctx.out_of_bounds(&rotated_bounds(&frame, shape.rotation)) {
        return Ok(TrackOutcome::Rejected(RejectReason::OutOfBounds));
    }
    if frame.approx_eq(&shape.frame()) {
        return Ok(TrackOutcome::accepted(shape));
    }

    let before = shape.clone();
    shape.update_frame(frame)?;
    if !ctx.text_fits(shape) {
        *shape = before;
        return Ok(TrackOutcome::Rejected(RejectReason::TextDoesNotFit));
    }
    shape.mark_hooks_dirty();
    Ok(TrackOutcome::accepted(shape))
}

pub(super) fn track_resize(
    shape: &mut Shape,
    session: &mut ActionSession,
    ctx: &TrackContext<'_>,
    pointer: Point,
) -> Result<TrackOutcome, ActionError> {
    let local = session.local_pointer(pointer);
    let mut handle = local.offset(session.grab_offset.x, session.grab_offset.y);

    let unrotated = session.start_rotation == 0.0;
    session.guides.clear();
    if unrotated && ctx.snaps_active(session.modifiers) {
        let mut snap = SnapResult::default();
        if ctx.config.snap.dynamic_guides {
            if let (Some(edges), Some(drag)) = (
                DragEdges::for_trigger(session.trigger),
                resize_drag_rect(session.trigger, &session.start_snap_rect, handle),
            ) {
                snap = dynamic_offsets(&drag, edges, ctx.siblings, ctx.guide_options());
                handle = snap.apply(handle);
            }
        }
        if ctx.grid_active(session.modifiers) {
            handle = snap_to_grid(handle, ctx.config.grid.spacing, &snap);
        }
        session.guides = snap.guides;
    }

    let lock = session.aspect_locked.then_some(session.aspect_ratio);
    let pin = (unrotated && session.aspect_locked)
        .then(|| PinLimits::for_session(session, &ctx.config.document));
    let Some(candidate) = candidate_rect(session.trigger, &session.start_frame, handle, lock, pin.as_ref())
    else {
        return Ok(TrackOutcome::Rejected(RejectReason::NoChange));
    };
    apply_local_rect(shape, session, ctx, &candidate)
}

/// Translate the shape with the pointer.
///
/// Sibling guides and the grid adjust the origin; the result is then
/// pushed back inside the document.
pub(super) fn track_move(
    shape: &mut Shape,
    session: &mut ActionSession,
    ctx: &TrackContext<'_>,
    pointer: Point,
) -> Result<TrackOutcome, ActionError> {
    let start = session.start_frame.origin();
    let mut origin = pointer.offset(session.grab_offset.x, session.grab_offset.y);

    session.guides.clear();
    if ctx.snaps_active(session.modifiers) {
        let mut snap = SnapResult::default();
        if ctx.config.snap.dynamic_guides {
            let moved = session
                .start_snap_rect
                .translate(origin.x - start.x, origin.y - start.y);
            snap = dynamic_offsets(&moved, DragEdges::ALL, ctx.siblings, ctx.guide_options());
            origin = snap.apply(origin);
        }
        if ctx.grid_active(session.modifiers) {
            origin = snap_to_grid(origin, ctx.config.grid.spacing, &snap);
        }
        session.guides = snap.guides;
    }

    let bounds = session
        .start_snap_rect
        .translate(origin.x - start.x, origin.y - start.y);
    let doc = &ctx.config.document;
    if doc.no_auto_grow {
        origin.x -= (bounds.right() - doc.width).max(0.0);
        origin.y -= (bounds.bottom() - doc.height).max(0.0);
    }
    let bounds = session
        .start_snap_rect
        .translate(origin.x - start.x, origin.y - start.y);
    origin.x -= bounds.x.min(0.0);
    origin.y -= bounds.y.min(0.0);

    let current = shape.frame().origin();
    if origin.approx_eq(&current, 1e-9) {
        return Ok(TrackOutcome::Rejected(RejectReason::NoChange));
    }
    shape.set_position(origin.x, origin.y)?;
    Ok(TrackOutcome::accepted(shape))
}

/// Resize decided by the installed container layout.
pub(super) fn track_container(
    shape: &mut Shape,
    session: &mut ActionSession,
    ctx: &TrackContext<'_>,
    pointer: Point,
) -> Result<TrackOutcome, ActionError> {
    let Some(container) = ctx.container else {
        return Err(ActionError::UnsupportedTrigger {
            trigger: session.trigger.to_string(),
            reason: "no container layout installed".to_string(),
        });
    };
    let local = session.local_pointer(pointer);
    match container.adjust(shape, local) {
        Some(rect) => apply_local_rect(shape, session, ctx, &rect),
        None => Ok(TrackOutcome::Rejected(RejectReason::NoChange)),
    }
}

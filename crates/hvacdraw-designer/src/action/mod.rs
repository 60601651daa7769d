//! Interactive manipulation of a single shape.
//!
//! An action runs `Idle → Tracking → Committed | Cancelled`:
//!
//! ```text
//! begin_action(shape, trigger, pointer)   pointer down on a handle
//!   update_action(pointer)                each pointer move, any number
//! end_action()                            pointer up: commit
//! cancel_action() / abort(reason)         restore the pre-action shape
//! ```
//!
//! Every sample is computed in the shape's unrotated axes about the frame
//! center recorded at `begin_action`. A sample that would leave the
//! document or break the text layout is rejected: the shape keeps its last
//! accepted geometry and the drag goes on. Errors raised while a session is
//! active restore the pre-action shape and end the session.

pub mod autoscroll;
pub mod guard;
mod modify;
mod poly_seg;
mod resize;
mod rotate;

pub use autoscroll::{edge_direction, AutoScroll, AutoScrollTick, ScrollDirection};
pub use guard::RollbackGuard;
pub use modify::modify_param;

use std::fmt;
use std::time::Duration;

use hvacdraw_core::constants::MIN_DIM;
use hvacdraw_core::{ActionError, Insets, Point, Rect};
use hvacdraw_settings::DocumentConfig;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::collaborators::{AlwaysFits, ContainerLayout, TextLayout};
use crate::model::{PolyList, Resizable, Rotatable, Shape, ShapeId, SizeDim};
use crate::object_table::ObjectTable;
use crate::renderer::{present, NullRenderer, RenderSink};
use crate::snap_guides::{GuideHit, GuideOptions};
use crate::transform::rotated_bounds;

/// Handle or gesture that starts an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum TriggerKind {
    TopLeft,
    TopCenter,
    TopRight,
    CenterRight,
    BottomRight,
    BottomCenter,
    BottomLeft,
    CenterLeft,
    Rotate,
    /// Drag of the shape-parameter knob.
    ModifyShape,
    Move,
    /// Drag of one outline segment; `segment` indexes the segment list
    /// (1-based, segment `i` runs from point `i - 1` to point `i`).
    MovePolySeg { segment: usize },
    DimensionAdjust,
    ContainerAdjust,
}

impl TriggerKind {
    /// The eight resize handles.
    pub const RESIZE: [TriggerKind; 8] = [
        TriggerKind::TopLeft,
        TriggerKind::TopCenter,
        TriggerKind::TopRight,
        TriggerKind::CenterRight,
        TriggerKind::BottomRight,
        TriggerKind::BottomCenter,
        TriggerKind::BottomLeft,
        TriggerKind::CenterLeft,
    ];

    pub fn is_resize(self) -> bool {
        Self::RESIZE.contains(&self)
    }

    pub fn is_corner(self) -> bool {
        matches!(
            self,
            TriggerKind::TopLeft
                | TriggerKind::TopRight
                | TriggerKind::BottomRight
                | TriggerKind::BottomLeft
        )
    }

    pub fn edit_mode(self) -> EditMode {
        match self {
            t if t.is_resize() => EditMode::Resizing,
            TriggerKind::Rotate => EditMode::Rotating,
            TriggerKind::Move => EditMode::Moving,
            TriggerKind::MovePolySeg { .. } => EditMode::EditingSegment,
            TriggerKind::ModifyShape => EditMode::ModifyingShape,
            TriggerKind::DimensionAdjust => EditMode::AdjustingDimension,
            _ => EditMode::AdjustingContainer,
        }
    }

    /// Which persisted size fields a commit with this trigger updates.
    fn size_dim_axes(self) -> (bool, bool) {
        match self {
            TriggerKind::CenterLeft | TriggerKind::CenterRight => (true, false),
            TriggerKind::TopCenter | TriggerKind::BottomCenter => (false, true),
            _ => (true, true),
        }
    }
}

impl fmt::Display for TriggerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TriggerKind::MovePolySeg { segment } => write!(f, "MovePolySeg({})", segment),
            other => write!(f, "{:?}", other),
        }
    }
}

/// Modifier keys held during a sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Modifiers {
    /// Toggles aspect locking against the shape's default.
    pub shift: bool,
    /// Coarser rotation snapping.
    pub enhance: bool,
    /// Suspend every snap for this sample.
    pub override_snaps: bool,
}

/// What the editor is doing, for cursor and chrome feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EditMode {
    #[default]
    Default,
    Resizing,
    Rotating,
    Moving,
    EditingSegment,
    ModifyingShape,
    AdjustingDimension,
    AdjustingContainer,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ActionState {
    #[default]
    Idle,
    Tracking {
        shape: ShapeId,
        trigger: TriggerKind,
    },
    Committed {
        shape: ShapeId,
    },
    Cancelled {
        shape: ShapeId,
    },
}

/// Why a sample was not applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// The candidate would leave the document.
    OutOfBounds,
    /// The text would no longer fit.
    TextDoesNotFit,
    /// The candidate has no usable extent.
    Degenerate,
    /// Nothing to do for this sample.
    NoChange,
}

/// Result of one pointer sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TrackOutcome {
    Accepted { frame: Rect, rotation: f64 },
    Rejected(RejectReason),
}

impl TrackOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, TrackOutcome::Accepted { .. })
    }

    fn accepted(shape: &Shape) -> Self {
        TrackOutcome::Accepted {
            frame: shape.frame(),
            rotation: shape.rotation,
        }
    }
}

/// The geometry written by a committed action.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Committed {
    pub shape_id: ShapeId,
    pub trigger: TriggerKind,
    pub frame: Rect,
    pub rotation: f64,
    pub size_dim: SizeDim,
}

/// Per-action state, created on pointer down and dropped on release or
/// cancel.
#[derive(Debug, Clone)]
pub struct ActionSession {
    pub shape_id: ShapeId,
    pub trigger: TriggerKind,
    /// The shape as it was before the action.
    pub(crate) original: Shape,
    pub start_frame: Rect,
    pub start_rotation: f64,
    /// Snap rect at pointer down.
    pub start_snap_rect: Rect,
    /// Pointer down position, document space.
    pub start_pointer: Point,
    /// Pointer down position in the shape's unrotated axes.
    pub start_local: Point,
    /// Offset from the pointer to the grabbed handle (local axes for
    /// resize, document axes for move).
    pub grab_offset: Point,
    pub aspect_locked: bool,
    /// Height over width at pointer down.
    pub aspect_ratio: f64,
    /// Minimum distance of the pointer from the document edges.
    pub margins: Insets,
    /// Last accepted frame.
    pub previous_frame: Rect,
    /// Rotation pivot, document space.
    pub pivot: Point,
    pub rotation_candidate: f64,
    pub start_param: f64,
    pub start_dimension_offset: f64,
    pub modifiers: Modifiers,
    pub last_pointer: Point,
    /// Guides engaged by the last sample.
    pub guides: Vec<GuideHit>,
    pub(crate) poly_list: Option<PolyList>,
}

impl ActionSession {
    fn new(shape: &Shape, trigger: TriggerKind, pointer: Point, locked: bool, knob: f64) -> Self {
        let frame = shape.frame();
        let start_local = shape.to_local_point(pointer);
        let grab_offset = match trigger {
            TriggerKind::Move => Point::new(frame.x - pointer.x, frame.y - pointer.y),
            t => resize::handle_point(t, &frame)
                .map(|h| Point::new(h.x - start_local.x, h.y - start_local.y))
                .unwrap_or_default(),
        };

        let selection = shape.selection_rect();
        let rotated = rotated_bounds(&selection, shape.rotation);
        let half_knob = knob / 2.0;
        let margins = Insets::new(
            (selection.x - rotated.x).max(0.0) + half_knob,
            (selection.y - rotated.y).max(0.0) + half_knob,
            (rotated.right() - selection.right()).max(0.0) + half_knob,
            (rotated.bottom() - selection.bottom()).max(0.0) + half_knob,
        );

        // Height 0 would divide by zero, so the lock is dropped.
        let aspect_locked = locked && frame.height > 0.0 && frame.width > 0.0;
        let aspect_ratio = if aspect_locked {
            frame.height / frame.width
        } else {
            1.0
        };

        Self {
            shape_id: shape.id,
            trigger,
            original: shape.clone(),
            start_frame: frame,
            start_rotation: shape.rotation,
            start_snap_rect: shape.snap_rect(),
            start_pointer: pointer,
            start_local,
            grab_offset,
            aspect_locked,
            aspect_ratio,
            margins,
            previous_frame: frame,
            pivot: frame.center(),
            rotation_candidate: shape.rotation,
            start_param: shape.shape_param,
            start_dimension_offset: shape.dimension_offset,
            modifiers: Modifiers::default(),
            last_pointer: pointer,
            guides: Vec::new(),
            poly_list: None,
        }
    }

    /// Pointer in the unrotated axes of the shape at pointer down.
    pub fn local_pointer(&self, pointer: Point) -> Point {
        crate::transform::point_to_local(self.start_frame.center(), self.start_rotation, pointer)
    }

    /// The snapshot taken at pointer down.
    pub fn original(&self) -> &Shape {
        &self.original
    }
}

/// Read-only inputs shared by the per-trigger tracking functions.
pub(crate) struct TrackContext<'a> {
    pub config: &'a DocumentConfig,
    pub text_layout: &'a dyn TextLayout,
    pub container: Option<&'a dyn ContainerLayout>,
    pub siblings: &'a [(ShapeId, Rect)],
}

impl TrackContext<'_> {
    pub fn snaps_active(&self, modifiers: Modifiers) -> bool {
        self.config.snap.enabled && !modifiers.override_snaps
    }

    pub fn grid_active(&self, modifiers: Modifiers) -> bool {
        self.config.grid_snap_active() && !modifiers.override_snaps
    }

    pub fn guide_options(&self) -> GuideOptions {
        GuideOptions {
            tolerance: self.config.snap.guide_tolerance,
            include_centers: self.config.snap.include_centers,
        }
    }

    /// Rotated bounds of `frame` leave the document.
    pub fn out_of_bounds(&self, bounds: &Rect) -> bool {
        const SLACK: f64 = 1e-9;
        if bounds.x < -SLACK || bounds.y < -SLACK {
            return true;
        }
        let doc = &self.config.document;
        doc.no_auto_grow
            && (bounds.right() > doc.width + SLACK || bounds.bottom() > doc.height + SLACK)
    }

    pub fn text_fits(&self, shape: &Shape) -> bool {
        self.text_layout.fits(shape, &shape.text_rect())
    }
}

/// Drives one action session at a time against an [`ObjectTable`].
pub struct ActionController {
    config: DocumentConfig,
    text_layout: Box<dyn TextLayout + Send>,
    container: Option<Box<dyn ContainerLayout + Send>>,
    renderer: Box<dyn RenderSink + Send>,
    session: Option<ActionSession>,
    state: ActionState,
    edit_mode: EditMode,
    autoscroll: Option<AutoScroll>,
}

impl fmt::Debug for ActionController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionController")
            .field("state", &self.state)
            .field("edit_mode", &self.edit_mode)
            .field("session", &self.session.as_ref().map(|s| (s.shape_id, s.trigger)))
            .field("autoscroll", &self.autoscroll.is_some())
            .finish()
    }
}

impl ActionController {
    pub fn new(config: DocumentConfig) -> Self {
        Self {
            config,
            text_layout: Box::new(AlwaysFits),
            container: None,
            renderer: Box::new(NullRenderer),
            session: None,
            state: ActionState::Idle,
            edit_mode: EditMode::Default,
            autoscroll: None,
        }
    }

    pub fn with_text_layout(mut self, layout: impl TextLayout + Send + 'static) -> Self {
        self.text_layout = Box::new(layout);
        self
    }

    pub fn with_container(mut self, container: impl ContainerLayout + Send + 'static) -> Self {
        self.container = Some(Box::new(container));
        self
    }

    pub fn with_renderer(mut self, renderer: impl RenderSink + Send + 'static) -> Self {
        self.renderer = Box::new(renderer);
        self
    }

    pub fn config(&self) -> &DocumentConfig {
        &self.config
    }

    pub fn state(&self) -> ActionState {
        self.state
    }

    pub fn edit_mode(&self) -> EditMode {
        self.edit_mode
    }

    pub fn session(&self) -> Option<&ActionSession> {
        self.session.as_ref()
    }

    pub fn is_tracking(&self) -> bool {
        self.session.is_some()
    }

    /// Start an action on `shape_id`.
    ///
    /// Refused while another action is in progress; the running session is
    /// left untouched.
    pub fn begin_action<T: ObjectTable + ?Sized>(
        &mut self,
        table: &mut T,
        shape_id: ShapeId,
        trigger: TriggerKind,
        pointer: Point,
        modifiers: Modifiers,
    ) -> Result<(), ActionError> {
        if let Some(active) = &self.session {
            warn!(active = %active.shape_id, requested = %shape_id, "Action already in progress");
            return Err(ActionError::SessionConflict {
                active_shape: active.shape_id.0,
            });
        }

        let shape = table
            .shape(shape_id)
            .ok_or(ActionError::ShapeNotFound { id: shape_id.0 })?;
        self.check_trigger(shape, trigger)?;

        let locked = modifiers.shift
            ^ (self.config.interaction.always_constrain_aspect || shape.wants_aspect_lock());
        let mut session = ActionSession::new(
            shape,
            trigger,
            pointer,
            locked,
            self.config.interaction.knob_size,
        );
        session.modifiers = modifiers;
        if let TriggerKind::MovePolySeg { segment } = trigger {
            session.poly_list = Some(poly_seg::editable_list(shape, segment)?);
        }

        debug!(
            shape = %shape_id,
            %trigger,
            locked = session.aspect_locked,
            "Action started"
        );
        self.session = Some(session);
        self.state = ActionState::Tracking {
            shape: shape_id,
            trigger,
        };
        self.edit_mode = trigger.edit_mode();
        Ok(())
    }

    fn check_trigger(&self, shape: &Shape, trigger: TriggerKind) -> Result<(), ActionError> {
        let refuse = |reason: &str| ActionError::UnsupportedTrigger {
            trigger: trigger.to_string(),
            reason: reason.to_string(),
        };
        match trigger {
            TriggerKind::Rotate => {
                if shape.extra_flags.no_rotate() || !shape.kind.can_rotate() {
                    return Err(refuse("shape cannot rotate"));
                }
            }
            TriggerKind::MovePolySeg { .. } => {
                if shape.kind.as_polygon().is_none() {
                    return Err(refuse("only polygons have editable segments"));
                }
            }
            TriggerKind::ContainerAdjust => {
                if self.container.is_none() {
                    return Err(refuse("no container layout installed"));
                }
            }
            TriggerKind::ModifyShape => {
                if modify::param_axis(shape).is_none() {
                    return Err(refuse("shape has no adjustable parameter"));
                }
            }
            _ => {}
        }
        Ok(())
    }

    /// Feed one pointer sample.
    pub fn update_action<T: ObjectTable + ?Sized>(
        &mut self,
        table: &mut T,
        pointer: Point,
        modifiers: Modifiers,
    ) -> Result<TrackOutcome, ActionError> {
        let session = self.session.as_mut().ok_or(ActionError::NoActiveSession)?;
        session.modifiers = modifiers;
        session.last_pointer = pointer;
        let shape_id = session.shape_id;

        let siblings = match session.trigger {
            TriggerKind::Move => table.snap_targets(shape_id),
            t if t.is_resize() && session.start_rotation == 0.0 => table.snap_targets(shape_id),
            _ => Vec::new(),
        };

        let Some(shape) = table.shape_mut(shape_id) else {
            self.finish_cancelled(shape_id);
            return Err(ActionError::ShapeNotFound { id: shape_id.0 });
        };

        let ctx = TrackContext {
            config: &self.config,
            text_layout: self.text_layout.as_ref(),
            container: self.container.as_deref().map(|c| c as &dyn ContainerLayout),
            siblings: &siblings,
        };

        let mut guard = RollbackGuard::new(shape, session.original.clone());
        let result = match session.trigger {
            t if t.is_resize() => resize::track_resize(&mut guard, session, &ctx, pointer),
            TriggerKind::Rotate => rotate::track_rotate(&mut guard, session, &ctx, pointer),
            TriggerKind::Move => resize::track_move(&mut guard, session, &ctx, pointer),
            TriggerKind::MovePolySeg { segment } => {
                poly_seg::track_poly_seg(&mut guard, session, &ctx, segment, pointer)
            }
            TriggerKind::ModifyShape => modify::track_modify(&mut guard, session, &ctx, pointer),
            TriggerKind::DimensionAdjust => modify::track_dimension(&mut guard, session, pointer),
            TriggerKind::ContainerAdjust => resize::track_container(&mut guard, session, &ctx, pointer),
            _ => Ok(TrackOutcome::Rejected(RejectReason::NoChange)),
        };

        match result {
            Ok(outcome) => {
                if let TrackOutcome::Accepted { frame, rotation } = outcome {
                    session.previous_frame = frame;
                    debug!(shape = %shape_id, %frame, rotation, "Sample accepted");
                    present(self.renderer.as_mut(), &guard);
                } else {
                    debug!(shape = %shape_id, ?outcome, "Sample rejected");
                }
                guard.disarm();
                Ok(outcome)
            }
            Err(e) => {
                drop(guard);
                warn!(shape = %shape_id, error = %e, "Action failed, shape restored");
                self.finish_cancelled(shape_id);
                Err(e)
            }
        }
    }

    /// Commit the last accepted geometry.
    pub fn end_action<T: ObjectTable + ?Sized>(
        &mut self,
        table: &mut T,
    ) -> Result<Committed, ActionError> {
        let session = self.session.take().ok_or(ActionError::NoActiveSession)?;
        let shape_id = session.shape_id;
        let Some(shape) = table.shape_mut(shape_id) else {
            self.finish_cancelled(shape_id);
            return Err(ActionError::ShapeNotFound { id: shape_id.0 });
        };

        let mut shape = RollbackGuard::new(shape, session.original.clone());
        let (width, height) = session.trigger.size_dim_axes();
        let frame = shape.frame();
        if width {
            shape.size_dim.width = frame.width;
        }
        if height {
            shape.size_dim.height = frame.height;
        }
        shape.mark_hooks_dirty();

        let committed = Committed {
            shape_id,
            trigger: session.trigger,
            frame,
            rotation: shape.rotation,
            size_dim: shape.size_dim,
        };
        let dependents: Vec<ShapeId> = shape.hooks.iter().map(|h| h.objid).collect();
        present(self.renderer.as_mut(), &shape);
        shape.disarm();

        table.mark_dirty(shape_id);
        for id in dependents {
            table.mark_dirty(id);
        }

        self.autoscroll = None;
        self.edit_mode = EditMode::Default;
        self.state = ActionState::Committed { shape: shape_id };
        info!(
            shape = %shape_id,
            trigger = %committed.trigger,
            frame = %committed.frame,
            rotation = committed.rotation,
            "Action committed"
        );
        Ok(committed)
    }

    /// Restore the pre-action shape and end the session.
    pub fn cancel_action<T: ObjectTable + ?Sized>(&mut self, table: &mut T) -> Result<(), ActionError> {
        let session = self.session.take().ok_or(ActionError::NoActiveSession)?;
        let shape_id = session.shape_id;
        let restored = self.restore(table, session);
        self.finish_cancelled(shape_id);
        info!(shape = %shape_id, "Action cancelled");
        restored
    }

    /// Roll back after an external failure. Returns the error to propagate.
    pub fn abort<T: ObjectTable + ?Sized>(&mut self, table: &mut T, reason: impl Into<String>) -> ActionError {
        let reason = reason.into();
        if let Some(session) = self.session.take() {
            let shape_id = session.shape_id;
            if let Err(e) = self.restore(table, session) {
                warn!(error = %e, "Restore during abort failed");
            }
            self.finish_cancelled(shape_id);
            warn!(shape = %shape_id, %reason, "Action aborted");
        }
        ActionError::Aborted { reason }
    }

    fn restore<T: ObjectTable + ?Sized>(
        &mut self,
        table: &mut T,
        session: ActionSession,
    ) -> Result<(), ActionError> {
        let shape = table
            .shape_mut(session.shape_id)
            .ok_or(ActionError::ShapeNotFound { id: session.shape_id.0 })?;
        *shape = session.original;
        present(self.renderer.as_mut(), shape);
        Ok(())
    }

    fn finish_cancelled(&mut self, shape_id: ShapeId) {
        self.session = None;
        self.autoscroll = None;
        self.edit_mode = EditMode::Default;
        self.state = ActionState::Cancelled { shape: shape_id };
    }

    /// Start autoscrolling if `pointer` is near an edge of `viewport`.
    ///
    /// Replaces any running autoscroll. Returns whether a timer is running.
    pub fn start_autoscroll(&mut self, viewport: &Rect, pointer: Point) -> Result<bool, ActionError> {
        if self.session.is_none() {
            return Err(ActionError::NoActiveSession);
        }
        self.autoscroll = None;
        let interaction = &self.config.interaction;
        let Some(direction) = edge_direction(pointer, viewport, interaction.autoscroll_edge_margin)
        else {
            return Ok(false);
        };
        let interval = Duration::from_millis(interaction.autoscroll_interval_ms);
        let step = self.config.grid.spacing.max(MIN_DIM);
        self.autoscroll = AutoScroll::start(interval, pointer, direction, step);
        if self.autoscroll.is_none() {
            debug!("No async runtime, autoscroll unavailable");
        }
        Ok(self.autoscroll.is_some())
    }

    pub fn stop_autoscroll(&mut self) {
        self.autoscroll = None;
    }

    pub fn autoscroll_active(&self) -> bool {
        self.autoscroll.is_some()
    }

    /// Wait for the next autoscroll sample.
    pub async fn next_autoscroll_tick(&mut self) -> Option<AutoScrollTick> {
        match self.autoscroll.as_mut() {
            Some(scroll) => scroll.next_tick().await,
            None => None,
        }
    }

    /// Feed an autoscroll sample as a pointer move with the last
    /// modifiers.
    pub fn apply_autoscroll_tick<T: ObjectTable + ?Sized>(
        &mut self,
        table: &mut T,
        tick: AutoScrollTick,
    ) -> Result<TrackOutcome, ActionError> {
        let modifiers = self
            .session
            .as_ref()
            .map(|s| s.modifiers)
            .ok_or(ActionError::NoActiveSession)?;
        self.update_action(table, tick.pointer, modifiers)
    }
}

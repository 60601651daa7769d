//! Alignment guides against sibling shapes, and grid snapping.
//!
//! While dragging, the candidate rect is compared with the snap rects of
//! the other shapes in the document. A guide engages when one of the
//! dragged edges lies within the tolerance of a sibling edge and the two
//! shapes are separated along the other axis (a sibling directly above or
//! below for x guides, left or right for y guides). At most one x offset
//! and one y offset come out; grid snapping then fills in whichever axis
//! the guides left unresolved.

use hvacdraw_core::{Point, Rect};
use std::collections::BTreeMap;
use tracing::trace;

use crate::action::TriggerKind;
use crate::model::ShapeId;

/// Guides whose offset differs from the chosen one by more than this are
/// dropped from the result.
const GUIDE_AGREEMENT: f64 = 0.5;

/// An edge or center line of a rect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum GuideEdge {
    Left,
    CenterX,
    Right,
    Top,
    CenterY,
    Bottom,
}

impl GuideEdge {
    /// Coordinate of this edge on `rect`.
    pub fn value(self, rect: &Rect) -> f64 {
        match self {
            GuideEdge::Left => rect.x,
            GuideEdge::CenterX => rect.x + rect.width / 2.0,
            GuideEdge::Right => rect.right(),
            GuideEdge::Top => rect.y,
            GuideEdge::CenterY => rect.y + rect.height / 2.0,
            GuideEdge::Bottom => rect.bottom(),
        }
    }

    /// Whether aligning this edge moves the rect horizontally.
    pub fn is_horizontal_axis(self) -> bool {
        matches!(self, GuideEdge::Left | GuideEdge::CenterX | GuideEdge::Right)
    }

    pub fn is_center(self) -> bool {
        matches!(self, GuideEdge::CenterX | GuideEdge::CenterY)
    }
}

/// Which side of the candidate the sibling sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum GuideSide {
    Above,
    Below,
    LeftOf,
    RightOf,
}

/// One engaged guide.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GuideHit {
    pub sibling: ShapeId,
    /// Edge of the candidate that aligns.
    pub edge: GuideEdge,
    pub side: GuideSide,
    /// Coordinate of the sibling line the edge snaps to.
    pub target: f64,
    /// Shift that brings the candidate edge onto `target`.
    pub offset: f64,
    /// Gap between the two shapes along the other axis.
    pub distance: f64,
}

/// Offsets to apply to the pointer-derived position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SnapResult {
    pub dx: Option<f64>,
    pub dy: Option<f64>,
    /// Guides that agree with the chosen offsets, for display.
    pub guides: Vec<GuideHit>,
}

impl SnapResult {
    pub fn is_empty(&self) -> bool {
        self.dx.is_none() && self.dy.is_none()
    }

    /// Apply the offsets to a point.
    pub fn apply(&self, p: Point) -> Point {
        p.offset(self.dx.unwrap_or(0.0), self.dy.unwrap_or(0.0))
    }
}

/// Tuning for [`dynamic_offsets`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GuideOptions {
    pub tolerance: f64,
    pub include_centers: bool,
}

impl Default for GuideOptions {
    fn default() -> Self {
        Self {
            tolerance: hvacdraw_core::constants::DEFAULT_GUIDE_TOLERANCE,
            include_centers: true,
        }
    }
}

/// Edges of the candidate rect that a trigger moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DragEdges {
    pub left: bool,
    pub right: bool,
    pub top: bool,
    pub bottom: bool,
}

impl DragEdges {
    pub const ALL: DragEdges = DragEdges {
        left: true,
        right: true,
        top: true,
        bottom: true,
    };

    /// Dragged edges for a trigger; `None` when the trigger never snaps.
    pub fn for_trigger(trigger: TriggerKind) -> Option<Self> {
        let e = DragEdges::default();
        let edges = match trigger {
            TriggerKind::TopLeft => DragEdges { top: true, left: true, ..e },
            TriggerKind::TopCenter => DragEdges { top: true, ..e },
            TriggerKind::TopRight => DragEdges { top: true, right: true, ..e },
            TriggerKind::CenterRight => DragEdges { right: true, ..e },
            TriggerKind::BottomRight => DragEdges { bottom: true, right: true, ..e },
            TriggerKind::BottomCenter => DragEdges { bottom: true, ..e },
            TriggerKind::BottomLeft => DragEdges { bottom: true, left: true, ..e },
            TriggerKind::CenterLeft => DragEdges { left: true, ..e },
            TriggerKind::Move => DragEdges::ALL,
            _ => return None,
        };
        Some(edges)
    }

    fn moves_whole_rect(self) -> bool {
        self == DragEdges::ALL
    }

    fn candidate_edges(self, include_centers: bool) -> Vec<GuideEdge> {
        let mut edges = Vec::with_capacity(6);
        if self.left {
            edges.push(GuideEdge::Left);
        }
        if self.right {
            edges.push(GuideEdge::Right);
        }
        if self.top {
            edges.push(GuideEdge::Top);
        }
        if self.bottom {
            edges.push(GuideEdge::Bottom);
        }
        if include_centers && self.moves_whole_rect() {
            edges.push(GuideEdge::CenterX);
            edges.push(GuideEdge::CenterY);
        }
        edges
    }
}

/// Rect spanning from the fixed edges of `snap_rect` to the pointer.
///
/// Vertical edges are applied before horizontal ones, so dragging a corner
/// first settles the top or bottom and then the side.
pub fn resize_drag_rect(trigger: TriggerKind, snap_rect: &Rect, pointer: Point) -> Option<Rect> {
    let edges = DragEdges::for_trigger(trigger)?;
    if edges.moves_whole_rect() {
        return Some(*snap_rect);
    }
    let mut r = *snap_rect;
    if edges.bottom {
        r = span_y(r.y, pointer.y, &r);
    }
    if edges.top {
        r = span_y(snap_rect.bottom(), pointer.y, &r);
    }
    if edges.right {
        r = span_x(r.x, pointer.x, &r);
    }
    if edges.left {
        r = span_x(snap_rect.right(), pointer.x, &r);
    }
    Some(r)
}

fn span_y(fixed: f64, moving: f64, r: &Rect) -> Rect {
    Rect::new(r.x, fixed.min(moving), r.width, (moving - fixed).abs())
}

fn span_x(fixed: f64, moving: f64, r: &Rect) -> Rect {
    Rect::new(fixed.min(moving), r.y, (moving - fixed).abs(), r.height)
}

/// Compare `candidate`'s dragged edges with every sibling and pick at most
/// one offset per axis.
///
/// Per edge and side the sibling with the smallest gap wins. Center
/// alignments take priority on their axis; otherwise the smallest shift
/// wins.
pub fn dynamic_offsets(
    candidate: &Rect,
    edges: DragEdges,
    siblings: &[(ShapeId, Rect)],
    opts: GuideOptions,
) -> SnapResult {
    let candidate_edges = edges.candidate_edges(opts.include_centers);
    let mut best: BTreeMap<(GuideEdge, GuideSide), GuideHit> = BTreeMap::new();

    for (id, target) in siblings {
        for &edge in &candidate_edges {
            let Some((side, distance)) = separation(candidate, target, edge) else {
                continue;
            };
            let value = edge.value(candidate);
            for line in sibling_lines(edge) {
                let target_value = line.value(target);
                let offset = target_value - value;
                if offset.abs() > opts.tolerance {
                    continue;
                }
                let hit = GuideHit {
                    sibling: *id,
                    edge,
                    side,
                    target: target_value,
                    offset,
                    distance,
                };
                best.entry((edge, side))
                    .and_modify(|h| {
                        if hit.distance < h.distance {
                            *h = hit;
                        }
                    })
                    .or_insert(hit);
            }
        }
    }

    let dx = choose_axis(best.values(), true);
    let dy = choose_axis(best.values(), false);
    let guides: Vec<GuideHit> = best
        .into_values()
        .filter(|h| {
            let chosen = if h.edge.is_horizontal_axis() { dx } else { dy };
            chosen.is_some_and(|c| (h.offset - c).abs() <= GUIDE_AGREEMENT)
        })
        .collect();

    if !guides.is_empty() {
        trace!(?dx, ?dy, count = guides.len(), "Dynamic guides engaged");
    }
    SnapResult { dx, dy, guides }
}

fn choose_axis<'a>(hits: impl Iterator<Item = &'a GuideHit>, horizontal: bool) -> Option<f64> {
    let mut center: Option<f64> = None;
    let mut edge: Option<f64> = None;
    for h in hits.filter(|h| h.edge.is_horizontal_axis() == horizontal) {
        let slot = if h.edge.is_center() { &mut center } else { &mut edge };
        if slot.is_none_or(|s| h.offset.abs() < s.abs()) {
            *slot = Some(h.offset);
        }
    }
    center.or(edge)
}

/// Sibling lines a candidate edge may align with.
fn sibling_lines(edge: GuideEdge) -> &'static [GuideEdge] {
    match edge {
        GuideEdge::Left | GuideEdge::Right => &[GuideEdge::Left, GuideEdge::Right],
        GuideEdge::Top | GuideEdge::Bottom => &[GuideEdge::Top, GuideEdge::Bottom],
        GuideEdge::CenterX => &[GuideEdge::CenterX],
        GuideEdge::CenterY => &[GuideEdge::CenterY],
    }
}

/// Side and gap of `target` relative to `candidate` on the axis
/// perpendicular to `edge`; `None` when the two overlap on that axis.
fn separation(candidate: &Rect, target: &Rect, edge: GuideEdge) -> Option<(GuideSide, f64)> {
    if edge.is_horizontal_axis() {
        if target.bottom() < candidate.y {
            Some((GuideSide::Above, candidate.y - target.bottom()))
        } else if target.y > candidate.bottom() {
            Some((GuideSide::Below, target.y - candidate.bottom()))
        } else {
            None
        }
    } else if target.right() < candidate.x {
        Some((GuideSide::LeftOf, candidate.x - target.right()))
    } else if target.x > candidate.right() {
        Some((GuideSide::RightOf, target.x - candidate.right()))
    } else {
        None
    }
}

/// Round a value to the nearest multiple of `spacing`.
pub fn snap_value_to_grid(value: f64, spacing: f64) -> f64 {
    if spacing <= 0.0 || !value.is_finite() {
        return value;
    }
    (value / spacing).round() * spacing
}

/// Snap `p` to the grid on the axes `resolved` leaves open.
pub fn snap_to_grid(p: Point, spacing: f64, resolved: &SnapResult) -> Point {
    Point::new(
        if resolved.dx.is_some() {
            p.x
        } else {
            snap_value_to_grid(p.x, spacing)
        },
        if resolved.dy.is_some() {
            p.y
        } else {
            snap_value_to_grid(p.y, spacing)
        },
    )
}

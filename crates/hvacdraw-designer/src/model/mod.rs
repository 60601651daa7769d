//! Shape model: one `Shape` struct with a tagged per-kind payload.
//!
//! Kind-specific behaviour lives behind three small capability traits:
//! [`Resizable`] (outline and size-derived data), [`Rotatable`] and
//! [`Hookable`]. Each kind struct implements them and [`ShapeKindData`]
//! dispatches by match.

pub mod flags;
pub mod geometry;
pub mod kinds;
pub mod poly_seg;

pub use flags::{ExtraFlags, MoreFlags, ShapeFlags};
pub use geometry::{HitResult, PolyPointsOptions};
pub use kinds::{rrect_corner_size, ForeignObjectKind, OvalKind, PolygonKind, RectKind};
pub use poly_seg::{PolyList, PolySeg, SegKind, ShortRef};

use hvacdraw_core::{GeometryError, Insets, Point, Rect};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

/// Identifier of a shape in the object table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShapeId(pub u64);

impl fmt::Display for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A connector anchored to a point on this shape.
///
/// The connector itself is owned elsewhere; `objid` is resolved through the
/// object table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hook {
    pub objid: ShapeId,
    pub hookpt: u32,
    /// Attachment target in dimension space.
    pub connect: Point,
}

/// Persisted size request, updated when a resize commits.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SizeDim {
    pub width: f64,
    pub height: f64,
}

/// Inputs every kind needs to derive its outline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutlineContext {
    pub width: f64,
    pub height: f64,
    pub shape_param: f64,
    pub extra_flags: ExtraFlags,
    pub more_flags: MoreFlags,
}

/// Size-dependent behaviour of a shape kind.
pub trait Resizable {
    /// Closed outline relative to the frame origin.
    fn outline(&self, ctx: &OutlineContext, max_points: usize) -> Vec<Point>;

    /// Refresh size-derived data after the frame changed. `previous` is the
    /// old frame size when the outline should be rescaled from it.
    fn regenerate(
        &mut self,
        _ctx: &OutlineContext,
        _previous: Option<(f64, f64)>,
    ) -> Result<(), GeometryError> {
        Ok(())
    }

    /// Text indents as fractions of the inside rect, per side.
    fn indent_fractions(&self, _ctx: &OutlineContext) -> Insets {
        Insets::default()
    }

    /// Resize always keeps the aspect ratio.
    fn forces_aspect_lock(&self) -> bool {
        false
    }
}

pub trait Rotatable {
    fn can_rotate(&self) -> bool {
        true
    }
}

pub trait Hookable {
    /// Corner size when perimeter points must follow rounded corners.
    fn rounded_corner(&self, _ctx: &OutlineContext) -> Option<f64> {
        None
    }
}

/// Per-kind payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ShapeKindData {
    Rect(RectKind),
    Oval(OvalKind),
    Polygon(PolygonKind),
    ForeignObject(ForeignObjectKind),
}

impl ShapeKindData {
    pub fn name(&self) -> &'static str {
        match self {
            ShapeKindData::Rect(_) => "rect",
            ShapeKindData::Oval(_) => "oval",
            ShapeKindData::Polygon(_) => "polygon",
            ShapeKindData::ForeignObject(_) => "foreign_object",
        }
    }

    pub fn as_polygon(&self) -> Option<&PolygonKind> {
        match self {
            ShapeKindData::Polygon(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_polygon_mut(&mut self) -> Option<&mut PolygonKind> {
        match self {
            ShapeKindData::Polygon(p) => Some(p),
            _ => None,
        }
    }

    pub fn is_rect(&self) -> bool {
        matches!(self, ShapeKindData::Rect(_))
    }
}

impl Resizable for ShapeKindData {
    fn outline(&self, ctx: &OutlineContext, max_points: usize) -> Vec<Point> {
        match self {
            ShapeKindData::Rect(k) => k.outline(ctx, max_points),
            ShapeKindData::Oval(k) => k.outline(ctx, max_points),
            ShapeKindData::Polygon(k) => k.outline(ctx, max_points),
            ShapeKindData::ForeignObject(k) => k.outline(ctx, max_points),
        }
    }

    fn regenerate(
        &mut self,
        ctx: &OutlineContext,
        previous: Option<(f64, f64)>,
    ) -> Result<(), GeometryError> {
        match self {
            ShapeKindData::Rect(k) => k.regenerate(ctx, previous),
            ShapeKindData::Oval(k) => k.regenerate(ctx, previous),
            ShapeKindData::Polygon(k) => k.regenerate(ctx, previous),
            ShapeKindData::ForeignObject(k) => k.regenerate(ctx, previous),
        }
    }

    fn indent_fractions(&self, ctx: &OutlineContext) -> Insets {
        match self {
            ShapeKindData::Rect(k) => k.indent_fractions(ctx),
            ShapeKindData::Oval(k) => k.indent_fractions(ctx),
            ShapeKindData::Polygon(k) => k.indent_fractions(ctx),
            ShapeKindData::ForeignObject(k) => k.indent_fractions(ctx),
        }
    }

    fn forces_aspect_lock(&self) -> bool {
        match self {
            ShapeKindData::Rect(k) => k.forces_aspect_lock(),
            ShapeKindData::Oval(k) => k.forces_aspect_lock(),
            ShapeKindData::Polygon(k) => k.forces_aspect_lock(),
            ShapeKindData::ForeignObject(k) => k.forces_aspect_lock(),
        }
    }
}

impl Rotatable for ShapeKindData {
    fn can_rotate(&self) -> bool {
        match self {
            ShapeKindData::Rect(k) => k.can_rotate(),
            ShapeKindData::Oval(k) => k.can_rotate(),
            ShapeKindData::Polygon(k) => k.can_rotate(),
            ShapeKindData::ForeignObject(k) => k.can_rotate(),
        }
    }
}

impl Hookable for ShapeKindData {
    fn rounded_corner(&self, ctx: &OutlineContext) -> Option<f64> {
        match self {
            ShapeKindData::Rect(k) => k.rounded_corner(ctx),
            ShapeKindData::Oval(k) => k.rounded_corner(ctx),
            ShapeKindData::Polygon(k) => k.rounded_corner(ctx),
            ShapeKindData::ForeignObject(k) => k.rounded_corner(ctx),
        }
    }
}

/// Rectangles derived from the frame on every update.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DerivedRects {
    /// Frame inflated by half the line thickness (selection extent).
    pub selection: Rect,
    /// Frame deflated by half the line thickness.
    pub inside: Rect,
    /// Inside rect reduced by the kind's indents and the text margin.
    pub text: Rect,
    /// Absolute text indents applied to `inside`.
    pub text_indent: Insets,
    pub corner_size: f64,
}

/// A diagram shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    pub id: ShapeId,
    pub kind: ShapeKindData,
    pub(crate) frame: Rect,
    /// Degrees in `[0, 360)`, clockwise on screen.
    #[serde(default)]
    pub rotation: f64,
    #[serde(default)]
    pub shape_param: f64,
    #[serde(default = "default_line_thickness")]
    pub line_thickness: f64,
    #[serde(default)]
    pub text_margin: f64,
    #[serde(default)]
    pub flags: ShapeFlags,
    #[serde(default)]
    pub extra_flags: ExtraFlags,
    #[serde(default)]
    pub more_flags: MoreFlags,
    /// Explicit connection targets in dimension space.
    #[serde(default)]
    pub connect_points: Vec<Point>,
    /// Attachment point in dimension space, used by the attach hook.
    #[serde(default = "default_attach_point")]
    pub attach_point: Point,
    #[serde(default)]
    pub hooks: SmallVec<[Hook; 4]>,
    #[serde(default)]
    pub size_dim: SizeDim,
    /// Perpendicular offset of the dimension line.
    #[serde(default)]
    pub dimension_offset: f64,
    #[serde(skip)]
    pub(crate) derived: DerivedRects,
}

fn default_line_thickness() -> f64 {
    1.0
}

fn default_attach_point() -> Point {
    let half = hvacdraw_core::constants::DIM_MAX / 2.0;
    Point::new(half, half)
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} @{:.1}°",
            self.kind.name(),
            self.id,
            self.frame,
            self.rotation
        )
    }
}

//! Frame-derived geometry of a shape.
//!
//! [`Shape::update_frame`] is the single entry point that mutates the
//! frame. It recomputes the selection, inside and text rectangles and asks
//! the kind to regenerate its size-dependent outline. Calling it twice with
//! the same frame yields the same derived state.

use hvacdraw_core::constants::{BORDER_HIT_SLOP, MAX_POLY_POINTS, MIN_DIM};
use hvacdraw_core::{GeometryError, Insets, Point, Rect};
use tracing::{debug, trace};

use super::kinds::rrect_corner_size;
use super::{
    DerivedRects, ExtraFlags, ForeignObjectKind, Hookable, OutlineContext, OvalKind, PolyList,
    PolygonKind, RectKind, Resizable, Shape, ShapeFlags, ShapeId, ShapeKindData, SizeDim,
};
use crate::transform::{normalize_degrees, point_in_polygon, point_near_polyline, to_document};
use crate::vertex_gen::{NormalizedPolygon, ShapeFamily};

/// Result of a hit test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitResult {
    None,
    Inside,
    Border,
}

/// How [`Shape::poly_points`] should shape its output.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolyPointsOptions {
    pub max_points: usize,
    /// Keep points relative to the frame origin.
    pub frame_relative: bool,
    /// Grow the outline by half the line thickness.
    pub inflate_for_line: bool,
    /// Apply the shape's rotation.
    pub rotated: bool,
}

impl Default for PolyPointsOptions {
    fn default() -> Self {
        Self {
            max_points: MAX_POLY_POINTS,
            frame_relative: false,
            inflate_for_line: false,
            rotated: false,
        }
    }
}

impl PolyPointsOptions {
    /// Absolute, unrotated outline.
    pub fn absolute() -> Self {
        Self::default()
    }

    pub fn relative(mut self) -> Self {
        self.frame_relative = true;
        self
    }

    pub fn rotated(mut self) -> Self {
        self.rotated = true;
        self
    }

    pub fn inflated(mut self) -> Self {
        self.inflate_for_line = true;
        self
    }

    pub fn with_max_points(mut self, max_points: usize) -> Self {
        self.max_points = max_points.max(4);
        self
    }
}

fn clamp_min_dim(frame: Rect) -> Rect {
    Rect::new(
        frame.x,
        frame.y,
        frame.width.max(MIN_DIM),
        frame.height.max(MIN_DIM),
    )
}

fn is_finite_rect(r: &Rect) -> bool {
    r.x.is_finite() && r.y.is_finite() && r.width.is_finite() && r.height.is_finite()
}

impl Shape {
    fn with_kind(id: ShapeId, kind: ShapeKindData, frame: Rect) -> Result<Self, GeometryError> {
        let mut shape = Shape {
            id,
            kind,
            frame: Rect::default(),
            rotation: 0.0,
            shape_param: 0.0,
            line_thickness: 1.0,
            text_margin: 0.0,
            flags: ShapeFlags::empty(),
            extra_flags: ExtraFlags::empty(),
            more_flags: Default::default(),
            connect_points: Vec::new(),
            attach_point: Point::new(
                hvacdraw_core::constants::DIM_MAX / 2.0,
                hvacdraw_core::constants::DIM_MAX / 2.0,
            ),
            hooks: Default::default(),
            size_dim: SizeDim {
                width: frame.width,
                height: frame.height,
            },
            dimension_offset: 0.0,
            derived: DerivedRects::default(),
        };
        shape.apply_frame(frame, false)?;
        Ok(shape)
    }

    pub fn rect(id: ShapeId, frame: Rect) -> Result<Self, GeometryError> {
        Self::with_kind(id, ShapeKindData::Rect(RectKind::default()), frame)
    }

    /// Rectangle with corners of `min(w, h) · corner_param`.
    pub fn rounded_rect(id: ShapeId, frame: Rect, corner_param: f64) -> Result<Self, GeometryError> {
        let mut shape = Self::rect(id, frame)?;
        shape.set_shape_param(corner_param)?;
        Ok(shape)
    }

    pub fn oval(id: ShapeId, frame: Rect) -> Result<Self, GeometryError> {
        Self::with_kind(id, ShapeKindData::Oval(OvalKind::default()), frame)
    }

    pub fn polygon(
        id: ShapeId,
        frame: Rect,
        family: ShapeFamily,
        shape_param: f64,
    ) -> Result<Self, GeometryError> {
        let mut shape = Self::with_kind(id, ShapeKindData::Polygon(PolygonKind::parametric(family)), frame)?;
        shape.set_shape_param(shape_param)?;
        Ok(shape)
    }

    /// Free-form polygon from normalized vertices.
    pub fn free_polygon(
        id: ShapeId,
        frame: Rect,
        vertices: Vec<Point>,
    ) -> Result<Self, GeometryError> {
        let poly = NormalizedPolygon::new(vertices);
        if poly.len() < 3 {
            return Err(GeometryError::InvalidParameter {
                name: "vertex_count".to_string(),
                value: poly.len() as f64,
            });
        }
        if !poly.is_within_unit_square(1e-9) {
            return Err(GeometryError::InvalidParameter {
                name: "vertices".to_string(),
                value: f64::NAN,
            });
        }
        Self::with_kind(id, ShapeKindData::Polygon(PolygonKind::free(poly)), frame)
    }

    pub fn foreign_object(
        id: ShapeId,
        frame: Rect,
        source: impl Into<String>,
    ) -> Result<Self, GeometryError> {
        Self::with_kind(
            id,
            ShapeKindData::ForeignObject(ForeignObjectKind::new(source)),
            frame,
        )
    }

    pub fn with_rotation(mut self, degrees: f64) -> Self {
        self.set_rotation(degrees);
        self
    }

    pub fn with_line_thickness(mut self, thickness: f64) -> Self {
        self.line_thickness = thickness.max(0.0);
        self.refresh_derived();
        self
    }

    pub fn with_flags(mut self, flags: ShapeFlags) -> Self {
        self.flags.insert(flags);
        self
    }

    pub fn with_text_margin(mut self, margin: f64) -> Self {
        self.text_margin = margin.max(0.0);
        self.refresh_derived();
        self
    }

    pub fn with_connect_points(mut self, points: Vec<Point>) -> Self {
        self.connect_points = points;
        self.flags.insert(ShapeFlags::USE_CONNECT);
        self
    }

    pub fn frame(&self) -> Rect {
        self.frame
    }

    pub fn selection_rect(&self) -> Rect {
        self.derived.selection
    }

    pub fn inside(&self) -> Rect {
        self.derived.inside
    }

    pub fn text_rect(&self) -> Rect {
        self.derived.text
    }

    pub fn text_indent(&self) -> Insets {
        self.derived.text_indent
    }

    /// Corner size of a rounded rectangle; zero for every other kind.
    pub fn corner_size(&self) -> f64 {
        self.derived.corner_size
    }

    /// Rounded-rectangle corner formula applied to this shape's frame,
    /// regardless of kind.
    pub fn rrect_corner_size(&self) -> f64 {
        rrect_corner_size(
            self.frame.width,
            self.frame.height,
            self.shape_param,
            self.more_flags.fixed_rounded_rect(),
        )
    }

    pub fn outline_context(&self) -> OutlineContext {
        self.context_for(&self.frame)
    }

    fn context_for(&self, frame: &Rect) -> OutlineContext {
        OutlineContext {
            width: frame.width,
            height: frame.height,
            shape_param: self.shape_param,
            extra_flags: self.extra_flags,
            more_flags: self.more_flags,
        }
    }

    /// Set a new frame and recompute everything derived from it.
    ///
    /// Width and height below `MIN_DIM` are raised to it. Non-finite
    /// frames are refused and leave the shape untouched.
    pub fn update_frame(&mut self, frame: Rect) -> Result<(), GeometryError> {
        self.apply_frame(frame, true)
    }

    /// Recompute derived state for the current frame, e.g. after loading.
    pub fn refresh(&mut self) -> Result<(), GeometryError> {
        self.apply_frame(self.frame, false)
    }

    fn apply_frame(&mut self, frame: Rect, rescale: bool) -> Result<(), GeometryError> {
        if !is_finite_rect(&frame) {
            return Err(GeometryError::DegenerateFrame {
                width: frame.width,
                height: frame.height,
            });
        }
        let clamped = clamp_min_dim(frame);
        if clamped != frame {
            debug!(shape = %self.id, requested = %frame, "Frame clamped to minimum dimension");
        }

        let previous = (self.frame.width, self.frame.height);
        let ctx = self.context_for(&clamped);
        self.kind.regenerate(&ctx, rescale.then_some(previous))?;
        self.frame = clamped;
        self.refresh_derived();
        trace!(shape = %self.id, frame = %self.frame, "Frame updated");
        Ok(())
    }

    fn refresh_derived(&mut self) {
        let half = self.line_thickness.max(0.0) / 2.0;
        let selection = self.frame.inflate(half, half);
        let mut inside = self.frame.inflate(-half, -half);
        inside.width = inside.width.max(0.0);
        inside.height = inside.height.max(0.0);

        let ctx = self.outline_context();
        let fr = self.kind.indent_fractions(&ctx);
        let text_indent = Insets::new(
            fr.left * inside.width,
            fr.top * inside.height,
            fr.right * inside.width,
            fr.bottom * inside.height,
        );
        let text = inside
            .sub_insets(&text_indent)
            .sub_insets(&Insets::uniform(self.text_margin));

        self.derived = DerivedRects {
            selection,
            inside,
            text,
            text_indent,
            corner_size: self.kind.rounded_corner(&ctx).unwrap_or(0.0),
        };
    }

    /// Frame whose text rect would be `trect`. Inverse of the text-rect
    /// derivation in [`Shape::update_frame`], subject to `MIN_DIM`.
    pub fn trect_to_frame(&self, trect: &Rect) -> Rect {
        let fr = self.kind.indent_fractions(&self.outline_context());
        let m = self.text_margin;
        let half = self.line_thickness.max(0.0) / 2.0;

        let width_share = (1.0 - fr.left - fr.right).max(0.1);
        let height_share = (1.0 - fr.top - fr.bottom).max(0.1);
        let inside_w = (trect.width + 2.0 * m) / width_share;
        let inside_h = (trect.height + 2.0 * m) / height_share;
        let inside = Rect::new(
            trect.x - m - fr.left * inside_w,
            trect.y - m - fr.top * inside_h,
            inside_w,
            inside_h,
        );
        clamp_min_dim(inside.inflate(half, half))
    }

    /// Outline points.
    ///
    /// Rounded rectangles return `4 · max_points / 2 + 1` points, ovals
    /// `2 · (max_points / 2 - 1) + 1`, plain rectangles five and polygons
    /// their vertex count; every outline is closed.
    pub fn poly_points(&self, opts: PolyPointsOptions) -> Vec<Point> {
        let ctx = self.outline_context();
        let mut pts = self.kind.outline(&ctx, opts.max_points);
        let local = Rect::new(0.0, 0.0, self.frame.width, self.frame.height);

        if opts.inflate_for_line && self.line_thickness > 0.0 {
            let c = local.center();
            let sx = (local.width + self.line_thickness) / local.width;
            let sy = (local.height + self.line_thickness) / local.height;
            for p in pts.iter_mut() {
                p.x = c.x + (p.x - c.x) * sx;
                p.y = c.y + (p.y - c.y) * sy;
            }
        }

        let frame = if opts.frame_relative {
            local
        } else {
            for p in pts.iter_mut() {
                p.x += self.frame.x;
                p.y += self.frame.y;
            }
            self.frame
        };

        if opts.rotated {
            to_document(&frame, self.rotation, &mut pts);
        }
        pts
    }

    /// Hit-test a document point.
    ///
    /// Shapes with explicit connect points are never border-only. A point
    /// outside the selection rect misses; a point inside the outline is
    /// `Inside` unless the shape is transparent or border-only, in which
    /// case only points within `thickness / 2 + BORDER_HIT_SLOP` of the
    /// outline hit, as `Border`.
    pub fn hit(&self, p: Point, border_only: bool, transparent: bool) -> HitResult {
        let border_only = border_only && !self.flags.use_connect();
        let local = self.to_local_point(p);

        if !self.derived.selection.contains_point(&local) {
            return HitResult::None;
        }

        let outline = self.poly_points(PolyPointsOptions::absolute());
        let mut result = if point_in_polygon(&local, &outline) {
            HitResult::Inside
        } else {
            HitResult::None
        };
        if transparent || border_only {
            result = HitResult::None;
        }
        if result == HitResult::None {
            let slop = self.line_thickness.max(0.0) / 2.0 + BORDER_HIT_SLOP;
            if point_near_polyline(&local, &outline, slop) {
                result = HitResult::Border;
            }
        }
        result
    }

    /// Bounding box of the rotated outline, used by snapping.
    pub fn snap_rect(&self) -> Rect {
        let pts = self.poly_points(PolyPointsOptions::absolute().rotated());
        Rect::bounding(&pts).unwrap_or(self.frame)
    }

    /// Bounding box of the rotated frame, used by alignment commands.
    pub fn align_rect(&self) -> Rect {
        crate::transform::rotated_bounds(&self.frame, self.rotation)
    }

    /// Bring a document point into the shape's unrotated axes.
    pub fn to_local_point(&self, p: Point) -> Point {
        crate::transform::point_to_local(self.frame.center(), self.rotation, p)
    }

    /// Place a frame-local point into document space.
    pub fn to_document_point(&self, p: Point) -> Point {
        crate::transform::point_to_document(self.frame.center(), self.rotation, p)
    }

    /// Resize keeping the origin; records the size request and dirties
    /// hooks.
    pub fn set_size(&mut self, width: f64, height: f64) -> Result<(), GeometryError> {
        let frame = Rect::new(self.frame.x, self.frame.y, width, height);
        self.update_frame(frame)?;
        self.size_dim = SizeDim {
            width: self.frame.width,
            height: self.frame.height,
        };
        self.mark_hooks_dirty();
        Ok(())
    }

    pub fn set_position(&mut self, x: f64, y: f64) -> Result<(), GeometryError> {
        let frame = Rect::new(x, y, self.frame.width, self.frame.height);
        self.update_frame(frame)?;
        self.mark_hooks_dirty();
        Ok(())
    }

    pub fn set_rotation(&mut self, degrees: f64) {
        self.rotation = if degrees.is_finite() {
            normalize_degrees(degrees)
        } else {
            0.0
        };
        self.mark_hooks_dirty();
    }

    pub fn set_shape_param(&mut self, param: f64) -> Result<(), GeometryError> {
        if !param.is_finite() {
            return Err(GeometryError::InvalidParameter {
                name: "shape_param".to_string(),
                value: param,
            });
        }
        let previous = self.shape_param;
        self.shape_param = param.max(0.0);
        if let Err(e) = self.apply_frame(self.frame, false) {
            self.shape_param = previous;
            return Err(e);
        }
        self.mark_hooks_dirty();
        Ok(())
    }

    /// Toggle a mirror flag and mirror the outline to match.
    pub fn flip(&mut self, horizontal: bool) -> Result<(), GeometryError> {
        let flag = if horizontal {
            ExtraFlags::FLIP_HORIZONTAL
        } else {
            ExtraFlags::FLIP_VERTICAL
        };
        let on = !self.extra_flags.contains(flag);
        self.extra_flags.set(flag, on);

        let (w, h) = (self.frame.width, self.frame.height);
        if let ShapeKindData::Polygon(poly) = &mut self.kind {
            if let Some(list) = &mut poly.poly_list {
                list.mirror(horizontal, w, h);
            }
            if poly.family.is_none() || poly.poly_list.is_some() {
                for p in poly.vertices.points.iter_mut() {
                    if horizontal {
                        p.x = 1.0 - p.x;
                    } else {
                        p.y = 1.0 - p.y;
                    }
                }
            }
        }
        self.apply_frame(self.frame, false)?;
        self.mark_hooks_dirty();
        Ok(())
    }

    /// Replace the outline with an edited segment list whose points are
    /// relative to `frame`'s origin.
    pub(crate) fn replace_outline(
        &mut self,
        frame: Rect,
        list: PolyList,
        vertices: NormalizedPolygon,
    ) -> Result<(), GeometryError> {
        let poly_list = (!list.is_straight()).then_some(list);
        self.kind = ShapeKindData::Polygon(PolygonKind {
            family: None,
            vertices,
            poly_list,
        });
        self.apply_frame(frame, false)?;
        self.mark_hooks_dirty();
        Ok(())
    }

    pub fn mark_hooks_dirty(&mut self) {
        self.flags.insert(ShapeFlags::HOOKS_DIRTY);
    }

    pub fn clear_hooks_dirty(&mut self) {
        self.flags.remove(ShapeFlags::HOOKS_DIRTY);
    }

    /// Whether resizes must keep the aspect ratio, before modifiers.
    pub fn wants_aspect_lock(&self) -> bool {
        self.flags.constrain_aspect() || self.kind.forces_aspect_lock()
    }
}

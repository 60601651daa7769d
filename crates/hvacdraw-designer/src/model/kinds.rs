//! Per-kind payloads and their capability implementations.

use hvacdraw_core::constants::{ROUND_FACTOR, RRECT_FIXED_DIM};
use hvacdraw_core::{GeometryError, Insets, Point, Rect};
use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_1_SQRT_2;

use super::poly_seg::PolyList;
use super::{Hookable, OutlineContext, Resizable, Rotatable};
use crate::transform::flip_normalized;
use crate::vertex_gen::{self, ArcSampler, CurveBounds, NormalizedPolygon, ShapeFamily};

/// Corner size of a rounded rectangle.
///
/// Proportional corners are `min(w, h) · param`; fixed corners are
/// `RRECT_FIXED_DIM · param`. Either way the result is capped at
/// `0.4 · min(w, h)` so opposite arcs never meet.
pub fn rrect_corner_size(width: f64, height: f64, shape_param: f64, fixed: bool) -> f64 {
    let min_side = width.min(height).max(0.0);
    let param = if shape_param.is_finite() {
        shape_param.max(0.0)
    } else {
        0.0
    };
    let raw = if fixed {
        RRECT_FIXED_DIM * param
    } else {
        min_side * param
    };
    raw.min(0.4 * min_side)
}

fn plain_outline(ctx: &OutlineContext) -> Vec<Point> {
    Rect::new(0.0, 0.0, ctx.width, ctx.height).to_polygon()
}

fn close_ring(points: &mut Vec<Point>) {
    if let (Some(first), Some(last)) = (points.first().copied(), points.last()) {
        if !first.approx_eq(last, 1e-9) {
            points.push(first);
        }
    }
}

/// Rectangle, optionally with rounded corners (`shape_param > 0`).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RectKind {}

impl RectKind {
    fn corner(ctx: &OutlineContext) -> f64 {
        rrect_corner_size(
            ctx.width,
            ctx.height,
            ctx.shape_param,
            ctx.more_flags.fixed_rounded_rect(),
        )
    }
}

impl Resizable for RectKind {
    fn outline(&self, ctx: &OutlineContext, max_points: usize) -> Vec<Point> {
        let c = Self::corner(ctx);
        if c <= 0.0 {
            return plain_outline(ctx);
        }

        let (w, h) = (ctx.width, ctx.height);
        let samples = (max_points / 2).max(2);
        let mut out = Vec::with_capacity(4 * samples + 1);
        ArcSampler::new(CurveBounds::from_origin(0.0, 0.0, c, 2.0 * c), samples)
            .with_offsets(0.0, c)
            .right_to_left(true)
            .sample_into(&mut out, 1.0, 1.0);
        ArcSampler::new(CurveBounds::from_origin(0.0, h - 2.0 * c, c, 2.0 * c), samples)
            .with_offsets(c, 0.0)
            .right_to_left(true)
            .sample_into(&mut out, 1.0, 1.0);
        ArcSampler::new(CurveBounds::from_origin(w - c, h, c, -2.0 * c), samples)
            .with_offsets(0.0, -c)
            .sample_into(&mut out, 1.0, 1.0);
        ArcSampler::new(CurveBounds::from_origin(w - c, 2.0 * c, c, -2.0 * c), samples)
            .with_offsets(-c, 0.0)
            .sample_into(&mut out, 1.0, 1.0);
        close_ring(&mut out);
        out
    }

    fn indent_fractions(&self, ctx: &OutlineContext) -> Insets {
        if ctx.more_flags.fixed_rounded_rect() {
            let c = Self::corner(ctx) * ROUND_FACTOR;
            if ctx.width <= 0.0 || ctx.height <= 0.0 {
                return Insets::default();
            }
            return Insets::new(
                c / ctx.width,
                c / ctx.height,
                c / ctx.width,
                c / ctx.height,
            );
        }
        Insets::uniform(ctx.shape_param.clamp(0.0, 0.4) * ROUND_FACTOR)
    }
}

impl Rotatable for RectKind {}

impl Hookable for RectKind {
    fn rounded_corner(&self, ctx: &OutlineContext) -> Option<f64> {
        let c = Self::corner(ctx);
        (c > 0.0).then_some(c)
    }
}

/// Ellipse inscribed in the frame.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OvalKind {}

impl Resizable for OvalKind {
    /// Two half-ellipse passes of `max_points / 2` samples each; the last
    /// sample of each pass is dropped and the ring is closed.
    fn outline(&self, ctx: &OutlineContext, max_points: usize) -> Vec<Point> {
        let (w, h) = (ctx.width, ctx.height);
        let samples = (max_points / 2).max(3);
        let mut out = Vec::with_capacity(2 * samples);

        ArcSampler::new(CurveBounds::from_origin(w / 2.0, 0.0, w / 2.0, h), samples)
            .sample_into(&mut out, 1.0, 1.0);
        out.pop();
        ArcSampler::new(CurveBounds::from_origin(0.0, h, w / 2.0, -h), samples)
            .right_to_left(true)
            .sample_into(&mut out, 1.0, 1.0);
        out.pop();
        close_ring(&mut out);
        out
    }

    fn indent_fractions(&self, _ctx: &OutlineContext) -> Insets {
        Insets::uniform((1.0 - FRAC_1_SQRT_2) / 2.0)
    }
}

impl Rotatable for OvalKind {}
impl Hookable for OvalKind {}

/// Polygon outline: a parametric family, or free-form vertices.
///
/// `vertices` is always the normalized outline. When `poly_list` is
/// present it holds the editable segment list in frame-relative units and
/// takes precedence for drawing.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PolygonKind {
    #[serde(default)]
    pub family: Option<ShapeFamily>,
    #[serde(default)]
    pub vertices: NormalizedPolygon,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poly_list: Option<PolyList>,
}

impl PolygonKind {
    pub fn parametric(family: ShapeFamily) -> Self {
        Self {
            family: Some(family),
            vertices: NormalizedPolygon::default(),
            poly_list: None,
        }
    }

    pub fn free(vertices: NormalizedPolygon) -> Self {
        Self {
            family: None,
            vertices,
            poly_list: None,
        }
    }

    /// Arc samples used when flattening the segment list.
    fn arc_samples(max_points: usize) -> usize {
        (max_points / 4).max(4)
    }
}

impl Resizable for PolygonKind {
    fn outline(&self, ctx: &OutlineContext, max_points: usize) -> Vec<Point> {
        if let Some(list) = &self.poly_list {
            let mut pts = list.to_points(Self::arc_samples(max_points));
            close_ring(&mut pts);
            return pts;
        }
        let mut pts = self
            .vertices
            .scale_to(&Rect::new(0.0, 0.0, ctx.width, ctx.height));
        close_ring(&mut pts);
        pts
    }

    fn regenerate(
        &mut self,
        ctx: &OutlineContext,
        previous: Option<(f64, f64)>,
    ) -> Result<(), GeometryError> {
        if let Some(list) = &mut self.poly_list {
            if let Some((pw, ph)) = previous.filter(|(pw, ph)| *pw > 0.0 && *ph > 0.0) {
                list.scale(ctx.width / pw, ctx.height / ph);
            }
            return Ok(());
        }
        if let Some(family) = self.family {
            let mut poly = vertex_gen::generate(family, ctx.width, ctx.height, ctx.shape_param)?;
            flip_normalized(&mut poly.points, ctx.extra_flags);
            self.vertices = poly;
        }
        Ok(())
    }

    fn indent_fractions(&self, ctx: &OutlineContext) -> Insets {
        match self.family {
            Some(family) => {
                let fr = vertex_gen::text_indent_fractions(
                    family,
                    ctx.width,
                    ctx.height,
                    ctx.shape_param,
                );
                // Indents follow the outline when it is mirrored.
                let (left, right) = if ctx.extra_flags.flip_horizontal() {
                    (fr.right, fr.left)
                } else {
                    (fr.left, fr.right)
                };
                let (top, bottom) = if ctx.extra_flags.flip_vertical() {
                    (fr.bottom, fr.top)
                } else {
                    (fr.top, fr.bottom)
                };
                Insets::new(left, top, right, bottom)
            }
            None => Insets::default(),
        }
    }
}

impl Rotatable for PolygonKind {}
impl Hookable for PolygonKind {}

/// Embedded object drawn by an external renderer (picture, symbol).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForeignObjectKind {
    /// Name or path of the embedded content.
    pub source: String,
    #[serde(default = "default_true")]
    pub keep_aspect: bool,
}

fn default_true() -> bool {
    true
}

impl ForeignObjectKind {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            keep_aspect: true,
        }
    }
}

impl Resizable for ForeignObjectKind {
    fn outline(&self, ctx: &OutlineContext, _max_points: usize) -> Vec<Point> {
        plain_outline(ctx)
    }

    fn forces_aspect_lock(&self) -> bool {
        self.keep_aspect
    }
}

impl Rotatable for ForeignObjectKind {}
impl Hookable for ForeignObjectKind {}

//! Parametric vertex generation for polygon shape families.
//!
//! Every generator is a pure function of the frame size and the shape
//! parameter and returns an outline in normalized `0..1` space, so the
//! result can be scaled onto any frame. Size-dependent parameters are
//! clamped so the outline never inverts or leaves the unit square.

pub mod arc_sampler;

pub use arc_sampler::{ArcSampler, CurveBounds};

use hvacdraw_core::constants::ROUND_FACTOR;
use hvacdraw_core::{GeometryError, Insets, Point, Rect};
use serde::{Deserialize, Serialize};

use self::arc_sampler::safe_sqrt;

/// Samples per curve for the terminal, storage and document families.
const CURVE_SAMPLES: usize = 40;
/// Samples for the single half-ellipse of delay and display.
const HALF_CURVE_SAMPLES: usize = 80;
/// Shaft inset of the block arrows.
const ARROW_SHAFT: f64 = 0.15;

/// Parametric polygon families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeFamily {
    Parallelogram,
    Diamond,
    Document,
    Terminal,
    ArrowRight,
    ArrowLeft,
    ArrowTop,
    ArrowBottom,
    Triangle,
    TriangleDown,
    Input,
    Trapezoid,
    TrapezoidDown,
    Octagon,
    Storage,
    Hexagon,
    Pentagon,
    PentagonLeft,
    Delay,
    Display,
}

impl ShapeFamily {
    pub const ALL: [ShapeFamily; 20] = [
        ShapeFamily::Parallelogram,
        ShapeFamily::Diamond,
        ShapeFamily::Document,
        ShapeFamily::Terminal,
        ShapeFamily::ArrowRight,
        ShapeFamily::ArrowLeft,
        ShapeFamily::ArrowTop,
        ShapeFamily::ArrowBottom,
        ShapeFamily::Triangle,
        ShapeFamily::TriangleDown,
        ShapeFamily::Input,
        ShapeFamily::Trapezoid,
        ShapeFamily::TrapezoidDown,
        ShapeFamily::Octagon,
        ShapeFamily::Storage,
        ShapeFamily::Hexagon,
        ShapeFamily::Pentagon,
        ShapeFamily::PentagonLeft,
        ShapeFamily::Delay,
        ShapeFamily::Display,
    ];

    /// Whether the family reads `shape_param` at all.
    pub fn is_parametric(self) -> bool {
        !matches!(
            self,
            ShapeFamily::Diamond
                | ShapeFamily::Terminal
                | ShapeFamily::Triangle
                | ShapeFamily::TriangleDown
        )
    }

    /// Families whose parameter is a fraction of the frame rather than a
    /// length in document units.
    pub fn param_is_ratio(self) -> bool {
        matches!(self, ShapeFamily::Octagon)
    }

    /// Whether the outline is traced with sampled curves.
    pub fn is_curved(self) -> bool {
        matches!(
            self,
            ShapeFamily::Document
                | ShapeFamily::Terminal
                | ShapeFamily::Storage
                | ShapeFamily::Delay
                | ShapeFamily::Display
        )
    }
}

impl std::fmt::Display for ShapeFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Outline in normalized `0..1 × 0..1` space.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NormalizedPolygon {
    pub points: Vec<Point>,
}

impl NormalizedPolygon {
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Scale onto `frame`, returning absolute points.
    pub fn scale_to(&self, frame: &Rect) -> Vec<Point> {
        self.points
            .iter()
            .map(|p| Point::new(frame.x + p.x * frame.width, frame.y + p.y * frame.height))
            .collect()
    }

    /// True when every point lies within the unit square (with tolerance).
    pub fn is_within_unit_square(&self, tolerance: f64) -> bool {
        self.points.iter().all(|p| {
            p.x >= -tolerance && p.x <= 1.0 + tolerance && p.y >= -tolerance && p.y <= 1.0 + tolerance
        })
    }
}

/// Generate the normalized outline for `family` on a `width × height` frame.
///
/// # Arguments
/// * `family` - Shape family to trace
/// * `width`, `height` - Frame size in document units
/// * `shape_param` - Family-specific size parameter (a length, or a ratio
///   for the octagon)
///
/// # Returns
/// The normalized outline, or `DegenerateFrame` for a zero-area frame.
pub fn generate(
    family: ShapeFamily,
    width: f64,
    height: f64,
    shape_param: f64,
) -> Result<NormalizedPolygon, GeometryError> {
    if !(width > 0.0 && height > 0.0) {
        return Err(GeometryError::DegenerateFrame { width, height });
    }
    if !shape_param.is_finite() {
        return Err(GeometryError::InvalidParameter {
            name: "shape_param".to_string(),
            value: shape_param,
        });
    }
    let param = shape_param.max(0.0);

    let points = match family {
        ShapeFamily::Parallelogram => parallelogram(width, param),
        ShapeFamily::Diamond => diamond(),
        ShapeFamily::Document => document(width, height, param),
        ShapeFamily::Terminal => terminal(width, height),
        ShapeFamily::ArrowRight => arrow_right(width, param),
        ShapeFamily::ArrowLeft => arrow_left(width, param),
        ShapeFamily::ArrowTop => arrow_top(height, param),
        ShapeFamily::ArrowBottom => arrow_bottom(height, param),
        ShapeFamily::Triangle => pts(&[(0.5, 0.0), (1.0, 1.0), (0.0, 1.0), (0.5, 0.0)]),
        ShapeFamily::TriangleDown => pts(&[(0.0, 0.0), (1.0, 0.0), (0.5, 1.0), (0.0, 0.0)]),
        ShapeFamily::Input => input(height, param),
        ShapeFamily::Trapezoid => trapezoid(width, param),
        ShapeFamily::TrapezoidDown => trapezoid_down(width, param),
        ShapeFamily::Octagon => {
            let (h_off, v_off) = octagon_offsets(width, height, param);
            octagon(h_off, v_off)
        }
        ShapeFamily::Storage => storage(width, height, param),
        ShapeFamily::Hexagon => hexagon(width, param),
        ShapeFamily::Pentagon => pentagon(height, param),
        ShapeFamily::PentagonLeft => pentagon_left(width, param),
        ShapeFamily::Delay => delay(width, height, param),
        ShapeFamily::Display => display(width, height, param),
    };

    Ok(NormalizedPolygon::new(points))
}

fn pts(raw: &[(f64, f64)]) -> Vec<Point> {
    raw.iter().map(|&(x, y)| Point::new(x, y)).collect()
}

fn parallelogram(width: f64, param: f64) -> Vec<Point> {
    let off = (param / width).min(1.0);
    pts(&[(off, 0.0), (1.0, 0.0), (1.0 - off, 1.0), (0.0, 1.0), (off, 0.0)])
}

fn diamond() -> Vec<Point> {
    pts(&[(0.5, 0.0), (1.0, 0.5), (0.5, 1.0), (0.0, 0.5), (0.5, 0.0)])
}

/// Wavy-bottom document: 4 corner points, two 40-sample half waves, and
/// the closing point (85 points).
fn document(width: f64, height: f64, param: f64) -> Vec<Point> {
    let wave = param.min(height / 2.0);
    let base = (height - wave) / height;

    let mut out = Vec::with_capacity(85);
    out.push(Point::new(0.0, base));
    out.push(Point::new(0.0, 0.0));
    out.push(Point::new(1.0, 0.0));
    out.push(Point::new(1.0, base));

    let quarter = width / 4.0;
    let step = 2.0 * quarter / CURVE_SAMPLES as f64;
    for i in 1..=CURVE_SAMPLES {
        let off = step * i as f64;
        let ratio = (quarter - off) / quarter;
        let x = width - off;
        let y = height - wave - safe_sqrt(1.0 - ratio * ratio) * wave;
        out.push(Point::new(x / width, y / height));
    }
    for i in 1..=CURVE_SAMPLES {
        let off = step * i as f64;
        let ratio = (quarter - off) / quarter;
        let x = width - (off + 2.0 * quarter);
        let y = height - wave + safe_sqrt(1.0 - ratio * ratio) * wave;
        out.push(Point::new(x / width, y / height));
    }
    out.push(Point::new(0.0, base));
    out
}

/// Stadium outline with semicircular ends (161 points).
fn terminal(width: f64, height: f64) -> Vec<Point> {
    let mut radius = (height / 2.0).floor();
    if radius > width / 2.0 {
        radius = (width / 2.0).floor();
    }

    let mut out = Vec::with_capacity(4 * CURVE_SAMPLES + 1);
    ArcSampler::new(CurveBounds::new(0.0, 0.0, radius, 2.0 * radius), CURVE_SAMPLES)
        .with_offsets(0.0, radius)
        .right_to_left(true)
        .sample_into(&mut out, width, height);
    ArcSampler::new(
        CurveBounds::new(0.0, height - 2.0 * radius, radius, height),
        CURVE_SAMPLES,
    )
    .with_offsets(radius, 0.0)
    .right_to_left(true)
    .sample_into(&mut out, width, height);
    ArcSampler::new(
        CurveBounds::new(width - radius, height, width, height - 2.0 * radius),
        CURVE_SAMPLES,
    )
    .with_offsets(0.0, -radius)
    .sample_into(&mut out, width, height);
    ArcSampler::new(
        CurveBounds::new(width - radius, 2.0 * radius, width, 0.0),
        CURVE_SAMPLES,
    )
    .with_offsets(-radius, 0.0)
    .sample_into(&mut out, width, height);

    let first = out[0];
    out.push(first);
    out
}

fn arrow_right(width: f64, param: f64) -> Vec<Point> {
    let head = (param / width).min(1.0);
    let (lo, hi) = (ARROW_SHAFT, 1.0 - ARROW_SHAFT);
    pts(&[
        (0.0, lo),
        (1.0 - head, lo),
        (1.0 - head, 0.0),
        (1.0, 0.5),
        (1.0 - head, 1.0),
        (1.0 - head, hi),
        (0.0, hi),
        (0.0, lo),
    ])
}

fn arrow_left(width: f64, param: f64) -> Vec<Point> {
    let head = (param / width).min(1.0);
    let (lo, hi) = (ARROW_SHAFT, 1.0 - ARROW_SHAFT);
    pts(&[
        (0.0, 0.5),
        (head, 0.0),
        (head, lo),
        (1.0, lo),
        (1.0, hi),
        (head, hi),
        (head, 1.0),
        (0.0, 0.5),
    ])
}

fn arrow_top(height: f64, param: f64) -> Vec<Point> {
    let head = (param / height).min(1.0);
    let (lo, hi) = (ARROW_SHAFT, 1.0 - ARROW_SHAFT);
    pts(&[
        (0.5, 0.0),
        (0.0, head),
        (lo, head),
        (lo, 1.0),
        (hi, 1.0),
        (hi, head),
        (1.0, head),
        (0.5, 0.0),
    ])
}

fn arrow_bottom(height: f64, param: f64) -> Vec<Point> {
    let head = (param / height).min(1.0);
    let (lo, hi) = (ARROW_SHAFT, 1.0 - ARROW_SHAFT);
    pts(&[
        (lo, 0.0),
        (lo, 1.0 - head),
        (0.0, 1.0 - head),
        (0.5, 1.0),
        (1.0, 1.0 - head),
        (hi, 1.0 - head),
        (hi, 0.0),
        (lo, 0.0),
    ])
}

fn input(height: f64, param: f64) -> Vec<Point> {
    let corner = (param / height).min(1.0);
    pts(&[(0.0, corner), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0), (0.0, corner)])
}

fn trapezoid(width: f64, param: f64) -> Vec<Point> {
    let off = (param / width).min(0.5);
    pts(&[(off, 0.0), (1.0 - off, 0.0), (1.0, 1.0), (0.0, 1.0), (off, 0.0)])
}

fn trapezoid_down(width: f64, param: f64) -> Vec<Point> {
    let off = (param / width).min(0.5);
    pts(&[(0.0, 0.0), (1.0, 0.0), (1.0 - off, 1.0), (off, 1.0), (0.0, 0.0)])
}

/// Solve the octagon's horizontal and vertical cut ratios.
///
/// The cut length is the same in both directions, `min(p·w, p·h)`, so the
/// corners stay at 45° whatever the frame's aspect ratio.
pub fn octagon_offsets(width: f64, height: f64, ratio: f64) -> (f64, f64) {
    let ratio = ratio.clamp(0.0, 0.5);
    let cut = (ratio * height).min(ratio * width);
    (cut / width, cut / height)
}

fn octagon(h_off: f64, v_off: f64) -> Vec<Point> {
    pts(&[
        (h_off, 0.0),
        (1.0 - h_off, 0.0),
        (1.0, v_off),
        (1.0, 1.0 - v_off),
        (1.0 - h_off, 1.0),
        (h_off, 1.0),
        (0.0, 1.0 - v_off),
        (0.0, v_off),
        (h_off, 0.0),
    ])
}

/// Drum outline: convex left curve, concave right curve (84 points).
fn storage(width: f64, height: f64, param: f64) -> Vec<Point> {
    let curve = param.min(width / 2.0);

    let mut left = Vec::with_capacity(CURVE_SAMPLES);
    ArcSampler::new(CurveBounds::new(0.0, 0.0, curve, height), CURVE_SAMPLES)
        .right_to_left(true)
        .sample_into(&mut left, width, height);

    let mut out = Vec::with_capacity(2 * CURVE_SAMPLES + 4);
    out.push(Point::new(curve / width, 1.0));
    out.extend(left.into_iter().rev());
    out.push(Point::new(curve / width, 0.0));
    out.push(Point::new(1.0, 0.0));
    ArcSampler::new(
        CurveBounds::new(width - curve, 0.0, width, height),
        CURVE_SAMPLES,
    )
    .right_to_left(true)
    .sample_into(&mut out, width, height);
    out.push(Point::new(1.0, 1.0));
    out
}

fn hexagon(width: f64, param: f64) -> Vec<Point> {
    let off = (param / width).min(0.5);
    pts(&[
        (off, 0.0),
        (1.0 - off, 0.0),
        (1.0, 0.5),
        (1.0 - off, 1.0),
        (off, 1.0),
        (0.0, 0.5),
        (off, 0.0),
    ])
}

fn pentagon(height: f64, param: f64) -> Vec<Point> {
    let top = (param / height).min(1.0);
    pts(&[
        (0.0, 1.0 - top),
        (0.0, 0.0),
        (1.0, 0.0),
        (1.0, 1.0 - top),
        (0.5, 1.0),
        (0.0, 1.0 - top),
    ])
}

fn pentagon_left(width: f64, param: f64) -> Vec<Point> {
    let left = (param / width).min(1.0);
    pts(&[
        (left, 0.0),
        (1.0, 0.0),
        (1.0, 1.0),
        (left, 1.0),
        (0.0, 0.5),
        (left, 0.0),
    ])
}

/// D-shaped outline with a rounded right side (84 points).
fn delay(width: f64, height: f64, param: f64) -> Vec<Point> {
    let curve = param.min(width / 2.0);
    let start = (width - curve) / width;

    let mut out = Vec::with_capacity(HALF_CURVE_SAMPLES + 4);
    out.push(Point::new(0.0, 1.0));
    out.push(Point::new(0.0, 0.0));
    out.push(Point::new(start, 0.0));
    ArcSampler::new(
        CurveBounds::new(width - curve, 0.0, width, height),
        HALF_CURVE_SAMPLES,
    )
    .sample_into(&mut out, width, height);
    out.push(Point::new(start, 1.0));
    out
}

/// Display outline: pointed left side, rounded right side (86 points).
fn display(width: f64, height: f64, param: f64) -> Vec<Point> {
    let curve = param.min(width / 2.0);
    let left = curve / width;
    let start = (width - curve) / width;

    let mut out = Vec::with_capacity(HALF_CURVE_SAMPLES + 6);
    out.push(Point::new(left, 1.0));
    out.push(Point::new(0.0, 0.5));
    out.push(Point::new(left, 0.0));
    out.push(Point::new(start, 0.0));
    ArcSampler::new(
        CurveBounds::new(width - curve, 0.0, width, height),
        HALF_CURVE_SAMPLES,
    )
    .sample_into(&mut out, width, height);
    out.push(Point::new(start, 1.0));
    out.push(Point::new(left, 1.0));
    out
}

/// Text indents for `family` as fractions of the inside rect.
///
/// Each side is clamped to `0.45` so the text rect never inverts.
pub fn text_indent_fractions(family: ShapeFamily, width: f64, height: f64, param: f64) -> Insets {
    if !(width > 0.0 && height > 0.0) {
        return Insets::default();
    }
    let param = if param.is_finite() { param.max(0.0) } else { 0.0 };
    let along_w = (param / width).min(1.0);
    let along_h = (param / height).min(1.0);

    let raw = match family {
        ShapeFamily::Diamond => Insets::uniform(0.25),
        ShapeFamily::Parallelogram => Insets::new(along_w, 0.0, along_w, 0.0),
        ShapeFamily::Trapezoid | ShapeFamily::TrapezoidDown | ShapeFamily::Hexagon => {
            let off = along_w.min(0.5);
            Insets::new(off, 0.0, off, 0.0)
        }
        ShapeFamily::Octagon => {
            let (h_off, v_off) = octagon_offsets(width, height, param);
            Insets::new(h_off / 2.0, v_off / 2.0, h_off / 2.0, v_off / 2.0)
        }
        ShapeFamily::Terminal => {
            let r = (height / 2.0).min(width / 2.0) * ROUND_FACTOR / width;
            Insets::new(r, 0.0, r, 0.0)
        }
        ShapeFamily::Document => Insets::new(0.0, 0.0, 0.0, param.min(height / 2.0) / height),
        ShapeFamily::Storage => {
            let c = param.min(width / 2.0) / width;
            Insets::new(c, 0.0, c, 0.0)
        }
        ShapeFamily::Delay => {
            let c = param.min(width / 2.0) / width;
            Insets::new(0.0, 0.0, c * ROUND_FACTOR, 0.0)
        }
        ShapeFamily::Display => {
            let c = param.min(width / 2.0) / width;
            Insets::new(c, 0.0, c * ROUND_FACTOR, 0.0)
        }
        ShapeFamily::ArrowRight => Insets::new(0.0, ARROW_SHAFT, along_w, ARROW_SHAFT),
        ShapeFamily::ArrowLeft => Insets::new(along_w, ARROW_SHAFT, 0.0, ARROW_SHAFT),
        ShapeFamily::ArrowTop => Insets::new(ARROW_SHAFT, along_h, ARROW_SHAFT, 0.0),
        ShapeFamily::ArrowBottom => Insets::new(ARROW_SHAFT, 0.0, ARROW_SHAFT, along_h),
        ShapeFamily::Triangle => Insets::new(0.25, 0.5, 0.25, 0.0),
        ShapeFamily::TriangleDown => Insets::new(0.25, 0.0, 0.25, 0.5),
        ShapeFamily::Input => Insets::new(0.0, along_h, 0.0, 0.0),
        ShapeFamily::Pentagon => Insets::new(0.0, 0.0, 0.0, along_h),
        ShapeFamily::PentagonLeft => Insets::new(along_w, 0.0, 0.0, 0.0),
    };

    Insets::new(
        raw.left.clamp(0.0, 0.45),
        raw.top.clamp(0.0, 0.45),
        raw.right.clamp(0.0, 0.45),
        raw.bottom.clamp(0.0, 0.45),
    )
}

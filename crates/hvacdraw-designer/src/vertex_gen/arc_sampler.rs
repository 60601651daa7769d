//! Elliptical curve sampling shared by the curved shape families and the
//! rounded-rectangle outline.
//!
//! The sampler walks down a bounding box from `top` towards `bottom`,
//! placing each sample on an ellipse whose horizontal radius is the box
//! width. Negative heights (bottom above top) walk upward, which is how
//! callers trace corners in either direction.

use hvacdraw_core::Point;

/// Bounds of one curve as left/top/right/bottom edges.
///
/// `bottom` may be smaller than `top`; the sampler then walks upward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveBounds {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl CurveBounds {
    pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Build from an origin and a (possibly negative) height.
    pub fn from_origin(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::new(x, y, x + width, y + height)
    }
}

/// Samples one half or quarter ellipse into a point list.
#[derive(Debug, Clone, Copy)]
pub struct ArcSampler {
    bounds: CurveBounds,
    samples: usize,
    start_offset: f64,
    end_offset: f64,
    right_to_left: bool,
}

impl ArcSampler {
    /// `samples` is clamped to at least two so both endpoints are emitted.
    pub fn new(bounds: CurveBounds, samples: usize) -> Self {
        Self {
            bounds,
            samples: samples.max(2),
            start_offset: 0.0,
            end_offset: 0.0,
            right_to_left: false,
        }
    }

    /// Skip `start` units at the beginning and `end` units at the end of
    /// the vertical walk. Used to trace a quarter of the ellipse.
    pub fn with_offsets(mut self, start: f64, end: f64) -> Self {
        self.start_offset = start;
        self.end_offset = end;
        self
    }

    /// Measure the horizontal bulge from the right edge instead of the left.
    pub fn right_to_left(mut self, right_to_left: bool) -> Self {
        self.right_to_left = right_to_left;
        self
    }

    /// Append samples to `out`, dividing coordinates by the scale factors.
    pub fn sample_into(&self, out: &mut Vec<Point>, scale_x: f64, scale_y: f64) {
        let b = &self.bounds;
        let half_height = (b.bottom - b.top) / 2.0;
        let width = b.right - b.left;
        let step = (2.0 * half_height - self.start_offset - self.end_offset)
            / (self.samples - 1) as f64;

        out.reserve(self.samples);
        for i in 0..self.samples {
            let h = step * i as f64 + self.start_offset;
            let depth = half_height - h;
            let ratio = if half_height == 0.0 {
                0.0
            } else {
                depth / half_height
            };
            let x_offset = safe_sqrt(1.0 - ratio * ratio) * width;
            let x = if self.right_to_left {
                b.right - x_offset
            } else {
                b.left + x_offset
            };
            let y = b.top + (half_height - depth);
            out.push(Point::new(x / scale_x, y / scale_y));
        }
    }

    /// Convenience for unscaled output.
    pub fn sample(&self) -> Vec<Point> {
        let mut out = Vec::with_capacity(self.samples);
        self.sample_into(&mut out, 1.0, 1.0);
        out
    }
}

/// Square root that treats tiny or negative inputs as zero.
pub(crate) fn safe_sqrt(value: f64) -> f64 {
    if value < 1e-9 {
        0.0
    } else {
        value.sqrt()
    }
}

//! Output side of the engine.
//!
//! The engine never draws. After each accepted sample and on commit it
//! pushes size, position, rotation and the outline path to a
//! [`RenderSink`]. Outlines are handed over as `lyon` paths in frame-local
//! coordinates; the sink applies position and rotation itself.

use lyon::math::point;
use lyon::path::Path;

use crate::model::{PolyPointsOptions, Shape, ShapeId};

pub trait RenderSink {
    fn set_size(&mut self, id: ShapeId, width: f64, height: f64);

    fn set_pos(&mut self, id: ShapeId, x: f64, y: f64);

    fn set_rotation(&mut self, id: ShapeId, degrees: f64);

    /// Rotation currently shown, if the sink knows the shape.
    fn rotation(&self, id: ShapeId) -> Option<f64>;

    fn draw_outline(&mut self, id: ShapeId, path: &Path);
}

/// Closed outline path relative to the frame origin.
pub fn outline_path(shape: &Shape) -> Path {
    let pts = shape.poly_points(PolyPointsOptions::absolute().relative());
    let mut builder = Path::builder();
    let mut iter = pts.iter();
    if let Some(first) = iter.next() {
        builder.begin(point(first.x as f32, first.y as f32));
        for p in iter {
            builder.line_to(point(p.x as f32, p.y as f32));
        }
        builder.close();
    }
    builder.build()
}

/// Push the shape's current geometry to `sink`.
pub fn present(sink: &mut dyn RenderSink, shape: &Shape) {
    let frame = shape.frame();
    sink.set_pos(shape.id, frame.x, frame.y);
    sink.set_size(shape.id, frame.width, frame.height);
    if sink.rotation(shape.id) != Some(shape.rotation) {
        sink.set_rotation(shape.id, shape.rotation);
    }
    sink.draw_outline(shape.id, &outline_path(shape));
}

/// Sink that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullRenderer;

impl RenderSink for NullRenderer {
    fn set_size(&mut self, _id: ShapeId, _width: f64, _height: f64) {}

    fn set_pos(&mut self, _id: ShapeId, _x: f64, _y: f64) {}

    fn set_rotation(&mut self, _id: ShapeId, _degrees: f64) {}

    fn rotation(&self, _id: ShapeId) -> Option<f64> {
        None
    }

    fn draw_outline(&mut self, _id: ShapeId, _path: &Path) {}
}

/// One call received by a [`RecordingRenderer`].
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCall {
    Size { id: ShapeId, width: f64, height: f64 },
    Pos { id: ShapeId, x: f64, y: f64 },
    Rotation { id: ShapeId, degrees: f64 },
    Outline { id: ShapeId, events: usize },
}

/// Sink that records calls, for inspection by drivers and tests.
#[derive(Debug, Clone, Default)]
pub struct RecordingRenderer {
    pub calls: Vec<RenderCall>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }
}

impl RenderSink for RecordingRenderer {
    fn set_size(&mut self, id: ShapeId, width: f64, height: f64) {
        self.calls.push(RenderCall::Size { id, width, height });
    }

    fn set_pos(&mut self, id: ShapeId, x: f64, y: f64) {
        self.calls.push(RenderCall::Pos { id, x, y });
    }

    fn set_rotation(&mut self, id: ShapeId, degrees: f64) {
        self.calls.push(RenderCall::Rotation { id, degrees });
    }

    fn rotation(&self, id: ShapeId) -> Option<f64> {
        self.calls.iter().rev().find_map(|c| match c {
            RenderCall::Rotation { id: rid, degrees } if *rid == id => Some(*degrees),
            _ => None,
        })
    }

    fn draw_outline(&mut self, id: ShapeId, path: &Path) {
        self.calls.push(RenderCall::Outline {
            id,
            events: path.iter().count(),
        });
    }
}

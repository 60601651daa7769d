//! Optional layout collaborators consulted during an action.

use hvacdraw_core::{Point, Rect};

use crate::model::Shape;

/// Decides whether a shape's text still fits a candidate text rect.
pub trait TextLayout {
    fn fits(&self, shape: &Shape, text_rect: &Rect) -> bool;
}

/// Text always fits. Used when no text layout is installed.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysFits;

impl TextLayout for AlwaysFits {
    fn fits(&self, _shape: &Shape, _text_rect: &Rect) -> bool {
        true
    }
}

/// Text occupies a fixed block; it fits when the text rect is at least
/// that large.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedTextBlock {
    pub width: f64,
    pub height: f64,
}

impl TextLayout for FixedTextBlock {
    fn fits(&self, _shape: &Shape, text_rect: &Rect) -> bool {
        text_rect.width + 1e-9 >= self.width && text_rect.height + 1e-9 >= self.height
    }
}

/// Table, swimlane and container layouts that own the container-adjust
/// handle.
pub trait ContainerLayout {
    /// New frame in the shape's unrotated axes for a pointer sample, or
    /// `None` to leave the shape as it is.
    fn adjust(&self, shape: &Shape, local_pointer: Point) -> Option<Rect>;
}

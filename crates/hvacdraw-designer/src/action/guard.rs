//! Restore-on-drop guard around a shape under edit.

use std::ops::{Deref, DerefMut};
use tracing::warn;

use crate::model::Shape;

/// Holds a snapshot and writes it back when dropped, unless disarmed.
///
/// Wraps every mutation made while a session is active, so an early
/// return through `?` or a panic leaves the shape at its pre-action state.
pub struct RollbackGuard<'a> {
    shape: &'a mut Shape,
    snapshot: Option<Shape>,
}

impl<'a> RollbackGuard<'a> {
    pub fn new(shape: &'a mut Shape, snapshot: Shape) -> Self {
        Self {
            shape,
            snapshot: Some(snapshot),
        }
    }

    /// Keep the current state.
    pub fn disarm(mut self) {
        self.snapshot = None;
    }
}

impl Deref for RollbackGuard<'_> {
    type Target = Shape;

    fn deref(&self) -> &Shape {
        self.shape
    }
}

impl DerefMut for RollbackGuard<'_> {
    fn deref_mut(&mut self) -> &mut Shape {
        self.shape
    }
}

impl Drop for RollbackGuard<'_> {
    fn drop(&mut self) {
        if let Some(snapshot) = self.snapshot.take() {
            warn!(shape = %snapshot.id, "Rolling back shape to its pre-action state");
            *self.shape = snapshot;
        }
    }
}

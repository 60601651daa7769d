//! Shape lookup for hooks and snapping.
//!
//! The action controller and perimeter resolution only ever reach other
//! shapes through [`ObjectTable`]. [`ShapeStore`] is the in-memory
//! implementation used by the driver and the tests.

use std::collections::{BTreeMap, BTreeSet};

use hvacdraw_core::{GeometryError, HookError, Point, Rect};
use tracing::debug;

use crate::model::{Shape, ShapeId};
use crate::perimeter::{perimeter_points, HookId, TargetPoint};

pub trait ObjectTable {
    fn shape(&self, id: ShapeId) -> Option<&Shape>;

    fn shape_mut(&mut self, id: ShapeId) -> Option<&mut Shape>;

    /// Snap rects of every shape other than `exclude`.
    fn snap_targets(&self, exclude: ShapeId) -> Vec<(ShapeId, Rect)>;

    /// Flag a shape for recomputation after an edit it depends on.
    fn mark_dirty(&mut self, id: ShapeId);
}

/// Ordered in-memory shape table.
#[derive(Debug, Clone, Default)]
pub struct ShapeStore {
    shapes: BTreeMap<ShapeId, Shape>,
    dirty: BTreeSet<ShapeId>,
}

impl ShapeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a shape, recomputing its derived state. Replaces any shape
    /// with the same id.
    pub fn insert(&mut self, mut shape: Shape) -> Result<Option<Shape>, GeometryError> {
        shape.refresh()?;
        Ok(self.shapes.insert(shape.id, shape))
    }

    pub fn remove(&mut self, id: ShapeId) -> Option<Shape> {
        self.dirty.remove(&id);
        self.shapes.remove(&id)
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Shape> {
        self.shapes.values()
    }

    pub fn next_id(&self) -> ShapeId {
        ShapeId(self.shapes.keys().next_back().map_or(1, |id| id.0 + 1))
    }

    /// Drain the dirty set.
    pub fn take_dirty(&mut self) -> Vec<ShapeId> {
        std::mem::take(&mut self.dirty).into_iter().collect()
    }

    pub fn is_dirty(&self, id: ShapeId) -> bool {
        self.dirty.contains(&id)
    }

    /// Current document positions of every hook on `id`, resolved against
    /// its current frame.
    pub fn hook_positions(&self, id: ShapeId) -> Result<Vec<(ShapeId, Point)>, HookError> {
        let shape = self.shapes.get(&id).ok_or_else(|| HookError::InvalidTarget {
            reason: format!("shape {} not found", id),
        })?;

        let mut out = Vec::with_capacity(shape.hooks.len());
        for hook in &shape.hooks {
            let target = TargetPoint::from(hook.connect);
            let points = perimeter_points(shape, &[target], Some(HookId(hook.hookpt)), false)?;
            if let Some(p) = points.first() {
                out.push((hook.objid, p.point));
            }
        }
        Ok(out)
    }
}

impl ObjectTable for ShapeStore {
    fn shape(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.get(&id)
    }

    fn shape_mut(&mut self, id: ShapeId) -> Option<&mut Shape> {
        self.shapes.get_mut(&id)
    }

    fn snap_targets(&self, exclude: ShapeId) -> Vec<(ShapeId, Rect)> {
        self.shapes
            .values()
            .filter(|s| s.id != exclude)
            .map(|s| (s.id, s.snap_rect()))
            .collect()
    }

    fn mark_dirty(&mut self, id: ShapeId) {
        if self.dirty.insert(id) {
            debug!(shape = %id, "Marked dirty");
        }
    }
}

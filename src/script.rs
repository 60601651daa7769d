//! Recorded pointer scripts replayed against a scene.
//!
//! A scene is a JSON list of shapes; a script is a JSON list of steps:
//!
//! ```json
//! [
//!   { "op": "begin", "shape": 1, "trigger": { "kind": "bottom_right" }, "x": 120.0, "y": 120.0 },
//!   { "op": "update", "x": 170.0, "y": 150.0 },
//!   { "op": "end" }
//! ]
//! ```

use anyhow::{Context, Result};
use hvacdraw_core::Point;
use hvacdraw_designer::{
    ActionController, Committed, Modifiers, Shape, ShapeId, ShapeStore, TrackOutcome,
    TriggerKind,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scene {
    pub shapes: Vec<Shape>,
}

impl Scene {
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("Failed to parse scene")
    }

    pub fn into_store(self) -> Result<ShapeStore> {
        let mut store = ShapeStore::new();
        for shape in self.shapes {
            let id = shape.id;
            store
                .insert(shape)
                .with_context(|| format!("Shape {} has invalid geometry", id))?;
        }
        Ok(store)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum ScriptStep {
    Begin {
        shape: ShapeId,
        trigger: TriggerKind,
        x: f64,
        y: f64,
        #[serde(default)]
        modifiers: Modifiers,
    },
    Update {
        x: f64,
        y: f64,
        #[serde(default)]
        modifiers: Modifiers,
    },
    End,
    Cancel,
}

pub fn parse_script(text: &str) -> Result<Vec<ScriptStep>> {
    serde_json::from_str(text).context("Failed to parse script")
}

/// What a replay did.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ScriptReport {
    pub committed: Vec<Committed>,
    pub accepted: usize,
    pub rejected: usize,
    pub cancelled: usize,
}

/// Run `steps` through `controller`. Action errors abort the replay.
pub fn replay(
    controller: &mut ActionController,
    store: &mut ShapeStore,
    steps: &[ScriptStep],
) -> Result<ScriptReport> {
    let mut report = ScriptReport::default();
    for (index, step) in steps.iter().enumerate() {
        match step {
            ScriptStep::Begin {
                shape,
                trigger,
                x,
                y,
                modifiers,
            } => controller
                .begin_action(store, *shape, *trigger, Point::new(*x, *y), *modifiers)
                .with_context(|| format!("Step {}: begin {} on shape {}", index, trigger, shape))?,
            ScriptStep::Update { x, y, modifiers } => {
                let outcome = controller
                    .update_action(store, Point::new(*x, *y), *modifiers)
                    .with_context(|| format!("Step {}: update", index))?;
                match outcome {
                    TrackOutcome::Accepted { .. } => report.accepted += 1,
                    TrackOutcome::Rejected(reason) => {
                        warn!(step = index, ?reason, "Sample rejected");
                        report.rejected += 1;
                    }
                }
            }
            ScriptStep::End => {
                let committed = controller
                    .end_action(store)
                    .with_context(|| format!("Step {}: end", index))?;
                report.committed.push(committed);
            }
            ScriptStep::Cancel => {
                controller
                    .cancel_action(store)
                    .with_context(|| format!("Step {}: cancel", index))?;
                report.cancelled += 1;
            }
        }
    }
    if controller.is_tracking() {
        warn!("Script ended with an action in progress, cancelling");
        controller.cancel_action(store)?;
        report.cancelled += 1;
    }
    info!(
        committed = report.committed.len(),
        accepted = report.accepted,
        rejected = report.rejected,
        "Replay finished"
    );
    Ok(report)
}

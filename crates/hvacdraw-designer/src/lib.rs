//! # HVACDraw Designer
//!
//! Shape geometry and interactive manipulation for HVAC diagrams.
//!
//! ## Core Components
//!
//! ### Geometry
//! - **Vertex generation**: normalized outlines for the parametric polygon
//!   families (arrows, trapezoids, document, storage, ...)
//! - **Transform**: rotation, flip and dimension-space mapping
//! - **Shapes**: frame-derived rects, outlines and hit testing
//! - **Perimeter**: hook and connection-point resolution on the outline
//!
//! ### Interaction
//! - **Actions**: resize, rotate, move, segment and parameter drags with
//!   rollback on cancel or error
//! - **Snap guides**: alignment against sibling shapes and the grid
//! - **Autoscroll**: timer-driven pointer replay near the viewport edge
//!
//! ## Architecture
//!
//! ```text
//! ActionController (one session at a time)
//!   ├── ObjectTable   (shape lookup, dependents)
//!   ├── TextLayout    (does the label still fit?)
//!   ├── ContainerLayout
//!   └── RenderSink    (size, position, rotation, outline)
//!
//! Shape
//!   ├── ShapeKindData (rect, oval, polygon, foreign object)
//!   ├── vertex_gen    (parametric outlines)
//!   └── perimeter     (hooks)
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use hvacdraw_designer::{ActionController, Modifiers, Shape, ShapeId, ShapeStore, TriggerKind};
//!
//! let mut store = ShapeStore::new();
//! store.insert(Shape::rect(ShapeId(1), Rect::new(20.0, 20.0, 100.0, 50.0))?)?;
//!
//! let mut controller = ActionController::new(DocumentConfig::default());
//! controller.begin_action(&mut store, ShapeId(1), TriggerKind::BottomRight, pointer, Modifiers::default())?;
//! controller.update_action(&mut store, next_pointer, Modifiers::default())?;
//! let committed = controller.end_action(&mut store)?;
//! ```

pub mod action;
pub mod collaborators;
pub mod model;
pub mod object_table;
pub mod perimeter;
pub mod renderer;
pub mod snap_guides;
pub mod transform;
pub mod vertex_gen;

pub use action::{
    modify_param, ActionController, ActionSession, ActionState, AutoScroll, AutoScrollTick,
    Committed, EditMode, Modifiers, RejectReason, ScrollDirection, TrackOutcome, TriggerKind,
};
pub use collaborators::{AlwaysFits, ContainerLayout, FixedTextBlock, TextLayout};
pub use model::{
    ExtraFlags, HitResult, Hook, MoreFlags, PolyList, PolyPointsOptions, PolySeg, Shape,
    ShapeFlags, ShapeId, ShapeKindData, SizeDim,
};
pub use object_table::{ObjectTable, ShapeStore};
pub use perimeter::{
    hook_points, hook_to_point, nearest_target, perimeter_points, target_points, HookId,
    HookPoint, PerimeterPoint, TargetPoint,
};
pub use renderer::{outline_path, present, NullRenderer, RecordingRenderer, RenderCall, RenderSink};
pub use snap_guides::{GuideEdge, GuideHit, GuideOptions, GuideSide, SnapResult};
pub use vertex_gen::{NormalizedPolygon, ShapeFamily};

pub use hvacdraw_core::{ActionError, GeometryError, HookError, Insets, Point, Rect};
pub use hvacdraw_settings::DocumentConfig;

//! # HVACDraw
//!
//! Shape geometry and interactive manipulation engine for HVAC diagrams.
//!
//! ## Architecture
//!
//! HVACDraw is organized as a workspace with multiple crates:
//!
//! 1. **hvacdraw-core** - Points, rects, constants and error types
//! 2. **hvacdraw-settings** - Grid, snap, rotation and document configuration
//! 3. **hvacdraw-designer** - Vertex generation, transforms, shapes, hooks,
//!    snap guides and the action controller
//! 4. **hvacdraw** - Headless driver that replays recorded pointer scripts

pub mod cli;
pub mod script;

pub use hvacdraw_core as core;
pub use hvacdraw_designer as designer;
pub use hvacdraw_settings as settings;

pub use hvacdraw_core::{ActionError, GeometryError, HookError, Point, Rect};
pub use hvacdraw_designer::{
    ActionController, Committed, Modifiers, ObjectTable, Shape, ShapeId, ShapeStore, TriggerKind,
};
pub use hvacdraw_settings::DocumentConfig;
pub use script::{replay, Scene, ScriptReport, ScriptStep};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Logs go to stderr so replay output on stdout stays machine readable.
/// `RUST_LOG` refines the default INFO level.
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_thread_ids(true)
        .with_thread_names(true)
        .with_line_number(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}

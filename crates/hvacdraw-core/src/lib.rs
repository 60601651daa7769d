//! # HVACDraw Core
//!
//! Core types, constants, and error definitions shared by the HVACDraw
//! crates. Provides the document-space primitives (`Point`, `Rect`,
//! `Insets`) that every geometry and interaction layer builds on.

pub mod constants;
pub mod error;
pub mod types;

pub use error::{ActionError, Error, GeometryError, HookError, Result};

pub use types::{approx_eq, Insets, Point, Rect, EPSILON};

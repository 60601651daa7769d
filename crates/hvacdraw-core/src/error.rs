//! Error handling for HVACDraw
//!
//! Provides the error taxonomy of the shape engine:
//! - Geometry errors (degenerate frames, invalid parameters)
//! - Hook errors (unresolvable connection targets)
//! - Action errors (interactive session misuse)
//!
//! Boundary violations during a drag are not errors; the action layer
//! reports them as rejected samples. All error types use `thiserror`.

use thiserror::Error;

/// Geometry error type
///
/// Raised when a frame or parameter cannot produce meaningful geometry.
/// Most callers recover locally by clamping to the minimum dimension.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// Frame has zero or negative area
    #[error("Degenerate frame {width}x{height}")]
    DegenerateFrame {
        /// The offending width.
        width: f64,
        /// The offending height.
        height: f64,
    },

    /// Polygon edge with coincident endpoints
    #[error("Zero-length edge at index {index}")]
    ZeroLengthEdge {
        /// Index of the segment start point.
        index: usize,
    },

    /// Parameter outside its accepted range
    #[error("Invalid parameter {name}: {value}")]
    InvalidParameter {
        /// Parameter name.
        name: String,
        /// Rejected value.
        value: f64,
    },

    /// Shape kind does not support the requested operation
    #[error("Operation {operation} not supported for {kind}")]
    Unsupported {
        /// The requested operation.
        operation: String,
        /// The shape kind.
        kind: String,
    },
}

/// Hook resolution error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HookError {
    /// Target list was empty or malformed
    #[error("No connection point available: {reason}")]
    InvalidTarget {
        /// Why the target list was refused.
        reason: String,
    },

    /// Hook id is not a known named point
    #[error("Unknown hook point {id}")]
    UnknownHookPoint {
        /// The unknown id.
        id: u32,
    },
}

/// Interactive action error type
///
/// Represents misuse of the action session, or failures raised while a
/// session is active. Any of these leaves the shape at its pre-action frame.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ActionError {
    /// A session is already in progress
    #[error("Action already in progress on shape {active_shape}")]
    SessionConflict {
        /// Id of the shape owning the active session.
        active_shape: u64,
    },

    /// Update or commit without a session
    #[error("No active action session")]
    NoActiveSession,

    /// The shape cannot handle the trigger
    #[error("Trigger {trigger} not supported: {reason}")]
    UnsupportedTrigger {
        /// Trigger name.
        trigger: String,
        /// The reason it was refused.
        reason: String,
    },

    /// Shape id not present in the object table
    #[error("Shape {id} not found")]
    ShapeNotFound {
        /// The missing id.
        id: u64,
    },

    /// Session was aborted from outside
    #[error("Action aborted: {reason}")]
    Aborted {
        /// The abort reason.
        reason: String,
    },

    /// Geometry failure during the session
    #[error(transparent)]
    Geometry(#[from] GeometryError),
}

/// Main error type for HVACDraw
///
/// A unified error type that can represent any error from all layers.
#[derive(Error, Debug)]
pub enum Error {
    /// Geometry error
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    /// Hook error
    #[error(transparent)]
    Hook(#[from] HookError),

    /// Action error
    #[error(transparent)]
    Action(#[from] ActionError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is an action error
    pub fn is_action_error(&self) -> bool {
        matches!(self, Error::Action(_))
    }

    /// Check if this is a session conflict
    pub fn is_session_conflict(&self) -> bool {
        matches!(self, Error::Action(ActionError::SessionConflict { .. }))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;

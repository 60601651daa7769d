//! Fixed numeric constants of the shape engine.
//!
//! Dimension space is the abstract `0..=DIM_MAX` coordinate system used for
//! hook and connection targets, independent of the actual frame size.

/// Upper bound of the normalized hook/target coordinate space.
pub const DIM_MAX: f64 = 30000.0;

/// Smallest width or height a committed frame may have.
pub const MIN_DIM: f64 = 4.0;

/// Edge length of a selection knob, in document units.
pub const KNOB_SIZE: f64 = 9.0;

/// Sample budget used when an outline is requested for hit testing,
/// snapping or perimeter intersection.
pub const MAX_POLY_POINTS: usize = 100;

/// 1 - cos(45°): inset of a rounded corner's arc midpoint relative to the
/// corner radius.
pub const ROUND_FACTOR: f64 = 0.292_893_218;

/// Reference dimension for fixed-radius rounded rectangles.
pub const RRECT_FIXED_DIM: f64 = 100.0;

/// Custom connect points are exposed as hook ids starting here.
pub const CUSTOM_HOOK_BASE: u32 = 500;

/// Default rotation snap increment, in degrees.
pub const ROTATE_SNAP: f64 = 5.0;

/// Rotation snap increment while the enhance modifier is held.
pub const ENHANCED_ROTATE_SNAP: f64 = 45.0;

/// Extra distance, beyond half the line thickness, within which a point
/// still counts as touching a border.
pub const BORDER_HIT_SLOP: f64 = 12.0;

/// Maximum distance between a sibling edge and the dragged edge for a
/// dynamic guide to engage.
pub const DEFAULT_GUIDE_TOLERANCE: f64 = 5.0;

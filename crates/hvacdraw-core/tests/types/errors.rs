use hvacdraw_core::{ActionError, Error, GeometryError, HookError};

#[test]
fn test_action_error_converts_into_error() {
    let err: Error = ActionError::SessionConflict { active_shape: 7 }.into();
    assert!(err.is_action_error());
    assert!(err.is_session_conflict());
    assert_eq!(err.to_string(), "Action already in progress on shape 7");
}

#[test]
fn test_geometry_error_wraps_into_action_error() {
    let action: ActionError = GeometryError::DegenerateFrame {
        width: 0.0,
        height: 5.0,
    }
    .into();
    assert!(matches!(action, ActionError::Geometry(_)));
    assert_eq!(action.to_string(), "Degenerate frame 0x5");
}

#[test]
fn test_hook_error_message() {
    let err = HookError::InvalidTarget {
        reason: "empty target list".to_string(),
    };
    assert_eq!(
        err.to_string(),
        "No connection point available: empty target list"
    );
}

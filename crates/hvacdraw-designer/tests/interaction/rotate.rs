use hvacdraw_designer::{
    ActionError, EditMode, ExtraFlags, Modifiers, Point, Rect, RejectReason, ShapeId,
    TrackOutcome, TriggerKind,
};

use crate::common::{controller, frame_of, rect, store_with};

#[test]
fn test_rotation_follows_pointer_angle_around_center() {
    let mut store = store_with(vec![rect(1, 100.0, 100.0, 100.0, 50.0)]);
    let mut ctl = controller();
    let mods = Modifiers::default();

    ctl.begin_action(&mut store, ShapeId(1), TriggerKind::Rotate, Point::new(250.0, 125.0), mods)
        .expect("begin");
    assert_eq!(ctl.edit_mode(), EditMode::Rotating);
    let outcome = ctl
        .update_action(&mut store, Point::new(150.0, 225.0), mods)
        .expect("update");
    assert!(outcome.is_accepted());

    let committed = ctl.end_action(&mut store).expect("commit");
    assert_eq!(committed.rotation, 90.0);
    assert_eq!(committed.frame, Rect::new(100.0, 100.0, 100.0, 50.0));
}

#[test]
fn test_rotation_snaps_to_increment() {
    let mut store = store_with(vec![rect(1, 100.0, 100.0, 100.0, 50.0)]);
    let mut ctl = controller();
    let thirty = Point::new(236.6, 175.0);

    ctl.begin_action(
        &mut store,
        ShapeId(1),
        TriggerKind::Rotate,
        Point::new(250.0, 125.0),
        Modifiers::default(),
    )
    .expect("begin");
    ctl.update_action(&mut store, thirty, Modifiers::default())
        .expect("update");
    assert_eq!(store_rotation(&store), 30.0);

    let enhanced = Modifiers {
        enhance: true,
        ..Modifiers::default()
    };
    ctl.update_action(&mut store, thirty, enhanced).expect("update");
    assert_eq!(store_rotation(&store), 45.0);
}

#[test]
fn test_rotation_leaving_document_is_rejected() {
    let mut store = store_with(vec![rect(1, 5.0, 5.0, 100.0, 20.0)]);
    let mut ctl = controller();
    let mods = Modifiers::default();

    ctl.begin_action(&mut store, ShapeId(1), TriggerKind::Rotate, Point::new(155.0, 15.0), mods)
        .expect("begin");
    let outcome = ctl
        .update_action(&mut store, Point::new(55.0, 115.0), mods)
        .expect("update");
    assert_eq!(outcome, TrackOutcome::Rejected(RejectReason::OutOfBounds));
    assert_eq!(store_rotation(&store), 0.0);
    assert_eq!(frame_of(&store, 1), Rect::new(5.0, 5.0, 100.0, 20.0));
}

#[test]
fn test_no_rotate_shape_refuses_rotate_trigger() {
    let mut shape = rect(1, 100.0, 100.0, 100.0, 50.0);
    shape.extra_flags.insert(ExtraFlags::NO_ROTATE);
    let mut store = store_with(vec![shape]);
    let mut ctl = controller();

    let err = ctl
        .begin_action(
            &mut store,
            ShapeId(1),
            TriggerKind::Rotate,
            Point::new(250.0, 125.0),
            Modifiers::default(),
        )
        .unwrap_err();
    assert!(matches!(err, ActionError::UnsupportedTrigger { .. }));
    assert!(!ctl.is_tracking());
}

fn store_rotation(store: &hvacdraw_designer::ShapeStore) -> f64 {
    use hvacdraw_designer::ObjectTable;
    store.shape(ShapeId(1)).expect("shape").rotation
}

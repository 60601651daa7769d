use hvacdraw_designer::{
    ActionController, ActionError, EditMode, FixedTextBlock, Modifiers, ObjectTable, Point, Rect,
    RejectReason, Shape, ShapeId, TrackOutcome, TriggerKind,
};

use crate::common::{frame_of, rect, store_with};

fn square() -> Shape {
    Shape::free_polygon(
        ShapeId(1),
        Rect::new(10.0, 10.0, 100.0, 50.0),
        vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(0.0, 1.0),
        ],
    )
    .expect("free polygon")
}

#[test]
fn test_segment_drag_refits_frame_and_rolls_back_on_text_overflow() {
    let mut store = store_with(vec![square()]);
    let mut ctl = ActionController::new(hvacdraw_designer::DocumentConfig::default())
        .with_text_layout(FixedTextBlock {
            width: 90.0,
            height: 30.0,
        });
    let top = TriggerKind::MovePolySeg { segment: 1 };

    ctl.begin_action(&mut store, ShapeId(1), top, Point::new(60.0, 10.0), Modifiers::default())
        .expect("begin");
    assert_eq!(ctl.edit_mode(), EditMode::EditingSegment);

    let outcome = ctl
        .update_action(&mut store, Point::new(60.0, 40.0), Modifiers::default())
        .expect("update");
    assert_eq!(outcome, TrackOutcome::Rejected(RejectReason::TextDoesNotFit));
    assert_eq!(frame_of(&store, 1), Rect::new(10.0, 10.0, 100.0, 50.0));

    let outcome = ctl
        .update_action(&mut store, Point::new(60.0, 0.0), Modifiers::default())
        .expect("update");
    assert!(outcome.is_accepted());
    let committed = ctl.end_action(&mut store).expect("commit");
    assert_eq!(committed.frame, Rect::new(10.0, 0.0, 100.0, 60.0));

    let shape = store.shape(ShapeId(1)).expect("shape");
    let poly = shape.kind.as_polygon().expect("polygon");
    assert!(poly.poly_list.is_some());
}

#[test]
fn test_segment_drag_needs_a_polygon() {
    let mut store = store_with(vec![rect(1, 10.0, 10.0, 100.0, 50.0)]);
    let mut ctl = crate::common::controller();
    let err = ctl
        .begin_action(
            &mut store,
            ShapeId(1),
            TriggerKind::MovePolySeg { segment: 1 },
            Point::new(60.0, 10.0),
            Modifiers::default(),
        )
        .unwrap_err();
    assert!(matches!(err, ActionError::UnsupportedTrigger { .. }));
}

#[test]
fn test_missing_segment_is_refused() {
    let mut store = store_with(vec![square()]);
    let mut ctl = crate::common::controller();
    let err = ctl
        .begin_action(
            &mut store,
            ShapeId(1),
            TriggerKind::MovePolySeg { segment: 40 },
            Point::new(60.0, 10.0),
            Modifiers::default(),
        )
        .unwrap_err();
    assert!(matches!(err, ActionError::UnsupportedTrigger { .. }));
    assert!(!ctl.is_tracking());
}

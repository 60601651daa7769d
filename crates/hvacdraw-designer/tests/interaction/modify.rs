use hvacdraw_designer::{
    ActionError, EditMode, Modifiers, ObjectTable, Point, Rect, Shape, ShapeFamily, ShapeId,
    TriggerKind,
};

use crate::common::{controller, rect, store_with};

#[test]
fn test_knob_drag_sets_parameter() {
    let shape = Shape::polygon(
        ShapeId(1),
        Rect::new(100.0, 100.0, 200.0, 100.0),
        ShapeFamily::Parallelogram,
        20.0,
    )
    .expect("parallelogram");
    let mut store = store_with(vec![shape]);
    let mut ctl = controller();

    ctl.begin_action(
        &mut store,
        ShapeId(1),
        TriggerKind::ModifyShape,
        Point::new(120.0, 100.0),
        Modifiers::default(),
    )
    .expect("begin");
    assert_eq!(ctl.edit_mode(), EditMode::ModifyingShape);
    ctl.update_action(&mut store, Point::new(150.0, 100.0), Modifiers::default())
        .expect("update");
    ctl.end_action(&mut store).expect("commit");

    let shape = store.shape(ShapeId(1)).expect("shape");
    assert_eq!(shape.shape_param, 50.0);
    assert_eq!(shape.frame(), Rect::new(100.0, 100.0, 200.0, 100.0));
}

#[test]
fn test_knob_refused_for_fixed_outline() {
    let shape = Shape::polygon(
        ShapeId(1),
        Rect::new(100.0, 100.0, 200.0, 100.0),
        ShapeFamily::Diamond,
        0.0,
    )
    .expect("diamond");
    let mut store = store_with(vec![shape]);
    let mut ctl = controller();

    let err = ctl
        .begin_action(
            &mut store,
            ShapeId(1),
            TriggerKind::ModifyShape,
            Point::new(120.0, 100.0),
            Modifiers::default(),
        )
        .unwrap_err();
    assert!(matches!(err, ActionError::UnsupportedTrigger { .. }));
}

#[test]
fn test_dimension_line_slides_with_pointer() {
    let mut store = store_with(vec![rect(1, 20.0, 20.0, 100.0, 50.0)]);
    let mut ctl = controller();

    ctl.begin_action(
        &mut store,
        ShapeId(1),
        TriggerKind::DimensionAdjust,
        Point::new(50.0, 50.0),
        Modifiers::default(),
    )
    .expect("begin");
    ctl.update_action(&mut store, Point::new(50.0, 80.0), Modifiers::default())
        .expect("update");
    ctl.end_action(&mut store).expect("commit");

    assert_eq!(store.shape(ShapeId(1)).expect("shape").dimension_offset, 30.0);
}

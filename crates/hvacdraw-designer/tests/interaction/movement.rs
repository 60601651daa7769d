use hvacdraw_designer::{
    EditMode, Modifiers, Point, Rect, RejectReason, ShapeId, SizeDim, TrackOutcome, TriggerKind,
};

use crate::common::{controller, frame_of, rect, store_with};

fn begin_move(store: &mut hvacdraw_designer::ShapeStore) -> hvacdraw_designer::ActionController {
    let mut ctl = controller();
    ctl.begin_action(
        store,
        ShapeId(1),
        TriggerKind::Move,
        Point::new(120.0, 120.0),
        Modifiers::default(),
    )
    .expect("begin");
    ctl
}

#[test]
fn test_move_follows_pointer() {
    let mut store = store_with(vec![rect(1, 100.0, 100.0, 50.0, 50.0)]);
    let mut ctl = begin_move(&mut store);
    assert_eq!(ctl.edit_mode(), EditMode::Moving);

    ctl.update_action(&mut store, Point::new(220.0, 170.0), Modifiers::default())
        .expect("update");
    let committed = ctl.end_action(&mut store).expect("commit");
    assert_eq!(committed.frame, Rect::new(200.0, 150.0, 50.0, 50.0));
    assert_eq!(committed.size_dim, SizeDim { width: 50.0, height: 50.0 });
}

#[test]
fn test_move_is_clamped_to_document_origin() {
    let mut store = store_with(vec![rect(1, 100.0, 100.0, 50.0, 50.0)]);
    let mut ctl = begin_move(&mut store);

    ctl.update_action(&mut store, Point::new(-100.0, -100.0), Modifiers::default())
        .expect("update");
    assert_eq!(frame_of(&store, 1), Rect::new(0.0, 0.0, 50.0, 50.0));

    let outcome = ctl
        .update_action(&mut store, Point::new(-150.0, -150.0), Modifiers::default())
        .expect("update");
    assert_eq!(outcome, TrackOutcome::Rejected(RejectReason::NoChange));
}

#[test]
fn test_move_clamps_far_edge_when_document_does_not_grow() {
    let mut store = store_with(vec![rect(1, 100.0, 100.0, 50.0, 50.0)]);
    let mut config = hvacdraw_designer::DocumentConfig::default();
    config.document.no_auto_grow = true;
    let mut ctl = hvacdraw_designer::ActionController::new(config);
    ctl.begin_action(
        &mut store,
        ShapeId(1),
        TriggerKind::Move,
        Point::new(120.0, 120.0),
        Modifiers::default(),
    )
    .expect("begin");

    ctl.update_action(&mut store, Point::new(2000.0, 2000.0), Modifiers::default())
        .expect("update");
    assert_eq!(frame_of(&store, 1), Rect::new(950.0, 700.0, 50.0, 50.0));
}

#[test]
fn test_move_aligns_with_sibling_edge() {
    let mut store = store_with(vec![
        rect(1, 100.0, 100.0, 50.0, 50.0),
        rect(2, 300.0, 0.0, 50.0, 50.0),
    ]);
    let mut ctl = begin_move(&mut store);

    ctl.update_action(&mut store, Point::new(268.0, 140.0), Modifiers::default())
        .expect("update");
    assert_eq!(frame_of(&store, 1), Rect::new(250.0, 120.0, 50.0, 50.0));

    let guides = &ctl.session().expect("session").guides;
    assert_eq!(guides.len(), 1);
    assert_eq!(guides[0].sibling, ShapeId(2));
    assert_eq!(guides[0].offset, 2.0);
}

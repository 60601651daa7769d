use hvacdraw_designer::{
    FixedTextBlock, Modifiers, Point, RejectReason, ShapeFlags, ShapeId, SizeDim, TrackOutcome,
    TriggerKind,
};
use hvacdraw_designer::{ActionController, EditMode};
use proptest::prelude::*;

use crate::common::{controller, doc_point, frame_of, rect, store_with, unsnapped};
use hvacdraw_designer::Rect;

#[test]
fn test_bottom_right_drag_without_lock() {
    let mut store = store_with(vec![rect(1, 20.0, 20.0, 100.0, 100.0)]);
    let mut ctl = controller();
    let mods = Modifiers::default();

    ctl.begin_action(&mut store, ShapeId(1), TriggerKind::BottomRight, Point::new(120.0, 120.0), mods)
        .expect("begin");
    assert_eq!(ctl.edit_mode(), EditMode::Resizing);
    let outcome = ctl
        .update_action(&mut store, Point::new(170.0, 150.0), mods)
        .expect("update");
    assert!(outcome.is_accepted());

    let committed = ctl.end_action(&mut store).expect("commit");
    assert_eq!(committed.frame, Rect::new(20.0, 20.0, 150.0, 130.0));
    assert_eq!(frame_of(&store, 1), Rect::new(20.0, 20.0, 150.0, 130.0));
    assert_eq!(committed.size_dim, SizeDim { width: 150.0, height: 130.0 });
    assert_eq!(ctl.edit_mode(), EditMode::Default);
}

#[test]
fn test_bottom_right_drag_with_lock_keeps_ratio() {
    let mut store = store_with(vec![rect(1, 20.0, 20.0, 100.0, 100.0)]);
    let mut ctl = controller();
    let mods = Modifiers {
        shift: true,
        ..Modifiers::default()
    };

    ctl.begin_action(&mut store, ShapeId(1), TriggerKind::BottomRight, Point::new(120.0, 120.0), mods)
        .expect("begin");
    ctl.update_action(&mut store, Point::new(170.0, 120.0), mods)
        .expect("update");
    let committed = ctl.end_action(&mut store).expect("commit");
    assert_eq!(committed.frame, Rect::new(20.0, 20.0, 150.0, 150.0));
}

#[test]
fn test_edge_handle_persists_one_size_field() {
    let mut shape = rect(1, 20.0, 20.0, 100.0, 50.0);
    shape.size_dim = SizeDim { width: 1.0, height: 1.0 };
    let mut store = store_with(vec![shape]);
    let mut ctl = controller();
    let mods = Modifiers::default();

    ctl.begin_action(&mut store, ShapeId(1), TriggerKind::CenterRight, Point::new(120.0, 45.0), mods)
        .expect("begin");
    ctl.update_action(&mut store, Point::new(170.0, 45.0), mods)
        .expect("update");
    let committed = ctl.end_action(&mut store).expect("commit");
    assert_eq!(committed.frame, Rect::new(20.0, 20.0, 150.0, 50.0));
    assert_eq!(committed.size_dim, SizeDim { width: 150.0, height: 1.0 });
}

#[test]
fn test_rotated_resize_leaving_document_is_rejected() {
    let mut store = store_with(vec![rect(1, 40.0, 40.0, 100.0, 20.0).with_rotation(45.0)]);
    let mut ctl = controller();
    let mods = Modifiers::default();
    let start = doc_point(&store, 1, Point::new(140.0, 60.0));
    let far = doc_point(&store, 1, Point::new(240.0, 240.0));

    ctl.begin_action(&mut store, ShapeId(1), TriggerKind::BottomRight, start, mods)
        .expect("begin");
    let outcome = ctl.update_action(&mut store, far, mods).expect("update");
    assert_eq!(outcome, TrackOutcome::Rejected(RejectReason::OutOfBounds));
    assert_eq!(frame_of(&store, 1), Rect::new(40.0, 40.0, 100.0, 20.0));
    assert!(ctl.is_tracking());
}

#[test]
fn test_unlocked_drag_past_document_edge_is_rejected() {
    let mut store = store_with(vec![rect(1, 20.0, 20.0, 100.0, 100.0)]);
    let mut ctl = ActionController::new(unsnapped());
    let mods = Modifiers::default();

    ctl.begin_action(&mut store, ShapeId(1), TriggerKind::TopLeft, Point::new(20.0, 20.0), mods)
        .expect("begin");
    let outcome = ctl
        .update_action(&mut store, Point::new(-30.0, -30.0), mods)
        .expect("update");
    assert_eq!(outcome, TrackOutcome::Rejected(RejectReason::OutOfBounds));
    assert_eq!(frame_of(&store, 1), Rect::new(20.0, 20.0, 100.0, 100.0));

    let outcome = ctl
        .update_action(&mut store, Point::new(0.0, 10.0), mods)
        .expect("update");
    assert!(outcome.is_accepted());
    assert_eq!(frame_of(&store, 1), Rect::new(0.0, 10.0, 120.0, 110.0));
}

#[test]
fn test_unmoved_pointer_at_origin_keeps_frame() {
    for shift in [false, true] {
        let mut store = store_with(vec![rect(1, 0.0, 0.0, 100.0, 100.0)]);
        let mut ctl = ActionController::new(unsnapped());
        let mods = Modifiers {
            shift,
            ..Modifiers::default()
        };

        ctl.begin_action(&mut store, ShapeId(1), TriggerKind::TopLeft, Point::new(0.0, 0.0), mods)
            .expect("begin");
        ctl.update_action(&mut store, Point::new(0.0, 0.0), mods)
            .expect("update");
        let committed = ctl.end_action(&mut store).expect("commit");
        assert_eq!(committed.frame, Rect::new(0.0, 0.0, 100.0, 100.0), "shift {}", shift);
    }
}

#[test]
fn test_locked_drag_past_edge_is_pinned_proportionally() {
    let mut store = store_with(vec![rect(1, 20.0, 20.0, 100.0, 50.0)]);
    let mut ctl = ActionController::new(unsnapped());
    let mods = Modifiers {
        shift: true,
        ..Modifiers::default()
    };

    ctl.begin_action(&mut store, ShapeId(1), TriggerKind::TopLeft, Point::new(20.0, 20.0), mods)
        .expect("begin");
    let outcome = ctl
        .update_action(&mut store, Point::new(-200.0, 10.0), mods)
        .expect("update");
    assert!(outcome.is_accepted());

    let f = frame_of(&store, 1);
    assert!((f.x - 4.5).abs() < 1e-9, "frame {:?}", f);
    assert!((f.right() - 120.0).abs() < 1e-9);
    assert!((f.bottom() - 70.0).abs() < 1e-9);
    assert!((f.height / f.width - 0.5).abs() < 1e-9);
}

#[test]
fn test_shrinking_below_text_block_is_rejected() {
    let mut store = store_with(vec![rect(1, 20.0, 20.0, 100.0, 50.0)]);
    let mut ctl = ActionController::new(unsnapped()).with_text_layout(FixedTextBlock {
        width: 80.0,
        height: 30.0,
    });
    let mods = Modifiers::default();

    ctl.begin_action(&mut store, ShapeId(1), TriggerKind::BottomRight, Point::new(120.0, 70.0), mods)
        .expect("begin");
    let outcome = ctl
        .update_action(&mut store, Point::new(70.0, 40.0), mods)
        .expect("update");
    assert_eq!(outcome, TrackOutcome::Rejected(RejectReason::TextDoesNotFit));
    assert_eq!(frame_of(&store, 1), Rect::new(20.0, 20.0, 100.0, 50.0));

    let outcome = ctl
        .update_action(&mut store, Point::new(140.0, 90.0), mods)
        .expect("update");
    assert!(outcome.is_accepted());
}

#[test]
fn test_resize_snaps_to_sibling_edge() {
    let mut store = store_with(vec![
        rect(1, 0.0, 100.0, 97.0, 40.0),
        rect(2, 0.0, 0.0, 100.0, 50.0),
    ]);
    let mut ctl = controller();
    let mods = Modifiers::default();

    ctl.begin_action(&mut store, ShapeId(1), TriggerKind::CenterRight, Point::new(97.0, 120.0), mods)
        .expect("begin");
    ctl.update_action(&mut store, Point::new(98.0, 120.0), mods)
        .expect("update");
    assert_eq!(frame_of(&store, 1).width, 100.0);
    let guides = &ctl.session().expect("session").guides;
    assert_eq!(guides.len(), 1);
    assert_eq!(guides[0].sibling, ShapeId(2));

    let free = Modifiers {
        override_snaps: true,
        ..mods
    };
    ctl.update_action(&mut store, Point::new(98.0, 120.0), free)
        .expect("update");
    assert_eq!(frame_of(&store, 1).width, 98.0);
    assert!(ctl.session().expect("session").guides.is_empty());
}

fn corner_handle(trigger: TriggerKind, f: &Rect) -> Point {
    match trigger {
        TriggerKind::TopLeft => Point::new(f.x, f.y),
        TriggerKind::TopRight => Point::new(f.right(), f.y),
        TriggerKind::BottomRight => Point::new(f.right(), f.bottom()),
        _ => Point::new(f.x, f.bottom()),
    }
}

proptest! {
    #[test]
    fn prop_locked_corners_keep_aspect_ratio(
        corner in 0usize..4,
        w in 20.0f64..300.0,
        h in 20.0f64..300.0,
        dx in -400.0f64..400.0,
        dy in -400.0f64..400.0,
    ) {
        let trigger = [
            TriggerKind::TopLeft,
            TriggerKind::TopRight,
            TriggerKind::BottomRight,
            TriggerKind::BottomLeft,
        ][corner];
        let shape = rect(1, 300.0, 300.0, w, h).with_flags(ShapeFlags::CONSTRAIN_ASPECT);
        let start = shape.frame();
        let mut store = store_with(vec![shape]);
        let mut ctl = ActionController::new(unsnapped());
        let mods = Modifiers::default();

        let handle = corner_handle(trigger, &start);
        ctl.begin_action(&mut store, ShapeId(1), trigger, handle, mods).expect("begin");
        ctl.update_action(&mut store, handle.offset(dx, dy), mods).expect("update");
        let committed = ctl.end_action(&mut store).expect("commit");

        let ratio = committed.frame.height / committed.frame.width;
        let expected = h / w;
        prop_assert!(
            (ratio - expected).abs() <= 1e-6 * expected,
            "ratio {} expected {} for {:?}",
            ratio,
            expected,
            committed.frame
        );
    }

    #[test]
    fn prop_rounded_corner_never_exceeds_cap(
        w in 4.0f64..2000.0,
        h in 4.0f64..2000.0,
        param in 0.0f64..10.0,
        fixed in any::<bool>(),
    ) {
        let c = hvacdraw_designer::model::rrect_corner_size(w, h, param, fixed);
        prop_assert!(c >= 0.0);
        prop_assert!(c <= 0.4 * w.min(h) + 1e-9);
    }
}

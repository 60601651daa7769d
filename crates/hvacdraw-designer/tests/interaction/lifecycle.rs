use hvacdraw_designer::{
    ActionController, ActionError, ActionState, ContainerLayout, EditMode, Hook, Modifiers,
    ObjectTable, Point, Rect, RenderSink, Shape, ShapeId, TriggerKind,
};

use crate::common::{controller, frame_of, rect, store_with};

fn begin_resize(store: &mut hvacdraw_designer::ShapeStore, ctl: &mut ActionController) {
    ctl.begin_action(
        store,
        ShapeId(1),
        TriggerKind::BottomRight,
        Point::new(120.0, 70.0),
        Modifiers::default(),
    )
    .expect("begin");
}

#[test]
fn test_cancel_restores_original_shape() {
    let mut store = store_with(vec![rect(1, 20.0, 20.0, 100.0, 50.0)]);
    let mut ctl = controller();
    begin_resize(&mut store, &mut ctl);

    ctl.update_action(&mut store, Point::new(200.0, 150.0), Modifiers::default())
        .expect("update");
    assert_ne!(frame_of(&store, 1), Rect::new(20.0, 20.0, 100.0, 50.0));

    ctl.cancel_action(&mut store).expect("cancel");
    assert_eq!(frame_of(&store, 1), Rect::new(20.0, 20.0, 100.0, 50.0));
    assert_eq!(ctl.state(), ActionState::Cancelled { shape: ShapeId(1) });
    assert_eq!(ctl.edit_mode(), EditMode::Default);
    assert!(ctl.session().is_none());
}

#[test]
fn test_abort_restores_and_reports_reason() {
    let mut store = store_with(vec![rect(1, 20.0, 20.0, 100.0, 50.0)]);
    let mut ctl = controller();
    begin_resize(&mut store, &mut ctl);
    ctl.update_action(&mut store, Point::new(200.0, 150.0), Modifiers::default())
        .expect("update");

    let err = ctl.abort(&mut store, "document closed");
    assert!(matches!(err, ActionError::Aborted { ref reason } if reason == "document closed"));
    assert_eq!(frame_of(&store, 1), Rect::new(20.0, 20.0, 100.0, 50.0));
    assert!(!ctl.is_tracking());
}

#[test]
fn test_second_begin_is_refused_and_first_session_survives() {
    let mut store = store_with(vec![
        rect(1, 20.0, 20.0, 100.0, 50.0),
        rect(2, 300.0, 300.0, 50.0, 50.0),
    ]);
    let mut ctl = controller();
    begin_resize(&mut store, &mut ctl);

    let err = ctl
        .begin_action(
            &mut store,
            ShapeId(2),
            TriggerKind::Move,
            Point::new(310.0, 310.0),
            Modifiers::default(),
        )
        .unwrap_err();
    assert!(matches!(err, ActionError::SessionConflict { active_shape: 1 }));
    assert_eq!(ctl.session().expect("session").shape_id, ShapeId(1));

    let outcome = ctl
        .update_action(&mut store, Point::new(140.0, 90.0), Modifiers::default())
        .expect("update");
    assert!(outcome.is_accepted());
}

#[test]
fn test_update_and_commit_need_a_session() {
    let mut store = store_with(vec![rect(1, 20.0, 20.0, 100.0, 50.0)]);
    let mut ctl = controller();
    assert!(matches!(
        ctl.update_action(&mut store, Point::new(0.0, 0.0), Modifiers::default()),
        Err(ActionError::NoActiveSession)
    ));
    assert!(matches!(ctl.end_action(&mut store), Err(ActionError::NoActiveSession)));
    assert!(matches!(ctl.cancel_action(&mut store), Err(ActionError::NoActiveSession)));
    assert_eq!(ctl.state(), ActionState::Idle);
}

#[test]
fn test_unknown_shape_is_reported() {
    let mut store = store_with(vec![]);
    let mut ctl = controller();
    let err = ctl
        .begin_action(
            &mut store,
            ShapeId(7),
            TriggerKind::Move,
            Point::new(0.0, 0.0),
            Modifiers::default(),
        )
        .unwrap_err();
    assert!(matches!(err, ActionError::ShapeNotFound { id: 7 }));
}

#[test]
fn test_shape_removed_mid_session_ends_the_session() {
    let mut store = store_with(vec![rect(1, 20.0, 20.0, 100.0, 50.0)]);
    let mut ctl = controller();
    begin_resize(&mut store, &mut ctl);
    store.remove(ShapeId(1));

    let err = ctl
        .update_action(&mut store, Point::new(140.0, 90.0), Modifiers::default())
        .unwrap_err();
    assert!(matches!(err, ActionError::ShapeNotFound { id: 1 }));
    assert!(!ctl.is_tracking());
    assert_eq!(ctl.state(), ActionState::Cancelled { shape: ShapeId(1) });
}

#[test]
fn test_commit_marks_shape_and_hooked_shapes_dirty() {
    let mut shape = rect(1, 20.0, 20.0, 100.0, 50.0);
    shape.hooks.push(Hook {
        objid: ShapeId(9),
        hookpt: 0,
        connect: Point::new(0.0, 0.0),
    });
    let mut store = store_with(vec![shape, rect(9, 400.0, 400.0, 20.0, 20.0)]);
    let _ = store.take_dirty();
    let mut ctl = controller();
    begin_resize(&mut store, &mut ctl);
    ctl.update_action(&mut store, Point::new(140.0, 90.0), Modifiers::default())
        .expect("update");
    ctl.end_action(&mut store).expect("commit");

    assert!(store.is_dirty(ShapeId(1)));
    assert!(store.is_dirty(ShapeId(9)));
    assert!(store.shape(ShapeId(1)).expect("shape").flags.hooks_dirty());
    assert_eq!(ctl.state(), ActionState::Committed { shape: ShapeId(1) });
}

struct StretchRight;

impl ContainerLayout for StretchRight {
    fn adjust(&self, shape: &Shape, local_pointer: Point) -> Option<Rect> {
        let f = shape.frame();
        let width = local_pointer.x - f.x;
        (width > 0.0).then(|| Rect::new(f.x, f.y, width, f.height))
    }
}

#[test]
fn test_container_adjust_needs_a_layout() {
    let mut store = store_with(vec![rect(1, 20.0, 20.0, 100.0, 50.0)]);
    let mut ctl = controller();
    let err = ctl
        .begin_action(
            &mut store,
            ShapeId(1),
            TriggerKind::ContainerAdjust,
            Point::new(120.0, 45.0),
            Modifiers::default(),
        )
        .unwrap_err();
    assert!(matches!(err, ActionError::UnsupportedTrigger { .. }));

    let mut ctl = controller().with_container(StretchRight);
    ctl.begin_action(
        &mut store,
        ShapeId(1),
        TriggerKind::ContainerAdjust,
        Point::new(120.0, 45.0),
        Modifiers::default(),
    )
    .expect("begin");
    assert_eq!(ctl.edit_mode(), EditMode::AdjustingContainer);
    ctl.update_action(&mut store, Point::new(150.0, 45.0), Modifiers::default())
        .expect("update");
    let committed = ctl.end_action(&mut store).expect("commit");
    assert_eq!(committed.frame, Rect::new(20.0, 20.0, 130.0, 50.0));
}

#[derive(Clone, Default)]
struct SharedSink(std::sync::Arc<std::sync::Mutex<hvacdraw_designer::RecordingRenderer>>);

impl RenderSink for SharedSink {
    fn set_size(&mut self, id: ShapeId, width: f64, height: f64) {
        self.0.lock().unwrap().set_size(id, width, height);
    }

    fn set_pos(&mut self, id: ShapeId, x: f64, y: f64) {
        self.0.lock().unwrap().set_pos(id, x, y);
    }

    fn set_rotation(&mut self, id: ShapeId, degrees: f64) {
        self.0.lock().unwrap().set_rotation(id, degrees);
    }

    fn rotation(&self, id: ShapeId) -> Option<f64> {
        self.0.lock().unwrap().rotation(id)
    }

    fn draw_outline(&mut self, id: ShapeId, path: &lyon::path::Path) {
        self.0.lock().unwrap().draw_outline(id, path);
    }
}

#[test]
fn test_renderer_follows_samples_and_cancel() {
    use hvacdraw_designer::RenderCall;

    let mut store = store_with(vec![rect(1, 20.0, 20.0, 100.0, 50.0)]);
    let sink = SharedSink::default();
    let mut ctl = controller().with_renderer(sink.clone());
    begin_resize(&mut store, &mut ctl);

    ctl.update_action(&mut store, Point::new(140.0, 90.0), Modifiers::default())
        .expect("update");
    assert!(sink.0.lock().unwrap().calls.contains(&RenderCall::Size {
        id: ShapeId(1),
        width: 120.0,
        height: 70.0,
    }));

    sink.0.lock().unwrap().clear();
    ctl.cancel_action(&mut store).expect("cancel");
    let calls = sink.0.lock().unwrap().calls.clone();
    assert!(calls.contains(&RenderCall::Size {
        id: ShapeId(1),
        width: 100.0,
        height: 50.0,
    }));
    assert!(calls
        .iter()
        .any(|c| matches!(c, RenderCall::Outline { id: ShapeId(1), events } if *events > 0)));
}

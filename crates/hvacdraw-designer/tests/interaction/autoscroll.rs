use hvacdraw_designer::{Modifiers, Point, Rect, ShapeId, TriggerKind};

use crate::common::{controller, frame_of, rect, store_with};

#[tokio::test(start_paused = true)]
async fn test_autoscroll_replays_pointer_toward_edge() {
    let mut store = store_with(vec![rect(1, 100.0, 100.0, 50.0, 50.0)]);
    let mut ctl = controller();
    let viewport = Rect::new(0.0, 0.0, 500.0, 400.0);
    let pointer = Point::new(490.0, 200.0);

    ctl.begin_action(&mut store, ShapeId(1), TriggerKind::Move, pointer, Modifiers::default())
        .expect("begin");
    assert!(ctl.start_autoscroll(&viewport, pointer).expect("autoscroll"));

    let tick = ctl.next_autoscroll_tick().await.expect("first tick");
    assert_eq!(tick.pointer, Point::new(500.0, 200.0));
    ctl.apply_autoscroll_tick(&mut store, tick).expect("apply");
    assert_eq!(frame_of(&store, 1), Rect::new(110.0, 100.0, 50.0, 50.0));

    let tick = ctl.next_autoscroll_tick().await.expect("second tick");
    ctl.apply_autoscroll_tick(&mut store, tick).expect("apply");
    assert_eq!(frame_of(&store, 1), Rect::new(120.0, 100.0, 50.0, 50.0));

    ctl.end_action(&mut store).expect("commit");
    assert!(!ctl.autoscroll_active());
}

#[tokio::test(start_paused = true)]
async fn test_autoscroll_idle_away_from_edges() {
    let mut store = store_with(vec![rect(1, 100.0, 100.0, 50.0, 50.0)]);
    let mut ctl = controller();
    let viewport = Rect::new(0.0, 0.0, 500.0, 400.0);

    assert!(ctl.start_autoscroll(&viewport, Point::new(250.0, 200.0)).is_err());

    ctl.begin_action(
        &mut store,
        ShapeId(1),
        TriggerKind::Move,
        Point::new(250.0, 200.0),
        Modifiers::default(),
    )
    .expect("begin");
    assert!(!ctl.start_autoscroll(&viewport, Point::new(250.0, 200.0)).expect("autoscroll"));
    assert!(!ctl.autoscroll_active());
    assert!(ctl.next_autoscroll_tick().await.is_none());
}

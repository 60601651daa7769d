use hvacdraw_designer::{
    hook_points, hook_to_point, nearest_target, perimeter_points, HookId, Point, Rect, Shape,
    ShapeId, TargetPoint,
};

const DIM_MAX: f64 = hvacdraw_core::constants::DIM_MAX;

fn square() -> Shape {
    Shape::rect(ShapeId(1), Rect::new(0.0, 0.0, 100.0, 100.0)).expect("rect")
}

#[test]
fn test_top_center_hook_on_quarter_turned_rect() {
    let shape = square().with_rotation(90.0);
    let p = hook_to_point(&shape, HookId::TOP_CENTER).expect("hook");
    // The unrotated right-center point of the frame.
    assert!(p.approx_eq(&Point::new(100.0, 50.0), 1e-9), "got {}", p);
}

#[test]
fn test_unrotated_output_ignores_rotation() {
    let shape = square().with_rotation(90.0);
    let pts = perimeter_points(
        &shape,
        &[TargetPoint::new(DIM_MAX / 2.0, 0.0)],
        Some(HookId::TOP_CENTER),
        true,
    )
    .expect("perimeter");
    assert!(pts[0].point.approx_eq(&Point::new(50.0, 0.0), 1e-9));
}

#[test]
fn test_default_hooks_are_edge_midpoints() {
    let ids: Vec<HookId> = hook_points(&square()).iter().map(|h| h.id).collect();
    assert_eq!(
        ids,
        vec![
            HookId::TOP_CENTER,
            HookId::RIGHT_CENTER,
            HookId::BOTTOM_CENTER,
            HookId::LEFT_CENTER
        ]
    );
}

#[test]
fn test_connect_points_become_custom_hooks() {
    let shape = square().with_connect_points(vec![
        Point::new(0.0, 0.0),
        Point::new(DIM_MAX, DIM_MAX),
    ]);
    let hooks = hook_points(&shape);
    assert_eq!(hooks.len(), 2);
    assert_eq!(hooks[1].id, HookId::custom(1));
    let p = hook_to_point(&shape, HookId::custom(1)).expect("custom hook");
    assert!(p.approx_eq(&Point::new(100.0, 100.0), 1e-9));
}

#[test]
fn test_nearest_target_projects_onto_outline() {
    let shape = square();
    let target = nearest_target(&shape, Point::new(98.0, 30.0), None).expect("target");
    assert!((target.y - 0.3 * DIM_MAX).abs() < 1e-6);
    assert!((target.x - DIM_MAX).abs() < 0.01 * DIM_MAX);
}

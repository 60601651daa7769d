use hvacdraw_designer::{
    HitResult, Point, PolyPointsOptions, Rect, Shape, ShapeFamily, ShapeId, ShapeKindData,
};
use proptest::prelude::*;

#[test]
fn test_hit_inside_border_and_miss() {
    let shape = Shape::rect(ShapeId(1), Rect::new(0.0, 0.0, 100.0, 60.0))
        .expect("rect")
        .with_line_thickness(2.0);
    assert_eq!(shape.hit(Point::new(50.0, 30.0), false, false), HitResult::Inside);
    assert_eq!(shape.hit(Point::new(50.0, 30.0), true, false), HitResult::None);
    assert_eq!(shape.hit(Point::new(0.5, 30.0), true, false), HitResult::Border);
    assert_eq!(shape.hit(Point::new(50.0, 30.0), false, true), HitResult::None);
    assert_eq!(shape.hit(Point::new(300.0, 30.0), false, false), HitResult::None);
}

#[test]
fn test_hit_follows_rotation() {
    let shape = Shape::rect(ShapeId(1), Rect::new(0.0, 40.0, 100.0, 20.0))
        .expect("rect")
        .with_rotation(90.0);
    // A quarter turn stands the bar upright about (50, 50).
    assert_eq!(shape.hit(Point::new(50.0, 5.0), false, false), HitResult::Inside);
    assert_eq!(shape.hit(Point::new(5.0, 50.0), false, false), HitResult::None);
}

#[test]
fn test_text_rect_round_trips_through_trect_to_frame() {
    let shape = Shape::rect(ShapeId(1), Rect::new(10.0, 20.0, 120.0, 80.0))
        .expect("rect")
        .with_line_thickness(2.0)
        .with_text_margin(5.0);
    assert!(shape
        .trect_to_frame(&shape.text_rect())
        .approx_eq(&shape.frame()));
}

#[test]
fn test_rounded_rect_outline_point_count() {
    let shape = Shape::rounded_rect(ShapeId(1), Rect::new(0.0, 0.0, 200.0, 100.0), 0.2)
        .expect("rounded rect");
    let pts = shape.poly_points(PolyPointsOptions::absolute().with_max_points(20));
    assert_eq!(pts.len(), 4 * 10 + 1);
    assert_eq!(pts.first(), pts.last());
    assert!(shape.corner_size() > 0.0);
}

#[test]
fn test_flip_twice_restores_vertices() {
    let original = Shape::polygon(
        ShapeId(1),
        Rect::new(0.0, 0.0, 160.0, 80.0),
        ShapeFamily::ArrowRight,
        30.0,
    )
    .expect("arrow");
    let mut shape = original.clone();
    shape.flip(true).expect("flip");
    assert_ne!(shape.kind, original.kind);
    shape.flip(true).expect("flip back");
    assert_eq!(shape.kind, original.kind);
    assert!(!shape.extra_flags.flip_horizontal());
}

#[test]
fn test_shape_serializes_with_kind_tag() {
    let shape = Shape::oval(ShapeId(3), Rect::new(0.0, 0.0, 40.0, 20.0)).expect("oval");
    let json = serde_json::to_value(&shape).expect("serialize");
    assert_eq!(json["kind"]["type"], "oval");
    let back: Shape = serde_json::from_value(json).expect("deserialize");
    assert!(matches!(back.kind, ShapeKindData::Oval(_)));
}

proptest! {
    #[test]
    fn prop_update_frame_is_idempotent(
        family_index in 0usize..ShapeFamily::ALL.len(),
        x in -100.0f64..100.0,
        y in -100.0f64..100.0,
        w in 0.0f64..800.0,
        h in 0.0f64..800.0,
    ) {
        let family = ShapeFamily::ALL[family_index];
        let param = if family.param_is_ratio() { 0.2 } else { 15.0 };
        let mut shape = Shape::polygon(ShapeId(1), Rect::new(0.0, 0.0, 50.0, 50.0), family, param)
            .expect("polygon")
            .with_line_thickness(1.0);
        let frame = Rect::new(x, y, w, h);

        shape.update_frame(frame).expect("update");
        let once = shape.clone();
        shape.update_frame(frame).expect("update again");
        prop_assert_eq!(&shape, &once);
        prop_assert!(shape.frame().width >= 4.0 && shape.frame().height >= 4.0);
    }
}

#[test]
fn test_store_survives_file_round_trip() {
    use hvacdraw_designer::{ObjectTable, ShapeStore};

    let mut store = ShapeStore::new();
    store
        .insert(
            Shape::rounded_rect(ShapeId(1), Rect::new(10.0, 10.0, 120.0, 60.0), 0.2)
                .expect("rounded rect")
                .with_rotation(30.0),
        )
        .expect("insert");
    store
        .insert(
            Shape::polygon(
                ShapeId(2),
                Rect::new(200.0, 40.0, 160.0, 80.0),
                ShapeFamily::Document,
                20.0,
            )
            .expect("document"),
        )
        .expect("insert");

    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("shapes.json");
    let shapes: Vec<&Shape> = store.iter().collect();
    std::fs::write(&path, serde_json::to_string(&shapes).expect("serialize")).expect("write");

    let text = std::fs::read_to_string(&path).expect("read");
    let loaded: Vec<Shape> = serde_json::from_str(&text).expect("deserialize");
    let mut reloaded = ShapeStore::new();
    for shape in loaded {
        reloaded.insert(shape).expect("insert");
    }

    for id in [ShapeId(1), ShapeId(2)] {
        let before = store.shape(id).expect("original");
        let after = reloaded.shape(id).expect("reloaded");
        assert_eq!(before.frame(), after.frame());
        assert_eq!(before.text_rect(), after.text_rect());
        let a = before.poly_points(PolyPointsOptions::absolute());
        let b = after.poly_points(PolyPointsOptions::absolute());
        assert_eq!(a.len(), b.len());
        assert!(a.iter().zip(&b).all(|(p, q)| p.approx_eq(q, 1e-9)));
    }
}

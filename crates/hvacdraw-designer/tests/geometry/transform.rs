use hvacdraw_designer::transform::{
    map_dimension_to_frame, map_frame_to_dimension, normalize_degrees, point_to_document,
    point_to_local, rotated_bounds, to_document,
};
use hvacdraw_designer::{Point, Rect};
use proptest::prelude::*;

#[test]
fn test_to_document_turns_clockwise_on_screen() {
    let frame = Rect::new(0.0, 0.0, 100.0, 100.0);
    let mut pts = [Point::new(50.0, 0.0)];
    to_document(&frame, 90.0, &mut pts);
    assert!(pts[0].approx_eq(&Point::new(100.0, 50.0), 1e-9));
}

#[test]
fn test_rotated_bounds_of_quarter_turn_swaps_extent() {
    let frame = Rect::new(0.0, 0.0, 100.0, 40.0);
    let bounds = rotated_bounds(&frame, 90.0);
    assert!(bounds.approx_eq(&Rect::new(30.0, -30.0, 40.0, 100.0)));
}

#[test]
fn test_degenerate_frame_has_no_dimension_mapping() {
    let frame = Rect::new(5.0, 5.0, 0.0, 10.0);
    assert!(map_frame_to_dimension(Point::new(5.0, 5.0), &frame).is_err());
}

proptest! {
    #[test]
    fn prop_rotation_round_trip(
        angle in -720.0f64..720.0,
        x in -500.0f64..500.0,
        y in -500.0f64..500.0,
        cx in -100.0f64..100.0,
        cy in -100.0f64..100.0,
    ) {
        let center = Point::new(cx, cy);
        let p = Point::new(x, y);
        let back = point_to_local(center, angle, point_to_document(center, angle, p));
        prop_assert!(back.approx_eq(&p, 1e-6));
    }

    #[test]
    fn prop_dimension_mapping_round_trip(
        dx in 0.0f64..30000.0,
        dy in 0.0f64..30000.0,
        w in 1.0f64..1000.0,
        h in 1.0f64..1000.0,
    ) {
        let frame = Rect::new(12.0, -7.0, w, h);
        let dim = Point::new(dx, dy);
        let back = map_frame_to_dimension(map_dimension_to_frame(dim, &frame), &frame)
            .expect("non-degenerate frame");
        prop_assert!(back.approx_eq(&dim, 1e-6));
    }

    #[test]
    fn prop_normalized_angle_in_range(angle in -10000.0f64..10000.0) {
        let a = normalize_degrees(angle);
        prop_assert!((0.0..360.0).contains(&a));
    }
}

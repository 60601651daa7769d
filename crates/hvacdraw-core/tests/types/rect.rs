use hvacdraw_core::{Insets, Point, Rect};
use proptest::prelude::*;

#[test]
fn test_inflate_and_deflate() {
    let r = Rect::new(10.0, 20.0, 100.0, 50.0);
    let grown = r.inflate(2.0, 3.0);
    assert_eq!(grown, Rect::new(8.0, 17.0, 104.0, 56.0));
    assert!(grown.inflate(-2.0, -3.0).approx_eq(&r));
}

#[test]
fn test_union_covers_both() {
    let a = Rect::new(0.0, 0.0, 10.0, 10.0);
    let b = Rect::new(20.0, -5.0, 5.0, 5.0);
    let u = a.union(&b);
    assert_eq!(u, Rect::new(0.0, -5.0, 25.0, 15.0));
}

#[test]
fn test_sub_insets_then_add_insets() {
    let r = Rect::new(0.0, 0.0, 100.0, 80.0);
    let insets = Insets::new(5.0, 6.0, 7.0, 8.0);
    let inner = r.sub_insets(&insets);
    assert_eq!(inner, Rect::new(5.0, 6.0, 88.0, 66.0));
    assert!(inner.add_insets(&insets).approx_eq(&r));
}

#[test]
fn test_bounding_of_points() {
    let pts = [
        Point::new(3.0, 4.0),
        Point::new(-1.0, 10.0),
        Point::new(7.0, -2.0),
    ];
    let bb = Rect::bounding(&pts).expect("non-empty");
    assert_eq!(bb, Rect::new(-1.0, -2.0, 8.0, 12.0));
    assert!(Rect::bounding(&[]).is_none());
}

#[test]
fn test_polygon_is_closed() {
    let poly = Rect::new(1.0, 2.0, 3.0, 4.0).to_polygon();
    assert_eq!(poly.len(), 5);
    assert_eq!(poly.first(), poly.last());
}

#[test]
fn test_rect_serializes_with_field_names() {
    let json = serde_json::to_string(&Rect::new(1.0, 2.0, 3.0, 4.0)).expect("serialize");
    assert!(json.contains("\"width\":3.0"), "unexpected json {}", json);
}

proptest! {
    #[test]
    fn union_contains_intersection(
        ax in -100.0f64..100.0, ay in -100.0f64..100.0, aw in 1.0f64..50.0, ah in 1.0f64..50.0,
        bx in -100.0f64..100.0, by in -100.0f64..100.0, bw in 1.0f64..50.0, bh in 1.0f64..50.0,
    ) {
        let a = Rect::new(ax, ay, aw, ah);
        let b = Rect::new(bx, by, bw, bh);
        let u = a.union(&b);
        if let Some(i) = a.intersect(&b) {
            prop_assert!(i.x >= u.x && i.y >= u.y);
            prop_assert!(i.right() <= u.right() + 1e-9 && i.bottom() <= u.bottom() + 1e-9);
            prop_assert!(i.width <= aw.min(bw) + 1e-9);
        }
    }
}

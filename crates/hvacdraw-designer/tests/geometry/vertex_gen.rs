use hvacdraw_designer::vertex_gen::generate;
use hvacdraw_designer::{Point, ShapeFamily};
use proptest::prelude::*;

#[test]
fn test_octagon_nine_points_in_unit_square() {
    let poly = generate(ShapeFamily::Octagon, 200.0, 100.0, 0.2).expect("octagon");
    assert_eq!(poly.len(), 9);
    assert!(poly.is_within_unit_square(0.0));
    assert_eq!(poly.points.first(), poly.points.last());

    // Cut is min(0.2·100, 0.2·200) = 20 in both directions.
    assert!(poly.points[0].approx_eq(&Point::new(0.1, 0.0), 1e-12));
    assert!(poly.points[2].approx_eq(&Point::new(1.0, 0.2), 1e-12));

    let mut distinct = poly.points[..8].to_vec();
    distinct.dedup();
    assert_eq!(distinct.len(), 8);
}

#[test]
fn test_fixed_families_ignore_param() {
    for family in [ShapeFamily::Diamond, ShapeFamily::Triangle, ShapeFamily::TriangleDown] {
        let a = generate(family, 120.0, 80.0, 0.0).expect("generate");
        let b = generate(family, 120.0, 80.0, 500.0).expect("generate");
        assert_eq!(a, b, "{} changed with its parameter", family);
    }
}

#[test]
fn test_non_finite_param_rejected() {
    assert!(generate(ShapeFamily::Hexagon, 100.0, 100.0, f64::NAN).is_err());
}

proptest! {
    #[test]
    fn prop_vertices_stay_in_unit_square(
        family_index in 0usize..ShapeFamily::ALL.len(),
        width in 10.0f64..2000.0,
        height in 10.0f64..2000.0,
        param in 0.0f64..600.0,
    ) {
        let family = ShapeFamily::ALL[family_index];
        let param = if family.param_is_ratio() { param / 1200.0 } else { param };
        let poly = generate(family, width, height, param).expect("generate");
        prop_assert!(poly.len() >= 4);
        prop_assert!(
            poly.is_within_unit_square(1e-9),
            "{} left the unit square: {:?}",
            family,
            poly.points.iter().find(|p| p.x < -1e-9 || p.x > 1.0 + 1e-9 || p.y < -1e-9 || p.y > 1.0 + 1e-9)
        );
    }
}

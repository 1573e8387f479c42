use super::*;
use nalgebra::{dvector, vector};
use proptest::prelude::*;

#[test]
fn vertices_map_to_triangle_corners() {
    let cfg = SimplexCfg::default();
    let a = to_planar(&vector![1.0, 0.0, 0.0], cfg);
    let b = to_planar(&vector![0.0, 1.0, 0.0], cfg);
    let c = to_planar(&vector![0.0, 0.0, 1.0], cfg);
    assert!(a.norm() < 1e-12);
    assert!((b - vector![1.0, 0.0]).norm() < 1e-12);
    assert!((c - vector![0.5, 3f64.sqrt() / 2.0]).norm() < 1e-12);
}

#[test]
fn centroid_round_trip() {
    let cfg = SimplexCfg::default();
    let p = vector![1.0 / 3.0, 1.0 / 3.0, 1.0 / 3.0];
    let q = to_planar(&p, cfg);
    let back = to_barycentric(q.x, q.y, cfg).expect("centroid is inside");
    assert!((back - p).norm() < 1e-12);
}

#[test]
fn zero_sum_does_not_divide_by_zero() {
    let q = to_planar(&vector![0.0, 0.0, 0.0], SimplexCfg::default());
    assert!(q.x.is_finite() && q.y.is_finite());
}

#[test]
fn planar_scaling_is_normalized() {
    // Percent input lands on the same planar point as fractions.
    let cfg = SimplexCfg::default();
    let frac = to_planar(&vector![0.2, 0.3, 0.5], cfg);
    let pct = to_planar(&vector![20.0, 30.0, 50.0], cfg);
    assert!((frac - pct).norm() < 1e-12);
}

#[test]
fn outside_triangle_is_none() {
    let cfg = SimplexCfg::default();
    assert!(to_barycentric(-0.1, 0.0, cfg).is_none());
    assert!(to_barycentric(1.1, 0.0, cfg).is_none());
    assert!(to_barycentric(0.5, -0.01, cfg).is_none());
    assert!(to_barycentric(0.5, 0.95, cfg).is_none());
    assert!(to_barycentric(f64::NAN, 0.1, cfg).is_none());
    assert!(to_barycentric(0.5, 0.2, cfg).is_some());
}

#[test]
fn percent_helpers_and_simplex_check() {
    let cfg = SimplexCfg::default();
    let p = from_percent(&vector![30.0, 30.0, 40.5]);
    assert!(is_on_simplex(&p, cfg));
    assert!((to_percent(&p) - vector![30.0, 30.0, 40.5]).norm() < 1e-12);
    assert!(!is_on_simplex(&vector![0.5, 0.5, 0.5], cfg));
    assert!(!is_on_simplex(&vector![-0.2, 0.6, 0.6], cfg));
}

#[test]
fn mixture_conversion_requires_three_components() {
    assert!(mixture_to_composition(&dvector![0.5, 0.5, 0.0]).is_some());
    assert!(mixture_to_composition(&dvector![0.5, 0.5]).is_none());
}

proptest! {
    #[test]
    fn round_trip_on_simplex(a in 0.0f64..1.0, t in 0.0f64..1.0) {
        let b = (1.0 - a) * t;
        let c = 1.0 - a - b;
        let cfg = SimplexCfg::default();
        let p = vector![a, b, c];
        let q = to_planar(&p, cfg);
        let back = to_barycentric(q.x, q.y, cfg);
        prop_assert!(back.is_some());
        prop_assert!((back.unwrap() - p).norm() < 1e-9);
    }
}

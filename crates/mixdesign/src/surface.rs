//! Response-surface sampling on a regular simplex lattice.
//!
//! A renderer (heatmap, ternary contour) consumes `SurfaceSample`s; this
//! module only evaluates. Order: `i` (first component) ascending, then `j`.

use nalgebra::Vector2;

use crate::interp::{InterpError, Interpolator};
use crate::simplex::{to_planar, Composition, SimplexCfg};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceSample {
    pub point: Composition,
    pub planar: Vector2<f64>,
    /// NaN where the interpolator is undefined.
    pub value: f64,
}

/// Evaluate `interp` at every `(i, j, k) / scale` with `i + j + k = scale`.
/// `scale = 0` yields no samples.
pub fn sample_surface(
    interp: &dyn Interpolator,
    scale: usize,
) -> Result<Vec<SurfaceSample>, InterpError> {
    if scale == 0 {
        return Ok(Vec::new());
    }
    let cfg = SimplexCfg::default();
    let s = scale as f64;
    let mut out = Vec::with_capacity((scale + 1) * (scale + 2) / 2);
    for i in 0..=scale {
        for j in 0..=scale - i {
            let k = scale - i - j;
            let point = Composition::new(i as f64 / s, j as f64 / s, k as f64 / s);
            out.push(SurfaceSample {
                point,
                planar: to_planar(&point, cfg),
                value: interp.evaluate(&point)?,
            });
        }
    }
    let undefined = out.iter().filter(|x| x.value.is_nan()).count();
    tracing::debug!(
        interp = interp.name(),
        scale,
        samples = out.len(),
        undefined,
        "surface sampled"
    );
    Ok(out)
}

/// Replace NaN values with `fill`; returns how many were replaced.
pub fn fill_nan(samples: &mut [SurfaceSample], fill: f64) -> usize {
    let mut n = 0;
    for sample in samples.iter_mut().filter(|x| x.value.is_nan()) {
        sample.value = fill;
        n += 1;
    }
    n
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interp::{ExactLinearInterpolator, PiecewiseLinearInterpolator};
    use nalgebra::vector;

    fn plane() -> ExactLinearInterpolator {
        let pts = vec![
            vector![1.0, 0.0, 0.0],
            vector![0.0, 1.0, 0.0],
            vector![0.0, 0.0, 1.0],
        ];
        ExactLinearInterpolator::new(&pts, &[1.0, 2.0, 3.0]).unwrap()
    }

    #[test]
    fn lattice_sample_count_and_order() {
        let samples = sample_surface(&plane(), 4).unwrap();
        assert_eq!(samples.len(), 15);
        assert_eq!(samples[0].point, vector![0.0, 0.0, 1.0]);
        assert_eq!(samples[14].point, vector![1.0, 0.0, 0.0]);
        for s in &samples {
            assert!((s.point.sum() - 1.0).abs() < 1e-12);
            let want = s.point.x + 2.0 * s.point.y + 3.0 * s.point.z;
            assert!((s.value - want).abs() < 1e-9);
        }
        assert!(sample_surface(&plane(), 0).unwrap().is_empty());
    }

    #[test]
    fn planar_coordinates_attached() {
        let samples = sample_surface(&plane(), 1).unwrap();
        // (0,0,1) is the apex of the triangle.
        assert!((samples[0].planar - Vector2::new(0.5, 3f64.sqrt() / 2.0)).norm() < 1e-12);
    }

    #[test]
    fn nan_outside_piecewise_hull_can_be_filled() {
        let pts = vec![
            vector![0.6, 0.2, 0.2],
            vector![0.2, 0.6, 0.2],
            vector![0.2, 0.2, 0.6],
        ];
        let pl = PiecewiseLinearInterpolator::new(&pts, &[1.0, 2.0, 3.0]).unwrap();
        let mut samples = sample_surface(&pl, 10).unwrap();
        let undefined = samples.iter().filter(|s| s.value.is_nan()).count();
        assert!(undefined > 0);
        assert!(samples.iter().any(|s| s.value.is_finite()));
        assert_eq!(fill_nan(&mut samples, 0.0), undefined);
        assert!(samples.iter().all(|s| s.value.is_finite()));
    }
}

use nalgebra::Vector2;

use super::types::{Composition, SimplexCfg};

const HALF_SQRT3: f64 = 0.866_025_403_784_438_6;

/// Barycentric → planar: `x = (2b + c) / 2s`, `y = (√3/2) c / s` with `s = a+b+c`.
///
/// A zero sum is replaced by `eps_zero` instead of failing.
#[inline]
pub fn to_planar(p: &Composition, cfg: SimplexCfg) -> Vector2<f64> {
    let mut s = p.sum();
    if s == 0.0 {
        s = cfg.eps_zero;
    }
    Vector2::new(0.5 * (2.0 * p.y + p.z) / s, HALF_SQRT3 * p.z / s)
}

pub fn to_planar_all(points: &[Composition], cfg: SimplexCfg) -> Vec<Vector2<f64>> {
    points.iter().map(|p| to_planar(p, cfg)).collect()
}

/// Planar → barycentric (unit total). `None` if the point lies outside the
/// triangle by more than `eps_out`.
pub fn to_barycentric(x: f64, y: f64, cfg: SimplexCfg) -> Option<Composition> {
    let c = y / HALF_SQRT3;
    let b = x - 0.5 * c;
    let a = 1.0 - b - c;
    let p = Composition::new(a, b, c);
    if !p.iter().all(|v| v.is_finite()) {
        return None;
    }
    if p.iter().any(|&v| v < -cfg.eps_out) || p.sum() > 1.0 + cfg.eps_out {
        return None;
    }
    Some(p)
}

//! Composition type and simplex tolerances.

use nalgebra::{DVector, Vector3};

/// Mixture proportions `(a, b, c)`; fractions summing to 1.
pub type Composition = Vector3<f64>;

/// Simplex tolerances.
#[derive(Clone, Copy, Debug)]
pub struct SimplexCfg {
    /// Allowed deviation of `a+b+c` from 1 for user-sourced points.
    pub eps_sum: f64,
    /// Allowed negative overshoot of a component (and of the sum above 1)
    /// when mapping planar points back onto the simplex.
    pub eps_out: f64,
    /// Substitute for a zero component sum in `to_planar`.
    pub eps_zero: f64,
}

impl Default for SimplexCfg {
    fn default() -> Self {
        Self {
            eps_sum: 1e-2,
            eps_out: 1e-9,
            eps_zero: 1e-10,
        }
    }
}

/// True if `p` has no component below `-eps_out` and sums to 1 within `eps_sum`.
#[inline]
pub fn is_on_simplex(p: &Composition, cfg: SimplexCfg) -> bool {
    p.iter().all(|&x| x >= -cfg.eps_out) && (p.sum() - 1.0).abs() <= cfg.eps_sum
}

#[inline]
pub fn to_percent(p: &Composition) -> Composition {
    p * 100.0
}

#[inline]
pub fn from_percent(p: &Composition) -> Composition {
    p / 100.0
}

/// View a k-component design point as a `Composition` (k must be 3).
pub fn mixture_to_composition(v: &DVector<f64>) -> Option<Composition> {
    if v.len() != 3 {
        return None;
    }
    Some(Composition::new(v[0], v[1], v[2]))
}

//! Exact fits through a fixed number of points.
//!
//! - Linear: `f(p) = β·p` through 3 points (Scheffé linear blend).
//! - Quadratic: `f(p) = β·(a, b, c, ab, ac, bc, abc)` through 7 points
//!   (Scheffé special cubic; the (3, 2) centroid design is its natural support).

use nalgebra::{DMatrix, DVector, Matrix3, SMatrix, SVector, Vector3};

use super::{InterpError, Interpolator, Snapshot};
use crate::simplex::Composition;

/// Reciprocal condition number σ_min/σ_max at or below this is singular.
/// Scale-free: a design shrunk into a small sub-region still solves.
const RCOND_EPS: f64 = 1e-12;

/// Special-cubic coefficient or basis vector.
pub type Vector7 = SVector<f64, 7>;
type Matrix7 = SMatrix<f64, 7, 7>;

/// σ_min/σ_max of a square matrix; 0 for an all-zero or non-finite one.
fn reciprocal_condition(a: DMatrix<f64>) -> f64 {
    let sv = a.singular_values();
    let max = sv.max();
    if !(max.is_finite() && max > 0.0) {
        return 0.0;
    }
    sv.min() / max
}

/// LU solve of `a x = s` for an n×n system, rejecting ill-conditioned ones.
fn solve_checked(
    n: usize,
    a: &[f64],
    s: &[f64],
    what: &'static str,
) -> Result<DVector<f64>, InterpError> {
    let a = DMatrix::from_column_slice(n, n, a);
    let rcond = reciprocal_condition(a.clone());
    if rcond <= RCOND_EPS {
        tracing::debug!(what, rcond, "singular system");
        return Err(InterpError::SingularSystem { what });
    }
    a.lu()
        .solve(&DVector::from_column_slice(s))
        .filter(|x| x.iter().all(|v| v.is_finite()))
        .ok_or(InterpError::SingularSystem { what })
}

#[derive(Clone, Debug)]
pub struct ExactLinearInterpolator {
    data: Snapshot,
    coeffs: Vector3<f64>,
}

impl ExactLinearInterpolator {
    pub const POINTS: usize = 3;

    pub fn new(points: &[Composition], scores: &[f64]) -> Result<Self, InterpError> {
        let data = Snapshot::new(points, scores, Self::POINTS, Some(Self::POINTS))?;
        let coeffs = Self::fit(&data)?;
        Ok(Self { data, coeffs })
    }

    pub fn coefficients(&self) -> &Vector3<f64> {
        &self.coeffs
    }

    fn fit(data: &Snapshot) -> Result<Vector3<f64>, InterpError> {
        let p = Matrix3::from_rows(&[
            data.points[0].transpose(),
            data.points[1].transpose(),
            data.points[2].transpose(),
        ]);
        let x = solve_checked(3, p.as_slice(), &data.scores, "linear design")?;
        Ok(Vector3::from_column_slice(x.as_slice()))
    }
}

impl Interpolator for ExactLinearInterpolator {
    fn name(&self) -> &'static str {
        "Linear"
    }

    fn min_points(&self) -> usize {
        Self::POINTS
    }

    fn max_points(&self) -> Option<usize> {
        Some(Self::POINTS)
    }

    fn points(&self) -> &[Composition] {
        &self.data.points
    }

    fn scores(&self) -> &[f64] {
        &self.data.scores
    }

    fn update(&mut self, points: &[Composition], scores: &[f64]) -> Result<(), InterpError> {
        let data = Snapshot::new(points, scores, Self::POINTS, Some(Self::POINTS))?;
        self.coeffs = Self::fit(&data)?;
        self.data = data;
        tracing::debug!(interp = "Linear", "refit");
        Ok(())
    }

    fn recompute(&mut self) -> Result<(), InterpError> {
        self.coeffs = Self::fit(&self.data)?;
        Ok(())
    }

    fn evaluate(&self, p: &Composition) -> Result<f64, InterpError> {
        Ok(self.coeffs.dot(p))
    }
}

/// Basis expansion `(a, b, c, ab, ac, bc, abc)`.
pub fn special_cubic_basis(p: &Composition) -> Vector7 {
    let (a, b, c) = (p.x, p.y, p.z);
    Vector7::from_column_slice(&[a, b, c, a * b, a * c, b * c, a * b * c])
}

#[derive(Clone, Debug)]
pub struct ExactQuadraticInterpolator {
    data: Snapshot,
    coeffs: Vector7,
}

impl ExactQuadraticInterpolator {
    pub const POINTS: usize = 7;

    pub fn new(points: &[Composition], scores: &[f64]) -> Result<Self, InterpError> {
        let data = Snapshot::new(points, scores, Self::POINTS, Some(Self::POINTS))?;
        let coeffs = Self::fit(&data)?;
        Ok(Self { data, coeffs })
    }

    pub fn coefficients(&self) -> &Vector7 {
        &self.coeffs
    }

    fn fit(data: &Snapshot) -> Result<Vector7, InterpError> {
        let rows: Vec<Vector7> = data.points.iter().map(special_cubic_basis).collect();
        let a = Matrix7::from_fn(|r, c| rows[r][c]);
        let x = solve_checked(7, a.as_slice(), &data.scores, "special-cubic basis")?;
        Ok(Vector7::from_column_slice(x.as_slice()))
    }
}

impl Interpolator for ExactQuadraticInterpolator {
    fn name(&self) -> &'static str {
        "Quadratic"
    }

    fn min_points(&self) -> usize {
        Self::POINTS
    }

    fn max_points(&self) -> Option<usize> {
        Some(Self::POINTS)
    }

    fn points(&self) -> &[Composition] {
        &self.data.points
    }

    fn scores(&self) -> &[f64] {
        &self.data.scores
    }

    fn update(&mut self, points: &[Composition], scores: &[f64]) -> Result<(), InterpError> {
        let data = Snapshot::new(points, scores, Self::POINTS, Some(Self::POINTS))?;
        self.coeffs = Self::fit(&data)?;
        self.data = data;
        tracing::debug!(interp = "Quadratic", "refit");
        Ok(())
    }

    fn recompute(&mut self) -> Result<(), InterpError> {
        self.coeffs = Self::fit(&self.data)?;
        Ok(())
    }

    fn evaluate(&self, p: &Composition) -> Result<f64, InterpError> {
        Ok(self.coeffs.dot(&special_cubic_basis(p)))
    }
}

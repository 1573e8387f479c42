//! Response-surface interpolation over scored compositions.
//!
//! Purpose
//! - Fit a surface to `(Composition, score)` pairs and evaluate it anywhere on
//!   the simplex, plus an R² against the training set.
//! - Four families behind the `Interpolator` trait: radial basis functions,
//!   piecewise-linear over a Delaunay triangulation, and exact linear (3
//!   points) / special-cubic (7 points) solves.
//!
//! State
//! - Each interpolator owns a snapshot of its training data and the fit
//!   derived from it. `update` refits from scratch; a failed refit keeps the
//!   previous snapshot and fit and returns the error.
//! - The lazy RBF mode defers the solve to the first evaluation.
//!
//! Code cross-refs: `simplex::to_planar`, `registry::InterpolatorRegistry`.

mod exact;
mod piecewise;
mod rbf;
mod registry;

use std::fmt;

use crate::simplex::Composition;

pub use exact::{
    special_cubic_basis, ExactLinearInterpolator, ExactQuadraticInterpolator, Vector7,
};
pub use piecewise::PiecewiseLinearInterpolator;
pub use rbf::{RadialBasisInterpolator, RbfCfg, RbfKernel};
pub use registry::{InterpCfg, InterpolatorFactory, InterpolatorRegistry};

/// Errors surfaced by interpolator construction, refit and evaluation.
#[derive(Debug, Clone, PartialEq)]
pub enum InterpError {
    /// Fewer training points than the variant needs.
    InsufficientPoints { required: usize, got: usize },
    /// Exact variants take a fixed number of points.
    PointCountMismatch { expected: usize, got: usize },
    /// `points` and `scores` differ in length.
    ScoreCountMismatch { points: usize, scores: usize },
    /// The linear system of the fit is not invertible.
    SingularSystem { what: &'static str },
    /// All training points are collinear (or coincide) in the plane, or a
    /// planar coordinate is not finite.
    DegenerateTriangulation,
    /// No interpolator registered under this name.
    UnknownInterpolator { name: String },
    /// Unrecognized RBF kernel name.
    UnknownKernel { name: String },
}

impl fmt::Display for InterpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InsufficientPoints { required, got } => {
                write!(f, "need at least {required} training points, got {got}")
            }
            Self::PointCountMismatch { expected, got } => {
                write!(f, "need exactly {expected} training points, got {got}")
            }
            Self::ScoreCountMismatch { points, scores } => {
                write!(f, "{points} points but {scores} scores")
            }
            Self::SingularSystem { what } => write!(f, "singular {what} matrix"),
            Self::DegenerateTriangulation => {
                write!(f, "training points are collinear; no triangulation")
            }
            Self::UnknownInterpolator { name } => write!(f, "no interpolator named {name:?}"),
            Self::UnknownKernel { name } => write!(f, "unknown RBF kernel {name:?}"),
        }
    }
}

impl std::error::Error for InterpError {}

/// Common capability set of all interpolation families.
pub trait Interpolator {
    fn name(&self) -> &'static str;

    fn min_points(&self) -> usize;

    /// `None` if unbounded.
    fn max_points(&self) -> Option<usize>;

    /// Training compositions of the current snapshot.
    fn points(&self) -> &[Composition];

    fn scores(&self) -> &[f64];

    /// Replace the training data and refit.
    fn update(&mut self, points: &[Composition], scores: &[f64]) -> Result<(), InterpError>;

    /// Refit from the current snapshot.
    fn recompute(&mut self) -> Result<(), InterpError>;

    /// Estimated response at `p`. NaN where the surface is undefined.
    fn evaluate(&self, p: &Composition) -> Result<f64, InterpError>;

    /// Extend the training data and refit.
    fn append(&mut self, points: &[Composition], scores: &[f64]) -> Result<(), InterpError> {
        if points.len() != scores.len() {
            return Err(InterpError::ScoreCountMismatch {
                points: points.len(),
                scores: scores.len(),
            });
        }
        let mut all_points = self.points().to_vec();
        all_points.extend_from_slice(points);
        let mut all_scores = self.scores().to_vec();
        all_scores.extend_from_slice(scores);
        self.update(&all_points, &all_scores)
    }

    /// Coefficient of determination on the training set.
    fn r2(&self) -> Result<f64, InterpError> {
        let predicted = self
            .points()
            .iter()
            .map(|p| self.evaluate(p))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(r2_score(self.scores(), &predicted))
    }
}

/// `1 − SS_res / SS_tot`. A constant response scores 1.0 when reproduced
/// exactly and 0.0 otherwise.
pub fn r2_score(observed: &[f64], predicted: &[f64]) -> f64 {
    let n = observed.len().min(predicted.len());
    if n == 0 {
        return f64::NAN;
    }
    let mean = observed[..n].iter().sum::<f64>() / n as f64;
    let ss_tot: f64 = observed[..n].iter().map(|y| (y - mean).powi(2)).sum();
    let ss_res: f64 = observed[..n]
        .iter()
        .zip(&predicted[..n])
        .map(|(y, f)| (y - f).powi(2))
        .sum();
    if ss_tot == 0.0 {
        return if ss_res <= 1e-12 { 1.0 } else { 0.0 };
    }
    1.0 - ss_res / ss_tot
}

/// Training data owned by an interpolator.
#[derive(Clone, Debug, Default)]
pub(crate) struct Snapshot {
    pub points: Vec<Composition>,
    pub scores: Vec<f64>,
}

impl Snapshot {
    pub(crate) fn new(
        points: &[Composition],
        scores: &[f64],
        min: usize,
        max: Option<usize>,
    ) -> Result<Self, InterpError> {
        check_counts(points.len(), scores.len(), min, max)?;
        Ok(Self {
            points: points.to_vec(),
            scores: scores.to_vec(),
        })
    }
}

pub(crate) fn check_counts(
    points: usize,
    scores: usize,
    min: usize,
    max: Option<usize>,
) -> Result<(), InterpError> {
    if points != scores {
        return Err(InterpError::ScoreCountMismatch { points, scores });
    }
    if points < min.max(1) {
        return Err(InterpError::InsufficientPoints {
            required: min.max(1),
            got: points,
        });
    }
    if let Some(max) = max {
        if points > max {
            return Err(InterpError::PointCountMismatch {
                expected: max,
                got: points,
            });
        }
    }
    Ok(())
}

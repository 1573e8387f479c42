//! Radial basis function interpolation in the planar embedding.
//!
//! Model
//! - Centers are the planar images of the training compositions.
//! - `s(x) = Σ wᵢ φ(ε‖x − xᵢ‖) + c₀ + c₁x + c₂y`, with the side conditions
//!   `Σ wᵢ = Σ wᵢxᵢ = Σ wᵢyᵢ = 0`; `smoothing` is added on the kernel diagonal
//!   (0 interpolates exactly).
//! - Lazy mode validates point counts immediately but solves on first use.

use std::cell::OnceCell;
use std::fmt;
use std::str::FromStr;

use nalgebra::{DMatrix, DVector, Vector2, Vector3};

use super::{InterpError, Interpolator, Snapshot};
use crate::simplex::{to_planar, to_planar_all, Composition, SimplexCfg};

/// Kernel φ(r), with r already scaled by the shape parameter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RbfKernel {
    /// −r
    Linear,
    /// r² ln r
    ThinPlateSpline,
    /// r³
    Cubic,
    /// −r⁵
    Quintic,
    /// −√(1 + r²)
    Multiquadric,
    /// 1/√(1 + r²)
    InverseMultiquadric,
    /// 1/(1 + r²)
    InverseQuadratic,
    /// exp(−r²)
    Gaussian,
}

impl RbfKernel {
    pub const ALL: [RbfKernel; 8] = [
        RbfKernel::Linear,
        RbfKernel::ThinPlateSpline,
        RbfKernel::Cubic,
        RbfKernel::Quintic,
        RbfKernel::Multiquadric,
        RbfKernel::InverseMultiquadric,
        RbfKernel::InverseQuadratic,
        RbfKernel::Gaussian,
    ];

    #[inline]
    pub fn eval(self, r: f64) -> f64 {
        match self {
            RbfKernel::Linear => -r,
            RbfKernel::ThinPlateSpline => {
                if r == 0.0 {
                    0.0
                } else {
                    r * r * r.ln()
                }
            }
            RbfKernel::Cubic => r.powi(3),
            RbfKernel::Quintic => -r.powi(5),
            RbfKernel::Multiquadric => -(1.0 + r * r).sqrt(),
            RbfKernel::InverseMultiquadric => 1.0 / (1.0 + r * r).sqrt(),
            RbfKernel::InverseQuadratic => 1.0 / (1.0 + r * r),
            RbfKernel::Gaussian => (-r * r).exp(),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RbfKernel::Linear => "linear",
            RbfKernel::ThinPlateSpline => "thin_plate_spline",
            RbfKernel::Cubic => "cubic",
            RbfKernel::Quintic => "quintic",
            RbfKernel::Multiquadric => "multiquadric",
            RbfKernel::InverseMultiquadric => "inverse_multiquadric",
            RbfKernel::InverseQuadratic => "inverse_quadratic",
            RbfKernel::Gaussian => "gaussian",
        }
    }
}

impl fmt::Display for RbfKernel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RbfKernel {
    type Err = InterpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        RbfKernel::ALL
            .into_iter()
            .find(|k| k.as_str() == wanted)
            .ok_or_else(|| InterpError::UnknownKernel {
                name: s.to_string(),
            })
    }
}

/// RBF settings.
#[derive(Clone, Copy, Debug)]
pub struct RbfCfg {
    pub kernel: RbfKernel,
    /// Shape parameter ε scaling distances before φ.
    pub epsilon: f64,
    pub smoothing: f64,
    /// Defer the solve to the first evaluation.
    pub lazy: bool,
}

impl Default for RbfCfg {
    fn default() -> Self {
        Self {
            kernel: RbfKernel::ThinPlateSpline,
            epsilon: 1.0,
            smoothing: 0.0,
            lazy: false,
        }
    }
}

#[derive(Clone, Debug)]
struct RbfFit {
    centers: Vec<Vector2<f64>>,
    weights: DVector<f64>,
    poly: Vector3<f64>,
    kernel: RbfKernel,
    epsilon: f64,
}

impl RbfFit {
    fn solve(data: &Snapshot, cfg: &RbfCfg, scfg: SimplexCfg) -> Result<Self, InterpError> {
        let centers = to_planar_all(&data.points, scfg);
        let n = centers.len();
        let size = n + 3;
        let mut a = DMatrix::<f64>::zeros(size, size);
        for i in 0..n {
            for j in 0..n {
                let r = cfg.epsilon * (centers[i] - centers[j]).norm();
                a[(i, j)] = cfg.kernel.eval(r);
            }
            a[(i, i)] += cfg.smoothing;
            let tail = [1.0, centers[i].x, centers[i].y];
            for (k, t) in tail.into_iter().enumerate() {
                a[(i, n + k)] = t;
                a[(n + k, i)] = t;
            }
        }
        let mut rhs = DVector::<f64>::zeros(size);
        rhs.rows_mut(0, n).copy_from_slice(&data.scores);

        let sol = a.lu().solve(&rhs).ok_or(InterpError::SingularSystem {
            what: "RBF collocation",
        })?;
        if sol.iter().any(|v| !v.is_finite()) {
            return Err(InterpError::SingularSystem {
                what: "RBF collocation",
            });
        }
        Ok(Self {
            centers,
            weights: sol.rows(0, n).into_owned(),
            poly: Vector3::new(sol[n], sol[n + 1], sol[n + 2]),
            kernel: cfg.kernel,
            epsilon: cfg.epsilon,
        })
    }

    fn eval(&self, x: Vector2<f64>) -> f64 {
        let radial: f64 = self
            .centers
            .iter()
            .zip(self.weights.iter())
            .map(|(c, w)| w * self.kernel.eval(self.epsilon * (x - c).norm()))
            .sum();
        radial + self.poly.dot(&Vector3::new(1.0, x.x, x.y))
    }
}

#[derive(Clone, Debug)]
pub struct RadialBasisInterpolator {
    cfg: RbfCfg,
    simplex: SimplexCfg,
    data: Snapshot,
    fit: OnceCell<RbfFit>,
}

impl RadialBasisInterpolator {
    pub const MIN_POINTS: usize = 3;

    pub fn new(points: &[Composition], scores: &[f64], cfg: RbfCfg) -> Result<Self, InterpError> {
        let data = Snapshot::new(points, scores, Self::MIN_POINTS, None)?;
        let simplex = SimplexCfg::default();
        let fit = if cfg.lazy {
            OnceCell::new()
        } else {
            OnceCell::from(RbfFit::solve(&data, &cfg, simplex)?)
        };
        Ok(Self {
            cfg,
            simplex,
            data,
            fit,
        })
    }

    pub fn cfg(&self) -> &RbfCfg {
        &self.cfg
    }

    /// True once the collocation system has been solved for the current snapshot.
    pub fn is_fitted(&self) -> bool {
        self.fit.get().is_some()
    }

    fn fitted(&self) -> Result<&RbfFit, InterpError> {
        if let Some(fit) = self.fit.get() {
            return Ok(fit);
        }
        let fit = RbfFit::solve(&self.data, &self.cfg, self.simplex)?;
        tracing::debug!(points = self.data.points.len(), "lazy RBF fit");
        Ok(self.fit.get_or_init(|| fit))
    }
}

impl Interpolator for RadialBasisInterpolator {
    fn name(&self) -> &'static str {
        "RBF"
    }

    fn min_points(&self) -> usize {
        Self::MIN_POINTS
    }

    fn max_points(&self) -> Option<usize> {
        None
    }

    fn points(&self) -> &[Composition] {
        &self.data.points
    }

    fn scores(&self) -> &[f64] {
        &self.data.scores
    }

    fn update(&mut self, points: &[Composition], scores: &[f64]) -> Result<(), InterpError> {
        let data = Snapshot::new(points, scores, Self::MIN_POINTS, None)?;
        self.fit = if self.cfg.lazy {
            OnceCell::new()
        } else {
            OnceCell::from(RbfFit::solve(&data, &self.cfg, self.simplex)?)
        };
        self.data = data;
        tracing::debug!(
            interp = "RBF",
            points = self.data.points.len(),
            lazy = self.cfg.lazy,
            "refit"
        );
        Ok(())
    }

    fn recompute(&mut self) -> Result<(), InterpError> {
        let fit = RbfFit::solve(&self.data, &self.cfg, self.simplex)?;
        self.fit = OnceCell::from(fit);
        Ok(())
    }

    fn evaluate(&self, p: &Composition) -> Result<f64, InterpError> {
        let fit = self.fitted()?;
        Ok(fit.eval(to_planar(p, self.simplex)))
    }
}

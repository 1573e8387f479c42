//! Flat re-export surface used by the command-line front end.
//!
//! Internal to the workspace; names may move between modules without notice.

// Designs
pub use crate::design::{
    candidate_set, information_det, select_optimal_subset, CentroidDesign, CentroidGrowthDesign,
    DesignConfig, DesignError, DesignGenerator, DesignRegistry, ExchangeCfg, ExchangeOutcome,
    HullDesign, LatticeDesign, MixturePoint,
};
// Interpolation
pub use crate::interp::{
    r2_score, ExactLinearInterpolator, ExactQuadraticInterpolator, InterpCfg, InterpError,
    Interpolator, InterpolatorRegistry, PiecewiseLinearInterpolator, RadialBasisInterpolator,
    RbfCfg, RbfKernel,
};
// Simplex, tables, sampling
pub use crate::simplex::{from_percent, to_barycentric, to_percent, to_planar, Composition};
pub use crate::surface::{fill_nan, sample_surface, SurfaceSample};
pub use crate::table::{weighted_scores, PointTable, ScoredPoint, TableError, HEADER};

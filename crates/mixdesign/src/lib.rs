//! Three-component mixture designs and response-surface interpolation.
//!
//! Layout
//! - `simplex`: compositions on the 2-simplex and the planar embedding.
//! - `design`: centroid, lattice and hull designs; D-optimal coordinate exchange.
//! - `interp`: RBF, piecewise-linear and exact fits behind `Interpolator`.
//! - `table`: the scored point collection a session edits.
//! - `surface`: lattice sampling of a fitted surface for plotting.
//!
//! Everything is synchronous and caller-owned: registries and tables are plain
//! values, no global state. Logging goes through `tracing`; install a
//! subscriber in the binary to see it.

pub mod api;
pub mod design;
pub mod interp;
pub mod simplex;
pub mod surface;
pub mod table;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use simplex::{Composition, SimplexCfg};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::design::{
        DesignConfig, DesignError, DesignGenerator, DesignRegistry, ExchangeCfg, HullDesign,
        MixturePoint,
    };
    pub use crate::interp::{
        InterpCfg, InterpError, Interpolator, InterpolatorRegistry, RbfCfg, RbfKernel,
    };
    pub use crate::simplex::{to_barycentric, to_planar, Composition, SimplexCfg};
    pub use crate::table::{PointTable, ScoredPoint};
}

//! Mixture design generators.
//!
//! Purpose
//! - Produce ordered point sets on the (k−1)-simplex: simplex-centroid,
//!   centroid-with-growth, Scheffé lattice, and hull-derived D-optimal subsets.
//! - Expose them behind one `DesignGenerator` trait so a caller-owned
//!   `DesignRegistry` can pick them by name.
//!
//! Model
//! - Design points are `DVector<f64>` of length k. Structured designs work for
//!   any k; hull candidates carry whatever dimension the polygon has.
//! - `DesignConfig::order` is the degree m for structured designs and the
//!   requested subset size for hull designs.
//!
//! Code cross-refs: `exchange::select_optimal_subset`, `registry::DesignRegistry`.

mod centroid;
mod exchange;
mod hull;
mod lattice;
mod registry;

use std::fmt;

use nalgebra::DVector;

pub use centroid::{CentroidDesign, CentroidGrowthDesign};
pub use exchange::{information_det, select_optimal_subset, ExchangeCfg, ExchangeOutcome};
pub use hull::{candidate_set, HullDesign};
pub use lattice::LatticeDesign;
pub use registry::DesignRegistry;

/// A single design point (k proportions).
pub type MixturePoint = DVector<f64>;

/// Errors raised by design generators.
#[derive(Debug, Clone, PartialEq)]
pub enum DesignError {
    /// k/m out of the allowed range for the chosen design.
    InvalidDesignConfig { reason: String },
    /// Hull design built from a polygon without vertices.
    EmptyPolygon,
    /// No design registered under this name.
    UnknownDesign { name: String },
}

impl DesignError {
    fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidDesignConfig {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for DesignError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDesignConfig { reason } => write!(f, "invalid design config: {reason}"),
            Self::EmptyPolygon => write!(f, "hull design needs at least one polygon vertex"),
            Self::UnknownDesign { name } => write!(f, "no design registered as {name:?}"),
        }
    }
}

impl std::error::Error for DesignError {}

/// Design request: component count k, order/degree m (or subset size for
/// hull designs) and the exchange-search settings used by hull designs.
#[derive(Clone, Copy, Debug)]
pub struct DesignConfig {
    pub components: usize,
    pub order: usize,
    pub exchange: ExchangeCfg,
}

impl DesignConfig {
    pub fn new(components: usize, order: usize) -> Self {
        Self {
            components,
            order,
            exchange: ExchangeCfg::default(),
        }
    }

    pub fn with_exchange(mut self, exchange: ExchangeCfg) -> Self {
        self.exchange = exchange;
        self
    }
}

/// Common interface of all design families.
pub trait DesignGenerator {
    fn name(&self) -> &str;

    /// True if the design takes its structure from `DesignConfig::order`.
    fn orders_by_degree(&self) -> bool;

    fn generate(&self, cfg: &DesignConfig) -> Result<Vec<MixturePoint>, DesignError>;
}

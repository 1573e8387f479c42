//! Caller-owned name → interpolator factory map.

use std::collections::BTreeMap;

use super::{
    ExactLinearInterpolator, ExactQuadraticInterpolator, InterpError, Interpolator,
    PiecewiseLinearInterpolator, RadialBasisInterpolator, RbfCfg,
};
use crate::simplex::Composition;

/// Settings handed to every factory; each family reads what it needs.
#[derive(Clone, Copy, Debug, Default)]
pub struct InterpCfg {
    pub rbf: RbfCfg,
}

pub type InterpolatorFactory =
    fn(&[Composition], &[f64], &InterpCfg) -> Result<Box<dyn Interpolator>, InterpError>;

fn build_rbf(
    points: &[Composition],
    scores: &[f64],
    cfg: &InterpCfg,
) -> Result<Box<dyn Interpolator>, InterpError> {
    Ok(Box::new(RadialBasisInterpolator::new(points, scores, cfg.rbf)?))
}

fn build_linear(
    points: &[Composition],
    scores: &[f64],
    _: &InterpCfg,
) -> Result<Box<dyn Interpolator>, InterpError> {
    Ok(Box::new(ExactLinearInterpolator::new(points, scores)?))
}

fn build_quadratic(
    points: &[Composition],
    scores: &[f64],
    _: &InterpCfg,
) -> Result<Box<dyn Interpolator>, InterpError> {
    Ok(Box::new(ExactQuadraticInterpolator::new(points, scores)?))
}

fn build_piecewise(
    points: &[Composition],
    scores: &[f64],
    _: &InterpCfg,
) -> Result<Box<dyn Interpolator>, InterpError> {
    Ok(Box::new(PiecewiseLinearInterpolator::new(points, scores)?))
}

/// Interpolator families selectable by name. `Default` registers
/// "RBF", "Linear", "Quadratic" and "PiecewiseLinear".
#[derive(Clone)]
pub struct InterpolatorRegistry {
    factories: BTreeMap<String, InterpolatorFactory>,
}

impl Default for InterpolatorRegistry {
    fn default() -> Self {
        let mut reg = Self::empty();
        reg.register("RBF", build_rbf);
        reg.register("Linear", build_linear);
        reg.register("Quadratic", build_quadratic);
        reg.register("PiecewiseLinear", build_piecewise);
        reg
    }
}

impl InterpolatorRegistry {
    pub fn empty() -> Self {
        Self {
            factories: BTreeMap::new(),
        }
    }

    pub fn register(
        &mut self,
        name: impl Into<String>,
        factory: InterpolatorFactory,
    ) -> Option<InterpolatorFactory> {
        self.factories.insert(name.into(), factory)
    }

    pub fn remove(&mut self, name: &str) -> Option<InterpolatorFactory> {
        self.factories.remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.factories.keys().map(String::as_str).collect()
    }

    pub fn build(
        &self,
        name: &str,
        points: &[Composition],
        scores: &[f64],
        cfg: &InterpCfg,
    ) -> Result<Box<dyn Interpolator>, InterpError> {
        let factory = self
            .factories
            .get(name)
            .ok_or_else(|| InterpError::UnknownInterpolator {
                name: name.to_string(),
            })?;
        let interp = factory(points, scores, cfg)?;
        tracing::debug!(interp = name, points = points.len(), "interpolator built");
        Ok(interp)
    }
}

//! Hull-derived designs: candidate points from a boundary polygon, reduced to
//! a D-optimal subset by `select_optimal_subset`.

use nalgebra::DVector;

use super::exchange::select_optimal_subset;
use super::{DesignConfig, DesignError, DesignGenerator, MixturePoint};

/// Vertices, cyclic edge midpoints, face midpoints (4-coordinate points only,
/// every vertex triple) and the vertex centroid, in that order.
pub fn candidate_set(polygon: &[MixturePoint]) -> Vec<MixturePoint> {
    let n = polygon.len();
    if n == 0 {
        return Vec::new();
    }
    let mut points: Vec<MixturePoint> = polygon.to_vec();
    for i in 0..n {
        let a = &polygon[i];
        let b = &polygon[(i + 1) % n];
        points.push((a + b) * 0.5);
    }
    if polygon[0].len() == 4 {
        for i in 0..n {
            for j in i + 1..n {
                for k in j + 1..n {
                    points.push((&polygon[i] + &polygon[j] + &polygon[k]) / 3.0);
                }
            }
        }
    }
    let sum = polygon
        .iter()
        .fold(DVector::zeros(polygon[0].len()), |acc, p| acc + p);
    points.push(sum / n as f64);
    points
}

/// Design over a user-drawn region of the simplex. `DesignConfig::order` is
/// the requested subset size; 0 or more than the candidate count returns the
/// whole candidate set.
#[derive(Clone, Debug)]
pub struct HullDesign {
    name: String,
    polygon: Vec<MixturePoint>,
    candidates: Vec<MixturePoint>,
}

impl HullDesign {
    /// Polygon vertices as fractions.
    pub fn new(polygon: Vec<MixturePoint>) -> Result<Self, DesignError> {
        let Some(first) = polygon.first() else {
            return Err(DesignError::EmptyPolygon);
        };
        let dim = first.len();
        if polygon.iter().any(|p| p.len() != dim) {
            return Err(DesignError::invalid(
                "polygon vertices must share one component count",
            ));
        }
        let candidates = candidate_set(&polygon);
        Ok(Self {
            name: "Hull".to_string(),
            polygon,
            candidates,
        })
    }

    /// Polygon vertices as percentages (0–100).
    pub fn from_percent(polygon: Vec<MixturePoint>) -> Result<Self, DesignError> {
        Self::new(polygon.into_iter().map(|p| p / 100.0).collect())
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn polygon(&self) -> &[MixturePoint] {
        &self.polygon
    }

    pub fn candidates(&self) -> &[MixturePoint] {
        &self.candidates
    }
}

impl DesignGenerator for HullDesign {
    fn name(&self) -> &str {
        &self.name
    }

    fn orders_by_degree(&self) -> bool {
        false
    }

    fn generate(&self, cfg: &DesignConfig) -> Result<Vec<MixturePoint>, DesignError> {
        let n = cfg.order;
        if n == 0 || n > self.candidates.len() {
            return Ok(self.candidates.clone());
        }
        let outcome = select_optimal_subset(&self.candidates, n, &cfg.exchange);
        Ok(outcome
            .indices
            .iter()
            .map(|&i| self.candidates[i].clone())
            .collect())
    }
}

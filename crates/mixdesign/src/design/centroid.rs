//! Simplex-centroid designs.
//!
//! A (k, m) centroid design holds, for every degree d in 1..=m, the equal
//! mixture of each d-subset of the k components, followed by the overall
//! centroid: Σ_{d=1}^{m} C(k, d) + 1 points.

use nalgebra::DVector;

use super::{DesignConfig, DesignError, DesignGenerator, MixturePoint};

#[derive(Clone, Copy, Debug, Default)]
pub struct CentroidDesign;

impl CentroidDesign {
    pub fn points(k: usize, m: usize) -> Result<Vec<MixturePoint>, DesignError> {
        if k < 1 || m < 1 {
            return Err(DesignError::invalid(format!(
                "k and m must be >= 1 (k={k}, m={m})"
            )));
        }
        if m >= k {
            return Err(DesignError::invalid(format!(
                "degree m must be less than the number of components (k={k}, m={m})"
            )));
        }
        Ok(centroid_points(k, m))
    }
}

fn centroid_points(k: usize, m: usize) -> Vec<MixturePoint> {
    let mut points = Vec::new();
    for d in 1..=m {
        let share = 1.0 / d as f64;
        for combo in Combinations::new(k, d) {
            let mut p = DVector::zeros(k);
            for idx in combo {
                p[idx] = share;
            }
            points.push(p);
        }
    }
    points.push(DVector::from_element(k, 1.0 / k as f64));
    points
}

impl DesignGenerator for CentroidDesign {
    fn name(&self) -> &str {
        "Simplex Centroid"
    }

    fn orders_by_degree(&self) -> bool {
        true
    }

    fn generate(&self, cfg: &DesignConfig) -> Result<Vec<MixturePoint>, DesignError> {
        Self::points(cfg.components, cfg.order)
    }
}

/// The (3, 2) centroid design plus the centroids of the three corner
/// sub-triangles {vertex_i, mid(i, i+1), mid(i, i−1)}. Ignores the order.
#[derive(Clone, Copy, Debug, Default)]
pub struct CentroidGrowthDesign;

impl CentroidGrowthDesign {
    pub fn points() -> Vec<MixturePoint> {
        let mut points = centroid_points(3, 2);
        let vertex = |i: usize| {
            let mut v = DVector::zeros(3);
            v[i] = 1.0;
            v
        };
        for i in 0..3 {
            let vi = vertex(i);
            let next = (&vi + vertex((i + 1) % 3)) * 0.5;
            let prev = (&vi + vertex((i + 2) % 3)) * 0.5;
            points.push((vi + next + prev) / 3.0);
        }
        points
    }
}

impl DesignGenerator for CentroidGrowthDesign {
    fn name(&self) -> &str {
        "Simplex Centroid Growth"
    }

    fn orders_by_degree(&self) -> bool {
        false
    }

    fn generate(&self, cfg: &DesignConfig) -> Result<Vec<MixturePoint>, DesignError> {
        if cfg.components != 3 {
            return Err(DesignError::invalid(format!(
                "growth design is only defined for k=3 (got k={})",
                cfg.components
            )));
        }
        Ok(Self::points())
    }
}

/// Lexicographic d-subsets of `0..k`.
pub(crate) struct Combinations {
    k: usize,
    idx: Vec<usize>,
    done: bool,
}

impl Combinations {
    pub(crate) fn new(k: usize, d: usize) -> Self {
        Self {
            k,
            idx: (0..d).collect(),
            done: d > k,
        }
    }
}

impl Iterator for Combinations {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let out = self.idx.clone();
        let d = self.idx.len();
        // Rightmost slot that can still advance.
        let mut i = d;
        while i > 0 {
            i -= 1;
            if self.idx[i] < self.k - d + i {
                self.idx[i] += 1;
                for j in i + 1..d {
                    self.idx[j] = self.idx[j - 1] + 1;
                }
                return Some(out);
            }
        }
        self.done = true;
        Some(out)
    }
}

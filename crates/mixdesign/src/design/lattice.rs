//! Scheffé {k, m} simplex-lattice design.
//!
//! Every mixture whose proportions are multiples of 1/m; C(m+k−1, m) points.
//! Points follow the lexicographic order of the non-decreasing index
//! multisets they are counted from.

use nalgebra::DVector;

use super::{DesignConfig, DesignError, DesignGenerator, MixturePoint};

#[derive(Clone, Copy, Debug, Default)]
pub struct LatticeDesign;

impl LatticeDesign {
    pub fn points(k: usize, m: usize) -> Result<Vec<MixturePoint>, DesignError> {
        if k < 1 || m < 1 {
            return Err(DesignError::invalid(format!(
                "k and m must be >= 1 (k={k}, m={m})"
            )));
        }
        let mut points = Vec::new();
        let mut slots = vec![0usize; m];
        loop {
            let mut counts = DVector::<f64>::zeros(k);
            for &s in &slots {
                counts[s] += 1.0;
            }
            points.push(counts / m as f64);

            // Advance the rightmost slot below k−1, reset the tail to it.
            let Some(i) = slots.iter().rposition(|&s| s < k - 1) else {
                break;
            };
            let next = slots[i] + 1;
            for s in &mut slots[i..] {
                *s = next;
            }
        }
        Ok(points)
    }
}

impl DesignGenerator for LatticeDesign {
    fn name(&self) -> &str {
        "Scheffé Network"
    }

    fn orders_by_degree(&self) -> bool {
        true
    }

    fn generate(&self, cfg: &DesignConfig) -> Result<Vec<MixturePoint>, DesignError> {
        Self::points(cfg.components, cfg.order)
    }
}

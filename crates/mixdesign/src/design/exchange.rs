//! D-optimal subset selection by coordinate exchange (Fedorov-style).
//!
//! Model
//! - Criterion: det(XᵗX) where the rows of X are the raw coordinates of the
//!   selected candidates.
//! - Start from a uniform random n-subset drawn from a seeded `StdRng`.
//! - Each pass scans selected positions in order and, for each, the
//!   unselected candidates in ascending index order. The first strictly
//!   improving swap is accepted and the pass ends (first-improvement, not
//!   best-improvement). Swaps producing a singular information matrix are
//!   skipped. Singularity is judged by the Hadamard ratio
//!   det(M) / Π M_ii of M = XᵗX, which lies in [0, 1] and does not change
//!   when a coordinate is rescaled.
//! - Stops after a pass without an accepted swap or after `max_iter` passes.
//!
//! The determinant never decreases during a run; the result is a local
//! optimum that depends on the seed and on candidate order.

use nalgebra::DMatrix;
use rand::rngs::StdRng;
use rand::SeedableRng;

use super::MixturePoint;

/// Exchange search settings.
#[derive(Clone, Copy, Debug)]
pub struct ExchangeCfg {
    /// Hard cap on passes.
    pub max_iter: usize,
    /// Seed of the initial random subset.
    pub seed: u64,
    /// det(M) / Π M_ii at or below this marks a degenerate swap.
    pub eps_det: f64,
}

impl Default for ExchangeCfg {
    fn default() -> Self {
        Self {
            max_iter: 100,
            seed: 0,
            eps_det: 1e-12,
        }
    }
}

/// Result of one exchange run.
#[derive(Clone, Debug, PartialEq)]
pub struct ExchangeOutcome {
    /// Selected candidate indices, in selection-slot order.
    pub indices: Vec<usize>,
    /// det(XᵗX) of the final selection.
    pub det: f64,
    /// Determinant after initialization and after each accepted swap.
    pub det_history: Vec<f64>,
    pub passes: usize,
    /// Tentative swaps skipped because the information matrix was singular.
    pub skipped_degenerate: usize,
}

/// det(XᵗX) for the candidates at `indices`. All candidates share one dimension.
pub fn information_det(candidates: &[MixturePoint], indices: &[usize]) -> f64 {
    information_matrix(candidates, indices).determinant()
}

fn information_matrix(candidates: &[MixturePoint], indices: &[usize]) -> DMatrix<f64> {
    let dim = candidates.first().map_or(0, |c| c.len());
    let x = DMatrix::from_fn(indices.len(), dim, |r, c| candidates[indices[r]][c]);
    x.transpose() * &x
}

/// det(M) together with det(M) / Π M_ii; the ratio is 0 when a diagonal
/// entry vanishes or anything is non-finite.
fn det_and_ratio(m: &DMatrix<f64>) -> (f64, f64) {
    let det = m.determinant();
    let diag: f64 = m.diagonal().iter().product();
    if !(det.is_finite() && diag.is_finite() && diag > 0.0) {
        return (det, 0.0);
    }
    (det, det / diag)
}

/// Select `n` of `candidates` maximizing det(XᵗX). If `n >= candidates.len()`
/// every index is returned in order without searching.
pub fn select_optimal_subset(
    candidates: &[MixturePoint],
    n: usize,
    cfg: &ExchangeCfg,
) -> ExchangeOutcome {
    let total = candidates.len();
    if n >= total {
        let indices: Vec<usize> = (0..total).collect();
        let det = information_det(candidates, &indices);
        return ExchangeOutcome {
            indices,
            det,
            det_history: vec![det],
            passes: 0,
            skipped_degenerate: 0,
        };
    }

    let mut rng = StdRng::seed_from_u64(cfg.seed);
    let mut current = rand::seq::index::sample(&mut rng, total, n).into_vec();
    let mut current_det = information_det(candidates, &current);
    let mut det_history = vec![current_det];
    let mut passes = 0;
    let mut skipped_degenerate = 0;

    let mut improved = true;
    while improved && passes < cfg.max_iter {
        improved = false;
        passes += 1;
        'scan: for i in 0..n {
            for j in 0..total {
                if current.contains(&j) {
                    continue;
                }
                let mut trial = current.clone();
                trial[i] = j;
                let (det, ratio) = det_and_ratio(&information_matrix(candidates, &trial));
                if ratio <= cfg.eps_det {
                    skipped_degenerate += 1;
                    tracing::trace!(slot = i, candidate = j, "degenerate swap skipped");
                    continue;
                }
                if det > current_det {
                    tracing::trace!(slot = i, candidate = j, det, "swap accepted");
                    current = trial;
                    current_det = det;
                    det_history.push(det);
                    improved = true;
                    break 'scan;
                }
            }
        }
    }

    tracing::debug!(
        candidates = total,
        n,
        passes,
        det = current_det,
        skipped_degenerate,
        "exchange search finished"
    );
    ExchangeOutcome {
        indices: current,
        det: current_det,
        det_history,
        passes,
        skipped_degenerate,
    }
}

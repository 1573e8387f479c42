//! Scored point table: the caller-owned session collection.
//!
//! Rows are `(Composition, score)` pairs in insertion order; the row index is
//! the only identity. Points enter as fractions or percentages and leave as
//! percentage records for export (`percent_rows`, `HEADER`).

use std::fmt;

use crate::design::MixturePoint;
use crate::simplex::{from_percent, mixture_to_composition, to_percent, Composition, SimplexCfg};

/// Column names of a percent record.
pub const HEADER: [&str; 4] = ["Comp1", "Comp2", "Comp3", "Score"];

#[derive(Debug, Clone, PartialEq)]
pub enum TableError {
    /// Components do not sum to 1 within tolerance.
    NotOnSimplex { sum: f64 },
    NegativeComponent { value: f64 },
    RowOutOfRange { row: usize, len: usize },
    /// Design point with other than three components.
    NotThreeComponents { got: usize },
}

impl fmt::Display for TableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotOnSimplex { sum } => write!(f, "components sum to {sum}, expected 1"),
            Self::NegativeComponent { value } => write!(f, "negative component {value}"),
            Self::RowOutOfRange { row, len } => write!(f, "row {row} out of range (len {len})"),
            Self::NotThreeComponents { got } => {
                write!(f, "point has {got} components, expected 3")
            }
        }
    }
}

impl std::error::Error for TableError {}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredPoint {
    pub point: Composition,
    pub score: f64,
}

#[derive(Debug, Clone, Default)]
pub struct PointTable {
    rows: Vec<ScoredPoint>,
    cfg: SimplexCfg,
}

impl PointTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cfg(cfg: SimplexCfg) -> Self {
        Self {
            rows: Vec::new(),
            cfg,
        }
    }

    /// Every design point as a row with placeholder score 0.
    pub fn from_design(points: &[MixturePoint]) -> Result<Self, TableError> {
        let mut table = Self::new();
        for v in points {
            let p = mixture_to_composition(v)
                .ok_or(TableError::NotThreeComponents { got: v.len() })?;
            table.push(p, 0.0)?;
        }
        Ok(table)
    }

    fn validate(&self, p: &Composition) -> Result<(), TableError> {
        if let Some(&value) = p.iter().find(|&&x| x < -self.cfg.eps_out) {
            return Err(TableError::NegativeComponent { value });
        }
        let sum = p.sum();
        if (sum - 1.0).abs() > self.cfg.eps_sum {
            return Err(TableError::NotOnSimplex { sum });
        }
        Ok(())
    }

    /// Append a row; returns its index.
    pub fn push(&mut self, point: Composition, score: f64) -> Result<usize, TableError> {
        self.validate(&point)?;
        self.rows.push(ScoredPoint { point, score });
        Ok(self.rows.len() - 1)
    }

    /// Append a row given in percent.
    pub fn push_percent(&mut self, a: f64, b: f64, c: f64, score: f64) -> Result<usize, TableError> {
        self.push(from_percent(&Composition::new(a, b, c)), score)
    }

    fn check_row(&self, row: usize) -> Result<(), TableError> {
        if row >= self.rows.len() {
            return Err(TableError::RowOutOfRange {
                row,
                len: self.rows.len(),
            });
        }
        Ok(())
    }

    pub fn set_score(&mut self, row: usize, score: f64) -> Result<(), TableError> {
        self.check_row(row)?;
        self.rows[row].score = score;
        Ok(())
    }

    /// Delete a row; later rows shift up by one.
    pub fn remove(&mut self, row: usize) -> Result<ScoredPoint, TableError> {
        self.check_row(row)?;
        Ok(self.rows.remove(row))
    }

    pub fn get(&self, row: usize) -> Option<&ScoredPoint> {
        self.rows.get(row)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[ScoredPoint] {
        &self.rows
    }

    pub fn points(&self) -> Vec<Composition> {
        self.rows.iter().map(|r| r.point).collect()
    }

    pub fn scores(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.score).collect()
    }

    /// `[a%, b%, c%, score]` per row, in row order.
    pub fn percent_rows(&self) -> Vec<[f64; 4]> {
        self.rows
            .iter()
            .map(|r| {
                let p = to_percent(&r.point);
                [p.x, p.y, p.z, r.score]
            })
            .collect()
    }
}

/// Synthetic response `w · p` per point.
pub fn weighted_scores(points: &[Composition], weights: &Composition) -> Vec<f64> {
    points.iter().map(|p| weights.dot(p)).collect()
}

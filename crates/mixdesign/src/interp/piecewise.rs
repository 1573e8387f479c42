//! Piecewise-linear interpolation over a Delaunay triangulation of the
//! planar training points. Undefined (NaN) outside their convex hull.

use std::fmt;

use spade::{DelaunayTriangulation, FloatTriangulation, HasPosition, Point2, Triangulation};

use super::{InterpError, Interpolator, Snapshot};
use crate::simplex::{to_planar, Composition, SimplexCfg};

/// Planar distance under which two training points are the same vertex.
const DEDUP_EPS: f64 = 1e-12;

/// Triangulation vertex: planar position and its score.
#[derive(Clone, Copy, Debug)]
struct Node {
    position: Point2<f64>,
    value: f64,
}

impl HasPosition for Node {
    type Scalar = f64;

    fn position(&self) -> Point2<f64> {
        self.position
    }
}

struct Mesh {
    tri: DelaunayTriangulation<Node>,
}

impl fmt::Debug for Mesh {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mesh")
            .field("vertices", &self.tri.num_vertices())
            .field("triangles", &self.tri.num_inner_faces())
            .finish()
    }
}

impl Mesh {
    /// Duplicate planar points keep the first score.
    fn build(data: &Snapshot, scfg: SimplexCfg) -> Result<Self, InterpError> {
        let mut nodes: Vec<Node> = Vec::with_capacity(data.points.len());
        for (p, &value) in data.points.iter().zip(&data.scores) {
            let q = to_planar(p, scfg);
            let position = Point2::new(q.x, q.y);
            let seen = nodes
                .iter()
                .any(|n| (n.position.x - q.x).hypot(n.position.y - q.y) < DEDUP_EPS);
            if !seen {
                nodes.push(Node { position, value });
            }
        }
        let tri = DelaunayTriangulation::<Node>::bulk_load(nodes).map_err(|e| {
            tracing::debug!(error = %e, "triangulation rejected");
            InterpError::DegenerateTriangulation
        })?;
        if tri.num_inner_faces() == 0 {
            return Err(InterpError::DegenerateTriangulation);
        }
        Ok(Self { tri })
    }

    fn triangle_count(&self) -> usize {
        self.tri.num_inner_faces()
    }

    fn eval(&self, p: &Composition, scfg: SimplexCfg) -> f64 {
        let q = to_planar(p, scfg);
        self.tri
            .barycentric()
            .interpolate(|v| v.data().value, Point2::new(q.x, q.y))
            .unwrap_or(f64::NAN)
    }
}

#[derive(Debug)]
pub struct PiecewiseLinearInterpolator {
    simplex: SimplexCfg,
    data: Snapshot,
    mesh: Mesh,
}

impl PiecewiseLinearInterpolator {
    pub const MIN_POINTS: usize = 3;

    pub fn new(points: &[Composition], scores: &[f64]) -> Result<Self, InterpError> {
        let data = Snapshot::new(points, scores, Self::MIN_POINTS, None)?;
        let simplex = SimplexCfg::default();
        let mesh = Mesh::build(&data, simplex)?;
        Ok(Self {
            simplex,
            data,
            mesh,
        })
    }

    /// Number of triangles in the current mesh.
    pub fn triangle_count(&self) -> usize {
        self.mesh.triangle_count()
    }
}

impl Interpolator for PiecewiseLinearInterpolator {
    fn name(&self) -> &'static str {
        "PiecewiseLinear"
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
        self.mesh = Mesh::build(&data, self.simplex)?;
        self.data = data;
        tracing::debug!(
            interp = "PiecewiseLinear",
            triangles = self.mesh.triangle_count(),
            "refit"
        );
        Ok(())
    }

    fn recompute(&mut self) -> Result<(), InterpError> {
        self.mesh = Mesh::build(&self.data, self.simplex)?;
        Ok(())
    }

    fn evaluate(&self, p: &Composition) -> Result<f64, InterpError> {
        Ok(self.mesh.eval(p, self.simplex))
    }
}

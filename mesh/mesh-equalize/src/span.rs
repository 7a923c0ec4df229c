//! Edge snapshots.

use mesh_types::{Edge, IndexedMesh, Point3};

/// Length at or below which an edge counts as degenerate.
///
/// Separates numerically coincident endpoints from real edges; a degenerate
/// edge has no usable direction.
pub const EPSILON: f64 = 1e-12;

/// One selected edge with its endpoint positions captured at call time.
///
/// `start` is the position of `edge.a`, `end` the position of `edge.b`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeSpan {
    /// The edge's vertex identities.
    pub edge: Edge,
    /// Position of `edge.a`.
    pub start: Point3<f64>,
    /// Position of `edge.b`.
    pub end: Point3<f64>,
}

impl EdgeSpan {
    /// Create a span from an edge and explicit endpoint positions.
    #[inline]
    #[must_use]
    pub const fn new(edge: Edge, start: Point3<f64>, end: Point3<f64>) -> Self {
        Self { edge, start, end }
    }

    /// Capture an edge's current endpoint positions from a mesh.
    ///
    /// Returns `None` if either endpoint index is out of range.
    #[must_use]
    pub fn from_mesh(mesh: &IndexedMesh, edge: Edge) -> Option<Self> {
        let start = mesh.vertices.get(edge.a as usize)?.position;
        let end = mesh.vertices.get(edge.b as usize)?.position;
        Some(Self::new(edge, start, end))
    }

    /// Euclidean distance between the endpoints.
    #[inline]
    #[must_use]
    pub fn length(&self) -> f64 {
        (self.end - self.start).norm()
    }

    /// Whether the endpoints are numerically coincident.
    #[inline]
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.length() <= EPSILON
    }

    /// Point halfway between the endpoints.
    #[inline]
    #[must_use]
    pub fn midpoint(&self) -> Point3<f64> {
        nalgebra::center(&self.start, &self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mesh_types::Vertex;

    fn span(start: [f64; 3], end: [f64; 3]) -> Option<EdgeSpan> {
        Edge::new(0, 1).map(|e| EdgeSpan::new(e, start.into(), end.into()))
    }

    #[test]
    fn length_and_midpoint() {
        let s = span([0.0, 0.0, 0.0], [0.0, 3.0, 4.0]);
        assert!(s.is_some_and(|s| (s.length() - 5.0).abs() < 1e-12));
        assert_eq!(s.map(|s| s.midpoint()), Some(Point3::new(0.0, 1.5, 2.0)));
    }

    #[test]
    fn degeneracy_threshold_is_inclusive() {
        let at = span([0.0, 0.0, 0.0], [1e-12, 0.0, 0.0]);
        assert_eq!(at.map(|s| s.is_degenerate()), Some(true));

        let above = span([0.0, 0.0, 0.0], [1e-9, 0.0, 0.0]);
        assert_eq!(above.map(|s| s.is_degenerate()), Some(false));
    }

    #[test]
    fn capture_from_mesh() {
        let mesh = IndexedMesh::from_edges(
            vec![
                Vertex::from_coords(1.0, 0.0, 0.0),
                Vertex::from_coords(1.0, 2.0, 0.0),
            ],
            &[[0, 1]],
        );

        let captured = Edge::new(1, 0).and_then(|e| EdgeSpan::from_mesh(&mesh, e));
        assert_eq!(captured.map(|s| s.start), Some(Point3::new(1.0, 2.0, 0.0)));
        assert_eq!(captured.map(|s| s.end), Some(Point3::new(1.0, 0.0, 0.0)));

        let missing = Edge::new(0, 5).and_then(|e| EdgeSpan::from_mesh(&mesh, e));
        assert!(missing.is_none());
    }
}

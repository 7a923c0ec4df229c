//! Traits for mesh types.

use crate::Vertex;
use nalgebra::Point3;

/// Trait for types that provide mesh topology information.
///
/// This trait defines the minimal interface the edit operations need,
/// allowing them to work with different mesh representations.
pub trait MeshTopology {
    /// Get the number of vertices.
    fn vertex_count(&self) -> usize;

    /// Get the number of faces (triangles).
    fn face_count(&self) -> usize;

    /// Get the number of unique edges, including loose edges.
    fn edge_count(&self) -> usize;

    /// Check if the mesh has no vertices.
    fn is_empty(&self) -> bool {
        self.vertex_count() == 0
    }

    /// Get a vertex by index.
    ///
    /// Returns `None` if the index is out of bounds.
    fn vertex(&self, index: usize) -> Option<&Vertex>;

    /// Get a vertex position by index.
    fn position(&self, index: usize) -> Option<Point3<f64>> {
        self.vertex(index).map(|v| v.position)
    }
}

//! Indexed triangle mesh with derived edges.

use std::collections::BTreeSet;

use crate::{Edge, EdgeKey, MeshTopology, Vertex};
use nalgebra::Vector3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An indexed triangle mesh.
///
/// Vertices and faces are stored separately, with faces referencing vertices
/// by index. Edges are derived from face boundaries; edges that belong to no
/// face (wire edges) are kept in `loose_edges`.
///
/// # Example
///
/// ```
/// use mesh_types::{IndexedMesh, Vertex, MeshTopology};
///
/// let mut mesh = IndexedMesh::new();
/// mesh.vertices.push(Vertex::from_coords(0.0, 0.0, 0.0));
/// mesh.vertices.push(Vertex::from_coords(1.0, 0.0, 0.0));
/// mesh.vertices.push(Vertex::from_coords(0.0, 1.0, 0.0));
/// mesh.faces.push([0, 1, 2]);
///
/// assert_eq!(mesh.vertex_count(), 3);
/// assert_eq!(mesh.edge_count(), 3);
/// ```
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct IndexedMesh {
    /// Vertex data.
    pub vertices: Vec<Vertex>,

    /// Triangle faces as indices into the vertex array.
    /// Each face is `[v0, v1, v2]` with counter-clockwise winding.
    pub faces: Vec<[u32; 3]>,

    /// Edges not bounded by any face.
    #[cfg_attr(feature = "serde", serde(default))]
    pub loose_edges: Vec<Edge>,
}

impl IndexedMesh {
    /// Create a new empty mesh.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            vertices: Vec::new(),
            faces: Vec::new(),
            loose_edges: Vec::new(),
        }
    }

    /// Create a mesh from vertices and faces.
    #[inline]
    #[must_use]
    pub const fn from_parts(vertices: Vec<Vertex>, faces: Vec<[u32; 3]>) -> Self {
        Self {
            vertices,
            faces,
            loose_edges: Vec::new(),
        }
    }

    /// Create a wire mesh: vertices joined by edges only, no faces.
    ///
    /// Self-loop pairs are dropped.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_types::{IndexedMesh, Vertex, MeshTopology};
    ///
    /// let mesh = IndexedMesh::from_edges(
    ///     vec![
    ///         Vertex::from_coords(0.0, 0.0, 0.0),
    ///         Vertex::from_coords(2.0, 0.0, 0.0),
    ///     ],
    ///     &[[0, 1], [1, 1]],
    /// );
    /// assert_eq!(mesh.edge_count(), 1);
    /// ```
    #[must_use]
    pub fn from_edges(vertices: Vec<Vertex>, edges: &[[u32; 2]]) -> Self {
        let mut mesh = Self {
            vertices,
            ..Self::new()
        };
        for &[a, b] in edges {
            if let Some(edge) = Edge::new(a, b) {
                mesh.add_edge(edge);
            }
        }
        mesh
    }

    /// Add a loose edge unless the mesh already has it.
    ///
    /// Returns `true` if the edge was added.
    pub fn add_edge(&mut self, edge: Edge) -> bool {
        if self.contains_edge(edge) {
            return false;
        }
        self.loose_edges.push(edge);
        true
    }

    /// All unique edges of the mesh, sorted by key.
    ///
    /// Face edges come first in the sense that a loose edge duplicating a
    /// face edge is reported once.
    #[must_use]
    pub fn edges(&self) -> Vec<EdgeKey> {
        let mut keys: BTreeSet<EdgeKey> = BTreeSet::new();
        for &[v0, v1, v2] in &self.faces {
            for (a, b) in [(v0, v1), (v1, v2), (v2, v0)] {
                if a != b {
                    keys.insert(EdgeKey::new(a, b));
                }
            }
        }
        keys.extend(self.loose_edges.iter().map(|e| e.key()));
        keys.into_iter().collect()
    }

    /// Check whether the mesh has an edge between the two endpoints.
    #[must_use]
    pub fn contains_edge(&self, edge: Edge) -> bool {
        let key = edge.key();
        self.loose_edges.iter().any(|e| e.key() == key)
            || self.faces.iter().any(|&[v0, v1, v2]| {
                [(v0, v1), (v1, v2), (v2, v0)]
                    .into_iter()
                    .any(|(a, b)| EdgeKey::new(a, b) == key)
            })
    }

    /// Euclidean length of the edge, or `None` if an endpoint is out of range.
    #[must_use]
    pub fn edge_length(&self, edge: Edge) -> Option<f64> {
        let a = self.vertices.get(edge.a as usize)?;
        let b = self.vertices.get(edge.b as usize)?;
        Some((b.position - a.position).norm())
    }

    /// Recompute area-weighted vertex normals from the faces.
    ///
    /// Vertices with no incident face, or whose incident faces are all
    /// degenerate, get `None`.
    pub fn compute_vertex_normals(&mut self) {
        let mut sums = vec![Vector3::zeros(); self.vertices.len()];

        for &[i0, i1, i2] in &self.faces {
            let (Some(v0), Some(v1), Some(v2)) = (
                self.vertices.get(i0 as usize),
                self.vertices.get(i1 as usize),
                self.vertices.get(i2 as usize),
            ) else {
                continue;
            };
            // Unnormalized cross product weights by twice the face area
            let n = (v1.position - v0.position).cross(&(v2.position - v0.position));
            for i in [i0, i1, i2] {
                sums[i as usize] += n;
            }
        }

        for (vertex, sum) in self.vertices.iter_mut().zip(sums) {
            vertex.normal = sum.try_normalize(f64::EPSILON);
        }
    }
}

impl MeshTopology for IndexedMesh {
    #[inline]
    fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    fn face_count(&self) -> usize {
        self.faces.len()
    }

    fn edge_count(&self) -> usize {
        self.edges().len()
    }

    fn vertex(&self, index: usize) -> Option<&Vertex> {
        self.vertices.get(index)
    }
}

/// Helper function to create a unit cube mesh.
///
/// Creates a cube from (0,0,0) to (1,1,1) with outward-facing normals.
///
/// # Example
///
/// ```
/// use mesh_types::{unit_cube, MeshTopology};
///
/// let cube = unit_cube();
/// assert_eq!(cube.vertex_count(), 8);
/// assert_eq!(cube.face_count(), 12);
/// assert_eq!(cube.edge_count(), 18);
/// ```
#[must_use]
pub fn unit_cube() -> IndexedMesh {
    let vertices = vec![
        Vertex::from_coords(0.0, 0.0, 0.0),
        Vertex::from_coords(1.0, 0.0, 0.0),
        Vertex::from_coords(1.0, 1.0, 0.0),
        Vertex::from_coords(0.0, 1.0, 0.0),
        Vertex::from_coords(0.0, 0.0, 1.0),
        Vertex::from_coords(1.0, 0.0, 1.0),
        Vertex::from_coords(1.0, 1.0, 1.0),
        Vertex::from_coords(0.0, 1.0, 1.0),
    ];

    let faces = vec![
        // Bottom (z=0)
        [0, 2, 1],
        [0, 3, 2],
        // Top (z=1)
        [4, 5, 6],
        [4, 6, 7],
        // Front (y=0)
        [0, 1, 5],
        [0, 5, 4],
        // Back (y=1)
        [3, 7, 6],
        [3, 6, 2],
        // Left (x=0)
        [0, 4, 7],
        [0, 7, 3],
        // Right (x=1)
        [1, 2, 6],
        [1, 6, 5],
    ];

    IndexedMesh::from_parts(vertices, faces)
}

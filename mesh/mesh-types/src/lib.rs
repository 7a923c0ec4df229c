//! Core mesh types for edge editing.
//!
//! This crate provides the foundational types shared by the edit operations:
//!
//! - [`Vertex`] - A point in 3D space with an optional normal
//! - [`Edge`] / [`EdgeKey`] - An unordered pair of vertex indices
//! - [`IndexedMesh`] - A triangle mesh with indexed vertices and derived edges
//!
//! # Units
//!
//! This library is **unit-agnostic**. All coordinates are `f64`.
//!
//! # Coordinate System
//!
//! Uses a **right-handed coordinate system**. Face winding is
//! **counter-clockwise (CCW) when viewed from outside**, so normals point
//! outward by the right-hand rule.
//!
//! # Example
//!
//! ```
//! use mesh_types::{Edge, IndexedMesh, MeshTopology, Vertex};
//!
//! let mut mesh = IndexedMesh::new();
//! mesh.vertices.push(Vertex::from_coords(0.0, 0.0, 0.0));
//! mesh.vertices.push(Vertex::from_coords(1.0, 0.0, 0.0));
//! mesh.vertices.push(Vertex::from_coords(0.5, 1.0, 0.0));
//! mesh.faces.push([0, 1, 2]);
//!
//! assert_eq!(mesh.edge_count(), 3);
//! assert_eq!(Edge::new(1, 0).map(|e| mesh.contains_edge(e)), Some(true));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod edge;
mod mesh;
mod traits;
mod vertex;

pub use edge::{Edge, EdgeKey};
pub use mesh::{unit_cube, IndexedMesh};
pub use traits::MeshTopology;
pub use vertex::Vertex;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector3};

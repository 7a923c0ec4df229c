//! Error types for edge equalization.

use thiserror::Error;

/// Errors that can occur while equalizing edge lengths.
///
/// Only [`EqualizeError::NoValidEdges`] is raised by the core computation;
/// the remaining variants come from the editing session around it.
/// Degenerate edges are never an error, they are skipped and counted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EqualizeError {
    /// The average policy found no edge longer than the degeneracy threshold.
    #[error("All selected edges have zero length")]
    NoValidEdges,

    /// The session is not editing a mesh.
    #[error("Switch to Edit Mode on a mesh object")]
    NotInEditMode,

    /// Nothing is selected.
    #[error("Select at least one edge")]
    EmptySelection,

    /// An edge was referenced that the mesh does not have.
    #[error("Edge {a}-{b} is not part of the mesh")]
    UnknownEdge {
        /// First endpoint.
        a: u32,
        /// Second endpoint.
        b: u32,
    },

    /// A position update names a vertex the mesh does not have.
    #[error("Vertex index {vertex} out of range (mesh has {count} vertices)")]
    VertexOutOfRange {
        /// Offending vertex index.
        vertex: u32,
        /// Number of vertices in the mesh.
        count: usize,
    },
}

impl EqualizeError {
    /// Whether the error comes from a failed session precondition
    /// rather than from the edges themselves.
    #[must_use]
    pub const fn is_precondition(&self) -> bool {
        matches!(self, Self::NotInEditMode | Self::EmptySelection)
    }
}

/// Result type for equalization operations.
pub type EqualizeResult<T> = std::result::Result<T, EqualizeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = EqualizeError::NoValidEdges;
        assert_eq!(format!("{err}"), "All selected edges have zero length");

        let err = EqualizeError::NotInEditMode;
        assert_eq!(format!("{err}"), "Switch to Edit Mode on a mesh object");

        let err = EqualizeError::EmptySelection;
        assert_eq!(format!("{err}"), "Select at least one edge");

        let err = EqualizeError::UnknownEdge { a: 2, b: 7 };
        assert!(format!("{err}").contains("2-7"));

        let err = EqualizeError::VertexOutOfRange { vertex: 9, count: 4 };
        assert!(format!("{err}").contains('9'));
    }

    #[test]
    fn test_precondition_classification() {
        assert!(EqualizeError::NotInEditMode.is_precondition());
        assert!(EqualizeError::EmptySelection.is_precondition());
        assert!(!EqualizeError::NoValidEdges.is_precondition());
    }
}

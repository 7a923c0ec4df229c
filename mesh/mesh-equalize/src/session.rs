//! Interactive editing session and the equalize operator.
//!
//! [`EditSession`] owns the mesh being edited and its edge selection. It
//! checks the preconditions an edit operation needs, hands the core a
//! snapshot of the selection, and commits the resulting vertex updates in
//! one step. [`EqualizeOperator`] runs the whole cycle and turns the outcome
//! into a user-facing report.

use std::fmt;

use hashbrown::HashMap;
use mesh_types::{Edge, EdgeKey, IndexedMesh};
use tracing::{debug, error, info, warn};

use crate::equalize::{apply_updates, equalize_edges};
use crate::error::{EqualizeError, EqualizeResult};
use crate::params::EqualizeParams;
use crate::result::{EdgeLengthStats, EqualizeOutcome, VertexUpdate};
use crate::span::EdgeSpan;

/// A mesh open for editing, with its current edge selection.
///
/// Selected edges keep the endpoint order they were selected with; that
/// order decides which endpoint stays put when midpoints are not preserved.
#[derive(Debug, Clone, Default)]
pub struct EditSession {
    mesh: IndexedMesh,
    edit_mode: bool,
    selected: HashMap<EdgeKey, Edge>,
}

impl EditSession {
    /// Open a session on a mesh, in object mode with nothing selected.
    #[must_use]
    pub fn new(mesh: IndexedMesh) -> Self {
        Self {
            mesh,
            edit_mode: false,
            selected: HashMap::new(),
        }
    }

    /// Open a session already in edit mode.
    #[must_use]
    pub fn editing(mesh: IndexedMesh) -> Self {
        Self {
            edit_mode: true,
            ..Self::new(mesh)
        }
    }

    /// The mesh being edited.
    #[must_use]
    pub const fn mesh(&self) -> &IndexedMesh {
        &self.mesh
    }

    /// Close the session and take back the mesh.
    #[must_use]
    pub fn into_mesh(self) -> IndexedMesh {
        self.mesh
    }

    /// Whether the mesh is in edit mode.
    #[must_use]
    pub const fn is_editing(&self) -> bool {
        self.edit_mode
    }

    /// Switch to edit mode.
    pub fn enter_edit_mode(&mut self) {
        self.edit_mode = true;
    }

    /// Leave edit mode. The selection is kept.
    pub fn exit_edit_mode(&mut self) {
        self.edit_mode = false;
    }

    /// Select an edge of the mesh.
    ///
    /// Re-selecting an edge replaces its stored endpoint order.
    ///
    /// # Errors
    ///
    /// Returns [`EqualizeError::UnknownEdge`] if the mesh has no such edge.
    pub fn select_edge(&mut self, edge: Edge) -> EqualizeResult<()> {
        if !self.mesh.contains_edge(edge) {
            return Err(EqualizeError::UnknownEdge {
                a: edge.a,
                b: edge.b,
            });
        }
        self.selected.insert(edge.key(), edge);
        Ok(())
    }

    /// Select an edge by its endpoint indices.
    ///
    /// # Errors
    ///
    /// Returns [`EqualizeError::UnknownEdge`] if the indices are equal or the
    /// mesh has no such edge.
    pub fn select(&mut self, a: u32, b: u32) -> EqualizeResult<()> {
        let edge = Edge::new(a, b).ok_or(EqualizeError::UnknownEdge { a, b })?;
        self.select_edge(edge)
    }

    /// Remove an edge from the selection. Returns `true` if it was selected.
    pub fn deselect_edge(&mut self, edge: Edge) -> bool {
        self.selected.remove(&edge.key()).is_some()
    }

    /// Select every edge of the mesh.
    pub fn select_all_edges(&mut self) {
        for key in self.mesh.edges() {
            if let Some(edge) = key.edge() {
                self.selected.entry(key).or_insert(edge);
            }
        }
    }

    /// Clear the selection.
    pub fn clear_selection(&mut self) {
        self.selected.clear();
    }

    /// Whether an edge is selected, in either endpoint order.
    #[must_use]
    pub fn is_selected(&self, edge: Edge) -> bool {
        self.selected.contains_key(&edge.key())
    }

    /// Selected edges, sorted by key.
    #[must_use]
    pub fn selected_edges(&self) -> Vec<Edge> {
        let mut keys: Vec<&EdgeKey> = self.selected.keys().collect();
        keys.sort_unstable();
        keys.into_iter().map(|k| self.selected[k]).collect()
    }

    /// Check that the session can run an edge operation.
    ///
    /// # Errors
    ///
    /// Returns [`EqualizeError::NotInEditMode`] outside edit mode and
    /// [`EqualizeError::EmptySelection`] when no edge is selected.
    pub fn ensure_editable(&self) -> EqualizeResult<()> {
        if !self.edit_mode {
            return Err(EqualizeError::NotInEditMode);
        }
        if self.selected.is_empty() {
            return Err(EqualizeError::EmptySelection);
        }
        Ok(())
    }

    /// Capture the selected edges and their current endpoint positions.
    ///
    /// # Errors
    ///
    /// Returns [`EqualizeError::UnknownEdge`] if a selected edge no longer
    /// resolves against the vertex array.
    pub fn snapshot(&self) -> EqualizeResult<Vec<EdgeSpan>> {
        self.selected_edges()
            .into_iter()
            .map(|edge| {
                EdgeSpan::from_mesh(&self.mesh, edge).ok_or(EqualizeError::UnknownEdge {
                    a: edge.a,
                    b: edge.b,
                })
            })
            .collect()
    }

    /// Write vertex updates into the mesh and refresh vertex normals.
    ///
    /// Either every update is applied or none is.
    ///
    /// # Errors
    ///
    /// Returns [`EqualizeError::VertexOutOfRange`] if any update names a
    /// vertex the mesh does not have.
    pub fn commit(&mut self, updates: &[VertexUpdate]) -> EqualizeResult<usize> {
        let written = apply_updates(&mut self.mesh, updates)?;
        self.mesh.compute_vertex_normals();
        debug!("Committed {} vertex positions", written);
        Ok(written)
    }
}

/// Severity of an operator report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportLevel {
    /// Operation completed.
    Info,
    /// Operation cancelled for a reason the user can fix.
    Warning,
    /// Operation could not run in the current context.
    Error,
}

/// Whether an operator ran to completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatorStatus {
    /// The mesh was updated.
    Finished,
    /// Nothing was changed.
    Cancelled,
}

/// What an operator run tells the user.
#[derive(Debug, Clone, PartialEq)]
pub struct OperatorReport {
    /// Whether the operation completed.
    pub status: OperatorStatus,
    /// Severity of `message`.
    pub level: ReportLevel,
    /// Human-readable status line.
    pub message: String,
    /// The core outcome, present when the operation finished.
    pub outcome: Option<EqualizeOutcome>,
}

impl OperatorReport {
    fn finished(outcome: EqualizeOutcome) -> Self {
        Self {
            status: OperatorStatus::Finished,
            level: ReportLevel::Info,
            message: outcome.to_string(),
            outcome: Some(outcome),
        }
    }

    fn cancelled(err: &EqualizeError) -> Self {
        let level = match err {
            EqualizeError::EmptySelection | EqualizeError::NoValidEdges => ReportLevel::Warning,
            EqualizeError::NotInEditMode
            | EqualizeError::UnknownEdge { .. }
            | EqualizeError::VertexOutOfRange { .. } => ReportLevel::Error,
        };
        Self {
            status: OperatorStatus::Cancelled,
            level,
            message: err.to_string(),
            outcome: None,
        }
    }

    /// Whether the operation completed.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.status == OperatorStatus::Finished
    }
}

impl fmt::Display for OperatorReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level = match self.level {
            ReportLevel::Info => "INFO",
            ReportLevel::Warning => "WARNING",
            ReportLevel::Error => "ERROR",
        };
        write!(f, "[{level}] {}", self.message)
    }
}

/// Makes all selected edges the same length while keeping their directions.
///
/// # Example
///
/// ```
/// use mesh_equalize::{EditSession, EqualizeOperator, EqualizeParams, OperatorStatus};
/// use mesh_types::{IndexedMesh, Vertex};
///
/// let mesh = IndexedMesh::from_edges(
///     vec![
///         Vertex::from_coords(0.0, 0.0, 0.0),
///         Vertex::from_coords(2.0, 0.0, 0.0),
///         Vertex::from_coords(0.0, 3.0, 0.0),
///     ],
///     &[[0, 1], [0, 2]],
/// );
/// let mut session = EditSession::editing(mesh);
/// session.select_all_edges();
///
/// let operator = EqualizeOperator::new(EqualizeParams::average());
/// let report = operator.execute(&mut session);
///
/// assert_eq!(report.status, OperatorStatus::Finished);
/// assert_eq!(report.message, "Equalized 2 edges to length 2.500000");
/// ```
#[derive(Debug, Clone, Default)]
pub struct EqualizeOperator {
    /// Parameters used on every run.
    pub params: EqualizeParams,
}

impl EqualizeOperator {
    /// Create an operator with the given parameters.
    #[must_use]
    pub const fn new(params: EqualizeParams) -> Self {
        Self { params }
    }

    /// Run the operator on a session.
    ///
    /// Never fails: problems are reported as a cancelled run and the mesh is
    /// left unchanged.
    pub fn execute(&self, session: &mut EditSession) -> OperatorReport {
        let report = match self.run(session) {
            Ok(outcome) => OperatorReport::finished(outcome),
            Err(err) => OperatorReport::cancelled(&err),
        };

        match report.level {
            ReportLevel::Info => info!("{}", report.message),
            ReportLevel::Warning => warn!("{}", report.message),
            ReportLevel::Error => error!("{}", report.message),
        }
        report
    }

    fn run(&self, session: &mut EditSession) -> EqualizeResult<EqualizeOutcome> {
        session.ensure_editable()?;

        let spans = session.snapshot()?;
        debug!("Before: {}", EdgeLengthStats::from_spans(&spans));

        let outcome = equalize_edges(&spans, &self.params)?;
        session.commit(&outcome.updates)?;

        if tracing::enabled!(tracing::Level::DEBUG) {
            let after = session.snapshot()?;
            debug!("After: {}", EdgeLengthStats::from_spans(&after));
        }
        Ok(outcome)
    }
}

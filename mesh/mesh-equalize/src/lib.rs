//! Edge length equalization for indexed meshes.
//!
//! This crate rescales a set of selected edges to one common length while
//! keeping each edge's direction. The target length is either the average
//! of the selected edges or a fixed value, and each edge is scaled either
//! about its midpoint or from its first endpoint.
//!
//! The core ([`equalize_edges`]) works on a snapshot of the selected edges
//! and returns new vertex positions without touching the mesh. The
//! [`EditSession`] and [`EqualizeOperator`] types provide the editing
//! context around it: precondition checks, transactional commit, normal
//! refresh, and user-facing reports.
//!
//! Degenerate edges (length at most [`EPSILON`]) have no direction and are
//! skipped. Topology is never changed.
//!
//! # Examples
//!
//! Equalizing a snapshot directly:
//!
//! ```
//! use mesh_equalize::{equalize_edges, EdgeSpan, EqualizeParams};
//! use mesh_types::{Edge, Point3};
//!
//! let spans: Vec<EdgeSpan> = [
//!     (0, 1, Point3::new(0.0, 0.0, 0.0), Point3::new(2.0, 0.0, 0.0)),
//!     (2, 3, Point3::new(0.0, 1.0, 0.0), Point3::new(0.0, 1.0, 4.0)),
//! ]
//! .into_iter()
//! .filter_map(|(a, b, p, q)| Edge::new(a, b).map(|e| EdgeSpan::new(e, p, q)))
//! .collect();
//!
//! let outcome = equalize_edges(&spans, &EqualizeParams::average())?;
//! assert!((outcome.target_length - 3.0).abs() < 1e-12);
//! assert_eq!(outcome.applied_count, 2);
//! assert_eq!(outcome.updates.len(), 4);
//! # Ok::<(), mesh_equalize::EqualizeError>(())
//! ```
//!
//! Running the operator on an editing session:
//!
//! ```
//! use mesh_equalize::{EditSession, EqualizeOperator, EqualizeParams};
//! use mesh_types::unit_cube;
//!
//! let mut session = EditSession::editing(unit_cube());
//! session.select(0, 1)?;
//! session.select(1, 2)?;
//!
//! let report = EqualizeOperator::new(EqualizeParams::fixed(0.5)).execute(&mut session);
//! assert!(report.is_finished());
//! assert_eq!(report.message, "Equalized 2 edges to length 0.500000");
//! # Ok::<(), mesh_equalize::EqualizeError>(())
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod equalize;
mod error;
mod params;
mod result;
mod session;
mod span;

pub use equalize::{apply_updates, equalize_edges, resolve_target_length};
pub use error::{EqualizeError, EqualizeResult};
pub use params::{EqualizeParams, LengthMode, LengthPolicy, DEFAULT_TARGET_LENGTH};
pub use result::{EdgeLengthStats, EqualizeOutcome, VertexUpdate};
pub use session::{EditSession, EqualizeOperator, OperatorReport, OperatorStatus, ReportLevel};
pub use span::{EdgeSpan, EPSILON};

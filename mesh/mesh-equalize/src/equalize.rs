//! Core edge length equalization.

// Edge counts don't overflow in practice
#![allow(clippy::cast_precision_loss)]

use hashbrown::HashMap;
use mesh_types::{IndexedMesh, Point3};
use tracing::{debug, warn};

use crate::error::{EqualizeError, EqualizeResult};
use crate::params::{EqualizeParams, LengthPolicy};
use crate::result::{EqualizeOutcome, VertexUpdate};
use crate::span::{EdgeSpan, EPSILON};

/// Resolve the length every edge will be rescaled to.
///
/// - `Fixed(v)` yields `max(v, 0)`; a NaN value yields `0`.
/// - `Average` yields the mean length of the spans longer than [`EPSILON`].
///
/// # Errors
///
/// Returns [`EqualizeError::NoValidEdges`] under the average policy when no
/// span is longer than [`EPSILON`].
///
/// # Examples
///
/// ```
/// use mesh_equalize::{resolve_target_length, EdgeSpan, LengthPolicy};
/// use mesh_types::{Edge, Point3};
///
/// let spans: Vec<EdgeSpan> = [(2.0, 0, 1), (4.0, 2, 3), (0.0, 4, 5)]
///     .into_iter()
///     .filter_map(|(len, a, b)| {
///         Edge::new(a, b).map(|e| EdgeSpan::new(e, Point3::origin(), Point3::new(len, 0.0, 0.0)))
///     })
///     .collect();
///
/// let target = resolve_target_length(&spans, LengthPolicy::Average)?;
/// assert!((target - 3.0).abs() < 1e-12);
/// # Ok::<(), mesh_equalize::EqualizeError>(())
/// ```
pub fn resolve_target_length(spans: &[EdgeSpan], policy: LengthPolicy) -> EqualizeResult<f64> {
    match policy {
        LengthPolicy::Fixed(length) => Ok(length.max(0.0)),
        LengthPolicy::Average => {
            let (total, count) = spans
                .iter()
                .map(EdgeSpan::length)
                .filter(|&length| length > EPSILON)
                .fold((0.0, 0_usize), |(total, count), length| {
                    (total + length, count + 1)
                });

            if count == 0 {
                warn!("All {} selected edges are degenerate", spans.len());
                return Err(EqualizeError::NoValidEdges);
            }
            Ok(total / count as f64)
        }
    }
}

/// Rescale every edge to a common length, keeping its direction.
///
/// Works on a snapshot: the spans are never modified and the mesh is not
/// touched. The returned outcome lists the new vertex positions.
///
/// Per span with length `L`:
/// - `L <= EPSILON`: skipped and counted in `skipped_degenerate`.
/// - midpoint preserved: both endpoints move symmetrically about the midpoint.
/// - otherwise: the first endpoint stays, the second moves along the edge.
///
/// When spans share a vertex, the position computed by the last span in
/// slice order wins. Every span is computed from its own captured positions,
/// never from a position produced by an earlier span.
///
/// # Errors
///
/// Returns [`EqualizeError::NoValidEdges`] if the average policy is used and
/// every span is degenerate. Nothing is produced in that case.
///
/// # Examples
///
/// ```
/// use mesh_equalize::{equalize_edges, EdgeSpan, EqualizeParams};
/// use mesh_types::{Edge, Point3};
///
/// let span = Edge::new(0, 1)
///     .map(|e| EdgeSpan::new(e, Point3::new(-1.0, 0.0, 0.0), Point3::new(1.0, 0.0, 0.0)));
/// let spans: Vec<EdgeSpan> = span.into_iter().collect();
///
/// let outcome = equalize_edges(&spans, &EqualizeParams::fixed(1.0))?;
///
/// assert_eq!(outcome.applied_count, 1);
/// assert_eq!(outcome.updates[0].position, Point3::new(-0.5, 0.0, 0.0));
/// assert_eq!(outcome.updates[1].position, Point3::new(0.5, 0.0, 0.0));
/// # Ok::<(), mesh_equalize::EqualizeError>(())
/// ```
pub fn equalize_edges(spans: &[EdgeSpan], params: &EqualizeParams) -> EqualizeResult<EqualizeOutcome> {
    let target = resolve_target_length(spans, params.policy())?;

    debug!(
        "Equalizing {} edges to length {:.6} (preserve midpoint: {})",
        spans.len(),
        target,
        params.preserve_midpoint
    );

    let mut updates = UpdateList::with_capacity(spans.len() * 2);
    let mut applied_count = 0;
    let mut skipped_degenerate = 0;

    for span in spans {
        let length = span.length();
        if length <= EPSILON {
            skipped_degenerate += 1;
            continue;
        }
        let direction = (span.end - span.start) / length;

        if params.preserve_midpoint {
            let mid = span.midpoint();
            let half = direction * (target * 0.5);
            updates.set(span.edge.a, mid - half);
            updates.set(span.edge.b, mid + half);
        } else {
            updates.set(span.edge.b, span.start + direction * target);
        }

        applied_count += 1;
    }

    debug!(
        "Applied {} edges, skipped {} degenerate, {} vertices moved",
        applied_count,
        skipped_degenerate,
        updates.len()
    );

    Ok(EqualizeOutcome {
        applied_count,
        target_length: target,
        skipped_degenerate,
        updates: updates.into_vec(),
    })
}

/// Write a set of vertex updates into a mesh.
///
/// All indices are checked before anything is written, so a failed call
/// leaves the mesh unchanged. Derived data such as normals is not refreshed.
///
/// # Errors
///
/// Returns [`EqualizeError::VertexOutOfRange`] for the first update whose
/// vertex index is past the end of the vertex array.
pub fn apply_updates(mesh: &mut IndexedMesh, updates: &[VertexUpdate]) -> EqualizeResult<usize> {
    let count = mesh.vertices.len();
    if let Some(bad) = updates.iter().find(|u| u.vertex as usize >= count) {
        return Err(EqualizeError::VertexOutOfRange {
            vertex: bad.vertex,
            count,
        });
    }

    for update in updates {
        mesh.vertices[update.vertex as usize].position = update.position;
    }
    Ok(updates.len())
}

/// Insertion-ordered vertex updates where a later write replaces an earlier one.
struct UpdateList {
    slots: HashMap<u32, usize>,
    updates: Vec<VertexUpdate>,
}

impl UpdateList {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: HashMap::with_capacity(capacity),
            updates: Vec::with_capacity(capacity),
        }
    }

    fn set(&mut self, vertex: u32, position: Point3<f64>) {
        if let Some(&slot) = self.slots.get(&vertex) {
            self.updates[slot].position = position;
        } else {
            self.slots.insert(vertex, self.updates.len());
            self.updates.push(VertexUpdate { vertex, position });
        }
    }

    fn len(&self) -> usize {
        self.updates.len()
    }

    fn into_vec(self) -> Vec<VertexUpdate> {
        self.updates
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use mesh_types::{Edge, Vertex};

    fn span(a: u32, b: u32, start: [f64; 3], end: [f64; 3]) -> EdgeSpan {
        EdgeSpan::new(Edge::new(a, b).unwrap(), start.into(), end.into())
    }

    fn position(outcome: &EqualizeOutcome, vertex: u32) -> Option<Point3<f64>> {
        outcome
            .updates
            .iter()
            .find(|u| u.vertex == vertex)
            .map(|u| u.position)
    }

    #[test]
    fn test_fixed_target_is_clamped() {
        let spans = [span(0, 1, [0.0; 3], [1.0, 0.0, 0.0])];
        assert_eq!(resolve_target_length(&spans, LengthPolicy::Fixed(-3.0)).unwrap(), 0.0);
        assert_eq!(resolve_target_length(&spans, LengthPolicy::Fixed(f64::NAN)).unwrap(), 0.0);
        assert_eq!(resolve_target_length(&spans, LengthPolicy::Fixed(1.5)).unwrap(), 1.5);
    }

    #[test]
    fn test_average_excludes_degenerate() {
        let spans = [
            span(0, 1, [0.0; 3], [2.0, 0.0, 0.0]),
            span(2, 3, [0.0; 3], [0.0, 4.0, 0.0]),
            span(4, 5, [1.0; 3], [1.0; 3]),
        ];
        let target = resolve_target_length(&spans, LengthPolicy::Average).unwrap();
        assert_relative_eq!(target, 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_all_degenerate_average_fails() {
        let spans = [
            span(0, 1, [0.0; 3], [0.0; 3]),
            span(2, 3, [5.0; 3], [5.0, 5.0, 5.0 + 1e-13]),
        ];
        let result = equalize_edges(&spans, &EqualizeParams::average());
        assert_eq!(result, Err(EqualizeError::NoValidEdges));
    }

    #[test]
    fn test_all_degenerate_fixed_is_not_an_error() {
        let spans = [span(0, 1, [0.0; 3], [0.0; 3])];
        let outcome = equalize_edges(&spans, &EqualizeParams::fixed(1.0)).unwrap();
        assert_eq!(outcome.applied_count, 0);
        assert_eq!(outcome.skipped_degenerate, 1);
        assert!(outcome.updates.is_empty());
        assert!(!outcome.was_applied());
    }

    #[test]
    fn test_empty_input() {
        let outcome = equalize_edges(&[], &EqualizeParams::fixed(1.0)).unwrap();
        assert_eq!(outcome.applied_count, 0);
        assert_eq!(
            equalize_edges(&[], &EqualizeParams::average()),
            Err(EqualizeError::NoValidEdges)
        );
    }

    #[test]
    fn test_preserve_midpoint() {
        let spans = [span(0, 1, [1.0, 1.0, 1.0], [1.0, 1.0, 5.0])];
        let outcome = equalize_edges(&spans, &EqualizeParams::fixed(2.0)).unwrap();

        let p0 = position(&outcome, 0).unwrap();
        let p1 = position(&outcome, 1).unwrap();
        assert_relative_eq!(p0, Point3::new(1.0, 1.0, 2.0), epsilon = 1e-12);
        assert_relative_eq!(p1, Point3::new(1.0, 1.0, 4.0), epsilon = 1e-12);
        assert_relative_eq!(nalgebra::center(&p0, &p1), spans[0].midpoint(), epsilon = 1e-12);
    }

    #[test]
    fn test_anchor_first_endpoint() {
        let spans = [span(3, 7, [1.0, 0.0, 0.0], [1.0, 3.0, 4.0])];
        let params = EqualizeParams::fixed(10.0).with_preserve_midpoint(false);
        let outcome = equalize_edges(&spans, &params).unwrap();

        assert!(position(&outcome, 3).is_none());
        let p = position(&outcome, 7).unwrap();
        assert_relative_eq!(p, Point3::new(1.0, 6.0, 8.0), epsilon = 1e-12);
    }

    #[test]
    fn test_degenerate_skipped_among_valid() {
        let spans = [
            span(0, 1, [0.0; 3], [2.0, 0.0, 0.0]),
            span(2, 3, [4.0; 3], [4.0; 3]),
        ];
        let outcome = equalize_edges(&spans, &EqualizeParams::fixed(1.0)).unwrap();
        assert_eq!(outcome.applied_count, 1);
        assert_eq!(outcome.skipped_degenerate, 1);
        assert!(position(&outcome, 2).is_none());
        assert!(position(&outcome, 3).is_none());
    }

    #[test]
    fn test_zero_target_collapses_to_midpoint() {
        let spans = [span(0, 1, [0.0, 0.0, 0.0], [2.0, 2.0, 0.0])];
        let outcome = equalize_edges(&spans, &EqualizeParams::fixed(0.0)).unwrap();
        let mid = Point3::new(1.0, 1.0, 0.0);
        assert_relative_eq!(position(&outcome, 0).unwrap(), mid, epsilon = 1e-12);
        assert_relative_eq!(position(&outcome, 1).unwrap(), mid, epsilon = 1e-12);
    }

    #[test]
    fn test_shared_vertex_last_span_wins() {
        // Vertex 1 is the end of the first span and the start of the second
        let spans = [
            span(0, 1, [0.0, 0.0, 0.0], [2.0, 0.0, 0.0]),
            span(1, 2, [2.0, 0.0, 0.0], [2.0, 4.0, 0.0]),
        ];
        let outcome = equalize_edges(&spans, &EqualizeParams::fixed(1.0)).unwrap();

        assert_eq!(outcome.moved_vertices(), 3);
        let order: Vec<u32> = outcome.updates.iter().map(|u| u.vertex).collect();
        assert_eq!(order, vec![0, 1, 2]);
        assert_relative_eq!(
            position(&outcome, 1).unwrap(),
            Point3::new(2.0, 1.5, 0.0),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_shared_anchor_scenario() {
        let spans = [
            span(0, 1, [0.0, 0.0, 0.0], [2.0, 0.0, 0.0]),
            span(0, 2, [0.0, 0.0, 0.0], [0.0, 3.0, 0.0]),
        ];
        let params = EqualizeParams::average().with_preserve_midpoint(false);
        let outcome = equalize_edges(&spans, &params).unwrap();

        assert_relative_eq!(outcome.target_length, 2.5, epsilon = 1e-12);
        assert!(position(&outcome, 0).is_none());
        assert_relative_eq!(position(&outcome, 1).unwrap(), Point3::new(2.5, 0.0, 0.0), epsilon = 1e-12);
        assert_relative_eq!(position(&outcome, 2).unwrap(), Point3::new(0.0, 2.5, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn test_apply_updates() {
        let mut mesh = IndexedMesh::from_edges(
            vec![Vertex::from_coords(0.0, 0.0, 0.0), Vertex::from_coords(1.0, 0.0, 0.0)],
            &[[0, 1]],
        );
        let updates = [VertexUpdate {
            vertex: 1,
            position: Point3::new(3.0, 0.0, 0.0),
        }];
        assert_eq!(apply_updates(&mut mesh, &updates).unwrap(), 1);
        assert_eq!(mesh.vertices[1].position, Point3::new(3.0, 0.0, 0.0));
    }

    #[test]
    fn test_apply_updates_is_all_or_nothing() {
        let mut mesh = IndexedMesh::from_edges(
            vec![Vertex::from_coords(0.0, 0.0, 0.0), Vertex::from_coords(1.0, 0.0, 0.0)],
            &[[0, 1]],
        );
        let updates = [
            VertexUpdate {
                vertex: 0,
                position: Point3::new(9.0, 9.0, 9.0),
            },
            VertexUpdate {
                vertex: 5,
                position: Point3::origin(),
            },
        ];
        assert_eq!(
            apply_updates(&mut mesh, &updates),
            Err(EqualizeError::VertexOutOfRange { vertex: 5, count: 2 })
        );
        assert_eq!(mesh.vertices[0].position, Point3::origin());
    }
}

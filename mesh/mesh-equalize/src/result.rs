//! Result types for edge equalization.

// Edge counts don't overflow in practice
#![allow(clippy::cast_precision_loss)]

use mesh_types::Point3;

use crate::span::EdgeSpan;

/// A new position for one vertex.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VertexUpdate {
    /// Index of the vertex to move.
    pub vertex: u32,
    /// Position to write.
    pub position: Point3<f64>,
}

/// Outcome of equalizing a set of edges.
///
/// The mesh itself is not touched; `updates` lists at most one position per
/// vertex and is meant to be applied by the caller in one step.
#[derive(Debug, Clone, PartialEq)]
pub struct EqualizeOutcome {
    /// Number of edges rescaled.
    pub applied_count: usize,

    /// Length every rescaled edge now has.
    pub target_length: f64,

    /// Number of zero-length edges left untouched.
    pub skipped_degenerate: usize,

    /// New vertex positions, in the order vertices were first moved.
    pub updates: Vec<VertexUpdate>,
}

impl EqualizeOutcome {
    /// Check if any edge was rescaled.
    #[must_use]
    pub const fn was_applied(&self) -> bool {
        self.applied_count > 0
    }

    /// Number of vertices whose position changes.
    #[must_use]
    pub fn moved_vertices(&self) -> usize {
        self.updates.len()
    }
}

impl std::fmt::Display for EqualizeOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Equalized {} edges to length {:.6}",
            self.applied_count, self.target_length
        )
    }
}

/// Length statistics over a set of edge spans.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EdgeLengthStats {
    /// Shortest non-degenerate edge.
    pub min_length: f64,
    /// Longest edge.
    pub max_length: f64,
    /// Mean of the non-degenerate edges.
    pub avg_length: f64,
    /// Number of edges measured.
    pub edge_count: usize,
    /// Number of degenerate edges among them.
    pub degenerate_count: usize,
}

impl EdgeLengthStats {
    /// Measure a set of spans.
    ///
    /// Degenerate spans are counted but excluded from min and mean.
    #[must_use]
    pub fn from_spans(spans: &[EdgeSpan]) -> Self {
        let mut stats = Self {
            edge_count: spans.len(),
            ..Self::default()
        };
        let mut sum = 0.0;
        let mut valid = 0_usize;
        let mut min = f64::INFINITY;

        for span in spans {
            let length = span.length();
            if span.is_degenerate() {
                stats.degenerate_count += 1;
                continue;
            }
            sum += length;
            valid += 1;
            min = min.min(length);
            stats.max_length = stats.max_length.max(length);
        }

        if valid > 0 {
            stats.min_length = min;
            stats.avg_length = sum / valid as f64;
        }
        stats
    }

    /// Spread between the longest and shortest edge.
    #[must_use]
    pub fn range(&self) -> f64 {
        self.max_length - self.min_length
    }
}

impl std::fmt::Display for EdgeLengthStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} edges ({} degenerate), length {:.6}..{:.6}, mean {:.6}",
            self.edge_count,
            self.degenerate_count,
            self.min_length,
            self.max_length,
            self.avg_length
        )
    }
}

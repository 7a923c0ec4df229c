//! Mesh edges.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An unordered pair of distinct vertex indices.
///
/// The two endpoints always refer to different vertices, although their
/// positions may coincide (a zero-length edge). Endpoint order is kept as
/// given so callers can decide which end is anchored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Edge {
    /// First endpoint.
    pub a: u32,
    /// Second endpoint.
    pub b: u32,
}

impl Edge {
    /// Create an edge between two vertices.
    ///
    /// Returns `None` if both indices are the same vertex.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_types::Edge;
    ///
    /// assert!(Edge::new(0, 1).is_some());
    /// assert!(Edge::new(3, 3).is_none());
    /// ```
    #[inline]
    #[must_use]
    pub const fn new(a: u32, b: u32) -> Option<Self> {
        if a == b { None } else { Some(Self { a, b }) }
    }

    /// Canonical key, independent of endpoint order.
    #[inline]
    #[must_use]
    pub const fn key(self) -> EdgeKey {
        EdgeKey::new(self.a, self.b)
    }

    /// Whether `vertex` is one of the endpoints.
    #[inline]
    #[must_use]
    pub const fn touches(self, vertex: u32) -> bool {
        self.a == vertex || self.b == vertex
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.a, self.b)
    }
}

/// Order-independent edge identity, stored as `(min, max)`.
///
/// Used for hashing and selection sets: `EdgeKey::new(2, 5)` and
/// `EdgeKey::new(5, 2)` compare equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EdgeKey(u32, u32);

impl EdgeKey {
    /// Build the canonical key for two vertex indices.
    #[inline]
    #[must_use]
    pub const fn new(a: u32, b: u32) -> Self {
        if a <= b { Self(a, b) } else { Self(b, a) }
    }

    /// Smaller vertex index.
    #[inline]
    #[must_use]
    pub const fn min(self) -> u32 {
        self.0
    }

    /// Larger vertex index.
    #[inline]
    #[must_use]
    pub const fn max(self) -> u32 {
        self.1
    }

    /// The edge this key names, oriented from the smaller to the larger index.
    ///
    /// Returns `None` for a self-loop key.
    #[inline]
    #[must_use]
    pub const fn edge(self) -> Option<Edge> {
        Edge::new(self.0, self.1)
    }
}

impl From<Edge> for EdgeKey {
    fn from(edge: Edge) -> Self {
        edge.key()
    }
}

//! Equalization parameters.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default edge length used when the mode is [`LengthMode::Custom`].
pub const DEFAULT_TARGET_LENGTH: f64 = 0.1;

/// How the target length is picked, as exposed to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum LengthMode {
    /// Use the average length of the selected edges.
    #[default]
    Average,
    /// Use [`EqualizeParams::target_length`].
    Custom,
}

/// Resolved rule for the target length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LengthPolicy {
    /// Mean length of the non-degenerate selected edges.
    Average,
    /// A fixed length. Negative values are treated as zero.
    Fixed(f64),
}

/// Parameters for edge length equalization.
///
/// # Example
///
/// ```
/// use mesh_equalize::{EqualizeParams, LengthPolicy};
///
/// let params = EqualizeParams::fixed(0.25).with_preserve_midpoint(false);
/// assert_eq!(params.policy(), LengthPolicy::Fixed(0.25));
/// assert!(!params.preserve_midpoint);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EqualizeParams {
    /// How to pick the target length.
    pub mode: LengthMode,

    /// Edge length to apply when `mode` is [`LengthMode::Custom`].
    /// Ignored in average mode.
    pub target_length: f64,

    /// Move both endpoints around the edge midpoint instead of anchoring
    /// the first endpoint.
    pub preserve_midpoint: bool,
}

impl Default for EqualizeParams {
    fn default() -> Self {
        Self {
            mode: LengthMode::Average,
            target_length: DEFAULT_TARGET_LENGTH,
            preserve_midpoint: true,
        }
    }
}

impl EqualizeParams {
    /// Create new parameters with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parameters that equalize to the average selected length.
    #[must_use]
    pub fn average() -> Self {
        Self::default()
    }

    /// Parameters that equalize to a fixed length.
    #[must_use]
    pub fn fixed(length: f64) -> Self {
        Self {
            mode: LengthMode::Custom,
            target_length: length,
            ..Self::default()
        }
    }

    /// Set the length mode.
    #[must_use]
    pub const fn with_mode(mut self, mode: LengthMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the custom target length.
    #[must_use]
    pub const fn with_target_length(mut self, length: f64) -> Self {
        self.target_length = length;
        self
    }

    /// Set whether to keep edge midpoints in place.
    #[must_use]
    pub const fn with_preserve_midpoint(mut self, preserve: bool) -> Self {
        self.preserve_midpoint = preserve;
        self
    }

    /// Resolve the mode into a length policy.
    #[must_use]
    pub const fn policy(&self) -> LengthPolicy {
        match self.mode {
            LengthMode::Average => LengthPolicy::Average,
            LengthMode::Custom => LengthPolicy::Fixed(self.target_length),
        }
    }
}

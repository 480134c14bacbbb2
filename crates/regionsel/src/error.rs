//! Error types for region construction and pipeline entry points.

use thiserror::Error;

/// Errors raised at construction boundaries.
///
/// Per-element classification never fails; unprojectable or hidden elements
/// simply test `false`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RegionError {
    /// Lasso polygons need at least three vertices.
    #[error("polygon region needs at least 3 vertices, got {count}")]
    TooFewPolygonVertices { count: usize },

    /// A region parameter is NaN or infinite.
    #[error("non-finite coordinate in {what}")]
    NonFiniteCoordinate { what: &'static str },

    /// Rectangle given with `min > max` on one axis.
    #[error("inverted rectangle bounds on {axis}: min {min} > max {max}")]
    InvertedBounds { axis: char, min: f32, max: f32 },

    /// Circle radius is negative or not finite.
    #[error("invalid circle radius: {0} (must be finite and >= 0)")]
    InvalidRadius(f32),

    /// A mesh source returned an attribute array of the wrong length.
    #[error("{what}: expected {expected} entries, got {actual}")]
    MaskLengthMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Mesh topology refers to missing vertices or has degenerate faces.
    #[error("invalid topology: {reason}")]
    InvalidTopology { reason: String },
}

impl RegionError {
    pub(crate) fn topology(reason: impl Into<String>) -> Self {
        Self::InvalidTopology {
            reason: reason.into(),
        }
    }
}

/// Result alias for region operations.
pub type RegionResult<T> = std::result::Result<T, RegionError>;

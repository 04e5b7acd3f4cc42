//! Error types for physics state construction.

use thiserror::Error;

use crate::core_types::{Dim, Units};
use crate::grid::GridExtent;

/// Errors raised while building or sizing a physics state.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StateError {
    /// A supplied key is not one of the declared fields.
    #[error("{0} is provided, but not part of the physics state")]
    UnknownField(String),

    /// A declared field has no entry in the supplied mapping.
    #[error("{0} is not included in the provided mapping")]
    MissingField(String),

    /// A supplied value is not a quantity.
    #[error("{field} is not a Quantity, but instead a {actual}")]
    TypeMismatch { field: String, actual: &'static str },

    /// A quantity carries different units than its field declares.
    #[error("{field} has units '{actual}', expected '{expected}'")]
    UnitsMismatch {
        field: String,
        expected: Units,
        actual: Units,
    },

    /// A quantity spans different dimensions than the state layout.
    #[error("{field} spans dimensions {actual:?}, expected {expected:?}")]
    DimensionMismatch {
        field: String,
        expected: [Dim; 3],
        actual: [Dim; 3],
    },

    /// An array's extent differs from the rest of the state.
    #[error("{field} has shape {actual}, expected {expected}")]
    ShapeMismatch {
        field: String,
        expected: GridExtent,
        actual: GridExtent,
    },

    /// A flat buffer does not cover the grid exactly.
    #[error("buffer of length {len} does not match grid {extent}")]
    BufferLength { len: usize, extent: GridExtent },

    /// Grid configuration is unusable.
    #[error("invalid grid: {0}")]
    InvalidGrid(String),

    /// A unit string is not one the physics state knows.
    #[error("unrecognized units '{0}'")]
    UnrecognizedUnits(String),
}

impl StateError {
    /// Create a shape mismatch error.
    pub fn shape_mismatch(field: impl Into<String>, expected: GridExtent, actual: GridExtent) -> Self {
        Self::ShapeMismatch {
            field: field.into(),
            expected,
            actual,
        }
    }
}

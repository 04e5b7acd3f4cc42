//! 3D field storage
//!
//! Fields are stored as a flat `Vec<f64>` in row-major order with the vertical
//! index varying fastest, matching the (x, y, z) layout of the dycore buffers.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::grid::GridExtent;
use crate::state::StateError;

/// Field data container
///
/// Stores one 3D array over a horizontal-by-horizontal-by-vertical grid.
/// The extent is fixed at construction; only the contents are mutable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldData {
    data: Vec<f64>,
    extent: GridExtent,
}

impl FieldData {
    /// Create a new field with given extent, initialized to zero
    #[must_use]
    pub fn new(extent: GridExtent) -> Self {
        Self::with_value(extent, 0.0)
    }

    /// Create a new field with given extent, initialized to a value
    ///
    /// # Arguments
    ///
    /// * `extent` - Grid extent in points
    /// * `value` - Initial value for all points
    #[must_use]
    pub fn with_value(extent: GridExtent, value: f64) -> Self {
        Self {
            data: vec![value; extent.cell_count()],
            extent,
        }
    }

    /// Wrap an existing row-major buffer
    ///
    /// # Errors
    ///
    /// Returns [`StateError::BufferLength`] if `data` does not hold exactly
    /// one value per grid point.
    pub fn from_vec(extent: GridExtent, data: Vec<f64>) -> Result<Self, StateError> {
        if data.len() != extent.cell_count() {
            return Err(StateError::BufferLength {
                len: data.len(),
                extent,
            });
        }
        Ok(Self { data, extent })
    }

    /// Build a field by evaluating `f(i, j, k)` at every grid point
    #[must_use]
    pub fn from_fn<F>(extent: GridExtent, mut f: F) -> Self
    where
        F: FnMut(usize, usize, usize) -> f64,
    {
        let mut data = Vec::with_capacity(extent.cell_count());
        for i in 0..extent.nx {
            for j in 0..extent.ny {
                for k in 0..extent.nz {
                    data.push(f(i, j, k));
                }
            }
        }
        Self { data, extent }
    }

    /// Grid extent of this field
    #[must_use]
    pub fn extent(&self) -> GridExtent {
        self.extent
    }

    /// Get reference to field data
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Get mutable reference to field data
    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.data
    }

    /// Consume the field and return its flat buffer
    #[must_use]
    pub fn into_vec(self) -> Vec<f64> {
        self.data
    }

    #[inline]
    fn index(&self, i: usize, j: usize, k: usize) -> usize {
        assert!(
            i < self.extent.nx && j < self.extent.ny && k < self.extent.nz,
            "Coordinates out of bounds"
        );
        (i * self.extent.ny + j) * self.extent.nz + k
    }

    /// Get value at grid position
    ///
    /// # Panics
    ///
    /// Panics if coordinates are out of bounds
    #[must_use]
    pub fn get(&self, i: usize, j: usize, k: usize) -> f64 {
        self.data[self.index(i, j, k)]
    }

    /// Set value at grid position
    ///
    /// # Panics
    ///
    /// Panics if coordinates are out of bounds
    pub fn set(&mut self, i: usize, j: usize, k: usize, value: f64) {
        let idx = self.index(i, j, k);
        self.data[idx] = value;
    }

    /// Fill entire field with a value
    pub fn fill(&mut self, value: f64) {
        self.data.par_iter_mut().for_each(|v| *v = value);
    }

    /// Overwrite the contents with another field of the same extent
    ///
    /// # Errors
    ///
    /// Returns [`StateError::ShapeMismatch`] tagged with `field` when the
    /// extents differ; the contents are left untouched.
    pub fn copy_from(&mut self, field: &str, other: &FieldData) -> Result<(), StateError> {
        if other.extent != self.extent {
            return Err(StateError::shape_mismatch(field, self.extent, other.extent));
        }
        self.data.copy_from_slice(&other.data);
        Ok(())
    }

    /// True if no value is NaN or infinite
    #[must_use]
    pub fn all_finite(&self) -> bool {
        self.data.par_iter().all(|v| v.is_finite())
    }
}

//! Grid sizing configuration
//!
//! `GridConfig` describes the compute domain of one subtile plus its halo width.
//! Storage extents derived from it include the halo along horizontal axes.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core_types::Dim;
use crate::state::StateError;

/// Extents of a 3D storage array
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridExtent {
    /// Points along the first horizontal axis
    pub nx: usize,
    /// Points along the second horizontal axis
    pub ny: usize,
    /// Points along the vertical axis
    pub nz: usize,
}

impl GridExtent {
    /// Create an extent from its three axis lengths
    #[must_use]
    pub const fn new(nx: usize, ny: usize, nz: usize) -> Self {
        Self { nx, ny, nz }
    }

    /// Total number of points
    #[must_use]
    pub const fn cell_count(&self) -> usize {
        self.nx * self.ny * self.nz
    }
}

impl fmt::Display for GridExtent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.nx, self.ny, self.nz)
    }
}

/// Configuration for the subtile grid that physics fields are allocated on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Compute-domain cells along the first horizontal axis
    pub nx: usize,
    /// Compute-domain cells along the second horizontal axis
    pub ny: usize,
    /// Vertical layers
    pub nz: usize,
    /// Halo width added on each side of both horizontal axes
    pub n_halo: usize,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            nx: 12,
            ny: 12,
            nz: 79,
            n_halo: 3,
        }
    }
}

impl GridConfig {
    /// Check that every compute-domain extent is non-zero
    ///
    /// # Errors
    ///
    /// Returns [`StateError::InvalidGrid`] naming the first zero extent.
    pub fn validate(&self) -> Result<(), StateError> {
        for (name, value) in [("nx", self.nx), ("ny", self.ny), ("nz", self.nz)] {
            if value == 0 {
                return Err(StateError::InvalidGrid(format!("{name} must be positive")));
            }
        }
        Ok(())
    }

    /// Number of storage points along a single dimension
    #[must_use]
    pub fn dim_len(&self, dim: Dim) -> usize {
        let base = match dim {
            Dim::X | Dim::XInterface => self.nx,
            Dim::Y | Dim::YInterface => self.ny,
            Dim::Z | Dim::ZInterface => self.nz,
        };
        let halo = if dim.is_horizontal() { 2 * self.n_halo } else { 0 };
        let stagger = usize::from(dim.is_interface());
        base + halo + stagger
    }

    /// Storage extent for an array laid out over `dims`
    #[must_use]
    pub fn extent(&self, dims: [Dim; 3]) -> GridExtent {
        GridExtent::new(
            self.dim_len(dims[0]),
            self.dim_len(dims[1]),
            self.dim_len(dims[2]),
        )
    }

    /// Storage extent of a cell-centred physics field
    #[must_use]
    pub fn storage_extent(&self) -> GridExtent {
        self.extent(Dim::CELL_CENTERED)
    }
}

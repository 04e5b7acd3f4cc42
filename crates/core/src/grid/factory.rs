//! Array factories
//!
//! The physics state never sizes its own arrays; it asks an [`ArrayFactory`]
//! for zero-filled quantities over named dimensions. [`QuantityFactory`] is the
//! standard implementation, sized by a [`GridConfig`].

use tracing::debug;

use crate::core_types::{Dim, Units};
use crate::grid::{GridConfig, GridExtent};
use crate::quantity::{FieldData, Quantity};
use crate::state::StateError;

/// Source of zero-initialised quantities
pub trait ArrayFactory {
    /// Allocate a zero-filled quantity over `dims` tagged with `units`
    fn zeros(&self, dims: [Dim; 3], units: Units) -> Quantity;
}

/// Array factory backed by a validated [`GridConfig`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuantityFactory {
    config: GridConfig,
}

impl QuantityFactory {
    /// Create a factory for the given grid
    ///
    /// # Errors
    ///
    /// Returns [`StateError::InvalidGrid`] if the configuration has a zero extent.
    pub fn new(config: GridConfig) -> Result<Self, StateError> {
        config.validate()?;
        debug!(
            "Quantity factory for {}x{}x{} grid (halo {})",
            config.nx, config.ny, config.nz, config.n_halo
        );
        Ok(Self { config })
    }

    /// Grid configuration this factory sizes arrays from
    #[must_use]
    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    /// Storage extent of a cell-centred array
    #[must_use]
    pub fn storage_extent(&self) -> GridExtent {
        self.config.storage_extent()
    }
}

impl ArrayFactory for QuantityFactory {
    fn zeros(&self, dims: [Dim; 3], units: Units) -> Quantity {
        Quantity::new(FieldData::new(self.config.extent(dims)), dims, units)
    }
}

//! Arrays with metadata
//!
//! A [`Quantity`] couples a [`FieldData`] buffer with the dimensions it spans
//! and the units it is expressed in. Callers that hand data to the physics
//! state either wrap it as a quantity or pass the bare buffer; [`FieldValue`]
//! keeps the two apart so the quantity constructor can reject bare buffers.

mod fields;

pub use fields::FieldData;

use crate::core_types::{Dim, Units};
use crate::grid::GridExtent;

/// Field storage plus dimension and unit metadata
#[derive(Debug, Clone, PartialEq)]
pub struct Quantity {
    data: FieldData,
    dims: [Dim; 3],
    units: Units,
}

impl Quantity {
    /// Wrap `data` as a quantity over `dims` expressed in `units`
    #[must_use]
    pub fn new(data: FieldData, dims: [Dim; 3], units: Units) -> Self {
        Self { data, dims, units }
    }

    /// Underlying storage
    #[must_use]
    pub fn data(&self) -> &FieldData {
        &self.data
    }

    /// Mutable access to the underlying storage
    pub fn data_mut(&mut self) -> &mut FieldData {
        &mut self.data
    }

    /// Drop the metadata and keep the storage
    #[must_use]
    pub fn into_data(self) -> FieldData {
        self.data
    }

    /// Dimensions spanned by the storage, outermost first
    #[must_use]
    pub fn dims(&self) -> [Dim; 3] {
        self.dims
    }

    #[must_use]
    pub fn units(&self) -> Units {
        self.units
    }

    #[must_use]
    pub fn extent(&self) -> GridExtent {
        self.data.extent()
    }
}

/// A value supplied for one field when building a state from quantities
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Storage with metadata
    Quantity(Quantity),
    /// Bare storage without metadata
    Array(FieldData),
}

impl FieldValue {
    /// Human-readable kind, used in type mismatch errors
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            FieldValue::Quantity(_) => "Quantity",
            FieldValue::Array(_) => "FieldData",
        }
    }
}

impl From<Quantity> for FieldValue {
    fn from(quantity: Quantity) -> Self {
        FieldValue::Quantity(quantity)
    }
}

impl From<FieldData> for FieldValue {
    fn from(data: FieldData) -> Self {
        FieldValue::Array(data)
    }
}

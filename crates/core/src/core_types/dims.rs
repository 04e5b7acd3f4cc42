//! Grid dimension kinds
//!
//! Fields are allocated over named dimensions. Cell-centred dimensions span the
//! number of cells along an axis; interface dimensions carry one extra point.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Named grid dimension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dim {
    /// First horizontal axis, cell centres
    X,
    /// Second horizontal axis, cell centres
    Y,
    /// Vertical axis, layer centres
    Z,
    /// First horizontal axis, cell faces
    XInterface,
    /// Second horizontal axis, cell faces
    YInterface,
    /// Vertical axis, layer interfaces
    ZInterface,
}

impl Dim {
    /// Cell-centred horizontal-by-horizontal-by-vertical layout used by every
    /// physics state field
    pub const CELL_CENTERED: [Dim; 3] = [Dim::X, Dim::Y, Dim::Z];

    /// Whether this dimension is horizontal (and therefore carries halo points)
    #[must_use]
    pub const fn is_horizontal(&self) -> bool {
        !matches!(self, Dim::Z | Dim::ZInterface)
    }

    /// Whether this dimension is staggered onto interfaces
    #[must_use]
    pub const fn is_interface(&self) -> bool {
        matches!(self, Dim::XInterface | Dim::YInterface | Dim::ZInterface)
    }
}

impl fmt::Display for Dim {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Dim::X => "x",
            Dim::Y => "y",
            Dim::Z => "z",
            Dim::XInterface => "x_interface",
            Dim::YInterface => "y_interface",
            Dim::ZInterface => "z_interface",
        };
        f.write_str(name)
    }
}

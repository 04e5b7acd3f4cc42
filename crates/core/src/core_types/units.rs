//! Physical unit tags for physics state fields
//!
//! Every field in the physics state is tagged with the unit string the dycore
//! exchanges it under. The strings are fixed by the coupling contract, so the
//! set is closed and represented as an enum rather than free-form text.
//!
//! # Usage
//! ```
//! use physics_state_core::core_types::units::Units;
//!
//! let units: Units = "kg/kg".parse().unwrap();
//! assert_eq!(units, Units::KgPerKg);
//! assert_eq!(Units::Dimensionless.as_str(), "");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::state::StateError;

/// Unit tag attached to a field or quantity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Units {
    /// Mass mixing ratio (kg/kg)
    KgPerKg,
    /// Specific kinetic energy (m**2/s**2)
    SquareMetersPerSecondSquared,
    /// Dimensionless fraction ("")
    Dimensionless,
    /// Absolute temperature (degK)
    Kelvin,
    /// Pressure (Pa)
    Pascal,
    /// Length or geopotential height (m)
    Meters,
    /// Velocity (m/s)
    MetersPerSecond,
    /// Pressure velocity (Pa/s)
    PascalPerSecond,
    /// Scratch storage with no physical meaning ("unknown")
    Unknown,
}

impl Units {
    /// Every unit tag, in declaration order
    pub const ALL: [Units; 9] = [
        Units::KgPerKg,
        Units::SquareMetersPerSecondSquared,
        Units::Dimensionless,
        Units::Kelvin,
        Units::Pascal,
        Units::Meters,
        Units::MetersPerSecond,
        Units::PascalPerSecond,
        Units::Unknown,
    ];

    /// Unit string as exchanged with the dycore
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Units::KgPerKg => "kg/kg",
            Units::SquareMetersPerSecondSquared => "m**2/s**2",
            Units::Dimensionless => "",
            Units::Kelvin => "degK",
            Units::Pascal => "Pa",
            Units::Meters => "m",
            Units::MetersPerSecond => "m/s",
            Units::PascalPerSecond => "Pa/s",
            Units::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Units {
    type Err = StateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Units::ALL
            .into_iter()
            .find(|units| units.as_str() == s)
            .ok_or_else(|| StateError::UnrecognizedUnits(s.to_string()))
    }
}

//! Physics state field table
//!
//! The physics state holds a fixed, closed set of fields. Each field is
//! described by one [`FieldSpec`] row in [`FIELDS`], in declaration order.
//! Construction and validation iterate this table instead of inspecting the
//! state type, so adding a field means adding a [`FieldId`] variant and a row.
//!
//! Fields without the `_t1` suffix mirror the dycore's current state. The
//! `_t1` fields hold the physics-updated state, and the remaining
//! physics-internal fields are diagnostics computed from the dycore inputs.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

use crate::core_types::Units;

/// Number of declared physics state fields
pub const FIELD_COUNT: usize = 32;

/// How physics numerics use a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Intent {
    /// Read-only input or auxiliary storage
    In,
    /// Read and written back by physics
    InOut,
}

/// Identifier of a declared field
///
/// The discriminant is the field's row in [`FIELDS`] and its slot in the
/// state's storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(usize)]
pub enum FieldId {
    Qvapor,
    Qliquid,
    Qice,
    Qrain,
    Qsnow,
    Qgraupel,
    Qo3mr,
    QsgsTke,
    Qcld,
    Pt,
    Delp,
    Delz,
    Ua,
    Va,
    W,
    Omga,
    QvaporT1,
    QliquidT1,
    QiceT1,
    QrainT1,
    QsnowT1,
    QgraupelT1,
    QcldT1,
    PtT1,
    UaT1,
    VaT1,
    Delprsi,
    Phii,
    Phil,
    Dz,
    Wmp,
    Prsi,
}

/// Metadata for one declared field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub id: FieldId,
    /// Attribute key, used in input mappings
    pub key: &'static str,
    /// Standard name used for interchange with the dycore
    pub name: &'static str,
    pub units: Units,
    pub intent: Intent,
    /// Whether the dycore supplies the initial values
    pub from_dycore: bool,
}

const fn spec(
    id: FieldId,
    key: &'static str,
    name: &'static str,
    units: Units,
    intent: Intent,
    from_dycore: bool,
) -> FieldSpec {
    FieldSpec {
        id,
        key,
        name,
        units,
        intent,
        from_dycore,
    }
}

use FieldId as F;
use Intent::{In, InOut};
use Units as U;

/// Every declared field, indexed by `FieldId as usize`
pub static FIELDS: [FieldSpec; FIELD_COUNT] = [
    spec(F::Qvapor, "qvapor", "specific_humidity", U::KgPerKg, In, true),
    spec(F::Qliquid, "qliquid", "cloud_water_mixing_ratio", U::KgPerKg, InOut, true),
    spec(F::Qice, "qice", "cloud_ice_mixing_ratio", U::KgPerKg, InOut, true),
    spec(F::Qrain, "qrain", "rain_mixing_ratio", U::KgPerKg, InOut, true),
    spec(F::Qsnow, "qsnow", "snow_mixing_ratio", U::KgPerKg, InOut, true),
    spec(F::Qgraupel, "qgraupel", "graupel_mixing_ratio", U::KgPerKg, InOut, true),
    spec(F::Qo3mr, "qo3mr", "ozone_mixing_ratio", U::KgPerKg, InOut, true),
    spec(
        F::QsgsTke,
        "qsgs_tke",
        "turbulent_kinetic_energy",
        U::SquareMetersPerSecondSquared,
        InOut,
        true,
    ),
    spec(F::Qcld, "qcld", "cloud_fraction", U::Dimensionless, InOut, true),
    spec(F::Pt, "pt", "air_temperature", U::Kelvin, InOut, true),
    spec(
        F::Delp,
        "delp",
        "pressure_thickness_of_atmospheric_layer",
        U::Pascal,
        InOut,
        true,
    ),
    spec(
        F::Delz,
        "delz",
        "vertical_thickness_of_atmospheric_layer",
        U::Meters,
        InOut,
        true,
    ),
    spec(F::Ua, "ua", "eastward_wind", U::MetersPerSecond, InOut, true),
    spec(F::Va, "va", "northward_wind", U::MetersPerSecond, In, true),
    spec(F::W, "w", "vertical_wind", U::MetersPerSecond, InOut, true),
    spec(
        F::Omga,
        "omga",
        "vertical_pressure_velocity",
        U::PascalPerSecond,
        InOut,
        true,
    ),
    spec(F::QvaporT1, "qvapor_t1", "physics_specific_humidity", U::KgPerKg, In, false),
    spec(
        F::QliquidT1,
        "qliquid_t1",
        "physics_cloud_water_mixing_ratio",
        U::KgPerKg,
        InOut,
        false,
    ),
    spec(
        F::QiceT1,
        "qice_t1",
        "physics_cloud_ice_mixing_ratio",
        U::KgPerKg,
        InOut,
        false,
    ),
    spec(F::QrainT1, "qrain_t1", "physics_rain_mixing_ratio", U::KgPerKg, InOut, false),
    spec(F::QsnowT1, "qsnow_t1", "physics_snow_mixing_ratio", U::KgPerKg, InOut, false),
    spec(
        F::QgraupelT1,
        "qgraupel_t1",
        "physics_graupel_mixing_ratio",
        U::KgPerKg,
        InOut,
        false,
    ),
    spec(F::QcldT1, "qcld_t1", "physics_cloud_fraction", U::Dimensionless, InOut, false),
    spec(F::PtT1, "pt_t1", "physics_air_temperature", U::Kelvin, InOut, false),
    spec(F::UaT1, "ua_t1", "physics_eastward_wind", U::MetersPerSecond, InOut, false),
    spec(F::VaT1, "va_t1", "physics_northward_wind", U::MetersPerSecond, In, false),
    spec(
        F::Delprsi,
        "delprsi",
        "model_level_pressure_thickness_in_physics",
        U::Pascal,
        In,
        false,
    ),
    spec(F::Phii, "phii", "interface_geopotential_height", U::Meters, In, false),
    spec(F::Phil, "phil", "layer_geopotential_height", U::Meters, In, false),
    spec(F::Dz, "dz", "geopotential_height_thickness", U::Meters, In, false),
    spec(
        F::Wmp,
        "wmp",
        "layer_mean_vertical_velocity_microph",
        U::MetersPerSecond,
        In,
        false,
    ),
    spec(F::Prsi, "prsi", "interface_pressure", U::Pascal, In, false),
];

/// Fields shared with the microphysics view, in the order microphysics lists them
pub const MICROPHYSICS_FIELDS: [FieldId; 16] = [
    F::Pt,
    F::Qvapor,
    F::Qliquid,
    F::Qrain,
    F::Qice,
    F::Qsnow,
    F::Qgraupel,
    F::Qcld,
    F::Ua,
    F::Va,
    F::Delp,
    F::Delz,
    F::Omga,
    F::Delprsi,
    F::Wmp,
    F::Dz,
];

static BY_KEY: LazyLock<FxHashMap<&'static str, FieldId>> =
    LazyLock::new(|| FIELDS.iter().map(|spec| (spec.key, spec.id)).collect());

static BY_NAME: LazyLock<FxHashMap<&'static str, FieldId>> =
    LazyLock::new(|| FIELDS.iter().map(|spec| (spec.name, spec.id)).collect());

impl FieldId {
    /// Every field in declaration order
    pub fn all() -> impl Iterator<Item = FieldId> {
        FIELDS.iter().map(|spec| spec.id)
    }

    /// Look up a field by attribute key (e.g. `"qvapor_t1"`)
    #[must_use]
    pub fn from_key(key: &str) -> Option<FieldId> {
        BY_KEY.get(key).copied()
    }

    /// Look up a field by standard name (e.g. `"air_temperature"`)
    #[must_use]
    pub fn from_standard_name(name: &str) -> Option<FieldId> {
        BY_NAME.get(name).copied()
    }

    #[must_use]
    pub fn spec(self) -> &'static FieldSpec {
        &FIELDS[self as usize]
    }

    #[must_use]
    pub fn key(self) -> &'static str {
        self.spec().key
    }

    #[must_use]
    pub fn standard_name(self) -> &'static str {
        self.spec().name
    }

    #[must_use]
    pub fn units(self) -> Units {
        self.spec().units
    }

    /// Whether the field belongs to the microphysics view
    #[must_use]
    pub fn is_microphysics(self) -> bool {
        MICROPHYSICS_FIELDS.contains(&self)
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

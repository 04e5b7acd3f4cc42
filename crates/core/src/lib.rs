//! Physics State Core Library
//!
//! Typed state container for the physics side of an atmospheric model. The
//! physics state aggregates the unit-tagged 3D fields exchanged with the
//! dynamical core (temperature, tracers, winds, layer thicknesses) together
//! with the `_t1` fields physics updates and the diagnostics it derives.
//!
//! ## Construction
//!
//! - Allocate zero-filled from an [`ArrayFactory`]
//! - Copy in bare arrays keyed by field name
//! - Take ownership of pre-wrapped [`Quantity`] values
//!
//! The field set is closed: every constructor rejects unknown and missing keys.
//! Microphysics sees a subset of the fields through borrowed views that share
//! storage with the state, plus a scratch tendency buffer it owns.

// Core types and utilities
pub mod core_types;

pub mod grid;
pub mod quantity;
pub mod state;

// Re-export core types
pub use core_types::{Dim, Units};
pub use grid::{ArrayFactory, GridConfig, GridExtent, QuantityFactory};
pub use quantity::{FieldData, FieldValue, Quantity};
pub use state::{
    FieldId, FieldSpec, Intent, MicrophysicsView, MicrophysicsViewMut, PhysicsState, StateError,
};

//! Physics state schema, construction and the microphysics view

mod error;
pub mod microphysics;
mod physics_state;
pub mod schema;

pub use error::StateError;
pub use microphysics::{MicrophysicsState, MicrophysicsView, MicrophysicsViewMut};
pub use physics_state::PhysicsState;
pub use schema::{FieldId, FieldSpec, Intent, FIELDS, FIELD_COUNT, MICROPHYSICS_FIELDS};

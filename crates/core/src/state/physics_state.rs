//! Physics state container
//!
//! `PhysicsState` holds every field exchanged between the dycore and physics,
//! plus the derived fields physics keeps for itself. All fields share one grid
//! extent. Three constructors are provided:
//!
//! - [`PhysicsState::init_empty`] allocates zero-filled fields from a factory.
//! - [`PhysicsState::init_from_arrays`] copies bare arrays into a fresh state.
//! - [`PhysicsState::init_from_quantities`] takes ownership of quantities.
//!
//! Supplied mappings must contain exactly the declared field keys, and every
//! array must share one extent, including those handed back by a factory. All
//! checks run before a state is returned, so a failed construction never yields
//! a partially populated state.
//!
//! # Example
//!
//! ```
//! use physics_state_core::{FieldId, GridConfig, PhysicsState, QuantityFactory};
//!
//! let factory = QuantityFactory::new(GridConfig::default()).unwrap();
//! let mut state = PhysicsState::init_empty(&factory).unwrap();
//!
//! state.microphysics_mut().pt.fill(280.0);
//! assert_eq!(state.field(FieldId::Pt).get(0, 0, 0), 280.0);
//! ```

use rustc_hash::FxHashMap;
use tracing::{debug, info};

use crate::core_types::{Dim, Units};
use crate::grid::{ArrayFactory, GridExtent};
use crate::quantity::{FieldData, FieldValue, Quantity};
use crate::state::error::StateError;
use crate::state::microphysics::{MicrophysicsState, MicrophysicsView, MicrophysicsViewMut};
use crate::state::schema::{FieldId, FieldSpec, FIELDS, FIELD_COUNT};

/// Name reported when the scratch tendency buffer fails validation
const TENDENCY_KEY: &str = "tendency_storage";

/// Fields exchanged between the dycore and physics
#[derive(Debug, Clone, PartialEq)]
pub struct PhysicsState {
    extent: GridExtent,
    /// Indexed by `FieldId as usize`
    fields: [FieldData; FIELD_COUNT],
    microphysics: MicrophysicsState,
}

impl PhysicsState {
    fn from_storages(fields: [FieldData; FIELD_COUNT], microphysics: MicrophysicsState) -> Self {
        let extent = microphysics.tendency_storage().extent();
        debug_assert!(fields.iter().all(|field| field.extent() == extent));
        Self {
            extent,
            fields,
            microphysics,
        }
    }

    /// Allocate a state with every field zero-filled
    ///
    /// Each field is requested from `factory` on the cell-centred grid with its
    /// declared units, followed by the microphysics tendency buffer.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::UnitsMismatch`], [`StateError::DimensionMismatch`]
    /// or [`StateError::ShapeMismatch`] if the factory hands back a quantity
    /// that does not match the request or the extent of earlier fields.
    pub fn init_empty<F: ArrayFactory + ?Sized>(factory: &F) -> Result<Self, StateError> {
        let mut extent = None;
        let storages = FIELDS
            .iter()
            .map(|spec| {
                let quantity = factory.zeros(Dim::CELL_CENTERED, spec.units);
                accept_quantity(spec.key, spec.units, quantity, &mut extent)
            })
            .collect::<Result<Vec<_>, _>>()?;
        let fields = into_field_array(storages)?;
        let tendency_storage = accept_quantity(
            TENDENCY_KEY,
            Units::Unknown,
            factory.zeros(Dim::CELL_CENTERED, Units::Unknown),
            &mut extent,
        )?;

        let state = Self::from_storages(fields, MicrophysicsState::new(tendency_storage));
        debug!(
            "Allocated empty physics state: {} fields on {} grid",
            FIELD_COUNT, state.extent
        );
        Ok(state)
    }

    /// Build a state by copying bare arrays into freshly allocated fields
    ///
    /// `arrays` must hold exactly one entry per declared field key, each with
    /// the factory's storage extent. The input mapping is not modified.
    ///
    /// # Errors
    ///
    /// - [`StateError::UnknownField`] if a key is not a declared field
    /// - [`StateError::MissingField`] if a declared field has no entry
    /// - [`StateError::ShapeMismatch`] if an array's extent differs from the grid
    pub fn init_from_arrays<F: ArrayFactory + ?Sized>(
        arrays: &FxHashMap<String, FieldData>,
        factory: &F,
    ) -> Result<Self, StateError> {
        check_unknown_keys(arrays.keys().map(String::as_str))?;
        let sources = FIELDS
            .iter()
            .map(|spec| {
                arrays
                    .get(spec.key)
                    .ok_or_else(|| StateError::MissingField(spec.key.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut state = Self::init_empty(factory)?;
        for (spec, source) in FIELDS.iter().zip(&sources) {
            if source.extent() != state.extent {
                return Err(StateError::shape_mismatch(
                    spec.key,
                    state.extent,
                    source.extent(),
                ));
            }
        }
        for ((spec, target), source) in FIELDS.iter().zip(state.fields.iter_mut()).zip(sources) {
            target.copy_from(spec.key, source)?;
        }

        info!("Physics state populated from {} arrays", arrays.len());
        Ok(state)
    }

    /// Build a state that takes ownership of the supplied quantities
    ///
    /// Every value must be a [`Quantity`] carrying its field's declared units on
    /// the cell-centred layout, and all quantities must share one extent. The
    /// microphysics tendency buffer is allocated on that extent.
    ///
    /// # Errors
    ///
    /// - [`StateError::UnknownField`] if a key is not a declared field
    /// - [`StateError::MissingField`] if a declared field has no entry
    /// - [`StateError::TypeMismatch`] if a value is a bare array
    /// - [`StateError::UnitsMismatch`] if a quantity has the wrong units
    /// - [`StateError::DimensionMismatch`] if a quantity is not cell-centred
    /// - [`StateError::ShapeMismatch`] if extents differ between quantities
    pub fn init_from_quantities(
        mut quantities: FxHashMap<String, FieldValue>,
    ) -> Result<Self, StateError> {
        check_unknown_keys(quantities.keys().map(String::as_str))?;
        if let Some(spec) = FIELDS.iter().find(|spec| !quantities.contains_key(spec.key)) {
            return Err(StateError::MissingField(spec.key.to_string()));
        }

        let mut extent = None;
        let storages = FIELDS
            .iter()
            .map(|spec| {
                let value = quantities
                    .remove(spec.key)
                    .ok_or_else(|| StateError::MissingField(spec.key.to_string()))?;
                let kind = value.kind();
                let FieldValue::Quantity(quantity) = value else {
                    return Err(StateError::TypeMismatch {
                        field: spec.key.to_string(),
                        actual: kind,
                    });
                };
                accept_quantity(spec.key, spec.units, quantity, &mut extent)
            })
            .collect::<Result<Vec<_>, _>>()?;
        let fields = into_field_array(storages)?;
        let extent = fields[0].extent();

        info!("Physics state built from quantities on {} grid", extent);
        Ok(Self::from_storages(fields, MicrophysicsState::zeros(extent)))
    }

    /// Storage extent shared by every field
    #[must_use]
    pub fn extent(&self) -> GridExtent {
        self.extent
    }

    #[must_use]
    pub fn field(&self, id: FieldId) -> &FieldData {
        &self.fields[id as usize]
    }

    pub fn field_mut(&mut self, id: FieldId) -> &mut FieldData {
        &mut self.fields[id as usize]
    }

    /// Field by attribute key (e.g. `"pt_t1"`)
    ///
    /// # Errors
    ///
    /// Returns [`StateError::UnknownField`] if `key` is not a declared field.
    pub fn field_by_key(&self, key: &str) -> Result<&FieldData, StateError> {
        FieldId::from_key(key)
            .map(|id| self.field(id))
            .ok_or_else(|| StateError::UnknownField(key.to_string()))
    }

    /// Field by standard name (e.g. `"eastward_wind"`)
    #[must_use]
    pub fn field_by_standard_name(&self, name: &str) -> Option<&FieldData> {
        FieldId::from_standard_name(name).map(|id| self.field(id))
    }

    /// Every field with its metadata, in declaration order
    pub fn fields(&self) -> impl Iterator<Item = (&'static FieldSpec, &FieldData)> {
        FIELDS.iter().zip(self.fields.iter())
    }

    /// Fields whose initial values are supplied by the dycore
    pub fn dycore_fields(&self) -> impl Iterator<Item = (&'static FieldSpec, &FieldData)> {
        self.fields().filter(|(spec, _)| spec.from_dycore)
    }

    /// Shared read access to the microphysics fields and tendency buffer
    #[must_use]
    pub fn microphysics(&self) -> MicrophysicsView<'_> {
        MicrophysicsView::new(&self.fields, &self.microphysics)
    }

    /// Exclusive access to the microphysics fields and tendency buffer
    pub fn microphysics_mut(&mut self) -> MicrophysicsViewMut<'_> {
        MicrophysicsViewMut::new(&mut self.fields, &mut self.microphysics)
    }

    /// Copy every field out as a quantity keyed by attribute key
    ///
    /// The result can be fed back through [`PhysicsState::init_from_quantities`].
    #[must_use]
    pub fn to_quantities(&self) -> FxHashMap<String, Quantity> {
        self.fields()
            .map(|(spec, data)| (spec.key.to_string(), to_quantity(spec, data)))
            .collect()
    }

    /// Copy the dycore-supplied fields out as quantities keyed by standard name
    #[must_use]
    pub fn dycore_quantities(&self) -> FxHashMap<&'static str, Quantity> {
        self.dycore_fields()
            .map(|(spec, data)| (spec.name, to_quantity(spec, data)))
            .collect()
    }

    /// Fields holding NaN or infinite values, in declaration order
    #[must_use]
    pub fn non_finite_fields(&self) -> Vec<FieldId> {
        self.fields()
            .filter(|(_, data)| !data.all_finite())
            .map(|(spec, _)| spec.id)
            .collect()
    }
}

fn to_quantity(spec: &FieldSpec, data: &FieldData) -> Quantity {
    Quantity::new(data.clone(), Dim::CELL_CENTERED, spec.units)
}

/// Reject keys outside the field table; the alphabetically first offender is reported
fn check_unknown_keys<'k>(keys: impl Iterator<Item = &'k str>) -> Result<(), StateError> {
    let mut unknown: Vec<&str> = keys.filter(|key| FieldId::from_key(key).is_none()).collect();
    unknown.sort_unstable();
    match unknown.first() {
        Some(key) => Err(StateError::UnknownField((*key).to_string())),
        None => Ok(()),
    }
}

/// Check a quantity against its declared units, the cell-centred layout and
/// the extent shared with previously accepted fields
fn accept_quantity(
    key: &str,
    units: Units,
    quantity: Quantity,
    extent: &mut Option<GridExtent>,
) -> Result<FieldData, StateError> {
    if quantity.units() != units {
        return Err(StateError::UnitsMismatch {
            field: key.to_string(),
            expected: units,
            actual: quantity.units(),
        });
    }
    if quantity.dims() != Dim::CELL_CENTERED {
        return Err(StateError::DimensionMismatch {
            field: key.to_string(),
            expected: Dim::CELL_CENTERED,
            actual: quantity.dims(),
        });
    }
    let expected = *extent.get_or_insert(quantity.extent());
    if quantity.extent() != expected {
        return Err(StateError::shape_mismatch(key, expected, quantity.extent()));
    }
    Ok(quantity.into_data())
}

/// Storage in declaration order; a short list names the first absent field
fn into_field_array(storages: Vec<FieldData>) -> Result<[FieldData; FIELD_COUNT], StateError> {
    storages.try_into().map_err(|rest: Vec<FieldData>| {
        let key = FIELDS.get(rest.len()).map_or("field table", |spec| spec.key);
        StateError::MissingField(key.to_string())
    })
}

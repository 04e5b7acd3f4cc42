//! Physics State Construction Suite
//!
//! Exercises the three construction paths against the declared field table:
//! zero allocation from a factory, copying bare arrays, and adopting
//! quantities. Every path must reject unknown and missing keys.

use std::cell::RefCell;

use approx::assert_relative_eq;
use physics_state_core::state::{FIELDS, FIELD_COUNT};
use physics_state_core::{
    ArrayFactory, Dim, FieldData, FieldId, FieldValue, GridConfig, GridExtent, PhysicsState,
    Quantity, QuantityFactory, StateError, Units,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rustc_hash::FxHashMap;

#[ctor::ctor]
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn factory() -> QuantityFactory {
    QuantityFactory::new(GridConfig {
        nx: 6,
        ny: 5,
        nz: 8,
        n_halo: 1,
    })
    .unwrap()
}

fn random_arrays(extent: GridExtent, seed: u64) -> FxHashMap<String, FieldData> {
    let mut rng = StdRng::seed_from_u64(seed);
    FIELDS
        .iter()
        .map(|spec| {
            let data = FieldData::from_fn(extent, |_, _, _| rng.random_range(-50.0..350.0));
            (spec.key.to_string(), data)
        })
        .collect()
}

fn as_quantities(state: &PhysicsState) -> FxHashMap<String, FieldValue> {
    state
        .to_quantities()
        .into_iter()
        .map(|(key, quantity)| (key, FieldValue::from(quantity)))
        .collect()
}

/// Records every allocation request before delegating to a real factory
struct RecordingFactory {
    inner: QuantityFactory,
    requests: RefCell<Vec<([Dim; 3], Units)>>,
}

impl ArrayFactory for RecordingFactory {
    fn zeros(&self, dims: [Dim; 3], units: Units) -> Quantity {
        self.requests.borrow_mut().push((dims, units));
        self.inner.zeros(dims, units)
    }
}

/// Hands back an extra vertical level for pressure fields
struct TallPressureFactory {
    inner: QuantityFactory,
}

impl ArrayFactory for TallPressureFactory {
    fn zeros(&self, dims: [Dim; 3], units: Units) -> Quantity {
        if units != Units::Pascal {
            return self.inner.zeros(dims, units);
        }
        let extent = self.inner.storage_extent();
        let tall = GridExtent::new(extent.nx, extent.ny, extent.nz + 1);
        Quantity::new(FieldData::new(tall), dims, units)
    }
}

/// Tags every allocation with fixed dims and units, ignoring the request
struct MislabellingFactory {
    inner: QuantityFactory,
    dims: [Dim; 3],
    units: Units,
}

impl ArrayFactory for MislabellingFactory {
    fn zeros(&self, _dims: [Dim; 3], _units: Units) -> Quantity {
        let data = FieldData::new(self.inner.storage_extent());
        Quantity::new(data, self.dims, self.units)
    }
}

/// Allocates the tendency buffer one level short
struct ShortTendencyFactory {
    inner: QuantityFactory,
}

impl ArrayFactory for ShortTendencyFactory {
    fn zeros(&self, dims: [Dim; 3], units: Units) -> Quantity {
        if units != Units::Unknown {
            return self.inner.zeros(dims, units);
        }
        let extent = self.inner.storage_extent();
        let short = GridExtent::new(extent.nx, extent.ny, extent.nz - 1);
        Quantity::new(FieldData::new(short), dims, units)
    }
}

#[test]
fn test_empty_state_matches_grid() {
    let factory = factory();
    let state = PhysicsState::init_empty(&factory).unwrap();

    let expected = GridExtent::new(8, 7, 8);
    assert_eq!(state.extent(), expected);
    assert_eq!(state.fields().count(), FIELD_COUNT);
    for (spec, data) in state.fields() {
        assert_eq!(data.extent(), expected, "{} has wrong shape", spec.key);
        assert!(
            data.as_slice().iter().all(|&v| v == 0.0),
            "{} is not zero-filled",
            spec.key
        );
    }
}

#[test]
fn test_empty_state_requests_declared_units() {
    let recorder = RecordingFactory {
        inner: factory(),
        requests: RefCell::new(Vec::new()),
    };
    let _state = PhysicsState::init_empty(&recorder).unwrap();

    let requests = recorder.requests.into_inner();
    assert_eq!(requests.len(), FIELD_COUNT + 1);
    for (spec, (dims, units)) in FIELDS.iter().zip(&requests) {
        assert_eq!(*dims, Dim::CELL_CENTERED);
        assert_eq!(*units, spec.units, "{} allocated with wrong units", spec.key);
    }
    assert_eq!(requests.last(), Some(&(Dim::CELL_CENTERED, Units::Unknown)));
}

#[test]
fn test_empty_construction_is_deterministic() {
    let first = PhysicsState::init_empty(&factory()).unwrap();
    let second = PhysicsState::init_empty(&factory()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_empty_state_rejects_mismatched_factory_extent() {
    let factory = TallPressureFactory { inner: factory() };
    assert_eq!(
        PhysicsState::init_empty(&factory),
        Err(StateError::shape_mismatch(
            "delp",
            GridExtent::new(8, 7, 8),
            GridExtent::new(8, 7, 9)
        ))
    );

    let arrays = random_arrays(factory.inner.storage_extent(), 17);
    assert!(matches!(
        PhysicsState::init_from_arrays(&arrays, &factory),
        Err(StateError::ShapeMismatch { field, .. }) if field == "delp"
    ));
}

#[test]
fn test_empty_state_rejects_mislabelled_factory_output() {
    let staggered = MislabellingFactory {
        inner: factory(),
        dims: [Dim::X, Dim::Y, Dim::ZInterface],
        units: Units::KgPerKg,
    };
    assert_eq!(
        PhysicsState::init_empty(&staggered),
        Err(StateError::DimensionMismatch {
            field: "qvapor".into(),
            expected: Dim::CELL_CENTERED,
            actual: [Dim::X, Dim::Y, Dim::ZInterface],
        })
    );

    let metres = MislabellingFactory {
        inner: factory(),
        dims: Dim::CELL_CENTERED,
        units: Units::Meters,
    };
    assert_eq!(
        PhysicsState::init_empty(&metres),
        Err(StateError::UnitsMismatch {
            field: "qvapor".into(),
            expected: Units::KgPerKg,
            actual: Units::Meters,
        })
    );
}

#[test]
fn test_empty_state_rejects_short_tendency_buffer() {
    let factory = ShortTendencyFactory { inner: factory() };
    let err = PhysicsState::init_empty(&factory).unwrap_err();
    assert_eq!(
        err,
        StateError::shape_mismatch(
            "tendency_storage",
            GridExtent::new(8, 7, 8),
            GridExtent::new(8, 7, 7)
        )
    );
    assert_eq!(
        err.to_string(),
        "tendency_storage has shape (8, 7, 7), expected (8, 7, 8)"
    );
}

#[test]
fn test_arrays_copied_element_for_element() {
    let factory = factory();
    let arrays = random_arrays(factory.storage_extent(), 7);
    let state = PhysicsState::init_from_arrays(&arrays, &factory).unwrap();

    for (spec, data) in state.fields() {
        let source = &arrays[spec.key];
        assert_eq!(data.as_slice(), source.as_slice(), "{} differs", spec.key);
    }

    let total: f64 = state.field(FieldId::Pt).as_slice().iter().sum();
    let expected: f64 = arrays["pt"].as_slice().iter().sum();
    assert_relative_eq!(total, expected, max_relative = 1e-12);
}

#[test]
fn test_arrays_are_copies_not_aliases() {
    let factory = factory();
    let arrays = random_arrays(factory.storage_extent(), 11);
    let mut state = PhysicsState::init_from_arrays(&arrays, &factory).unwrap();

    state.field_mut(FieldId::Delp).fill(0.0);
    assert!(arrays["delp"].as_slice().iter().any(|&v| v != 0.0));
}

#[test]
fn test_arrays_with_extra_key_rejected() {
    let factory = factory();
    let mut arrays = random_arrays(factory.storage_extent(), 3);
    arrays.insert("surface_pressure".into(), FieldData::new(factory.storage_extent()));

    let err = PhysicsState::init_from_arrays(&arrays, &factory).unwrap_err();
    assert_eq!(err, StateError::UnknownField("surface_pressure".into()));
    assert_eq!(
        err.to_string(),
        "surface_pressure is provided, but not part of the physics state"
    );
}

#[test]
fn test_arrays_with_each_key_missing_rejected() {
    let factory = factory();
    let complete = random_arrays(factory.storage_extent(), 5);
    for spec in &FIELDS {
        let mut arrays = complete.clone();
        arrays.remove(spec.key);
        assert_eq!(
            PhysicsState::init_from_arrays(&arrays, &factory),
            Err(StateError::MissingField(spec.key.to_string()))
        );
    }
}

#[test]
fn test_unknown_key_reported_before_missing_key() {
    let factory = factory();
    let mut arrays = random_arrays(factory.storage_extent(), 9);
    arrays.remove("qo3mr");
    arrays.insert("qo3".into(), FieldData::new(factory.storage_extent()));

    assert_eq!(
        PhysicsState::init_from_arrays(&arrays, &factory),
        Err(StateError::UnknownField("qo3".into()))
    );
}

#[test]
fn test_quantities_round_trip() {
    let factory = factory();
    let arrays = random_arrays(factory.storage_extent(), 13);
    let state = PhysicsState::init_from_arrays(&arrays, &factory).unwrap();

    let rebuilt = PhysicsState::init_from_quantities(as_quantities(&state)).unwrap();
    assert_eq!(rebuilt, state);
}

#[test]
fn test_quantity_path_needs_no_factory() {
    let extent = GridExtent::new(4, 4, 3);
    let quantities: FxHashMap<String, FieldValue> = FIELDS
        .iter()
        .map(|spec| {
            let quantity = Quantity::new(
                FieldData::with_value(extent, 1.0),
                Dim::CELL_CENTERED,
                spec.units,
            );
            (spec.key.to_string(), quantity.into())
        })
        .collect();

    let state = PhysicsState::init_from_quantities(quantities).unwrap();
    assert_eq!(state.extent(), extent);
    assert_eq!(state.field(FieldId::Prsi).get(3, 3, 2), 1.0);
    assert_eq!(state.microphysics().tendency_storage().extent(), extent);
}

#[test]
fn test_bare_array_rejected_in_quantity_path() {
    let factory = factory();
    let state = PhysicsState::init_empty(&factory).unwrap();
    let mut quantities = as_quantities(&state);
    quantities.insert(
        "qsnow".into(),
        FieldValue::Array(FieldData::new(factory.storage_extent())),
    );

    let err = PhysicsState::init_from_quantities(quantities).unwrap_err();
    assert_eq!(
        err,
        StateError::TypeMismatch {
            field: "qsnow".into(),
            actual: "FieldData",
        }
    );
    assert!(err.to_string().starts_with("qsnow is not a Quantity"));
}

#[test]
fn test_quantity_path_rejects_unknown_and_missing() {
    let state = PhysicsState::init_empty(&factory()).unwrap();

    let mut extra = as_quantities(&state);
    extra.insert(
        "tendency_storage".into(),
        state.to_quantities()["pt"].clone().into(),
    );
    assert_eq!(
        PhysicsState::init_from_quantities(extra),
        Err(StateError::UnknownField("tendency_storage".into()))
    );

    let mut missing = as_quantities(&state);
    missing.remove("phii");
    assert_eq!(
        PhysicsState::init_from_quantities(missing),
        Err(StateError::MissingField("phii".into()))
    );
}

#[test]
fn test_quantity_path_rejects_mixed_extents() {
    let state = PhysicsState::init_empty(&factory()).unwrap();
    let mut quantities = as_quantities(&state);
    let odd = Quantity::new(
        FieldData::new(GridExtent::new(8, 7, 9)),
        Dim::CELL_CENTERED,
        Units::Meters,
    );
    quantities.insert("dz".into(), odd.into());

    assert_eq!(
        PhysicsState::init_from_quantities(quantities),
        Err(StateError::shape_mismatch(
            "dz",
            GridExtent::new(8, 7, 8),
            GridExtent::new(8, 7, 9)
        ))
    );
}

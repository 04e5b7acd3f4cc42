//! Microphysics view of the physics state
//!
//! Microphysics reads and updates sixteen of the physics state fields plus a
//! scratch tendency buffer that is not part of the persisted state.
//! [`MicrophysicsState`] owns only that buffer. The shared fields stay in the
//! parent [`PhysicsState`](crate::PhysicsState) and are reached through the
//! borrowed views [`MicrophysicsView`] and [`MicrophysicsViewMut`], so a write
//! through either the view or the parent is the same write.

use crate::grid::GridExtent;
use crate::quantity::FieldData;
use crate::state::schema::{FieldId, FIELD_COUNT};

/// Storage owned exclusively by microphysics
#[derive(Debug, Clone, PartialEq)]
pub struct MicrophysicsState {
    tendency_storage: FieldData,
}

impl MicrophysicsState {
    pub(crate) fn new(tendency_storage: FieldData) -> Self {
        Self { tendency_storage }
    }

    /// Zero-initialised scratch storage on `extent`
    pub(crate) fn zeros(extent: GridExtent) -> Self {
        Self::new(FieldData::new(extent))
    }

    pub(crate) fn tendency_storage(&self) -> &FieldData {
        &self.tendency_storage
    }

    pub(crate) fn tendency_storage_mut(&mut self) -> &mut FieldData {
        &mut self.tendency_storage
    }
}

/// Shared read access to the microphysics fields
#[derive(Debug, Clone, Copy)]
pub struct MicrophysicsView<'a> {
    fields: &'a [FieldData; FIELD_COUNT],
    tendency_storage: &'a FieldData,
}

macro_rules! shared_field_accessors {
    ($($name:ident => $id:ident),* $(,)?) => {
        impl<'a> MicrophysicsView<'a> {
            $(
                #[must_use]
                pub fn $name(&self) -> &'a FieldData {
                    &self.fields[FieldId::$id as usize]
                }
            )*
        }
    };
}

shared_field_accessors! {
    pt => Pt,
    qvapor => Qvapor,
    qliquid => Qliquid,
    qrain => Qrain,
    qice => Qice,
    qsnow => Qsnow,
    qgraupel => Qgraupel,
    qcld => Qcld,
    ua => Ua,
    va => Va,
    delp => Delp,
    delz => Delz,
    omga => Omga,
    delprsi => Delprsi,
    wmp => Wmp,
    dz => Dz,
}

impl<'a> MicrophysicsView<'a> {
    pub(crate) fn new(
        fields: &'a [FieldData; FIELD_COUNT],
        microphysics: &'a MicrophysicsState,
    ) -> Self {
        Self {
            fields,
            tendency_storage: microphysics.tendency_storage(),
        }
    }

    /// Shared field by id, `None` for fields microphysics does not see
    #[must_use]
    pub fn get(&self, id: FieldId) -> Option<&'a FieldData> {
        id.is_microphysics().then(|| &self.fields[id as usize])
    }

    /// Scratch tendency buffer
    #[must_use]
    pub fn tendency_storage(&self) -> &'a FieldData {
        self.tendency_storage
    }
}

/// Exclusive access to the microphysics fields
///
/// Every shared field is a disjoint mutable borrow of the parent state, so
/// numerics can update several fields and the tendency buffer at once.
#[derive(Debug)]
pub struct MicrophysicsViewMut<'a> {
    pub pt: &'a mut FieldData,
    pub qvapor: &'a mut FieldData,
    pub qliquid: &'a mut FieldData,
    pub qrain: &'a mut FieldData,
    pub qice: &'a mut FieldData,
    pub qsnow: &'a mut FieldData,
    pub qgraupel: &'a mut FieldData,
    pub qcld: &'a mut FieldData,
    pub ua: &'a mut FieldData,
    pub va: &'a mut FieldData,
    pub delp: &'a mut FieldData,
    pub delz: &'a mut FieldData,
    pub omga: &'a mut FieldData,
    pub delprsi: &'a mut FieldData,
    pub wmp: &'a mut FieldData,
    pub dz: &'a mut FieldData,
    pub tendency_storage: &'a mut FieldData,
}

impl<'a> MicrophysicsViewMut<'a> {
    pub(crate) fn new(
        fields: &'a mut [FieldData; FIELD_COUNT],
        microphysics: &'a mut MicrophysicsState,
    ) -> Self {
        // Declaration order of FIELDS; `_` slots are not shared with microphysics
        let [
            qvapor,
            qliquid,
            qice,
            qrain,
            qsnow,
            qgraupel,
            _,
            _,
            qcld,
            pt,
            delp,
            delz,
            ua,
            va,
            _,
            omga,
            _,
            _,
            _,
            _,
            _,
            _,
            _,
            _,
            _,
            _,
            delprsi,
            _,
            _,
            dz,
            wmp,
            _,
        ] = fields;
        Self {
            pt,
            qvapor,
            qliquid,
            qrain,
            qice,
            qsnow,
            qgraupel,
            qcld,
            ua,
            va,
            delp,
            delz,
            omga,
            delprsi,
            wmp,
            dz,
            tendency_storage: microphysics.tendency_storage_mut(),
        }
    }
}

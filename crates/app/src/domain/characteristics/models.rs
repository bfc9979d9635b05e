//! Characteristic Models

use crate::ids::TypedId;

/// Characteristic ID
pub type CharacteristicId = TypedId<Characteristic>;

/// A measurable product attribute such as "Weight" in "kg".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Characteristic {
    pub id: CharacteristicId,
    pub name: String,
    pub measurement_unit: Option<String>,
}

/// Characteristic insert/update payload; `id: None` inserts.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CharacteristicDraft {
    pub id: Option<CharacteristicId>,
    pub name: String,
    pub measurement_unit: Option<String>,
}

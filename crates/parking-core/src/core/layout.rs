// crates/parking-core/src/core/layout.rs
// ============================================================================
// Module: Lot Layout
// Description: Declarative floor and slot layout used to configure a lot.
// Purpose: Validate physical layout input before any floor is built.
// Dependencies: crate::core::{floor, identifiers, size, slot}, serde, thiserror
// ============================================================================

//! ## Overview
//! A [`LotLayout`] is the serializable description of a lot: its name, its
//! floors, and each floor's slots with optional per-entrance distances.
//! Validation is fail-closed and runs before any [`Floor`] is built, so a
//! configured lot never holds a duplicate identifier or a bad distance.
//!
//! ## Invariants
//! - Floor ids are unique; slot ids are unique across the whole lot.
//! - Distances are finite and non-negative.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::core::floor::Floor;
use crate::core::floor::FloorError;
use crate::core::identifiers::EntranceId;
use crate::core::identifiers::FloorId;
use crate::core::identifiers::SlotId;
use crate::core::size::SizeClass;
use crate::core::slot::Slot;

// ============================================================================
// SECTION: Layout Types
// ============================================================================

/// Layout of a whole lot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LotLayout {
    /// Lot display name.
    pub name: String,
    /// Floors in any order; search order is ascending id.
    pub floors: Vec<FloorLayout>,
}

/// Layout of one floor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FloorLayout {
    /// Floor identifier.
    pub id: FloorId,
    /// Optional display name.
    #[serde(default)]
    pub name: Option<String>,
    /// Slots in registration order.
    #[serde(default)]
    pub slots: Vec<SlotLayout>,
}

/// Layout of one slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SlotLayout {
    /// Slot identifier, unique within the lot.
    pub id: SlotId,
    /// Slot size class.
    pub size_class: SizeClass,
    /// Distance per entrance.
    #[serde(default)]
    pub distances: BTreeMap<EntranceId, f64>,
}

// ============================================================================
// SECTION: Validation
// ============================================================================

impl LotLayout {
    /// Validates the whole layout.
    ///
    /// # Errors
    ///
    /// Returns the first [`LayoutError`] found.
    pub fn validate(&self) -> Result<(), LayoutError> {
        if self.name.trim().is_empty() {
            return Err(LayoutError::EmptyName);
        }
        if self.floors.is_empty() {
            return Err(LayoutError::NoFloors);
        }
        let mut floor_ids = BTreeSet::new();
        let mut slot_ids = BTreeSet::new();
        for floor in &self.floors {
            if !floor_ids.insert(floor.id) {
                return Err(LayoutError::DuplicateFloor {
                    floor_id: floor.id,
                });
            }
            floor.validate()?;
            for slot in &floor.slots {
                if !slot_ids.insert(slot.id.clone()) {
                    return Err(LayoutError::DuplicateSlot {
                        slot_id: slot.id.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Validates the layout and builds floors keyed by id.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError`] when validation fails.
    pub fn build_floors(&self) -> Result<BTreeMap<FloorId, Floor>, LayoutError> {
        self.validate()?;
        self.floors.iter().map(|layout| Ok((layout.id, layout.build()?))).collect()
    }

    /// Returns the total number of slots described.
    #[must_use]
    pub fn slot_count(&self) -> usize {
        self.floors.iter().map(|floor| floor.slots.len()).sum()
    }
}

impl FloorLayout {
    /// Validates this floor in isolation.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError`] for empty identifiers, repeated slot ids on
    /// the floor, or invalid distances.
    pub fn validate(&self) -> Result<(), LayoutError> {
        if self.name.as_deref().is_some_and(|name| name.trim().is_empty()) {
            return Err(LayoutError::EmptyFloorName {
                floor_id: self.id,
            });
        }
        let mut seen = BTreeSet::new();
        for slot in &self.slots {
            slot.validate(self.id)?;
            if !seen.insert(&slot.id) {
                return Err(LayoutError::DuplicateSlot {
                    slot_id: slot.id.clone(),
                });
            }
        }
        Ok(())
    }

    /// Builds the floor after validating it.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError`] when validation or slot registration fails.
    pub fn build(&self) -> Result<Floor, LayoutError> {
        self.validate()?;
        let mut floor = Floor::new(self.id, self.name.clone());
        for layout in &self.slots {
            let slot =
                Slot::new(layout.id.clone(), self.id, layout.size_class, layout.distances.clone());
            floor.register_slot(slot, layout.size_class)?;
        }
        Ok(floor)
    }
}

impl SlotLayout {
    /// Validates one slot entry.
    fn validate(&self, floor_id: FloorId) -> Result<(), LayoutError> {
        if self.id.as_str().trim().is_empty() {
            return Err(LayoutError::EmptySlotId {
                floor_id,
            });
        }
        for (entrance, distance) in &self.distances {
            if entrance.as_str().trim().is_empty() {
                return Err(LayoutError::EmptyEntrance {
                    slot_id: self.id.clone(),
                });
            }
            if !distance.is_finite() || *distance < 0.0 {
                return Err(LayoutError::InvalidDistance {
                    slot_id: self.id.clone(),
                    entrance: entrance.clone(),
                    value: *distance,
                });
            }
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Layout validation errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    /// Lot name is blank.
    #[error("lot name must not be empty")]
    EmptyName,
    /// Layout has no floors.
    #[error("lot must have at least one floor")]
    NoFloors,
    /// Floor id repeated.
    #[error("duplicate floor id {floor_id}")]
    DuplicateFloor {
        /// Repeated floor id.
        floor_id: FloorId,
    },
    /// Floor name present but blank.
    #[error("floor {floor_id} name must not be empty")]
    EmptyFloorName {
        /// Offending floor.
        floor_id: FloorId,
    },
    /// Slot id repeated within the lot.
    #[error("duplicate slot id {slot_id}")]
    DuplicateSlot {
        /// Repeated slot id.
        slot_id: SlotId,
    },
    /// Slot id is blank.
    #[error("slot on floor {floor_id} has an empty id")]
    EmptySlotId {
        /// Floor holding the slot.
        floor_id: FloorId,
    },
    /// Entrance name is blank.
    #[error("slot {slot_id} has an empty entrance name")]
    EmptyEntrance {
        /// Offending slot.
        slot_id: SlotId,
    },
    /// Distance is negative or not finite.
    #[error("slot {slot_id} distance to {entrance} must be finite and non-negative, got {value}")]
    InvalidDistance {
        /// Offending slot.
        slot_id: SlotId,
        /// Entrance of the bad entry.
        entrance: EntranceId,
        /// Offending value.
        value: f64,
    },
    /// Slot registration failed while building a floor.
    #[error(transparent)]
    Floor(#[from] FloorError),
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, reason = "Test-only assertions are permitted.")]

    use std::collections::BTreeMap;

    use super::FloorLayout;
    use super::LayoutError;
    use super::LotLayout;
    use super::SlotLayout;
    use crate::core::identifiers::EntranceId;
    use crate::core::identifiers::FloorId;
    use crate::core::size::SizeClass;

    fn slot(id: &str, distance: f64) -> SlotLayout {
        let mut distances = BTreeMap::new();
        distances.insert(EntranceId::new("E1"), distance);
        SlotLayout {
            id: id.into(),
            size_class: SizeClass::Small,
            distances,
        }
    }

    fn floor(id: u32, slots: Vec<SlotLayout>) -> FloorLayout {
        FloorLayout {
            id: FloorId::new(id),
            name: None,
            slots,
        }
    }

    #[test]
    fn build_floors_keys_by_id() {
        let layout = LotLayout {
            name: "Central".to_string(),
            floors: vec![floor(2, vec![slot("B", 1.0)]), floor(1, vec![slot("A", 2.0)])],
        };
        let floors = layout.build_floors().unwrap();
        let ids: Vec<u32> = floors.keys().map(|id| id.get()).collect();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(layout.slot_count(), 2);
    }

    #[test]
    fn validate_rejects_duplicates_across_floors() {
        let layout = LotLayout {
            name: "Central".to_string(),
            floors: vec![floor(1, vec![slot("A", 1.0)]), floor(2, vec![slot("A", 1.0)])],
        };
        assert!(matches!(layout.validate(), Err(LayoutError::DuplicateSlot { .. })));

        let layout = LotLayout {
            name: "Central".to_string(),
            floors: vec![floor(1, vec![]), floor(1, vec![])],
        };
        assert!(matches!(layout.validate(), Err(LayoutError::DuplicateFloor { .. })));
    }

    #[test]
    fn validate_rejects_bad_distances_and_names() {
        let layout = LotLayout {
            name: "Central".to_string(),
            floors: vec![floor(1, vec![slot("A", -1.0)])],
        };
        assert!(matches!(layout.validate(), Err(LayoutError::InvalidDistance { .. })));

        let layout = LotLayout {
            name: "Central".to_string(),
            floors: vec![floor(1, vec![slot("A", f64::INFINITY)])],
        };
        assert!(matches!(layout.validate(), Err(LayoutError::InvalidDistance { .. })));

        let layout = LotLayout {
            name: "  ".to_string(),
            floors: vec![floor(1, vec![])],
        };
        assert_eq!(layout.validate(), Err(LayoutError::EmptyName));

        let layout = LotLayout {
            name: "Central".to_string(),
            floors: Vec::new(),
        };
        assert_eq!(layout.validate(), Err(LayoutError::NoFloors));
    }
}

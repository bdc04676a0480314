// crates/parking-core/src/core/floor.rs
// ============================================================================
// Module: Parking Floors
// Description: Slots grouped by size class with floor-scoped nearest-fit search.
// Purpose: Pick the best free slot on one floor for an arriving vehicle.
// Dependencies: crate::core::{identifiers, size, slot, vehicle}, serde, thiserror
// ============================================================================

//! ## Overview
//! A [`Floor`] owns its slots, keyed by size class and kept in registration
//! order. Candidate slots for a vehicle are the concatenation of every class
//! at or above the vehicle's class, tightest class first. Selection picks the
//! minimum distance to the requested entrance; ties keep the earlier
//! candidate, so an exact-class slot wins a tie against a larger one.
//!
//! ## Invariants
//! - Every slot held by a floor carries that floor's identifier.
//! - A slot is stored under its own size class.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::core::identifiers::EntranceId;
use crate::core::identifiers::FloorId;
use crate::core::identifiers::SlotId;
use crate::core::identifiers::VehicleId;
use crate::core::size::SizeClass;
use crate::core::slot::Distance;
use crate::core::slot::Slot;
use crate::core::slot::SlotError;
use crate::core::vehicle::Vehicle;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Slot selection policy applied within a floor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FitPolicy {
    /// Minimum distance across all compatible classes; class order breaks ties.
    #[default]
    NearestFit,
    /// Tightest class with any free slot first, then minimum distance within it.
    TightestFit,
}

impl FitPolicy {
    /// Returns the config label of the policy.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NearestFit => "nearest_fit",
            Self::TightestFit => "tightest_fit",
        }
    }
}

/// Result of a successful floor assignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    /// Floor that hosts the slot.
    pub floor_id: FloorId,
    /// Assigned slot.
    pub slot_id: SlotId,
    /// Size class of the assigned slot.
    pub slot_class: SizeClass,
    /// Distance from the requested entrance.
    pub distance: Distance,
}

/// Free and total slot counts for one size class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassAvailability {
    /// Unoccupied slots.
    pub free: usize,
    /// All slots.
    pub total: usize,
}

/// One floor of the lot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Floor {
    /// Floor identifier.
    id: FloorId,
    /// Optional display name.
    name: Option<String>,
    /// Slots by size class, each in registration order.
    slots: BTreeMap<SizeClass, Vec<Slot>>,
}

// ============================================================================
// SECTION: Floor Operations
// ============================================================================

impl Floor {
    /// Creates an empty floor.
    #[must_use]
    pub const fn new(id: FloorId, name: Option<String>) -> Self {
        Self {
            id,
            name,
            slots: BTreeMap::new(),
        }
    }

    /// Returns the floor identifier.
    #[must_use]
    pub const fn id(&self) -> FloorId {
        self.id
    }

    /// Returns the display name, if configured.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Appends a slot to the sequence for `size_class`. Setup only.
    ///
    /// # Errors
    ///
    /// Returns [`FloorError`] when the slot belongs to another floor, was
    /// built with a different class, or reuses an identifier on this floor.
    pub fn register_slot(&mut self, slot: Slot, size_class: SizeClass) -> Result<(), FloorError> {
        if slot.floor_id() != self.id {
            return Err(FloorError::FloorMismatch {
                slot_id: slot.id().clone(),
                expected: self.id,
                actual: slot.floor_id(),
            });
        }
        if slot.size_class() != size_class {
            return Err(FloorError::ClassMismatch {
                slot_id: slot.id().clone(),
                declared: size_class,
                actual: slot.size_class(),
            });
        }
        if self.slot(slot.id()).is_some() {
            return Err(FloorError::DuplicateSlot {
                floor_id: self.id,
                slot_id: slot.id().clone(),
            });
        }
        self.slots.entry(size_class).or_default().push(slot);
        Ok(())
    }

    /// Iterates every slot, ascending class then registration order.
    pub fn slots(&self) -> impl Iterator<Item = &Slot> {
        self.slots.values().flatten()
    }

    /// Looks up a slot by identifier.
    #[must_use]
    pub fn slot(&self, slot_id: &SlotId) -> Option<&Slot> {
        self.slots().find(|slot| slot.id() == slot_id)
    }

    /// Returns the slots a vehicle may use, tightest class first.
    #[must_use]
    pub fn candidate_slots(&self, vehicle: &Vehicle) -> Vec<&Slot> {
        self.slots.range(vehicle.size_class() ..).flat_map(|(_, slots)| slots.iter()).collect()
    }

    /// Assigns the best free candidate slot for `vehicle` arriving at `entrance`.
    ///
    /// Returns `Ok(None)` when no candidate is free.
    ///
    /// # Errors
    ///
    /// Returns [`FloorError`] when the chosen slot cannot be found again or
    /// refuses the vehicle, which means the candidate filter and the slot
    /// disagree.
    pub fn assign_best(
        &mut self,
        vehicle: &Vehicle,
        entrance: &EntranceId,
        policy: FitPolicy,
    ) -> Result<Option<Placement>, FloorError> {
        let Some(candidate) = self.best_candidate(vehicle, entrance, policy) else {
            return Ok(None);
        };
        let floor_id = self.id;
        let slot = self
            .slots
            .get_mut(&candidate.class)
            .and_then(|slots| slots.get_mut(candidate.index))
            .filter(|slot| *slot.id() == candidate.slot_id)
            .ok_or_else(|| FloorError::SlotNotFound {
                floor_id,
                slot_id: candidate.slot_id.clone(),
            })?;
        slot.assign(vehicle)?;
        Ok(Some(Placement {
            floor_id,
            slot_id: candidate.slot_id,
            slot_class: slot.size_class(),
            distance: candidate.distance,
        }))
    }

    /// Frees the slot occupied by `vehicle_id`.
    ///
    /// # Errors
    ///
    /// Returns [`FloorError::VehicleNotFound`] when no slot on this floor holds
    /// the vehicle.
    pub fn release_vehicle(&mut self, vehicle_id: &VehicleId) -> Result<SlotId, FloorError> {
        let floor_id = self.id;
        let slot = self
            .slots
            .values_mut()
            .flatten()
            .find(|slot| slot.occupant() == Some(vehicle_id))
            .ok_or_else(|| FloorError::VehicleNotFound {
                floor_id,
                vehicle_id: vehicle_id.clone(),
            })?;
        slot.release()?;
        Ok(slot.id().clone())
    }

    /// Frees a specific slot and returns the vehicle that was parked there.
    ///
    /// # Errors
    ///
    /// Returns [`FloorError::SlotNotFound`] for an unknown slot and
    /// [`FloorError::Slot`] when the slot is already free.
    pub fn release_slot(&mut self, slot_id: &SlotId) -> Result<VehicleId, FloorError> {
        let floor_id = self.id;
        let slot = self.slots.values_mut().flatten().find(|slot| slot.id() == slot_id).ok_or_else(
            || FloorError::SlotNotFound {
                floor_id,
                slot_id: slot_id.clone(),
            },
        )?;
        Ok(slot.release()?)
    }

    /// Returns free/total counts per size class present on this floor.
    #[must_use]
    pub fn availability(&self) -> BTreeMap<SizeClass, ClassAvailability> {
        self.slots
            .iter()
            .map(|(class, slots)| {
                let free = slots.iter().filter(|slot| !slot.is_occupied()).count();
                (*class, ClassAvailability {
                    free,
                    total: slots.len(),
                })
            })
            .collect()
    }

    /// Returns the number of slots on this floor.
    #[must_use]
    pub fn slot_count(&self) -> usize {
        self.slots.values().map(Vec::len).sum()
    }

    /// Returns the number of occupied slots on this floor.
    #[must_use]
    pub fn occupied_count(&self) -> usize {
        self.slots().filter(|slot| slot.is_occupied()).count()
    }

    /// Finds the winning candidate under `policy`.
    fn best_candidate(
        &self,
        vehicle: &Vehicle,
        entrance: &EntranceId,
        policy: FitPolicy,
    ) -> Option<Candidate> {
        let mut best: Option<Candidate> = None;
        for (class, slots) in self.slots.range(vehicle.size_class() ..) {
            for (index, slot) in slots.iter().enumerate() {
                if !slot.can_fit(vehicle) {
                    continue;
                }
                let distance = slot.distance_to(entrance);
                // Strictly closer only: ties stay with the earlier candidate.
                if best.as_ref().is_none_or(|current| distance.compare(current.distance).is_lt()) {
                    best = Some(Candidate {
                        class: *class,
                        index,
                        slot_id: slot.id().clone(),
                        distance,
                    });
                }
            }
            if policy == FitPolicy::TightestFit && best.is_some() {
                break;
            }
        }
        best
    }
}

/// Winning slot of a candidate search.
struct Candidate {
    /// Class sequence holding the slot.
    class: SizeClass,
    /// Position within the class sequence.
    index: usize,
    /// Slot identifier.
    slot_id: SlotId,
    /// Distance from the requested entrance.
    distance: Distance,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Floor-scoped lookup and registration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FloorError {
    /// Slot identifier is not on this floor.
    #[error("slot {slot_id} not found on floor {floor_id}")]
    SlotNotFound {
        /// Floor that was searched.
        floor_id: FloorId,
        /// Missing slot.
        slot_id: SlotId,
    },
    /// No slot on this floor holds the vehicle.
    #[error("vehicle {vehicle_id} not found on floor {floor_id}")]
    VehicleNotFound {
        /// Floor that was searched.
        floor_id: FloorId,
        /// Missing vehicle.
        vehicle_id: VehicleId,
    },
    /// Slot was built for a different floor.
    #[error("slot {slot_id} belongs to floor {actual}, not {expected}")]
    FloorMismatch {
        /// Offending slot.
        slot_id: SlotId,
        /// Floor receiving the slot.
        expected: FloorId,
        /// Floor recorded on the slot.
        actual: FloorId,
    },
    /// Slot registered under a class other than its own.
    #[error("slot {slot_id} has class {actual} but was registered as {declared}")]
    ClassMismatch {
        /// Offending slot.
        slot_id: SlotId,
        /// Class passed at registration.
        declared: SizeClass,
        /// Class recorded on the slot.
        actual: SizeClass,
    },
    /// Slot identifier already registered on this floor.
    #[error("duplicate slot {slot_id} on floor {floor_id}")]
    DuplicateSlot {
        /// Floor receiving the slot.
        floor_id: FloorId,
        /// Repeated slot identifier.
        slot_id: SlotId,
    },
    /// Underlying slot transition failed.
    #[error(transparent)]
    Slot(#[from] SlotError),
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests;

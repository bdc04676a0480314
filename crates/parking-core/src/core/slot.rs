// crates/parking-core/src/core/slot.rs
// ============================================================================
// Module: Parking Slots
// Description: Single physical parking space and its occupancy state.
// Purpose: Guard per-slot occupancy transitions and distance lookups.
// Dependencies: crate::core::{identifiers, size, vehicle}, serde, thiserror
// ============================================================================

//! ## Overview
//! A [`Slot`] is owned by exactly one floor. Occupancy is stored as an
//! optional occupant, so "occupied" and "has an occupant" cannot disagree.
//! Assignment and release fail loudly instead of silently no-oping: the lot
//! treats any slot failure as a broken invariant in its own search.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::core::identifiers::EntranceId;
use crate::core::identifiers::FloorId;
use crate::core::identifiers::SlotId;
use crate::core::identifiers::VehicleId;
use crate::core::size::SizeClass;
use crate::core::vehicle::Vehicle;

// ============================================================================
// SECTION: Distance
// ============================================================================

/// Distance from a slot to a named entrance.
///
/// # Invariants
/// - `Known` values are finite and non-negative (enforced by layout validation).
/// - `Unknown` ranks after every known distance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Distance {
    /// Configured distance.
    Known(f64),
    /// The slot has no distance entry for the entrance.
    Unknown,
}

impl Distance {
    /// Returns the ranking value, with unknown treated as infinitely far.
    #[must_use]
    pub const fn rank(self) -> f64 {
        match self {
            Self::Known(value) => value,
            Self::Unknown => f64::INFINITY,
        }
    }

    /// Returns the configured value when known.
    #[must_use]
    pub const fn known(self) -> Option<f64> {
        match self {
            Self::Known(value) => Some(value),
            Self::Unknown => None,
        }
    }

    /// Total ordering by rank.
    #[must_use]
    pub fn compare(self, other: Self) -> Ordering {
        self.rank().total_cmp(&other.rank())
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Known(value) => value.fmt(f),
            Self::Unknown => f.write_str("unknown"),
        }
    }
}

// ============================================================================
// SECTION: Slot
// ============================================================================

/// Single physical parking space.
///
/// # Invariants
/// - `occupant.is_some()` is the occupancy flag.
/// - A vehicle only occupies the slot if its class fits the slot class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slot {
    /// Slot identifier, unique within the lot.
    id: SlotId,
    /// Floor that owns this slot.
    floor_id: FloorId,
    /// Largest vehicle class the slot hosts.
    size_class: SizeClass,
    /// Distance per entrance; may be empty.
    distances: BTreeMap<EntranceId, f64>,
    /// Vehicle currently parked here.
    occupant: Option<VehicleId>,
}

impl Slot {
    /// Creates a free slot.
    #[must_use]
    pub fn new(
        id: impl Into<SlotId>,
        floor_id: FloorId,
        size_class: SizeClass,
        distances: BTreeMap<EntranceId, f64>,
    ) -> Self {
        Self {
            id: id.into(),
            floor_id,
            size_class,
            distances,
            occupant: None,
        }
    }

    /// Returns the slot identifier.
    #[must_use]
    pub const fn id(&self) -> &SlotId {
        &self.id
    }

    /// Returns the owning floor.
    #[must_use]
    pub const fn floor_id(&self) -> FloorId {
        self.floor_id
    }

    /// Returns the slot size class.
    #[must_use]
    pub const fn size_class(&self) -> SizeClass {
        self.size_class
    }

    /// Returns the per-entrance distance table.
    #[must_use]
    pub const fn distances(&self) -> &BTreeMap<EntranceId, f64> {
        &self.distances
    }

    /// Returns the current occupant, if any.
    #[must_use]
    pub const fn occupant(&self) -> Option<&VehicleId> {
        self.occupant.as_ref()
    }

    /// Returns true when a vehicle is parked here.
    #[must_use]
    pub const fn is_occupied(&self) -> bool {
        self.occupant.is_some()
    }

    /// Returns true when the slot is free and large enough for `vehicle`.
    #[must_use]
    pub fn can_fit(&self, vehicle: &Vehicle) -> bool {
        !self.is_occupied() && vehicle.size_class().fits_in(self.size_class)
    }

    /// Parks `vehicle` in this slot.
    ///
    /// # Errors
    ///
    /// Returns [`SlotError::SlotUnavailable`] when the slot is occupied or too
    /// small; the slot is left unchanged.
    pub fn assign(&mut self, vehicle: &Vehicle) -> Result<(), SlotError> {
        if !self.can_fit(vehicle) {
            return Err(SlotError::SlotUnavailable {
                slot_id: self.id.clone(),
                vehicle_id: vehicle.id().clone(),
            });
        }
        self.occupant = Some(vehicle.id().clone());
        Ok(())
    }

    /// Frees the slot and returns the vehicle that was parked.
    ///
    /// # Errors
    ///
    /// Returns [`SlotError::SlotNotOccupied`] when the slot is already free.
    pub fn release(&mut self) -> Result<VehicleId, SlotError> {
        self.occupant.take().ok_or_else(|| SlotError::SlotNotOccupied {
            slot_id: self.id.clone(),
        })
    }

    /// Returns the distance to `entrance`, or [`Distance::Unknown`].
    #[must_use]
    pub fn distance_to(&self, entrance: &EntranceId) -> Distance {
        self.distances.get(entrance).copied().map_or(Distance::Unknown, Distance::Known)
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Slot-level occupancy errors.
///
/// Seeing one of these through the lot means the lot's own bookkeeping broke.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SlotError {
    /// The slot is occupied or too small for the vehicle.
    #[error("slot {slot_id} unavailable for vehicle {vehicle_id}")]
    SlotUnavailable {
        /// Slot that rejected the assignment.
        slot_id: SlotId,
        /// Vehicle that was being parked.
        vehicle_id: VehicleId,
    },
    /// The slot was released while already free.
    #[error("slot {slot_id} is not occupied")]
    SlotNotOccupied {
        /// Slot that was already free.
        slot_id: SlotId,
    },
}

// ============================================================================
// SECTION: Tests
// ============================================================================

// crates/parking-core/src/core/vehicle.rs
// ============================================================================
// Module: Vehicles
// Description: Immutable vehicle descriptors presented at the gate.
// Purpose: Pair a vehicle identifier with the size class it requires.
// Dependencies: crate::core::{identifiers, size}, serde
// ============================================================================

//! ## Overview
//! Vehicles are plain values: the lot never owns them and refers to them by
//! [`VehicleId`] once parked.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::core::identifiers::VehicleId;
use crate::core::size::SizeClass;
use crate::core::size::VehicleKind;

// ============================================================================
// SECTION: Vehicle
// ============================================================================

/// Vehicle requesting a slot.
///
/// # Invariants
/// - Immutable after construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Vehicle {
    /// Vehicle identifier.
    id: VehicleId,
    /// Minimum slot class the vehicle needs.
    size_class: SizeClass,
}

impl Vehicle {
    /// Creates a vehicle with an explicit size class.
    #[must_use]
    pub fn new(id: impl Into<VehicleId>, size_class: SizeClass) -> Self {
        Self {
            id: id.into(),
            size_class,
        }
    }

    /// Creates a vehicle from its kind.
    #[must_use]
    pub fn of_kind(id: impl Into<VehicleId>, kind: VehicleKind) -> Self {
        Self::new(id, kind.size_class())
    }

    /// Returns the vehicle identifier.
    #[must_use]
    pub const fn id(&self) -> &VehicleId {
        &self.id
    }

    /// Returns the vehicle size class.
    #[must_use]
    pub const fn size_class(&self) -> SizeClass {
        self.size_class
    }
}

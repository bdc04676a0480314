// crates/parking-core/src/core/size.rs
// ============================================================================
// Module: Size Classes
// Description: Ordered slot/vehicle size classes and vehicle kinds.
// Purpose: Express size compatibility as a single total order.
// Dependencies: serde, thiserror
// ============================================================================

//! ## Overview
//! A vehicle of class `V` fits any slot of class `S` where `V <= S`. The
//! ordering is the declaration order of [`SizeClass`] and never changes at
//! runtime. [`VehicleKind`] maps the everyday vehicle categories used at the
//! gates onto exactly one size class each.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Size Class
// ============================================================================

/// Discrete size category shared by slots and vehicles.
///
/// # Invariants
/// - Variant order is the compatibility order: `TwoWheeler < Small < Medium < Large`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SizeClass {
    /// Bikes and scooters.
    TwoWheeler,
    /// Compact cars.
    Small,
    /// Mid-size cars and SUVs.
    Medium,
    /// Vans and trucks.
    Large,
}

impl SizeClass {
    /// All size classes in ascending order.
    pub const ALL: [Self; 4] = [Self::TwoWheeler, Self::Small, Self::Medium, Self::Large];

    /// Returns a stable lowercase label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TwoWheeler => "two_wheeler",
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
        }
    }

    /// Returns true when a vehicle of class `self` fits a slot of class `slot`.
    #[must_use]
    pub fn fits_in(self, slot: Self) -> bool {
        self <= slot
    }

    /// Returns the classes a vehicle of this class may occupy, tightest first.
    pub fn compatible_slots(self) -> impl Iterator<Item = Self> {
        Self::ALL.into_iter().filter(move |slot| self.fits_in(*slot))
    }
}

impl fmt::Display for SizeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SizeClass {
    type Err = ParseSizeError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match normalize(value).as_str() {
            "two_wheeler" | "twowheeler" => Ok(Self::TwoWheeler),
            "small" => Ok(Self::Small),
            "medium" => Ok(Self::Medium),
            "large" => Ok(Self::Large),
            _ => Err(ParseSizeError::UnknownSizeClass(value.to_string())),
        }
    }
}

// ============================================================================
// SECTION: Vehicle Kind
// ============================================================================

/// Everyday vehicle category reported at the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VehicleKind {
    /// Bicycle or motorbike.
    Bike,
    /// Sedan or hatchback.
    Sedan,
    /// Sport utility vehicle.
    Suv,
    /// Truck or van.
    Truck,
}

impl VehicleKind {
    /// Returns the size class a vehicle of this kind requires.
    #[must_use]
    pub const fn size_class(self) -> SizeClass {
        match self {
            Self::Bike => SizeClass::TwoWheeler,
            Self::Sedan => SizeClass::Small,
            Self::Suv => SizeClass::Medium,
            Self::Truck => SizeClass::Large,
        }
    }
}

impl FromStr for VehicleKind {
    type Err = ParseSizeError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match normalize(value).as_str() {
            "bike" => Ok(Self::Bike),
            "sedan" => Ok(Self::Sedan),
            "suv" => Ok(Self::Suv),
            "truck" => Ok(Self::Truck),
            _ => Err(ParseSizeError::UnknownVehicleKind(value.to_string())),
        }
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised when parsing size classes or vehicle kinds from text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseSizeError {
    /// Size class label is not recognized.
    #[error("unknown size class: {0}")]
    UnknownSizeClass(String),
    /// Vehicle kind label is not recognized.
    #[error("unknown vehicle kind: {0}")]
    UnknownVehicleKind(String),
}

/// Lowercases and unifies separators so `TWO-WHEELER` parses like `two_wheeler`.
fn normalize(value: &str) -> String {
    value.trim().to_ascii_lowercase().replace('-', "_")
}

// ============================================================================
// SECTION: Tests
// ============================================================================

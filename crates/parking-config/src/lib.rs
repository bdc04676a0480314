// crates/parking-config/src/lib.rs
// ============================================================================
// Module: Parking Config Library
// Description: Canonical lot config model, validation, and example.
// Purpose: Single source of truth for parking-lot.toml semantics.
// Dependencies: parking-core, serde, toml
// ============================================================================

//! ## Overview
//! `parking-config` defines the configuration model for a parking lot
//! deployment. Validation is strict and fail-closed; a validated config can
//! build a ready [`parking_core::ParkingLot`].

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;
pub mod examples;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::*;
pub use examples::config_toml_example;

// crates/parking-core/src/core/mod.rs
// ============================================================================
// Module: Parking Core Types
// Description: Canonical slot, floor, ticket, and pricing structures.
// Purpose: Provide stable, serializable types for the allocation engine.
// Dependencies: serde, thiserror
// ============================================================================

//! ## Overview
//! Core types model the physical lot (slots grouped into floors), the
//! vehicles that occupy it, and the tickets that record each occupancy.
//! These types carry the per-slot and per-ticket invariants; the lot-wide
//! invariants are enforced by [`crate::runtime::ParkingLot`].

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod floor;
pub mod identifiers;
pub mod layout;
pub mod pricing;
pub mod size;
pub mod slot;
pub mod ticket;
pub mod time;
pub mod vehicle;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use floor::ClassAvailability;
pub use floor::FitPolicy;
pub use floor::Floor;
pub use floor::FloorError;
pub use floor::Placement;
pub use identifiers::EntranceId;
pub use identifiers::FloorId;
pub use identifiers::SlotId;
pub use identifiers::TicketId;
pub use identifiers::VehicleId;
pub use layout::FloorLayout;
pub use layout::LayoutError;
pub use layout::LotLayout;
pub use layout::SlotLayout;
pub use pricing::RateCard;
pub use pricing::RateCardError;
pub use pricing::Surcharges;
pub use size::ParseSizeError;
pub use size::SizeClass;
pub use size::VehicleKind;
pub use slot::Distance;
pub use slot::Slot;
pub use slot::SlotError;
pub use ticket::Ticket;
pub use ticket::TicketError;
pub use ticket::TicketIssue;
pub use ticket::TicketStatus;
pub use self::time::Timestamp;
pub use vehicle::Vehicle;

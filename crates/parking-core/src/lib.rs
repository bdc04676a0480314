// crates/parking-core/src/lib.rs
// ============================================================================
// Module: Parking Core Library
// Description: Public API surface for the parking allocation engine.
// Purpose: Expose domain types, interfaces, and the allocation runtime.
// Dependencies: crate::{core, interfaces, runtime}
// ============================================================================

//! ## Overview
//! Parking core tracks a finite set of slots partitioned across floors,
//! assigns the best compatible slot to arriving vehicles, issues tickets for
//! each assignment, and prices tickets by elapsed duration on release.
//!
//! All state lives in one [`ParkingLot`] instance that callers construct once
//! and share by reference. Every mutation runs under a single lot-wide lock.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod core;
pub mod interfaces;
pub mod runtime;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use crate::core::*;

pub use interfaces::Clock;
pub use interfaces::LotAuditSink;
pub use runtime::AssignOutcome;
pub use runtime::FileAuditSink;
pub use runtime::InMemoryAuditSink;
pub use runtime::LotAuditEvent;
pub use runtime::LotAuditKind;
pub use runtime::LotError;
pub use runtime::LotPolicy;
pub use runtime::LotSummary;
pub use runtime::ManualClock;
pub use runtime::NoopAuditSink;
pub use runtime::ParkingLot;
pub use runtime::ReleaseReceipt;
pub use runtime::SharedAuditSink;
pub use runtime::StderrAuditSink;
pub use runtime::SystemClock;

// crates/parking-core/src/runtime/mod.rs
// ============================================================================
// Module: Parking Runtime
// Description: Allocation engine, clocks, and audit sinks.
// Purpose: Run lot operations against injected time and audit backends.
// Dependencies: crate::{core, interfaces}, serde_json, time
// ============================================================================

//! ## Overview
//! Runtime modules hold the stateful parts of the system. Every caller, the
//! CLI included, goes through [`ParkingLot`] so the lot-wide invariants have
//! a single enforcement point.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod audit;
pub mod clock;
pub mod engine;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use audit::FileAuditSink;
pub use audit::InMemoryAuditSink;
pub use audit::LotAuditEvent;
pub use audit::LotAuditKind;
pub use audit::NoopAuditSink;
pub use audit::SharedAuditSink;
pub use audit::StderrAuditSink;
pub use clock::ManualClock;
pub use clock::SystemClock;
pub use engine::AssignOutcome;
pub use engine::LotError;
pub use engine::LotPolicy;
pub use engine::LotSummary;
pub use engine::ParkingLot;
pub use engine::ReleaseReceipt;

// crates/parking-core/src/interfaces/mod.rs
// ============================================================================
// Module: Parking Interfaces
// Description: Seams between the allocation engine and its environment.
// Purpose: Inject time and audit output without binding the engine to a backend.
// Dependencies: crate::core, crate::runtime::audit
// ============================================================================

//! ## Overview
//! The engine reads time through [`Clock`] and reports activity through
//! [`LotAuditSink`]. Both are shared across threads, so implementations
//! must be `Send + Sync`. Audit sinks must never fail the operation that
//! produced the event.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use crate::core::time::Timestamp;
use crate::runtime::audit::LotAuditEvent;

// ============================================================================
// SECTION: Clock
// ============================================================================

/// Source of timestamps for ticket issue and close.
pub trait Clock: Send + Sync {
    /// Returns the current instant.
    fn now(&self) -> Timestamp;
}

impl<T: Clock + ?Sized> Clock for Arc<T> {
    fn now(&self) -> Timestamp {
        (**self).now()
    }
}

// ============================================================================
// SECTION: Audit Sink
// ============================================================================

/// Receiver of structured lot audit events.
pub trait LotAuditSink: Send + Sync {
    /// Records an audit event. Failures are swallowed by the sink.
    fn record(&self, event: &LotAuditEvent);
}

impl<T: LotAuditSink + ?Sized> LotAuditSink for Arc<T> {
    fn record(&self, event: &LotAuditEvent) {
        (**self).record(event);
    }
}

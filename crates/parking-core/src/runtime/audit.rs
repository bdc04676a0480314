// crates/parking-core/src/runtime/audit.rs
// ============================================================================
// Module: Lot Audit Logging
// Description: Structured audit events for allocation engine activity.
// Purpose: Emit JSON-lines audit records without a logging framework.
// Dependencies: crate::core, crate::interfaces, serde, serde_json
// ============================================================================

//! ## Overview
//! Every state change in the lot produces one [`LotAuditEvent`]. Sinks
//! serialize events as single JSON lines so deployments can route them to
//! their own pipeline. Sinks swallow their own I/O failures; auditing never
//! fails an assignment or release.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::File;
use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use std::sync::Mutex;

use serde::Deserialize;
use serde::Serialize;

use crate::core::identifiers::EntranceId;
use crate::core::identifiers::FloorId;
use crate::core::identifiers::SlotId;
use crate::core::identifiers::TicketId;
use crate::core::identifiers::VehicleId;
use crate::core::size::SizeClass;
use crate::core::time::Timestamp;
use crate::interfaces::LotAuditSink;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Audit event kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LotAuditKind {
    /// Lot was configured from a layout.
    LotConfigured,
    /// Vehicle was assigned a slot.
    TicketIssued,
    /// No compatible free slot existed.
    NoCapacity,
    /// Ticket was closed and priced.
    TicketClosed,
    /// Arrival was refused with a caller error.
    AssignRejected,
    /// Release was refused with a caller error.
    ReleaseRejected,
    /// Engine bookkeeping disagreed with slot state.
    InvariantViolation,
    /// Floor was added at runtime.
    FloorAdded,
    /// Floor was removed at runtime.
    FloorRemoved,
}

/// Lot audit event payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LotAuditEvent {
    /// Event kind.
    pub event: LotAuditKind,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: i64,
    /// Lot name.
    pub lot: String,
    /// Ticket involved, when any.
    pub ticket_id: Option<TicketId>,
    /// Vehicle involved, when any.
    pub vehicle_id: Option<VehicleId>,
    /// Vehicle size class, when known.
    pub vehicle_class: Option<SizeClass>,
    /// Slot involved, when any.
    pub slot_id: Option<SlotId>,
    /// Slot size class, when known.
    pub slot_class: Option<SizeClass>,
    /// Floor involved, when any.
    pub floor_id: Option<FloorId>,
    /// Arrival entrance, when any.
    pub entrance: Option<EntranceId>,
    /// Final price for closed tickets.
    pub price: Option<f64>,
    /// Billed duration for closed tickets.
    pub duration_hours: Option<f64>,
    /// Free-form reason for rejections and violations.
    pub reason: Option<String>,
}

impl LotAuditEvent {
    /// Creates an event with only kind, time, and lot populated.
    #[must_use]
    pub fn new(event: LotAuditKind, at: Timestamp, lot: impl Into<String>) -> Self {
        Self {
            event,
            timestamp_ms: at.as_unix_millis(),
            lot: lot.into(),
            ticket_id: None,
            vehicle_id: None,
            vehicle_class: None,
            slot_id: None,
            slot_class: None,
            floor_id: None,
            entrance: None,
            price: None,
            duration_hours: None,
            reason: None,
        }
    }

    /// Sets the ticket.
    #[must_use]
    pub const fn with_ticket(mut self, ticket_id: TicketId) -> Self {
        self.ticket_id = Some(ticket_id);
        self
    }

    /// Sets the vehicle and its class.
    #[must_use]
    pub fn with_vehicle(mut self, vehicle_id: VehicleId, class: Option<SizeClass>) -> Self {
        self.vehicle_id = Some(vehicle_id);
        self.vehicle_class = class;
        self
    }

    /// Sets the slot, its class, and its floor.
    #[must_use]
    pub fn with_slot(mut self, slot_id: SlotId, class: SizeClass, floor_id: FloorId) -> Self {
        self.slot_id = Some(slot_id);
        self.slot_class = Some(class);
        self.floor_id = Some(floor_id);
        self
    }

    /// Sets the floor only.
    #[must_use]
    pub const fn with_floor(mut self, floor_id: FloorId) -> Self {
        self.floor_id = Some(floor_id);
        self
    }

    /// Sets the arrival entrance.
    #[must_use]
    pub fn with_entrance(mut self, entrance: EntranceId) -> Self {
        self.entrance = Some(entrance);
        self
    }

    /// Sets the billing outcome.
    #[must_use]
    pub const fn with_billing(mut self, duration_hours: f64, price: f64) -> Self {
        self.duration_hours = Some(duration_hours);
        self.price = Some(price);
        self
    }

    /// Sets the reason text.
    #[must_use]
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }
}

// ============================================================================
// SECTION: Sinks
// ============================================================================

/// Audit sink that logs JSON lines to stderr.
pub struct StderrAuditSink;

impl LotAuditSink for StderrAuditSink {
    fn record(&self, event: &LotAuditEvent) {
        if let Ok(payload) = serde_json::to_string(event) {
            let _ = writeln!(io::stderr(), "{payload}");
        }
    }
}

/// Audit sink that appends JSON lines to a file.
pub struct FileAuditSink {
    /// File handle used for append-only logging.
    file: Mutex<File>,
}

impl FileAuditSink {
    /// Opens the audit log file in append mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened.
    pub fn new(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }
}

impl LotAuditSink for FileAuditSink {
    fn record(&self, event: &LotAuditEvent) {
        if let Ok(payload) = serde_json::to_string(event)
            && let Ok(mut file) = self.file.lock()
        {
            let _ = writeln!(file, "{payload}");
            let _ = file.flush();
        }
    }
}

/// No-op audit sink.
pub struct NoopAuditSink;

impl LotAuditSink for NoopAuditSink {
    fn record(&self, _event: &LotAuditEvent) {}
}

/// Audit sink that keeps events in memory for inspection.
#[derive(Default)]
pub struct InMemoryAuditSink {
    /// Recorded events in emission order.
    events: Mutex<Vec<LotAuditEvent>>,
}

impl InMemoryAuditSink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of recorded events.
    #[must_use]
    pub fn events(&self) -> Vec<LotAuditEvent> {
        self.events.lock().map(|events| events.clone()).unwrap_or_default()
    }

    /// Returns the recorded event kinds in order.
    #[must_use]
    pub fn kinds(&self) -> Vec<LotAuditKind> {
        self.events().iter().map(|event| event.event).collect()
    }
}

impl LotAuditSink for InMemoryAuditSink {
    fn record(&self, event: &LotAuditEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event.clone());
        }
    }
}

/// Clonable handle over any audit sink.
#[derive(Clone)]
pub struct SharedAuditSink {
    /// Shared sink implementation.
    inner: Arc<dyn LotAuditSink>,
}

impl SharedAuditSink {
    /// Wraps a sink for sharing.
    #[must_use]
    pub fn new(sink: impl LotAuditSink + 'static) -> Self {
        Self {
            inner: Arc::new(sink),
        }
    }
}

impl LotAuditSink for SharedAuditSink {
    fn record(&self, event: &LotAuditEvent) {
        self.inner.record(event);
    }
}

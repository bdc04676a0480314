// crates/parking-core/src/core/ticket.rs
// ============================================================================
// Module: Parking Tickets
// Description: Record of one vehicle's stay in one slot.
// Purpose: Track the open/closed lifecycle and the final price.
// Dependencies: crate::core::{identifiers, pricing, size, time}, serde, thiserror
// ============================================================================

//! ## Overview
//! A ticket is issued on assignment and closed exactly once on release.
//! Closing fixes the end instant and the price; afterwards the ticket is an
//! immutable ledger entry.
//!
//! ## Invariants
//! - `Closed` implies `end_time` and `price` are set.
//! - `end_time >= start_time`; a clock that moved backwards yields a zero
//!   duration rather than a negative one.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::core::identifiers::EntranceId;
use crate::core::identifiers::FloorId;
use crate::core::identifiers::SlotId;
use crate::core::identifiers::TicketId;
use crate::core::identifiers::VehicleId;
use crate::core::pricing::RateCard;
use crate::core::size::SizeClass;
use crate::core::time::Timestamp;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Ticket lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketStatus {
    /// Vehicle is parked.
    Open,
    /// Vehicle has left and the ticket is priced.
    Closed,
}

/// Parking ticket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticket {
    /// Ticket identifier, unique within the lot.
    id: TicketId,
    /// Parked vehicle.
    vehicle_id: VehicleId,
    /// Class the vehicle requested.
    vehicle_class: SizeClass,
    /// Slot the vehicle occupies.
    slot_id: SlotId,
    /// Class of the occupied slot; drives pricing.
    slot_class: SizeClass,
    /// Floor hosting the slot.
    floor_id: FloorId,
    /// Entrance the vehicle arrived at.
    entrance: EntranceId,
    /// Issue instant.
    start_time: Timestamp,
    /// Close instant.
    end_time: Option<Timestamp>,
    /// Lifecycle state.
    status: TicketStatus,
    /// Final price, set on close.
    price: Option<f64>,
}

/// Everything needed to open a ticket.
#[derive(Debug, Clone)]
pub struct TicketIssue {
    /// Ticket identifier.
    pub id: TicketId,
    /// Parked vehicle.
    pub vehicle_id: VehicleId,
    /// Class the vehicle requested.
    pub vehicle_class: SizeClass,
    /// Assigned slot.
    pub slot_id: SlotId,
    /// Class of the assigned slot.
    pub slot_class: SizeClass,
    /// Floor hosting the slot.
    pub floor_id: FloorId,
    /// Arrival entrance.
    pub entrance: EntranceId,
    /// Issue instant.
    pub start_time: Timestamp,
}

// ============================================================================
// SECTION: Lifecycle
// ============================================================================

impl Ticket {
    /// Opens a ticket.
    #[must_use]
    pub fn open(issue: TicketIssue) -> Self {
        Self {
            id: issue.id,
            vehicle_id: issue.vehicle_id,
            vehicle_class: issue.vehicle_class,
            slot_id: issue.slot_id,
            slot_class: issue.slot_class,
            floor_id: issue.floor_id,
            entrance: issue.entrance,
            start_time: issue.start_time,
            end_time: None,
            status: TicketStatus::Open,
            price: None,
        }
    }

    /// Closes the ticket at `now` and prices it with `rates`.
    ///
    /// # Errors
    ///
    /// Returns [`TicketError::AlreadyClosed`] when the ticket was closed
    /// before; the ticket is left unchanged.
    pub fn close(&mut self, now: Timestamp, rates: &RateCard) -> Result<f64, TicketError> {
        if self.is_closed() {
            return Err(TicketError::AlreadyClosed {
                ticket_id: self.id,
            });
        }
        let end = now.max(self.start_time);
        let price = rates.price(end.hours_since(self.start_time), self.slot_class);
        self.end_time = Some(end);
        self.price = Some(price);
        self.status = TicketStatus::Closed;
        Ok(price)
    }

    /// Returns the billed duration in hours, or `None` while open.
    #[must_use]
    pub fn duration_hours(&self) -> Option<f64> {
        self.end_time.map(|end| end.hours_since(self.start_time))
    }

    /// Returns true once the ticket is closed.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.status == TicketStatus::Closed
    }

    /// Ticket identifier.
    #[must_use]
    pub const fn id(&self) -> TicketId {
        self.id
    }

    /// Parked vehicle.
    #[must_use]
    pub const fn vehicle_id(&self) -> &VehicleId {
        &self.vehicle_id
    }

    /// Class the vehicle requested.
    #[must_use]
    pub const fn vehicle_class(&self) -> SizeClass {
        self.vehicle_class
    }

    /// Occupied slot.
    #[must_use]
    pub const fn slot_id(&self) -> &SlotId {
        &self.slot_id
    }

    /// Class of the occupied slot.
    #[must_use]
    pub const fn slot_class(&self) -> SizeClass {
        self.slot_class
    }

    /// Floor hosting the slot.
    #[must_use]
    pub const fn floor_id(&self) -> FloorId {
        self.floor_id
    }

    /// Arrival entrance.
    #[must_use]
    pub const fn entrance(&self) -> &EntranceId {
        &self.entrance
    }

    /// Issue instant.
    #[must_use]
    pub const fn start_time(&self) -> Timestamp {
        self.start_time
    }

    /// Close instant.
    #[must_use]
    pub const fn end_time(&self) -> Option<Timestamp> {
        self.end_time
    }

    /// Lifecycle state.
    #[must_use]
    pub const fn status(&self) -> TicketStatus {
        self.status
    }

    /// Final price.
    #[must_use]
    pub const fn price(&self) -> Option<f64> {
        self.price
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Ticket lifecycle errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TicketError {
    /// The ticket was already closed.
    #[error("ticket {ticket_id} already closed")]
    AlreadyClosed {
        /// Closed ticket.
        ticket_id: TicketId,
    },
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, reason = "Test-only assertions are permitted.")]

    use super::Ticket;
    use super::TicketError;
    use super::TicketIssue;
    use super::TicketStatus;
    use crate::core::identifiers::FloorId;
    use crate::core::identifiers::TicketId;
    use crate::core::pricing::RateCard;
    use crate::core::size::SizeClass;
    use crate::core::time::MILLIS_PER_HOUR;
    use crate::core::time::Timestamp;

    fn issue(start: i64) -> TicketIssue {
        TicketIssue {
            id: TicketId::new(7),
            vehicle_id: "car".into(),
            vehicle_class: SizeClass::Small,
            slot_id: "L1".into(),
            slot_class: SizeClass::Large,
            floor_id: FloorId::new(1),
            entrance: "E1".into(),
            start_time: Timestamp::from_unix_millis(start),
        }
    }

    #[test]
    fn close_prices_by_slot_class() {
        let mut ticket = Ticket::open(issue(0));
        assert_eq!(ticket.status(), TicketStatus::Open);
        assert!(ticket.duration_hours().is_none());
        let price =
            ticket.close(Timestamp::from_unix_millis(2 * MILLIS_PER_HOUR), &RateCard::default()).unwrap();
        assert!((price - 0.10).abs() < 1e-9);
        assert!(ticket.is_closed());
        assert_eq!(ticket.price(), Some(price));
        assert!((ticket.duration_hours().unwrap() - 2.0).abs() < 1e-9);
    }

    #[test]
    fn close_twice_is_rejected_and_keeps_first_close() {
        let mut ticket = Ticket::open(issue(0));
        let rates = RateCard::default();
        let first = ticket.close(Timestamp::from_unix_millis(MILLIS_PER_HOUR), &rates).unwrap();
        let err = ticket.close(Timestamp::from_unix_millis(5 * MILLIS_PER_HOUR), &rates).unwrap_err();
        assert_eq!(err, TicketError::AlreadyClosed {
            ticket_id: TicketId::new(7)
        });
        assert_eq!(ticket.price(), Some(first));
        assert_eq!(ticket.end_time(), Some(Timestamp::from_unix_millis(MILLIS_PER_HOUR)));
    }

    #[test]
    fn backwards_clock_clamps_to_zero_duration() {
        let mut ticket = Ticket::open(issue(10_000));
        let price = ticket.close(Timestamp::from_unix_millis(5_000), &RateCard::default()).unwrap();
        assert!(price.abs() < f64::EPSILON);
        assert_eq!(ticket.end_time(), Some(ticket.start_time()));
    }
}

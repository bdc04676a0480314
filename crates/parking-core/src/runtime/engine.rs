// crates/parking-core/src/runtime/engine.rs
// ============================================================================
// Module: Parking Lot Engine
// Description: Lot-wide allocation, ticketing, release, and bookkeeping.
// Purpose: Single source of truth for which vehicle holds which slot.
// Dependencies: crate::{core, interfaces, runtime::audit}, serde, thiserror
// ============================================================================

//! ## Overview
//! [`ParkingLot`] owns every floor and every ticket behind one mutex. Each
//! public operation takes the lock once and performs search, slot mutation,
//! and ticket bookkeeping inside it, so concurrent callers never win the same
//! slot and a ticket is closed at most once.
//!
//! Floors are searched in ascending id order and the first floor with a fit
//! wins, even if a later floor has a closer slot.
//!
//! ## Invariants
//! - Every occupied slot is referenced by exactly one active ticket, and every
//!   active ticket references an occupied slot holding its vehicle.
//! - A vehicle appears in at most one active ticket.
//! - Ticket ids increase strictly from 1 and are never reused.
//! - Closed tickets leave the active index and are kept in the closed ledger.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::core::floor::ClassAvailability;
use crate::core::floor::FitPolicy;
use crate::core::floor::Floor;
use crate::core::floor::Placement;
use crate::core::identifiers::EntranceId;
use crate::core::identifiers::FloorId;
use crate::core::identifiers::TicketId;
use crate::core::identifiers::VehicleId;
use crate::core::layout::FloorLayout;
use crate::core::layout::LayoutError;
use crate::core::layout::LotLayout;
use crate::core::pricing::RateCard;
use crate::core::pricing::RateCardError;
use crate::core::size::SizeClass;
use crate::core::ticket::Ticket;
use crate::core::ticket::TicketIssue;
use crate::core::time::Timestamp;
use crate::core::vehicle::Vehicle;
use crate::interfaces::Clock;
use crate::interfaces::LotAuditSink;
use crate::runtime::audit::LotAuditEvent;
use crate::runtime::audit::LotAuditKind;

// ============================================================================
// SECTION: Policy
// ============================================================================

/// Pricing and selection policy fixed at configuration time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LotPolicy {
    /// Hourly rate card.
    pub rates: RateCard,
    /// Slot selection policy within a floor.
    pub fit_policy: FitPolicy,
}

// ============================================================================
// SECTION: Results
// ============================================================================

/// Outcome of an assignment request.
#[derive(Debug, Clone, PartialEq)]
pub enum AssignOutcome {
    /// A slot was reserved and a ticket issued.
    Assigned(Ticket),
    /// No compatible free slot exists on any floor.
    NoCapacity,
}

impl AssignOutcome {
    /// Returns the issued ticket, if any.
    #[must_use]
    pub const fn ticket(&self) -> Option<&Ticket> {
        match self {
            Self::Assigned(ticket) => Some(ticket),
            Self::NoCapacity => None,
        }
    }

    /// Consumes the outcome and returns the issued ticket, if any.
    #[must_use]
    pub fn into_ticket(self) -> Option<Ticket> {
        match self {
            Self::Assigned(ticket) => Some(ticket),
            Self::NoCapacity => None,
        }
    }
}

/// Result of a successful release.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReleaseReceipt {
    /// Closed ticket.
    pub ticket: Ticket,
    /// Billed hours.
    pub duration_hours: f64,
    /// Final price.
    pub price: f64,
}

/// Point-in-time lot counters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LotSummary {
    /// Lot name.
    pub name: String,
    /// Number of floors.
    pub floors: usize,
    /// Number of slots.
    pub total_slots: usize,
    /// Number of occupied slots.
    pub occupied_slots: usize,
    /// Number of open tickets.
    pub active_tickets: usize,
    /// Number of closed tickets retained in the ledger.
    pub closed_tickets: usize,
}

// ============================================================================
// SECTION: Engine State
// ============================================================================

/// Mutable lot state guarded by the engine mutex.
struct LotState {
    /// Floors in search order.
    floors: BTreeMap<FloorId, Floor>,
    /// Open tickets.
    active: BTreeMap<TicketId, Ticket>,
    /// Open ticket per parked vehicle.
    by_vehicle: BTreeMap<VehicleId, TicketId>,
    /// Closed ticket ledger.
    closed: BTreeMap<TicketId, Ticket>,
    /// Next ticket number to issue.
    next_ticket: u64,
}

/// Parking lot allocation engine.
pub struct ParkingLot {
    /// Lot display name.
    name: String,
    /// Pricing and selection policy.
    policy: LotPolicy,
    /// Guarded lot state.
    state: Mutex<LotState>,
    /// Time source for ticket timestamps.
    clock: Arc<dyn Clock>,
    /// Audit event receiver.
    audit: Arc<dyn LotAuditSink>,
}

// ============================================================================
// SECTION: Configuration
// ============================================================================

impl ParkingLot {
    /// Builds a lot from a validated layout.
    ///
    /// # Errors
    ///
    /// Returns [`LotError::Layout`] for an invalid layout and
    /// [`LotError::Rates`] for an invalid rate card.
    pub fn configure(
        layout: &LotLayout,
        policy: LotPolicy,
        clock: Arc<dyn Clock>,
        audit: Arc<dyn LotAuditSink>,
    ) -> Result<Self, LotError> {
        policy.rates.validate()?;
        let floors = layout.build_floors()?;
        let lot = Self {
            name: layout.name.clone(),
            policy,
            state: Mutex::new(LotState {
                floors,
                active: BTreeMap::new(),
                by_vehicle: BTreeMap::new(),
                closed: BTreeMap::new(),
                next_ticket: 1,
            }),
            clock,
            audit,
        };
        lot.emit(
            LotAuditEvent::new(LotAuditKind::LotConfigured, lot.clock.now(), &lot.name).with_reason(
                format!("{} floors, {} slots", layout.floors.len(), layout.slot_count()),
            ),
        );
        Ok(lot)
    }

    /// Returns the lot name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the configured policy.
    #[must_use]
    pub const fn policy(&self) -> &LotPolicy {
        &self.policy
    }

    // ========================================================================
    // SECTION: Assignment
    // ========================================================================

    /// Assigns `vehicle` arriving at `entrance` to the best slot on the first
    /// floor that has a fit.
    ///
    /// # Errors
    ///
    /// Returns [`LotError::VehicleAlreadyParked`] when the vehicle holds an
    /// open ticket, [`LotError::Invariant`] when slot state contradicts the
    /// search, and [`LotError::LockPoisoned`] when the lot lock is poisoned.
    pub fn assign(
        &self,
        vehicle: &Vehicle,
        entrance: &EntranceId,
    ) -> Result<AssignOutcome, LotError> {
        let mut guard = self.lock()?;
        let state = &mut *guard;
        let now = self.clock.now();

        if let Some(existing) = state.by_vehicle.get(vehicle.id()) {
            let err = LotError::VehicleAlreadyParked {
                vehicle_id: vehicle.id().clone(),
                ticket_id: *existing,
            };
            self.emit(
                LotAuditEvent::new(LotAuditKind::AssignRejected, now, &self.name)
                    .with_ticket(*existing)
                    .with_vehicle(vehicle.id().clone(), Some(vehicle.size_class()))
                    .with_entrance(entrance.clone())
                    .with_reason(err.to_string()),
            );
            return Err(err);
        }

        let mut placement: Option<Placement> = None;
        for floor in state.floors.values_mut() {
            match floor.assign_best(vehicle, entrance, self.policy.fit_policy) {
                Ok(Some(found)) => {
                    placement = Some(found);
                    break;
                }
                Ok(None) => {}
                Err(err) => return Err(self.violation(now, err.to_string())),
            }
        }
        let Some(placement) = placement else {
            self.emit(
                LotAuditEvent::new(LotAuditKind::NoCapacity, now, &self.name)
                    .with_vehicle(vehicle.id().clone(), Some(vehicle.size_class()))
                    .with_entrance(entrance.clone()),
            );
            return Ok(AssignOutcome::NoCapacity);
        };

        let ticket_id = TicketId::new(state.next_ticket);
        state.next_ticket = state
            .next_ticket
            .checked_add(1)
            .ok_or_else(|| self.violation(now, "ticket counter exhausted".to_string()))?;
        let ticket = Ticket::open(TicketIssue {
            id: ticket_id,
            vehicle_id: vehicle.id().clone(),
            vehicle_class: vehicle.size_class(),
            slot_id: placement.slot_id.clone(),
            slot_class: placement.slot_class,
            floor_id: placement.floor_id,
            entrance: entrance.clone(),
            start_time: now,
        });
        state.active.insert(ticket_id, ticket.clone());
        state.by_vehicle.insert(vehicle.id().clone(), ticket_id);
        self.emit(
            LotAuditEvent::new(LotAuditKind::TicketIssued, now, &self.name)
                .with_ticket(ticket_id)
                .with_vehicle(vehicle.id().clone(), Some(vehicle.size_class()))
                .with_slot(placement.slot_id, placement.slot_class, placement.floor_id)
                .with_entrance(entrance.clone()),
        );
        Ok(AssignOutcome::Assigned(ticket))
    }

    // ========================================================================
    // SECTION: Release
    // ========================================================================

    /// Closes the ticket, prices it, and frees its slot.
    ///
    /// # Errors
    ///
    /// Returns [`LotError::TicketAlreadyClosed`] for a ticket in the closed
    /// ledger, [`LotError::TicketNotFound`] for an unknown ticket, and
    /// [`LotError::Invariant`] when the slot does not hold the ticket's vehicle.
    pub fn release(&self, ticket_id: TicketId) -> Result<ReleaseReceipt, LotError> {
        let mut guard = self.lock()?;
        let now = self.clock.now();
        self.release_locked(&mut guard, ticket_id, now)
    }

    /// Releases using a ticket handle previously returned by [`Self::assign`].
    ///
    /// # Errors
    ///
    /// Same as [`Self::release`].
    pub fn release_ticket(&self, ticket: &Ticket) -> Result<ReleaseReceipt, LotError> {
        self.release(ticket.id())
    }

    /// Releases the open ticket held by `vehicle_id`.
    ///
    /// # Errors
    ///
    /// Returns [`LotError::VehicleNotParked`] when the vehicle has no open
    /// ticket, plus the errors of [`Self::release`].
    pub fn release_vehicle(&self, vehicle_id: &VehicleId) -> Result<ReleaseReceipt, LotError> {
        let mut guard = self.lock()?;
        let now = self.clock.now();
        let Some(ticket_id) = guard.by_vehicle.get(vehicle_id).copied() else {
            let err = LotError::VehicleNotParked {
                vehicle_id: vehicle_id.clone(),
            };
            self.emit(
                LotAuditEvent::new(LotAuditKind::ReleaseRejected, now, &self.name)
                    .with_vehicle(vehicle_id.clone(), None)
                    .with_reason(err.to_string()),
            );
            return Err(err);
        };
        self.release_locked(&mut guard, ticket_id, now)
    }

    /// Release body shared by the public entry points. Caller holds the lock.
    fn release_locked(
        &self,
        state: &mut LotState,
        ticket_id: TicketId,
        now: Timestamp,
    ) -> Result<ReleaseReceipt, LotError> {
        let Some(active) = state.active.get(&ticket_id) else {
            let err = if state.closed.contains_key(&ticket_id) {
                LotError::TicketAlreadyClosed {
                    ticket_id,
                }
            } else {
                LotError::TicketNotFound {
                    ticket_id,
                }
            };
            self.emit(
                LotAuditEvent::new(LotAuditKind::ReleaseRejected, now, &self.name)
                    .with_ticket(ticket_id)
                    .with_reason(err.to_string()),
            );
            return Err(err);
        };

        let mut ticket = active.clone();
        let floor = state.floors.get_mut(&ticket.floor_id()).ok_or_else(|| {
            self.violation(
                now,
                format!("ticket {ticket_id} references missing floor {}", ticket.floor_id()),
            )
        })?;
        let holds_vehicle = floor
            .slot(ticket.slot_id())
            .and_then(|slot| slot.occupant())
            .is_some_and(|occupant| occupant == ticket.vehicle_id());
        if !holds_vehicle {
            return Err(self.violation(
                now,
                format!(
                    "slot {} does not hold vehicle {} for ticket {ticket_id}",
                    ticket.slot_id(),
                    ticket.vehicle_id()
                ),
            ));
        }
        let price = ticket
            .close(now, &self.policy.rates)
            .map_err(|err| self.violation(now, err.to_string()))?;
        floor.release_slot(ticket.slot_id()).map_err(|err| self.violation(now, err.to_string()))?;

        state.active.remove(&ticket_id);
        state.by_vehicle.remove(ticket.vehicle_id());
        state.closed.insert(ticket_id, ticket.clone());

        let duration_hours = ticket.duration_hours().unwrap_or(0.0);
        self.emit(
            LotAuditEvent::new(LotAuditKind::TicketClosed, now, &self.name)
                .with_ticket(ticket_id)
                .with_vehicle(ticket.vehicle_id().clone(), Some(ticket.vehicle_class()))
                .with_slot(ticket.slot_id().clone(), ticket.slot_class(), ticket.floor_id())
                .with_billing(duration_hours, price),
        );
        Ok(ReleaseReceipt {
            ticket,
            duration_hours,
            price,
        })
    }

    // ========================================================================
    // SECTION: Queries
    // ========================================================================

    /// Returns the open ticket held by `vehicle_id`, if any.
    ///
    /// # Errors
    ///
    /// Returns [`LotError::LockPoisoned`] when the lot lock is poisoned.
    pub fn find_ticket_by_vehicle(
        &self,
        vehicle_id: &VehicleId,
    ) -> Result<Option<Ticket>, LotError> {
        let state = self.lock()?;
        Ok(state.by_vehicle.get(vehicle_id).and_then(|id| state.active.get(id)).cloned())
    }

    /// Returns an open or closed ticket by id.
    ///
    /// # Errors
    ///
    /// Returns [`LotError::LockPoisoned`] when the lot lock is poisoned.
    pub fn ticket(&self, ticket_id: TicketId) -> Result<Option<Ticket>, LotError> {
        let state = self.lock()?;
        Ok(state.active.get(&ticket_id).or_else(|| state.closed.get(&ticket_id)).cloned())
    }

    /// Returns free-slot counts per floor and class. Classes without slots
    /// on a floor are omitted.
    ///
    /// # Errors
    ///
    /// Returns [`LotError::LockPoisoned`] when the lot lock is poisoned.
    pub fn query_availability(&self) -> Result<BTreeMap<(FloorId, SizeClass), usize>, LotError> {
        let state = self.lock()?;
        Ok(state
            .floors
            .iter()
            .flat_map(|(floor_id, floor)| {
                floor
                    .availability()
                    .into_iter()
                    .map(move |(class, counts)| ((*floor_id, class), counts.free))
            })
            .collect())
    }

    /// Returns free and total counts per floor and class.
    ///
    /// # Errors
    ///
    /// Returns [`LotError::LockPoisoned`] when the lot lock is poisoned.
    pub fn floor_availability(
        &self,
    ) -> Result<BTreeMap<FloorId, BTreeMap<SizeClass, ClassAvailability>>, LotError> {
        let state = self.lock()?;
        Ok(state.floors.iter().map(|(id, floor)| (*id, floor.availability())).collect())
    }

    /// Returns lot-wide counters.
    ///
    /// # Errors
    ///
    /// Returns [`LotError::LockPoisoned`] when the lot lock is poisoned.
    pub fn summary(&self) -> Result<LotSummary, LotError> {
        let state = self.lock()?;
        Ok(LotSummary {
            name: self.name.clone(),
            floors: state.floors.len(),
            total_slots: state.floors.values().map(Floor::slot_count).sum(),
            occupied_slots: state.floors.values().map(Floor::occupied_count).sum(),
            active_tickets: state.active.len(),
            closed_tickets: state.closed.len(),
        })
    }

    /// Returns a snapshot of open tickets in id order.
    ///
    /// # Errors
    ///
    /// Returns [`LotError::LockPoisoned`] when the lot lock is poisoned.
    pub fn active_tickets(&self) -> Result<Vec<Ticket>, LotError> {
        Ok(self.lock()?.active.values().cloned().collect())
    }

    /// Returns a snapshot of the closed ticket ledger in id order.
    ///
    /// # Errors
    ///
    /// Returns [`LotError::LockPoisoned`] when the lot lock is poisoned.
    pub fn closed_tickets(&self) -> Result<Vec<Ticket>, LotError> {
        Ok(self.lock()?.closed.values().cloned().collect())
    }

    /// Cross-checks slot occupancy against the ticket indexes.
    ///
    /// # Errors
    ///
    /// Returns [`LotError::Invariant`] describing the first inconsistency.
    pub fn verify_invariants(&self) -> Result<(), LotError> {
        let state = self.lock()?;
        let now = self.clock.now();
        if let Err(reason) = check_state(&state) {
            return Err(self.violation(now, reason));
        }
        Ok(())
    }

    // ========================================================================
    // SECTION: Floor Management
    // ========================================================================

    /// Adds a floor at runtime.
    ///
    /// # Errors
    ///
    /// Returns [`LotError::Layout`] when the floor id or any slot id is
    /// already in use, or the floor layout is invalid.
    pub fn add_floor(&self, layout: &FloorLayout) -> Result<(), LotError> {
        let mut guard = self.lock()?;
        let state = &mut *guard;
        if state.floors.contains_key(&layout.id) {
            return Err(LayoutError::DuplicateFloor {
                floor_id: layout.id,
            }
            .into());
        }
        for slot in &layout.slots {
            if state.floors.values().any(|floor| floor.slot(&slot.id).is_some()) {
                return Err(LayoutError::DuplicateSlot {
                    slot_id: slot.id.clone(),
                }
                .into());
            }
        }
        let floor = layout.build()?;
        let slots = floor.slot_count();
        state.floors.insert(layout.id, floor);
        self.emit(
            LotAuditEvent::new(LotAuditKind::FloorAdded, self.clock.now(), &self.name)
                .with_floor(layout.id)
                .with_reason(format!("{slots} slots")),
        );
        Ok(())
    }

    /// Removes an empty floor and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`LotError::FloorNotFound`] for an unknown floor and
    /// [`LotError::FloorOccupied`] while any of its slots is occupied.
    pub fn remove_floor(&self, floor_id: FloorId) -> Result<Floor, LotError> {
        let mut guard = self.lock()?;
        let occupied = guard
            .floors
            .get(&floor_id)
            .ok_or(LotError::FloorNotFound {
                floor_id,
            })?
            .occupied_count();
        if occupied > 0 {
            return Err(LotError::FloorOccupied {
                floor_id,
                occupied,
            });
        }
        let floor = guard.floors.remove(&floor_id).ok_or(LotError::FloorNotFound {
            floor_id,
        })?;
        self.emit(
            LotAuditEvent::new(LotAuditKind::FloorRemoved, self.clock.now(), &self.name)
                .with_floor(floor_id),
        );
        Ok(floor)
    }

    // ========================================================================
    // SECTION: Helpers
    // ========================================================================

    /// Acquires the lot lock.
    fn lock(&self) -> Result<MutexGuard<'_, LotState>, LotError> {
        self.state.lock().map_err(|_| LotError::LockPoisoned)
    }

    /// Forwards an event to the audit sink.
    fn emit(&self, event: LotAuditEvent) {
        self.audit.record(&event);
    }

    /// Records an invariant violation and returns the matching error.
    fn violation(&self, now: Timestamp, reason: String) -> LotError {
        self.emit(
            LotAuditEvent::new(LotAuditKind::InvariantViolation, now, &self.name)
                .with_reason(reason.clone()),
        );
        LotError::Invariant(reason)
    }
}

/// Checks the slot/ticket cross-references of `state`.
fn check_state(state: &LotState) -> Result<(), String> {
    let mut referenced = BTreeSet::new();
    for (ticket_id, ticket) in &state.active {
        if ticket.is_closed() {
            return Err(format!("active ticket {ticket_id} is closed"));
        }
        if state.by_vehicle.get(ticket.vehicle_id()) != Some(ticket_id) {
            return Err(format!("vehicle index disagrees with ticket {ticket_id}"));
        }
        let occupant = state
            .floors
            .get(&ticket.floor_id())
            .and_then(|floor| floor.slot(ticket.slot_id()))
            .and_then(|slot| slot.occupant());
        if occupant != Some(ticket.vehicle_id()) {
            return Err(format!(
                "ticket {ticket_id} slot {} does not hold its vehicle",
                ticket.slot_id()
            ));
        }
        if !referenced.insert(ticket.slot_id().clone()) {
            return Err(format!("slot {} referenced by two active tickets", ticket.slot_id()));
        }
    }
    if state.by_vehicle.len() != state.active.len() {
        return Err("vehicle index size differs from active tickets".to_string());
    }
    for floor in state.floors.values() {
        for slot in floor.slots().filter(|slot| slot.is_occupied()) {
            if !referenced.contains(slot.id()) {
                return Err(format!("slot {} is occupied without an active ticket", slot.id()));
            }
        }
    }
    if let Some(last) = state.active.keys().chain(state.closed.keys()).max()
        && last.get() >= state.next_ticket
    {
        return Err(format!("ticket {last} not below counter {}", state.next_ticket));
    }
    Ok(())
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Allocation engine errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LotError {
    /// Ticket id was never issued.
    #[error("ticket {ticket_id} not found")]
    TicketNotFound {
        /// Unknown ticket.
        ticket_id: TicketId,
    },
    /// Ticket is already closed.
    #[error("ticket {ticket_id} already closed")]
    TicketAlreadyClosed {
        /// Closed ticket.
        ticket_id: TicketId,
    },
    /// Vehicle already holds an open ticket.
    #[error("vehicle {vehicle_id} already parked under ticket {ticket_id}")]
    VehicleAlreadyParked {
        /// Parked vehicle.
        vehicle_id: VehicleId,
        /// Its open ticket.
        ticket_id: TicketId,
    },
    /// Vehicle holds no open ticket.
    #[error("vehicle {vehicle_id} is not parked")]
    VehicleNotParked {
        /// Vehicle that was looked up.
        vehicle_id: VehicleId,
    },
    /// Floor id is not configured.
    #[error("floor {floor_id} not found")]
    FloorNotFound {
        /// Unknown floor.
        floor_id: FloorId,
    },
    /// Floor still has parked vehicles.
    #[error("floor {floor_id} has {occupied} occupied slots")]
    FloorOccupied {
        /// Floor that was to be removed.
        floor_id: FloorId,
        /// Occupied slot count.
        occupied: usize,
    },
    /// Layout validation failed.
    #[error("invalid layout: {0}")]
    Layout(#[from] LayoutError),
    /// Rate card validation failed.
    #[error("invalid rates: {0}")]
    Rates(#[from] RateCardError),
    /// Internal bookkeeping disagreed with slot state.
    #[error("lot invariant violated: {0}")]
    Invariant(String),
    /// A previous holder of the lot lock panicked.
    #[error("parking lot mutex poisoned")]
    LockPoisoned,
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, reason = "Test-only assertions are permitted.")]

    use std::collections::BTreeMap;
    use std::sync::Arc;

    use super::LotError;
    use super::LotPolicy;
    use super::ParkingLot;
    use crate::core::identifiers::EntranceId;
    use crate::core::identifiers::FloorId;
    use crate::core::identifiers::SlotId;
    use crate::core::identifiers::TicketId;
    use crate::core::layout::FloorLayout;
    use crate::core::layout::LotLayout;
    use crate::core::layout::SlotLayout;
    use crate::core::size::SizeClass;
    use crate::core::time::Timestamp;
    use crate::core::vehicle::Vehicle;
    use crate::runtime::audit::InMemoryAuditSink;
    use crate::runtime::audit::LotAuditKind;
    use crate::runtime::clock::ManualClock;

    fn one_slot_lot(audit: Arc<InMemoryAuditSink>) -> ParkingLot {
        let layout = LotLayout {
            name: "Test".to_string(),
            floors: vec![FloorLayout {
                id: FloorId::new(1),
                name: None,
                slots: vec![SlotLayout {
                    id: SlotId::new("S"),
                    size_class: SizeClass::Small,
                    distances: BTreeMap::from([(EntranceId::new("E1"), 1.0)]),
                }],
            }],
        };
        let clock = Arc::new(ManualClock::new(Timestamp::from_unix_millis(0)));
        ParkingLot::configure(&layout, LotPolicy::default(), clock, audit).unwrap()
    }

    /// Empties the slot without touching the ticket indexes.
    fn free_slot_directly(lot: &ParkingLot, floor_id: FloorId, slot_id: &SlotId) {
        let mut state = lot.lock().unwrap();
        state.floors.get_mut(&floor_id).unwrap().release_slot(slot_id).unwrap();
    }

    #[test]
    fn release_of_ticket_whose_slot_was_freed_is_an_invariant_violation() {
        let audit = Arc::new(InMemoryAuditSink::new());
        let lot = one_slot_lot(Arc::clone(&audit));
        let ticket = lot
            .assign(&Vehicle::new("v", SizeClass::Small), &EntranceId::new("E1"))
            .unwrap()
            .into_ticket()
            .unwrap();
        free_slot_directly(&lot, ticket.floor_id(), ticket.slot_id());

        let reason = "slot S does not hold vehicle v for ticket 1";
        let err = lot.release(ticket.id()).unwrap_err();
        assert_eq!(err, LotError::Invariant(reason.to_string()));
        assert_eq!(audit.kinds(), vec![
            LotAuditKind::LotConfigured,
            LotAuditKind::TicketIssued,
            LotAuditKind::InvariantViolation,
        ]);
        assert_eq!(audit.events()[2].reason.as_deref(), Some(reason));

        let summary = lot.summary().unwrap();
        assert_eq!(summary.active_tickets, 1);
        assert_eq!(summary.closed_tickets, 0);
        assert_eq!(lot.ticket(TicketId::new(1)).unwrap(), Some(ticket));
        assert!(matches!(lot.verify_invariants(), Err(LotError::Invariant(_))));
        assert_eq!(audit.kinds().last(), Some(&LotAuditKind::InvariantViolation));
    }

    #[test]
    fn verify_invariants_passes_on_consistent_state() {
        let audit = Arc::new(InMemoryAuditSink::new());
        let lot = one_slot_lot(Arc::clone(&audit));
        lot.assign(&Vehicle::new("v", SizeClass::Small), &EntranceId::new("E1")).unwrap();
        lot.verify_invariants().unwrap();
        lot.release_vehicle(&"v".into()).unwrap();
        lot.verify_invariants().unwrap();
        assert!(!audit.kinds().contains(&LotAuditKind::InvariantViolation));
    }
}

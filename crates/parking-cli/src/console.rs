// crates/parking-cli/src/console.rs
// ============================================================================
// Module: Gate Console
// Description: Executes gate commands against a configured lot.
// Purpose: Drive the lot from an operator session or a script file.
// Dependencies: parking-core, thiserror
// ============================================================================

//! ## Overview
//! [`GateConsole`] owns a [`ParkingLot`] and turns each [`GateCommand`] into
//! one line of operator output. A failed line is reported and the session
//! continues; [`GateConsole::run_script`] returns how many lines failed.
//!
//! `advance` only works when the console was built with a [`ManualClock`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io;
use std::io::BufRead;
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use parking_core::AssignOutcome;
use parking_core::Clock;
use parking_core::LotError;
use parking_core::ManualClock;
use parking_core::ParkingLot;
use parking_core::ReleaseReceipt;
use thiserror::Error;

use crate::gate_script::GateCommand;
use crate::gate_script::ScriptError;
use crate::gate_script::parse_line;
use crate::t;

// ============================================================================
// SECTION: Console
// ============================================================================

/// Operator console bound to one lot.
pub struct GateConsole {
    /// Lot under control.
    lot: ParkingLot,
    /// Clock the lot reads, when it is manually driven.
    manual_clock: Option<Arc<ManualClock>>,
}

impl GateConsole {
    /// Creates a console for `lot`. Pass the lot's clock as `manual_clock`
    /// to enable `advance`.
    #[must_use]
    pub const fn new(lot: ParkingLot, manual_clock: Option<Arc<ManualClock>>) -> Self {
        Self {
            lot,
            manual_clock,
        }
    }

    /// Returns the lot under control.
    #[must_use]
    pub const fn lot(&self) -> &ParkingLot {
        &self.lot
    }

    /// Parses and executes one line. Blank and comment lines yield `None`.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError`] when the line does not parse or the lot
    /// rejects the command.
    pub fn run_line(&self, line: &str) -> Result<Option<String>, ConsoleError> {
        match parse_line(line)? {
            Some(command) => self.execute(&command).map(Some),
            None => Ok(None),
        }
    }

    /// Executes a parsed command and returns its output line.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::Lot`] when the lot rejects the command and
    /// [`ConsoleError::ManualClockRequired`] for `advance` on a wall clock.
    pub fn execute(&self, command: &GateCommand) -> Result<String, ConsoleError> {
        match command {
            GateCommand::Park {
                vehicle,
                entrance,
            } => match self.lot.assign(vehicle, entrance)? {
                AssignOutcome::Assigned(ticket) => Ok(t!(
                    "console.park.assigned",
                    ticket = ticket.id(),
                    vehicle = ticket.vehicle_id(),
                    slot = ticket.slot_id(),
                    class = ticket.slot_class(),
                    floor = ticket.floor_id(),
                )),
                AssignOutcome::NoCapacity => Ok(t!(
                    "console.park.full",
                    class = vehicle.size_class(),
                    vehicle = vehicle.id(),
                    entrance = entrance,
                )),
            },
            GateCommand::Leave {
                ticket_id,
            } => Ok(render_receipt(&self.lot.release(*ticket_id)?)),
            GateCommand::LeaveVehicle {
                vehicle_id,
            } => Ok(render_receipt(&self.lot.release_vehicle(vehicle_id)?)),
            GateCommand::Find {
                vehicle_id,
            } => match self.lot.find_ticket_by_vehicle(vehicle_id)? {
                Some(ticket) => Ok(t!(
                    "console.find.parked",
                    vehicle = vehicle_id,
                    slot = ticket.slot_id(),
                    floor = ticket.floor_id(),
                    ticket = ticket.id(),
                )),
                None => Ok(t!("console.find.missing", vehicle = vehicle_id)),
            },
            GateCommand::Status => {
                let summary = self.lot.summary()?;
                Ok(t!(
                    "console.status",
                    name = summary.name,
                    occupied = summary.occupied_slots,
                    total = summary.total_slots,
                    active = summary.active_tickets,
                    closed = summary.closed_tickets,
                ))
            }
            GateCommand::Advance {
                minutes,
            } => {
                let clock = self.manual_clock.as_ref().ok_or(ConsoleError::ManualClockRequired)?;
                clock.advance(Duration::from_secs(minutes.saturating_mul(60)));
                Ok(t!("console.advance.ok", minutes = minutes, time = clock.now()))
            }
        }
    }

    /// Runs every line of `input`, writing results to `out` and line errors
    /// to `err`. Returns the number of failed lines.
    ///
    /// # Errors
    ///
    /// Returns [`io::Error`] when reading input or writing output fails.
    pub fn run_script<R, W, E>(&self, input: R, out: &mut W, err: &mut E) -> io::Result<usize>
    where
        R: BufRead,
        W: Write,
        E: Write,
    {
        let mut failed = 0;
        for (index, line) in input.lines().enumerate() {
            let line = line?;
            match self.run_line(&line) {
                Ok(Some(message)) => writeln!(out, "{message}")?,
                Ok(None) => {}
                Err(error) => {
                    failed += 1;
                    let message = t!("console.line_failed", line = index + 1, error = error);
                    writeln!(err, "{message}")?;
                }
            }
        }
        Ok(failed)
    }
}

/// Formats a release receipt.
fn render_receipt(receipt: &ReleaseReceipt) -> String {
    t!(
        "console.leave.closed",
        ticket = receipt.ticket.id(),
        vehicle = receipt.ticket.vehicle_id(),
        slot = receipt.ticket.slot_id(),
        hours = format!("{:.2}", receipt.duration_hours),
        price = format!("{:.4}", receipt.price),
    )
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Console command failures.
#[derive(Debug, Error)]
pub enum ConsoleError {
    /// Line did not parse.
    #[error(transparent)]
    Script(#[from] ScriptError),
    /// Lot rejected the command.
    #[error(transparent)]
    Lot(#[from] LotError),
    /// `advance` was issued without a manual clock.
    #[error("advance requires --manual-clock")]
    ManualClockRequired,
}

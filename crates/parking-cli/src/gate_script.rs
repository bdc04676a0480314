// crates/parking-cli/src/gate_script.rs
// ============================================================================
// Module: Gate Script Parser
// Description: Parses operator console lines into gate commands.
// Purpose: Turn untrusted text input into typed lot operations.
// Dependencies: parking-core, thiserror
// ============================================================================

//! ## Overview
//! One line holds one command. Keywords are case-insensitive; arguments are
//! whitespace separated. Blank lines and lines starting with `#` parse to
//! `None`.
//!
//! ```text
//! park <vehicle> <kind-or-class> <entrance>
//! leave <ticket-id>
//! leave-vehicle <vehicle>
//! find <vehicle>
//! status
//! advance <minutes>
//! ```
//!
//! The vehicle type accepts a kind (`bike`, `sedan`, `suv`, `truck`) or a
//! size class (`two_wheeler`, `small`, `medium`, `large`).

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::str::SplitWhitespace;

use parking_core::EntranceId;
use parking_core::SizeClass;
use parking_core::TicketId;
use parking_core::Vehicle;
use parking_core::VehicleId;
use parking_core::VehicleKind;
use thiserror::Error;

// ============================================================================
// SECTION: Commands
// ============================================================================

/// Recognized command keywords.
const KEYWORDS: [&str; 6] = ["park", "leave", "leave-vehicle", "find", "status", "advance"];

/// A parsed console command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateCommand {
    /// Assign a slot to an arriving vehicle.
    Park {
        /// Arriving vehicle.
        vehicle: Vehicle,
        /// Entrance the vehicle arrived at.
        entrance: EntranceId,
    },
    /// Close a ticket by id.
    Leave {
        /// Ticket to close.
        ticket_id: TicketId,
    },
    /// Close the open ticket held by a vehicle.
    LeaveVehicle {
        /// Departing vehicle.
        vehicle_id: VehicleId,
    },
    /// Look up where a vehicle is parked.
    Find {
        /// Vehicle to look up.
        vehicle_id: VehicleId,
    },
    /// Print lot counters.
    Status,
    /// Move the manual clock forward.
    Advance {
        /// Minutes to advance.
        minutes: u64,
    },
}

/// Parses one console line.
///
/// # Errors
///
/// Returns [`ScriptError`] for unknown keywords, missing or extra arguments,
/// unknown vehicle types, and malformed numbers.
pub fn parse_line(line: &str) -> Result<Option<GateCommand>, ScriptError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    let mut tokens = line.split_whitespace();
    let Some(keyword) = tokens.next() else {
        return Ok(None);
    };
    let Some(command) = KEYWORDS.iter().copied().find(|name| name.eq_ignore_ascii_case(keyword))
    else {
        return Err(ScriptError::UnknownCommand(keyword.to_string()));
    };
    let mut args = Arguments {
        command,
        tokens,
    };

    let parsed = match command {
        "park" => {
            let vehicle_id = args.required("vehicle")?;
            let class = parse_vehicle_type(args.required("kind-or-class")?)?;
            let entrance = args.required("entrance")?;
            GateCommand::Park {
                vehicle: Vehicle::new(vehicle_id, class),
                entrance: EntranceId::new(entrance),
            }
        }
        "leave" => {
            let value = args.required("ticket-id")?;
            let ticket_id = value.parse::<TicketId>().map_err(|_| ScriptError::InvalidNumber {
                argument: "ticket-id",
                value: value.to_string(),
            })?;
            GateCommand::Leave {
                ticket_id,
            }
        }
        "leave-vehicle" => GateCommand::LeaveVehicle {
            vehicle_id: VehicleId::new(args.required("vehicle")?),
        },
        "find" => GateCommand::Find {
            vehicle_id: VehicleId::new(args.required("vehicle")?),
        },
        "advance" => {
            let value = args.required("minutes")?;
            let minutes = value.parse::<u64>().map_err(|_| ScriptError::InvalidNumber {
                argument: "minutes",
                value: value.to_string(),
            })?;
            GateCommand::Advance {
                minutes,
            }
        }
        // status
        _ => GateCommand::Status,
    };
    args.finish()?;
    Ok(Some(parsed))
}

/// Parses a vehicle kind, falling back to a size class.
///
/// # Errors
///
/// Returns [`ScriptError::UnknownVehicleType`] when neither parses.
pub fn parse_vehicle_type(value: &str) -> Result<SizeClass, ScriptError> {
    if let Ok(kind) = value.parse::<VehicleKind>() {
        return Ok(kind.size_class());
    }
    value.parse::<SizeClass>().map_err(|_| ScriptError::UnknownVehicleType(value.to_string()))
}

/// Positional argument cursor for one command.
struct Arguments<'a> {
    /// Command keyword, used in error messages.
    command: &'static str,
    /// Remaining tokens.
    tokens: SplitWhitespace<'a>,
}

impl<'a> Arguments<'a> {
    /// Takes the next argument or reports it missing.
    fn required(&mut self, argument: &'static str) -> Result<&'a str, ScriptError> {
        self.tokens.next().ok_or(ScriptError::MissingArgument {
            command: self.command,
            argument,
        })
    }

    /// Rejects leftover tokens.
    fn finish(mut self) -> Result<(), ScriptError> {
        match self.tokens.next() {
            Some(extra) => Err(ScriptError::UnexpectedArgument {
                command: self.command,
                value: extra.to_string(),
            }),
            None => Ok(()),
        }
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Console line parse errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScriptError {
    /// Keyword is not a known command.
    #[error("unknown command: {0}")]
    UnknownCommand(String),
    /// A required argument is absent.
    #[error("{command} requires <{argument}>")]
    MissingArgument {
        /// Command keyword.
        command: &'static str,
        /// Missing argument name.
        argument: &'static str,
    },
    /// The line has more arguments than the command takes.
    #[error("{command} does not take argument {value}")]
    UnexpectedArgument {
        /// Command keyword.
        command: &'static str,
        /// First extra token.
        value: String,
    },
    /// Vehicle type is neither a kind nor a size class.
    #[error("unknown vehicle kind or size class: {0}")]
    UnknownVehicleType(String),
    /// Numeric argument did not parse.
    #[error("{argument} must be a non-negative integer, got {value}")]
    InvalidNumber {
        /// Argument name.
        argument: &'static str,
        /// Offending text.
        value: String,
    },
}

// crates/parking-cli/src/tests/gate_script.rs
// ============================================================================
// Module: Gate Script Parser Tests
// Description: Unit tests for console line parsing.
// Purpose: Ensure untrusted console input is parsed or rejected precisely.
// Dependencies: parking-cli gate_script module
// ============================================================================

//! ## Overview
//! Covers every command form, vehicle type resolution, and each parse error.

use parking_core::EntranceId;
use parking_core::SizeClass;
use parking_core::TicketId;
use parking_core::Vehicle;
use parking_core::VehicleId;

use crate::gate_script::GateCommand;
use crate::gate_script::ScriptError;
use crate::gate_script::parse_line;
use crate::gate_script::parse_vehicle_type;

#[test]
fn blank_and_comment_lines_are_skipped() {
    assert_eq!(parse_line(""), Ok(None));
    assert_eq!(parse_line("   \t"), Ok(None));
    assert_eq!(parse_line("# morning shift"), Ok(None));
    assert_eq!(parse_line("   # indented"), Ok(None));
}

#[test]
fn park_accepts_kind_or_class() {
    let parsed = parse_line("park KA-01 sedan Entrance1").unwrap();
    assert_eq!(
        parsed,
        Some(GateCommand::Park {
            vehicle: Vehicle::new("KA-01", SizeClass::Small),
            entrance: EntranceId::new("Entrance1"),
        })
    );
    let parsed = parse_line("PARK bike-7 two_wheeler North").unwrap();
    assert_eq!(
        parsed,
        Some(GateCommand::Park {
            vehicle: Vehicle::new("bike-7", SizeClass::TwoWheeler),
            entrance: EntranceId::new("North"),
        })
    );
}

#[test]
fn vehicle_type_prefers_kind_then_class() {
    assert_eq!(parse_vehicle_type("truck"), Ok(SizeClass::Large));
    assert_eq!(parse_vehicle_type("Suv"), Ok(SizeClass::Medium));
    assert_eq!(parse_vehicle_type("large"), Ok(SizeClass::Large));
    assert_eq!(parse_vehicle_type("two-wheeler"), Ok(SizeClass::TwoWheeler));
    assert_eq!(parse_vehicle_type("bus"), Err(ScriptError::UnknownVehicleType("bus".to_string())));
}

#[test]
fn departure_and_lookup_commands_parse() {
    assert_eq!(
        parse_line("leave 12").unwrap(),
        Some(GateCommand::Leave {
            ticket_id: TicketId::new(12),
        })
    );
    assert_eq!(
        parse_line("leave-vehicle KA-01").unwrap(),
        Some(GateCommand::LeaveVehicle {
            vehicle_id: VehicleId::new("KA-01"),
        })
    );
    assert_eq!(
        parse_line("find KA-01").unwrap(),
        Some(GateCommand::Find {
            vehicle_id: VehicleId::new("KA-01"),
        })
    );
    assert_eq!(parse_line("status").unwrap(), Some(GateCommand::Status));
    assert_eq!(
        parse_line("advance 90").unwrap(),
        Some(GateCommand::Advance {
            minutes: 90,
        })
    );
}

#[test]
fn unknown_keyword_is_rejected() {
    assert_eq!(parse_line("fly KA-01"), Err(ScriptError::UnknownCommand("fly".to_string())));
}

#[test]
fn missing_arguments_name_the_argument() {
    assert_eq!(
        parse_line("park KA-01 sedan"),
        Err(ScriptError::MissingArgument {
            command: "park",
            argument: "entrance",
        })
    );
    let err = parse_line("leave").unwrap_err();
    assert_eq!(err.to_string(), "leave requires <ticket-id>");
}

#[test]
fn extra_arguments_are_rejected() {
    assert_eq!(
        parse_line("status now"),
        Err(ScriptError::UnexpectedArgument {
            command: "status",
            value: "now".to_string(),
        })
    );
    assert!(matches!(
        parse_line("find KA-01 KA-02"),
        Err(ScriptError::UnexpectedArgument { command: "find", .. })
    ));
}

#[test]
fn numbers_must_be_non_negative_integers() {
    assert_eq!(
        parse_line("leave -1"),
        Err(ScriptError::InvalidNumber {
            argument: "ticket-id",
            value: "-1".to_string(),
        })
    );
    let err = parse_line("advance 1.5").unwrap_err();
    assert_eq!(err.to_string(), "minutes must be a non-negative integer, got 1.5");
}

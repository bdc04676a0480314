// crates/parking-cli/src/lib.rs
// ============================================================================
// Module: Parking CLI Library
// Description: Shared helpers for the parking lot command-line interface.
// Purpose: Provide reusable components (i18n, gate scripts, console) for the
//          CLI binary and tests.
// Dependencies: parking-core, thiserror
// ============================================================================

//! ## Overview
//! This library houses the CLI pieces that do not depend on process state:
//! the message catalog, the gate command parser, and the console that runs
//! parsed commands against a lot. The binary entry point (`src/main.rs`)
//! wires them to files, stdin, and stdout.
//!
//! Console input is untrusted; every line is parsed and rejected with a
//! message rather than aborting the session.

// ============================================================================
// SECTION: Modules
// ============================================================================

/// Gate console that executes parsed commands against a lot.
pub mod console;
/// Gate command line parser.
pub mod gate_script;
/// Internationalization helpers and message catalog.
pub mod i18n;

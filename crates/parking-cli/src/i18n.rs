// crates/parking-cli/src/i18n.rs
// ============================================================================
// Module: CLI Internationalization Helpers
// Description: Provides message catalog and translation utilities for the CLI.
// Purpose: Centralize user-facing strings for future localization support.
// Dependencies: Standard library collections and formatting utilities.
// ============================================================================

//! ## Overview
//! The parking CLI stores user-facing strings in a small translation catalog
//! so operator output stays consistent. All runtime output should be routed
//! through the [`t!`](crate::t) macro.
//!
//! ## Invariants
//! - The catalog is initialized once and read-only thereafter.
//! - Missing keys fall back to the key itself to avoid panics.
//! - Placeholder substitutions preserve deterministic order.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::HashMap;
use std::sync::OnceLock;

// ============================================================================
// SECTION: Types
// ============================================================================

/// A formatted message argument captured by the [`macro@crate::t`] macro.
#[derive(Clone)]
pub struct MessageArg {
    /// The placeholder name used in message templates (e.g., `"ticket"`).
    pub key: &'static str,
    /// The formatted string value to substitute for this placeholder.
    pub value: String,
}

impl MessageArg {
    /// Constructs a new [`MessageArg`] from a key and displayable value.
    pub fn new(key: &'static str, value: impl Into<String>) -> Self {
        Self {
            key,
            value: value.into(),
        }
    }
}

// ============================================================================
// SECTION: Catalog
// ============================================================================

/// Static catalog entries loaded into the message bundle.
pub(crate) const CATALOG_ITEMS: &[(&str, &str)] = &[
    ("main.version", "parking-lot {version}"),
    ("output.stream.stdout", "stdout"),
    ("output.stream.stderr", "stderr"),
    ("output.stream.unknown", "output"),
    ("output.write_failed", "Failed to write to {stream}: {error}"),
    ("config.load_failed", "Failed to load config: {error}"),
    ("config.validate.ok", "Config valid."),
    (
        "config.validate.summary",
        "Lot {name}: {floors} floors, {slots} slots, fit policy {policy}.",
    ),
    ("lot.build_failed", "Failed to build lot: {error}"),
    ("lot.query_failed", "Lot query failed: {error}"),
    ("availability.header", "{name}: {free} of {total} slots free"),
    ("availability.floor", "Floor {floor}:"),
    ("availability.class", "  {class}: {free}/{total} free"),
    ("availability.json_failed", "Failed to serialize availability: {error}"),
    ("console.script.read_failed", "Failed to read script {path}: {error}"),
    ("console.io_failed", "Console I/O failed: {error}"),
    ("console.line_failed", "line {line}: {error}"),
    ("console.failed_lines", "{count} console line(s) failed."),
    (
        "console.park.assigned",
        "Ticket {ticket}: {vehicle} parked in {slot} ({class}) on floor {floor}.",
    ),
    ("console.park.full", "No {class} slot available for {vehicle} at {entrance}."),
    (
        "console.leave.closed",
        "Ticket {ticket} closed: {vehicle} left {slot} after {hours} h, price {price}.",
    ),
    ("console.find.parked", "{vehicle} is in {slot} on floor {floor} (ticket {ticket})."),
    ("console.find.missing", "{vehicle} is not parked."),
    (
        "console.status",
        "{name}: {occupied}/{total} slots occupied, {active} open tickets, {closed} closed.",
    ),
    ("console.advance.ok", "Clock advanced {minutes} min to {time}."),
];

/// Translates a catalog key with named arguments.
#[must_use]
pub fn translate(key: &str, args: Vec<MessageArg>) -> String {
    let template = catalog().get(key).copied().unwrap_or(key);
    if args.is_empty() {
        return template.to_string();
    }

    let mut result = template.to_string();
    for arg in args {
        let placeholder = format!("{{{}}}", arg.key);
        result = result.replace(&placeholder, &arg.value);
    }
    result
}

/// Returns the static English catalog used by the CLI.
pub(crate) fn catalog() -> &'static HashMap<&'static str, &'static str> {
    static CATALOG: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();

    CATALOG.get_or_init(|| CATALOG_ITEMS.iter().copied().collect())
}

// ============================================================================
// SECTION: Macro
// ============================================================================

/// Formats a message from a key and named arguments.
///
/// # Arguments
///
/// - `$key` must match a catalog entry.
/// - Named arguments are substituted into `{placeholder}` positions.
///
/// # Returns
///
/// A [`String`] with placeholders substituted.
#[macro_export]
macro_rules! t {
    ($key:literal $(, $name:ident = $value:expr )* $(,)?) => {{
        let args = ::std::vec![
            $(
                $crate::i18n::MessageArg::new(stringify!($name), $value.to_string()),
            )*
        ];
        $crate::i18n::translate($key, args)
    }};
}

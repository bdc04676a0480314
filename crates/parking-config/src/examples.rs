// crates/parking-config/src/examples.rs
// ============================================================================
// Module: Config Examples
// Description: Canonical example configuration payload.
// Purpose: Deterministic starter config for operators and tests.
// Dependencies: std
// ============================================================================

//! ## Overview
//! The example describes a two-floor lot with two entrances and the default
//! rate card. It must always pass [`crate::ParkingConfig::from_toml_str`].

/// Returns a canonical example `parking-lot.toml` configuration.
#[must_use]
pub fn config_toml_example() -> String {
    String::from(
        r#"[lot]
name = "Central"
fit_policy = "nearest_fit"

[pricing]
base_rate = 0.01

[pricing.surcharges]
two_wheeler = 0.01
small = 0.02
medium = 0.03
large = 0.04

[audit]
sink = "stderr"
# sink = "file"
# path = "parking-audit.jsonl"

[[floors]]
id = 1
name = "Ground"

[[floors.slots]]
id = "S1_0"
size_class = "small"
distances = { Entrance1 = 5.0, Entrance2 = 10.0 }

[[floors.slots]]
id = "S1_1"
size_class = "small"
distances = { Entrance1 = 6.0, Entrance2 = 11.0 }

[[floors.slots]]
id = "M1_0"
size_class = "medium"
distances = { Entrance1 = 4.0, Entrance2 = 9.0 }

[[floors.slots]]
id = "M1_1"
size_class = "medium"
distances = { Entrance1 = 7.0, Entrance2 = 8.0 }

[[floors.slots]]
id = "B2_0"
size_class = "large"
distances = { Entrance1 = 12.0, Entrance2 = 20.0 }

[[floors.slots]]
id = "B2_1"
size_class = "large"
distances = { Entrance1 = 15.0, Entrance2 = 18.0 }

[[floors]]
id = 2
name = "Upper"

[[floors.slots]]
id = "T2_0"
size_class = "two_wheeler"
distances = { Entrance1 = 3.0 }

[[floors.slots]]
id = "S2_0"
size_class = "small"
distances = { Entrance1 = 8.0, Entrance2 = 2.0 }
"#,
    )
}

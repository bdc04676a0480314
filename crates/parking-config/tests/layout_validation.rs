//! Layout and pricing validation tests for parking-config.
// crates/parking-config/tests/layout_validation.rs
// =============================================================================
// Module: Layout Validation Tests
// Description: Floor, slot, distance, and rate card validation.
// Purpose: Ensure invalid lots are rejected before any engine is built.
// =============================================================================

use parking_config::ParkingConfig;
use parking_core::EntranceId;
use parking_core::FloorId;
use parking_core::FloorLayout;
use parking_core::SizeClass;
use parking_core::SlotLayout;

mod common;

use common::assert_invalid;
use common::minimal_config;

type TestResult = Result<(), String>;

fn extra_floor(id: u32, slot_id: &str) -> FloorLayout {
    FloorLayout {
        id: FloorId::new(id),
        name: None,
        slots: vec![SlotLayout {
            id: slot_id.into(),
            size_class: SizeClass::Large,
            distances: std::collections::BTreeMap::new(),
        }],
    }
}

#[test]
fn minimal_config_is_valid() -> TestResult {
    minimal_config()?.validate().map_err(|err| err.to_string())
}

#[test]
fn empty_lot_name_is_rejected() -> TestResult {
    let mut config = minimal_config()?;
    config.lot.name = "   ".to_string();
    assert_invalid(config.validate(), "lot.name must be non-empty")
}

#[test]
fn overlong_lot_name_is_rejected() -> TestResult {
    let mut config = minimal_config()?;
    config.lot.name = "x".repeat(129);
    assert_invalid(config.validate(), "lot.name exceeds max length")
}

#[test]
fn config_without_floors_is_rejected() -> TestResult {
    let mut config = minimal_config()?;
    config.floors.clear();
    assert_invalid(config.validate(), "at least one floor")
}

#[test]
fn duplicate_floor_id_is_rejected() -> TestResult {
    let mut config = minimal_config()?;
    config.floors.push(extra_floor(1, "B"));
    assert_invalid(config.validate(), "duplicate floor id 1")
}

#[test]
fn duplicate_slot_across_floors_is_rejected() -> TestResult {
    let mut config = minimal_config()?;
    config.floors.push(extra_floor(2, "A"));
    assert_invalid(config.validate(), "duplicate slot id A")
}

#[test]
fn negative_distance_is_rejected() -> TestResult {
    let mut config = minimal_config()?;
    config.floors[0].slots[0].distances.insert(EntranceId::new("Back"), -2.0);
    assert_invalid(config.validate(), "must be finite and non-negative")
}

#[test]
fn nan_distance_is_rejected() -> TestResult {
    let mut config = minimal_config()?;
    config.floors[0].slots[0].distances.insert(EntranceId::new("Back"), f64::NAN);
    assert_invalid(config.validate(), "distance to Back")
}

#[test]
fn negative_base_rate_is_rejected() -> TestResult {
    let mut config = minimal_config()?;
    config.pricing.base_rate = -0.01;
    assert_invalid(config.validate(), "pricing: rate base_rate")
}

#[test]
fn decreasing_surcharges_are_rejected() -> TestResult {
    let mut config = minimal_config()?;
    config.pricing.surcharges.two_wheeler = 0.5;
    assert_invalid(config.validate(), "pricing: surcharge for small is lower than for two_wheeler")
}

#[test]
fn partial_surcharges_use_defaults() -> TestResult {
    let text = format!("{}\n[pricing.surcharges]\nlarge = 0.10\n", common::MINIMAL_TOML);
    let config = ParkingConfig::from_toml_str(&text).map_err(|err| err.to_string())?;
    let small = config.pricing.rate(SizeClass::Small);
    let large = config.pricing.rate(SizeClass::Large);
    if (small - 0.03).abs() > 1e-9 || (large - 0.11).abs() > 1e-9 {
        return Err(format!("unexpected rates small={small} large={large}"));
    }
    Ok(())
}

#[test]
fn tightest_fit_policy_parses() -> TestResult {
    let text = common::MINIMAL_TOML.replace(
        "name = \"Minimal\"",
        "name = \"Minimal\"\nfit_policy = \"tightest_fit\"",
    );
    let config = ParkingConfig::from_toml_str(&text).map_err(|err| err.to_string())?;
    if config.lot_policy().fit_policy == parking_core::FitPolicy::TightestFit {
        Ok(())
    } else {
        Err("fit policy should be tightest_fit".to_string())
    }
}

// crates/parking-core/src/core/floor/tests.rs
// ============================================================================
// Module: Floor Unit Tests
// Description: Unit coverage for candidate ordering and nearest-fit selection.
// Purpose: Pin the floor-level selection policy.
// Dependencies: parking-core
// ============================================================================

//! ## Overview
//! Exercises candidate ordering, nearest-fit selection, tie breaking, the
//! tightest-fit policy, and floor-scoped release paths.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::float_cmp,
    reason = "Test-only panic-based assertions are permitted."
)]

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use super::FitPolicy;
use super::Floor;
use super::FloorError;
use crate::core::identifiers::EntranceId;
use crate::core::identifiers::FloorId;
use crate::core::identifiers::SlotId;
use crate::core::identifiers::VehicleId;
use crate::core::size::SizeClass;
use crate::core::slot::Distance;
use crate::core::slot::Slot;
use crate::core::vehicle::Vehicle;

/// Builds a slot on `floor` with one distance to `E1`.
fn slot(floor: u32, id: &str, class: SizeClass, e1: f64) -> Slot {
    let mut distances = BTreeMap::new();
    distances.insert(EntranceId::new("E1"), e1);
    Slot::new(id, FloorId::new(floor), class, distances)
}

/// Builds floor 1 from `(id, class, distance)` triples.
fn floor_with(slots: &[(&str, SizeClass, f64)]) -> Floor {
    let mut floor = Floor::new(FloorId::new(1), None);
    for (id, class, distance) in slots {
        floor.register_slot(slot(1, id, *class, *distance), *class).unwrap();
    }
    floor
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[test]
fn candidate_slots_are_class_ascending_and_skip_smaller_classes() {
    let floor = floor_with(&[
        ("L0", SizeClass::Large, 1.0),
        ("T0", SizeClass::TwoWheeler, 1.0),
        ("S0", SizeClass::Small, 1.0),
        ("M0", SizeClass::Medium, 1.0),
        ("S1", SizeClass::Small, 1.0),
    ]);
    let vehicle = Vehicle::new("car", SizeClass::Small);
    let ids: Vec<&str> =
        floor.candidate_slots(&vehicle).iter().map(|slot| slot.id().as_str()).collect();
    assert_eq!(ids, vec!["S0", "S1", "M0", "L0"]);
}

#[test]
fn assign_best_picks_minimum_distance() {
    let mut floor = floor_with(&[
        ("A", SizeClass::Medium, 12.0),
        ("B", SizeClass::Medium, 15.0),
        ("C", SizeClass::Medium, 4.0),
    ]);
    let vehicle = Vehicle::new("car", SizeClass::Medium);
    let placement = floor
        .assign_best(&vehicle, &EntranceId::new("E1"), FitPolicy::NearestFit)
        .unwrap()
        .unwrap();
    assert_eq!(placement.slot_id, SlotId::new("C"));
    assert_eq!(placement.distance, Distance::Known(4.0));
}

#[test]
fn ties_go_to_the_earlier_candidate() {
    let mut floor = floor_with(&[
        ("M0", SizeClass::Medium, 3.0),
        ("S0", SizeClass::Small, 3.0),
        ("S1", SizeClass::Small, 3.0),
    ]);
    let vehicle = Vehicle::new("car", SizeClass::Small);
    let entrance = EntranceId::new("E1");
    let first = floor.assign_best(&vehicle, &entrance, FitPolicy::NearestFit).unwrap().unwrap();
    assert_eq!(first.slot_id, SlotId::new("S0"));
    let second = floor
        .assign_best(&Vehicle::new("car-2", SizeClass::Small), &entrance, FitPolicy::NearestFit)
        .unwrap()
        .unwrap();
    assert_eq!(second.slot_id, SlotId::new("S1"));
}

#[test]
fn unknown_distance_ranks_last() {
    let mut floor = Floor::new(FloorId::new(1), None);
    floor
        .register_slot(
            Slot::new("far", FloorId::new(1), SizeClass::Small, BTreeMap::new()),
            SizeClass::Small,
        )
        .unwrap();
    floor.register_slot(slot(1, "near", SizeClass::Small, 900.0), SizeClass::Small).unwrap();
    let placement = floor
        .assign_best(&Vehicle::new("car", SizeClass::Small), &EntranceId::new("E1"), FitPolicy::NearestFit)
        .unwrap()
        .unwrap();
    assert_eq!(placement.slot_id, SlotId::new("near"));
}

#[test]
fn tightest_fit_prefers_exact_class_over_closer_larger_slot() {
    let mut nearest = floor_with(&[("S0", SizeClass::Small, 5.0), ("M0", SizeClass::Medium, 4.0)]);
    let mut tightest = nearest.clone();
    let vehicle = Vehicle::new("car", SizeClass::Small);
    let entrance = EntranceId::new("E1");

    let picked = nearest.assign_best(&vehicle, &entrance, FitPolicy::NearestFit).unwrap().unwrap();
    assert_eq!(picked.slot_id, SlotId::new("M0"));

    let picked =
        tightest.assign_best(&vehicle, &entrance, FitPolicy::TightestFit).unwrap().unwrap();
    assert_eq!(picked.slot_id, SlotId::new("S0"));
    assert_eq!(picked.distance.known(), Some(5.0));
}

#[test]
fn tightest_fit_widens_when_exact_class_is_full() {
    let mut floor = floor_with(&[("S0", SizeClass::Small, 5.0), ("L0", SizeClass::Large, 9.0)]);
    let entrance = EntranceId::new("E1");
    floor
        .assign_best(&Vehicle::new("a", SizeClass::Small), &entrance, FitPolicy::TightestFit)
        .unwrap()
        .unwrap();
    let picked = floor
        .assign_best(&Vehicle::new("b", SizeClass::Small), &entrance, FitPolicy::TightestFit)
        .unwrap()
        .unwrap();
    assert_eq!(picked.slot_id, SlotId::new("L0"));
}

#[test]
fn assign_best_returns_none_when_full_or_too_small() {
    let mut floor = floor_with(&[("S0", SizeClass::Small, 1.0)]);
    let entrance = EntranceId::new("E1");
    let truck = Vehicle::new("truck", SizeClass::Large);
    assert!(floor.assign_best(&truck, &entrance, FitPolicy::NearestFit).unwrap().is_none());
    floor
        .assign_best(&Vehicle::new("a", SizeClass::Small), &entrance, FitPolicy::NearestFit)
        .unwrap()
        .unwrap();
    let second = Vehicle::new("b", SizeClass::Small);
    assert!(floor.assign_best(&second, &entrance, FitPolicy::NearestFit).unwrap().is_none());
}

#[test]
fn release_vehicle_frees_matching_slot_only() {
    let mut floor = floor_with(&[("S0", SizeClass::Small, 1.0), ("S1", SizeClass::Small, 2.0)]);
    let entrance = EntranceId::new("E1");
    for id in ["a", "b"] {
        floor
            .assign_best(&Vehicle::new(id, SizeClass::Small), &entrance, FitPolicy::NearestFit)
            .unwrap()
            .unwrap();
    }
    let freed = floor.release_vehicle(&VehicleId::new("b")).unwrap();
    assert_eq!(freed, SlotId::new("S1"));
    assert_eq!(floor.occupied_count(), 1);
    let missing = floor.release_vehicle(&VehicleId::new("zzz")).unwrap_err();
    assert!(matches!(missing, FloorError::VehicleNotFound { .. }));
}

#[test]
fn release_slot_rejects_free_slot() {
    let mut floor = floor_with(&[("S0", SizeClass::Small, 1.0)]);
    let err = floor.release_slot(&SlotId::new("S0")).unwrap_err();
    assert!(matches!(err, FloorError::Slot(_)));
    let err = floor.release_slot(&SlotId::new("nope")).unwrap_err();
    assert!(matches!(err, FloorError::SlotNotFound { .. }));
}

#[test]
fn register_slot_rejects_mismatches_and_duplicates() {
    let mut floor = Floor::new(FloorId::new(1), Some("Ground".to_string()));
    let err = floor.register_slot(slot(2, "X", SizeClass::Small, 1.0), SizeClass::Small).unwrap_err();
    assert!(matches!(err, FloorError::FloorMismatch { .. }));
    let err = floor.register_slot(slot(1, "X", SizeClass::Small, 1.0), SizeClass::Large).unwrap_err();
    assert!(matches!(err, FloorError::ClassMismatch { .. }));
    floor.register_slot(slot(1, "X", SizeClass::Small, 1.0), SizeClass::Small).unwrap();
    let err = floor.register_slot(slot(1, "X", SizeClass::Small, 1.0), SizeClass::Small).unwrap_err();
    assert!(matches!(err, FloorError::DuplicateSlot { .. }));
}

#[test]
fn availability_counts_free_and_total_per_class() {
    let mut floor = floor_with(&[
        ("S0", SizeClass::Small, 1.0),
        ("S1", SizeClass::Small, 2.0),
        ("L0", SizeClass::Large, 3.0),
    ]);
    floor
        .assign_best(&Vehicle::new("a", SizeClass::Small), &EntranceId::new("E1"), FitPolicy::NearestFit)
        .unwrap()
        .unwrap();
    let availability = floor.availability();
    assert_eq!(availability[&SizeClass::Small].free, 1);
    assert_eq!(availability[&SizeClass::Small].total, 2);
    assert_eq!(availability[&SizeClass::Large].free, 1);
    assert!(!availability.contains_key(&SizeClass::Medium));
}

#[test]
fn placement_names_the_slot_now_holding_the_vehicle() {
    let mut floor = floor_with(&[
        ("S0", SizeClass::Small, 9.0),
        ("M0", SizeClass::Medium, 2.0),
        ("M1", SizeClass::Medium, 1.0),
    ]);
    let vehicle = Vehicle::new("car", SizeClass::Small);
    let placement = floor
        .assign_best(&vehicle, &EntranceId::new("E1"), FitPolicy::NearestFit)
        .unwrap()
        .unwrap();
    assert_eq!(placement.slot_id, SlotId::new("M1"));
    assert_eq!(placement.slot_class, SizeClass::Medium);
    let held = floor.slot(&placement.slot_id).unwrap();
    assert_eq!(held.occupant(), Some(&VehicleId::new("car")));
    assert_eq!(floor.occupied_count(), 1);
}

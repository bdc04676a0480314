// crates/parking-core/tests/common/mod.rs
// ============================================================================
// Module: Parking Core Test Fixtures
// Description: Shared layout and lot builders for integration tests.
// ============================================================================
//! ## Overview
//! Builds small lots with a manual clock and an in-memory audit sink.

#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "Shared fixtures; not every test binary uses every helper."
)]

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use parking_core::EntranceId;
use parking_core::FitPolicy;
use parking_core::FloorId;
use parking_core::FloorLayout;
use parking_core::InMemoryAuditSink;
use parking_core::LotLayout;
use parking_core::LotPolicy;
use parking_core::ManualClock;
use parking_core::ParkingLot;
use parking_core::SizeClass;
use parking_core::SlotLayout;
use parking_core::Timestamp;

/// Fixed start instant: 2026-01-01T00:00:00Z.
pub const START_MS: i64 = 1_767_225_600_000;

/// Lot under test with handles on its clock and audit sink.
pub struct Harness {
    pub lot: ParkingLot,
    pub clock: Arc<ManualClock>,
    pub audit: Arc<InMemoryAuditSink>,
}

impl Harness {
    /// Moves the clock forward by whole minutes.
    pub fn advance_minutes(&self, minutes: u64) {
        self.clock.advance(Duration::from_secs(minutes * 60));
    }
}

/// Builds a slot layout with distances to named entrances.
pub fn slot(id: &str, class: SizeClass, distances: &[(&str, f64)]) -> SlotLayout {
    SlotLayout {
        id: id.into(),
        size_class: class,
        distances: distances
            .iter()
            .map(|(entrance, distance)| (EntranceId::new(*entrance), *distance))
            .collect::<BTreeMap<_, _>>(),
    }
}

/// Builds a floor layout.
pub fn floor(id: u32, slots: Vec<SlotLayout>) -> FloorLayout {
    FloorLayout {
        id: FloorId::new(id),
        name: None,
        slots,
    }
}

/// Builds a lot layout named "Test".
pub fn layout(floors: Vec<FloorLayout>) -> LotLayout {
    LotLayout {
        name: "Test".to_string(),
        floors,
    }
}

/// Configures a lot with default rates and the given fit policy.
pub fn harness_with(floors: Vec<FloorLayout>, fit_policy: FitPolicy) -> Harness {
    let clock = Arc::new(ManualClock::new(Timestamp::from_unix_millis(START_MS)));
    let audit = Arc::new(InMemoryAuditSink::new());
    let policy = LotPolicy {
        fit_policy,
        ..LotPolicy::default()
    };
    let lot = ParkingLot::configure(&layout(floors), policy, clock.clone(), audit.clone())
        .expect("configure lot");
    Harness {
        lot,
        clock,
        audit,
    }
}

/// Configures a lot with default rates and nearest fit.
pub fn harness(floors: Vec<FloorLayout>) -> Harness {
    harness_with(floors, FitPolicy::NearestFit)
}

/// The two-floor sample layout: three classes per floor, two entrances.
pub fn sample_floors() -> Vec<FloorLayout> {
    vec![
        floor(1, vec![
            slot("S1_0", SizeClass::Small, &[("Entrance1", 5.0), ("Entrance2", 10.0)]),
            slot("S1_1", SizeClass::Small, &[("Entrance1", 6.0), ("Entrance2", 11.0)]),
            slot("M1_0", SizeClass::Medium, &[("Entrance1", 4.0), ("Entrance2", 9.0)]),
            slot("M1_1", SizeClass::Medium, &[("Entrance1", 7.0), ("Entrance2", 8.0)]),
            slot("B2_0", SizeClass::Large, &[("Entrance1", 12.0), ("Entrance2", 20.0)]),
            slot("B2_1", SizeClass::Large, &[("Entrance1", 15.0), ("Entrance2", 18.0)]),
        ]),
        floor(2, vec![
            slot("S2_0", SizeClass::Small, &[("Entrance1", 1.0)]),
            slot("T2_0", SizeClass::TwoWheeler, &[("Entrance1", 2.0)]),
        ]),
    ]
}

/// Asserts two floats agree within a small tolerance.
pub fn assert_close(actual: f64, expected: f64) {
    assert!((actual - expected).abs() < 1e-9, "expected {expected}, got {actual}");
}

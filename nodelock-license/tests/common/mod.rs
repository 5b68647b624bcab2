//! Shared test helpers for license tests.

#![allow(dead_code)]

use chrono::{Duration, NaiveDateTime};
use nodelock_license::{Clock, EnvelopeParams, Fingerprint, LicenseCodec, RandomSource};
use nodelock_types::{timestamp, LicenseRecord, NodeInfo};
use std::sync::Mutex;

/// Support contact used across tests.
pub const CONTACT: &str = "support@nodelock.dev";

/// Returns the codec both roles share in these tests.
pub fn codec() -> LicenseCodec {
    LicenseCodec::new(EnvelopeParams::new(3, 3), CONTACT)
}

/// Returns a grant record with a century-long window and room for 3 nodes.
pub fn sample_record() -> LicenseRecord {
    LicenseRecord {
        start_time: "2024-01-01T00:00:00".into(),
        end_time: "2124-01-01T00:00:00".into(),
        client_time_zone: "+08:00".into(),
        license_create_time: "2024-01-01T00:00:00".into(),
        allow_nodes: 3,
        use_nodes: 0,
        mac_addr: "aa:bb:cc:dd:ee:ff".into(),
        mother_board_id: "SN-MGMT-0001".into(),
        customer_tag: "acme".into(),
        model_route: "/api/v1".into(),
        ..Default::default()
    }
}

/// Returns a worker descriptor numbered `n`.
pub fn worker(n: u32) -> NodeInfo {
    NodeInfo {
        node_ip: format!("10.0.0.{n}"),
        node_name: format!("worker-{n}"),
        node_mac: format!("aa:bb:cc:dd:ee:{n:02x}"),
        node_mother_board_id: format!("SN-WORK-{n:04}"),
    }
}

/// Fingerprint provider that returns a fixed identifier.
pub struct FixedFingerprint(pub String);

impl Fingerprint for FixedFingerprint {
    fn motherboard_id(&self) -> String {
        self.0.clone()
    }
}

/// Clock pinned to a fixed instant.
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

/// Clock that moves by a fixed number of minutes on every reading.
///
/// Positive steps simulate wall-clock jumps forward under the monitor's
/// sleep; negative steps simulate a clock being set backward.
pub struct SteppedClock {
    current: Mutex<NaiveDateTime>,
    step_minutes: i64,
}

impl SteppedClock {
    pub fn new(start: NaiveDateTime, step_minutes: i64) -> Self {
        Self {
            current: Mutex::new(start),
            step_minutes,
        }
    }

    pub fn starting_at(start: &str, step_minutes: i64) -> Self {
        Self::new(timestamp::parse(start).unwrap(), step_minutes)
    }
}

impl Clock for SteppedClock {
    fn now(&self) -> NaiveDateTime {
        let mut current = self.current.lock().unwrap();
        let reading = *current;
        *current += Duration::minutes(self.step_minutes);
        reading
    }
}

/// Jitter source that cycles through a fixed script of slot values.
pub struct CyclingRandom {
    script: Vec<u32>,
    next: usize,
}

impl CyclingRandom {
    pub fn new(script: Vec<u32>) -> Self {
        assert!(!script.is_empty());
        Self { script, next: 0 }
    }
}

impl RandomSource for CyclingRandom {
    fn next_below(&mut self, bound: u32) -> u32 {
        let value = self.script[self.next % self.script.len()];
        self.next += 1;
        value.min(bound.saturating_sub(1))
    }
}

/// Parses a wire-format timestamp, panicking on bad test input.
pub fn at(value: &str) -> NaiveDateTime {
    timestamp::parse(value).unwrap()
}

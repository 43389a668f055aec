//! In-memory telemetry collector
//!
//! Plays the role of the logging agent: a thread-safe sink that agents feed
//! from worker threads, read back after the run for offline analysis.

use parking_lot::Mutex;

use hestia_core::UnitId;
use hestia_ports::{BidRecord, ExpectationRecord, TelemetrySink};

/// Collects every telemetry record in memory.
#[derive(Debug, Default)]
pub struct MemoryTelemetry {
    bids: Mutex<Vec<BidRecord>>,
    expectations: Mutex<Vec<ExpectationRecord>>,
    units_in_market: Mutex<Vec<UnitId>>,
}

impl MemoryTelemetry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bids(&self) -> Vec<BidRecord> {
        self.bids.lock().clone()
    }

    pub fn expectations(&self) -> Vec<ExpectationRecord> {
        self.expectations.lock().clone()
    }

    pub fn units_in_market(&self) -> Vec<UnitId> {
        self.units_in_market.lock().clone()
    }

    /// Bid records that were accepted
    pub fn accepted_bids(&self) -> Vec<BidRecord> {
        self.bids
            .lock()
            .iter()
            .filter(|record| record.accepted)
            .cloned()
            .collect()
    }
}

impl TelemetrySink for MemoryTelemetry {
    fn record_bid(&self, record: BidRecord) {
        self.bids.lock().push(record);
    }

    fn record_expectation(&self, record: ExpectationRecord) {
        self.expectations.lock().push(record);
    }

    fn record_unit_in_market(&self, unit_id: UnitId) {
        self.units_in_market.lock().push(unit_id);
    }
}

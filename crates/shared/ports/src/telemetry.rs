use hestia_core::{AgentId, Day, Price, UnitId};
use serde::Serialize;

/// One bid decision, recorded by the seller as the reply goes out.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BidRecord {
    pub day: Day,
    pub seller: AgentId,
    pub bidder: AgentId,
    pub unit_id: UnitId,
    pub willingness_to_pay: Price,
    pub asking_price: Price,
    pub target_price: Price,
    pub bid_value: Price,
    /// Bids received for this unit so far today, this one included
    pub daily_bid_count: u32,
    pub accepted: bool,
}

/// One interval of a freshly computed expectation curve.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpectationRecord {
    pub day: Day,
    /// Day the interval becomes the active one
    pub day_to_apply: Day,
    pub seller: AgentId,
    pub unit_id: UnitId,
    pub hedonic_price: Price,
    pub asking_price: Price,
    pub target_price: Price,
}

/// Optional side channel for offline analysis.
///
/// Not part of the control contract: implementations must not feed decisions
/// back into the simulation.
pub trait TelemetrySink: Send + Sync {
    fn record_bid(&self, record: BidRecord);

    fn record_expectation(&self, record: ExpectationRecord);

    /// A unit entered (or left) the market under an institutional seller
    fn record_unit_in_market(&self, unit_id: UnitId) {
        let _ = unit_id;
    }
}

/// Sink that discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullTelemetry;

impl TelemetrySink for NullTelemetry {
    fn record_bid(&self, _record: BidRecord) {}

    fn record_expectation(&self, _record: ExpectationRecord) {}
}

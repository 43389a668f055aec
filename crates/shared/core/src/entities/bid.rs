use serde::{Deserialize, Serialize};

use crate::values::{AgentId, Day, Price, UnitId};

/// A bid on a listed unit. Transient - exists only for one day's arbitration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bid {
    pub bidder: AgentId,
    pub unit_id: UnitId,
    /// Offered value; compared against the seller's target price
    pub value: Price,
    pub willingness_to_pay: Price,
    /// Day the bid was submitted
    pub day: Day,
}

impl Bid {
    pub fn new(
        bidder: AgentId,
        unit_id: UnitId,
        value: Price,
        willingness_to_pay: Price,
        day: Day,
    ) -> Self {
        Self {
            bidder,
            unit_id,
            value,
            willingness_to_pay,
            day,
        }
    }
}

/// Seller's answer to a bid.
///
/// Business rejections are always typed responses, never errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BidResponse {
    /// The bid won the unit; sent at the day boundary
    Accepted,
    /// The bid did not satisfy the seller's target price
    NotAccepted,
    /// A better bid was seen the same day
    BetterOffer,
    /// The unit is not listed (already sold, withdrawn, or owner mismatch)
    NotAvailable,
}

impl BidResponse {
    pub fn is_accepted(&self) -> bool {
        matches!(self, BidResponse::Accepted)
    }
}

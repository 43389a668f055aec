use hestia_core::UnitId;
use thiserror::Error;

/// Domain-level errors for market operations.
///
/// These surface only at initialization or from configuration validation.
/// Business rejections travel as typed `BidResponse` values, and stale
/// mutation requests are dropped at batch-apply time, never raised.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MarketError {
    #[error("Invalid listing configuration for unit {unit_id}: {reason}")]
    InvalidConfiguration { unit_id: UnitId, reason: String },

    #[error("Unknown unit id: {0}")]
    UnknownUnit(UnitId),
}

pub type MarketResult<T> = std::result::Result<T, MarketError>;

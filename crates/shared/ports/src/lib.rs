//! Hestia Ports
//!
//! Port definitions (traits) at the boundary of the housing-market core:
//! pricing, unit lookup, bid messaging and telemetry. Collaborators on the
//! other side of these ports (database loaders, the scripted pricing engine,
//! the scheduler) live outside this repository.

mod directory;
mod error;
mod messaging;
mod pricing;
mod stats;
mod telemetry;

pub use directory::UnitDirectory;
pub use error::{MarketError, MarketResult};
pub use messaging::BidMessenger;
pub use pricing::PricingModel;
pub use stats::MarketStats;
pub use telemetry::{BidRecord, ExpectationRecord, NullTelemetry, TelemetrySink};

//! Hestia Market
//!
//! The housing-market registry: the authoritative set of listed units.
//!
//! Thread safety without locks rests on two rules:
//!
//! 1. All add/update/remove calls only queue a mutation request; requests
//!    become visible at the very beginning of the next simulated day, when
//!    the scheduler applies the whole batch on one thread.
//! 2. The applied snapshot is immutable for the entire day, so reads never
//!    observe a partially-applied batch and never race with writers.
//!
//! Bidders should use [`MarketRegistry::available_entries`] to get the
//! current list of units available to buy.

mod registry;
mod snapshot;

pub use registry::{ApplyStats, MarketRegistry};
pub use snapshot::MarketSnapshot;

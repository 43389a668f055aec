//! Hestia Core Domain
//!
//! Pure domain types for the Hestia housing-market simulation.
//! This crate contains no async, no I/O, and is 100% unit testable.

pub mod entities;
pub mod values;

// Re-export commonly used types at crate root
pub use entities::{Bid, BidResponse, Entry, ExpectationEntry, Unit};
pub use values::{AgentId, Day, Price, UnitId, ZoneId};

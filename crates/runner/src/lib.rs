//! Hestia Runner - Housing-Market Simulation
//!
//! Orchestrates the housing market day loop:
//!
//! - **Bootstrap**: unit/agent generation and wiring
//! - **Dispatcher**: bid and response mailboxes between agents
//! - **Bidder**: reference bidder harness
//! - **Simulation**: per-day phases and the day-boundary batch apply
//!
//! ## Day structure
//!
//! ```text
//!  ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//!  │ Seller phase  │ → │ Bidder phase  │ → │ Arbitration   │ → barrier:
//!  │ settle D-1,   │   │ read snapshot,│   │ sellers drain │   apply
//!  │ withdraw,     │   │ submit bids   │   │ mailboxes,    │   pending
//!  │ re-price, list│   │               │   │ reply         │   batch
//!  └───────────────┘   └───────────────┘   └───────────────┘
//! ```
//!
//! Each phase updates every agent exactly once on one worker thread; all
//! registry mutations queued during the day become visible on day D+1.

pub mod bidder;
pub mod bootstrap;
pub mod dispatch;
pub mod error;
pub mod simulation;
pub mod telemetry;

// Re-export main types
pub use bidder::{BidderAgent, BidderConfig};
pub use bootstrap::{SimulationBootstrap, StaticUnitDirectory};
pub use dispatch::MessageDispatcher;
pub use error::{SimulationError, SimulationResult};
pub use simulation::{DayResult, Simulation, SimulationConfig, SimulationResults};
pub use telemetry::MemoryTelemetry;

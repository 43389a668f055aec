//! Simulation - full housing-market day loop
//!
//! Ties together the registry, sellers, bidders and the dispatcher, and
//! drives the three per-day phases plus the day-boundary batch apply.
//! Each agent is updated by exactly one worker thread per day; agents only
//! interact through messages and the registry's deferred-write protocol.

use std::sync::Arc;
use std::thread;

use log::{debug, info};
use serde::Deserialize;

use hestia_agents::SellerConfig;
use hestia_core::Day;
use hestia_market::{ApplyStats, MarketRegistry};
use hestia_ports::MarketStats;
use hestia_pricing::LinearDecayConfig;

use crate::bidder::{BidderAgent, BidderConfig};
use crate::bootstrap::{SellerSlot, SimulationBootstrap};
use crate::error::{SimulationError, SimulationResult};
use crate::telemetry::MemoryTelemetry;

/// Simulation configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Number of simulated days
    pub days: Day,
    pub household_sellers: usize,
    pub institutional_sellers: usize,
    pub units_per_seller: usize,
    pub bidders: usize,
    pub zones: u64,
    /// Market-entry days are staggered across [0, entry_day_window)
    pub entry_day_window: Day,
    /// Root seed; agents derive their own seeds from it
    pub seed: u64,
    pub seller: SellerConfig,
    pub bidder: BidderConfig,
    pub pricing: LinearDecayConfig,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            days: 40,
            household_sellers: 8,
            institutional_sellers: 2,
            units_per_seller: 3,
            bidders: 30,
            zones: 4,
            entry_day_window: 10,
            seed: 42,
            seller: SellerConfig::default(),
            bidder: BidderConfig::default(),
            pricing: LinearDecayConfig::default(),
        }
    }
}

impl SimulationConfig {
    /// Parse a configuration from JSON; absent fields take defaults
    pub fn from_json(json: &str) -> SimulationResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: impl AsRef<std::path::Path>) -> SimulationResult<Self> {
        Self::from_json(&std::fs::read_to_string(path)?)
    }

    /// Hard validation at initialization; listing-level configuration
    /// problems (e.g. a zero price interval) are soft and merely prevent
    /// listings.
    pub fn validate(&self) -> SimulationResult<()> {
        if self.days == 0 {
            return Err(SimulationError::InvalidConfig(
                "days must be positive".into(),
            ));
        }
        if self.household_sellers + self.institutional_sellers == 0 {
            return Err(SimulationError::InvalidConfig(
                "at least one seller is required".into(),
            ));
        }
        if self.bidder.wp_low >= self.bidder.wp_high {
            return Err(SimulationError::InvalidConfig(
                "bidder willingness-to-pay band is empty".into(),
            ));
        }
        if self.bidder.bid_fraction <= 0.0 {
            return Err(SimulationError::InvalidConfig(
                "bid fraction must be positive".into(),
            ));
        }
        Ok(())
    }
}

/// Result of a single simulated day
#[derive(Debug, Clone, Copy)]
pub struct DayResult {
    pub day: Day,
    /// Entries visible after the day's batch apply
    pub listings: usize,
    /// Bids received by sellers during the day
    pub bids: u64,
    pub applied: ApplyStats,
}

/// Aggregate results of a run
#[derive(Debug, Clone, Default)]
pub struct SimulationResults {
    pub days: Day,
    pub total_bids: u64,
    pub total_responses: u64,
    pub accepted_bids: u64,
    /// Entries still listed when the run ended
    pub remaining_listings: usize,
}

/// The full housing-market simulation
pub struct Simulation {
    config: SimulationConfig,
    market: Arc<MarketRegistry>,
    telemetry: Arc<MemoryTelemetry>,
    stats: Arc<MarketStats>,
    sellers: Vec<SellerSlot>,
    bidders: Vec<BidderAgent>,
    day: Day,
}

impl Simulation {
    /// Create a simulation with the default configuration
    pub fn new() -> SimulationResult<Self> {
        Self::with_config(SimulationConfig::default())
    }

    pub fn with_config(config: SimulationConfig) -> SimulationResult<Self> {
        let bootstrap = SimulationBootstrap::with_config(&config)?;
        Ok(Self {
            config,
            market: bootstrap.market,
            telemetry: bootstrap.telemetry,
            stats: bootstrap.stats,
            sellers: bootstrap.sellers,
            bidders: bootstrap.bidders,
            day: 0,
        })
    }

    pub fn market(&self) -> &Arc<MarketRegistry> {
        &self.market
    }

    pub fn telemetry(&self) -> &Arc<MemoryTelemetry> {
        &self.telemetry
    }

    pub fn stats(&self) -> &Arc<MarketStats> {
        &self.stats
    }

    pub fn day(&self) -> Day {
        self.day
    }

    /// Run one simulated day: the three agent phases, then the barrier.
    pub fn tick(&mut self) -> DayResult {
        let day = self.day;
        let bids_before = self.stats.bids();
        let workers = thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);

        // phase 1: sellers settle yesterday, withdraw, re-price and list
        let chunk = self.sellers.len().div_ceil(workers).max(1);
        thread::scope(|scope| {
            for slots in self.sellers.chunks_mut(chunk) {
                scope.spawn(move || {
                    for slot in slots {
                        slot.agent.update(day);
                    }
                });
            }
        });

        // phase 2: bidders read the (still unchanged) snapshot and bid
        let chunk = self.bidders.len().div_ceil(workers).max(1);
        thread::scope(|scope| {
            for bidders in self.bidders.chunks_mut(chunk) {
                scope.spawn(move || {
                    for bidder in bidders {
                        bidder.update(day);
                    }
                });
            }
        });

        // phase 3: sellers drain their mailboxes and arbitrate; every bid
        // sent today is answered or tallied before the barrier
        let chunk = self.sellers.len().div_ceil(workers).max(1);
        thread::scope(|scope| {
            for slots in self.sellers.chunks_mut(chunk) {
                scope.spawn(move || {
                    for slot in slots {
                        while let Ok(bid) = slot.mailbox.try_recv() {
                            slot.agent.handle_bid(bid);
                        }
                    }
                });
            }
        });

        // barrier: one single-threaded batch apply, then the next day begins
        let applied = self.market.apply_pending();
        self.day += 1;

        let result = DayResult {
            day,
            listings: self.market.entry_count(),
            bids: self.stats.bids() - bids_before,
            applied,
        };
        debug!(
            "day {}: {} listings, {} bids, applied {:?}",
            day, result.listings, result.bids, applied
        );
        result
    }

    /// Run the configured number of days
    pub fn run(&mut self) -> SimulationResults {
        for _ in 0..self.config.days {
            self.tick();
        }

        let results = SimulationResults {
            days: self.day,
            total_bids: self.stats.bids(),
            total_responses: self.stats.bid_responses(),
            accepted_bids: self.stats.accepted_bids(),
            remaining_listings: self.market.entry_count(),
        };
        info!(
            "run complete: {} days, {} bids, {} accepted, {} still listed",
            results.days, results.total_bids, results.accepted_bids, results.remaining_listings
        );
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_json_with_defaults() {
        let config = SimulationConfig::from_json(r#"{"days": 5, "seed": 7}"#).unwrap();
        assert_eq!(config.days, 5);
        assert_eq!(config.seed, 7);
        // unspecified fields fall back to defaults
        assert_eq!(config.bidders, SimulationConfig::default().bidders);
    }

    #[test]
    fn test_config_rejects_empty_wp_band() {
        let config = SimulationConfig::from_json(
            r#"{"bidder": {"wp_low": 1.2, "wp_high": 1.0, "bid_fraction": 0.9, "bid_probability": 0.5, "zone_filter": null}}"#,
        )
        .unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_tick_advances_day() {
        let config = SimulationConfig {
            days: 3,
            bidders: 0,
            ..Default::default()
        };
        let mut sim = Simulation::with_config(config).unwrap();
        assert_eq!(sim.day(), 0);
        sim.tick();
        assert_eq!(sim.day(), 1);
    }
}

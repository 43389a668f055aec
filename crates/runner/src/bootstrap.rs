//! Simulation bootstrap
//!
//! Generates units, sellers and bidders from the configuration and wires
//! every agent to the registry, dispatcher, telemetry and stats handles.

use std::collections::HashMap;
use std::sync::Arc;

use crossbeam_channel::Receiver;
use rand::prelude::*;

use hestia_agents::{SellerAgent, SellerContext};
use hestia_core::{AgentId, Bid, Unit, UnitId, ZoneId};
use hestia_market::MarketRegistry;
use hestia_ports::{MarketStats, PricingModel, UnitDirectory};
use hestia_pricing::LinearDecayModel;

use crate::bidder::BidderAgent;
use crate::dispatch::MessageDispatcher;
use crate::error::SimulationResult;
use crate::simulation::SimulationConfig;
use crate::telemetry::MemoryTelemetry;

/// In-memory unit directory backing the harness.
///
/// Stands in for the model collaborator that loads units and zone logsums
/// from the database in production.
pub struct StaticUnitDirectory {
    units: HashMap<UnitId, Unit>,
    logsums: HashMap<ZoneId, f64>,
}

impl StaticUnitDirectory {
    pub fn new(units: Vec<Unit>, logsums: HashMap<ZoneId, f64>) -> Self {
        Self {
            units: units.into_iter().map(|unit| (unit.id, unit)).collect(),
            logsums,
        }
    }

    pub fn unit_count(&self) -> usize {
        self.units.len()
    }
}

impl UnitDirectory for StaticUnitDirectory {
    fn unit_by_id(&self, id: UnitId) -> Option<Unit> {
        self.units.get(&id).cloned()
    }

    fn hedonic_logsum(&self, zone: ZoneId) -> f64 {
        self.logsums.get(&zone).copied().unwrap_or(1.0)
    }
}

/// A seller paired with its bid mailbox.
pub struct SellerSlot {
    pub agent: SellerAgent,
    pub mailbox: Receiver<Bid>,
}

/// Everything a simulation needs, fully wired.
pub struct SimulationBootstrap {
    pub market: Arc<MarketRegistry>,
    pub dispatcher: Arc<MessageDispatcher>,
    pub directory: Arc<StaticUnitDirectory>,
    pub telemetry: Arc<MemoryTelemetry>,
    pub stats: Arc<MarketStats>,
    pub sellers: Vec<SellerSlot>,
    pub bidders: Vec<BidderAgent>,
}

impl SimulationBootstrap {
    pub fn with_config(config: &SimulationConfig) -> SimulationResult<Self> {
        config.validate()?;

        let mut rng = StdRng::seed_from_u64(config.seed);
        let market = Arc::new(MarketRegistry::new());
        let dispatcher = Arc::new(MessageDispatcher::new());
        let telemetry = Arc::new(MemoryTelemetry::new());
        let stats = Arc::new(MarketStats::new());

        // zone logsums with mild spatial variation
        let logsums: HashMap<ZoneId, f64> = (0..config.zones)
            .map(|zone| (zone, rng.gen_range(0.9..1.1)))
            .collect();

        // one batch of units per seller, entry days staggered so the market
        // is not flooded on day 0
        let num_sellers = config.household_sellers + config.institutional_sellers;
        let mut units = Vec::new();
        let mut inventories: Vec<Vec<UnitId>> = Vec::with_capacity(num_sellers);
        let mut next_unit_id: UnitId = 1;
        for _ in 0..num_sellers {
            let mut inventory = Vec::with_capacity(config.units_per_seller);
            for _ in 0..config.units_per_seller {
                let unit = Unit::new(
                    next_unit_id,
                    rng.gen_range(0..config.zones),
                    rng.gen_range(0..config.entry_day_window.max(1)),
                    config.seller.time_on_market,
                );
                inventory.push(unit.id);
                units.push(unit);
                next_unit_id += 1;
            }
            inventories.push(inventory);
        }

        let directory = Arc::new(StaticUnitDirectory::new(units, logsums));
        let pricing: Arc<dyn PricingModel> =
            Arc::new(LinearDecayModel::new(config.pricing.clone()));

        let ctx = SellerContext {
            market: Arc::clone(&market),
            directory: Arc::clone(&directory) as Arc<dyn UnitDirectory>,
            messenger: Arc::clone(&dispatcher) as _,
            telemetry: Arc::clone(&telemetry) as _,
            stats: Arc::clone(&stats),
        };

        let mut sellers = Vec::with_capacity(num_sellers);
        for (index, inventory) in inventories.into_iter().enumerate() {
            let id = (index + 1) as AgentId;
            let mailbox = dispatcher.register_seller(id);
            let agent = if index < config.household_sellers {
                SellerAgent::household(
                    id,
                    inventory,
                    Arc::clone(&pricing),
                    ctx.clone(),
                    config.seller.clone(),
                )
            } else {
                SellerAgent::institutional(id, inventory, ctx.clone(), config.seller.clone())
            };
            sellers.push(SellerSlot { agent, mailbox });
        }

        let bidders = (0..config.bidders)
            .map(|index| {
                let id = (num_sellers + index + 1) as AgentId;
                BidderAgent::new(
                    id,
                    Arc::clone(&market),
                    Arc::clone(&dispatcher),
                    &stats,
                    config.bidder.clone(),
                    config.seed.wrapping_add(id),
                )
            })
            .collect();

        Ok(Self {
            market,
            dispatcher,
            directory,
            telemetry,
            stats,
            sellers,
            bidders,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bootstrap_wires_all_agents() {
        let config = SimulationConfig::default();
        let bootstrap = SimulationBootstrap::with_config(&config).unwrap();

        let num_sellers = config.household_sellers + config.institutional_sellers;
        assert_eq!(bootstrap.sellers.len(), num_sellers);
        assert_eq!(bootstrap.bidders.len(), config.bidders);
        assert_eq!(
            bootstrap.directory.unit_count(),
            num_sellers * config.units_per_seller
        );
        assert_eq!(bootstrap.stats.sellers(), num_sellers as u64);
        assert_eq!(bootstrap.stats.bidders(), config.bidders as u64);
        // nothing is listed before the first day runs
        assert_eq!(bootstrap.market.entry_count(), 0);
    }

    #[test]
    fn test_seller_kinds_follow_config() {
        let config = SimulationConfig {
            household_sellers: 2,
            institutional_sellers: 1,
            ..Default::default()
        };
        let bootstrap = SimulationBootstrap::with_config(&config).unwrap();

        use hestia_agents::SellerKind;
        let kinds: Vec<SellerKind> = bootstrap
            .sellers
            .iter()
            .map(|slot| slot.agent.kind())
            .collect();
        assert_eq!(
            kinds,
            vec![
                SellerKind::Household,
                SellerKind::Household,
                SellerKind::Institutional
            ]
        );
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = SimulationConfig {
            days: 0,
            ..Default::default()
        };
        assert!(SimulationBootstrap::with_config(&config).is_err());
    }
}

//! Reference bidder harness
//!
//! A budget-driven bidder that scans the market snapshot, picks a unit and
//! offers a fraction of its willingness to pay. Kept deliberately simple:
//! the real bidder-side choice models live outside this repository, and this
//! agent exists to exercise the seller/registry/dispatcher contract.

use std::sync::Arc;

use crossbeam_channel::Receiver;
use log::debug;
use rand::prelude::*;
use serde::Deserialize;

use hestia_core::{AgentId, Bid, Day, UnitId, ZoneId};
use hestia_market::MarketRegistry;
use hestia_ports::MarketStats;

use crate::dispatch::{MessageDispatcher, ResponseMessage};

/// Configuration for the reference bidder
#[derive(Debug, Clone, Deserialize)]
pub struct BidderConfig {
    /// Willingness-to-pay band as multiples of the advertised asking price
    pub wp_low: f64,
    pub wp_high: f64,
    /// Offered value as a fraction of willingness to pay
    pub bid_fraction: f64,
    /// Probability of bidding on any given day
    pub bid_probability: f64,
    /// Only consider units in these zones
    pub zone_filter: Option<Vec<ZoneId>>,
}

impl Default for BidderConfig {
    fn default() -> Self {
        Self {
            wp_low: 0.85,
            wp_high: 1.15,
            bid_fraction: 0.95,
            bid_probability: 0.8,
            zone_filter: None,
        }
    }
}

/// Reference bidder agent.
pub struct BidderAgent {
    id: AgentId,
    market: Arc<MarketRegistry>,
    dispatcher: Arc<MessageDispatcher>,
    responses: Receiver<ResponseMessage>,
    config: BidderConfig,
    rng: StdRng,
    /// Cleared once a bid is accepted; the bidder has found a home
    active: bool,
    won: Option<UnitId>,
}

impl BidderAgent {
    pub fn new(
        id: AgentId,
        market: Arc<MarketRegistry>,
        dispatcher: Arc<MessageDispatcher>,
        stats: &MarketStats,
        config: BidderConfig,
        seed: u64,
    ) -> Self {
        let responses = dispatcher.register_bidder(id);
        stats.add_bidder();
        Self {
            id,
            market,
            dispatcher,
            responses,
            config,
            rng: StdRng::seed_from_u64(seed),
            active: true,
            won: None,
        }
    }

    pub fn id(&self) -> AgentId {
        self.id
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Unit this bidder won, if any
    pub fn won(&self) -> Option<UnitId> {
        self.won
    }

    /// Daily update: consume pending responses, then maybe bid once.
    /// Returns true when a bid was submitted.
    pub fn update(&mut self, day: Day) -> bool {
        while let Ok((bid, response)) = self.responses.try_recv() {
            if response.is_accepted() {
                debug!(
                    "day {} bidder {} won unit {} at {}",
                    day, self.id, bid.unit_id, bid.value
                );
                self.active = false;
                self.won = Some(bid.unit_id);
            }
        }

        if !self.active {
            return false;
        }
        if self.rng.r#gen::<f64>() > self.config.bid_probability {
            return false;
        }

        let mut entries = self
            .market
            .available_entries(self.config.zone_filter.as_deref());
        if entries.is_empty() {
            return false;
        }
        // snapshot iteration order is arbitrary; sort so a seeded rng makes
        // the same choice on every run
        entries.sort_by_key(|entry| entry.unit_id);

        let entry = &entries[self.rng.gen_range(0..entries.len())];
        let willingness_to_pay =
            entry.asking_price * self.rng.gen_range(self.config.wp_low..self.config.wp_high);
        let value = willingness_to_pay * self.config.bid_fraction;

        self.dispatcher.submit_bid(
            entry.owner,
            Bid::new(self.id, entry.unit_id, value, willingness_to_pay, day),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hestia_core::{BidResponse, Entry};
    use hestia_ports::BidMessenger;

    fn harness() -> (Arc<MarketRegistry>, Arc<MessageDispatcher>, BidderAgent) {
        let market = Arc::new(MarketRegistry::new());
        let dispatcher = Arc::new(MessageDispatcher::new());
        let stats = MarketStats::new();
        let config = BidderConfig {
            bid_probability: 1.0,
            ..Default::default()
        };
        let bidder = BidderAgent::new(
            500,
            Arc::clone(&market),
            Arc::clone(&dispatcher),
            &stats,
            config,
            9,
        );
        (market, dispatcher, bidder)
    }

    #[test]
    fn test_no_bid_on_empty_market() {
        let (_market, _dispatcher, mut bidder) = harness();
        assert!(!bidder.update(1));
    }

    #[test]
    fn test_bids_on_listed_unit() {
        let (market, dispatcher, mut bidder) = harness();
        let seller_box = dispatcher.register_seller(1);

        market.add_entry(Entry::new(7, 1, 10, 400.0, 380.0));
        market.apply_pending();

        assert!(bidder.update(1));
        let bid = seller_box.try_recv().unwrap();
        assert_eq!(bid.bidder, 500);
        assert_eq!(bid.unit_id, 7);
        assert!(bid.value > 0.0);
        assert!(bid.value <= bid.willingness_to_pay);
    }

    #[test]
    fn test_accepted_response_retires_bidder() {
        let (market, dispatcher, mut bidder) = harness();
        let _seller_box = dispatcher.register_seller(1);
        market.add_entry(Entry::new(7, 1, 10, 400.0, 380.0));
        market.apply_pending();

        let bid = Bid::new(500, 7, 390.0, 410.0, 1);
        dispatcher.reply(&bid, BidResponse::Accepted);

        assert!(!bidder.update(2));
        assert!(!bidder.is_active());
        assert_eq!(bidder.won(), Some(7));
    }

    #[test]
    fn test_zone_filter_restricts_choices() {
        let market = Arc::new(MarketRegistry::new());
        let dispatcher = Arc::new(MessageDispatcher::new());
        let stats = MarketStats::new();
        let seller_box = dispatcher.register_seller(1);
        let config = BidderConfig {
            bid_probability: 1.0,
            zone_filter: Some(vec![20]),
            ..Default::default()
        };
        let mut bidder = BidderAgent::new(
            501,
            Arc::clone(&market),
            Arc::clone(&dispatcher),
            &stats,
            config,
            9,
        );

        market.add_entry(Entry::new(7, 1, 10, 400.0, 380.0));
        market.add_entry(Entry::new(8, 1, 20, 300.0, 290.0));
        market.apply_pending();

        for day in 0..10 {
            bidder.update(day);
        }
        let bids: Vec<_> = seller_box.try_iter().collect();
        assert!(!bids.is_empty());
        assert!(bids.iter().all(|bid| bid.unit_id == 8));
    }
}

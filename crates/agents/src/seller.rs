use std::collections::HashMap;
use std::sync::Arc;

use log::{debug, warn};

use hestia_core::{AgentId, Bid, BidResponse, Day, Entry, ExpectationEntry, Unit, UnitId};
use hestia_market::MarketRegistry;
use hestia_ports::{
    BidMessenger, BidRecord, ExpectationRecord, MarketStats, PricingModel, TelemetrySink,
    UnitDirectory,
};
use hestia_pricing::{FixedDecaySchedule, curve_len};

use crate::config::SellerConfig;
use crate::selling_info::SellingUnitInfo;

/// Seller variant. Household sellers price through the shared scripted
/// model with a zone logsum; institutional sellers price off a fixed decay
/// schedule and additionally report units entering and leaving the market.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SellerKind {
    Household,
    Institutional,
}

/// Collaborators injected into every seller at construction.
///
/// The registry is an explicit object scoped to the simulation run, never a
/// process global; cloning the context shares the same collaborators.
#[derive(Clone)]
pub struct SellerContext {
    pub market: Arc<MarketRegistry>,
    pub directory: Arc<dyn UnitDirectory>,
    pub messenger: Arc<dyn BidMessenger>,
    pub telemetry: Arc<dyn TelemetrySink>,
    pub stats: Arc<MarketStats>,
}

/// Decides over a given bid for the active expectation.
fn decide(bid: &Bid, entry: &ExpectationEntry) -> bool {
    bid.value > entry.target_price
}

/// Per-owner seller state machine.
///
/// Each owned unit moves `NOT_LISTED -> LISTED_AWAITING_BIDS -> {SOLD |
/// WITHDRAWN}`. Bids are evaluated synchronously as they arrive; the day's
/// best passing bid is accepted at the next day boundary, so at most one bid
/// wins a unit per day.
pub struct SellerAgent {
    id: AgentId,
    kind: SellerKind,
    unit_ids: Vec<UnitId>,
    pricing: Arc<dyn PricingModel>,
    ctx: SellerContext,
    config: SellerConfig,
    current_day: Day,
    /// Latched once any owned unit has reached its market-entry day
    selling: bool,
    selling_units: HashMap<UnitId, SellingUnitInfo>,
    /// Bids received today, per unit
    daily_bids: HashMap<UnitId, u32>,
    /// Best passing bid seen today, per unit
    best_bids: HashMap<UnitId, Bid>,
}

impl SellerAgent {
    /// Create a seller with an explicit kind and pricing source
    pub fn new(
        id: AgentId,
        kind: SellerKind,
        unit_ids: Vec<UnitId>,
        pricing: Arc<dyn PricingModel>,
        ctx: SellerContext,
        config: SellerConfig,
    ) -> Self {
        ctx.stats.add_seller();
        Self {
            id,
            kind,
            unit_ids,
            pricing,
            ctx,
            config,
            current_day: 0,
            selling: false,
            selling_units: HashMap::new(),
            daily_bids: HashMap::new(),
            best_bids: HashMap::new(),
        }
    }

    /// Household seller using the shared pricing collaborator
    pub fn household(
        id: AgentId,
        unit_ids: Vec<UnitId>,
        pricing: Arc<dyn PricingModel>,
        ctx: SellerContext,
        config: SellerConfig,
    ) -> Self {
        Self::new(id, SellerKind::Household, unit_ids, pricing, ctx, config)
    }

    /// Institutional seller priced off the fixed decay schedule
    pub fn institutional(
        id: AgentId,
        unit_ids: Vec<UnitId>,
        ctx: SellerContext,
        config: SellerConfig,
    ) -> Self {
        Self::new(
            id,
            SellerKind::Institutional,
            unit_ids,
            Arc::new(FixedDecaySchedule::new()),
            ctx,
            config,
        )
    }

    pub fn id(&self) -> AgentId {
        self.id
    }

    pub fn kind(&self) -> SellerKind {
        self.kind
    }

    pub fn unit_ids(&self) -> &[UnitId] {
        &self.unit_ids
    }

    pub fn is_selling(&self) -> bool {
        self.selling
    }

    /// Drop a unit from the personal inventory
    pub fn remove_unit_id(&mut self, unit_id: UnitId) {
        self.unit_ids.retain(|id| *id != unit_id);
    }

    /// Daily update. Called exactly once per simulated day by one worker
    /// thread; never blocks and never yields.
    pub fn update(&mut self, day: Day) {
        let last_day = self.current_day;
        self.current_day = day;

        if self.selling {
            if day > last_day {
                // day has changed: reset the daily counters, then settle
                // yesterday's winners
                self.daily_bids.clear();
                self.notify_winner_bidders();
            }
            self.adjust_not_sold_units();
        }

        self.enter_new_units();
    }

    /// Evaluate one incoming bid, replying synchronously.
    pub fn handle_bid(&mut self, bid: Bid) {
        self.ctx.stats.add_bid();

        let Some(expectation) = self.current_expectation(bid.unit_id) else {
            // not the owner, or the unit is not on the market
            self.reply_bid(&bid, &ExpectationEntry::default(), BidResponse::NotAvailable, 0);
            return;
        };

        let counter = self.daily_bids.entry(bid.unit_id).or_insert(0);
        *counter += 1;
        let daily_count = *counter;

        if !decide(&bid, &expectation) {
            self.reply_bid(&bid, &expectation, BidResponse::NotAccepted, daily_count);
            return;
        }

        let best_value = self.best_bids.get(&bid.unit_id).map(|best| best.value);
        match best_value {
            None => {
                self.best_bids.insert(bid.unit_id, bid);
            }
            Some(value) if value < bid.value => {
                // the displaced best bidder learns a better offer exists
                if let Some(displaced) = self.best_bids.insert(bid.unit_id, bid) {
                    self.reply_bid(&displaced, &expectation, BidResponse::BetterOffer, daily_count);
                }
            }
            // ties favor the bid seen first
            Some(_) => self.reply_bid(&bid, &expectation, BidResponse::BetterOffer, daily_count),
        }
    }

    /// Accept yesterday's best bid per unit: reply ACCEPTED, retire the unit.
    fn notify_winner_bidders(&mut self) {
        let winners: Vec<Bid> = self.best_bids.drain().map(|(_, bid)| bid).collect();

        for bid in winners {
            let expectation = self
                .current_expectation(bid.unit_id)
                .unwrap_or_default();
            let daily_count = self.daily_bids.get(&bid.unit_id).copied().unwrap_or(1);
            self.reply_bid(&bid, &expectation, BidResponse::Accepted, daily_count);
            self.ctx.stats.add_accepted_bid();

            debug!(
                "day {} seller {} accepted the bid of {} for unit {} at {}",
                self.current_day, self.id, bid.bidder, bid.unit_id, bid.value
            );

            if self.kind == SellerKind::Institutional {
                self.ctx.telemetry.record_unit_in_market(bid.unit_id);
            }

            self.ctx.market.remove_entry(bid.unit_id);
            self.remove_unit_id(bid.unit_id);
            self.selling_units.remove(&bid.unit_id);
        }
    }

    /// Withdraw expired listings and re-price the rest.
    fn adjust_not_sold_units(&mut self) {
        for unit_id in self.unit_ids.clone() {
            let Some(listed) = self.ctx.market.entry_by_id(unit_id) else {
                continue;
            };
            let Some(unit) = self.ctx.directory.unit_by_id(unit_id) else {
                continue;
            };

            if self.selling_units.contains_key(&unit_id)
                && self.current_day > unit.withdrawal_deadline()
            {
                debug!(
                    "day {} withdrawing unit {} from the market after {} days",
                    self.current_day, unit_id, unit.time_on_market
                );
                self.ctx.market.remove_entry(unit_id);
                self.selling_units.remove(&unit_id);
                continue;
            }

            if let Some(expectation) = self.current_expectation(unit_id)
                && expectation.asking_price != listed.asking_price
            {
                debug!(
                    "day {} seller {} updating asking price for unit {} from {} to {}",
                    self.current_day, self.id, unit_id, listed.asking_price,
                    expectation.asking_price
                );
                self.ctx
                    .market
                    .update_entry(listed.with_asking_price(expectation.asking_price));
            }
        }
    }

    /// List units whose market-entry day has arrived.
    fn enter_new_units(&mut self) {
        for unit_id in self.unit_ids.clone() {
            // already tracked: re-listing is a no-op
            if self.selling_units.contains_key(&unit_id) {
                continue;
            }
            let Some(unit) = self.ctx.directory.unit_by_id(unit_id) else {
                continue;
            };
            if self.current_day != unit.market_entry_day {
                continue;
            }

            self.calculate_unit_expectations(&unit);

            // first expectation opens the market entry
            if let Some(first) = self.current_expectation(unit_id) {
                debug!(
                    "day {} seller {} listing unit {} with asking price {}",
                    self.current_day, self.id, unit_id, first.asking_price
                );
                self.ctx.market.add_entry(Entry::new(
                    unit_id,
                    self.id,
                    unit.zone_id,
                    first.asking_price,
                    first.hedonic_price,
                ));
                if self.kind == SellerKind::Institutional {
                    self.ctx.telemetry.record_unit_in_market(unit_id);
                }
            }

            self.selling = true;
        }
    }

    /// Compute and store the full expectation curve for a unit entering the
    /// market. A zero-length or mismatched curve refuses the listing.
    fn calculate_unit_expectations(&mut self, unit: &Unit) {
        let interval = self.config.time_interval;
        let num_expectations = curve_len(unit.time_on_market, interval);
        if num_expectations == 0 {
            debug!(
                "unit {} has no expectation intervals (interval {}, {} days on market); not listing",
                unit.id, interval, unit.time_on_market
            );
            return;
        }

        let logsum = match self.kind {
            SellerKind::Household => self
                .ctx
                .directory
                .unit_zone(unit.id)
                .map(|zone| self.ctx.directory.hedonic_logsum(zone))
                .unwrap_or(1.0),
            // the fixed schedule ignores location
            SellerKind::Institutional => 1.0,
        };

        let expectations = self
            .pricing
            .unit_expectations(unit, num_expectations, logsum);

        if expectations.len() != num_expectations as usize {
            warn!(
                "pricing source '{}' returned {} expectations for unit {}, expected {}; not listing",
                self.pricing.name(),
                expectations.len(),
                unit.id,
                num_expectations
            );
            return;
        }

        for (i, expectation) in expectations.iter().enumerate() {
            self.ctx.telemetry.record_expectation(ExpectationRecord {
                day: self.current_day,
                day_to_apply: self.current_day + i as Day * interval,
                seller: self.id,
                unit_id: unit.id,
                hedonic_price: expectation.hedonic_price,
                asking_price: expectation.asking_price,
                target_price: expectation.target_price,
            });
        }

        self.selling_units.insert(
            unit.id,
            SellingUnitInfo {
                started_day: self.current_day,
                interval,
                days_on_market: unit.time_on_market,
                expectations,
            },
        );
    }

    /// The usable expectation governing today for a tracked unit
    fn current_expectation(&self, unit_id: UnitId) -> Option<ExpectationEntry> {
        self.selling_units
            .get(&unit_id)?
            .current_expectation(unit_id, self.current_day)
            .copied()
    }

    /// Reply to a received bid and record the decision.
    fn reply_bid(
        &self,
        bid: &Bid,
        expectation: &ExpectationEntry,
        response: BidResponse,
        daily_count: u32,
    ) {
        self.ctx.messenger.reply(bid, response);
        self.ctx.stats.add_bid_response();
        self.ctx.telemetry.record_bid(BidRecord {
            day: self.current_day,
            seller: self.id,
            bidder: bid.bidder,
            unit_id: bid.unit_id,
            willingness_to_pay: bid.willingness_to_pay,
            asking_price: expectation.asking_price,
            target_price: expectation.target_price,
            bid_value: bid.value,
            daily_bid_count: daily_count,
            accepted: response.is_accepted(),
        });
    }
}

use std::sync::atomic::{AtomicU64, Ordering};

/// Aggregate market counters, shared across agents.
///
/// Injected into agents at construction and bumped from worker threads;
/// relaxed atomics are enough since the values are only read for reporting
/// after the day barrier.
#[derive(Debug, Default)]
pub struct MarketStats {
    bids: AtomicU64,
    bid_responses: AtomicU64,
    accepted_bids: AtomicU64,
    sellers: AtomicU64,
    bidders: AtomicU64,
}

impl MarketStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_bid(&self) {
        self.bids.fetch_add(1, Ordering::Relaxed);
    }

    pub fn add_bid_response(&self) {
        self.bid_responses.fetch_add(1, Ordering::Relaxed);
    }

    pub fn add_accepted_bid(&self) {
        self.accepted_bids.fetch_add(1, Ordering::Relaxed);
    }

    pub fn add_seller(&self) {
        self.sellers.fetch_add(1, Ordering::Relaxed);
    }

    pub fn add_bidder(&self) {
        self.bidders.fetch_add(1, Ordering::Relaxed);
    }

    pub fn bids(&self) -> u64 {
        self.bids.load(Ordering::Relaxed)
    }

    pub fn bid_responses(&self) -> u64 {
        self.bid_responses.load(Ordering::Relaxed)
    }

    pub fn accepted_bids(&self) -> u64 {
        self.accepted_bids.load(Ordering::Relaxed)
    }

    pub fn sellers(&self) -> u64 {
        self.sellers.load(Ordering::Relaxed)
    }

    pub fn bidders(&self) -> u64 {
        self.bidders.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_accumulate() {
        let stats = MarketStats::new();
        stats.add_bid();
        stats.add_bid();
        stats.add_accepted_bid();

        assert_eq!(stats.bids(), 2);
        assert_eq!(stats.accepted_bids(), 1);
        assert_eq!(stats.bid_responses(), 0);
    }
}

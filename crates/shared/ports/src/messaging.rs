use hestia_core::{Bid, BidResponse};

/// Port for delivering bid responses back to bidders
///
/// The dispatcher on the other side routes the response to the bidder named
/// in the bid. Replies are fire-and-forget from the seller's point of view;
/// a bidder that has already retired simply misses the response.
pub trait BidMessenger: Send + Sync {
    /// Deliver `response` for `bid` to the bidder that sent it
    fn reply(&self, bid: &Bid, response: BidResponse);
}

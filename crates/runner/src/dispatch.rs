//! Message Dispatcher
//!
//! Routes `Bid` messages to seller mailboxes and `BidResponse` messages to
//! bidder mailboxes. The dispatcher is the in-process stand-in for the
//! message bus: a bid submitted on day D sits in the owning seller's mailbox
//! until the arbitration phase of the same day, so it is always observed
//! before day D's barrier.

use crossbeam_channel::{Receiver, Sender, unbounded};
use dashmap::DashMap;
use log::debug;

use hestia_core::{AgentId, Bid, BidResponse};
use hestia_ports::BidMessenger;

/// A response on its way back to a bidder, paired with the bid it answers.
pub type ResponseMessage = (Bid, BidResponse);

/// Mailbox routing between sellers and bidders.
#[derive(Default)]
pub struct MessageDispatcher {
    bid_boxes: DashMap<AgentId, Sender<Bid>>,
    response_boxes: DashMap<AgentId, Sender<ResponseMessage>>,
}

impl MessageDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a bid mailbox for a seller; the receiver is drained by the
    /// seller during the arbitration phase.
    pub fn register_seller(&self, seller: AgentId) -> Receiver<Bid> {
        let (tx, rx) = unbounded();
        self.bid_boxes.insert(seller, tx);
        rx
    }

    /// Open a response mailbox for a bidder.
    pub fn register_bidder(&self, bidder: AgentId) -> Receiver<ResponseMessage> {
        let (tx, rx) = unbounded();
        self.response_boxes.insert(bidder, tx);
        rx
    }

    /// Deliver a bid to the mailbox of the seller owning the unit.
    ///
    /// Returns false when the seller is unknown; the bid is then lost, which
    /// mirrors a bid raced against a retired seller.
    pub fn submit_bid(&self, seller: AgentId, bid: Bid) -> bool {
        match self.bid_boxes.get(&seller) {
            Some(tx) => tx.send(bid).is_ok(),
            None => {
                debug!(
                    "dropping bid from {} for unit {}: unknown seller {}",
                    bid.bidder, bid.unit_id, seller
                );
                false
            }
        }
    }

}

impl BidMessenger for MessageDispatcher {
    fn reply(&self, bid: &Bid, response: BidResponse) {
        if let Some(tx) = self.response_boxes.get(&bid.bidder) {
            let _ = tx.send((bid.clone(), response));
        } else {
            debug!(
                "dropping {:?} reply to unknown bidder {}",
                response, bid.bidder
            );
        }
    }
}

//! Hestia Agents
//!
//! Seller agents for the housing market. A seller owns zero or more units,
//! decides when to list them, tracks the bids arriving each day, resolves at
//! most one winner per unit per day and retires sold or withdrawn units.
//!
//! Sellers never touch shared state directly: registry mutations are queued
//! for the next day boundary and all cross-agent traffic is messages.

mod config;
mod seller;
mod selling_info;

pub use config::SellerConfig;
pub use seller::{SellerAgent, SellerContext, SellerKind};
pub use selling_info::SellingUnitInfo;

use hestia_core::Day;
use serde::Deserialize;

/// Housing-model parameters shared by every seller.
#[derive(Debug, Clone, Deserialize)]
pub struct SellerConfig {
    /// Days between price updates while a unit is listed
    pub time_interval: Day,
    /// Default days a unit may stay listed before withdrawal
    pub time_on_market: Day,
    /// Cooldown before a withdrawn unit may re-enter the market.
    /// Re-entry itself is driven by an external collaborator, not this core.
    pub time_off_market: Day,
}

impl SellerConfig {
    pub fn market_lifespan(&self) -> Day {
        self.time_on_market + self.time_off_market
    }
}

impl Default for SellerConfig {
    fn default() -> Self {
        Self {
            time_interval: 7,
            time_on_market: 30,
            time_off_market: 30,
        }
    }
}

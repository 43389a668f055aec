use serde::{Deserialize, Serialize};

use crate::values::{Day, UnitId, ZoneId};

/// A residential unit as the sellers see it.
///
/// Units are loaded by an external collaborator and are read-only inside the
/// market core; sellers identify them by id and look attributes up here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Unit {
    pub id: UnitId,
    /// Zone the unit belongs to (spatial filter key)
    pub zone_id: ZoneId,
    /// Day the unit is allowed to enter the bidding market.
    /// Staggered by the loader so empty units do not flood the market on day 1.
    pub market_entry_day: Day,
    /// How many days the unit may stay listed before it is withdrawn
    pub time_on_market: Day,
}

impl Unit {
    pub fn new(id: UnitId, zone_id: ZoneId, market_entry_day: Day, time_on_market: Day) -> Self {
        Self {
            id,
            zone_id,
            market_entry_day,
            time_on_market,
        }
    }

    /// Last day (inclusive) the unit may remain listed
    pub fn withdrawal_deadline(&self) -> Day {
        self.market_entry_day + self.time_on_market
    }
}

use serde::{Deserialize, Serialize};

use crate::values::{AgentId, Price, UnitId, ZoneId};

/// A market entry on the housing market.
///
/// If a unit has an entry on the market it means the unit is available to
/// sell. Entries are exclusively owned by the registry once applied; agents
/// hold the unit id, never a reference, so there is no shared mutation.
///
/// Invariant: at most one entry per unit id at any time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub unit_id: UnitId,
    /// Seller agent that owns the unit
    pub owner: AgentId,
    pub zone_id: ZoneId,
    /// Currently advertised price; decays over the listing period
    pub asking_price: Price,
    /// Model-computed reference value used as pricing basis
    pub hedonic_price: Price,
}

impl Entry {
    pub fn new(
        unit_id: UnitId,
        owner: AgentId,
        zone_id: ZoneId,
        asking_price: Price,
        hedonic_price: Price,
    ) -> Self {
        Self {
            unit_id,
            owner,
            zone_id,
            asking_price,
            hedonic_price,
        }
    }

    /// Copy of this entry with a new asking price
    pub fn with_asking_price(&self, asking_price: Price) -> Self {
        Self {
            asking_price,
            ..self.clone()
        }
    }
}

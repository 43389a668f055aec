use std::collections::HashMap;

use hestia_core::{Entry, UnitId, ZoneId};

/// One day's immutable view of the market.
///
/// `by_unit` holds the original entries; `by_zone` is a lookup index only.
#[derive(Debug, Default, Clone)]
pub struct MarketSnapshot {
    by_unit: HashMap<UnitId, Entry>,
    by_zone: HashMap<ZoneId, Vec<UnitId>>,
}

impl MarketSnapshot {
    /// Build a snapshot from applied entries, deriving the zone index
    pub(crate) fn from_entries(by_unit: HashMap<UnitId, Entry>) -> Self {
        let mut by_zone: HashMap<ZoneId, Vec<UnitId>> = HashMap::new();
        for entry in by_unit.values() {
            by_zone.entry(entry.zone_id).or_default().push(entry.unit_id);
        }
        Self { by_unit, by_zone }
    }

    pub fn entry_by_id(&self, unit_id: UnitId) -> Option<&Entry> {
        self.by_unit.get(&unit_id)
    }

    /// All entries, unordered
    pub fn entries(&self) -> impl Iterator<Item = &Entry> {
        self.by_unit.values()
    }

    /// Entries in the given zones, unordered
    pub fn entries_in_zones<'a>(
        &'a self,
        zones: &'a [ZoneId],
    ) -> impl Iterator<Item = &'a Entry> + 'a {
        zones
            .iter()
            .filter_map(|zone| self.by_zone.get(zone))
            .flatten()
            .filter_map(|unit_id| self.by_unit.get(unit_id))
    }

    pub fn len(&self) -> usize {
        self.by_unit.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_unit.is_empty()
    }

    pub(crate) fn into_entries(self) -> HashMap<UnitId, Entry> {
        self.by_unit
    }
}

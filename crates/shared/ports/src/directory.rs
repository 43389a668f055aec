use hestia_core::{Unit, UnitId, ZoneId};

/// Port for unit attribute lookup
///
/// The authoritative unit data lives with an external model collaborator;
/// sellers hold unit ids and resolve attributes through this port.
pub trait UnitDirectory: Send + Sync {
    /// Look up a unit by id
    fn unit_by_id(&self, id: UnitId) -> Option<Unit>;

    /// Zone the unit belongs to
    fn unit_zone(&self, id: UnitId) -> Option<ZoneId> {
        self.unit_by_id(id).map(|unit| unit.zone_id)
    }

    /// Location-derived scalar fed to the pricing model for units in `zone`
    fn hedonic_logsum(&self, zone: ZoneId) -> f64;
}

use hestia_core::{ExpectationEntry, Unit};

/// Port for price-expectation sources
///
/// Different implementations support various pricing strategies:
/// - the shared scripted hedonic model
/// - fixed decay schedules
/// - etc.
pub trait PricingModel: Send + Sync {
    /// Compute the full expectation curve for a unit entering the market.
    ///
    /// `logsum` is a location-derived scalar for the unit's zone. The result
    /// must hold exactly `num_expectations` entries; an empty result means
    /// "do not list".
    fn unit_expectations(
        &self,
        unit: &Unit,
        num_expectations: u32,
        logsum: f64,
    ) -> Vec<ExpectationEntry>;

    /// Get the name of the pricing source
    fn name(&self) -> &str;
}

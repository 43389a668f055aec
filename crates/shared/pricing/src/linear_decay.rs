use hestia_core::{ExpectationEntry, Unit};
use hestia_ports::PricingModel;
use serde::Deserialize;

/// Configuration for the linear decay model
#[derive(Debug, Clone, Deserialize)]
pub struct LinearDecayConfig {
    /// Hedonic base value per unit before the zone logsum is applied
    pub base_value: f64,
    /// Initial markup over the hedonic price (0.2 = ask 20% above)
    pub markup: f64,
    /// Where the target price sits between hedonic and asking (0..1)
    pub target_ratio: f64,
}

impl Default for LinearDecayConfig {
    fn default() -> Self {
        Self {
            base_value: 200.0,
            markup: 0.2,
            target_ratio: 0.5,
        }
    }
}

/// Reference pricing source: asking price decays linearly from
/// `hedonic * (1 + markup)` down to the hedonic price over the curve, with
/// the target price a fixed ratio of the way up from hedonic to asking.
///
/// Stands in for the scripted hedonic-model collaborator in tests and the
/// simulation harness.
#[derive(Debug, Default, Clone)]
pub struct LinearDecayModel {
    config: LinearDecayConfig,
}

impl LinearDecayModel {
    pub fn new(config: LinearDecayConfig) -> Self {
        Self { config }
    }
}

impl PricingModel for LinearDecayModel {
    fn unit_expectations(
        &self,
        _unit: &Unit,
        num_expectations: u32,
        logsum: f64,
    ) -> Vec<ExpectationEntry> {
        let n = num_expectations as usize;
        if n == 0 {
            return Vec::new();
        }

        let hedonic = self.config.base_value * logsum;
        let top = hedonic * (1.0 + self.config.markup);

        (0..n)
            .map(|i| {
                // fraction of the decay already elapsed at interval i
                let progress = if n == 1 { 0.0 } else { i as f64 / (n - 1) as f64 };
                let asking = top - (top - hedonic) * progress;
                let target = hedonic + (asking - hedonic) * self.config.target_ratio;
                ExpectationEntry::new(asking, hedonic, target)
            })
            .collect()
    }

    fn name(&self) -> &str {
        "Linear Decay"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_unit() -> Unit {
        Unit::new(7, 3, 100, 10)
    }

    #[test]
    fn test_exact_count_and_decay() {
        let model = LinearDecayModel::default();
        let curve = model.unit_expectations(&test_unit(), 5, 1.0);

        assert_eq!(curve.len(), 5);
        for pair in curve.windows(2) {
            assert!(pair[1].asking_price < pair[0].asking_price);
        }
        // last interval converges on the hedonic price
        assert!((curve[4].asking_price - curve[4].hedonic_price).abs() < 1e-9);
    }

    #[test]
    fn test_target_between_hedonic_and_asking() {
        let model = LinearDecayModel::default();
        let curve = model.unit_expectations(&test_unit(), 4, 1.0);

        for entry in &curve {
            assert!(entry.target_price <= entry.asking_price);
            assert!(entry.target_price >= entry.hedonic_price);
        }
    }

    #[test]
    fn test_logsum_scales_hedonic() {
        let model = LinearDecayModel::default();
        let low = model.unit_expectations(&test_unit(), 1, 0.5);
        let high = model.unit_expectations(&test_unit(), 1, 2.0);

        assert!(high[0].hedonic_price > low[0].hedonic_price);
        assert_eq!(low[0].hedonic_price, 100.0);
        assert_eq!(high[0].hedonic_price, 400.0);
    }

    #[test]
    fn test_zero_count_means_do_not_list() {
        let model = LinearDecayModel::default();
        assert!(model.unit_expectations(&test_unit(), 0, 1.0).is_empty());
    }
}

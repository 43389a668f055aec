use hestia_core::{ExpectationEntry, Unit};
use hestia_ports::PricingModel;

/// Calibrated per-interval decay schedule `(asking, hedonic, target)`.
///
/// Institutional sellers price off this fixed table instead of the shared
/// scripted model. Intervals past the end of the table fall back to the
/// first row.
const SCHEDULE: [(f64, f64, f64); 13] = [
    (476.172, 171.483, 253.928),
    (234.626, 171.483, 213.348),
    (198.103, 171.483, 177.728),
    (165.898, 171.483, 146.368),
    (137.409, 171.483, 118.674),
    (112.13, 171.483, 94.142),
    (89.626, 171.483, 72.343),
    (69.53, 171.483, 52.913),
    (51.528, 171.483, 35.54),
    (35.353, 171.483, 19.96),
    (20.775, 171.483, 5.946),
    (7.598, 171.483, 3.302),
    (5.653, 171.483, 1.863),
];

/// Pricing source backed by the fixed decay table.
///
/// Ignores unit attributes and the zone logsum; every unit gets the same
/// curve, truncated or padded to the requested interval count.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixedDecaySchedule;

impl FixedDecaySchedule {
    pub fn new() -> Self {
        Self
    }
}

impl PricingModel for FixedDecaySchedule {
    fn unit_expectations(
        &self,
        _unit: &Unit,
        num_expectations: u32,
        _logsum: f64,
    ) -> Vec<ExpectationEntry> {
        (0..num_expectations as usize)
            .map(|i| {
                let (asking, hedonic, target) = SCHEDULE.get(i).copied().unwrap_or(SCHEDULE[0]);
                ExpectationEntry::new(asking, hedonic, target)
            })
            .collect()
    }

    fn name(&self) -> &str {
        "Fixed Decay Schedule"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_unit() -> Unit {
        Unit::new(1, 10, 0, 60)
    }

    #[test]
    fn test_returns_requested_count() {
        let schedule = FixedDecaySchedule::new();
        let curve = schedule.unit_expectations(&test_unit(), 6, 1.0);
        assert_eq!(curve.len(), 6);
    }

    #[test]
    fn test_first_interval_values() {
        let schedule = FixedDecaySchedule::new();
        let curve = schedule.unit_expectations(&test_unit(), 3, 1.0);
        assert_eq!(curve[0].asking_price, 476.172);
        assert_eq!(curve[0].hedonic_price, 171.483);
        assert_eq!(curve[0].target_price, 253.928);
    }

    #[test]
    fn test_asking_price_decays() {
        let schedule = FixedDecaySchedule::new();
        let curve = schedule.unit_expectations(&test_unit(), 13, 1.0);
        for pair in curve.windows(2) {
            assert!(pair[1].asking_price < pair[0].asking_price);
        }
    }

    #[test]
    fn test_past_table_end_falls_back_to_first_row() {
        let schedule = FixedDecaySchedule::new();
        let curve = schedule.unit_expectations(&test_unit(), 15, 1.0);
        assert_eq!(curve[13], curve[0]);
        assert_eq!(curve[14], curve[0]);
    }

    #[test]
    fn test_zero_count_means_do_not_list() {
        let schedule = FixedDecaySchedule::new();
        assert!(schedule.unit_expectations(&test_unit(), 0, 1.0).is_empty());
    }
}

use log::warn;

use hestia_core::{Day, ExpectationEntry, UnitId};

/// Per-unit listing state, computed once when the unit first enters the
/// market and destroyed when the unit leaves it (sold or withdrawn).
#[derive(Debug, Clone)]
pub struct SellingUnitInfo {
    /// Day the unit was listed
    pub started_day: Day,
    /// Days between price updates
    pub interval: Day,
    /// Days the unit is allowed on the market
    pub days_on_market: Day,
    /// Expectation curve, one entry per interval
    pub expectations: Vec<ExpectationEntry>,
}

impl SellingUnitInfo {
    /// The expectation governing `day`, if it is usable.
    ///
    /// The index wraps past the end of the curve, so prices repeat from the
    /// first interval once elapsed days exceed the curve's span. Withdrawal
    /// is expected to fire before that can happen; a warning marks the runs
    /// where it does not.
    pub fn current_expectation(&self, unit_id: UnitId, day: Day) -> Option<&ExpectationEntry> {
        if self.interval == 0 || self.expectations.is_empty() {
            return None;
        }

        let index = (day.abs_diff(self.started_day) / self.interval) as usize;
        if index >= self.expectations.len() {
            warn!(
                "expectation curve for unit {} wrapped on day {} (interval {} of {}); \
                 expected withdrawal to fire first",
                unit_id,
                day,
                index,
                self.expectations.len()
            );
        }

        let expectation = &self.expectations[index % self.expectations.len()];
        expectation.is_usable().then_some(expectation)
    }
}

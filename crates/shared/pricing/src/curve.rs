use hestia_core::Day;

/// Number of expectation intervals covering `days_on_market` at one price
/// update every `interval` days.
///
/// A zero interval is an invalid configuration and yields an empty curve,
/// which sellers treat as "do not list".
pub fn curve_len(days_on_market: Day, interval: Day) -> u32 {
    if interval == 0 {
        return 0;
    }
    days_on_market.div_ceil(interval)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_division() {
        assert_eq!(curve_len(10, 5), 2);
    }

    #[test]
    fn test_rounds_up() {
        assert_eq!(curve_len(10, 3), 4);
        assert_eq!(curve_len(1, 7), 1);
    }

    #[test]
    fn test_zero_interval_is_empty() {
        assert_eq!(curve_len(10, 0), 0);
    }

    #[test]
    fn test_zero_days_on_market() {
        assert_eq!(curve_len(0, 5), 0);
    }
}

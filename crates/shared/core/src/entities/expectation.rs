use serde::{Deserialize, Serialize};

use crate::values::Price;

/// One interval of a unit's price-expectation curve.
///
/// The asking price is advertised, the hedonic price is the model reference
/// value, and the target price is the minimum bid value the seller accepts
/// while this interval is active.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ExpectationEntry {
    pub asking_price: Price,
    pub hedonic_price: Price,
    pub target_price: Price,
}

impl ExpectationEntry {
    pub fn new(asking_price: Price, hedonic_price: Price, target_price: Price) -> Self {
        Self {
            asking_price,
            hedonic_price,
            target_price,
        }
    }

    /// An expectation drives a listing only when both prices are positive
    pub fn is_usable(&self) -> bool {
        self.asking_price > 0.0 && self.hedonic_price > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usable_requires_positive_prices() {
        assert!(ExpectationEntry::new(100.0, 90.0, 80.0).is_usable());
        assert!(!ExpectationEntry::new(0.0, 90.0, 80.0).is_usable());
        assert!(!ExpectationEntry::new(100.0, 0.0, 80.0).is_usable());
        assert!(!ExpectationEntry::default().is_usable());
    }
}

//! Hestia Pricing
//!
//! Concrete price-expectation sources behind the `PricingModel` port, plus
//! the interval math shared by every seller variant.

mod curve;
mod fixed_decay;
mod linear_decay;

pub use curve::curve_len;
pub use fixed_decay::FixedDecaySchedule;
pub use linear_decay::{LinearDecayConfig, LinearDecayModel};

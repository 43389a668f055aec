/// Unit identifier - serial id assigned by the data loader
/// Future: could become a newtype with validation (non-zero)
pub type UnitId = u64;

/// Spatial zone identifier used to filter market entries by location
pub type ZoneId = u64;

/// Agent identifier shared by sellers and bidders
pub type AgentId = u64;

/// Simulated day counter; day 0 is the first day of the run
pub type Day = u32;

/// Price value - model-computed, continuous
/// Future: could become a newtype with validation (non-negative)
pub type Price = f64;

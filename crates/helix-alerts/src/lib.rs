//! Alert aggregator: turns completed high-severity prediction results
//! into user-facing alerts, exactly once per result.

mod aggregator;
mod messages;

pub use aggregator::AlertAggregator;

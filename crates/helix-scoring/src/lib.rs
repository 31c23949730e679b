//! Model service adapters. Each disease's scorer is an isolated failure
//! domain behind the `RiskScorer` trait; the registry maps disease ids to
//! scorer instances at runtime, so the set of diseases is data, not code.

pub mod features;
pub mod local;
pub mod protocol;
pub mod registry;
pub mod transport;

pub use features::FeatureSpec;
pub use local::LocalScorer;
pub use registry::ScorerRegistry;
pub use transport::HttpScorer;

//! Rendering of the profile document.

pub mod aggregator;
pub mod template;

pub use aggregator::MetricsAggregator;

//! Transformation module.
//!
//! - Aggregator: complaint records to per-(product, year) statistics
//! - Pipeline: parse, aggregate and write in one call

pub mod aggregator;
pub mod pipeline;

pub use aggregator::{aggregate, rounded_percent, GroupTally};
pub use pipeline::*;

//! Balance/expense aggregation.
//!
//! A read-side reducer over record snapshots: sums each category, computes
//! the net and formats the three figures for display. Amounts that do not
//! parse count as zero and are reported, never raised.

pub mod engine;
pub mod types;

#[cfg(test)]
mod props;
#[cfg(test)]
mod tests;

pub use engine::{AggregationEngine, AmountSource};
pub use types::{FormattedTotals, RecordKind, SkippedAmount, Summary, Tally};

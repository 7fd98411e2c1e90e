//! Data models for the tracker
//!
//! Typed feed records, the aggregate counters derived from them and the
//! verification query/outcome pair.

pub mod record;
pub mod snapshot;
pub mod verification;

// Re-export commonly used types for convenience
pub use record::{Amount, Direction, TransactionRecord};
pub use snapshot::{AggregateSnapshot, Metric, MetricValues, Tally};
pub use verification::{ContributionQuery, VerificationOutcome};

use std::collections::BTreeMap;

use crate::models::{Metric, VerificationOutcome};

/// What a metric cell shows
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MetricDisplay {
    /// Exact value, shown right after a successful poll
    Value(f64),
    /// Intermediate animation frame, already floored
    Frame(i64),
    /// The feed could not be fetched
    Error,
}

/// What the verification panel shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerificationDisplay {
    Loading,
    /// Not every field was filled in
    Incomplete,
    Outcome(VerificationOutcome),
    /// The feed could not be fetched
    Failed,
}

impl VerificationDisplay {
    pub fn headline(&self) -> &'static str {
        match self {
            VerificationDisplay::Loading => "⏳ Checking the ledger...",
            VerificationDisplay::Incomplete => "⚠️ Please fill in all fields to verify.",
            VerificationDisplay::Outcome(VerificationOutcome::Confirmed) => "✅ Verified On-Chain!",
            VerificationDisplay::Outcome(VerificationOutcome::Pending) => {
                "⚠️ Transaction Found, Pending Verification"
            }
            VerificationDisplay::Outcome(VerificationOutcome::NotFound) => {
                "❌ No Matching Contribution Found"
            }
            VerificationDisplay::Failed => "Error",
        }
    }

    pub fn detail(&self) -> Option<&'static str> {
        match self {
            VerificationDisplay::Loading | VerificationDisplay::Incomplete => None,
            VerificationDisplay::Outcome(VerificationOutcome::Confirmed) => {
                Some("A matching transaction was found and confirmed on the ledger.")
            }
            VerificationDisplay::Outcome(VerificationOutcome::Pending) => {
                Some("A matching transaction was found but is not yet confirmed on-chain.")
            }
            VerificationDisplay::Outcome(VerificationOutcome::NotFound) => Some(
                "Please double-check the details. It may take a few minutes for new transactions to appear.",
            ),
            VerificationDisplay::Failed => {
                Some("Could not complete verification. Please try again later.")
            }
        }
    }
}

/// Where counters and verification results end up
pub trait RenderSurface {
    fn show_metric(&mut self, metric: Metric, display: MetricDisplay);

    fn show_verification(&mut self, display: VerificationDisplay);

    /// Called once per batch of metric updates
    fn flush(&mut self) {}
}

/// Records everything shown, in order
#[derive(Debug, Default)]
pub struct MemorySurface {
    pub current: BTreeMap<Metric, MetricDisplay>,
    pub metric_history: Vec<(Metric, MetricDisplay)>,
    pub verifications: Vec<VerificationDisplay>,
    pub flushes: usize,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn metric(&self, metric: Metric) -> Option<MetricDisplay> {
        self.current.get(&metric).copied()
    }

    /// Every display shown for one metric, oldest first
    pub fn history_of(&self, metric: Metric) -> Vec<MetricDisplay> {
        self.metric_history
            .iter()
            .filter(|(m, _)| *m == metric)
            .map(|(_, d)| *d)
            .collect()
    }

    pub fn last_verification(&self) -> Option<VerificationDisplay> {
        self.verifications.last().copied()
    }
}

impl RenderSurface for MemorySurface {
    fn show_metric(&mut self, metric: Metric, display: MetricDisplay) {
        self.current.insert(metric, display);
        self.metric_history.push((metric, display));
    }

    fn show_verification(&mut self, display: VerificationDisplay) {
        self.verifications.push(display);
    }

    fn flush(&mut self) {
        self.flushes += 1;
    }
}

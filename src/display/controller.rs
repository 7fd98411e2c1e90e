use crate::models::{AggregateSnapshot, Metric, MetricValues};

use super::surface::{MetricDisplay, RenderSurface};

/// One metric moving from its previously rendered value to a new one
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    pub metric: Metric,
    pub from: f64,
    pub to: f64,
}

/// Decides which counters need a transition after a poll.
///
/// Holds the last value rendered per metric. A metric whose new value equals
/// its baseline produces no transition and keeps its baseline.
#[derive(Debug, Clone, Default)]
pub struct PresentationController {
    baseline: MetricValues,
}

impl PresentationController {
    /// Start from all-zero counters
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_baseline(baseline: MetricValues) -> Self {
        Self { baseline }
    }

    pub fn baseline(&self) -> &MetricValues {
        &self.baseline
    }

    /// Diff `next` against the baseline, moving the baseline of every changed
    /// metric to its new value.
    pub fn apply(&mut self, next: &AggregateSnapshot) -> Vec<Transition> {
        let mut transitions = Vec::new();
        for metric in Metric::ALL {
            let from = self.baseline.get(metric);
            let to = next.value(metric);
            if from != to {
                transitions.push(Transition { metric, from, to });
                self.baseline.set(metric, to);
            }
        }
        transitions
    }

    /// Show every metric at its exact snapshot value
    pub fn show_snapshot(&self, snapshot: &AggregateSnapshot, surface: &mut dyn RenderSurface) {
        for metric in Metric::ALL {
            surface.show_metric(metric, MetricDisplay::Value(snapshot.value(metric)));
        }
        surface.flush();
    }

    /// Replace every metric with the error marker. The baseline is kept so the
    /// next successful poll animates from the last good values.
    pub fn show_failure(&self, surface: &mut dyn RenderSurface) {
        for metric in Metric::ALL {
            surface.show_metric(metric, MetricDisplay::Error);
        }
        surface.flush();
    }
}

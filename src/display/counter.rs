use std::time::Duration;

use tokio::time::{interval, MissedTickBehavior};

use super::controller::Transition;
use super::surface::{MetricDisplay, RenderSurface};
use crate::models::Metric;

/// Length and granularity of a counter transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationTiming {
    pub duration: Duration,
    pub tick: Duration,
}

impl Default for AnimationTiming {
    fn default() -> Self {
        Self {
            duration: Duration::from_millis(1500),
            tick: Duration::from_millis(20),
        }
    }
}

/// Linear count from `start` to `end`, one floored frame per tick.
///
/// The last frame is always exactly `floor(end)`; values never pass `end`
/// whichever way the counter moves.
#[derive(Debug, Clone)]
pub struct CounterAnimation {
    current: f64,
    end: f64,
    increment: f64,
    finished: bool,
}

impl CounterAnimation {
    pub fn new(start: f64, end: f64, timing: AnimationTiming) -> Self {
        let steps = if timing.tick.is_zero() {
            1.0
        } else {
            (timing.duration.as_nanos() as f64 / timing.tick.as_nanos() as f64).max(1.0)
        };

        Self {
            current: start,
            end,
            increment: (end - start) / steps,
            finished: false,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

impl Iterator for CounterAnimation {
    type Item = i64;

    fn next(&mut self) -> Option<i64> {
        if self.finished {
            return None;
        }

        self.current += self.increment;
        let reached = (self.increment > 0.0 && self.current >= self.end)
            || (self.increment < 0.0 && self.current <= self.end)
            || self.increment == 0.0
            || !self.increment.is_finite();
        if reached {
            self.current = self.end;
            self.finished = true;
        }

        Some(self.current.floor() as i64)
    }
}

/// Drive every transition on a shared tick until all have reached their end
/// value, flushing the surface after each tick.
pub async fn run_transitions(
    transitions: &[Transition],
    timing: AnimationTiming,
    surface: &mut dyn RenderSurface,
) {
    let mut active: Vec<(Metric, CounterAnimation)> = transitions
        .iter()
        .map(|t| (t.metric, CounterAnimation::new(t.from, t.to, timing)))
        .collect();

    if active.is_empty() {
        return;
    }

    let mut ticker = interval(timing.tick.max(Duration::from_millis(1)));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // The first tick completes immediately; frames start one tick later
    ticker.tick().await;

    while !active.is_empty() {
        ticker.tick().await;
        for (metric, animation) in active.iter_mut() {
            if let Some(frame) = animation.next() {
                surface.show_metric(*metric, MetricDisplay::Frame(frame));
            }
        }
        surface.flush();
        active.retain(|(_, animation)| !animation.is_finished());
    }
}

use std::future::Future;
use std::time::Duration;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info, warn};

use super::{AppContext, CommandError};
use crate::api::feed::FeedSource;
use crate::display::{AnimationTiming, PresentationController, RenderSurface, TerminalSurface};
use crate::models::ContributionQuery;
use crate::services::{stats_service, verify_service};

/// Parse a stdin line into a verification query.
///
/// Accepts `verify <date> <time> <amount>` or just `<date> <time> <amount>`.
/// Returns `None` for blank lines; lines with missing fields still produce a
/// query so the "fill in all fields" warning is shown.
pub fn parse_verify_line(line: &str) -> Option<ContributionQuery> {
    let mut parts: Vec<&str> = line.split_whitespace().collect();
    if parts.first().map(|p| p.eq_ignore_ascii_case("verify")).unwrap_or(false) {
        parts.remove(0);
    }
    if parts.is_empty() {
        return None;
    }

    let field = |i: usize| parts.get(i).copied().unwrap_or_default();
    Some(ContributionQuery::new(field(0), field(1), field(2)))
}

/// Pacing of the watch loop
#[derive(Debug, Clone, Copy)]
pub struct WatchTiming {
    pub refresh_interval: Duration,
    pub animation: AnimationTiming,
    pub verify_result_delay: Duration,
}

/// Refresh on load and then every `refresh_interval` until `shutdown`
/// resolves, verifying every query line read from `input` in between.
///
/// Refreshes run to completion inside the loop and the interval restarts when
/// one finishes, so ticks that come due while a fetch is still pending are
/// dropped rather than queued or started alongside it.
pub async fn watch_feed<R, F>(
    source: &dyn FeedSource,
    timing: WatchTiming,
    controller: &mut PresentationController,
    surface: &mut dyn RenderSurface,
    input: R,
    shutdown: F,
) where
    R: AsyncBufRead + Unpin,
    F: Future<Output = ()>,
{
    let mut ticker = interval(timing.refresh_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let mut lines = input.lines();
    let mut input_open = true;
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            biased;

            _ = &mut shutdown => {
                info!("Stopping watch");
                break;
            }
            _ = ticker.tick() => {
                debug!("Refresh tick");
                // Failures are already on screen; the next tick retries
                if let Err(e) = stats_service::refresh_stats(
                    source,
                    controller,
                    timing.animation,
                    surface,
                ).await {
                    warn!("Refresh failed, retrying on next tick: {}", e);
                }
                ticker.reset();
            }
            line = lines.next_line(), if input_open => {
                match line {
                    Ok(Some(line)) => {
                        let Some(query) = parse_verify_line(&line) else {
                            continue;
                        };
                        let result = verify_service::verify_contribution(
                            source,
                            &query,
                            timing.verify_result_delay,
                            surface,
                        ).await;
                        if let Err(e) = result {
                            debug!("Verification did not complete: {}", e);
                        }
                        // Put the counters back under the result
                        surface.flush();
                    }
                    Ok(None) => {
                        debug!("Input closed, verification disabled");
                        input_open = false;
                    }
                    Err(e) => {
                        warn!("Failed to read input: {}", e);
                        input_open = false;
                    }
                }
            }
        }
    }
}

pub async fn execute(ctx: &AppContext) -> Result<(), CommandError> {
    info!(
        "👀 Watching {} every {}s",
        ctx.feed.endpoint(),
        ctx.config.refresh_interval.as_secs()
    );

    let timing = WatchTiming {
        refresh_interval: ctx.config.refresh_interval.max(Duration::from_secs(1)),
        animation: ctx.config.animation,
        verify_result_delay: ctx.config.verify_result_delay,
    };
    let mut controller = PresentationController::new();
    let mut surface = TerminalSurface::stdout(ctx.config.currency_label.clone());

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl-C: {}", e);
        }
    };

    watch_feed(
        &ctx.feed,
        timing,
        &mut controller,
        &mut surface,
        BufReader::new(tokio::io::stdin()),
        shutdown,
    )
    .await;

    surface.print_table()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;
    use serde_json::json;
    use tokio::time::Instant;

    use crate::api::feed::{FeedError, StaticFeed};
    use crate::display::{MemorySurface, MetricDisplay, VerificationDisplay};
    use crate::models::{Metric, TransactionRecord, VerificationOutcome};

    #[test]
    fn test_parse_verify_line_with_keyword() {
        let query = parse_verify_line("verify 2024-01-01 14:30 500").unwrap();
        assert_eq!(query, ContributionQuery::new("2024-01-01", "14:30", "500"));
    }

    #[test]
    fn test_parse_verify_line_without_keyword() {
        let query = parse_verify_line("  2024-01-01   14:30 500.0 ").unwrap();
        assert_eq!(query.amount, "500.0");
        assert!(query.is_complete());
    }

    #[test]
    fn test_parse_verify_line_incomplete() {
        let query = parse_verify_line("VERIFY 2024-01-01").unwrap();
        assert!(!query.is_complete());
        assert_eq!(query.time, "");
    }

    #[test]
    fn test_parse_verify_line_blank() {
        assert!(parse_verify_line("   ").is_none());
        assert!(parse_verify_line("verify").is_none());
    }

    /// Empty feed whose first fetch hangs for `first_delay`
    struct SlowFirstFeed {
        origin: Instant,
        first_delay: Duration,
        starts: Mutex<Vec<Duration>>,
        in_flight: AtomicUsize,
        max_in_flight: AtomicUsize,
    }

    impl SlowFirstFeed {
        fn new(first_delay: Duration) -> Self {
            Self {
                origin: Instant::now(),
                first_delay,
                starts: Mutex::new(Vec::new()),
                in_flight: AtomicUsize::new(0),
                max_in_flight: AtomicUsize::new(0),
            }
        }

        fn start_secs(&self) -> Vec<u64> {
            self.starts.lock().unwrap().iter().map(|d| d.as_secs()).collect()
        }
    }

    #[async_trait]
    impl FeedSource for SlowFirstFeed {
        async fn fetch_records(&self) -> Result<Vec<TransactionRecord>, FeedError> {
            let first = {
                let mut starts = self.starts.lock().unwrap();
                starts.push(self.origin.elapsed());
                starts.len() == 1
            };
            let running = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_in_flight.fetch_max(running, Ordering::SeqCst);

            if first {
                tokio::time::sleep(self.first_delay).await;
            }

            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            Ok(Vec::new())
        }
    }

    fn timing(refresh_secs: u64) -> WatchTiming {
        WatchTiming {
            refresh_interval: Duration::from_secs(refresh_secs),
            animation: AnimationTiming::default(),
            verify_result_delay: Duration::ZERO,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticks_during_slow_refresh_are_dropped() {
        let feed = SlowFirstFeed::new(Duration::from_secs(350));
        let mut controller = PresentationController::new();
        let mut surface = MemorySurface::new();

        watch_feed(
            &feed,
            timing(100),
            &mut controller,
            &mut surface,
            tokio::io::empty(),
            tokio::time::sleep(Duration::from_secs(600)),
        )
        .await;

        // Ticks due at 100, 200 and 300 fell inside the first fetch
        assert_eq!(feed.start_secs(), vec![0, 450, 550]);
        assert_eq!(feed.max_in_flight.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_input_lines_are_verified() {
        let feed = StaticFeed::new(json!([
            { "amount": "500", "direction": "IN", "onChain": "no", "date": "2024-01-01", "time": "14:00" }
        ]));
        let mut controller = PresentationController::new();
        let mut surface = MemorySurface::new();

        watch_feed(
            &feed,
            timing(100),
            &mut controller,
            &mut surface,
            &b"\nverify 2024-01-01 14:30 500\n2024-01-01\n"[..],
            tokio::time::sleep(Duration::from_secs(10)),
        )
        .await;

        assert_eq!(
            surface.verifications,
            vec![
                VerificationDisplay::Loading,
                VerificationDisplay::Outcome(VerificationOutcome::Pending),
                VerificationDisplay::Incomplete,
            ]
        );
        assert_eq!(surface.metric(Metric::TotalCount), Some(MetricDisplay::Value(0.0)));
    }
}

use tracing::{error, info};

use crate::api::feed::{FeedError, FeedSource};
use crate::display::{run_transitions, AnimationTiming, PresentationController, RenderSurface};
use crate::models::AggregateSnapshot;

use super::classify_service::summarize;

/// One stats refresh: fetch, aggregate, render.
///
/// Every metric is first shown at its exact new value, then the metrics that
/// changed since the last successful refresh are animated from their old
/// value. On fetch failure every metric shows the error marker and the
/// controller's baseline is left untouched.
pub async fn refresh_stats(
    source: &dyn FeedSource,
    controller: &mut PresentationController,
    timing: AnimationTiming,
    surface: &mut dyn RenderSurface,
) -> Result<AggregateSnapshot, FeedError> {
    let records = match source.fetch_records().await {
        Ok(records) => records,
        Err(e) => {
            error!("Failed to fetch donation data: {}", e);
            controller.show_failure(surface);
            return Err(e);
        }
    };

    let snapshot = summarize(&records);
    controller.show_snapshot(&snapshot, surface);

    let transitions = controller.apply(&snapshot);
    if !transitions.is_empty() {
        info!("Animating {} changed counters", transitions.len());
        run_transitions(&transitions, timing, surface).await;
    }

    info!("Stats updated successfully");
    Ok(snapshot)
}

use tracing::info;

use super::{AppContext, CommandError};
use crate::display::{PresentationController, TerminalSurface};
use crate::services::stats_service;

pub async fn execute(ctx: &AppContext) -> Result<(), CommandError> {
    info!("📊 Stats command called for {}", ctx.feed.endpoint());

    let mut controller = PresentationController::new();
    let mut surface = TerminalSurface::stdout(ctx.config.currency_label.clone());

    let result =
        stats_service::refresh_stats(&ctx.feed, &mut controller, ctx.config.animation, &mut surface).await;

    // Print the table either way so the error markers are visible
    surface.print_table()?;
    result?;

    Ok(())
}

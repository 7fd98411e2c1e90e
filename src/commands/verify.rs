use tracing::info;

use super::{AppContext, CommandError};
use crate::display::TerminalSurface;
use crate::models::ContributionQuery;
use crate::services::verify_service::{self, VerifyError};

pub async fn execute(
    ctx: &AppContext,
    date: String,
    time: String,
    amount: String,
) -> Result<(), CommandError> {
    info!("🔍 Verify command called: {} {} {}", date, time, amount);

    let query = ContributionQuery::new(date, time, amount);
    let mut surface = TerminalSurface::stdout(ctx.config.currency_label.clone());

    match verify_service::verify_contribution(&ctx.feed, &query, ctx.config.verify_result_delay, &mut surface)
        .await
    {
        Ok(_) => Ok(()),
        // Already shown as a warning; nothing was fetched
        Err(VerifyError::IncompleteInput) => Ok(()),
        Err(e) => Err(e.into()),
    }
}

use std::time::Duration;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use thiserror::Error;
use tracing::{debug, error, info};

use crate::api::feed::{FeedError, FeedSource};
use crate::display::{RenderSurface, VerificationDisplay};
use crate::models::{ContributionQuery, TransactionRecord, VerificationOutcome};
use crate::utils::number::parse_float_prefix;

/// Largest gap between the claimed and recorded time that still matches
pub const TIME_TOLERANCE_MS: i64 = 3_600_000;

#[derive(Debug, Error)]
pub enum VerifyError {
    #[error("date, time and amount are all required")]
    IncompleteInput,
    #[error(transparent)]
    Feed(#[from] FeedError),
}

/// Parse a time-of-day token onto the 1970-01-01 nominal date.
///
/// Accepts `HH:MM`, `HH:MM:SS` and `HH:MM:SS.fff`.
pub fn parse_time_of_day(token: &str) -> Option<NaiveDateTime> {
    let nominal = NaiveDate::from_ymd_opt(1970, 1, 1)?;
    let time = NaiveTime::parse_from_str(token, "%H:%M:%S%.f")
        .or_else(|_| NaiveTime::parse_from_str(token, "%H:%M"))
        .ok()?;
    Some(nominal.and_time(time))
}

/// Claimed and recorded times are at most one hour apart. Both sit on the
/// same nominal date, so 23:30 against 00:30 is a 23-hour gap.
fn within_window(claimed: NaiveDateTime, recorded: NaiveDateTime) -> bool {
    (claimed - recorded).num_milliseconds().abs() <= TIME_TOLERANCE_MS
}

/// First record, in feed order, matching the query's date, amount and time
/// window. Records without a date, time or amount never match.
pub fn find_match<'a>(
    records: &'a [TransactionRecord],
    query: &ContributionQuery,
) -> Option<&'a TransactionRecord> {
    let wanted_amount = parse_float_prefix(&query.amount);
    let claimed_time = parse_time_of_day(&query.time);

    records.iter().find(|record| {
        let (Some(date), Some(time)) = (record.date.as_deref(), record.time.as_deref()) else {
            return false;
        };
        if !record.amount.is_present() {
            return false;
        }

        let date_match = date == query.date;
        let amount_match = match (record.amount.value(), wanted_amount) {
            (Some(have), Some(want)) => have == want,
            _ => false,
        };
        let time_match = match (claimed_time, parse_time_of_day(time)) {
            (Some(claimed), Some(recorded)) => within_window(claimed, recorded),
            _ => false,
        };

        date_match && amount_match && time_match
    })
}

/// Tri-state result of a match attempt
pub fn outcome_of(matched: Option<&TransactionRecord>) -> VerificationOutcome {
    match matched {
        None => VerificationOutcome::NotFound,
        Some(record) if record.on_chain => VerificationOutcome::Confirmed,
        Some(_) => VerificationOutcome::Pending,
    }
}

/// Verify a contribution against the live feed, rendering progress and the
/// result on `surface`.
///
/// Incomplete queries are rejected before any fetch. A fetch failure renders
/// the generic failure message, distinct from "no match".
pub async fn verify_contribution(
    source: &dyn FeedSource,
    query: &ContributionQuery,
    result_delay: Duration,
    surface: &mut dyn RenderSurface,
) -> Result<VerificationOutcome, VerifyError> {
    if !query.is_complete() {
        surface.show_verification(VerificationDisplay::Incomplete);
        return Err(VerifyError::IncompleteInput);
    }

    surface.show_verification(VerificationDisplay::Loading);

    let records = match source.fetch_records().await {
        Ok(records) => records,
        Err(e) => {
            error!("Verification failed: {}", e);
            surface.show_verification(VerificationDisplay::Failed);
            return Err(e.into());
        }
    };

    debug!(
        "Matching {} {} {} against {} records",
        query.date,
        query.time,
        query.amount,
        records.len()
    );
    let outcome = outcome_of(find_match(&records, query));
    info!("Verification for {} {} ({}): {:?}", query.date, query.time, query.amount, outcome);

    if !result_delay.is_zero() {
        tokio::time::sleep(result_delay).await;
    }
    surface.show_verification(VerificationDisplay::Outcome(outcome));

    Ok(outcome)
}

use tracing::info;

use crate::models::{AggregateSnapshot, Direction, Tally, TransactionRecord};

/// Records split by settlement and direction
#[derive(Debug, Default)]
pub struct Classified<'a> {
    /// Validly amounted records flagged on-chain, any direction
    pub on_chain: Vec<&'a TransactionRecord>,
    /// On-chain records flowing in
    pub donations: Vec<&'a TransactionRecord>,
    /// On-chain records flowing out
    pub expenses: Vec<&'a TransactionRecord>,
}

/// Partition records into on-chain, donation and expense subsets.
///
/// Donations and expenses are both drawn from the on-chain set and are
/// disjoint; on-chain records with another direction only count in the total.
pub fn classify(records: &[TransactionRecord]) -> Classified<'_> {
    let mut classified = Classified::default();

    for record in records.iter().filter(|r| r.is_settled()) {
        classified.on_chain.push(record);
        match record.direction {
            Direction::In => classified.donations.push(record),
            Direction::Out => classified.expenses.push(record),
            Direction::Other => {}
        }
    }

    classified
}

/// Reduce each subset to its count and amount sum
pub fn aggregate(classified: &Classified<'_>) -> AggregateSnapshot {
    AggregateSnapshot {
        total_count: classified.on_chain.len(),
        donations: tally(&classified.donations),
        expenses: tally(&classified.expenses),
    }
}

/// Classify and aggregate in one step
pub fn summarize(records: &[TransactionRecord]) -> AggregateSnapshot {
    let snapshot = aggregate(&classify(records));
    info!(
        "Totals - All: {}, Donations: {} ({}), Expenses: {} ({})",
        snapshot.total_count,
        snapshot.donations.count,
        snapshot.donations.sum,
        snapshot.expenses.count,
        snapshot.expenses.sum
    );
    snapshot
}

fn tally(records: &[&TransactionRecord]) -> Tally {
    let mut tally = Tally::default();
    for amount in records.iter().filter_map(|r| r.amount.positive()) {
        tally.add(amount);
    }
    tally
}

//! Aggregate statistics models

/// One of the five counters shown on the stats display
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Metric {
    TotalCount,
    DonationCount,
    DonationAmount,
    ExpenseCount,
    ExpenseAmount,
}

impl Metric {
    pub const ALL: [Metric; 5] = [
        Metric::TotalCount,
        Metric::DonationCount,
        Metric::DonationAmount,
        Metric::ExpenseCount,
        Metric::ExpenseAmount,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Metric::TotalCount => "On-chain transactions",
            Metric::DonationCount => "Donations",
            Metric::DonationAmount => "Donated",
            Metric::ExpenseCount => "Expenses",
            Metric::ExpenseAmount => "Spent",
        }
    }

    /// Amount metrics carry a currency label, count metrics don't
    pub fn is_amount(&self) -> bool {
        matches!(self, Metric::DonationAmount | Metric::ExpenseAmount)
    }

    /// Position in [`Metric::ALL`]
    pub(crate) fn index(&self) -> usize {
        match self {
            Metric::TotalCount => 0,
            Metric::DonationCount => 1,
            Metric::DonationAmount => 2,
            Metric::ExpenseCount => 3,
            Metric::ExpenseAmount => 4,
        }
    }
}

/// Count and amount sum of one transaction class
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Tally {
    pub count: usize,
    pub sum: f64,
}

impl Tally {
    pub fn add(&mut self, amount: f64) {
        self.count += 1;
        self.sum += amount;
    }
}

/// Totals derived from one poll of the feed
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AggregateSnapshot {
    /// On-chain transactions of any direction
    pub total_count: usize,
    pub donations: Tally,
    pub expenses: Tally,
}

impl AggregateSnapshot {
    pub fn value(&self, metric: Metric) -> f64 {
        match metric {
            Metric::TotalCount => self.total_count as f64,
            Metric::DonationCount => self.donations.count as f64,
            Metric::DonationAmount => self.donations.sum,
            Metric::ExpenseCount => self.expenses.count as f64,
            Metric::ExpenseAmount => self.expenses.sum,
        }
    }
}

/// The last value rendered for every metric
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MetricValues([f64; 5]);

impl MetricValues {
    pub fn get(&self, metric: Metric) -> f64 {
        self.0[metric.index()]
    }

    pub fn set(&mut self, metric: Metric, value: f64) {
        self.0[metric.index()] = value;
    }
}

impl From<&AggregateSnapshot> for MetricValues {
    fn from(snapshot: &AggregateSnapshot) -> Self {
        let mut values = MetricValues::default();
        for metric in Metric::ALL {
            values.set(metric, snapshot.value(metric));
        }
        values
    }
}

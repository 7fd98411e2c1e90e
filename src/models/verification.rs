//! Contribution verification models

/// A contribution as described by the person checking it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContributionQuery {
    pub date: String,
    pub time: String,
    pub amount: String,
}

impl ContributionQuery {
    pub fn new(date: impl Into<String>, time: impl Into<String>, amount: impl Into<String>) -> Self {
        Self {
            date: date.into().trim().to_string(),
            time: time.into().trim().to_string(),
            amount: amount.into().trim().to_string(),
        }
    }

    /// All three fields filled in
    pub fn is_complete(&self) -> bool {
        !self.date.is_empty() && !self.time.is_empty() && !self.amount.is_empty()
    }
}

/// Result of matching a query against the feed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerificationOutcome {
    /// A matching record exists and is settled on-chain
    Confirmed,
    /// A matching record exists but is not on-chain yet
    Pending,
    /// No record matches date, time window and amount
    NotFound,
}

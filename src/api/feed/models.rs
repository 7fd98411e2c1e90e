use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::TransactionRecord;

/// Outer shape of a feed response
#[derive(Debug, Clone, PartialEq)]
pub enum FeedEnvelope {
    /// The response body is the row list itself
    Bare(Vec<Value>),
    /// `{ "data": [...] }`
    Data(Vec<Value>),
    /// `{ "values": [...] }`
    Values(Vec<Value>),
    /// Anything else: `{}`, `null`, a string, an object without a row list
    Unrecognized,
}

impl FeedEnvelope {
    /// Detect the envelope shape. A bare array wins over `data`, which wins
    /// over `values`; a key holding a non-array does not count.
    pub fn detect(raw: Value) -> Self {
        match raw {
            Value::Array(rows) => FeedEnvelope::Bare(rows),
            Value::Object(mut map) => {
                if let Some(Value::Array(rows)) = map.remove("data") {
                    return FeedEnvelope::Data(rows);
                }
                if let Some(Value::Array(rows)) = map.remove("values") {
                    return FeedEnvelope::Values(rows);
                }
                FeedEnvelope::Unrecognized
            }
            _ => FeedEnvelope::Unrecognized,
        }
    }

    pub fn shape(&self) -> &'static str {
        match self {
            FeedEnvelope::Bare(_) => "array",
            FeedEnvelope::Data(_) => "data",
            FeedEnvelope::Values(_) => "values",
            FeedEnvelope::Unrecognized => "unrecognized",
        }
    }

    pub fn into_rows(self) -> Vec<Value> {
        match self {
            FeedEnvelope::Bare(rows) | FeedEnvelope::Data(rows) | FeedEnvelope::Values(rows) => rows,
            FeedEnvelope::Unrecognized => Vec::new(),
        }
    }
}

/// Turn a raw feed response into typed records, in feed order.
///
/// Malformed envelopes degrade to an empty list rather than an error.
pub fn normalize_feed(raw: Value) -> Vec<TransactionRecord> {
    let envelope = FeedEnvelope::detect(raw);
    if envelope == FeedEnvelope::Unrecognized {
        warn!("Unexpected feed structure, treating as empty");
    }

    let shape = envelope.shape();
    let rows = envelope.into_rows();
    debug!("Feed envelope: {} ({} rows)", shape, rows.len());

    if let Some(Value::Object(first)) = rows.first() {
        let fields: Vec<&str> = first.keys().map(String::as_str).collect();
        debug!("Available fields: {:?}", fields);
    }

    rows.into_iter().map(TransactionRecord::from_row).collect()
}

/// Failure to obtain a feed response
#[derive(Debug, Error)]
pub enum FeedError {
    /// Network/request error
    #[error("Request Error: {0}")]
    RequestError(String),
    /// 5xx Server Error
    #[error("Server Error ({0}): {1}")]
    ServerError(u16, String),
    /// Other non-success HTTP status
    #[error("HTTP Error ({0}): {1}")]
    HttpError(u16, String),
    /// Body was not JSON
    #[error("Deserialization Error: {0}")]
    DeserializationError(String),
}

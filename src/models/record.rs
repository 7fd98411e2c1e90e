//! Transaction record models
//!
//! Feed rows arrive loosely typed: amounts may be numbers or strings, the
//! on-chain flag may be a boolean, a number or a word. Rows are parsed once
//! into [`TransactionRecord`] so every predicate downstream works on typed
//! fields.

use serde::Deserialize;
use serde_json::Value;

use crate::utils::number::{number_token, parse_float_prefix};

/// Whether a transaction flows into or out of the tracked account
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    In,
    Out,
    Other,
}

impl Direction {
    fn from_value(value: &Value) -> Self {
        match value {
            Value::String(s) if s.eq_ignore_ascii_case("in") => Direction::In,
            Value::String(s) if s.eq_ignore_ascii_case("out") => Direction::Out,
            _ => Direction::Other,
        }
    }
}

/// Amount field of a feed row
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Amount {
    /// Parsed numeric value, if the field had a numeric prefix
    parsed: Option<f64>,
    /// Whether the raw field was non-empty (non-empty string, non-zero number)
    present: bool,
}

impl Amount {
    fn from_value(value: &Value) -> Self {
        let parsed = match value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => parse_float_prefix(s),
            _ => None,
        };
        let present = match value {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => n.as_f64().map(|v| v != 0.0).unwrap_or(true),
            Value::String(s) => !s.is_empty(),
            Value::Array(_) | Value::Object(_) => true,
        };
        Amount { parsed, present }
    }

    /// Parsed value, whatever its sign
    pub fn value(&self) -> Option<f64> {
        self.parsed
    }

    /// Parsed value when it is a finite number greater than zero
    pub fn positive(&self) -> Option<f64> {
        self.parsed.filter(|v| v.is_finite() && *v > 0.0)
    }

    pub fn is_present(&self) -> bool {
        self.present
    }
}

/// A feed row after parsing and validation
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionRecord {
    pub amount: Amount,
    pub direction: Direction,
    pub on_chain: bool,
    pub date: Option<String>,
    pub time: Option<String>,
}

/// Raw row shape, every field optional and untyped
#[derive(Debug, Default, Deserialize)]
struct RawRow {
    #[serde(default)]
    amount: Value,
    #[serde(default)]
    direction: Value,
    #[serde(default, rename = "onChain")]
    on_chain: Value,
    #[serde(default)]
    date: Value,
    #[serde(default)]
    time: Value,
}

impl TransactionRecord {
    /// Parse one feed row. Never fails: a row that is not an object parses as
    /// a record with every field absent.
    pub fn from_row(row: Value) -> Self {
        // Derived Deserialize also fills structs from arrays by position
        let raw: RawRow = match row {
            Value::Object(_) => serde_json::from_value(row).unwrap_or_default(),
            _ => RawRow::default(),
        };

        TransactionRecord {
            amount: Amount::from_value(&raw.amount),
            direction: Direction::from_value(&raw.direction),
            on_chain: is_truthy_flag(&raw.on_chain),
            date: non_empty_string(raw.date),
            time: non_empty_string(raw.time),
        }
    }

    /// Validly amounted and flagged on-chain
    pub fn is_settled(&self) -> bool {
        self.on_chain && self.amount.positive().is_some()
    }
}

/// `true`, `1` and `yes` in any case are truthy; absent or null never is
pub fn is_truthy_flag(value: &Value) -> bool {
    let token = match value {
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => number_token(n),
        Value::String(s) => s.to_lowercase(),
        _ => return false,
    };
    matches!(token.as_str(), "true" | "1" | "yes")
}

fn non_empty_string(value: Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s),
        _ => None,
    }
}

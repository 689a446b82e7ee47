use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{ParseMoneyError, ParsedAmount, parse_amount};

pub type EntryId = i64;

/// A single ledger record: a calendar date, the amount exactly as the user
/// typed it, and a free-text description. The amount stays raw in storage and
/// is parsed on every read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerEntry {
    /// Assigned by the store on insert.
    pub id: EntryId,
    pub date: NaiveDate,
    pub raw_amount: String,
    pub description: String,
}

impl LedgerEntry {
    /// Parse the raw amount into value and currency marker.
    pub fn parsed_amount(&self) -> Result<ParsedAmount, ParseMoneyError> {
        parse_amount(&self.raw_amount)
    }

    /// Numeric value of the raw amount, or zero when it doesn't parse.
    /// Aggregations deliberately swallow per-entry parse failures this way.
    pub fn amount_or_zero(&self) -> f64 {
        self.parsed_amount().map(|p| p.value).unwrap_or(0.0)
    }
}

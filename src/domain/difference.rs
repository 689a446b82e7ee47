use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::LedgerEntry;

/// The delta between two amounts recorded on two dates.
/// Purely derived, constructed on demand, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmountDifference {
    pub from_date: NaiveDate,
    pub to_date: NaiveDate,
    pub from_amount: f64,
    pub to_amount: f64,
    pub difference: f64,
    pub percentage_change: f64,
}

impl AmountDifference {
    /// Compute difference and percentage change between two dated amounts.
    /// A zero `from_amount` yields a zero percentage instead of dividing;
    /// callers that need the "undefined percentage" case must check for it.
    pub fn new(from_date: NaiveDate, to_date: NaiveDate, from_amount: f64, to_amount: f64) -> Self {
        if to_date < from_date {
            eprintln!(
                "Warning: to_date {} is before from_date {}",
                to_date, from_date
            );
        }

        let difference = to_amount - from_amount;
        let percentage_change = if from_amount != 0.0 {
            difference / from_amount * 100.0
        } else {
            0.0
        };

        Self {
            from_date,
            to_date,
            from_amount,
            to_amount,
            difference,
            percentage_change,
        }
    }

    pub fn is_gain(&self) -> bool {
        self.difference > 0.0
    }

    pub fn is_loss(&self) -> bool {
        self.difference < 0.0
    }
}

impl fmt::Display for AmountDifference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "From {} ({:.2}) -> To {} ({:.2}) | {:+.2} ({:.2}%)",
            self.from_date, self.from_amount, self.to_date, self.to_amount, self.difference,
            self.percentage_change
        )
    }
}

/// Total order applied to a list of differences after pairing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DifferenceOrder {
    #[default]
    FromDateAsc,
    DifferenceDesc,
    ToAmountAsc,
    PercentageChangeDesc,
}

impl DifferenceOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            DifferenceOrder::FromDateAsc => "from-date",
            DifferenceOrder::DifferenceDesc => "difference",
            DifferenceOrder::ToAmountAsc => "to-amount",
            DifferenceOrder::PercentageChangeDesc => "percentage",
        }
    }
}

impl FromStr for DifferenceOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "from-date" => Ok(DifferenceOrder::FromDateAsc),
            "difference" => Ok(DifferenceOrder::DifferenceDesc),
            "to-amount" => Ok(DifferenceOrder::ToAmountAsc),
            "percentage" => Ok(DifferenceOrder::PercentageChangeDesc),
            _ => Err(format!("unknown sort order: {}", s)),
        }
    }
}

impl fmt::Display for DifferenceOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Sort differences in place. Stable, so ties keep their existing order.
pub fn sort_differences(differences: &mut [AmountDifference], order: DifferenceOrder) {
    match order {
        DifferenceOrder::FromDateAsc => {
            differences.sort_by_key(|d| d.from_date);
        }
        DifferenceOrder::DifferenceDesc => {
            differences.sort_by(|a, b| b.difference.total_cmp(&a.difference));
        }
        DifferenceOrder::ToAmountAsc => {
            differences.sort_by(|a, b| a.to_amount.total_cmp(&b.to_amount));
        }
        DifferenceOrder::PercentageChangeDesc => {
            differences.sort_by(|a, b| b.percentage_change.total_cmp(&a.percentage_change));
        }
    }
}

/// Pair each entry with its immediate chronological predecessor.
/// Sorting ascending by date is done here, not by the caller; n entries
/// produce n-1 differences, 0 or 1 entries produce none.
pub fn consecutive_differences(entries: &[LedgerEntry]) -> Vec<AmountDifference> {
    let mut sorted: Vec<&LedgerEntry> = entries.iter().collect();
    sorted.sort_by_key(|e| e.date);

    sorted
        .windows(2)
        .map(|pair| {
            AmountDifference::new(
                pair[0].date,
                pair[1].date,
                pair[0].amount_or_zero(),
                pair[1].amount_or_zero(),
            )
        })
        .collect()
}

/// Difference between the earliest and latest entry, regardless of input order.
pub fn total_difference(entries: &[LedgerEntry]) -> Result<AmountDifference, InsufficientDataError> {
    if entries.len() < 2 {
        return Err(InsufficientDataError {
            found: entries.len(),
        });
    }

    let mut sorted: Vec<&LedgerEntry> = entries.iter().collect();
    sorted.sort_by_key(|e| e.date);

    let first = sorted[0];
    let last = sorted[sorted.len() - 1];

    Ok(AmountDifference::new(
        first.date,
        last.date,
        first.amount_or_zero(),
        last.amount_or_zero(),
    ))
}

/// Sum the parsed amounts of all entries. Unparseable amounts count as zero,
/// an empty slice sums to zero.
pub fn sum_amounts(entries: &[LedgerEntry]) -> f64 {
    entries.iter().map(|e| e.amount_or_zero()).sum()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsufficientDataError {
    pub found: usize,
}

impl fmt::Display for InsufficientDataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "at least two entries are needed to compute a total difference (found {})",
            self.found
        )
    }
}

impl std::error::Error for InsufficientDataError {}

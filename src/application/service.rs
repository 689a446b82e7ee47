use chrono::NaiveDate;

use crate::domain::{
    AmountDifference, DifferenceOrder, EntryId, LedgerEntry, consecutive_differences,
    sort_differences, sum_amounts, total_difference,
};
use crate::storage::Repository;

use super::AppError;

/// Application service providing high-level operations for the ledger.
/// This is the primary interface for any client (CLI, API, TUI, etc.).
///
/// Whether `start <= end` holds for a range is the caller's concern; a
/// backwards range simply matches nothing.
pub struct LedgerService {
    repo: Repository,
}

impl LedgerService {
    /// Create a new ledger service with the given repository.
    pub fn new(repo: Repository) -> Self {
        Self { repo }
    }

    /// Initialize a new database at the given path.
    pub async fn init(database_path: &str) -> Result<Self, AppError> {
        let db_url = format!("sqlite:{}?mode=rwc", database_path);
        let repo = Repository::init(&db_url).await?;
        Ok(Self::new(repo))
    }

    /// Connect to an existing database.
    pub async fn connect(database_path: &str) -> Result<Self, AppError> {
        let db_url = format!("sqlite:{}", database_path);
        let repo = Repository::connect(&db_url).await?;
        Ok(Self::new(repo))
    }

    // ========================
    // Entry operations
    // ========================

    /// Record a new entry. The amount is kept exactly as entered; it is not
    /// required to parse, since parsing is a read-time concern.
    pub async fn add_entry(
        &self,
        date: NaiveDate,
        raw_amount: String,
        description: String,
    ) -> Result<LedgerEntry, AppError> {
        Ok(self
            .repo
            .save_entry(date, &raw_amount, &description)
            .await?)
    }

    /// Replace the date, amount, and description of an existing entry.
    pub async fn update_entry(
        &self,
        id: EntryId,
        date: NaiveDate,
        raw_amount: String,
        description: String,
    ) -> Result<LedgerEntry, AppError> {
        self.repo
            .update_entry(id, date, &raw_amount, &description)
            .await?
            .ok_or(AppError::EntryNotFound(id))
    }

    /// Delete an entry by id.
    pub async fn delete_entry(&self, id: EntryId) -> Result<(), AppError> {
        if !self.repo.delete_entry(id).await? {
            return Err(AppError::EntryNotFound(id));
        }
        Ok(())
    }

    /// Get an entry by id.
    pub async fn get_entry(&self, id: EntryId) -> Result<LedgerEntry, AppError> {
        self.repo
            .get_entry(id)
            .await?
            .ok_or(AppError::EntryNotFound(id))
    }

    /// List all entries, newest first.
    pub async fn list_entries(&self) -> Result<Vec<LedgerEntry>, AppError> {
        Ok(self.repo.list_entries().await?)
    }

    /// Case-insensitive substring search over descriptions.
    pub async fn search_description(&self, keyword: &str) -> Result<Vec<LedgerEntry>, AppError> {
        Ok(self.repo.find_by_description(keyword).await?)
    }

    /// Entries dated within the inclusive [start, end] range.
    pub async fn entries_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<LedgerEntry>, AppError> {
        Ok(self.repo.find_by_date_range(start, end).await?)
    }

    // ========================
    // Aggregation operations
    // ========================

    /// Sum of all parsed amounts in the range. Unparseable amounts count as
    /// zero, an empty range sums to zero.
    pub async fn sum_between(&self, start: NaiveDate, end: NaiveDate) -> Result<f64, AppError> {
        let entries = self.repo.find_by_date_range(start, end).await?;
        Ok(sum_amounts(&entries))
    }

    /// Differences between chronologically adjacent entries in the range,
    /// ordered as requested. An empty or single-entry range yields an empty
    /// list, not an error.
    pub async fn consecutive_differences(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        order: DifferenceOrder,
    ) -> Result<Vec<AmountDifference>, AppError> {
        let entries = self.repo.find_by_date_range(start, end).await?;
        let mut differences = consecutive_differences(&entries);
        sort_differences(&mut differences, order);
        Ok(differences)
    }

    /// Difference between the earliest and latest entry in the range.
    /// Needs at least two entries.
    pub async fn total_difference(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<AmountDifference, AppError> {
        let entries = self.repo.find_by_date_range(start, end).await?;
        Ok(total_difference(&entries)?)
    }
}

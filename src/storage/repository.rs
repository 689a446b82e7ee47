use anyhow::{Context, Result};
use chrono::NaiveDate;
use sqlx::{Row, SqlitePool};

use crate::domain::{EntryId, LedgerEntry};

use super::MIGRATION_001_INITIAL;

/// Repository for persisting and querying ledger entries.
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    /// Create a new repository with the given SQLite connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Connect to a SQLite database at the given path.
    /// Creates the database file if it doesn't exist.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = SqlitePool::connect(database_url)
            .await
            .context("Failed to connect to database")?;
        Ok(Self::new(pool))
    }

    /// Run database migrations.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::query(MIGRATION_001_INITIAL)
            .execute(&self.pool)
            .await
            .context("Failed to run migration 001")?;

        Ok(())
    }

    /// Initialize a new database (connect + migrate).
    pub async fn init(database_url: &str) -> Result<Self> {
        let repo = Self::connect(database_url).await?;
        repo.migrate().await?;
        Ok(repo)
    }

    /// Insert a new entry and return it with its store-assigned id.
    pub async fn save_entry(
        &self,
        date: NaiveDate,
        raw_amount: &str,
        description: &str,
    ) -> Result<LedgerEntry> {
        let row = sqlx::query(
            r#"
            INSERT INTO entries (date, amount, description)
            VALUES (?, ?, ?)
            RETURNING id
            "#,
        )
        .bind(date.to_string())
        .bind(raw_amount)
        .bind(description)
        .fetch_one(&self.pool)
        .await
        .context("Failed to save entry")?;

        Ok(LedgerEntry {
            id: row.get("id"),
            date,
            raw_amount: raw_amount.to_string(),
            description: description.to_string(),
        })
    }

    /// Overwrite an existing entry. Returns None when the id doesn't exist.
    pub async fn update_entry(
        &self,
        id: EntryId,
        date: NaiveDate,
        raw_amount: &str,
        description: &str,
    ) -> Result<Option<LedgerEntry>> {
        let result = sqlx::query(
            r#"
            UPDATE entries
            SET date = ?, amount = ?, description = ?
            WHERE id = ?
            "#,
        )
        .bind(date.to_string())
        .bind(raw_amount)
        .bind(description)
        .bind(id)
        .execute(&self.pool)
        .await
        .context("Failed to update entry")?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        Ok(Some(LedgerEntry {
            id,
            date,
            raw_amount: raw_amount.to_string(),
            description: description.to_string(),
        }))
    }

    /// Delete an entry by id. Returns false when the id doesn't exist.
    pub async fn delete_entry(&self, id: EntryId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM entries WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .context("Failed to delete entry")?;

        Ok(result.rows_affected() > 0)
    }

    /// Get an entry by id.
    pub async fn get_entry(&self, id: EntryId) -> Result<Option<LedgerEntry>> {
        let row = sqlx::query(
            r#"
            SELECT id, date, amount, description
            FROM entries
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch entry")?;

        match row {
            Some(row) => Ok(Some(Self::row_to_entry(&row)?)),
            None => Ok(None),
        }
    }

    /// List all entries, newest first.
    pub async fn list_entries(&self) -> Result<Vec<LedgerEntry>> {
        let rows = sqlx::query(
            r#"
            SELECT id, date, amount, description
            FROM entries
            ORDER BY date DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .context("Failed to list entries")?;

        rows.iter().map(Self::row_to_entry).collect()
    }

    /// Entries with a date in the inclusive [start, end] range.
    /// No ordering promise; callers sort as needed.
    pub async fn find_by_date_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<LedgerEntry>> {
        let rows = sqlx::query(
            r#"
            SELECT id, date, amount, description
            FROM entries
            WHERE date BETWEEN ? AND ?
            "#,
        )
        .bind(start.to_string())
        .bind(end.to_string())
        .fetch_all(&self.pool)
        .await
        .context("Failed to fetch entries by date range")?;

        rows.iter().map(Self::row_to_entry).collect()
    }

    /// Case-insensitive substring search over descriptions.
    pub async fn find_by_description(&self, keyword: &str) -> Result<Vec<LedgerEntry>> {
        let pattern = format!("%{}%", keyword);

        let rows = sqlx::query(
            r#"
            SELECT id, date, amount, description
            FROM entries
            WHERE LOWER(description) LIKE LOWER(?)
            "#,
        )
        .bind(&pattern)
        .fetch_all(&self.pool)
        .await
        .context("Failed to search entries by description")?;

        rows.iter().map(Self::row_to_entry).collect()
    }

    fn row_to_entry(row: &sqlx::sqlite::SqliteRow) -> Result<LedgerEntry> {
        let date_str: String = row.get("date");

        Ok(LedgerEntry {
            id: row.get("id"),
            date: NaiveDate::parse_from_str(&date_str, "%Y-%m-%d").context("Invalid entry date")?,
            raw_amount: row.get("amount"),
            description: row.get("description"),
        })
    }
}

// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use anyhow::Result;
use chrono::NaiveDate;
use dinero::application::LedgerService;
use tempfile::TempDir;

/// Helper to create a test service with a temporary database
pub async fn test_service() -> Result<(LedgerService, TempDir)> {
    let temp_dir = TempDir::new()?;
    let db_path = temp_dir.path().join("test.db");
    let service = LedgerService::init(db_path.to_str().unwrap()).await?;
    Ok((service, temp_dir))
}

/// Helper to parse a date string into NaiveDate
pub fn parse_date(date_str: &str) -> NaiveDate {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
}

/// Test fixture: a month of savings-account snapshots
pub struct SavingsEntries;

impl SavingsEntries {
    /// Four dated entries, inserted out of chronological order on purpose.
    pub async fn create(service: &LedgerService) -> Result<()> {
        service
            .add_entry(
                parse_date("2023-01-22"),
                "$130.00".into(),
                "after groceries".into(),
            )
            .await?;
        service
            .add_entry(parse_date("2023-01-01"), "$100.00".into(), "opening".into())
            .await?;
        service
            .add_entry(parse_date("2023-01-15"), "$150.00".into(), "payday".into())
            .await?;
        service
            .add_entry(
                parse_date("2023-01-29"),
                "$180.00".into(),
                "freelance gig".into(),
            )
            .await?;
        Ok(())
    }
}

mod common;

use anyhow::Result;
use common::{SavingsEntries, parse_date, test_service};
use dinero::application::AppError;

#[tokio::test]
async fn test_add_assigns_store_ids() -> Result<()> {
    let (service, _temp) = test_service().await?;

    let first = service
        .add_entry(parse_date("2023-01-01"), "$100.00".into(), "opening".into())
        .await?;
    let second = service
        .add_entry(parse_date("2023-01-02"), "$110.00".into(), "".into())
        .await?;

    assert!(first.id > 0);
    assert_ne!(first.id, second.id);
    Ok(())
}

#[tokio::test]
async fn test_list_is_newest_first() -> Result<()> {
    let (service, _temp) = test_service().await?;
    SavingsEntries::create(&service).await?;

    let entries = service.list_entries().await?;
    assert_eq!(entries.len(), 4);

    let dates: Vec<String> = entries.iter().map(|e| e.date.to_string()).collect();
    assert_eq!(
        dates,
        vec!["2023-01-29", "2023-01-22", "2023-01-15", "2023-01-01"]
    );
    Ok(())
}

#[tokio::test]
async fn test_get_and_update_entry() -> Result<()> {
    let (service, _temp) = test_service().await?;

    let entry = service
        .add_entry(parse_date("2023-01-01"), "$100.00".into(), "opening".into())
        .await?;

    let updated = service
        .update_entry(
            entry.id,
            parse_date("2023-01-02"),
            "EUR 95,50".into(),
            "corrected".into(),
        )
        .await?;
    assert_eq!(updated.id, entry.id);

    let fetched = service.get_entry(entry.id).await?;
    assert_eq!(fetched.date, parse_date("2023-01-02"));
    assert_eq!(fetched.raw_amount, "EUR 95,50");
    assert_eq!(fetched.description, "corrected");
    assert_eq!(fetched.amount_or_zero(), 95.5);
    Ok(())
}

#[tokio::test]
async fn test_update_missing_entry_is_not_found() -> Result<()> {
    let (service, _temp) = test_service().await?;

    let result = service
        .update_entry(9999, parse_date("2023-01-01"), "$1".into(), "".into())
        .await;
    assert!(matches!(result, Err(AppError::EntryNotFound(9999))));
    Ok(())
}

#[tokio::test]
async fn test_delete_entry() -> Result<()> {
    let (service, _temp) = test_service().await?;

    let entry = service
        .add_entry(parse_date("2023-01-01"), "$100.00".into(), "".into())
        .await?;

    service.delete_entry(entry.id).await?;
    assert!(matches!(
        service.get_entry(entry.id).await,
        Err(AppError::EntryNotFound(_))
    ));

    // Deleting again reports not found
    assert!(matches!(
        service.delete_entry(entry.id).await,
        Err(AppError::EntryNotFound(_))
    ));
    Ok(())
}

#[tokio::test]
async fn test_search_description_is_case_insensitive() -> Result<()> {
    let (service, _temp) = test_service().await?;
    SavingsEntries::create(&service).await?;

    let hits = service.search_description("GROCERIES").await?;
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].description, "after groceries");

    let none = service.search_description("vacation").await?;
    assert!(none.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_date_range_is_inclusive() -> Result<()> {
    let (service, _temp) = test_service().await?;
    SavingsEntries::create(&service).await?;

    let entries = service
        .entries_between(parse_date("2023-01-15"), parse_date("2023-01-22"))
        .await?;
    assert_eq!(entries.len(), 2);

    let all = service
        .entries_between(parse_date("2023-01-01"), parse_date("2023-01-31"))
        .await?;
    assert_eq!(all.len(), 4);

    let empty = service
        .entries_between(parse_date("2024-01-01"), parse_date("2024-12-31"))
        .await?;
    assert!(empty.is_empty());
    Ok(())
}

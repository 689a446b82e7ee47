use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::application::LedgerService;
use crate::domain::LedgerEntry;

/// Database snapshot for full export
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    pub version: String,
    pub exported_at: DateTime<Utc>,
    pub entries: Vec<LedgerEntry>,
}

/// Exporter for converting ledger data to various formats
pub struct Exporter<'a> {
    service: &'a LedgerService,
}

impl<'a> Exporter<'a> {
    pub fn new(service: &'a LedgerService) -> Self {
        Self { service }
    }

    /// Export entries to CSV format. Alongside the raw amount text, the
    /// parsed value and currency columns are filled in where parsing
    /// succeeds and left as 0 / blank where it doesn't.
    pub async fn export_entries_csv<W: Write>(&self, writer: W) -> Result<usize> {
        let entries = self.service.list_entries().await?;
        let mut csv_writer = csv::Writer::from_writer(writer);

        // Write header
        csv_writer.write_record(["id", "date", "amount", "value", "currency", "description"])?;

        let mut count = 0;
        for entry in &entries {
            let (value, currency) = match entry.parsed_amount() {
                Ok(parsed) => (parsed.value, parsed.currency),
                Err(_) => (0.0, String::new()),
            };

            csv_writer.write_record(&[
                entry.id.to_string(),
                entry.date.to_string(),
                entry.raw_amount.clone(),
                format!("{:.2}", value),
                currency,
                entry.description.clone(),
            ])?;
            count += 1;
        }

        csv_writer.flush()?;
        Ok(count)
    }

    /// Export all entries as a JSON snapshot
    pub async fn export_json<W: Write>(&self, mut writer: W) -> Result<LedgerSnapshot> {
        let entries = self.service.list_entries().await?;

        let snapshot = LedgerSnapshot {
            version: env!("CARGO_PKG_VERSION").to_string(),
            exported_at: Utc::now(),
            entries,
        };

        let json = serde_json::to_string_pretty(&snapshot)?;
        writer.write_all(json.as_bytes())?;
        writer.flush()?;

        Ok(snapshot)
    }
}

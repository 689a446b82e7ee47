use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};

use crate::application::LedgerService;
use crate::domain::{DifferenceOrder, EntryId, LedgerEntry};

/// Dinero - Personal Money Ledger
#[derive(Parser)]
#[command(name = "dinero")]
#[command(about = "A small personal money ledger with date-range analytics")]
#[command(version)]
pub struct Cli {
    /// Database file path
    #[arg(short, long, default_value = "dinero.db")]
    pub database: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new database
    Init,

    /// Record a new entry
    Add {
        /// Amount as free text (e.g., "$123.45", "USD 123.45", "€99,99")
        amount: String,

        /// Description of the entry
        #[arg(short = 'm', long, default_value = "")]
        description: String,

        /// Date of the entry (ISO 8601 format: YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<String>,
    },

    /// Edit an existing entry
    Edit {
        /// Entry id
        id: EntryId,

        /// New amount text
        #[arg(short, long)]
        amount: Option<String>,

        /// New description
        #[arg(short = 'm', long)]
        description: Option<String>,

        /// New date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<String>,
    },

    /// Delete an entry
    Delete {
        /// Entry id
        id: EntryId,
    },

    /// Show a single entry with its parsed amount
    Show {
        /// Entry id
        id: EntryId,
    },

    /// List all entries, newest first
    List,

    /// Search entries by description (case-insensitive)
    Search {
        /// Keyword to look for
        keyword: String,
    },

    /// List entries within a date range
    Range {
        /// Start date (YYYY-MM-DD)
        from: String,

        /// End date (YYYY-MM-DD)
        to: String,
    },

    /// Sum all amounts within a date range
    Sum {
        /// Start date (YYYY-MM-DD)
        from: String,

        /// End date (YYYY-MM-DD)
        to: String,
    },

    /// Differences between consecutive entries within a date range
    Differences {
        /// Start date (YYYY-MM-DD)
        from: String,

        /// End date (YYYY-MM-DD)
        to: String,

        /// Sort order: from-date, difference, to-amount, percentage
        #[arg(long, default_value = "from-date")]
        sort: String,

        /// Output format: table, json
        #[arg(long, default_value = "table")]
        format: String,
    },

    /// Difference between the earliest and latest entry in a date range
    Total {
        /// Start date (YYYY-MM-DD)
        from: String,

        /// End date (YYYY-MM-DD)
        to: String,

        /// Output format: table, json
        #[arg(long, default_value = "table")]
        format: String,
    },

    /// Export entries to CSV or JSON
    Export {
        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,

        /// Format: csv, json (default: csv)
        #[arg(short, long, default_value = "csv")]
        format: String,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Commands::Init => {
                LedgerService::init(&self.database).await?;
                println!("Database initialized: {}", self.database);
            }

            Commands::Add {
                amount,
                description,
                date,
            } => {
                let service = LedgerService::connect(&self.database).await?;
                let date = match date {
                    Some(date_str) => parse_date(&date_str)?,
                    None => Utc::now().date_naive(),
                };

                let entry = service.add_entry(date, amount, description).await?;
                println!("Recorded entry #{}: {} {}", entry.id, entry.date, entry.raw_amount);
                if entry.parsed_amount().is_err() {
                    eprintln!(
                        "Warning: amount '{}' doesn't parse; it will count as zero in totals",
                        entry.raw_amount
                    );
                }
            }

            Commands::Edit {
                id,
                amount,
                description,
                date,
            } => {
                let service = LedgerService::connect(&self.database).await?;
                let existing = service.get_entry(id).await?;

                let date = match date {
                    Some(date_str) => parse_date(&date_str)?,
                    None => existing.date,
                };
                let amount = amount.unwrap_or(existing.raw_amount);
                let description = description.unwrap_or(existing.description);

                let entry = service.update_entry(id, date, amount, description).await?;
                println!("Updated entry #{}: {} {}", entry.id, entry.date, entry.raw_amount);
            }

            Commands::Delete { id } => {
                let service = LedgerService::connect(&self.database).await?;
                service.delete_entry(id).await?;
                println!("Deleted entry #{}", id);
            }

            Commands::Show { id } => {
                let service = LedgerService::connect(&self.database).await?;
                let entry = service.get_entry(id).await?;
                print_entry_detail(&entry);
            }

            Commands::List => {
                let service = LedgerService::connect(&self.database).await?;
                let entries = service.list_entries().await?;
                print_entries(&entries);
            }

            Commands::Search { keyword } => {
                let service = LedgerService::connect(&self.database).await?;
                let entries = service.search_description(&keyword).await?;
                print_entries(&entries);
            }

            Commands::Range { from, to } => {
                let service = LedgerService::connect(&self.database).await?;
                let (start, end) = parse_range(&from, &to)?;
                let entries = service.entries_between(start, end).await?;
                print_entries(&entries);
            }

            Commands::Sum { from, to } => {
                let service = LedgerService::connect(&self.database).await?;
                let (start, end) = parse_range(&from, &to)?;
                let total = service.sum_between(start, end).await?;
                println!("Total for {} to {}: {:.2}", start, end, total);
            }

            Commands::Differences {
                from,
                to,
                sort,
                format,
            } => {
                let service = LedgerService::connect(&self.database).await?;
                let (start, end) = parse_range(&from, &to)?;
                let order: DifferenceOrder = sort.parse().map_err(|e: String| {
                    anyhow::anyhow!(
                        "{}. Valid orders: from-date, difference, to-amount, percentage",
                        e
                    )
                })?;

                let differences = service.consecutive_differences(start, end, order).await?;

                match format.as_str() {
                    "json" => println!("{}", serde_json::to_string_pretty(&differences)?),
                    _ => {
                        if differences.is_empty() {
                            println!("Not enough entries in range to compute differences.");
                        } else {
                            println!(
                                "{:<12} {:<12} {:>12} {:>12} {:>12} {:>10}  ",
                                "FROM", "TO", "FROM_AMT", "TO_AMT", "DIFF", "PCT"
                            );
                            println!("{}", "-".repeat(76));
                            for diff in &differences {
                                println!(
                                    "{:<12} {:<12} {:>12.2} {:>12.2} {:>12.2} {:>9.2}% {}",
                                    diff.from_date.to_string(),
                                    diff.to_date.to_string(),
                                    diff.from_amount,
                                    diff.to_amount,
                                    diff.difference,
                                    diff.percentage_change,
                                    direction_marker(diff.is_gain(), diff.is_loss()),
                                );
                            }
                        }
                    }
                }
            }

            Commands::Total { from, to, format } => {
                let service = LedgerService::connect(&self.database).await?;
                let (start, end) = parse_range(&from, &to)?;
                let diff = service.total_difference(start, end).await?;

                match format.as_str() {
                    "json" => println!("{}", serde_json::to_string_pretty(&diff)?),
                    _ => println!("{}", diff),
                }
            }

            Commands::Export { output, format } => {
                let service = LedgerService::connect(&self.database).await?;
                run_export_command(&service, output.as_deref(), &format).await?;
            }
        }

        Ok(())
    }
}

async fn run_export_command(
    service: &LedgerService,
    output: Option<&str>,
    format: &str,
) -> Result<()> {
    use crate::io::Exporter;
    use std::fs::File;
    use std::io::{Write, stdout};

    let exporter = Exporter::new(service);

    // Determine output writer
    let writer: Box<dyn Write> = match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path))?;
            Box::new(file)
        }
        None => Box::new(stdout()),
    };

    match format {
        "json" => {
            let snapshot = exporter.export_json(writer).await?;
            eprintln!("Exported {} entries", snapshot.entries.len());
        }
        "csv" => {
            let count = exporter.export_entries_csv(writer).await?;
            eprintln!("Exported {} entries", count);
        }
        other => anyhow::bail!("Unknown export format '{}'. Use csv or json", other),
    }

    Ok(())
}

fn print_entries(entries: &[LedgerEntry]) {
    if entries.is_empty() {
        println!("No entries found.");
        return;
    }

    println!(
        "{:<6} {:<12} {:<16} {}",
        "ID", "DATE", "AMOUNT", "DESCRIPTION"
    );
    println!("{}", "-".repeat(60));
    for entry in entries {
        println!(
            "{:<6} {:<12} {:<16} {}",
            entry.id,
            entry.date.to_string(),
            entry.raw_amount,
            entry.description
        );
    }
}

fn print_entry_detail(entry: &LedgerEntry) {
    println!("Entry #{}", entry.id);
    println!("  Date:        {}", entry.date);
    println!("  Amount:      {}", entry.raw_amount);
    match entry.parsed_amount() {
        Ok(parsed) => {
            println!("  Parsed:      {:.2}", parsed.value);
            println!("  Currency:    {}", parsed.currency);
        }
        Err(e) => println!("  Parsed:      (unparseable: {})", e),
    }
    println!("  Description: {}", entry.description);
}

fn direction_marker(gain: bool, loss: bool) -> &'static str {
    if gain {
        "gain"
    } else if loss {
        "loss"
    } else {
        "flat"
    }
}

/// Parse an ISO 8601 date argument.
fn parse_date(date_str: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
        .with_context(|| format!("Invalid date format '{}'. Use YYYY-MM-DD", date_str))
}

fn parse_range(from: &str, to: &str) -> Result<(NaiveDate, NaiveDate)> {
    let start = parse_date(from)?;
    let end = parse_date(to)?;
    if end < start {
        eprintln!("Warning: end date {} is before start date {}", end, start);
    }
    Ok((start, end))
}

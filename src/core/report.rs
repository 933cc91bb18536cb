//! Transaction reports for export.
//!
//! A report covers its own date range, independent of the list filter, and
//! reuses the conversion and totals from `analytics`.
use crate::core::analytics::{self, Totals};
use crate::core::currency::{Currency, CurrencyConverter};
use crate::core::filter::{Filter, TypeFilter};
use crate::core::transaction::Transaction;
use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::Serialize;
use std::fmt::Display;
use std::io::Write;
use std::str::FromStr;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Csv,
    Json,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

impl Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            _ => Err(anyhow::anyhow!("Invalid export format: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportOptions {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub include_summary: bool,
    pub include_categories: bool,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            start_date: None,
            end_date: None,
            include_summary: true,
            include_categories: true,
        }
    }
}

impl ReportOptions {
    /// Default file name, e.g. `transactions_2024-01-01_2024-01-31.csv`.
    pub fn file_name(&self, format: ExportFormat) -> String {
        let bound = |d: Option<NaiveDate>| d.map_or("all".to_string(), |d| d.to_string());
        format!(
            "transactions_{}_{}.{}",
            bound(self.start_date),
            bound(self.end_date),
            format.extension()
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    pub date: NaiveDate,
    pub description: String,
    pub category: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub amount: f64,
    pub original_amount: f64,
    pub original_currency: Currency,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReportSummary {
    pub total_income: f64,
    pub total_expenses: f64,
    pub net_balance: f64,
    pub transaction_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    pub category: String,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub currency: Currency,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub rows: Vec<ReportRow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<ReportSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<CategoryTotal>>,
}

/// Builds a report over `transactions` within the options' date range,
/// sorted by date, with amounts in `currency`.
pub fn build_report(
    transactions: &[Transaction],
    options: &ReportOptions,
    converter: &CurrencyConverter,
    currency: Currency,
) -> Report {
    let range = Filter {
        start_date: options.start_date,
        end_date: options.end_date,
        kind: TypeFilter::All,
    };
    let mut selected: Vec<Transaction> = transactions
        .iter()
        .filter(|t| range.matches(t))
        .cloned()
        .collect();
    // Stable sort keeps insertion order within a day.
    selected.sort_by_key(|t| t.date);
    debug!(
        "Report selected {} of {} transactions",
        selected.len(),
        transactions.len()
    );

    let rows = selected
        .iter()
        .map(|t| ReportRow {
            date: t.date,
            description: t.description.clone(),
            category: t.category.clone(),
            kind: t.kind.label().to_string(),
            amount: converter.convert(t.amount, t.currency, currency),
            original_amount: t.amount,
            original_currency: t.currency,
        })
        .collect();

    let summary = options.include_summary.then(|| {
        let Totals {
            income,
            expense,
            balance,
        } = analytics::totals(&selected, converter, currency);
        ReportSummary {
            total_income: income,
            total_expenses: expense,
            net_balance: balance,
            transaction_count: selected.len(),
        }
    });

    let categories = options.include_categories.then(|| {
        analytics::expenses_by_category(&selected, converter, currency)
            .into_iter()
            .map(|(category, amount)| CategoryTotal { category, amount })
            .collect::<Vec<_>>()
    });

    Report {
        currency,
        start_date: options.start_date,
        end_date: options.end_date,
        rows,
        summary,
        categories,
    }
}

impl Report {
    /// Writes the transaction rows as CSV, followed by the summary and
    /// category sections when present. Each section starts after an empty
    /// record.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut csv = csv::WriterBuilder::new()
            .flexible(true)
            .from_writer(writer);

        let amount_header = format!("Amount ({})", self.currency);
        csv.write_record([
            "Date",
            "Description",
            "Category",
            "Type",
            amount_header.as_str(),
            "Original Amount",
            "Original Currency",
        ])?;
        for row in &self.rows {
            csv.write_record([
                row.date.to_string(),
                row.description.clone(),
                row.category.clone(),
                row.kind.clone(),
                format_number(row.amount, self.currency),
                row.original_amount.to_string(),
                row.original_currency.to_string(),
            ])?;
        }

        if let Some(summary) = &self.summary {
            csv.write_record([""])?;
            csv.write_record(["Metric", "Value"])?;
            let metrics = [
                ("Total Income", format_number(summary.total_income, self.currency)),
                ("Total Expenses", format_number(summary.total_expenses, self.currency)),
                ("Net Balance", format_number(summary.net_balance, self.currency)),
                ("Total Transactions", summary.transaction_count.to_string()),
            ];
            for (metric, value) in &metrics {
                csv.write_record([*metric, value.as_str()])?;
            }
        }

        if let Some(categories) = self.categories.as_ref().filter(|c| !c.is_empty()) {
            csv.write_record([""])?;
            csv.write_record(["Category", "Amount"])?;
            for category in categories {
                let amount = format_number(category.amount, self.currency);
                csv.write_record([category.category.as_str(), amount.as_str()])?;
            }
        }

        csv.flush().context("Failed to flush CSV report")?;
        Ok(())
    }

    pub fn write_json<W: Write>(&self, writer: W) -> Result<()> {
        serde_json::to_writer_pretty(writer, self).context("Failed to write JSON report")
    }

    pub fn write<W: Write>(&self, format: ExportFormat, writer: W) -> Result<()> {
        match format {
            ExportFormat::Csv => self.write_csv(writer),
            ExportFormat::Json => self.write_json(writer),
        }
    }
}

// Plain numbers for machine-readable output, at the currency's precision.
fn format_number(amount: f64, currency: Currency) -> String {
    match currency {
        Currency::Usd => format!("{amount:.2}"),
        Currency::Vnd => format!("{amount:.0}"),
    }
}

use crate::core::currency::{Currency, CurrencyConverter};
use crate::core::report::{ExportFormat, ReportOptions, build_report};
use crate::core::transaction::Transaction;
use anyhow::{Context, Result};
use chrono::{Datelike, Months, NaiveDate};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Clone)]
pub struct ExportRequest {
    pub format: ExportFormat,
    pub options: ReportOptions,
    pub output: Option<PathBuf>,
}

/// First and last day of the month containing `today`.
pub fn current_month(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let first = today.with_day(1).unwrap_or(today);
    let last = first
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(today);
    (first, last)
}

/// Writes a report over `transactions` and returns the path written.
///
/// With no output path the default file name is used in `dir`.
pub fn run(
    transactions: &[Transaction],
    request: &ExportRequest,
    converter: &CurrencyConverter,
    currency: Currency,
    dir: &Path,
) -> Result<(PathBuf, usize)> {
    let report = build_report(transactions, &request.options, converter, currency);
    if report.rows.is_empty() {
        anyhow::bail!("No transactions in the selected date range to export");
    }

    let path = request
        .output
        .clone()
        .unwrap_or_else(|| dir.join(request.options.file_name(request.format)));
    let file = File::create(&path)
        .with_context(|| format!("Failed to create export file: {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    report
        .write(request.format, &mut writer)
        .with_context(|| format!("Failed to write export file: {}", path.display()))?;
    writer
        .flush()
        .with_context(|| format!("Failed to write export file: {}", path.display()))?;

    info!(
        "Exported {} transactions to {}",
        report.rows.len(),
        path.display()
    );
    Ok((path, report.rows.len()))
}

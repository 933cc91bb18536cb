use super::ui;
use crate::core::analytics::ChartData;
use crate::core::currency::format_amount;
use comfy_table::Cell;

const BAR_WIDTH: usize = 24;

// Horizontal bar scaled against the largest absolute running balance.
fn balance_bar(balance: f64, max_abs: f64) -> String {
    if max_abs <= 0.0 {
        return String::new();
    }
    let len = ((balance.abs() / max_abs) * BAR_WIDTH as f64).round() as usize;
    let bar = "█".repeat(len.max(1));
    if balance >= 0.0 {
        ui::style_text(&bar, ui::StyleType::Positive)
    } else {
        ui::style_text(&bar, ui::StyleType::Negative)
    }
}

impl ChartData {
    /// Renders the per-day series with its running balance and a summary.
    pub fn display_as_table(&self) -> String {
        if !self.has_data() {
            return format!(
                "No data to display\n{}",
                ui::style_text(
                    "Add some transactions to see the chart",
                    ui::StyleType::Subtle
                )
            );
        }

        let currency = self.currency;
        let max_abs = self
            .points
            .iter()
            .map(|p| p.balance.abs())
            .fold(0.0, f64::max);

        let mut table = ui::new_styled_table();
        table.set_header(vec![
            ui::header_cell("Date"),
            ui::header_cell(&format!("Income ({currency})")),
            ui::header_cell(&format!("Expense ({currency})")),
            ui::header_cell("Balance"),
            ui::header_cell("Trend"),
        ]);
        for point in &self.points {
            table.add_row(vec![
                Cell::new(&point.formatted_date),
                ui::amount_cell(point.income, currency),
                ui::amount_cell(point.expense, currency),
                ui::signed_amount_cell(point.balance, currency),
                Cell::new(balance_bar(point.balance, max_abs)),
            ]);
        }

        let summary = &self.summary;
        let mut output = table.to_string();
        output.push_str(&format!(
            "\n\n{} {}   {} {}   {} {}   {} {}",
            ui::style_text("Income:", ui::StyleType::TotalLabel),
            format_amount(summary.total_income, currency),
            ui::style_text("Expenses:", ui::StyleType::TotalLabel),
            format_amount(summary.total_expense, currency),
            ui::style_text("Net:", ui::StyleType::TotalLabel),
            ui::style_amount(summary.net_balance, currency),
            ui::style_text("Transactions:", ui::StyleType::TotalLabel),
            summary.transaction_count
        ));
        output
    }
}

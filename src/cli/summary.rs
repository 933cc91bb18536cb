use super::ui;
use crate::core::analytics::{self, Totals};
use crate::core::currency::{Currency, CurrencyConverter};
use crate::core::transaction::Transaction;

impl Totals {
    /// Renders the dashboard: balance, income and expenses.
    pub fn display_as_table(&self, currency: Currency, count: usize) -> String {
        let mut table = ui::new_styled_table();
        table.set_header(vec![
            ui::header_cell("Current Balance"),
            ui::header_cell("Total Income"),
            ui::header_cell("Total Expenses"),
        ]);
        table.add_row(vec![
            ui::signed_amount_cell(self.balance, currency),
            ui::amount_cell(self.income, currency),
            ui::amount_cell(self.expense, currency),
        ]);

        let mut output = format!(
            "{}\n\n",
            ui::style_text(&format!("Dashboard ({currency})"), ui::StyleType::Title)
        );
        output.push_str(&table.to_string());
        output.push_str(&format!(
            "\n\n{} {}",
            ui::style_text("Transactions:", ui::StyleType::TotalLabel),
            count
        ));
        output
    }
}

/// Dashboard totals over every stored transaction, regardless of filters.
pub fn render(
    transactions: &[Transaction],
    converter: &CurrencyConverter,
    currency: Currency,
) -> String {
    analytics::totals(transactions, converter, currency)
        .display_as_table(currency, transactions.len())
}

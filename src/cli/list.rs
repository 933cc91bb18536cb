use super::ui;
use crate::core::currency::{Currency, CurrencyConverter};
use crate::core::filter::{Filter, TypeFilter};
use crate::core::transaction::Transaction;
use comfy_table::{Cell, CellAlignment, Color};

fn describe_filter(filter: &Filter) -> String {
    let mut parts = Vec::new();
    if filter.kind != TypeFilter::All {
        parts.push(format!("type: {}", filter.kind));
    }
    if let Some(start) = filter.start_date {
        parts.push(format!("from: {start}"));
    }
    if let Some(end) = filter.end_date {
        parts.push(format!("to: {end}"));
    }
    parts.join(", ")
}

/// Renders the filtered transactions as a table, amounts in `currency`.
///
/// Amounts recorded in another currency also show the original value.
pub fn render(
    transactions: &[Transaction],
    filter: &Filter,
    converter: &CurrencyConverter,
    currency: Currency,
) -> String {
    let mut output = String::new();
    if filter.is_active() {
        output.push_str(&ui::style_text(
            &format!("Filter ({})", describe_filter(filter)),
            ui::StyleType::Subtle,
        ));
        output.push_str("\n\n");
    }

    if transactions.is_empty() {
        output.push_str("No transactions found");
        return output;
    }

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("ID"),
        ui::header_cell("Date"),
        ui::header_cell("Description"),
        ui::header_cell("Category"),
        ui::header_cell(&format!("Amount ({currency})")),
    ]);

    for transaction in transactions {
        let converted = converter.convert(transaction.amount, transaction.currency, currency);
        let signed = if transaction.is_income() {
            converted
        } else {
            -converted
        };

        let mut amount = ui::signed_amount_cell(signed, currency);
        if transaction.currency != currency {
            amount = Cell::new(format!(
                "{}\n{}",
                converter.format(signed, currency),
                converter.format(transaction.amount, transaction.currency)
            ))
            .fg(if signed >= 0.0 { Color::Green } else { Color::Red })
            .set_alignment(CellAlignment::Right);
        }

        table.add_row(vec![
            Cell::new(&transaction.id).fg(Color::DarkGrey),
            Cell::new(transaction.date.to_string()),
            Cell::new(&transaction.description),
            Cell::new(&transaction.category),
            amount,
        ]);
    }

    output.push_str(&table.to_string());
    output.push_str(&format!("\n\n{} transaction(s)", transactions.len()));
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::transaction::TransactionType;
    use chrono::NaiveDate;

    fn tx(id: &str, amount: f64, kind: TransactionType, currency: Currency) -> Transaction {
        Transaction {
            id: id.to_string(),
            amount,
            description: format!("Transaction {id}"),
            kind,
            category: "Other".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            currency,
        }
    }

    #[test]
    fn test_render_empty() {
        let output = render(
            &[],
            &Filter::default(),
            &CurrencyConverter::default(),
            Currency::Usd,
        );
        assert_eq!(output, "No transactions found");
    }

    #[test]
    fn test_render_rows_and_original_amounts() {
        let transactions = vec![
            tx("1", 100.0, TransactionType::Income, Currency::Usd),
            tx("2", 259_540.0, TransactionType::Expense, Currency::Vnd),
        ];
        let filter = Filter {
            kind: TypeFilter::All,
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1),
            end_date: None,
        };
        let output = render(
            &transactions,
            &filter,
            &CurrencyConverter::default(),
            Currency::Usd,
        );

        assert!(output.contains("from: 2024-01-01"));
        assert!(output.contains("Transaction 1"));
        assert!(output.contains("$100.00"));
        assert!(output.contains("-$10.00"));
        assert!(output.contains("259.540\u{a0}₫"));
        assert!(output.contains("2 transaction(s)"));
    }
}

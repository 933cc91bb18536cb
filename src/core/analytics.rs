//! Derivations over a transaction list: dashboard totals, the per-day chart
//! series with its running balance, and expense totals by category.
//!
//! Every amount is converted into a single display currency first.
use crate::core::currency::{Currency, CurrencyConverter};
use crate::core::transaction::{Transaction, TransactionType};
use chrono::NaiveDate;
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

/// Income and expense totals for a set of transactions.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Totals {
    pub income: f64,
    pub expense: f64,
    pub balance: f64,
}

/// One day of the chart series.
///
/// `balance` is cumulative: the net of every day up to and including `date`.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartPoint {
    pub date: NaiveDate,
    pub income: f64,
    pub expense: f64,
    pub balance: f64,
    pub formatted_date: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ChartSummary {
    pub total_income: f64,
    pub total_expense: f64,
    pub net_balance: f64,
    pub transaction_count: usize,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChartData {
    pub points: Vec<ChartPoint>,
    pub summary: ChartSummary,
    pub currency: Currency,
}

impl ChartData {
    /// An empty series means "nothing to plot", not an error.
    pub fn has_data(&self) -> bool {
        !self.points.is_empty()
    }
}

fn converted(transaction: &Transaction, converter: &CurrencyConverter, target: Currency) -> f64 {
    converter.convert(transaction.amount, transaction.currency, target)
}

/// Sums income and expense in `target` currency.
pub fn totals(
    transactions: &[Transaction],
    converter: &CurrencyConverter,
    target: Currency,
) -> Totals {
    let (income, expense) = transactions
        .iter()
        .fold((0.0, 0.0), |(income, expense), t| match t.kind {
            TransactionType::Income => (income + converted(t, converter, target), expense),
            TransactionType::Expense => (income, expense + converted(t, converter, target)),
        });
    Totals {
        income,
        expense,
        balance: income - expense,
    }
}

/// Builds the per-day chart series and its summary.
///
/// Transactions are grouped by date; each day gets its converted income and
/// expense. Days are sorted ascending and each point's `balance` holds the
/// running net up to that day.
pub fn chart_data(
    transactions: &[Transaction],
    converter: &CurrencyConverter,
    target: Currency,
) -> ChartData {
    let mut days: BTreeMap<NaiveDate, (f64, f64)> = BTreeMap::new();
    for transaction in transactions {
        let amount = converted(transaction, converter, target);
        let day = days.entry(transaction.date).or_insert((0.0, 0.0));
        match transaction.kind {
            TransactionType::Income => day.0 += amount,
            TransactionType::Expense => day.1 += amount,
        }
    }

    let mut running_balance = 0.0;
    let points: Vec<ChartPoint> = days
        .into_iter()
        .map(|(date, (income, expense))| {
            running_balance += income - expense;
            ChartPoint {
                date,
                income,
                expense,
                balance: running_balance,
                formatted_date: date.format("%b %-d").to_string(),
            }
        })
        .collect();

    let total_income: f64 = points.iter().map(|p| p.income).sum();
    let total_expense: f64 = points.iter().map(|p| p.expense).sum();
    debug!(
        "Chart series for {} transactions has {} points",
        transactions.len(),
        points.len()
    );

    ChartData {
        points,
        summary: ChartSummary {
            total_income,
            total_expense,
            net_balance: total_income - total_expense,
            transaction_count: transactions.len(),
        },
        currency: target,
    }
}

/// Expense totals per category, largest first. Ties keep alphabetical order.
pub fn expenses_by_category(
    transactions: &[Transaction],
    converter: &CurrencyConverter,
    target: Currency,
) -> Vec<(String, f64)> {
    let mut categories: HashMap<&str, f64> = HashMap::new();
    for transaction in transactions.iter().filter(|t| t.is_expense()) {
        *categories.entry(transaction.category.as_str()).or_insert(0.0) +=
            converted(transaction, converter, target);
    }

    let mut sorted: Vec<(String, f64)> = categories
        .into_iter()
        .map(|(category, amount)| (category.to_string(), amount))
        .collect();
    sorted.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    sorted
}

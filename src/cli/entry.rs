//! Add, edit and delete commands. Input is validated here before it reaches
//! the state.

use crate::core::currency::Currency;
use crate::core::state::TransactionsState;
use crate::core::transaction::{
    Transaction, TransactionInput, TransactionType, categories_for,
};
use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use tracing::{debug, warn};

/// Fields for a new transaction. `date` defaults to today and `currency` to
/// the display currency.
#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub description: String,
    pub amount: f64,
    pub kind: TransactionType,
    pub category: String,
    pub date: Option<NaiveDate>,
    pub currency: Option<Currency>,
}

/// Fields to change on an existing transaction. The recording currency is
/// fixed at creation and cannot be changed.
#[derive(Debug, Clone, Default)]
pub struct TransactionChanges {
    pub description: Option<String>,
    pub amount: Option<f64>,
    pub kind: Option<TransactionType>,
    pub category: Option<String>,
    pub date: Option<NaiveDate>,
}

impl TransactionChanges {
    pub fn is_empty(&self) -> bool {
        self.description.is_none()
            && self.amount.is_none()
            && self.kind.is_none()
            && self.category.is_none()
            && self.date.is_none()
    }
}

fn warn_unknown_category(transaction: &Transaction) {
    if !categories_for(transaction.kind).contains(&transaction.category.as_str()) {
        warn!(
            "Category '{}' is not one of the usual {} categories: {}",
            transaction.category,
            transaction.kind,
            categories_for(transaction.kind).join(", ")
        );
    }
}

pub fn add(
    state: &mut TransactionsState,
    new: NewTransaction,
    display_currency: Currency,
    today: NaiveDate,
) -> Result<Transaction> {
    let input = TransactionInput {
        description: new.description,
        amount: new.amount,
        kind: new.kind,
        category: new.category,
        date: new.date.unwrap_or(today),
        currency: new.currency.unwrap_or(display_currency),
    };
    let transaction = input
        .validate(state.next_id(), today)
        .context("Invalid transaction")?;
    warn_unknown_category(&transaction);

    state.add(transaction.clone());
    debug!("Added transaction {}", transaction.id);
    Ok(transaction)
}

pub fn edit(
    state: &mut TransactionsState,
    id: &str,
    changes: TransactionChanges,
    today: NaiveDate,
) -> Result<Transaction> {
    let Some(existing) = state.get(id) else {
        bail!("No transaction with id {id}");
    };
    if changes.is_empty() {
        bail!("Nothing to change for transaction {id}");
    }

    let mut input = TransactionInput::from_transaction(existing);
    if let Some(description) = changes.description {
        input.description = description;
    }
    if let Some(amount) = changes.amount {
        input.amount = amount;
    }
    if let Some(kind) = changes.kind {
        input.kind = kind;
    }
    if let Some(category) = changes.category {
        input.category = category;
    }
    if let Some(date) = changes.date {
        input.date = date;
    }

    let transaction = input
        .validate(id.to_string(), today)
        .context("Invalid transaction")?;
    warn_unknown_category(&transaction);

    if !state.edit(transaction.clone()) {
        bail!("No transaction with id {id}");
    }
    Ok(transaction)
}

pub fn delete(state: &mut TransactionsState, id: &str) -> Result<()> {
    if !state.delete(id) {
        bail!("No transaction with id {id}");
    }
    Ok(())
}

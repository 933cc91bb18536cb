//! Transaction records and the input checks applied before they reach the state.

use crate::core::currency::Currency;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

pub const MIN_DESCRIPTION_LEN: usize = 3;
pub const MAX_DESCRIPTION_LEN: usize = 100;
pub const MIN_AMOUNT: f64 = 0.01;

pub const INCOME_CATEGORIES: &[&str] = &["Salary", "Freelance", "Gift", "Other"];
pub const EXPENSE_CATEGORIES: &[&str] = &[
    "Food",
    "Housing",
    "Transportation",
    "Entertainment",
    "Healthcare",
    "Shopping",
    "Other",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                TransactionType::Income => "income",
                TransactionType::Expense => "expense",
            }
        )
    }
}

impl FromStr for TransactionType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "income" => Ok(TransactionType::Income),
            "expense" => Ok(TransactionType::Expense),
            _ => Err(anyhow::anyhow!("Invalid transaction type: {}", s)),
        }
    }
}

impl TransactionType {
    /// Capitalized label used in tables and reports.
    pub fn label(&self) -> &'static str {
        match self {
            TransactionType::Income => "Income",
            TransactionType::Expense => "Expense",
        }
    }
}

/// Returns the suggested category vocabulary for a transaction type.
pub fn categories_for(kind: TransactionType) -> &'static [&'static str] {
    match kind {
        TransactionType::Income => INCOME_CATEGORIES,
        TransactionType::Expense => EXPENSE_CATEGORIES,
    }
}

/// A single recorded income or expense event.
///
/// `amount` is always a positive magnitude; the sign comes from `kind`.
/// `currency` is the currency the amount was recorded in and is never
/// rewritten when the display currency changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub amount: f64,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub category: String,
    pub date: NaiveDate,
    pub currency: Currency,
}

impl Transaction {
    pub fn is_income(&self) -> bool {
        self.kind == TransactionType::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionType::Expense
    }
}

/// Reasons a `TransactionInput` is rejected.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("Description must be at least {} characters", MIN_DESCRIPTION_LEN)]
    DescriptionTooShort,

    #[error("Description must be at most {} characters", MAX_DESCRIPTION_LEN)]
    DescriptionTooLong,

    #[error("Amount must be positive")]
    AmountNotPositive,

    #[error("Amount must be at least {}", MIN_AMOUNT)]
    AmountTooSmall,

    #[error("Category is required")]
    EmptyCategory,

    /// Transactions record events that already happened.
    #[error("Date cannot be in the future: {0}")]
    FutureDate(NaiveDate),
}

/// Unvalidated transaction fields as entered by the user.
#[derive(Debug, Clone)]
pub struct TransactionInput {
    pub description: String,
    pub amount: f64,
    pub kind: TransactionType,
    pub category: String,
    pub date: NaiveDate,
    pub currency: Currency,
}

impl TransactionInput {
    /// Copies the editable fields of an existing transaction.
    pub fn from_transaction(transaction: &Transaction) -> Self {
        Self {
            description: transaction.description.clone(),
            amount: transaction.amount,
            kind: transaction.kind,
            category: transaction.category.clone(),
            date: transaction.date,
            currency: transaction.currency,
        }
    }

    /// Checks the fields and builds a `Transaction` carrying `id`.
    ///
    /// Dates after `today` are rejected. The category is only required to be
    /// non-empty; `categories_for` lists the suggested values.
    pub fn validate(self, id: String, today: NaiveDate) -> Result<Transaction, ValidationError> {
        let description = self.description.trim().to_string();
        let len = description.chars().count();
        if len < MIN_DESCRIPTION_LEN {
            return Err(ValidationError::DescriptionTooShort);
        }
        if len > MAX_DESCRIPTION_LEN {
            return Err(ValidationError::DescriptionTooLong);
        }
        if !self.amount.is_finite() || self.amount <= 0.0 {
            return Err(ValidationError::AmountNotPositive);
        }
        if self.amount < MIN_AMOUNT {
            return Err(ValidationError::AmountTooSmall);
        }
        let category = self.category.trim().to_string();
        if category.is_empty() {
            return Err(ValidationError::EmptyCategory);
        }
        if self.date > today {
            return Err(ValidationError::FutureDate(self.date));
        }

        Ok(Transaction {
            id,
            amount: self.amount,
            description,
            kind: self.kind,
            category,
            date: self.date,
            currency: self.currency,
        })
    }
}

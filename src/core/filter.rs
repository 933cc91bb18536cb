//! Transaction filter and the predicate that applies it.

use crate::core::transaction::{Transaction, TransactionType};
use chrono::NaiveDate;
use std::fmt::Display;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TypeFilter {
    #[default]
    All,
    Income,
    Expense,
}

impl TypeFilter {
    fn accepts(&self, kind: TransactionType) -> bool {
        match self {
            TypeFilter::All => true,
            TypeFilter::Income => kind == TransactionType::Income,
            TypeFilter::Expense => kind == TransactionType::Expense,
        }
    }
}

impl From<TransactionType> for TypeFilter {
    fn from(kind: TransactionType) -> Self {
        match kind {
            TransactionType::Income => TypeFilter::Income,
            TransactionType::Expense => TypeFilter::Expense,
        }
    }
}

impl Display for TypeFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                TypeFilter::All => "all",
                TypeFilter::Income => "income",
                TypeFilter::Expense => "expense",
            }
        )
    }
}

impl FromStr for TypeFilter {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" => Ok(TypeFilter::All),
            other => other.parse::<TransactionType>().map(TypeFilter::from),
        }
    }
}

/// Date range and type narrowing the displayed transactions.
///
/// Both bounds are inclusive; a transaction dated on `end_date` is kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Filter {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub kind: TypeFilter,
}

/// A partial filter change. `None` keeps the current value; `Some(None)`
/// clears a date bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FilterUpdate {
    pub start_date: Option<Option<NaiveDate>>,
    pub end_date: Option<Option<NaiveDate>>,
    pub kind: Option<TypeFilter>,
}

impl FilterUpdate {
    pub fn kind(kind: TypeFilter) -> Self {
        Self {
            kind: Some(kind),
            ..Self::default()
        }
    }

    pub fn range(start_date: Option<NaiveDate>, end_date: Option<NaiveDate>) -> Self {
        Self {
            start_date: Some(start_date),
            end_date: Some(end_date),
            kind: None,
        }
    }
}

impl Filter {
    pub fn is_active(&self) -> bool {
        self.start_date.is_some() || self.end_date.is_some() || self.kind != TypeFilter::All
    }

    /// Returns a copy with the fields present in `update` replaced.
    pub fn merged(&self, update: FilterUpdate) -> Self {
        Self {
            start_date: update.start_date.unwrap_or(self.start_date),
            end_date: update.end_date.unwrap_or(self.end_date),
            kind: update.kind.unwrap_or(self.kind),
        }
    }

    pub fn matches(&self, transaction: &Transaction) -> bool {
        if !self.kind.accepts(transaction.kind) {
            return false;
        }
        if let Some(start) = self.start_date {
            if transaction.date < start {
                return false;
            }
        }
        // Dates carry no time of day, so "after the end of end_date" is a
        // plain date comparison.
        if let Some(end) = self.end_date {
            if transaction.date > end {
                return false;
            }
        }
        true
    }
}

/// Keeps the transactions matching `filter`, preserving their order.
pub fn apply_filter(transactions: &[Transaction], filter: &Filter) -> Vec<Transaction> {
    transactions
        .iter()
        .filter(|t| filter.matches(t))
        .cloned()
        .collect()
}

//! Core business logic: transactions, filtering, conversion and derivations

pub mod analytics;
pub mod config;
pub mod currency;
pub mod filter;
pub mod log;
pub mod report;
pub mod state;
pub mod transaction;

// Re-export main types for cleaner imports
pub use currency::{Currency, CurrencyConverter};
pub use filter::{Filter, FilterUpdate, TypeFilter, apply_filter};
pub use state::TransactionsState;
pub use transaction::{Transaction, TransactionInput, TransactionType};

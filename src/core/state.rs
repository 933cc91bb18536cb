//! The canonical transaction collection, its active filter and the derived
//! filtered view.
//!
//! Every mutator persists (when the collection changed) and re-derives the
//! filtered view before returning, so `filtered_transactions()` always equals
//! `apply_filter(transactions(), filter())`.

use crate::core::filter::{Filter, FilterUpdate, apply_filter};
use crate::core::transaction::Transaction;
use crate::store::SnapshotStore;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, error, warn};

/// Storage slot holding the serialized transaction collection.
pub const TRANSACTIONS_SLOT: &str = "transactions";

pub struct TransactionsState {
    transactions: Vec<Transaction>,
    filter: Filter,
    filtered: Vec<Transaction>,
    storage: Box<dyn SnapshotStore>,
}

impl TransactionsState {
    /// Loads the persisted collection from `storage`.
    ///
    /// A missing snapshot gives an empty collection. A snapshot that cannot be
    /// read or parsed is logged and also gives an empty collection.
    pub fn load(storage: Box<dyn SnapshotStore>) -> Self {
        let transactions = match storage.read(TRANSACTIONS_SLOT) {
            Ok(Some(bytes)) => match serde_json::from_slice::<Vec<Transaction>>(&bytes) {
                Ok(transactions) => transactions,
                Err(e) => {
                    warn!("Error loading transactions, starting empty: {e}");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!("Error reading transactions from storage, starting empty: {e}");
                Vec::new()
            }
        };
        debug!("Loaded {} transactions", transactions.len());

        let filter = Filter::default();
        let filtered = apply_filter(&transactions, &filter);
        Self {
            transactions,
            filter,
            filtered,
            storage,
        }
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn filtered_transactions(&self) -> &[Transaction] {
        &self.filtered
    }

    pub fn filter(&self) -> &Filter {
        &self.filter
    }

    pub fn get(&self, id: &str) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id == id)
    }

    /// Returns a time-based id that no stored transaction uses.
    ///
    /// Ids are millisecond timestamps, bumped past the largest numeric id
    /// already stored so they stay unique even if the clock goes backwards.
    pub fn next_id(&self) -> String {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or_default();
        let max_existing = self
            .transactions
            .iter()
            .filter_map(|t| t.id.parse::<u128>().ok())
            .max();
        let mut id = match max_existing {
            Some(max) if max >= now => max.checked_add(1).unwrap_or(now),
            _ => now,
        };
        // The fallback to `now` can land on a taken id.
        while self.get(&id.to_string()).is_some() {
            id += 1;
        }
        id.to_string()
    }

    /// Appends `transaction`. The input is trusted to be valid.
    pub fn add(&mut self, transaction: Transaction) {
        debug!("Adding transaction {}", transaction.id);
        self.transactions.push(transaction);
        self.persist();
        self.refresh();
    }

    /// Replaces the transaction with the same id, keeping its position.
    ///
    /// Returns `false` and leaves everything untouched when no transaction
    /// has that id.
    pub fn edit(&mut self, transaction: Transaction) -> bool {
        let Some(index) = self.transactions.iter().position(|t| t.id == transaction.id) else {
            debug!("Edit ignored, no transaction with id {}", transaction.id);
            return false;
        };
        debug!("Editing transaction {}", transaction.id);
        self.transactions[index] = transaction;
        self.persist();
        self.refresh();
        true
    }

    /// Removes the transaction with `id`. Returns whether one was removed.
    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.transactions.len();
        self.transactions.retain(|t| t.id != id);
        let removed = self.transactions.len() != before;
        if removed {
            debug!("Deleted transaction {id}");
        } else {
            debug!("Delete ignored, no transaction with id {id}");
        }
        self.persist();
        self.refresh();
        removed
    }

    pub fn set_filter(&mut self, update: FilterUpdate) {
        self.filter = self.filter.merged(update);
        debug!("Filter set to {:?}", self.filter);
        self.refresh();
    }

    pub fn clear_filters(&mut self) {
        self.filter = Filter::default();
        self.filtered = self.transactions.clone();
    }

    fn refresh(&mut self) {
        self.filtered = apply_filter(&self.transactions, &self.filter);
    }

    fn persist(&self) {
        let bytes = match serde_json::to_vec(&self.transactions) {
            Ok(bytes) => bytes,
            Err(e) => {
                error!("Error serializing transactions: {e}");
                return;
            }
        };
        if let Err(e) = self.storage.write(TRANSACTIONS_SLOT, &bytes) {
            error!("Error saving transactions to storage: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::currency::Currency;
    use crate::core::filter::TypeFilter;
    use crate::core::transaction::TransactionType;
    use crate::store::MemoryStore;
    use anyhow::{Result, anyhow};
    use chrono::NaiveDate;
    use std::sync::Arc;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn tx(id: &str, amount: f64, kind: TransactionType, category: &str, day: &str) -> Transaction {
        Transaction {
            id: id.to_string(),
            amount,
            description: format!("Transaction {id}"),
            kind,
            category: category.to_string(),
            date: date(day),
            currency: Currency::Usd,
        }
    }

    fn salary() -> Transaction {
        tx("1", 100.0, TransactionType::Income, "Salary", "2024-01-01")
    }

    fn groceries() -> Transaction {
        tx("2", 40.0, TransactionType::Expense, "Food", "2024-01-01")
    }

    fn assert_consistent(state: &TransactionsState) {
        assert_eq!(
            state.filtered_transactions(),
            apply_filter(state.transactions(), state.filter()).as_slice()
        );
    }

    /// Shares one `MemoryStore` between a state and the test body.
    struct SharedStore(Arc<MemoryStore>);

    impl SnapshotStore for SharedStore {
        fn read(&self, slot: &str) -> Result<Option<Vec<u8>>> {
            self.0.read(slot)
        }

        fn write(&self, slot: &str, bytes: &[u8]) -> Result<()> {
            self.0.write(slot, bytes)
        }
    }

    struct FailingStore;

    impl SnapshotStore for FailingStore {
        fn read(&self, _slot: &str) -> Result<Option<Vec<u8>>> {
            Err(anyhow!("disk unavailable"))
        }

        fn write(&self, _slot: &str, _bytes: &[u8]) -> Result<()> {
            Err(anyhow!("disk full"))
        }
    }

    fn empty_state() -> TransactionsState {
        TransactionsState::load(Box::new(MemoryStore::new()))
    }

    fn stored_ids(store: &MemoryStore) -> Vec<String> {
        let bytes = store.read(TRANSACTIONS_SLOT).unwrap().unwrap();
        let stored: Vec<Transaction> = serde_json::from_slice(&bytes).unwrap();
        stored.into_iter().map(|t| t.id).collect()
    }

    #[test]
    fn test_add_appends_in_order_and_persists() {
        let store = Arc::new(MemoryStore::new());
        let mut state = TransactionsState::load(Box::new(SharedStore(Arc::clone(&store))));

        state.add(salary());
        state.add(groceries());

        assert_eq!(state.transactions(), &[salary(), groceries()]);
        assert_eq!(state.filtered_transactions(), &[salary(), groceries()]);
        assert_eq!(stored_ids(&store), vec!["1", "2"]);
    }

    #[test]
    fn test_filter_by_type_keeps_only_income() {
        let mut state = empty_state();
        state.add(salary());
        state.add(groceries());

        state.set_filter(FilterUpdate::kind(TypeFilter::Income));
        assert_eq!(state.filtered_transactions(), &[salary()]);
        assert_eq!(state.transactions().len(), 2);

        state.clear_filters();
        assert_eq!(state.filter(), &Filter::default());
        assert_eq!(state.filtered_transactions(), state.transactions());
    }

    #[test]
    fn test_set_filter_merges_partial_updates() {
        let mut state = empty_state();
        state.set_filter(FilterUpdate::range(Some(date("2024-01-01")), None));
        state.set_filter(FilterUpdate::kind(TypeFilter::Expense));
        assert_eq!(state.filter().start_date, Some(date("2024-01-01")));
        assert_eq!(state.filter().kind, TypeFilter::Expense);
    }

    #[test]
    fn test_edit_replaces_in_place() {
        let mut state = empty_state();
        state.add(salary());
        state.add(groceries());
        state.add(tx("3", 5.0, TransactionType::Expense, "Food", "2024-01-02"));

        let mut updated = groceries();
        updated.amount = 55.0;
        updated.category = "Shopping".to_string();
        assert!(state.edit(updated.clone()));

        assert_eq!(state.transactions()[1], updated);
        assert_eq!(state.transactions()[0], salary());
        assert_eq!(state.transactions()[2].id, "3");
        assert_consistent(&state);
    }

    // Edits and deletes aimed at an unknown id are dropped without an error.
    #[test]
    fn test_edit_missing_id_is_silent_noop() {
        let store = Arc::new(MemoryStore::new());
        let mut state = TransactionsState::load(Box::new(SharedStore(Arc::clone(&store))));
        state.add(salary());
        state.set_filter(FilterUpdate::kind(TypeFilter::Expense));
        let before_all = state.transactions().to_vec();
        let before_filtered = state.filtered_transactions().to_vec();

        assert!(!state.edit(tx("99", 1.0, TransactionType::Expense, "Food", "2024-01-01")));

        assert_eq!(state.transactions(), before_all.as_slice());
        assert_eq!(state.filtered_transactions(), before_filtered.as_slice());
        assert_eq!(stored_ids(&store), vec!["1"]);
    }

    #[test]
    fn test_delete() {
        let mut state = empty_state();
        state.add(salary());
        state.add(groceries());

        assert!(!state.delete("missing"));
        assert_eq!(state.transactions(), &[salary(), groceries()]);
        assert_consistent(&state);

        assert!(state.delete("1"));
        assert_eq!(state.transactions(), &[groceries()]);
        assert_eq!(state.filtered_transactions(), &[groceries()]);
    }

    #[test]
    fn test_invariant_holds_across_operation_sequence() {
        let mut state = empty_state();
        state.set_filter(FilterUpdate {
            start_date: Some(Some(date("2024-01-02"))),
            end_date: Some(Some(date("2024-01-31"))),
            kind: None,
        });
        assert_consistent(&state);

        state.add(salary());
        assert_consistent(&state);
        assert!(state.filtered_transactions().is_empty());

        state.add(tx("3", 12.5, TransactionType::Expense, "Food", "2024-01-31"));
        assert_consistent(&state);
        assert_eq!(state.filtered_transactions().len(), 1);

        let mut moved = salary();
        moved.date = date("2024-01-15");
        state.edit(moved);
        assert_consistent(&state);
        assert_eq!(state.filtered_transactions().len(), 2);

        state.set_filter(FilterUpdate::kind(TypeFilter::Income));
        assert_consistent(&state);
        assert_eq!(state.filtered_transactions()[0].id, "1");

        state.delete("1");
        assert_consistent(&state);
        assert!(state.filtered_transactions().is_empty());

        state.clear_filters();
        assert_consistent(&state);
        assert_eq!(state.filtered_transactions().len(), 1);
    }

    #[test]
    fn test_load_restores_persisted_collection() {
        let json = serde_json::to_vec(&vec![salary(), groceries()]).unwrap();
        let state = TransactionsState::load(Box::new(MemoryStore::with_slot(
            TRANSACTIONS_SLOT,
            &json,
        )));
        assert_eq!(state.transactions(), &[salary(), groceries()]);
        assert_eq!(state.filtered_transactions(), state.transactions());
    }

    #[test_log::test]
    fn test_corrupt_snapshot_loads_empty() {
        let state = TransactionsState::load(Box::new(MemoryStore::with_slot(
            TRANSACTIONS_SLOT,
            b"{not json",
        )));
        assert!(state.transactions().is_empty());
        assert!(state.filtered_transactions().is_empty());
    }

    #[test_log::test]
    fn test_storage_failures_do_not_block_mutations() {
        let mut state = TransactionsState::load(Box::new(FailingStore));
        assert!(state.transactions().is_empty());

        state.add(salary());
        assert_eq!(state.transactions(), &[salary()]);
        assert_eq!(state.filtered_transactions(), &[salary()]);
    }

    #[test]
    fn test_next_id_is_unique() {
        let mut state = empty_state();
        let far_future = "99999999999999".to_string();
        let mut record = salary();
        record.id = far_future.clone();
        state.add(record);

        let id = state.next_id();
        assert_eq!(id, "100000000000000");
        assert!(state.get(&id).is_none());
        assert!(state.get(&far_future).is_some());
    }

    #[test]
    fn test_next_id_when_largest_id_is_max() {
        let mut state = empty_state();
        let mut record = salary();
        record.id = u128::MAX.to_string();
        state.add(record);

        let id = state.next_id();
        assert_ne!(id, u128::MAX.to_string());
        assert!(id.parse::<u128>().is_ok());
        assert!(state.get(&id).is_none());
    }
}

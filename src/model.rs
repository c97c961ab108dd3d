// 📚 Model - ordered transaction storage plus the last known row selection
//
// Insertion order is display order. The selection is a cache of UI state and
// is not checked against the list; callers refresh it after removals.

use crate::transaction::Transaction;
use std::collections::BTreeSet;

#[derive(Debug, Default)]
pub struct Model {
    transactions: Vec<Transaction>,
    selected_rows: BTreeSet<usize>,
}

impl Model {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append without validation; callers validate before constructing.
    pub fn add_transaction(&mut self, transaction: Transaction) {
        self.transactions.push(transaction);
    }

    /// Remove the first transaction with the same identity.
    ///
    /// Returns `None` when no such transaction is stored.
    pub fn remove_transaction(&mut self, transaction: &Transaction) -> Option<Transaction> {
        let index = self.position_of(transaction)?;
        Some(self.transactions.remove(index))
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn position_of(&self, transaction: &Transaction) -> Option<usize> {
        self.transactions
            .iter()
            .position(|tx| tx.same_identity(transaction))
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Sum of all stored amounts. An empty model totals +0.0, never -0.0.
    pub fn total(&self) -> f64 {
        self.transactions.iter().fold(0.0, |sum, tx| sum + tx.amount())
    }

    pub fn set_selected_rows<I>(&mut self, rows: I)
    where
        I: IntoIterator<Item = usize>,
    {
        self.selected_rows = rows.into_iter().collect();
    }

    pub fn selected_rows(&self) -> &BTreeSet<usize> {
        &self.selected_rows
    }
}

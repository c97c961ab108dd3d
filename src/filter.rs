// 🔎 Filter Strategies - select transactions for highlighting
// Each strategy validates its target once, at construction; filtering itself
// cannot fail and never mutates its input.

use crate::error::ValidationError;
use crate::transaction::Transaction;
use crate::validation::{is_valid_amount, is_valid_category};

// ============================================================================
// STRATEGY TRAIT
// ============================================================================

pub trait TransactionFilter {
    /// Matching transactions, in their original relative order.
    fn filter<'a>(&self, transactions: &'a [Transaction]) -> Vec<&'a Transaction>;

    /// Short label for status bars and logs.
    fn describe(&self) -> String;
}

// ============================================================================
// AMOUNT FILTER
// ============================================================================

/// Matches transactions whose amount equals the target exactly.
///
/// No tolerance is applied: `50.0` matches `50.0` but not `50.000001`.
#[derive(Debug, Clone, PartialEq)]
pub struct AmountFilter {
    target: f64,
}

impl AmountFilter {
    pub fn new(target: f64) -> Result<Self, ValidationError> {
        if !is_valid_amount(target) {
            return Err(ValidationError::InvalidAmountFilter);
        }
        Ok(AmountFilter { target })
    }

    pub fn target(&self) -> f64 {
        self.target
    }
}

impl TransactionFilter for AmountFilter {
    fn filter<'a>(&self, transactions: &'a [Transaction]) -> Vec<&'a Transaction> {
        transactions
            .iter()
            .filter(|tx| tx.amount() == self.target)
            .collect()
    }

    fn describe(&self) -> String {
        format!("amount = {:.2}", self.target)
    }
}

// ============================================================================
// CATEGORY FILTER
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryFilter {
    target: String,
}

impl CategoryFilter {
    pub fn new(target: &str) -> Result<Self, ValidationError> {
        if !is_valid_category(target) {
            return Err(ValidationError::InvalidCategoryFilter);
        }
        Ok(CategoryFilter {
            target: target.to_string(),
        })
    }

    pub fn target(&self) -> &str {
        &self.target
    }
}

impl TransactionFilter for CategoryFilter {
    fn filter<'a>(&self, transactions: &'a [Transaction]) -> Vec<&'a Transaction> {
        transactions
            .iter()
            .filter(|tx| tx.category() == self.target)
            .collect()
    }

    fn describe(&self) -> String {
        format!("category = {}", self.target)
    }
}

// ============================================================================
// ACTIVE FILTER SLOT
// ============================================================================

/// The strategy a controller currently holds.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    Amount(AmountFilter),
    Category(CategoryFilter),
}

impl TransactionFilter for Filter {
    fn filter<'a>(&self, transactions: &'a [Transaction]) -> Vec<&'a Transaction> {
        match self {
            Filter::Amount(f) => f.filter(transactions),
            Filter::Category(f) => f.filter(transactions),
        }
    }

    fn describe(&self) -> String {
        match self {
            Filter::Amount(f) => f.describe(),
            Filter::Category(f) => f.describe(),
        }
    }
}

impl From<AmountFilter> for Filter {
    fn from(filter: AmountFilter) -> Self {
        Filter::Amount(filter)
    }
}

impl From<CategoryFilter> for Filter {
    fn from(filter: CategoryFilter) -> Self {
        Filter::Category(filter)
    }
}

// ============================================================================
// TESTS
// ============================================================================

// 🎛️ Controller - mediates input, the model and the view
//
// Validates before mutating, re-reads the model after every change and pushes
// render instructions to the view. Holds at most one active filter, replaced
// wholesale by set_filter and never cleared automatically.

use crate::error::UsageError;
use crate::filter::{Filter, TransactionFilter};
use crate::model::Model;
use crate::transaction::{TimestampFormat, Transaction};
use crate::validation::{is_valid_amount, is_valid_category};
use crate::view::{TableRow, View};
use tracing::{debug, info, warn};

pub const NO_FILTER_MESSAGE: &str = "No filter applied";

/// Result of [`Controller::apply_filter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterOutcome {
    /// No filter is set. The view was notified and highlights are untouched.
    NoFilterApplied,
    /// Rows (full-list indices) now highlighted.
    Highlighted(Vec<usize>),
}

pub struct Controller<V: View> {
    model: Model,
    view: V,
    filter: Option<Filter>,
    timestamp_format: TimestampFormat,
}

impl<V: View> Controller<V> {
    pub fn new(model: Model, view: V) -> Self {
        Self::with_timestamp_format(model, view, TimestampFormat::default())
    }

    pub fn with_timestamp_format(model: Model, view: V, timestamp_format: TimestampFormat) -> Self {
        Controller {
            model,
            view,
            filter: None,
            timestamp_format,
        }
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn model(&self) -> &Model {
        &self.model
    }

    pub fn model_mut(&mut self) -> &mut Model {
        &mut self.model
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn active_filter(&self) -> Option<&Filter> {
        self.filter.as_ref()
    }

    pub fn timestamp_format(&self) -> &TimestampFormat {
        &self.timestamp_format
    }

    // ========================================================================
    // OPERATIONS
    // ========================================================================

    pub fn set_filter(&mut self, filter: impl Into<Filter>) {
        let filter = filter.into();
        debug!(filter = %filter.describe(), "filter set");
        self.filter = Some(filter);
    }

    /// Validate, then record the transaction and redraw.
    ///
    /// Returns false, with neither model nor view touched, when the amount or
    /// category is rejected.
    pub fn add_transaction(&mut self, amount: f64, category: &str) -> bool {
        if !is_valid_amount(amount) || !is_valid_category(category) {
            warn!(amount, category, "rejected transaction input");
            return false;
        }

        let transaction = match Transaction::new(amount, category) {
            Ok(tx) => tx,
            Err(err) => {
                warn!(%err, "transaction construction failed");
                return false;
            }
        };

        info!(id = %transaction.id(), amount, category, "transaction added");
        self.model.add_transaction(transaction);
        self.refresh();

        // The refresh dropped highlights; restore them, new row included
        if self.filter.is_some() {
            self.apply_filter();
        }
        true
    }

    pub fn apply_filter(&mut self) -> FilterOutcome {
        let Some(filter) = &self.filter else {
            self.view.notify(NO_FILTER_MESSAGE);
            return FilterOutcome::NoFilterApplied;
        };

        let transactions = self.model.transactions();
        let rows: Vec<usize> = filter
            .filter(transactions)
            .into_iter()
            .filter_map(|tx| self.model.position_of(tx))
            .collect();

        debug!(filter = %filter.describe(), matches = rows.len(), "filter applied");
        self.view.highlight_rows(&rows);
        FilterOutcome::Highlighted(rows)
    }

    /// Push the full table, total row included, to the view.
    pub fn refresh(&mut self) {
        let rows = self.table_rows();
        self.view.refresh_table(&rows);
    }

    /// Remove the transactions at the given full-list row indices.
    ///
    /// All indices are checked before anything is removed, so an out-of-range
    /// row leaves the model unchanged. Duplicate indices remove once.
    pub fn apply_undo(&mut self, rows: &[usize]) -> Result<usize, UsageError> {
        let len = self.model.len();
        if let Some(&row) = rows.iter().find(|&&row| row >= len) {
            warn!(row, len, "undo requested for a row that does not exist");
            return Err(UsageError::RowOutOfRange { row, len });
        }

        let to_remove: Vec<Transaction> = rows
            .iter()
            .map(|&row| self.model.transactions()[row].clone())
            .collect();

        let removed = to_remove
            .iter()
            .filter(|tx| self.model.remove_transaction(tx).is_some())
            .count();

        info!(removed, remaining = self.model.len(), "undo applied");
        self.refresh();

        // Re-highlight against the shortened list
        if self.filter.is_some() {
            self.apply_filter();
        }

        Ok(removed)
    }

    pub fn refresh_undo_btn(&mut self) {
        if self.model.selected_rows().is_empty() {
            self.view.disable_undo_btn();
        } else {
            self.view.enable_undo_btn();
        }
    }

    /// Record a table selection change and update the undo control.
    pub fn select_rows<I>(&mut self, rows: I)
    where
        I: IntoIterator<Item = usize>,
    {
        self.model.set_selected_rows(rows);
        self.refresh_undo_btn();
    }

    /// Undo whatever is currently selected, then clear the selection.
    ///
    /// The selection is cleared on failure too: a selection that names a
    /// missing row would fail the same way on every retry.
    pub fn undo_selected(&mut self) -> Result<usize, UsageError> {
        let rows: Vec<usize> = self.model.selected_rows().iter().copied().collect();
        let result = self.apply_undo(&rows);
        self.select_rows(std::iter::empty());
        result
    }

    fn table_rows(&self) -> Vec<TableRow> {
        let mut rows: Vec<TableRow> = self
            .model
            .transactions()
            .iter()
            .enumerate()
            .map(|(i, tx)| TableRow::Entry {
                number: i + 1,
                amount: tx.amount(),
                category: tx.category().to_string(),
                timestamp: tx.formatted_timestamp(&self.timestamp_format),
            })
            .collect();

        rows.push(TableRow::Total {
            amount: self.model.total(),
        });
        rows
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{AmountFilter, CategoryFilter};
    use crate::view::ViewState;

    fn create_test_controller() -> Controller<ViewState> {
        Controller::new(Model::new(), ViewState::new())
    }

    fn total_cost(controller: &Controller<ViewState>) -> f64 {
        controller
            .model()
            .transactions()
            .iter()
            .map(|tx| tx.amount())
            .sum()
    }

    #[test]
    fn test_add_transaction() {
        let mut controller = create_test_controller();
        assert_eq!(controller.model().len(), 0);

        assert!(controller.add_transaction(50.0, "food"));

        assert_eq!(controller.model().len(), 1);
        let tx = &controller.model().transactions()[0];
        assert!((tx.amount() - 50.0).abs() < 0.01);
        assert_eq!(tx.category(), "food");
        assert!((total_cost(&controller) - 50.0).abs() < 0.01);
    }

    #[test]
    fn test_add_transaction_updates_view() {
        let mut controller = create_test_controller();
        controller.add_transaction(50.0, "food");

        let view = controller.view();
        let format = controller.timestamp_format();
        let timestamp = controller.model().transactions()[0].formatted_timestamp(format);

        assert_eq!(
            view.rows(),
            &[
                TableRow::Entry {
                    number: 1,
                    amount: 50.0,
                    category: "food".to_string(),
                    timestamp,
                },
                TableRow::Total { amount: 50.0 },
            ]
        );
    }

    #[test]
    fn test_invalid_input_leaves_model_and_view_alone() {
        let mut controller = create_test_controller();

        assert!(!controller.add_transaction(-2.0, "food"));
        assert!(!controller.add_transaction(0.0, "food"));
        assert!(!controller.add_transaction(10.0, "Food"));
        assert!(!controller.add_transaction(10.0, "groceries"));

        assert_eq!(controller.model().len(), 0);
        assert_eq!(controller.view().row_count(), 0);
        assert!(controller.view().notifications().is_empty());
    }

    #[test]
    fn test_each_valid_add_grows_by_one() {
        let mut controller = create_test_controller();
        let inputs = [(1.0, "food"), (2.5, "travel"), (99.99, "bills"), (0.01, "entertainment"), (7.0, "other")];

        for (n, (amount, category)) in inputs.iter().enumerate() {
            assert!(controller.add_transaction(*amount, category));
            assert_eq!(controller.model().len(), n + 1);
        }

        let expected: f64 = inputs.iter().map(|(amount, _)| amount).sum();
        let shown = controller.view().displayed_total().unwrap();
        assert!((shown - expected).abs() < 0.01);
        assert!((controller.model().total() - expected).abs() < 0.01);
    }

    #[test]
    fn test_filter_by_amount_highlights_matching_rows() {
        let mut controller = create_test_controller();
        controller.add_transaction(50.0, "food");
        controller.add_transaction(100.0, "bills");

        controller.set_filter(AmountFilter::new(50.0).unwrap());
        let outcome = controller.apply_filter();

        assert_eq!(outcome, FilterOutcome::Highlighted(vec![0]));
        assert!(controller.view().is_highlighted(0));
        assert!(!controller.view().is_highlighted(1));
        // Total row
        assert!(!controller.view().is_highlighted(2));
    }

    #[test]
    fn test_filter_by_category_highlights_matching_rows() {
        let mut controller = create_test_controller();
        controller.add_transaction(50.0, "food");
        controller.add_transaction(100.0, "bills");

        controller.set_filter(CategoryFilter::new("bills").unwrap());
        let outcome = controller.apply_filter();

        assert_eq!(outcome, FilterOutcome::Highlighted(vec![1]));
        assert!(!controller.view().is_highlighted(0));
        assert!(controller.view().is_highlighted(1));
        assert!(!controller.view().is_highlighted(2));
    }

    #[test]
    fn test_filter_with_no_match_clears_highlights() {
        let mut controller = create_test_controller();
        controller.add_transaction(50.0, "food");
        controller.set_filter(CategoryFilter::new("food").unwrap());
        controller.apply_filter();
        assert!(controller.view().is_highlighted(0));

        controller.set_filter(CategoryFilter::new("travel").unwrap());
        assert_eq!(controller.apply_filter(), FilterOutcome::Highlighted(vec![]));
        assert!(controller.view().highlighted_rows().is_empty());
    }

    #[test]
    fn test_add_keeps_active_filter_highlighting() {
        let mut controller = create_test_controller();
        controller.add_transaction(50.0, "food");
        controller.set_filter(CategoryFilter::new("food").unwrap());
        controller.apply_filter();

        controller.add_transaction(10.0, "bills");
        controller.add_transaction(20.0, "food");

        let highlighted: Vec<usize> = controller.view().highlighted_rows().iter().copied().collect();
        assert_eq!(highlighted, vec![0, 2]);
        assert!(controller.view().notifications().is_empty());
    }

    #[test]
    fn test_add_without_filter_does_not_notify() {
        let mut controller = create_test_controller();
        controller.add_transaction(50.0, "food");

        assert!(controller.view().highlighted_rows().is_empty());
        assert!(controller.view().notifications().is_empty());
    }

    #[test]
    fn test_apply_filter_without_filter_notifies() {
        let mut controller = create_test_controller();
        controller.add_transaction(50.0, "food");
        controller.view_mut().highlight_rows(&[0]);

        let outcome = controller.apply_filter();

        assert_eq!(outcome, FilterOutcome::NoFilterApplied);
        assert_eq!(controller.view().last_notification(), Some(NO_FILTER_MESSAGE));
        assert!(controller.view().is_highlighted(0));
        assert_eq!(controller.view().highlighted_rows().len(), 1);
    }

    #[test]
    fn test_set_filter_replaces_previous() {
        let mut controller = create_test_controller();
        assert!(controller.active_filter().is_none());

        controller.set_filter(AmountFilter::new(5.0).unwrap());
        assert!(matches!(controller.active_filter(), Some(Filter::Amount(_))));

        controller.set_filter(CategoryFilter::new("food").unwrap());
        assert!(matches!(controller.active_filter(), Some(Filter::Category(_))));
    }

    #[test]
    fn test_undo_disallowed_without_selection() {
        let mut controller = create_test_controller();
        assert!(!controller.view().is_undo_enabled());

        controller.refresh_undo_btn();
        assert!(!controller.view().is_undo_enabled());
    }

    #[test]
    fn test_undo_allowed_after_selection() {
        let mut controller = create_test_controller();
        controller.add_transaction(50.0, "food");
        controller.add_transaction(10.0, "bills");

        let total = controller.view().displayed_total().unwrap();
        assert!((total - 60.0).abs() < 0.01);

        controller.model_mut().set_selected_rows([0]);
        controller.refresh_undo_btn();
        assert!(controller.view().is_undo_enabled());

        assert_eq!(controller.apply_undo(&[0]), Ok(1));

        let remaining = controller.model().transactions();
        assert_eq!(remaining.len(), 1);
        assert!((remaining[0].amount() - 10.0).abs() < 0.01);
        assert_eq!(remaining[0].category(), "bills");

        let rows = controller.view().rows();
        assert_eq!(rows.len(), 2);
        assert!(matches!(&rows[0], TableRow::Entry { number: 1, category, .. } if category == "bills"));
        assert_eq!(rows[1], TableRow::Total { amount: 10.0 });
    }

    #[test]
    fn test_undo_multiple_rows() {
        let mut controller = create_test_controller();
        controller.add_transaction(1.0, "food");
        controller.add_transaction(2.0, "travel");
        controller.add_transaction(3.0, "bills");

        assert_eq!(controller.apply_undo(&[2, 0]), Ok(2));

        let remaining = controller.model().transactions();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].category(), "travel");
    }

    #[test]
    fn test_undo_duplicate_rows_remove_once() {
        let mut controller = create_test_controller();
        controller.add_transaction(1.0, "food");
        controller.add_transaction(2.0, "travel");

        assert_eq!(controller.apply_undo(&[0, 0]), Ok(1));
        assert_eq!(controller.model().len(), 1);
    }

    #[test]
    fn test_undo_out_of_range_fails_fast() {
        let mut controller = create_test_controller();
        controller.add_transaction(50.0, "food");
        controller.add_transaction(10.0, "bills");

        let result = controller.apply_undo(&[0, 5]);

        assert_eq!(result, Err(UsageError::RowOutOfRange { row: 5, len: 2 }));
        assert_eq!(controller.model().len(), 2);
    }

    #[test]
    fn test_undo_reapplies_active_filter() {
        let mut controller = create_test_controller();
        controller.add_transaction(50.0, "food");
        controller.add_transaction(10.0, "bills");
        controller.add_transaction(20.0, "bills");
        controller.set_filter(CategoryFilter::new("bills").unwrap());
        controller.apply_filter();
        assert_eq!(controller.view().highlighted_rows().len(), 2);

        controller.apply_undo(&[0]).unwrap();

        let highlighted: Vec<usize> = controller.view().highlighted_rows().iter().copied().collect();
        assert_eq!(highlighted, vec![0, 1]);
        assert!(controller.view().notifications().is_empty());
    }

    #[test]
    fn test_undo_without_filter_does_not_notify() {
        let mut controller = create_test_controller();
        controller.add_transaction(50.0, "food");

        controller.apply_undo(&[0]).unwrap();

        assert!(controller.view().notifications().is_empty());
        assert_eq!(controller.view().rows(), &[TableRow::Total { amount: 0.0 }]);
    }

    #[test]
    fn test_filter_survives_emptying_the_model() {
        let mut controller = create_test_controller();
        controller.add_transaction(50.0, "food");
        controller.set_filter(AmountFilter::new(50.0).unwrap());

        controller.apply_undo(&[0]).unwrap();

        assert!(controller.model().is_empty());
        assert!(controller.active_filter().is_some());
        assert_eq!(controller.apply_filter(), FilterOutcome::Highlighted(vec![]));
    }

    #[test]
    fn test_undo_selected_clears_selection() {
        let mut controller = create_test_controller();
        controller.add_transaction(50.0, "food");
        controller.add_transaction(10.0, "bills");

        controller.select_rows([1]);
        assert!(controller.view().is_undo_enabled());

        assert_eq!(controller.undo_selected(), Ok(1));
        assert!(controller.model().selected_rows().is_empty());
        assert!(!controller.view().is_undo_enabled());
        assert_eq!(controller.model().transactions()[0].category(), "food");
    }

    #[test]
    fn test_custom_timestamp_format_reaches_rows() {
        let format = TimestampFormat::new("%Y").unwrap();
        let mut controller = Controller::with_timestamp_format(Model::new(), ViewState::new(), format);
        controller.add_transaction(5.0, "other");

        let year = chrono::Local::now().format("%Y").to_string();
        assert!(matches!(&controller.view().rows()[0], TableRow::Entry { timestamp, .. } if *timestamp == year));
    }
}

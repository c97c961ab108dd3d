// 🖼️ View - render instructions pushed by the controller
//
// Data flows one way: the controller builds rows and highlight sets from the
// model and hands them over. A view never reads the model.

use std::collections::BTreeSet;

// ============================================================================
// TABLE ROWS
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum TableRow {
    /// One stored transaction. `number` is the 1-based serial column.
    Entry {
        number: usize,
        amount: f64,
        category: String,
        timestamp: String,
    },
    /// Synthesized last row: label "Total", blank amount and category cells,
    /// summed amount in the last column.
    Total { amount: f64 },
}

impl TableRow {
    pub const TOTAL_LABEL: &'static str = "Total";

    /// Display text per column: serial, amount, category, date.
    pub fn cells(&self) -> [String; 4] {
        match self {
            TableRow::Entry {
                number,
                amount,
                category,
                timestamp,
            } => [
                number.to_string(),
                format!("{:.2}", amount),
                category.clone(),
                timestamp.clone(),
            ],
            TableRow::Total { amount } => [
                Self::TOTAL_LABEL.to_string(),
                String::new(),
                String::new(),
                format!("{:.2}", amount),
            ],
        }
    }

    pub fn is_total(&self) -> bool {
        matches!(self, TableRow::Total { .. })
    }
}

// ============================================================================
// VIEW TRAIT
// ============================================================================

pub trait View {
    /// Replace every displayed row, the total row included.
    fn refresh_table(&mut self, rows: &[TableRow]);

    /// Mark exactly these rows; all others lose their highlight.
    fn highlight_rows(&mut self, rows: &[usize]);

    fn enable_undo_btn(&mut self);

    fn disable_undo_btn(&mut self);

    /// Show a user-facing message.
    fn notify(&mut self, message: &str);
}

// ============================================================================
// IN-MEMORY VIEW STATE
// ============================================================================

/// Render target that remembers what it was told to show.
///
/// The terminal UI draws from it; tests inspect it directly.
#[derive(Debug, Default)]
pub struct ViewState {
    rows: Vec<TableRow>,
    highlighted: BTreeSet<usize>,
    undo_enabled: bool,
    notifications: Vec<String>,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> &[TableRow] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Amount shown in the total row, if the table has been rendered.
    pub fn displayed_total(&self) -> Option<f64> {
        self.rows.iter().find_map(|row| match row {
            TableRow::Total { amount } => Some(*amount),
            TableRow::Entry { .. } => None,
        })
    }

    pub fn highlighted_rows(&self) -> &BTreeSet<usize> {
        &self.highlighted
    }

    pub fn is_highlighted(&self, row: usize) -> bool {
        self.highlighted.contains(&row)
    }

    pub fn is_undo_enabled(&self) -> bool {
        self.undo_enabled
    }

    pub fn notifications(&self) -> &[String] {
        &self.notifications
    }

    pub fn last_notification(&self) -> Option<&str> {
        self.notifications.last().map(String::as_str)
    }

    pub fn take_notifications(&mut self) -> Vec<String> {
        std::mem::take(&mut self.notifications)
    }
}

impl View for ViewState {
    fn refresh_table(&mut self, rows: &[TableRow]) {
        self.rows = rows.to_vec();
        // Indices from before the refresh describe different rows now
        self.highlighted.clear();
    }

    fn highlight_rows(&mut self, rows: &[usize]) {
        self.highlighted = rows.iter().copied().collect();
    }

    fn enable_undo_btn(&mut self) {
        self.undo_enabled = true;
    }

    fn disable_undo_btn(&mut self) {
        self.undo_enabled = false;
    }

    fn notify(&mut self, message: &str) {
        self.notifications.push(message.to_string());
    }
}

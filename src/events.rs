// 📨 UI Events - discrete user actions dispatched to the controller
//
// Each event runs to completion before the next one is read. Raw text from
// input fields is parsed here; rejected input becomes a view notification
// rather than an error.

use crate::controller::{Controller, FilterOutcome};
use crate::error::{UsageError, ValidationError};
use crate::filter::{AmountFilter, CategoryFilter, Filter};
use crate::view::View;
use tracing::{info, warn};

pub const INVALID_INPUT_MESSAGE: &str = "Invalid amount or category entered";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    AddTransaction { amount: String, category: String },
    ApplyAmountFilter(String),
    ApplyCategoryFilter(String),
    SelectRows(Vec<usize>),
    Undo,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EventOutcome {
    Added,
    Rejected,
    Filtered(FilterOutcome),
    FilterRejected(ValidationError),
    Selected,
    Undone(usize),
    UndoFailed(UsageError),
}

/// Amount field text as a number. Unparsable text reads as 0.0, which every
/// amount check rejects.
pub fn parse_amount_input(text: &str) -> f64 {
    text.trim().parse::<f64>().unwrap_or(0.0)
}

pub fn dispatch<V: View>(controller: &mut Controller<V>, event: UiEvent) -> EventOutcome {
    match event {
        UiEvent::AddTransaction { amount, category } => {
            let amount = parse_amount_input(&amount);
            if controller.add_transaction(amount, category.trim()) {
                EventOutcome::Added
            } else {
                controller.view_mut().notify(INVALID_INPUT_MESSAGE);
                EventOutcome::Rejected
            }
        }
        UiEvent::ApplyAmountFilter(text) => {
            let filter = AmountFilter::new(parse_amount_input(&text)).map(Filter::from);
            apply_new_filter(controller, filter)
        }
        UiEvent::ApplyCategoryFilter(text) => {
            let filter = CategoryFilter::new(text.trim()).map(Filter::from);
            apply_new_filter(controller, filter)
        }
        UiEvent::SelectRows(rows) => {
            controller.select_rows(rows);
            EventOutcome::Selected
        }
        UiEvent::Undo => match controller.undo_selected() {
            Ok(removed) => EventOutcome::Undone(removed),
            Err(err) => {
                warn!(%err, "undo failed");
                controller.view_mut().notify(&err.to_string());
                EventOutcome::UndoFailed(err)
            }
        },
    }
}

fn apply_new_filter<V: View>(
    controller: &mut Controller<V>,
    filter: Result<Filter, ValidationError>,
) -> EventOutcome {
    match filter {
        Ok(filter) => {
            info!(filter = ?filter, "filter requested");
            controller.set_filter(filter);
            EventOutcome::Filtered(controller.apply_filter())
        }
        Err(err) => {
            // Keep whatever filter was active before
            warn!(%err, "filter input rejected");
            controller.view_mut().notify(&err.to_string());
            EventOutcome::FilterRejected(err)
        }
    }
}

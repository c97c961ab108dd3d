// Expense Tracker - Core Library
// Model, view state, controller and filters; the binary adds the terminal UI

pub mod config;
pub mod controller;
pub mod error;
pub mod events;
pub mod filter;
pub mod model;
pub mod transaction;
pub mod validation;
pub mod view;

#[cfg(feature = "tui")]
pub mod ui;

// Re-export commonly used types
pub use config::Config;
pub use controller::{Controller, FilterOutcome, NO_FILTER_MESSAGE};
pub use error::{InvalidTimestampFormat, UsageError, ValidationError};
pub use events::{dispatch, EventOutcome, UiEvent, INVALID_INPUT_MESSAGE};
pub use filter::{AmountFilter, CategoryFilter, Filter, TransactionFilter};
pub use model::Model;
pub use transaction::{TimestampFormat, Transaction};
pub use validation::VALID_CATEGORIES;
pub use view::{TableRow, View, ViewState};

// ⚠️ Error kinds shared by the model, filters and controller
//
// Validation errors carry stable messages because the UI shows them verbatim.

// ============================================================================
// VALIDATION ERRORS
// ============================================================================

/// Rejected input at Transaction or filter construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("The amount is not valid.")]
    InvalidAmount,

    #[error("The category is not valid.")]
    InvalidCategory,

    #[error("Invalid amount filter")]
    InvalidAmountFilter,

    #[error("Invalid category filter")]
    InvalidCategoryFilter,
}

// ============================================================================
// USAGE ERRORS
// ============================================================================

/// The caller broke a controller contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum UsageError {
    /// A row index did not point into the current transaction list.
    #[error("row {row} is out of range for {len} transactions")]
    RowOutOfRange { row: usize, len: usize },
}

// ============================================================================
// CONFIGURATION ERRORS
// ============================================================================

/// A timestamp pattern chrono cannot render.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid timestamp format \"{0}\"")]
pub struct InvalidTimestampFormat(pub String);

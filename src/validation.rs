// ✅ Input Validation - amount and category rules
// Used by Transaction construction, the filters and the controller's add flow

/// Categories a transaction may be recorded under. Matching is case-sensitive.
pub const VALID_CATEGORIES: [&str; 5] = ["food", "travel", "bills", "entertainment", "other"];

/// Amounts must be finite and strictly positive. NaN and infinity are rejected.
pub fn is_valid_amount(amount: f64) -> bool {
    amount.is_finite() && amount > 0.0
}

pub fn is_valid_category(category: &str) -> bool {
    VALID_CATEGORIES.contains(&category)
}

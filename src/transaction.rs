// 🧾 Transaction - one recorded expense
// Values are fixed at construction; identity is a UUID so two expenses with
// the same amount and category stay distinct.

use crate::error::{InvalidTimestampFormat, ValidationError};
use crate::validation::{is_valid_amount, is_valid_category};
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Local, NaiveDateTime, ParseResult};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// TIMESTAMP FORMAT
// ============================================================================

/// strftime pattern used to display transaction timestamps.
///
/// Injected into the controller from configuration instead of living in a
/// shared static formatter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimestampFormat(String);

impl TimestampFormat {
    pub const DEFAULT_PATTERN: &'static str = "%d-%m-%Y %H:%M";

    pub fn new(pattern: impl Into<String>) -> Result<Self, InvalidTimestampFormat> {
        let pattern = pattern.into();
        let broken = pattern.is_empty()
            || StrftimeItems::new(&pattern).any(|item| matches!(item, Item::Error));
        if broken {
            return Err(InvalidTimestampFormat(pattern));
        }
        Ok(TimestampFormat(pattern))
    }

    pub fn pattern(&self) -> &str {
        &self.0
    }

    pub fn format(&self, timestamp: &DateTime<Local>) -> String {
        timestamp.format(&self.0).to_string()
    }

    /// Read back a timestamp rendered with this format.
    pub fn parse(&self, text: &str) -> ParseResult<NaiveDateTime> {
        NaiveDateTime::parse_from_str(text, &self.0)
    }
}

impl Default for TimestampFormat {
    fn default() -> Self {
        TimestampFormat(Self::DEFAULT_PATTERN.to_string())
    }
}

impl TryFrom<String> for TimestampFormat {
    type Error = InvalidTimestampFormat;

    fn try_from(pattern: String) -> Result<Self, Self::Error> {
        TimestampFormat::new(pattern)
    }
}

impl From<TimestampFormat> for String {
    fn from(format: TimestampFormat) -> Self {
        format.0
    }
}

// ============================================================================
// TRANSACTION
// ============================================================================

#[derive(Debug, Clone)]
pub struct Transaction {
    id: Uuid,
    amount: f64,
    category: String,
    timestamp: DateTime<Local>,
}

impl Transaction {
    /// Create a transaction stamped with the current local time.
    ///
    /// The amount is checked before the category, so an input that is wrong
    /// on both counts reports [`ValidationError::InvalidAmount`].
    pub fn new(amount: f64, category: &str) -> Result<Self, ValidationError> {
        Self::with_timestamp(amount, category, Local::now())
    }

    pub fn with_timestamp(
        amount: f64,
        category: &str,
        timestamp: DateTime<Local>,
    ) -> Result<Self, ValidationError> {
        if !is_valid_amount(amount) {
            return Err(ValidationError::InvalidAmount);
        }
        if !is_valid_category(category) {
            return Err(ValidationError::InvalidCategory);
        }

        Ok(Transaction {
            id: Uuid::new_v4(),
            amount,
            category: category.to_string(),
            timestamp,
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn timestamp(&self) -> DateTime<Local> {
        self.timestamp
    }

    pub fn formatted_timestamp(&self, format: &TimestampFormat) -> String {
        format.format(&self.timestamp)
    }

    /// True when both values refer to the same recorded expense.
    pub fn same_identity(&self, other: &Transaction) -> bool {
        self.id == other.id
    }
}

// Equality is identity: a copy of a transaction equals the original, a new
// transaction with the same values does not.
impl PartialEq for Transaction {
    fn eq(&self, other: &Self) -> bool {
        self.same_identity(other)
    }
}

impl Eq for Transaction {}

// ============================================================================
// TESTS
// ============================================================================

//! # Error Types
//!
//! Domain-specific error types for vistara-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  vistara-core errors (this file)                                       │
//! │  ├── CoreError        - General domain errors                          │
//! │  ├── ValidationError  - One field failed one rule                      │
//! │  └── FieldErrors      - Every failing field of a form, by name         │
//! │                                                                         │
//! │  vistara-export errors (separate crate)                                │
//! │  └── ExportError      - Capture / layout / persist failures            │
//! │                                                                         │
//! │  CLI errors (in app)                                                    │
//! │  └── CliError         - What the user sees                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::BTreeMap;

use serde::Serialize;
use thiserror::Error;

use crate::money::Money;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The submitted bill form failed validation.
    ///
    /// Carries every failing field so the form can show all messages at once.
    #[error("Bill form has {} invalid field(s)", .0.len())]
    InvalidForm(FieldErrors),

    /// A single value failed validation.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl From<FieldErrors> for CoreError {
    fn from(errors: FieldErrors) -> Self {
        CoreError::InvalidForm(errors)
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// `field` is the form key the message belongs to, e.g. `phone` or
/// `items[2].amount`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., phone number, date, amount).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// A list has fewer entries than allowed.
    #[error("{field} must contain at least {min} entry")]
    TooFew { field: String, min: usize },

    /// A list has more entries than allowed.
    #[error("{field} must contain at most {max} entries")]
    TooMany { field: String, max: usize },

    /// Value exceeds the largest accepted amount.
    #[error("{field} must be at most {max}")]
    TooLarge { field: String, max: Money },
}

impl ValidationError {
    /// The form key this error belongs to.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::Required { field }
            | ValidationError::MustBePositive { field }
            | ValidationError::InvalidFormat { field, .. }
            | ValidationError::TooFew { field, .. }
            | ValidationError::TooMany { field, .. }
            | ValidationError::TooLarge { field, .. } => field,
        }
    }
}

// =============================================================================
// Field Errors
// =============================================================================

/// Mapping from form field name to its error message.
///
/// Ordered by key so output is stable. An empty map means the form is valid.
///
/// ## Serialization
/// ```json
/// { "items[0].amount": "items[0].amount must be positive", "phone": "phone is required" }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    /// Creates an empty set of errors.
    pub fn new() -> Self {
        FieldErrors::default()
    }

    /// Records an error under its field. The first error per field wins.
    pub fn push(&mut self, error: ValidationError) {
        self.0
            .entry(error.field().to_string())
            .or_insert_with(|| error.to_string());
    }

    /// Records the error of a failed check, if any.
    pub fn check(&mut self, result: Result<(), ValidationError>) {
        if let Err(e) = result {
            self.push(e);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Message for a field, if that field failed.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn into_inner(self) -> BTreeMap<String, String> {
        self.0
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

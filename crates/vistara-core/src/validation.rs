//! # Validation Module
//!
//! Field rules for the bill form, callable without any UI framework.
//!
//! ## Rules
//! ```text
//! ┌──────────────────────┬──────────────────────────────────────────────┐
//! │ field                │ rule                                         │
//! ├──────────────────────┼──────────────────────────────────────────────┤
//! │ name, address        │ required, non-blank                          │
//! │ eventName, eventVenue│ required, non-blank                          │
//! │ phone                │ required, exactly 10 ASCII digits            │
//! │ eventDate            │ required, real calendar date (YYYY-MM-DD)    │
//! │ items                │ 1 to 500 entries                             │
//! │ items[i].description │ required, non-blank                          │
//! │ items[i].amount      │ required, numeric, > 0, ≤ ₹1,00,00,00,00,000 │
//! └──────────────────────┴──────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use vistara_core::validation::{validate_form, validate_phone};
//! use vistara_core::BillForm;
//!
//! assert!(validate_phone("9876543210").is_ok());
//!
//! let errors = validate_form(&BillForm::default());
//! assert_eq!(errors.get("phone"), Some("phone is required"));
//! ```

use chrono::NaiveDate;

use crate::error::{FieldErrors, ValidationError};
use crate::form::BillForm;
use crate::money::{Money, ParseMoneyError};
use crate::types::{BillingRequest, LineItem};
use crate::{MAX_ITEMS, MAX_ITEM_AMOUNT, PHONE_DIGITS};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Date format of `eventDate`, as sent by a date input.
pub const EVENT_DATE_FORMAT: &str = "%Y-%m-%d";

// =============================================================================
// Field Validators
// =============================================================================

/// Validates that a text field is not blank.
pub fn validate_required(field: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }
    Ok(())
}

/// Validates a phone number: exactly 10 ASCII digits, nothing else.
///
/// Whitespace is not stripped; `" 9876543210"` is rejected.
///
/// ```rust
/// use vistara_core::validation::validate_phone;
///
/// assert!(validate_phone("9876543210").is_ok());
/// assert!(validate_phone("987654321").is_err());
/// assert!(validate_phone("98765432100").is_err());
/// assert!(validate_phone("98765-4321").is_err());
/// ```
pub fn validate_phone(phone: &str) -> ValidationResult<()> {
    validate_required("phone", phone)?;

    if phone.len() != PHONE_DIGITS || !phone.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ValidationError::InvalidFormat {
            field: "phone".to_string(),
            reason: format!("must be exactly {} digits", PHONE_DIGITS),
        });
    }

    Ok(())
}

/// Validates and parses the event date.
pub fn validate_event_date(value: &str) -> ValidationResult<NaiveDate> {
    validate_required("eventDate", value)?;

    NaiveDate::parse_from_str(value.trim(), EVENT_DATE_FORMAT).map_err(|_| {
        ValidationError::InvalidFormat {
            field: "eventDate".to_string(),
            reason: "must be a valid date (YYYY-MM-DD)".to_string(),
        }
    })
}

/// Validates and parses an item amount written in rupees.
///
/// Sub-paisa digits are rounded before the positivity check, so `0.001`
/// fails while `0.005` is one paisa.
pub fn validate_amount(field: &str, value: &str) -> ValidationResult<Money> {
    validate_required(field, value)?;

    let amount = Money::parse_major(value).map_err(|e| match e {
        ParseMoneyError::Overflow => ValidationError::TooLarge {
            field: field.to_string(),
            max: MAX_ITEM_AMOUNT,
        },
        e => ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: e.to_string(),
        },
    })?;

    if !amount.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: field.to_string(),
        });
    }
    if amount > MAX_ITEM_AMOUNT {
        return Err(ValidationError::TooLarge {
            field: field.to_string(),
            max: MAX_ITEM_AMOUNT,
        });
    }

    Ok(amount)
}

// =============================================================================
// Form Validator
// =============================================================================

/// Validates a whole form, returning one message per failing field.
///
/// An empty result means [`BillingRequest::try_from`] will succeed.
pub fn validate_form(form: &BillForm) -> FieldErrors {
    parse_form(form).err().unwrap_or_default()
}

/// Validates a form and, if every field passes, builds the request.
pub(crate) fn parse_form(form: &BillForm) -> Result<BillingRequest, FieldErrors> {
    let mut errors = FieldErrors::new();

    let text_fields = [
        ("name", &form.name),
        ("address", &form.address),
        ("eventName", &form.event_name),
        ("eventVenue", &form.event_venue),
    ];
    for (field, value) in text_fields {
        errors.check(validate_required(field, value));
    }
    errors.check(validate_phone(&form.phone));

    let event_date = validate_event_date(&form.event_date)
        .map_err(|e| errors.push(e))
        .ok();

    if form.items.is_empty() {
        errors.push(ValidationError::TooFew {
            field: "items".to_string(),
            min: 1,
        });
    } else if form.items.len() > MAX_ITEMS {
        errors.push(ValidationError::TooMany {
            field: "items".to_string(),
            max: MAX_ITEMS,
        });
    }

    let mut items = Vec::with_capacity(form.items.len());
    for (i, item) in form.items.iter().enumerate() {
        let description_field = format!("items[{i}].description");
        let amount_field = format!("items[{i}].amount");

        errors.check(validate_required(&description_field, &item.description));
        match validate_amount(&amount_field, &item.amount) {
            Ok(amount) => items.push(LineItem {
                description: item.description.trim().to_string(),
                amount,
            }),
            Err(e) => errors.push(e),
        }
    }

    match event_date {
        Some(event_date) if errors.is_empty() => Ok(BillingRequest {
            name: form.name.trim().to_string(),
            address: form.address.trim().to_string(),
            phone: form.phone.clone(),
            event_date,
            event_name: form.event_name.trim().to_string(),
            event_venue: form.event_venue.trim().to_string(),
            items,
        }),
        _ => Err(errors),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

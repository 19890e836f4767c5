//! # Bill Form
//!
//! The raw submission exactly as the user typed it. Nothing here is trusted:
//! text may be blank, the phone may be malformed and amounts may not be
//! numbers. [`BillingRequest::try_from`] is the only way from a form to a
//! typed request.
//!
//! ## JSON Shape
//! ```json
//! {
//!   "name": "Asha Rao",
//!   "address": "12 MG Road, Pune",
//!   "phone": "9876543210",
//!   "eventDate": "2024-11-02",
//!   "eventName": "Wedding",
//!   "eventVenue": "Lotus Hall",
//!   "items": [{ "description": "Camera", "amount": 100 }]
//! }
//! ```
//! Amounts may be JSON numbers or strings.

use serde::{Deserialize, Deserializer, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::types::BillingRequest;
use crate::validation;

/// A bill form submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase", default)]
#[ts(export)]
pub struct BillForm {
    pub name: String,
    pub address: String,
    pub phone: String,
    pub event_date: String,
    pub event_name: String,
    pub event_venue: String,
    pub items: Vec<ItemForm>,
}

/// One line of the items section of the form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase", default)]
#[ts(export)]
pub struct ItemForm {
    pub description: String,

    /// Amount in rupees as entered, e.g. `"99.50"`.
    #[serde(deserialize_with = "amount_text")]
    pub amount: String,
}

impl BillForm {
    /// The form a user starts from: blank details and one "Camera" line.
    pub fn starter() -> Self {
        BillForm {
            items: vec![ItemForm::new("Camera", "0")],
            ..BillForm::default()
        }
    }
}

impl ItemForm {
    pub fn new(description: impl Into<String>, amount: impl Into<String>) -> Self {
        ItemForm {
            description: description.into(),
            amount: amount.into(),
        }
    }
}

impl TryFrom<&BillForm> for BillingRequest {
    type Error = CoreError;

    /// Validates the form and builds the typed request.
    ///
    /// Fails with [`CoreError::InvalidForm`] carrying every failing field.
    fn try_from(form: &BillForm) -> CoreResult<Self> {
        validation::parse_form(form).map_err(CoreError::InvalidForm)
    }
}

impl TryFrom<BillForm> for BillingRequest {
    type Error = CoreError;

    fn try_from(form: BillForm) -> CoreResult<Self> {
        BillingRequest::try_from(&form)
    }
}

/// Accepts an amount written as a JSON string or number, keeping its text.
fn amount_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawAmount {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Option::<RawAmount>::deserialize(deserializer)? {
        Some(RawAmount::Text(text)) => text,
        Some(RawAmount::Number(number)) => number.to_string(),
        None => String::new(),
    })
}

//! # Application State
//!
//! What the bill screen knows between user actions, as an immutable value.
//! Every action is a pure transition returning the next state.
//!
//! ## Transitions
//! ```text
//!                 submit(valid form)
//!   ┌────────┐ ─────────────────────► ┌───────────┐  toggle_preview  ┌──────────┐
//!   │ Empty  │                        │ Submitted │ ◄──────────────► │Previewing│
//!   └────────┘ ◄───── (invalid) ───── └───────────┘                  └──────────┘
//!        ▲  toggle_preview: no-op           │ submit(valid form) replaces the
//!        └──────────────────────────────────┘ request, keeps the preview flag
//! ```

use chrono::NaiveDate;

use crate::error::FieldErrors;
use crate::form::BillForm;
use crate::preview::Preview;
use crate::types::BillingRequest;
use crate::validation;

/// State of the bill screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppState {
    submitted: Option<BillingRequest>,
    preview_visible: bool,
}

impl AppState {
    /// A fresh screen: nothing submitted, preview hidden.
    pub fn new() -> Self {
        AppState::default()
    }

    /// Validates a form and, on success, makes it the current request.
    ///
    /// On failure the current state is left as it was and every failing
    /// field is returned.
    pub fn submit(&self, form: &BillForm) -> Result<AppState, FieldErrors> {
        let request = validation::parse_form(form)?;
        Ok(AppState {
            submitted: Some(request),
            preview_visible: self.preview_visible,
        })
    }

    /// Shows or hides the preview.
    ///
    /// Does nothing until a request has been submitted.
    pub fn toggle_preview(&self) -> AppState {
        if !self.can_preview() {
            return self.clone();
        }
        AppState {
            submitted: self.submitted.clone(),
            preview_visible: !self.preview_visible,
        }
    }

    /// Whether the preview toggle is enabled.
    pub fn can_preview(&self) -> bool {
        self.submitted.is_some()
    }

    pub fn is_preview_visible(&self) -> bool {
        self.preview_visible
    }

    pub fn submitted(&self) -> Option<&BillingRequest> {
        self.submitted.as_ref()
    }

    /// The preview to show, recomputed from the current request.
    ///
    /// `None` while the preview is hidden or nothing is submitted.
    pub fn preview(&self, issued_on: NaiveDate) -> Option<Preview> {
        match (&self.submitted, self.preview_visible) {
            (Some(request), true) => Some(Preview::build(request, issued_on)),
            _ => None,
        }
    }
}

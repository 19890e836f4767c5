//! # Bill Preview
//!
//! Everything the printable bill shows, in reading order:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │ [Your Logo]                                   Vistara Studios   │  header
//! │                                                                 │
//! │ ISSUED TO:                         INVOICE NO: 9876543210       │  recipient
//! │ Asha Rao                           DATE: 19/10/2026             │  + invoice
//! │ 12 MG Road, Pune                                                │    metadata
//! │ 9876543210                                                      │
//! │                                                                 │
//! │ Event Name: Wedding                                             │  event
//! │ Event Venue: Lotus Hall                                         │
//! │ Event Date: 2024-11-02                                          │
//! │                                                                 │
//! │ Billing Details                                                 │  table
//! │ S.No  Description                 Amount                        │
//! │ ...                                                             │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

use chrono::NaiveDate;
use serde::Serialize;

use crate::invoice;
use crate::table;
use crate::types::{BillingRequest, Invoice, PresentationRow};
use crate::validation::EVENT_DATE_FORMAT;

/// Display format of the issue date.
pub const ISSUE_DATE_FORMAT: &str = "%d/%m/%Y";

/// A bill ready to be rendered.
///
/// Built fresh from a request each time; holds no references back to
/// application state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Preview {
    pub request: BillingRequest,
    pub invoice: Invoice,
    pub rows: Vec<PresentationRow>,

    /// Date the bill is generated on (not the event date).
    pub issued_on: NaiveDate,
}

impl Preview {
    /// Computes the invoice and table for a request.
    pub fn build(request: &BillingRequest, issued_on: NaiveDate) -> Self {
        let invoice = invoice::compute(&request.items);
        let rows = table::format(&request.items, &invoice);

        Preview {
            request: request.clone(),
            invoice,
            rows,
            issued_on,
        }
    }

    pub fn invoice_number(&self) -> &str {
        self.request.invoice_number()
    }

    /// Issue date as printed, e.g. `19/10/2026`.
    pub fn issue_date_label(&self) -> String {
        self.issued_on.format(ISSUE_DATE_FORMAT).to_string()
    }

    /// Event date as entered, e.g. `2024-11-02`.
    pub fn event_date_label(&self) -> String {
        self.request.event_date.format(EVENT_DATE_FORMAT).to_string()
    }

    /// Recipient block lines: name, address, phone.
    pub fn recipient_lines(&self) -> [&str; 3] {
        [
            self.request.name.as_str(),
            self.request.address.as_str(),
            self.request.phone.as_str(),
        ]
    }

    /// Event block lines.
    pub fn event_lines(&self) -> [String; 3] {
        [
            format!("Event Name: {}", self.request.event_name),
            format!("Event Venue: {}", self.request.event_venue),
            format!("Event Date: {}", self.event_date_label()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use crate::types::LineItem;

    fn request() -> BillingRequest {
        BillingRequest {
            name: "Asha Rao".to_string(),
            address: "12 MG Road, Pune".to_string(),
            phone: "9876543210".to_string(),
            event_date: NaiveDate::from_ymd_opt(2024, 11, 2).unwrap(),
            event_name: "Wedding".to_string(),
            event_venue: "Lotus Hall".to_string(),
            items: vec![
                LineItem::new("Camera", Money::from_rupees(100)).unwrap(),
                LineItem::new("Lens", Money::from_rupees(50)).unwrap(),
            ],
        }
    }

    #[test]
    fn test_build_computes_invoice_and_rows() {
        let issued_on = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        let preview = Preview::build(&request(), issued_on);

        assert_eq!(preview.invoice.total, Money::from_rupees(177));
        assert_eq!(preview.rows.len(), 5);
        assert_eq!(preview.invoice_number(), "9876543210");
        assert_eq!(preview.issue_date_label(), "19/10/2026");
    }

    #[test]
    fn test_text_blocks() {
        let issued_on = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
        let preview = Preview::build(&request(), issued_on);

        assert_eq!(
            preview.recipient_lines(),
            ["Asha Rao", "12 MG Road, Pune", "9876543210"]
        );
        assert_eq!(
            preview.event_lines(),
            [
                "Event Name: Wedding".to_string(),
                "Event Venue: Lotus Hall".to_string(),
                "Event Date: 2024-11-02".to_string(),
            ]
        );
        assert_eq!(preview.issue_date_label(), "05/01/2026");
    }

    #[test]
    fn test_rebuild_is_identical() {
        let issued_on = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        let req = request();
        assert_eq!(Preview::build(&req, issued_on), Preview::build(&req, issued_on));
    }
}

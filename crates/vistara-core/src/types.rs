//! # Domain Types
//!
//! Data contracts shared by every stage of the bill pipeline.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────────┐   │
//! │  │ BillingRequest  │   │    Invoice      │   │  PresentationRow    │   │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────────  │   │
//! │  │  payer details  │──►│  subtotal       │──►│  Item { index, .. } │   │
//! │  │  event details  │   │  tax_rate       │   │  Summary { kind,    │   │
//! │  │  items (≥ 1)    │   │  tax_amount     │   │    emphasized, .. } │   │
//! │  └─────────────────┘   │  total          │   └─────────────────────┘   │
//! │                        └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `BillingRequest` is immutable once built. `Invoice` and the row sequence
//! are derived from it on every request and never stored.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreResult, ValidationError};
use crate::money::Money;
use crate::MAX_ITEM_AMOUNT;

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000, so 1800 bps = 18% GST.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxRate(u32);

impl TaxRate {
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Percentage for labels: `18` for 1800 bps, `8.25` for 825 bps.
    pub fn percent_label(&self) -> String {
        let whole = self.0 / 100;
        let frac = self.0 % 100;
        if frac == 0 {
            whole.to_string()
        } else {
            format!("{}.{:02}", whole, frac)
                .trim_end_matches('0')
                .to_string()
        }
    }
}

// =============================================================================
// Line Item
// =============================================================================

/// A single billable entry. Order within a bill is significant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct LineItem {
    /// What is being billed, e.g. "Camera".
    pub description: String,

    /// Price of the entry. Positive for anything that passed validation.
    pub amount: Money,
}

impl LineItem {
    /// Creates a validated line item.
    ///
    /// The description must be non-blank and the amount positive and at
    /// most [`MAX_ITEM_AMOUNT`](crate::MAX_ITEM_AMOUNT).
    pub fn new(description: impl Into<String>, amount: Money) -> CoreResult<Self> {
        let description = description.into();
        if description.trim().is_empty() {
            return Err(ValidationError::Required {
                field: "description".to_string(),
            }
            .into());
        }
        if !amount.is_positive() {
            return Err(ValidationError::MustBePositive {
                field: "amount".to_string(),
            }
            .into());
        }
        if amount > MAX_ITEM_AMOUNT {
            return Err(ValidationError::TooLarge {
                field: "amount".to_string(),
                max: MAX_ITEM_AMOUNT,
            }
            .into());
        }
        Ok(LineItem {
            description,
            amount,
        })
    }
}

// =============================================================================
// Billing Request
// =============================================================================

/// A validated bill submission.
///
/// Built only through [`BillingRequest::try_from`] on a
/// [`BillForm`](crate::form::BillForm), so every instance satisfies the
/// form rules: non-empty text, a 10-digit phone, a real event date and at
/// least one positive line item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct BillingRequest {
    pub name: String,
    pub address: String,

    /// Exactly 10 ASCII digits. Doubles as the invoice number.
    pub phone: String,

    #[ts(as = "String")]
    pub event_date: NaiveDate,

    pub event_name: String,
    pub event_venue: String,

    /// Billed entries in the order they were entered.
    pub items: Vec<LineItem>,
}

impl BillingRequest {
    /// The invoice number printed on the bill.
    pub fn invoice_number(&self) -> &str {
        &self.phone
    }
}

// =============================================================================
// Invoice
// =============================================================================

/// Tax and totals derived from a list of line items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Invoice {
    /// Sum of all item amounts.
    pub subtotal: Money,

    /// Always [`GST_RATE`](crate::GST_RATE).
    pub tax_rate: TaxRate,

    /// `subtotal × tax_rate`, rounded to the paisa.
    pub tax_amount: Money,

    /// `subtotal + tax_amount`.
    pub total: Money,
}

// =============================================================================
// Presentation Rows
// =============================================================================

/// Which computed row a summary line is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum SummaryKind {
    /// Sum of item amounts.
    Total,

    /// The GST line.
    Gst,

    /// Grand total including GST.
    Final,
}

impl SummaryKind {
    /// Summary rows in the order they follow the item rows.
    pub const ORDER: [SummaryKind; 3] = [SummaryKind::Total, SummaryKind::Gst, SummaryKind::Final];

    /// Whether the row is drawn bold.
    ///
    /// `Final` is not emphasized. The bill has always looked like this;
    /// changing it is a product decision, and a test pins it.
    pub const fn emphasized(&self) -> bool {
        match self {
            SummaryKind::Total | SummaryKind::Gst => true,
            SummaryKind::Final => false,
        }
    }

    /// Row caption, e.g. `GST (18%)`.
    pub fn description(&self, rate: TaxRate) -> String {
        match self {
            SummaryKind::Total => "Total".to_string(),
            SummaryKind::Gst => format!("GST ({}%)", rate.percent_label()),
            SummaryKind::Final => "Final Amount".to_string(),
        }
    }
}

/// One row of the billing table.
///
/// ## Invariant
/// A formatted table is exactly N `Item` rows (N = number of line items)
/// followed by exactly three `Summary` rows: total, gst, final.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(tag = "type", rename_all = "camelCase")]
#[ts(export)]
pub enum PresentationRow {
    /// A line item. `index` is 1-based among item rows only.
    Item {
        index: usize,
        description: String,
        amount: Money,
    },

    /// A computed row. Summary rows carry no display index.
    Summary {
        kind: SummaryKind,
        description: String,
        amount: Money,
        emphasized: bool,
    },
}

impl PresentationRow {
    /// Serial number shown in the "S.No" column, if any.
    pub fn display_index(&self) -> Option<usize> {
        match self {
            PresentationRow::Item { index, .. } => Some(*index),
            PresentationRow::Summary { .. } => None,
        }
    }

    pub fn description(&self) -> &str {
        match self {
            PresentationRow::Item { description, .. }
            | PresentationRow::Summary { description, .. } => description,
        }
    }

    pub fn amount(&self) -> Money {
        match self {
            PresentationRow::Item { amount, .. } | PresentationRow::Summary { amount, .. } => {
                *amount
            }
        }
    }

    pub fn summary_kind(&self) -> Option<SummaryKind> {
        match self {
            PresentationRow::Summary { kind, .. } => Some(*kind),
            PresentationRow::Item { .. } => None,
        }
    }

    pub fn is_emphasized(&self) -> bool {
        matches!(self, PresentationRow::Summary { emphasized: true, .. })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CoreError;

    #[test]
    fn test_percent_label() {
        assert_eq!(TaxRate::from_bps(1800).percent_label(), "18");
        assert_eq!(TaxRate::from_bps(825).percent_label(), "8.25");
        assert_eq!(TaxRate::from_bps(1250).percent_label(), "12.5");
        assert_eq!(TaxRate::from_bps(0).percent_label(), "0");
    }

    #[test]
    fn test_line_item_new() {
        let item = LineItem::new("Camera", Money::from_rupees(100)).unwrap();
        assert_eq!(item.description, "Camera");

        assert!(matches!(
            LineItem::new("  ", Money::from_rupees(1)),
            Err(CoreError::Validation(ValidationError::Required { .. }))
        ));
        assert!(matches!(
            LineItem::new("Lens", Money::zero()),
            Err(CoreError::Validation(ValidationError::MustBePositive { .. }))
        ));
    }

    #[test]
    fn test_summary_descriptions() {
        let rate = TaxRate::from_bps(1800);
        assert_eq!(SummaryKind::Total.description(rate), "Total");
        assert_eq!(SummaryKind::Gst.description(rate), "GST (18%)");
        assert_eq!(SummaryKind::Final.description(rate), "Final Amount");
    }

    #[test]
    fn test_row_serialization_is_tagged() {
        let row = PresentationRow::Summary {
            kind: SummaryKind::Gst,
            description: "GST (18%)".to_string(),
            amount: Money::from_rupees(27),
            emphasized: true,
        };
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["type"], "summary");
        assert_eq!(json["kind"], "gst");
        assert_eq!(json["amount"], 2700);
        assert_eq!(json["emphasized"], true);
    }
}

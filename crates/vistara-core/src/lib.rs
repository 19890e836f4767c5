//! # vistara-core: Pure Business Logic for Vistara Bill
//!
//! This crate turns a bill form into a computed invoice and an ordered,
//! annotated table ready for rendering. Everything here is a pure function
//! with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Vistara Bill Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  Form UI / CLI (external)                       │   │
//! │  │       Bill form ──► Submit ──► Preview ──► Download PDF         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ vistara-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │validation │  │  invoice  │  │   table   │  │  session  │  │   │
//! │  │   │ BillForm  │  │  compute  │  │  format   │  │ AppState  │  │   │
//! │  │   │FieldErrors│  │  Invoice  │  │   Rows    │  │  Preview  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO CLOCK • NO RENDERING • PURE FUNCTIONS            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               vistara-export (Renderer + PDF)                   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Money type with integer arithmetic (paise, no floating point)
//! - [`types`] - Data contracts (LineItem, BillingRequest, Invoice, PresentationRow)
//! - [`form`] - Raw bill form as submitted by the user
//! - [`validation`] - Per-field validators and the form validator
//! - [`invoice`] - Line items → tax and totals
//! - [`table`] - Line items + invoice → presentation rows
//! - [`preview`] - Everything the printable bill shows
//! - [`session`] - Application state with pure transitions
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use vistara_core::{invoice, table, LineItem, Money};
//!
//! let items = vec![
//!     LineItem::new("Camera", Money::from_rupees(100)).unwrap(),
//!     LineItem::new("Lens", Money::from_rupees(50)).unwrap(),
//! ];
//!
//! let bill = invoice::compute(&items);
//! assert_eq!(bill.tax_amount, Money::from_rupees(27));
//! assert_eq!(bill.total, Money::from_rupees(177));
//!
//! let rows = table::format(&items, &bill);
//! assert_eq!(rows.len(), items.len() + 3);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod form;
pub mod invoice;
pub mod money;
pub mod preview;
pub mod session;
pub mod table;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, FieldErrors, ValidationError};
pub use form::{BillForm, ItemForm};
pub use money::Money;
pub use preview::Preview;
pub use session::AppState;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// GST applied to every bill, in basis points (18%).
///
/// Not user-configurable: every invoice the system produces uses this rate.
pub const GST_RATE: TaxRate = TaxRate::from_bps(1800);

/// Largest amount a single line item may carry (₹1,00,00,00,00,000).
///
/// Together with [`MAX_ITEMS`] this keeps every subtotal, tax and total
/// well inside `i64` paise.
pub const MAX_ITEM_AMOUNT: Money = Money::from_rupees(1_000_000_000_000);

/// Most line items one bill may carry.
pub const MAX_ITEMS: usize = 500;

/// Number of digits a phone number must have.
pub const PHONE_DIGITS: usize = 10;

/// Studio name printed in the bill header.
pub const STUDIO_NAME: &str = "Vistara Studios";

/// Text shown in the logo slot when no logo image is configured.
pub const LOGO_PLACEHOLDER: &str = "Your Logo";

/// Label above the recipient block.
pub const ISSUER_LABEL: &str = "ISSUED TO:";

/// Heading above the billing table.
pub const TABLE_TITLE: &str = "Billing Details";

/// File name every exported bill is delivered under.
pub const EXPORT_FILE_NAME: &str = "bill_preview.pdf";

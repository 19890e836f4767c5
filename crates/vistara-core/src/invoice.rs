//! # Invoice Computation
//!
//! Line items → subtotal, GST and grand total.
//!
//! ```text
//! items ──► Σ amount ──► subtotal ──► × 18% ──► tax_amount
//!                            │                      │
//!                            └────────── + ─────────┴──► total
//! ```
//!
//! Total over any input: an empty list yields an all-zero invoice rather
//! than an error, even though validated forms always carry one item.
//! Validated requests stay within [`MAX_ITEMS`](crate::MAX_ITEMS) items of
//! at most [`MAX_ITEM_AMOUNT`](crate::MAX_ITEM_AMOUNT), so the sums below
//! cannot overflow.

use crate::money::Money;
use crate::types::{Invoice, LineItem};
use crate::GST_RATE;

/// Computes the invoice for a list of line items.
///
/// Deterministic and side-effect free: the same items always produce the
/// same invoice.
///
/// ```rust
/// use vistara_core::{invoice, LineItem, Money};
///
/// let items = [LineItem::new("Camera", Money::from_rupees(100)).unwrap()];
/// let bill = invoice::compute(&items);
/// assert_eq!(bill.total, Money::from_rupees(118));
/// ```
pub fn compute(items: &[LineItem]) -> Invoice {
    let subtotal: Money = items.iter().map(|item| item.amount).sum();
    let tax_amount = subtotal.calculate_tax(GST_RATE);

    Invoice {
        subtotal,
        tax_rate: GST_RATE,
        tax_amount,
        total: subtotal + tax_amount,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn item(description: &str, rupees: i64) -> LineItem {
        LineItem {
            description: description.to_string(),
            amount: Money::from_rupees(rupees),
        }
    }

    #[test]
    fn test_camera_and_lens() {
        let bill = compute(&[item("Camera", 100), item("Lens", 50)]);

        assert_eq!(bill.subtotal, Money::from_rupees(150));
        assert_eq!(bill.tax_amount, Money::from_rupees(27));
        assert_eq!(bill.total, Money::from_rupees(177));
        assert_eq!(bill.tax_rate, GST_RATE);
    }

    #[test]
    fn test_empty_items_yield_zero_invoice() {
        let bill = compute(&[]);

        assert!(bill.subtotal.is_zero());
        assert!(bill.tax_amount.is_zero());
        assert!(bill.total.is_zero());
    }

    #[test]
    fn test_zero_amount_does_not_panic() {
        let bill = compute(&[item("Complimentary album", 0)]);
        assert!(bill.total.is_zero());
    }

    #[test]
    fn test_fractional_tax_rounds_to_paisa() {
        // ₹10.05 × 18% = 180.9 paise → 181 paise
        let items = [LineItem {
            description: "Prints".to_string(),
            amount: Money::from_paise(1005),
        }];
        let bill = compute(&items);
        assert_eq!(bill.tax_amount, Money::from_paise(181));
        assert_eq!(bill.total, Money::from_paise(1186));
    }

    #[test]
    fn test_largest_accepted_bill_does_not_overflow() {
        let items = vec![
            LineItem {
                description: "Drone".to_string(),
                amount: crate::MAX_ITEM_AMOUNT,
            };
            crate::MAX_ITEMS
        ];

        let bill = compute(&items);

        let subtotal = crate::MAX_ITEM_AMOUNT.paise() as i128 * crate::MAX_ITEMS as i128;
        assert_eq!(bill.subtotal.paise() as i128, subtotal);
        assert_eq!(bill.tax_amount.paise() as i128, subtotal * 18 / 100);
        assert_eq!(bill.total, bill.subtotal + bill.tax_amount);
        assert!(bill.total.is_positive());
    }

    proptest! {
        #[test]
        fn prop_totals_are_consistent(amounts in prop::collection::vec(1i64..10_000_000, 1..20)) {
            let items: Vec<LineItem> = amounts
                .iter()
                .map(|&paise| LineItem { description: "x".to_string(), amount: Money::from_paise(paise) })
                .collect();

            let bill = compute(&items);

            prop_assert_eq!(bill.subtotal.paise(), amounts.iter().sum::<i64>());
            prop_assert_eq!(bill.tax_amount, bill.subtotal.calculate_tax(GST_RATE));
            prop_assert_eq!(bill.total, bill.subtotal + bill.tax_amount);
            // determinism
            prop_assert_eq!(compute(&items), bill);
        }

        #[test]
        fn prop_whole_hundreds_tax_exactly(rupees in prop::collection::vec(1i64..100_000, 1..10)) {
            // Multiples of ₹100 make 18% exact in paise
            let items: Vec<LineItem> = rupees
                .iter()
                .map(|&r| LineItem { description: "x".to_string(), amount: Money::from_rupees(r * 100) })
                .collect();

            let bill = compute(&items);
            prop_assert_eq!(bill.tax_amount.paise() * 10_000, bill.subtotal.paise() * 1800);
        }
    }
}

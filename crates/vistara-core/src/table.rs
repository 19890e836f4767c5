//! # Table Formatting
//!
//! Combines line items and their invoice into the ordered row sequence the
//! renderer draws.
//!
//! ## Row Layout
//! ```text
//! ┌──────┬───────────────────┬──────────┐
//! │ S.No │ Description       │   Amount │
//! ├──────┼───────────────────┼──────────┤
//! │  1   │ Camera            │   100.00 │  Item
//! │  2   │ Lens              │    50.00 │  Item
//! │      │ **Total**         │   150.00 │  Summary(total, bold)
//! │      │ **GST (18%)**     │    27.00 │  Summary(gst, bold)
//! │      │ Final Amount      │   177.00 │  Summary(final)
//! └──────┴───────────────────┴──────────┘
//! ```

use crate::types::{Invoice, LineItem, PresentationRow, SummaryKind};

/// Formats items and their invoice into presentation rows.
///
/// Always returns `items.len() + 3` rows: one per item in input order,
/// then total, gst and final.
pub fn format(items: &[LineItem], invoice: &Invoice) -> Vec<PresentationRow> {
    let mut rows = Vec::with_capacity(items.len() + SummaryKind::ORDER.len());

    rows.extend(
        items
            .iter()
            .enumerate()
            .map(|(i, item)| PresentationRow::Item {
                index: i + 1,
                description: item.description.clone(),
                amount: item.amount,
            }),
    );

    rows.extend(SummaryKind::ORDER.iter().map(|&kind| {
        let amount = match kind {
            SummaryKind::Total => invoice.subtotal,
            SummaryKind::Gst => invoice.tax_amount,
            SummaryKind::Final => invoice.total,
        };
        PresentationRow::Summary {
            kind,
            description: kind.description(invoice.tax_rate),
            amount,
            emphasized: kind.emphasized(),
        }
    }));

    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::invoice;
    use crate::money::Money;
    use proptest::prelude::*;

    fn item(description: &str, rupees: i64) -> LineItem {
        LineItem {
            description: description.to_string(),
            amount: Money::from_rupees(rupees),
        }
    }

    #[test]
    fn test_camera_and_lens_rows() {
        let items = vec![item("Camera", 100), item("Lens", 50)];
        let rows = format(&items, &invoice::compute(&items));

        let summary = |kind, description: &str, rupees, emphasized| PresentationRow::Summary {
            kind,
            description: description.to_string(),
            amount: Money::from_rupees(rupees),
            emphasized,
        };

        assert_eq!(
            rows,
            vec![
                PresentationRow::Item {
                    index: 1,
                    description: "Camera".to_string(),
                    amount: Money::from_rupees(100),
                },
                PresentationRow::Item {
                    index: 2,
                    description: "Lens".to_string(),
                    amount: Money::from_rupees(50),
                },
                summary(SummaryKind::Total, "Total", 150, true),
                summary(SummaryKind::Gst, "GST (18%)", 27, true),
                summary(SummaryKind::Final, "Final Amount", 177, false),
            ]
        );
    }

    /// The final row is intentionally not bold. If this fails, make sure
    /// the style change was asked for.
    #[test]
    fn test_final_amount_row_is_not_emphasized() {
        let items = vec![item("Camera", 100)];
        let rows = format(&items, &invoice::compute(&items));

        let emphasis: Vec<_> = rows
            .iter()
            .filter_map(|row| row.summary_kind().map(|kind| (kind, row.is_emphasized())))
            .collect();

        assert_eq!(
            emphasis,
            vec![
                (SummaryKind::Total, true),
                (SummaryKind::Gst, true),
                (SummaryKind::Final, false),
            ]
        );
    }

    #[test]
    fn test_empty_items_still_get_summary_rows() {
        let rows = format(&[], &invoice::compute(&[]));

        assert_eq!(rows.len(), 3);
        assert!(rows.iter().all(|row| row.display_index().is_none()));
        assert!(rows.iter().all(|row| row.amount().is_zero()));
    }

    proptest! {
        #[test]
        fn prop_row_sequence_shape(amounts in prop::collection::vec(1i64..1_000_000, 0..30)) {
            let items: Vec<LineItem> = amounts
                .iter()
                .enumerate()
                .map(|(i, &paise)| LineItem { description: format!("item {i}"), amount: Money::from_paise(paise) })
                .collect();
            let rows = format(&items, &invoice::compute(&items));

            prop_assert_eq!(rows.len(), items.len() + 3);

            for (i, (row, item)) in rows.iter().zip(&items).enumerate() {
                prop_assert_eq!(row.display_index(), Some(i + 1));
                prop_assert_eq!(row.description(), item.description.as_str());
                prop_assert_eq!(row.amount(), item.amount);
            }

            let kinds: Vec<_> = rows[items.len()..].iter().map(|row| row.summary_kind()).collect();
            prop_assert_eq!(
                kinds,
                vec![Some(SummaryKind::Total), Some(SummaryKind::Gst), Some(SummaryKind::Final)]
            );
        }
    }
}

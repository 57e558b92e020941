//! Document aggregator: totals across a document's line items.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::PricingError;
use crate::line::{compute_line_raw, round2, LineItem, LineResult};

/// Aggregate money fields for a whole document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentTotals {
    pub subtotal: Decimal,
    pub total_discount: Decimal,
    pub net_amount: Decimal,
    pub total_vat: Decimal,
    pub grand_total: Decimal,
}

impl DocumentTotals {
    /// All-zero totals, the result for an empty document.
    pub fn zero() -> Self {
        Self {
            subtotal: round2(Decimal::ZERO),
            total_discount: round2(Decimal::ZERO),
            net_amount: round2(Decimal::ZERO),
            total_vat: round2(Decimal::ZERO),
            grand_total: round2(Decimal::ZERO),
        }
    }
}

/// What to do when a line fails validation during aggregation.
///
/// `Abort` is the default: partial totals for a financial document are unsafe
/// to present. `Skip` drops invalid lines and totals the rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvalidLinePolicy {
    #[default]
    Abort,
    Skip,
}

/// Total a document with the default abort policy.
pub fn compute_document_totals(items: &[LineItem]) -> Result<DocumentTotals, PricingError> {
    compute_document_totals_with_policy(items, InvalidLinePolicy::Abort)
}

/// Total a document, resumming unrounded per-line values and rounding each
/// aggregate field once after summation.
///
/// This is the live-preview computation: it recomputes from raw inputs rather
/// than resumming already-rounded stored line totals, so it can legitimately
/// differ from [`sum_posted_totals`] by sub-cent amounts.
pub fn compute_document_totals_with_policy(
    items: &[LineItem],
    policy: InvalidLinePolicy,
) -> Result<DocumentTotals, PricingError> {
    let mut subtotal = Decimal::ZERO;
    let mut total_discount = Decimal::ZERO;
    let mut net_amount = Decimal::ZERO;
    let mut total_vat = Decimal::ZERO;
    let mut grand_total = Decimal::ZERO;

    for (line, item) in items.iter().enumerate() {
        let raw = match compute_line_raw(item) {
            Ok(raw) => raw,
            Err(source) => match policy {
                InvalidLinePolicy::Abort => {
                    return Err(PricingError::InvalidDocument {
                        line,
                        source: Box::new(source),
                    })
                }
                InvalidLinePolicy::Skip => continue,
            },
        };

        subtotal += raw.subtotal;
        total_discount += raw.applied_discount;
        net_amount += raw.net_amount;
        total_vat += raw.applied_vat;
        grand_total += raw.line_total();
    }

    Ok(DocumentTotals {
        subtotal: round2(subtotal),
        total_discount: round2(total_discount),
        net_amount: round2(net_amount),
        total_vat: round2(total_vat),
        grand_total: round2(grand_total),
    })
}

/// Sum already-rounded line totals exactly as persisted.
///
/// Bit-for-bit reproducibility of stored figures takes precedence over
/// minimizing rounding error here, so this adds the 2-dp `line_total`s as-is.
pub fn sum_posted_totals<'a, I>(lines: I) -> Decimal
where
    I: IntoIterator<Item = &'a LineResult>,
{
    let mut total = round2(Decimal::ZERO);
    for line in lines {
        total += line.line_total;
    }
    total
}

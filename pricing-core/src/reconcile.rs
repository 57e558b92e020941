//! Stored-vs-recomputed consistency checks.
//!
//! Persisted money columns can silently go stale when a contributing field is
//! edited without a total refresh, and AI-extracted candidate values arrive
//! unverified. Both run through these checks before they are trusted.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::PricingError;
use crate::line::{compute_line, LineItem, LineResult};

/// The persisted computed columns for one document row.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StoredLine {
    pub discount_amount: Decimal,
    pub vat_amount: Decimal,
    pub line_total: Decimal,
}

/// One field whose stored value disagrees with its recomputation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDrift {
    pub field: String,
    pub stored: Decimal,
    pub computed: Decimal,
    /// `computed - stored`: the correction a refresh would apply.
    pub delta: Decimal,
}

/// Drift report for one line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineDrift {
    pub recomputed: LineResult,
    pub drifts: Vec<FieldDrift>,
}

impl LineDrift {
    pub fn is_consistent(&self) -> bool {
        self.drifts.is_empty()
    }
}

/// Recompute a line from its raw inputs and compare against the stored
/// computed columns. Comparison is exact after 2-dp rounding; one cent of
/// drift is reported, there is no tolerance.
pub fn verify_line(item: &LineItem, stored: &StoredLine) -> Result<LineDrift, PricingError> {
    let recomputed = compute_line(item)?;

    let mut drifts = Vec::new();
    let checks = [
        ("discount_amount", stored.discount_amount, recomputed.applied_discount),
        ("vat_amount", stored.vat_amount, recomputed.applied_vat),
        ("line_total", stored.line_total, recomputed.line_total),
    ];
    for (field, stored_value, computed_value) in checks {
        if stored_value != computed_value {
            drifts.push(FieldDrift {
                field: field.to_string(),
                stored: stored_value,
                computed: computed_value,
                delta: computed_value - stored_value,
            });
        }
    }

    Ok(LineDrift { recomputed, drifts })
}

/// Drift report for a whole document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentDrift {
    pub lines: Vec<LineDrift>,
    pub stored_grand_total: Decimal,
    /// Sum of the stored per-line totals, the figure the grand total column
    /// must reproduce bit-for-bit.
    pub posted_grand_total: Decimal,
    pub grand_total_consistent: bool,
}

impl DocumentDrift {
    pub fn is_consistent(&self) -> bool {
        self.grand_total_consistent && self.lines.iter().all(LineDrift::is_consistent)
    }
}

/// Verify every line of a document plus its stored grand total.
///
/// Takes (raw inputs, stored columns) pairs so line counts cannot disagree.
/// Any invalid line aborts with [`PricingError::InvalidDocument`].
pub fn verify_document(
    pairs: &[(LineItem, StoredLine)],
    stored_grand_total: Decimal,
) -> Result<DocumentDrift, PricingError> {
    let mut lines = Vec::with_capacity(pairs.len());
    for (index, (item, stored)) in pairs.iter().enumerate() {
        let drift = verify_line(item, stored).map_err(|source| PricingError::InvalidDocument {
            line: index,
            source: Box::new(source),
        })?;
        lines.push(drift);
    }

    let mut posted_grand_total = Decimal::ZERO;
    for (_, stored) in pairs {
        posted_grand_total += stored.line_total;
    }

    let grand_total_consistent = stored_grand_total == posted_grand_total;

    Ok(DocumentDrift {
        lines,
        stored_grand_total,
        posted_grand_total,
        grand_total_consistent,
    })
}

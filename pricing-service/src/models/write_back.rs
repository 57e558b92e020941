//! Write-back mapping onto the persisted document columns.

use pricing_core::{LineItem, LineResult};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The storage columns a document service persists for one line, named 1:1
/// after the table columns. `line_total` and `total_amount` are the same
/// figure; older tables use the latter name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredLineValues {
    pub quantity: Decimal,
    pub unit_cost: Option<Decimal>,
    pub unit_price: Option<Decimal>,
    pub discount_percentage: Decimal,
    pub discount_amount: Decimal,
    pub vat_percent: Decimal,
    pub vat_amount: Decimal,
    pub line_total: Decimal,
    pub total_amount: Decimal,
}

impl From<(&LineItem, &LineResult)> for StoredLineValues {
    fn from((item, result): (&LineItem, &LineResult)) -> Self {
        Self {
            quantity: item.quantity,
            unit_cost: item.unit_cost,
            unit_price: item.unit_price,
            discount_percentage: item.discount_percent.unwrap_or(Decimal::ZERO),
            discount_amount: result.applied_discount,
            vat_percent: item.vat_percent.unwrap_or(Decimal::ZERO),
            vat_amount: result.applied_vat,
            line_total: result.line_total,
            total_amount: result.line_total,
        }
    }
}

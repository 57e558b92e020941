//! PDF table mapping.
//!
//! The PDF renderer is a separate collaborator; this module only maps
//! computed lines into the fixed column layout it prints.

use pricing_core::{DocumentTotals, LineItem, LineResult};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Fixed column order for printed document tables.
pub const PDF_TABLE_HEADER: [&str; 9] = [
    "S/I",
    "Item Description",
    "Qty",
    "Unit Cost",
    "Disc %",
    "Disc Amt",
    "VAT %",
    "VAT Amt",
    "Total Amount",
];

/// One printed table row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PdfLineRow {
    pub serial: u32,
    pub description: String,
    pub quantity: Decimal,
    pub unit_cost: Decimal,
    pub discount_percent: Decimal,
    pub discount_amount: Decimal,
    pub vat_percent: Decimal,
    pub vat_amount: Decimal,
    pub total_amount: Decimal,
}

impl PdfLineRow {
    /// Map a computed line into its printed row. `serial` is 1-based.
    pub fn from_line(serial: u32, item: &LineItem, result: &LineResult) -> Self {
        Self {
            serial,
            description: item.description.clone(),
            quantity: item.quantity,
            unit_cost: result.effective_unit_price,
            discount_percent: item.discount_percent.unwrap_or(Decimal::ZERO),
            discount_amount: result.applied_discount,
            vat_percent: item.vat_percent.unwrap_or(Decimal::ZERO),
            vat_amount: result.applied_vat,
            total_amount: result.line_total,
        }
    }

    /// Cell values in header order.
    pub fn cells(&self) -> [String; 9] {
        [
            self.serial.to_string(),
            self.description.clone(),
            self.quantity.to_string(),
            self.unit_cost.to_string(),
            self.discount_percent.to_string(),
            self.discount_amount.to_string(),
            self.vat_percent.to_string(),
            self.vat_amount.to_string(),
            self.total_amount.to_string(),
        ]
    }
}

/// Document-level totals block printed under the table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PdfTotalsBlock {
    pub gross: Decimal,
    pub discount: Decimal,
    pub net: Decimal,
    pub vat: Decimal,
    pub total: Decimal,
}

impl From<&DocumentTotals> for PdfTotalsBlock {
    fn from(totals: &DocumentTotals) -> Self {
        Self {
            gross: totals.subtotal,
            discount: totals.total_discount,
            net: totals.net_amount,
            vat: totals.total_vat,
            total: totals.grand_total,
        }
    }
}

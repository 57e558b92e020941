//! Document type model.

use serde::{Deserialize, Serialize};

/// ERP document types whose line items share the pricing cascade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    Quotation,
    SalesOrder,
    Lpo,
    PurchaseInvoice,
}

impl DocumentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentKind::Quotation => "quotation",
            DocumentKind::SalesOrder => "sales_order",
            DocumentKind::Lpo => "lpo",
            DocumentKind::PurchaseInvoice => "purchase_invoice",
        }
    }

    pub fn from_string(s: &str) -> Self {
        match s {
            "sales_order" => DocumentKind::SalesOrder,
            "lpo" => DocumentKind::Lpo,
            "purchase_invoice" => DocumentKind::PurchaseInvoice,
            _ => DocumentKind::Quotation,
        }
    }

    /// Which pricing basis is authoritative for this document type. Customer
    /// documents price from a selling price (possibly derived via markup);
    /// procurement documents price from supplier cost.
    pub fn pricing_basis(&self) -> PricingBasis {
        match self {
            DocumentKind::Quotation | DocumentKind::SalesOrder => PricingBasis::Selling,
            DocumentKind::Lpo | DocumentKind::PurchaseInvoice => PricingBasis::Cost,
        }
    }
}

/// The field a document type expects its lines to be priced from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PricingBasis {
    Selling,
    Cost,
}

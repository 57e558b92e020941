//! Pricing and tax engine shared across ERP documents.
//!
//! Quotations, sales orders, supplier LPOs, and purchase invoices all price
//! their rows through the same cascade: quantity and a pricing basis (selling
//! price, or cost plus markup) produce a subtotal; an optional discount
//! (percentage authoritative over fixed amount) produces the net; optional
//! VAT (same precedence) produces the line total. This crate is the single
//! home for that cascade so previews, saves, and printed documents can never
//! disagree.
//!
//! Everything here is synchronous, side-effect-free, and safe to run from any
//! number of threads without coordination. Money is [`rust_decimal::Decimal`]
//! throughout, rounded to 2 decimal places only at the boundaries documented
//! on each operation.

pub mod document;
pub mod error;
pub mod line;
pub mod reconcile;

pub use document::{
    compute_document_totals, compute_document_totals_with_policy, sum_posted_totals,
    DocumentTotals, InvalidLinePolicy,
};
pub use error::PricingError;
pub use line::{compute_line, LineItem, LineResult};
pub use reconcile::{verify_document, verify_line, DocumentDrift, FieldDrift, LineDrift, StoredLine};

//! Data models for pricing-service.

pub mod document;
pub mod pdf;
pub mod write_back;

pub use document::{DocumentKind, PricingBasis};
pub use pdf::{PdfLineRow, PdfTotalsBlock, PDF_TABLE_HEADER};
pub use write_back::StoredLineValues;

//! Error types for the pricing engine.

use rust_decimal::Decimal;
use thiserror::Error;

/// Validation failures raised by the line calculator and document aggregator.
///
/// These are local input errors meant for inline display (a form field
/// message), not control flow. Zero quantities and zero prices are valid and
/// never error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PricingError {
    #[error("invalid quantity {0}: quantity cannot be negative")]
    InvalidQuantity(Decimal),

    #[error("invalid {field} {value}: monetary amounts cannot be negative")]
    InvalidPrice { field: &'static str, value: Decimal },

    #[error("invalid document: line {line}: {source}")]
    InvalidDocument {
        line: usize,
        #[source]
        source: Box<PricingError>,
    },
}

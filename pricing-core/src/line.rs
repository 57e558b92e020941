//! Line calculator: quantity, cost/markup or price, discount and VAT cascade.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::error::PricingError;

/// Monetary precision: 2 decimal places everywhere money is exposed.
pub(crate) const MONEY_DP: u32 = 2;

/// Round to 2 decimal places, midpoint away from zero, then rescale so the
/// value always serializes with exactly two decimals ("104.50", not "104.5").
pub(crate) fn round2(value: Decimal) -> Decimal {
    let mut rounded =
        value.round_dp_with_strategy(MONEY_DP, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(MONEY_DP);
    rounded
}

/// One row of a quotation, sales order, LPO, or purchase invoice.
///
/// Field names match the persisted storage columns so payloads round-trip
/// 1:1 through the document services. Exactly one pricing basis is expected
/// to resolve: a positive `unit_price`, or `unit_cost` plus `markup_percent`.
/// A line where both are absent or zero is a valid free-of-charge line.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LineItem {
    pub description: String,
    pub quantity: Decimal,
    pub unit_cost: Option<Decimal>,
    pub unit_price: Option<Decimal>,
    pub markup_percent: Option<Decimal>,
    /// Discount rate in [0,100]; out-of-range values are clamped, not rejected.
    #[serde(rename = "discount_percentage")]
    pub discount_percent: Option<Decimal>,
    pub discount_amount: Option<Decimal>,
    /// VAT rate; deliberately has no upper clamp (some regimes exceed 100%).
    pub vat_percent: Option<Decimal>,
    pub vat_amount: Option<Decimal>,
    pub notes: Option<String>,
}

/// Computed money fields for one line, each rounded to 2 decimals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineResult {
    pub effective_unit_price: Decimal,
    pub subtotal: Decimal,
    pub applied_discount: Decimal,
    pub net_amount: Decimal,
    pub applied_vat: Decimal,
    pub line_total: Decimal,
}

impl LineResult {
    /// A line that resolved to a zero effective unit price. Legal (promotional
    /// items) but usually a data-entry omission, so callers should flag it.
    pub fn is_free(&self) -> bool {
        self.effective_unit_price.is_zero()
    }
}

/// Unrounded intermediate values. The aggregator sums these and rounds once
/// at the end; `compute_line` rounds each field at its return boundary.
#[derive(Debug, Clone, Copy)]
pub(crate) struct RawLine {
    pub effective_unit_price: Decimal,
    pub subtotal: Decimal,
    pub applied_discount: Decimal,
    pub net_amount: Decimal,
    pub applied_vat: Decimal,
}

impl RawLine {
    pub(crate) fn line_total(&self) -> Decimal {
        self.net_amount + self.applied_vat
    }
}

pub(crate) fn compute_line_raw(item: &LineItem) -> Result<RawLine, PricingError> {
    if item.quantity < Decimal::ZERO {
        return Err(PricingError::InvalidQuantity(item.quantity));
    }
    let unit_cost = item.unit_cost.unwrap_or(Decimal::ZERO);
    if unit_cost < Decimal::ZERO {
        return Err(PricingError::InvalidPrice {
            field: "unit_cost",
            value: unit_cost,
        });
    }
    let unit_price = item.unit_price.unwrap_or(Decimal::ZERO);
    if unit_price < Decimal::ZERO {
        return Err(PricingError::InvalidPrice {
            field: "unit_price",
            value: unit_price,
        });
    }

    // An explicit positive selling price overrides the cost+markup derivation.
    let effective_unit_price = if unit_price > Decimal::ZERO {
        unit_price
    } else {
        let markup = item
            .markup_percent
            .unwrap_or(Decimal::ZERO)
            .max(Decimal::ZERO);
        unit_cost * (Decimal::ONE + markup / Decimal::ONE_HUNDRED)
    };

    let subtotal = item.quantity * effective_unit_price;

    // A positive percentage is authoritative over the fixed amount. The fixed
    // amount is capped at the subtotal so the line never nets below zero.
    let discount_percent = item.discount_percent.unwrap_or(Decimal::ZERO);
    let applied_discount = if discount_percent > Decimal::ZERO {
        subtotal * discount_percent.clamp(Decimal::ZERO, Decimal::ONE_HUNDRED)
            / Decimal::ONE_HUNDRED
    } else {
        item.discount_amount
            .unwrap_or(Decimal::ZERO)
            .max(Decimal::ZERO)
            .min(subtotal)
    };

    let net_amount = (subtotal - applied_discount).max(Decimal::ZERO);

    // Same precedence for VAT; the fixed amount is an absolute override with
    // no cap, and the percentage has no upper clamp.
    let vat_percent = item.vat_percent.unwrap_or(Decimal::ZERO);
    let applied_vat = if vat_percent > Decimal::ZERO {
        net_amount * vat_percent / Decimal::ONE_HUNDRED
    } else {
        item.vat_amount.unwrap_or(Decimal::ZERO).max(Decimal::ZERO)
    };

    Ok(RawLine {
        effective_unit_price,
        subtotal,
        applied_discount,
        net_amount,
        applied_vat,
    })
}

/// Price a single line.
///
/// Pure function: identical input yields bit-identical output. Fixed order of
/// operations: effective unit price, subtotal, discount, net, VAT, total.
pub fn compute_line(item: &LineItem) -> Result<LineResult, PricingError> {
    let raw = compute_line_raw(item)?;
    Ok(LineResult {
        effective_unit_price: round2(raw.effective_unit_price),
        subtotal: round2(raw.subtotal),
        applied_discount: round2(raw.applied_discount),
        net_amount: round2(raw.net_amount),
        applied_vat: round2(raw.applied_vat),
        line_total: round2(raw.line_total()),
    })
}

//! Line and document pricing handlers.
//!
//! Every call site that needs a total (live-preview forms, save-time
//! validation, document redisplay) goes through these two endpoints, so a
//! previewed total can never diverge from a persisted or printed one.

use axum::{extract::Json, http::StatusCode};
use chrono::{DateTime, Utc};
use pricing_core::{
    compute_document_totals_with_policy, compute_line, sum_posted_totals, DocumentTotals,
    InvalidLinePolicy, LineItem, LineResult, PricingError,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::models::{DocumentKind, PricingBasis, StoredLineValues};
use crate::services::metrics::{
    COMPUTE_DURATION, ERRORS_TOTAL, FREE_LINES_TOTAL, LINES_PRICED_TOTAL, PRICING_REQUESTS_TOTAL,
};

// ============================================================================
// Request/Response DTOs
// ============================================================================

/// Response for a single priced line.
#[derive(Debug, Serialize)]
pub struct PriceLineResponse {
    #[serde(flatten)]
    pub result: LineResult,
    /// Values mapped onto the persisted storage columns for write-back.
    pub write_back: StoredLineValues,
    pub free_of_charge: bool,
}

/// Request to price a whole document.
#[derive(Debug, Deserialize)]
pub struct PriceDocumentRequest {
    pub document_type: DocumentKind,
    #[serde(default)]
    pub items: Vec<LineItem>,
    #[serde(default)]
    pub on_invalid: InvalidLinePolicy,
}

/// One priced line within a document response.
#[derive(Debug, Serialize)]
pub struct PricedLine {
    pub index: usize,
    pub description: String,
    #[serde(flatten)]
    pub result: LineResult,
    pub write_back: StoredLineValues,
    pub free_of_charge: bool,
}

/// Response for a priced document.
#[derive(Debug, Serialize)]
pub struct PriceDocumentResponse {
    pub document_type: DocumentKind,
    /// Aggregates resummed from unrounded per-line values, rounded once.
    pub totals: DocumentTotals,
    /// Sum of the rounded per-line totals, the figure a persisted grand-total
    /// column must reproduce bit-for-bit.
    pub posted_total: Decimal,
    pub lines: Vec<PricedLine>,
    /// Indices dropped under the `skip` policy.
    pub skipped: Vec<usize>,
    pub warnings: Vec<String>,
    pub computed_utc: DateTime<Utc>,
}

// ============================================================================
// Handlers
// ============================================================================

/// Price one line item.
///
/// POST /v1/pricing/line
pub async fn price_line(
    Json(item): Json<LineItem>,
) -> Result<(StatusCode, Json<PriceLineResponse>), AppError> {
    let timer = COMPUTE_DURATION
        .with_label_values(&["price_line"])
        .start_timer();

    let result = compute_line(&item).map_err(|e| {
        PRICING_REQUESTS_TOTAL
            .with_label_values(&["price_line", "error"])
            .inc();
        ERRORS_TOTAL.with_label_values(&["validation"]).inc();
        AppError::ValidationError(e)
    })?;

    let free_of_charge = result.is_free();
    if free_of_charge {
        FREE_LINES_TOTAL.with_label_values(&["standalone"]).inc();
        tracing::warn!(description = %item.description, "Zero-priced line, flag for review");
    }

    PRICING_REQUESTS_TOTAL
        .with_label_values(&["price_line", "ok"])
        .inc();
    timer.observe_duration();

    let write_back = StoredLineValues::from((&item, &result));
    Ok((
        StatusCode::OK,
        Json(PriceLineResponse {
            result,
            write_back,
            free_of_charge,
        }),
    ))
}

/// Price a whole document.
///
/// POST /v1/pricing/document
pub async fn price_document(
    Json(req): Json<PriceDocumentRequest>,
) -> Result<(StatusCode, Json<PriceDocumentResponse>), AppError> {
    let timer = COMPUTE_DURATION
        .with_label_values(&["price_document"])
        .start_timer();

    let mut lines = Vec::with_capacity(req.items.len());
    let mut skipped = Vec::new();
    let mut warnings = Vec::new();

    for (index, item) in req.items.iter().enumerate() {
        let result = match compute_line(item) {
            Ok(result) => result,
            Err(source) => match req.on_invalid {
                InvalidLinePolicy::Abort => {
                    PRICING_REQUESTS_TOTAL
                        .with_label_values(&["price_document", "error"])
                        .inc();
                    ERRORS_TOTAL.with_label_values(&["validation"]).inc();
                    return Err(AppError::ValidationError(PricingError::InvalidDocument {
                        line: index,
                        source: Box::new(source),
                    }));
                }
                InvalidLinePolicy::Skip => {
                    tracing::warn!(line = index, error = %source, "Skipping invalid line");
                    skipped.push(index);
                    continue;
                }
            },
        };

        if result.is_free() {
            FREE_LINES_TOTAL
                .with_label_values(&[req.document_type.as_str()])
                .inc();
            warnings.push(format!(
                "line {index}: zero effective unit price, flag for review"
            ));
        }
        if let Some(warning) = basis_warning(req.document_type, index, item) {
            warnings.push(warning);
        }

        lines.push(PricedLine {
            index,
            description: item.description.clone(),
            write_back: StoredLineValues::from((item, &result)),
            free_of_charge: result.is_free(),
            result,
        });
    }

    // Invalid lines were already handled above, so this cannot abort now.
    let totals = compute_document_totals_with_policy(&req.items, req.on_invalid)?;
    let posted_total = sum_posted_totals(lines.iter().map(|l| &l.result));

    LINES_PRICED_TOTAL
        .with_label_values(&[req.document_type.as_str()])
        .inc_by(lines.len() as f64);
    PRICING_REQUESTS_TOTAL
        .with_label_values(&["price_document", "ok"])
        .inc();
    timer.observe_duration();

    tracing::info!(
        document_type = req.document_type.as_str(),
        lines = lines.len(),
        skipped = skipped.len(),
        grand_total = %totals.grand_total,
        "Document priced"
    );

    Ok((
        StatusCode::OK,
        Json(PriceDocumentResponse {
            document_type: req.document_type,
            totals,
            posted_total,
            lines,
            skipped,
            warnings,
            computed_utc: Utc::now(),
        }),
    ))
}

/// Warn when a line was not priced from the field that is authoritative for
/// its document type. The total is still computed; these are data-entry
/// review hints, not errors.
fn basis_warning(kind: DocumentKind, index: usize, item: &LineItem) -> Option<String> {
    let has_price = item.unit_price.is_some_and(|p| p > Decimal::ZERO);
    let has_cost = item.unit_cost.is_some_and(|c| c > Decimal::ZERO);
    match kind.pricing_basis() {
        PricingBasis::Selling if !has_price && has_cost => Some(format!(
            "line {index}: {} prices from unit_price; value derived from unit_cost + markup",
            kind.as_str()
        )),
        PricingBasis::Cost if has_price && !has_cost => Some(format!(
            "line {index}: {} prices from unit_cost; explicit unit_price used instead",
            kind.as_str()
        )),
        _ => None,
    }
}

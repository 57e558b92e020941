//! Stored-vs-recomputed reconciliation handler.
//!
//! Document services call this before trusting persisted totals after an
//! edit, and the AI document-extraction flow calls it to validate candidate
//! values pulled from uploaded PDFs.

use axum::{extract::Json, http::StatusCode};
use chrono::{DateTime, Utc};
use pricing_core::{verify_document, DocumentDrift, LineItem, StoredLine};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::models::DocumentKind;
use crate::services::metrics::{
    COMPUTE_DURATION, DRIFT_FIELDS_TOTAL, ERRORS_TOTAL, PRICING_REQUESTS_TOTAL,
};

/// One line plus the persisted computed columns to check it against.
#[derive(Debug, Deserialize)]
pub struct ReconcileLineRequest {
    #[serde(flatten)]
    pub item: LineItem,
    pub stored: StoredLine,
}

/// Request to reconcile a document against its stored figures.
#[derive(Debug, Deserialize)]
pub struct ReconcileDocumentRequest {
    pub document_type: DocumentKind,
    #[serde(default)]
    pub lines: Vec<ReconcileLineRequest>,
    pub stored_grand_total: Decimal,
}

/// Reconciliation report.
#[derive(Debug, Serialize)]
pub struct ReconcileDocumentResponse {
    pub document_type: DocumentKind,
    pub consistent: bool,
    #[serde(flatten)]
    pub report: DocumentDrift,
    pub checked_utc: DateTime<Utc>,
}

/// Reconcile stored totals against recomputation.
///
/// POST /v1/pricing/reconcile
pub async fn reconcile_document(
    Json(req): Json<ReconcileDocumentRequest>,
) -> Result<(StatusCode, Json<ReconcileDocumentResponse>), AppError> {
    let timer = COMPUTE_DURATION
        .with_label_values(&["reconcile"])
        .start_timer();

    let pairs: Vec<(LineItem, StoredLine)> = req
        .lines
        .into_iter()
        .map(|line| (line.item, line.stored))
        .collect();

    let report = verify_document(&pairs, req.stored_grand_total).map_err(|e| {
        PRICING_REQUESTS_TOTAL
            .with_label_values(&["reconcile", "error"])
            .inc();
        ERRORS_TOTAL.with_label_values(&["validation"]).inc();
        AppError::ValidationError(e)
    })?;

    for line in &report.lines {
        for drift in &line.drifts {
            DRIFT_FIELDS_TOTAL
                .with_label_values(&[drift.field.as_str()])
                .inc();
        }
    }
    if !report.grand_total_consistent {
        DRIFT_FIELDS_TOTAL.with_label_values(&["grand_total"]).inc();
    }

    let consistent = report.is_consistent();
    if !consistent {
        tracing::warn!(
            document_type = req.document_type.as_str(),
            drifting_lines = report
                .lines
                .iter()
                .filter(|l| !l.is_consistent())
                .count(),
            "Stored totals drifted from recomputation"
        );
    }

    PRICING_REQUESTS_TOTAL
        .with_label_values(&["reconcile", "ok"])
        .inc();
    timer.observe_duration();

    Ok((
        StatusCode::OK,
        Json(ReconcileDocumentResponse {
            document_type: req.document_type,
            consistent,
            report,
            checked_utc: Utc::now(),
        }),
    ))
}

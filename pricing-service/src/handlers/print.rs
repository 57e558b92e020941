//! Print-table mapping handler.

use axum::{extract::Json, http::StatusCode};
use pricing_core::{
    compute_document_totals, compute_line, LineItem, PricingError,
};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::models::{DocumentKind, PdfLineRow, PdfTotalsBlock, PDF_TABLE_HEADER};
use crate::services::metrics::{COMPUTE_DURATION, ERRORS_TOTAL, PRICING_REQUESTS_TOTAL};

/// Request to build the printable table for a document.
#[derive(Debug, Deserialize)]
pub struct PrintDocumentRequest {
    pub document_type: DocumentKind,
    #[serde(default)]
    pub items: Vec<LineItem>,
}

/// Printable table payload consumed by the PDF renderer.
#[derive(Debug, Serialize)]
pub struct PrintDocumentResponse {
    pub document_type: DocumentKind,
    pub header: Vec<String>,
    pub rows: Vec<PdfLineRow>,
    pub totals: PdfTotalsBlock,
}

/// Map a document into its fixed-column print table.
///
/// POST /v1/pricing/document/print
///
/// Printing an invalid document is never acceptable, so this always aborts on
/// the first invalid line.
pub async fn print_document(
    Json(req): Json<PrintDocumentRequest>,
) -> Result<(StatusCode, Json<PrintDocumentResponse>), AppError> {
    let timer = COMPUTE_DURATION
        .with_label_values(&["print_document"])
        .start_timer();

    let mut rows = Vec::with_capacity(req.items.len());
    for (index, item) in req.items.iter().enumerate() {
        let result = compute_line(item).map_err(|source| {
            PRICING_REQUESTS_TOTAL
                .with_label_values(&["print_document", "error"])
                .inc();
            ERRORS_TOTAL.with_label_values(&["validation"]).inc();
            AppError::ValidationError(PricingError::InvalidDocument {
                line: index,
                source: Box::new(source),
            })
        })?;
        rows.push(PdfLineRow::from_line(index as u32 + 1, item, &result));
    }

    let totals = compute_document_totals(&req.items)?;

    PRICING_REQUESTS_TOTAL
        .with_label_values(&["print_document", "ok"])
        .inc();
    timer.observe_duration();

    Ok((
        StatusCode::OK,
        Json(PrintDocumentResponse {
            document_type: req.document_type,
            header: PDF_TABLE_HEADER.iter().map(|h| h.to_string()).collect(),
            rows,
            totals: PdfTotalsBlock::from(&totals),
        }),
    ))
}

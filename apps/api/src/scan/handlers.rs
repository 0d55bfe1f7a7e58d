//! Axum route handlers for the Scan API.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::Serialize;
use serde_json::Value;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::scan::models::{ScanRequest, ScanResult};
use crate::scan::pipeline::{run_full_scan, run_scan};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ScanResponse {
    pub success: bool,
    pub scan_results: ScanResult,
    pub social_posts: Vec<Value>,
    pub email_body: String,
}

#[derive(Debug, Serialize)]
pub struct TestScanResponse {
    pub success: bool,
    pub test_business: ScanRequest,
    pub scan_results: ScanResult,
}

/// POST /api/scan
///
/// Full pipeline for one business: scan → social posts → email body.
/// The bearer token is checked by middleware before this runs.
pub async fn handle_scan(
    State(state): State<AppState>,
    payload: Result<Json<ScanRequest>, JsonRejection>,
) -> Result<Json<ScanResponse>, AppError> {
    let Json(request) = payload.map_err(|e| AppError::Validation(e.body_text()))?;
    let llm = state.model()?;
    let business = request.normalize()?;

    let scan_id = Uuid::new_v4();
    info!(%scan_id, "Starting scan for {} ({}, {})", business.business_name, business.industry, business.city);

    let outcome = run_full_scan(llm, &business).await?;

    info!(%scan_id, "Scan complete with {} social posts", outcome.social_posts.len());

    Ok(Json(ScanResponse {
        success: true,
        scan_results: outcome.scan,
        social_posts: outcome.social_posts,
        email_body: outcome.email_body,
    }))
}

/// POST /api/scan/test
///
/// Operator smoke test: runs the scan step against a built-in business.
/// No auth, no body.
pub async fn handle_scan_test(
    State(state): State<AppState>,
) -> Result<Json<TestScanResponse>, AppError> {
    let llm = state.model()?;
    let test_business = ScanRequest::sample();
    let business = test_business.normalize()?;

    info!("Running smoke-test scan for {}", business.business_name);
    let scan_results = run_scan(llm, &business).await?;

    Ok(Json(TestScanResponse {
        success: true,
        test_business,
        scan_results,
    }))
}

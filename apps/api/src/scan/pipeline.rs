//! Scan pipeline — format prompt → call model → extract JSON, twice.
//!
//! Flow: scan prompt → ScanResult → social prompt (seeded with the scan's
//!       overall score) → social posts → email HTML.
//!
//! The social call depends on the first call's score, so the two run
//! sequentially. Any failure aborts the whole scan; there is no partial result.

use serde_json::Value;
use tracing::info;

use crate::errors::AppError;
use crate::llm_client::{extract_json, GenerationConfig, ModelClient};
use crate::scan::email::render_email_html;
use crate::scan::models::{json_kind, BusinessProfile, ScanResult};
use crate::scan::prompts::{render_scan_prompt, render_social_prompt};

/// Score fed to the social prompt when the scan did not return a usable one.
pub const DEFAULT_SOCIAL_SCORE: i64 = 50;

pub const SCAN_GENERATION: GenerationConfig = GenerationConfig {
    model: None,
    temperature: 0.3,
    json_only: true,
};

pub const SOCIAL_GENERATION: GenerationConfig = GenerationConfig {
    model: None,
    temperature: 0.8,
    json_only: true,
};

/// Everything one full scan produces.
#[derive(Debug, Clone)]
pub struct ScanOutcome {
    pub scan: ScanResult,
    pub social_posts: Vec<Value>,
    pub email_body: String,
}

/// Runs the scan-analysis step only.
pub async fn run_scan(
    llm: &dyn ModelClient,
    business: &BusinessProfile,
) -> Result<ScanResult, AppError> {
    let prompt = render_scan_prompt(business);
    let raw = llm.generate(&prompt, &SCAN_GENERATION).await?;
    let value = extract_json(&raw)
        .map_err(|e| AppError::Parse(format!("scan response is not valid JSON: {e}")))?;
    ScanResult::from_value(value)
}

/// Generates social posts for a business at the given visibility score.
pub async fn run_social(
    llm: &dyn ModelClient,
    business: &BusinessProfile,
    score: i64,
) -> Result<Vec<Value>, AppError> {
    let prompt = render_social_prompt(business, score);
    let raw = llm.generate(&prompt, &SOCIAL_GENERATION).await?;
    let value = extract_json(&raw)
        .map_err(|e| AppError::Parse(format!("social response is not valid JSON: {e}")))?;

    match value {
        Value::Array(posts) => Ok(posts),
        other => Err(AppError::Parse(format!(
            "expected a JSON array of social posts, got {}",
            json_kind(&other)
        ))),
    }
}

/// Full pipeline: scan, then social posts, then the email body.
pub async fn run_full_scan(
    llm: &dyn ModelClient,
    business: &BusinessProfile,
) -> Result<ScanOutcome, AppError> {
    let scan = run_scan(llm, business).await?;

    let score = scan.overall_score().unwrap_or(DEFAULT_SOCIAL_SCORE);
    info!(
        "Scan scored {} ({}) for {}",
        score,
        scan.category(),
        business.business_name
    );

    let social_posts = run_social(llm, business, score).await?;
    let email_body = render_email_html(&business.business_name, &scan, &social_posts);

    Ok(ScanOutcome {
        scan,
        social_posts,
        email_body,
    })
}

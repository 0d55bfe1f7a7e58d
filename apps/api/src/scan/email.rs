//! HTML email summary of a scan.
//!
//! Pure and deterministic: no model call, and every field read goes through the
//! defaulting accessors on `ScanResult`, so a partial payload still renders.
//! maud escapes every interpolated value.

use maud::{html, Markup, DOCTYPE};
use serde_json::Value;

use crate::scan::models::{ScanResult, SocialPost};

const BODY_STYLE: &str = "font-family:Arial,Helvetica,sans-serif;color:#1f2937;max-width:640px;margin:0 auto;padding:24px";
const SCORE_BOX_STYLE: &str = "padding:16px;border-radius:8px;background:#f3f4f6;margin:16px 0";
const TABLE_STYLE: &str = "width:100%;border-collapse:collapse;margin:8px 0 16px";
const CELL_STYLE: &str = "padding:6px 8px;border-bottom:1px solid #e5e7eb;text-align:left";
const POST_STYLE: &str = "padding:12px;border-left:3px solid #2563eb;margin:12px 0;background:#f9fafb";
const MUTED_STYLE: &str = "color:#6b7280;font-size:13px";

/// Hex colour for the score badge.
fn score_color(score: i64) -> &'static str {
    match score {
        i64::MIN..=20 => "#b91c1c",
        21..=40 => "#c2410c",
        41..=60 => "#ca8a04",
        61..=80 => "#15803d",
        _ => "#1d4ed8",
    }
}

pub fn render_email_html(business_name: &str, scan: &ScanResult, social_posts: &[Value]) -> String {
    render_email(business_name, scan, social_posts).into_string()
}

fn render_email(business_name: &str, scan: &ScanResult, social_posts: &[Value]) -> Markup {
    let score = scan.overall_score().unwrap_or(0);
    let modules = scan.modules();
    let findings = scan.key_findings();
    let recommendations = scan.recommendations();
    let posts: Vec<SocialPost> = social_posts.iter().map(SocialPost::from_value).collect();

    html! {
        (DOCTYPE)
        html {
            head {
                meta charset="utf-8";
                title { "AI Visibility Report: " (business_name) }
            }
            body style=(BODY_STYLE) {
                h1 { "AI Visibility Report: " (business_name) }

                div style=(SCORE_BOX_STYLE) {
                    p style="margin:0;font-size:32px;font-weight:bold" {
                        span style={ "color:" (score_color(score)) } { (score) }
                        "/100"
                    }
                    p style="margin:4px 0 0;font-size:18px" { "Category: " strong { (scan.category()) } }
                }

                p { (scan.summary()) }

                @if !modules.is_empty() {
                    h2 { "Score Breakdown" }
                    table style=(TABLE_STYLE) {
                        tr {
                            th style=(CELL_STYLE) { "Module" }
                            th style=(CELL_STYLE) { "Score" }
                            th style=(CELL_STYLE) { "Strength" }
                        }
                        @for module in &modules {
                            tr {
                                td style=(CELL_STYLE) {
                                    (module.name)
                                    @for observation in &module.observations {
                                        br;
                                        span style=(MUTED_STYLE) { (observation) }
                                    }
                                }
                                td style=(CELL_STYLE) { (module.score) "/" (module.max_score) }
                                td style=(CELL_STYLE) { (module.strength) }
                            }
                        }
                    }
                }

                @if !findings.is_empty() {
                    h2 { "Key Findings" }
                    ul {
                        @for finding in &findings {
                            li { (finding) }
                        }
                    }
                }

                @if !recommendations.is_empty() {
                    h2 { "Recommendations" }
                    ol {
                        @for rec in &recommendations {
                            li style="margin-bottom:12px" {
                                strong { (rec.action) }
                                " (+" (rec.impact_points) " points)"
                                @if !rec.reasoning.is_empty() {
                                    br;
                                    span { (rec.reasoning) }
                                }
                                @if !rec.expected_outcome.is_empty() {
                                    br;
                                    em { "Expected outcome: " (rec.expected_outcome) }
                                }
                            }
                        }
                    }
                }

                @if !posts.is_empty() {
                    h2 { "Ready-to-Post Content" }
                    @for post in &posts {
                        div style=(POST_STYLE) {
                            strong { (post.topic) }
                            p style="margin:6px 0" { (post.text) }
                            p style=(MUTED_STYLE) {
                                "Best for: " (post.best_for) " · When: " (post.when_to_post)
                            }
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn scan(value: Value) -> ScanResult {
        ScanResult::from_value(value).unwrap()
    }

    #[test]
    fn test_empty_scan_still_renders_business_name() {
        let html = render_email_html("Denver Plumbing Pro", &ScanResult::default(), &[]);
        assert!(html.contains("Denver Plumbing Pro"));
        assert!(html.contains("0</span>/100"));
        assert!(html.contains("Category: <strong>N/A</strong>"));
    }

    #[test]
    fn test_renders_score_category_and_summary() {
        let result = scan(json!({
            "overall_score": 72,
            "category": "Strong",
            "summary": "Frequently recommended for emergency plumbing."
        }));
        let html = render_email_html("Denver Plumbing Pro", &result, &[]);
        assert!(html.contains(">72</span>/100"));
        assert!(html.contains("<strong>Strong</strong>"));
        assert!(html.contains("Frequently recommended for emergency plumbing."));
        assert!(!html.contains("Score Breakdown"));
    }

    #[test]
    fn test_renders_sections_when_present() {
        let result = scan(json!({
            "overall_score": 45,
            "modules": [{"name": "Review Signals", "score": 12, "max_score": 20, "strength": "moderate"}],
            "key_findings": ["Not cited by Perplexity"],
            "recommendations": [{"action": "Publish service-area pages", "impact_points": 9}]
        }));
        let posts = vec![json!({"topic": "Winter prep", "text": "Insulate your pipes"})];
        let html = render_email_html("Acme", &result, &posts);
        assert!(html.contains("Review Signals"));
        assert!(html.contains("12/20"));
        assert!(html.contains("Not cited by Perplexity"));
        assert!(html.contains("Publish service-area pages"));
        assert!(html.contains("(+9 points)"));
        assert!(html.contains("Insulate your pipes"));
    }

    #[test]
    fn test_inserted_values_are_escaped() {
        let result = scan(json!({"summary": "<script>alert(1)</script>"}));
        let html = render_email_html("Tom & Jerry's <Pipes>", &result, &[]);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("Tom &amp; Jerry"));
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let result = scan(json!({"overall_score": 10, "key_findings": ["a", "b"]}));
        assert_eq!(
            render_email_html("Acme", &result, &[]),
            render_email_html("Acme", &result, &[])
        );
    }

    #[test]
    fn test_score_color_bands() {
        assert_eq!(score_color(-5), "#b91c1c");
        assert_eq!(score_color(20), "#b91c1c");
        assert_eq!(score_color(55), "#ca8a04");
        assert_eq!(score_color(100), "#1d4ed8");
    }
}

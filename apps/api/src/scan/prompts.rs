// All LLM prompt templates for the scan pipeline.
// Placeholders are rendered with `llm_client::prompts::fill_template`.

use crate::llm_client::prompts::{fill_template, JSON_ONLY_INSTRUCTION};
use crate::scan::models::BusinessProfile;

/// Scan-analysis template.
/// Replace: {business_name}, {website_url}, {industry}, {city}, {state},
///          {google_rating}, {review_count}
pub const SCAN_PROMPT_TEMPLATE: &str = r#"You are an AI visibility analyst. Assess how likely AI assistants (ChatGPT, Gemini, Perplexity, Google AI Overviews) are to recommend the business below when a customer asks for a provider in its industry and area.

BUSINESS:
- Name: {business_name}
- Website: {website_url}
- Industry: {industry}
- Location: {city}, {state}
- Google rating: {google_rating}
- Google review count: {review_count}

Score AI visibility from 0 to 100 across these modules:
- "AI Search Presence" (max 25): how often the business is named in AI answers for local queries
- "Review Signals" (max 20): rating, review volume, recency
- "Website Authority" (max 20): crawlable content, structured data, clear service pages
- "Local Citations" (max 20): directory listings and NAP consistency
- "Content Depth" (max 15): answers to the questions customers actually ask

Return a JSON object with this EXACT schema:
{
  "overall_score": 0,
  "category": "Invisible | Weak | Moderate | Strong | Dominant",
  "summary": "Two or three sentences on the business's current AI visibility",
  "modules": [
    {
      "name": "AI Search Presence",
      "score": 0,
      "max_score": 25,
      "strength": "weak | moderate | strong",
      "observations": ["Specific, concrete observation"]
    }
  ],
  "key_findings": ["Most important finding first"],
  "recommendations": [
    {
      "action": "Concrete next step",
      "impact_points": 0,
      "reasoning": "Why this moves the score",
      "expected_outcome": "What changes for the business"
    }
  ]
}

CATEGORY must match overall_score: 0-20 Invisible, 21-40 Weak, 41-60 Moderate, 61-80 Strong, 81-100 Dominant.
Module scores must add up to overall_score. Give 3 to 5 recommendations ordered by impact_points."#;

/// Social-post template.
/// Replace: {business_name}, {industry}, {city}, {score}
pub const SOCIAL_PROMPT_TEMPLATE: &str = r#"You write social media posts for local businesses that want to be recommended by AI assistants.

Business: {business_name}
Industry: {industry}
City: {city}
Current AI visibility score: {score}/100

Write exactly 3 posts that build local authority and give AI assistants concrete facts to cite: services, neighborhoods served, seasonal tips, customer outcomes.

Return a JSON ARRAY of exactly 3 objects:
[
  {
    "topic": "Short topic label",
    "text": "Full post text, ready to publish",
    "best_for": "Facebook | Instagram | LinkedIn | Google Business Profile",
    "when_to_post": "Suggested day and time"
  }
]"#;

pub fn render_scan_prompt(business: &BusinessProfile) -> String {
    let review_count = business.review_count.to_string();
    let prompt = fill_template(
        SCAN_PROMPT_TEMPLATE,
        &[
            ("business_name", business.business_name.as_str()),
            ("website_url", business.website_url.as_str()),
            ("industry", business.industry.as_str()),
            ("city", business.city.as_str()),
            ("state", business.state.as_str()),
            ("google_rating", business.google_rating.as_str()),
            ("review_count", review_count.as_str()),
        ],
    );
    format!("{prompt}\n\n{JSON_ONLY_INSTRUCTION}")
}

pub fn render_social_prompt(business: &BusinessProfile, score: i64) -> String {
    let score = score.to_string();
    let prompt = fill_template(
        SOCIAL_PROMPT_TEMPLATE,
        &[
            ("business_name", business.business_name.as_str()),
            ("industry", business.industry.as_str()),
            ("city", business.city.as_str()),
            ("score", score.as_str()),
        ],
    );
    format!("{prompt}\n\n{JSON_ONLY_INSTRUCTION}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::models::ScanRequest;

    const PLACEHOLDERS: &[&str] = &[
        "{business_name}",
        "{website_url}",
        "{industry}",
        "{city}",
        "{state}",
        "{google_rating}",
        "{review_count}",
        "{score}",
    ];

    fn minimal_profile() -> BusinessProfile {
        ScanRequest {
            business_name: "Front Range Roofing".to_string(),
            website_url: None,
            industry: "Roofing".to_string(),
            city: "Fort Collins".to_string(),
            state: None,
            google_rating: None,
            review_count: None,
        }
        .normalize()
        .unwrap()
    }

    #[test]
    fn test_scan_prompt_has_no_unresolved_placeholders() {
        let prompt = render_scan_prompt(&minimal_profile());
        for placeholder in PLACEHOLDERS {
            assert!(!prompt.contains(placeholder), "left {placeholder} in prompt");
        }
    }

    #[test]
    fn test_social_prompt_has_no_unresolved_placeholders() {
        let prompt = render_social_prompt(&minimal_profile(), 50);
        for placeholder in PLACEHOLDERS {
            assert!(!prompt.contains(placeholder), "left {placeholder} in prompt");
        }
    }

    #[test]
    fn test_scan_prompt_shows_defaults_for_missing_fields() {
        let prompt = render_scan_prompt(&minimal_profile());
        assert!(prompt.contains("- Website: N/A"));
        assert!(prompt.contains("- Google rating: N/A"));
        assert!(prompt.contains("- Google review count: 0"));
        assert!(prompt.contains("- Location: Fort Collins, CO"));
    }

    #[test]
    fn test_scan_prompt_keeps_schema_keys() {
        let prompt = render_scan_prompt(&minimal_profile());
        for key in [
            "\"overall_score\"",
            "\"category\"",
            "\"summary\"",
            "\"modules\"",
            "\"key_findings\"",
            "\"recommendations\"",
        ] {
            assert!(prompt.contains(key), "missing {key}");
        }
        assert!(prompt.contains("Do NOT use markdown code fences"));
    }

    #[test]
    fn test_social_prompt_includes_score() {
        let prompt = render_social_prompt(&minimal_profile(), 37);
        assert!(prompt.contains("Current AI visibility score: 37/100"));
        assert!(prompt.contains("\"when_to_post\""));
    }

    #[test]
    fn test_field_values_cannot_inject_placeholders() {
        let mut profile = minimal_profile();
        profile.business_name = "{industry} & {score} LLC".to_string();
        let prompt = render_social_prompt(&profile, 10);
        assert!(prompt.contains("Business: {industry} & {score} LLC"));
    }
}

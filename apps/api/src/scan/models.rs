//! Request and result types for the visibility scan.
//!
//! The inbound `ScanRequest` is strictly typed. Everything the model sends back
//! is kept as loose JSON and read through defaulting accessors.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::AppError;

/// Display value substituted for optional fields the caller left out.
pub const NOT_AVAILABLE: &str = "N/A";
pub const DEFAULT_STATE: &str = "CO";

// ────────────────────────────────────────────────────────────────────────────
// Inbound request
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanRequest {
    pub business_name: String,
    #[serde(default)]
    pub website_url: Option<String>,
    pub industry: String,
    pub city: String,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub google_rating: Option<f64>,
    #[serde(default)]
    pub review_count: Option<u32>,
}

/// A validated business record with every optional field replaced by its
/// display value, ready for templating.
#[derive(Debug, Clone, PartialEq)]
pub struct BusinessProfile {
    pub business_name: String,
    pub website_url: String,
    pub industry: String,
    pub city: String,
    pub state: String,
    pub google_rating: String,
    pub review_count: u32,
}

impl ScanRequest {
    /// Built-in record used by the operator smoke test.
    pub fn sample() -> Self {
        ScanRequest {
            business_name: "Denver Plumbing Pro".to_string(),
            website_url: Some("https://example.com".to_string()),
            industry: "Plumbing".to_string(),
            city: "Denver".to_string(),
            state: Some("CO".to_string()),
            google_rating: Some(4.6),
            review_count: Some(47),
        }
    }

    /// Checks required fields and fills optional ones with display defaults.
    pub fn normalize(&self) -> Result<BusinessProfile, AppError> {
        let business_name = required("business_name", &self.business_name)?;
        let industry = required("industry", &self.industry)?;
        let city = required("city", &self.city)?;

        let google_rating = match self.google_rating {
            Some(rating) if !(0.0..=5.0).contains(&rating) => {
                return Err(AppError::Validation(format!(
                    "google_rating must be between 0 and 5, got {rating}"
                )));
            }
            Some(rating) => rating.to_string(),
            None => NOT_AVAILABLE.to_string(),
        };

        Ok(BusinessProfile {
            business_name,
            website_url: optional_or(self.website_url.as_deref(), NOT_AVAILABLE),
            industry,
            city,
            state: optional_or(self.state.as_deref(), DEFAULT_STATE),
            google_rating,
            review_count: self.review_count.unwrap_or(0),
        })
    }
}

fn required(field: &str, value: &str) -> Result<String, AppError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(AppError::Validation(format!("{field} cannot be empty")));
    }
    Ok(value.to_string())
}

fn optional_or(value: Option<&str>, default: &str) -> String {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => default.to_string(),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Model output
// ────────────────────────────────────────────────────────────────────────────

/// Scan payload as returned by the model.
///
/// Serialized back out unchanged. Accessors never assume a key is present or
/// correctly typed. `category` is an open string, not an enum: the model is
/// asked for Invisible/Weak/Moderate/Strong/Dominant but nothing enforces it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScanResult(Map<String, Value>);

#[derive(Debug, Clone, PartialEq)]
pub struct ScanModule {
    pub name: String,
    pub score: i64,
    pub max_score: i64,
    pub strength: String,
    pub observations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Recommendation {
    pub action: String,
    pub impact_points: i64,
    pub reasoning: String,
    pub expected_outcome: String,
}

impl ScanResult {
    pub fn from_value(value: Value) -> Result<Self, AppError> {
        match value {
            Value::Object(map) => Ok(ScanResult(map)),
            other => Err(AppError::Parse(format!(
                "expected a JSON object for scan results, got {}",
                json_kind(&other)
            ))),
        }
    }

    pub fn overall_score(&self) -> Option<i64> {
        self.0.get("overall_score").and_then(as_int)
    }

    pub fn category(&self) -> String {
        text_or(self.0.get("category"), NOT_AVAILABLE)
    }

    pub fn summary(&self) -> String {
        text_or(self.0.get("summary"), "")
    }

    pub fn modules(&self) -> Vec<ScanModule> {
        objects(self.0.get("modules"))
            .map(|m| ScanModule {
                name: text_or(m.get("name"), NOT_AVAILABLE),
                score: m.get("score").and_then(as_int).unwrap_or(0),
                max_score: m.get("max_score").and_then(as_int).unwrap_or(0),
                strength: text_or(m.get("strength"), ""),
                observations: string_list(m.get("observations")),
            })
            .collect()
    }

    pub fn key_findings(&self) -> Vec<String> {
        string_list(self.0.get("key_findings"))
    }

    pub fn recommendations(&self) -> Vec<Recommendation> {
        objects(self.0.get("recommendations"))
            .map(|r| Recommendation {
                action: text_or(r.get("action"), ""),
                impact_points: r.get("impact_points").and_then(as_int).unwrap_or(0),
                reasoning: text_or(r.get("reasoning"), ""),
                expected_outcome: text_or(r.get("expected_outcome"), ""),
            })
            .collect()
    }
}

/// One generated post. Built loosely from whatever the model returned.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SocialPost {
    pub topic: String,
    pub text: String,
    pub best_for: String,
    pub when_to_post: String,
}

impl SocialPost {
    pub fn from_value(value: &Value) -> Self {
        SocialPost {
            topic: text_or(value.get("topic"), ""),
            text: text_or(value.get("text"), ""),
            best_for: text_or(value.get("best_for"), ""),
            when_to_post: text_or(value.get("when_to_post"), ""),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Loose JSON accessors
// ────────────────────────────────────────────────────────────────────────────

fn as_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.round() as i64)),
        Value::String(s) => s.trim().parse::<f64>().ok().map(|f| f.round() as i64),
        _ => None,
    }
}

fn text_or(value: Option<&Value>, default: &str) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => default.to_string(),
        Some(other) => other.to_string(),
    }
}

fn objects(value: Option<&Value>) -> impl Iterator<Item = &Map<String, Value>> {
    value
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(Value::as_object)
}

/// Accepts either a list of strings or a single string.
fn string_list(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .filter(|v| !v.is_null())
            .map(|v| text_or(Some(v), ""))
            .collect(),
        Some(Value::String(s)) if !s.is_empty() => vec![s.clone()],
        _ => Vec::new(),
    }
}

pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn minimal_request() -> ScanRequest {
        serde_json::from_value(json!({
            "business_name": "Mile High Dental",
            "industry": "Dentistry",
            "city": "Boulder"
        }))
        .unwrap()
    }

    #[test]
    fn test_missing_optionals_get_display_defaults() {
        let profile = minimal_request().normalize().unwrap();
        assert_eq!(profile.website_url, "N/A");
        assert_eq!(profile.google_rating, "N/A");
        assert_eq!(profile.review_count, 0);
        assert_eq!(profile.state, "CO");
    }

    #[test]
    fn test_blank_state_falls_back_to_default() {
        let mut request = minimal_request();
        request.state = Some("  ".to_string());
        assert_eq!(request.normalize().unwrap().state, "CO");
    }

    #[test]
    fn test_sample_normalizes_verbatim() {
        let profile = ScanRequest::sample().normalize().unwrap();
        assert_eq!(profile.business_name, "Denver Plumbing Pro");
        assert_eq!(profile.website_url, "https://example.com");
        assert_eq!(profile.google_rating, "4.6");
        assert_eq!(profile.review_count, 47);
    }

    #[test]
    fn test_empty_required_field_is_rejected() {
        let mut request = minimal_request();
        request.city = "   ".to_string();
        let err = request.normalize().unwrap_err();
        assert!(matches!(err, AppError::Validation(msg) if msg.contains("city")));
    }

    #[test]
    fn test_rating_out_of_range_is_rejected() {
        let mut request = minimal_request();
        request.google_rating = Some(5.5);
        assert!(matches!(
            request.normalize(),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_negative_review_count_fails_to_deserialize() {
        let result = serde_json::from_value::<ScanRequest>(json!({
            "business_name": "A",
            "industry": "B",
            "city": "C",
            "review_count": -3
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_scan_result_rejects_non_object() {
        assert!(matches!(
            ScanResult::from_value(json!([1, 2])),
            Err(AppError::Parse(_))
        ));
    }

    #[test]
    fn test_scan_result_accessors_default_on_empty() {
        let scan = ScanResult::default();
        assert_eq!(scan.overall_score(), None);
        assert_eq!(scan.category(), "N/A");
        assert_eq!(scan.summary(), "");
        assert!(scan.modules().is_empty());
        assert!(scan.key_findings().is_empty());
        assert!(scan.recommendations().is_empty());
    }

    #[test]
    fn test_scan_result_reads_loose_types() {
        let scan = ScanResult::from_value(json!({
            "overall_score": "71",
            "category": "Mostly Strong",
            "modules": [
                {"name": "Reviews", "score": 14.6, "max_score": 20, "observations": "Steady volume"},
                "not an object",
                {"score": null}
            ],
            "key_findings": ["Listed on Yelp", null, 3],
            "recommendations": [{"action": "Add FAQ schema", "impact_points": 8}]
        }))
        .unwrap();

        assert_eq!(scan.overall_score(), Some(71));
        assert_eq!(scan.category(), "Mostly Strong");

        let modules = scan.modules();
        assert_eq!(modules.len(), 2);
        assert_eq!(modules[0].score, 15);
        assert_eq!(modules[0].observations, vec!["Steady volume".to_string()]);
        assert_eq!(modules[1].name, "N/A");
        assert_eq!(modules[1].score, 0);

        assert_eq!(scan.key_findings(), vec!["Listed on Yelp", "3"]);
        let recs = scan.recommendations();
        assert_eq!(recs[0].impact_points, 8);
        assert_eq!(recs[0].reasoning, "");
    }

    #[test]
    fn test_scan_result_serializes_unchanged() {
        let payload = json!({"overall_score": 40, "extra": {"kept": true}});
        let scan = ScanResult::from_value(payload.clone()).unwrap();
        assert_eq!(serde_json::to_value(&scan).unwrap(), payload);
    }

    #[test]
    fn test_social_post_from_partial_value() {
        let post = SocialPost::from_value(&json!({"topic": "Winter prep", "text": "Insulate pipes"}));
        assert_eq!(post.topic, "Winter prep");
        assert_eq!(post.best_for, "");
    }
}

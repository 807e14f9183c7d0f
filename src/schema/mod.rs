//! Response schema validation.
//!
//! A detection endpoint that answers 200 can still return a body with the
//! wrong shape. [`validate_response`] checks a parsed JSON object against the
//! expected detection schema and produces a [`SchemaReport`]: an ordered list
//! of human-readable warnings plus a validity flag. Only a missing required
//! field makes the report invalid; everything else — bad enum values, an
//! out-of-range confidence, unexpected extras — is a warning that annotates
//! the response without rejecting it.
//!
//! The checks run in a fixed order and never short-circuit, so a judge sees
//! every deviation in one pass.

use serde_json::{Map, Value};

use crate::types::{supported_codes, Language};

/// Fields every detection response must carry.
pub const REQUIRED_FIELDS: [&str; 4] = ["status", "classification", "confidence", "explanation"];

/// Fields a detection response may carry without comment.
pub const OPTIONAL_FIELDS: [&str; 2] = ["language", "processing_time_ms"];

/// Superseded by `classification`; tolerated for backward compatibility.
pub const DEPRECATED_RESULT_FIELD: &str = "result";

/// Allowed values for the `status` field.
pub const VALID_STATUS: [&str; 2] = ["success", "error"];

/// Allowed values for the `classification` field.
pub const VALID_CLASSIFICATIONS: [&str; 3] = ["AI_GENERATED", "HUMAN", "UNKNOWN"];

/// Outcome of checking one response body against the detection schema.
///
/// Derived purely from the parsed body; immutable once produced.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct SchemaReport {
    /// False only when at least one required field is missing.
    pub is_valid: bool,
    /// Deviations from the expected shape, in evaluation order.
    pub warnings: Vec<String>,
}

impl SchemaReport {
    /// True when the body is valid and produced no warnings at all.
    pub fn is_clean(&self) -> bool {
        self.is_valid && self.warnings.is_empty()
    }
}

/// Checks `response` against the expected detection response schema.
///
/// The caller is responsible for ensuring the body parsed as a JSON object
/// before invoking this; see `TestReport::response_object`.
pub fn validate_response(response: &Map<String, Value>) -> SchemaReport {
    let mut warnings = Vec::new();
    let mut is_valid = true;

    for field in REQUIRED_FIELDS {
        if !response.contains_key(field) {
            warnings.push(format!("Missing required field: '{field}'"));
            is_valid = false;
        }
    }

    if let Some(status) = response.get("status") {
        if !has_allowed_value(status, &VALID_STATUS) {
            warnings.push(format!(
                "Invalid status value: '{}'. Expected one of: {}",
                display_value(status),
                VALID_STATUS.join(", ")
            ));
        }
    }

    if let Some(classification) = response.get("classification") {
        if !has_allowed_value(classification, &VALID_CLASSIFICATIONS) {
            warnings.push(format!(
                "Invalid classification value: '{}'. Expected one of: {}",
                display_value(classification),
                VALID_CLASSIFICATIONS.join(", ")
            ));
        }
    }

    if response.contains_key(DEPRECATED_RESULT_FIELD) && !response.contains_key("classification") {
        warnings.push(format!(
            "Using deprecated '{DEPRECATED_RESULT_FIELD}' field. Should use 'classification' instead."
        ));
    }

    if let Some(confidence) = response.get("confidence") {
        match coerce_confidence(confidence) {
            Some(value) if !(0.0..=1.0).contains(&value) => {
                warnings.push(format!(
                    "Confidence should be between 0 and 1, got: {value}"
                ));
            }
            Some(_) => {}
            None => {
                warnings.push(format!(
                    "Confidence should be a number, got: {}",
                    json_type_name(confidence)
                ));
            }
        }
    }

    if let Some(explanation) = response.get("explanation") {
        if is_blank(explanation) {
            warnings.push(
                "Explanation field is empty. Should provide reasoning for the classification."
                    .to_string(),
            );
        }
    }

    if let Some(language) = response.get("language") {
        let supported = language
            .as_str()
            .map_or(false, Language::is_supported);
        if !supported {
            warnings.push(format!(
                "Invalid language value: '{}'. Expected one of: {}",
                display_value(language),
                supported_codes().join(", ")
            ));
        }
    }

    let mut extras: Vec<&str> = response
        .keys()
        .map(String::as_str)
        .filter(|name| {
            !REQUIRED_FIELDS.contains(name)
                && !OPTIONAL_FIELDS.contains(name)
                && *name != DEPRECATED_RESULT_FIELD
        })
        .collect();
    if !extras.is_empty() {
        extras.sort_unstable();
        warnings.push(format!("Extra fields in response: {}", extras.join(", ")));
    }

    SchemaReport { is_valid, warnings }
}

/// Accepts JSON numbers and numeric strings; everything else is not a
/// confidence.
fn coerce_confidence(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    }
}

fn has_allowed_value(value: &Value, allowed: &[&str]) -> bool {
    value.as_str().map_or(false, |text| allowed.contains(&text))
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(text) => text.trim().is_empty(),
        _ => false,
    }
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap_or_default()
    }

    #[test]
    fn test_empty_response_is_invalid_with_four_warnings() {
        let report = validate_response(&Map::new());

        assert!(!report.is_valid);
        assert_eq!(report.warnings.len(), 4);
        assert_eq!(report.warnings[0], "Missing required field: 'status'");
        assert_eq!(
            report.warnings[1],
            "Missing required field: 'classification'"
        );
        assert_eq!(report.warnings[2], "Missing required field: 'confidence'");
        assert_eq!(report.warnings[3], "Missing required field: 'explanation'");
    }

    #[test]
    fn test_conforming_response_is_clean() {
        let body = object(json!({
            "status": "success",
            "classification": "AI_GENERATED",
            "confidence": 0.82,
            "explanation": "Spectral artifacts detected",
            "language": "en",
        }));

        let report = validate_response(&body);
        assert!(report.is_valid);
        assert!(report.warnings.is_empty());
        assert!(report.is_clean());
    }

    #[test]
    fn test_out_of_range_confidence_warns_but_stays_valid() {
        let body = object(json!({
            "status": "success",
            "classification": "AI_GENERATED",
            "confidence": 1.5,
            "explanation": "x",
        }));

        let report = validate_response(&body);
        assert!(report.is_valid);
        assert_eq!(
            report.warnings,
            vec!["Confidence should be between 0 and 1, got: 1.5".to_string()]
        );
    }

    #[test]
    fn test_bad_enum_values_warn() {
        let body = object(json!({
            "status": "partial",
            "classification": "ROBOT",
            "confidence": 0.5,
            "explanation": "x",
        }));

        let report = validate_response(&body);
        assert!(report.is_valid);
        assert_eq!(report.warnings.len(), 2);
        assert_eq!(
            report.warnings[0],
            "Invalid status value: 'partial'. Expected one of: success, error"
        );
        assert_eq!(
            report.warnings[1],
            "Invalid classification value: 'ROBOT'. Expected one of: AI_GENERATED, HUMAN, UNKNOWN"
        );
    }

    #[test]
    fn test_deprecated_result_field() {
        let with_both = object(json!({
            "status": "success",
            "classification": "HUMAN",
            "confidence": 0.9,
            "explanation": "x",
            "result": "HUMAN",
        }));
        assert!(validate_response(&with_both)
            .warnings
            .iter()
            .all(|w| !w.contains("deprecated")));

        let result_only = object(json!({
            "status": "success",
            "confidence": 0.9,
            "explanation": "x",
            "result": "HUMAN",
        }));
        let report = validate_response(&result_only);
        assert!(!report.is_valid); // classification is still missing
        assert!(report
            .warnings
            .contains(&"Using deprecated 'result' field. Should use 'classification' instead.".to_string()));
    }

    #[test]
    fn test_confidence_coercion() {
        let numeric_string = object(json!({
            "status": "success",
            "classification": "HUMAN",
            "confidence": "0.9",
            "explanation": "x",
        }));
        assert!(validate_response(&numeric_string).is_clean());

        let word = object(json!({
            "status": "success",
            "classification": "HUMAN",
            "confidence": "high",
            "explanation": "x",
        }));
        assert_eq!(
            validate_response(&word).warnings,
            vec!["Confidence should be a number, got: string".to_string()]
        );

        let flag = object(json!({
            "status": "success",
            "classification": "HUMAN",
            "confidence": true,
            "explanation": "x",
        }));
        assert_eq!(
            validate_response(&flag).warnings,
            vec!["Confidence should be a number, got: boolean".to_string()]
        );
    }

    #[test]
    fn test_blank_explanation_warns() {
        let body = object(json!({
            "status": "success",
            "classification": "HUMAN",
            "confidence": 0.4,
            "explanation": "   ",
        }));

        let report = validate_response(&body);
        assert!(report.is_valid);
        assert_eq!(
            report.warnings,
            vec![
                "Explanation field is empty. Should provide reasoning for the classification."
                    .to_string()
            ]
        );
    }

    #[test]
    fn test_unknown_language_warns() {
        let body = object(json!({
            "status": "success",
            "classification": "HUMAN",
            "confidence": 0.4,
            "explanation": "x",
            "language": "fr",
        }));

        let report = validate_response(&body);
        assert!(report.is_valid);
        assert_eq!(
            report.warnings,
            vec!["Invalid language value: 'fr'. Expected one of: auto, en, hi, ta, ml, te".to_string()]
        );
    }

    #[test]
    fn test_extra_fields_listed_sorted() {
        let body = object(json!({
            "status": "success",
            "classification": "HUMAN",
            "confidence": 0.4,
            "explanation": "x",
            "processing_time_ms": 12,
            "zeta": 1,
            "alpha": 2,
        }));

        let report = validate_response(&body);
        assert!(report.is_valid);
        assert_eq!(
            report.warnings,
            vec!["Extra fields in response: alpha, zeta".to_string()]
        );
    }

    #[test]
    fn test_warnings_accumulate_in_evaluation_order() {
        let body = object(json!({
            "status": "partial",
            "confidence": 2.0,
            "explanation": " ",
            "language": "xx",
            "result": "HUMAN",
            "debug": true,
        }));

        let report = validate_response(&body);
        assert!(!report.is_valid);
        assert_eq!(report.warnings.len(), 7);
        assert!(report.warnings[0].starts_with("Missing required field: 'classification'"));
        assert!(report.warnings[1].starts_with("Invalid status value"));
        assert!(report.warnings[2].starts_with("Using deprecated"));
        assert!(report.warnings[3].starts_with("Confidence should be between"));
        assert!(report.warnings[4].starts_with("Explanation field is empty"));
        assert!(report.warnings[5].starts_with("Invalid language value"));
        assert_eq!(report.warnings[6], "Extra fields in response: debug");
    }

    #[test]
    fn test_validation_is_pure() {
        let body = object(json!({
            "status": "success",
            "classification": "UNKNOWN",
            "confidence": 0.1,
            "explanation": "faint artifacts",
            "surplus": 1,
        }));

        let first = validate_response(&body);
        let second = validate_response(&body);
        assert_eq!(first, second);
    }
}

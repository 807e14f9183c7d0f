//! Observability utilities.
//!
//! Structured logging initialization plus credential redaction for anything
//! the tool logs or hands to the presentation layer. Request and report
//! details are safe to display; the credential never is, under either header
//! convention.

use std::collections::HashMap;

use tracing_subscriber::EnvFilter;

use crate::auth::{API_KEY_HEADER, AUTHORIZATION_HEADER};

/// Mask shown wherever a credential value would appear.
pub const HIDDEN: &str = "[HIDDEN]";

/// Initialize the global tracing subscriber.
///
/// Call once at program startup. Safe to call multiple times (subsequent
/// calls are no-ops).
///
/// - `RUST_LOG` environment filter support, default level `voiceprobe=info`
/// - JSON output when `RUST_LOG_FORMAT=json`, human-readable otherwise
pub fn init() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("voiceprobe=info"));

    let is_json = std::env::var("RUST_LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false);

    if is_json {
        let _ = subscriber.json().try_init();
    } else {
        let _ = subscriber.try_init();
    }
}

/// Masks credentials embedded in free text.
///
/// Covers Bearer values and `api-key`-style assignments in any casing. Meant
/// for error strings and transport detail before they are logged or shown.
pub fn redact(text: &str) -> String {
    let patterns = [
        (r"Bearer [A-Za-z0-9._~+/=-]+", "Bearer [HIDDEN]"),
        (
            r#"(?i)(x-api-key["']?\s*[=:]\s*["']?)[^\s,}"']+"#,
            "${1}[HIDDEN]",
        ),
        (
            r#"(?i)(api[_-]?key["']?\s*[=:]\s*["']?)[^\s,}"']+"#,
            "${1}[HIDDEN]",
        ),
    ];

    let mut result = text.to_string();
    for (pattern, replacement) in patterns {
        if let Ok(re) = regex::Regex::new(pattern) {
            result = re.replace_all(&result, replacement).to_string();
        }
    }

    result
}

/// Returns a copy of `headers` safe to display: credential values masked,
/// everything else untouched.
pub fn redact_headers(headers: &HashMap<String, String>) -> HashMap<String, String> {
    headers
        .iter()
        .map(|(name, value)| {
            let lower = name.to_ascii_lowercase();
            let masked = if lower == AUTHORIZATION_HEADER.to_ascii_lowercase() {
                if value.starts_with("Bearer ") {
                    format!("Bearer {HIDDEN}")
                } else {
                    HIDDEN.to_string()
                }
            } else if lower == API_KEY_HEADER {
                HIDDEN.to_string()
            } else {
                value.clone()
            };
            (name.clone(), masked)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_does_not_panic() {
        init();
        init();
    }

    #[test]
    fn test_redact_bearer_values() {
        let redacted = redact("sending Authorization: Bearer judge_key_12345");
        assert!(!redacted.contains("judge_key_12345"));
        assert!(redacted.contains("Bearer [HIDDEN]"));
    }

    #[test]
    fn test_redact_api_key_assignments() {
        let redacted = redact("x-api-key: sk-aaa111");
        assert!(!redacted.contains("sk-aaa111"));

        let redacted = redact("retrying with api_key=sk-bbb222 next");
        assert!(!redacted.contains("sk-bbb222"));
        assert!(redacted.contains("[HIDDEN]"));
    }

    #[test]
    fn test_redact_leaves_plain_text_alone() {
        let text = "connection refused by 10.0.0.7:8080";
        assert_eq!(redact(text), text);
    }

    #[test]
    fn test_redact_headers_masks_both_conventions() {
        let mut headers = HashMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        headers.insert(
            AUTHORIZATION_HEADER.to_string(),
            "Bearer judge_key_123".to_string(),
        );
        headers.insert(API_KEY_HEADER.to_string(), "judge_key_123".to_string());

        let safe = redact_headers(&headers);

        assert_eq!(
            safe.get("Content-Type").map(String::as_str),
            Some("application/json")
        );
        assert_eq!(
            safe.get(AUTHORIZATION_HEADER).map(String::as_str),
            Some("Bearer [HIDDEN]")
        );
        assert_eq!(safe.get(API_KEY_HEADER).map(String::as_str), Some("[HIDDEN]"));
        assert!(!format!("{safe:?}").contains("judge_key_123"));
    }
}

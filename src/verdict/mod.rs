//! Status code interpretation.
//!
//! Maps the HTTP status of a probe into this tool's own judgment: did the
//! tested endpoint respond acceptably? Common codes get a hand-written
//! message a judge can act on; anything else falls back to range-based
//! classification. The mapping is total — every `u16`, including the 0
//! sentinel reported for pre-response failures, yields a defined triple.

use std::fmt;

use serde::Serialize;

/// The probe's judgment of a tested endpoint's HTTP answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Verdict {
    /// The endpoint responded acceptably.
    Pass,
    /// The endpoint responded with a recognized failure.
    Fail,
    /// The status falls outside every recognized range.
    Unknown,
}

impl Verdict {
    /// Display tag, upper-case by convention.
    pub fn as_str(self) -> &'static str {
        match self {
            Verdict::Pass => "PASS",
            Verdict::Fail => "FAIL",
            Verdict::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How loudly the presentation layer should surface a verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Render as a success.
    Success,
    /// Render as an error.
    Error,
    /// Render as a warning.
    Warning,
}

impl Severity {
    /// Display tag, lower-case by convention.
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Success => "success",
            Severity::Error => "error",
            Severity::Warning => "warning",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Verdict, human-readable message and display severity for one status code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusVerdict {
    /// PASS, FAIL or UNKNOWN.
    pub verdict: Verdict,
    /// What happened, phrased for a judge.
    pub message: String,
    /// Display severity.
    pub severity: Severity,
}

impl StatusVerdict {
    fn new(verdict: Verdict, message: impl Into<String>, severity: Severity) -> Self {
        Self {
            verdict,
            message: message.into(),
            severity,
        }
    }
}

/// Interprets `status_code` into a [`StatusVerdict`].
///
/// Codes a judge commonly sees carry tailored messages; the rest classify by
/// range. Anything outside the handled 2xx/4xx/5xx ranges — the 0 sentinel
/// included — comes back as [`Verdict::Unknown`] with [`Severity::Warning`].
pub fn interpret_status(status_code: u16) -> StatusVerdict {
    use Severity::{Error, Success, Warning};
    use Verdict::{Fail, Pass, Unknown};

    match status_code {
        200 => StatusVerdict::new(Pass, "Success - API responded correctly", Success),
        201 => StatusVerdict::new(Pass, "Created - Request processed", Success),
        400 => StatusVerdict::new(Fail, "Bad Request - Check your payload format", Error),
        401 => StatusVerdict::new(Fail, "Unauthorized - Invalid or missing API key", Error),
        403 => StatusVerdict::new(Fail, "Forbidden - API key lacks permissions", Error),
        404 => StatusVerdict::new(Fail, "Not Found - Wrong endpoint URL", Error),
        405 => StatusVerdict::new(Fail, "Method Not Allowed - Endpoint doesn't accept POST", Error),
        408 => StatusVerdict::new(Fail, "Request Timeout - API took too long", Warning),
        422 => StatusVerdict::new(Fail, "Unprocessable Entity - Invalid data format", Error),
        429 => StatusVerdict::new(Fail, "Too Many Requests - Rate limit exceeded", Warning),
        500 => StatusVerdict::new(Fail, "Internal Server Error - API crashed", Error),
        502 => StatusVerdict::new(Fail, "Bad Gateway - Server unreachable", Error),
        503 => StatusVerdict::new(Fail, "Service Unavailable - API is down", Error),
        504 => StatusVerdict::new(Fail, "Gateway Timeout - Server didn't respond", Error),
        200..=299 => StatusVerdict::new(Pass, format!("Success ({status_code})"), Success),
        400..=499 => StatusVerdict::new(Fail, format!("Client Error ({status_code})"), Error),
        500..=599 => StatusVerdict::new(Fail, format!("Server Error ({status_code})"), Error),
        _ => StatusVerdict::new(
            Unknown,
            format!("Unexpected status code: {status_code}"),
            Warning,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(200, Verdict::Pass, Severity::Success; "ok")]
    #[test_case(201, Verdict::Pass, Severity::Success; "created")]
    #[test_case(400, Verdict::Fail, Severity::Error; "bad request")]
    #[test_case(401, Verdict::Fail, Severity::Error; "unauthorized")]
    #[test_case(408, Verdict::Fail, Severity::Warning; "timeout")]
    #[test_case(429, Verdict::Fail, Severity::Warning; "rate limited")]
    #[test_case(503, Verdict::Fail, Severity::Error; "unavailable")]
    fn test_tabled_codes(code: u16, verdict: Verdict, severity: Severity) {
        let outcome = interpret_status(code);
        assert_eq!(outcome.verdict, verdict);
        assert_eq!(outcome.severity, severity);
    }

    #[test]
    fn test_range_fallbacks() {
        let no_content = interpret_status(204);
        assert_eq!(no_content.verdict, Verdict::Pass);
        assert_eq!(no_content.message, "Success (204)");

        let teapot = interpret_status(418);
        assert_eq!(teapot.verdict, Verdict::Fail);
        assert_eq!(teapot.message, "Client Error (418)");

        let bandwidth = interpret_status(509);
        assert_eq!(bandwidth.verdict, Verdict::Fail);
        assert_eq!(bandwidth.message, "Server Error (509)");
    }

    #[test_case(0; "pre-response sentinel")]
    #[test_case(999; "outside http ranges")]
    #[test_case(101; "informational")]
    fn test_unrecognized_codes_are_unknown(code: u16) {
        let outcome = interpret_status(code);
        assert_eq!(outcome.verdict, Verdict::Unknown);
        assert_eq!(outcome.severity, Severity::Warning);
        assert_eq!(outcome.message, format!("Unexpected status code: {code}"));
    }

    #[test]
    fn test_interpretation_is_pure() {
        assert_eq!(interpret_status(200), interpret_status(200));
        assert_eq!(interpret_status(0), interpret_status(0));
    }

    #[test]
    fn test_display_tags() {
        assert_eq!(Verdict::Pass.to_string(), "PASS");
        assert_eq!(Severity::Warning.to_string(), "warning");
    }
}

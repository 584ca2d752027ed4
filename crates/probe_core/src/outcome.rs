use std::fmt;

use crate::Variant;

pub const MISSING_BASE_URL: &str = "base URL not configured";
pub const FAILED_FETCH_HINT: &str =
    "Failed to fetch (often CORS or network). Check the request log and the server's CORS configuration.";
pub const GENERIC_FAILURE: &str = "Request failed";
pub const MINIMAL_FAILURE: &str = "Could not reach the backend.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    ConfigurationMissing,
    Transport,
    HttpStatus(u16),
    Unexpected,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::ConfigurationMissing => write!(f, "configuration missing"),
            FailureKind::Transport => write!(f, "transport failure"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Unexpected => write!(f, "unexpected failure"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeFailure {
    pub kind: FailureKind,
    pub detail: String,
}

impl ProbeFailure {
    pub fn configuration_missing() -> Self {
        Self {
            kind: FailureKind::ConfigurationMissing,
            detail: MISSING_BASE_URL.to_string(),
        }
    }

    pub fn http_status(status: u16) -> Self {
        Self {
            kind: FailureKind::HttpStatus(status),
            detail: format!("HTTP {status}"),
        }
    }

    /// Builds a failure from raw error text, swapping fetch-layer errors for a hint.
    pub fn from_error_text(kind: FailureKind, message: &str) -> Self {
        let detail = if message.to_lowercase().contains("failed to fetch") {
            FAILED_FETCH_HINT.to_string()
        } else if message.trim().is_empty() {
            GENERIC_FAILURE.to_string()
        } else {
            message.to_string()
        };
        Self { kind, detail }
    }

    /// Text shown in the error region for the given variant.
    pub fn display_text(&self, variant: Variant) -> &str {
        match variant {
            Variant::Verbose => &self.detail,
            Variant::Minimal => MINIMAL_FAILURE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    Success(String),
    Failure(ProbeFailure),
}

impl ProbeOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ProbeOutcome::Success(_))
    }
}

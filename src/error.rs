// Check failure taxonomy
use std::error::Error as _;
use thiserror::Error;

/// Why a single check failed. Every variant is converted into a failed
/// `CheckResult`; none of them aborts the run.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CheckError {
    // Timeout, connection refused, DNS failure. The report adds the
    // per-check prefix, see `CheckKind::transport_prefix`.
    #[error("{0}")]
    Transport(String),

    // Anything other than 200
    #[error("HTTP {code}: {body}")]
    Status { code: u16, body: String },

    // Body was not JSON, or not the expected shape
    #[error("Invalid payload: {0}")]
    Payload(String),

    // Well-formed JSON with an unexpected field value
    #[error("{message}")]
    Assertion {
        message: String,
        expected: Option<String>,
        actual: Option<String>,
    },
}

impl CheckError {
    pub fn transport(message: impl Into<String>) -> Self {
        CheckError::Transport(message.into())
    }

    pub fn status(code: u16, body: impl Into<String>) -> Self {
        CheckError::Status {
            code,
            body: body.into(),
        }
    }

    pub fn payload(message: impl Into<String>) -> Self {
        CheckError::Payload(message.into())
    }

    pub fn assertion(message: impl Into<String>) -> Self {
        CheckError::Assertion {
            message: message.into(),
            expected: None,
            actual: None,
        }
    }

    pub fn mismatch(
        message: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        CheckError::Assertion {
            message: message.into(),
            expected: Some(expected.into()),
            actual: Some(actual.into()),
        }
    }

    /// Short machine-readable tag used in the JSON report
    pub fn error_code(&self) -> &'static str {
        match self {
            CheckError::Transport(_) => "TRANSPORT",
            CheckError::Status { .. } => "HTTP_STATUS",
            CheckError::Payload(_) => "PAYLOAD",
            CheckError::Assertion { .. } => "ASSERTION",
        }
    }

    pub fn expected(&self) -> Option<&str> {
        match self {
            CheckError::Assertion { expected, .. } => expected.as_deref(),
            _ => None,
        }
    }

    pub fn actual(&self) -> Option<&str> {
        match self {
            CheckError::Assertion { actual, .. } => actual.as_deref(),
            _ => None,
        }
    }
}

/// Flatten a reqwest error and its source chain into one line, so a timeout
/// reads "... operation timed out" rather than just the request URL.
pub fn describe_transport(err: &reqwest::Error) -> String {
    let mut text = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let cause_text = cause.to_string();
        if !text.contains(&cause_text) {
            text.push_str(": ");
            text.push_str(&cause_text);
        }
        source = cause.source();
    }
    if err.is_timeout() && !text.to_lowercase().contains("timed out") {
        text.push_str(" (timed out)");
    }
    text
}

impl From<reqwest::Error> for CheckError {
    fn from(err: reqwest::Error) -> Self {
        CheckError::Transport(describe_transport(&err))
    }
}

impl From<serde_json::Error> for CheckError {
    fn from(err: serde_json::Error) -> Self {
        CheckError::Payload(err.to_string())
    }
}

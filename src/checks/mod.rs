//! The fixed set of smoke checks and the record each one produces.

pub mod connections;
pub mod health;

use serde::Serialize;
use serde_json::Value;

use crate::client::Probe;
use crate::config::SmokeConfig;
use crate::error::CheckError;

/// Outcome of one check invocation. Built once, never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckResult {
    pub name: String,
    pub success: bool,
    pub details: String,
    pub expected: String,
    pub actual: String,
    pub critical: bool,
    pub duration_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
}

impl CheckResult {
    pub fn passed(kind: CheckKind, details: impl Into<String>, duration_ms: u64) -> Self {
        Self {
            name: kind.name().to_string(),
            success: true,
            details: details.into(),
            expected: String::new(),
            actual: String::new(),
            critical: kind.is_critical(),
            duration_ms,
            error_code: None,
        }
    }

    pub fn failed(kind: CheckKind, error: &CheckError, duration_ms: u64) -> Self {
        Self {
            name: kind.name().to_string(),
            success: false,
            details: match error {
                CheckError::Transport(message) => format!("{}: {}", kind.transport_prefix(), message),
                _ => error.to_string(),
            },
            expected: error.expected().unwrap_or_default().to_string(),
            actual: error.actual().unwrap_or_default().to_string(),
            critical: kind.is_critical(),
            duration_ms,
            error_code: Some(error.error_code().to_string()),
        }
    }

    pub fn from_outcome(kind: CheckKind, outcome: &Result<String, CheckError>, duration_ms: u64) -> Self {
        match outcome {
            Ok(details) => Self::passed(kind, details.clone(), duration_ms),
            Err(e) => Self::failed(kind, e, duration_ms),
        }
    }
}

/// Every check the runner knows about, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckKind {
    GatewayHealth,
    BackendHealth,
    ScraperHealth,
    DatabaseStats,
    ModuleHealth,
    UnifiedListing,
}

impl CheckKind {
    pub const ALL: [CheckKind; 6] = [
        CheckKind::GatewayHealth,
        CheckKind::BackendHealth,
        CheckKind::ScraperHealth,
        CheckKind::DatabaseStats,
        CheckKind::ModuleHealth,
        CheckKind::UnifiedListing,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            CheckKind::GatewayHealth => "Backend Health Check",
            CheckKind::BackendHealth => "Node.js Backend Health",
            CheckKind::ScraperHealth => "Twitter Parser Health",
            CheckKind::DatabaseStats => "MongoDB Connection",
            CheckKind::ModuleHealth => "Connections Module Health",
            CheckKind::UnifiedListing => "Connections Unified API",
        }
    }

    /// Heading printed before the check runs
    pub fn section(&self) -> &'static str {
        match self {
            CheckKind::GatewayHealth => "Testing Python FastAPI Proxy...",
            CheckKind::BackendHealth => "Testing Node.js Fastify Backend...",
            CheckKind::ScraperHealth => "Testing Twitter Parser V2...",
            CheckKind::DatabaseStats => "Testing MongoDB Connection...",
            CheckKind::ModuleHealth => "Testing Connections Module...",
            CheckKind::UnifiedListing => "Testing Connections Unified API...",
        }
    }

    /// Leads the details line when the request never got a response
    pub fn transport_prefix(&self) -> &'static str {
        match self {
            CheckKind::GatewayHealth | CheckKind::BackendHealth | CheckKind::ScraperHealth => {
                "Connection error"
            }
            CheckKind::DatabaseStats | CheckKind::ModuleHealth | CheckKind::UnifiedListing => {
                "Request error"
            }
        }
    }

    /// A failing critical check escalates the exit status to `Critical`
    pub fn is_critical(&self) -> bool {
        matches!(
            self,
            CheckKind::GatewayHealth
                | CheckKind::BackendHealth
                | CheckKind::ScraperHealth
                | CheckKind::DatabaseStats
        )
    }

    /// Perform the request and judge the body. Returns the success detail text.
    pub async fn execute(&self, probe: &Probe, config: &SmokeConfig) -> Result<String, CheckError> {
        match self {
            CheckKind::GatewayHealth => health::gateway(probe, config).await,
            CheckKind::BackendHealth => health::backend(probe, config).await,
            CheckKind::ScraperHealth => health::scraper(probe, config).await,
            CheckKind::DatabaseStats => connections::stats(probe, config).await,
            CheckKind::ModuleHealth => connections::module_health(probe, config).await,
            CheckKind::UnifiedListing => connections::unified(probe, config).await,
        }
    }
}

/// `true` only for a JSON boolean `true`; `1` or `"true"` do not count
pub(crate) fn flag_is_true(body: &Value, key: &str) -> bool {
    body.get(key).and_then(Value::as_bool) == Some(true)
}

pub(crate) fn str_field<'a>(body: &'a Value, key: &str) -> Option<&'a str> {
    body.get(key).and_then(Value::as_str)
}

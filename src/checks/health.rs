use serde_json::Value;

use super::{flag_is_true, str_field};
use crate::client::{endpoint, Probe};
use crate::config::{ExpectConfig, SmokeConfig};
use crate::error::CheckError;

pub async fn gateway(probe: &Probe, config: &SmokeConfig) -> Result<String, CheckError> {
    let url = endpoint(&config.endpoints.gateway_url, "/api/health");
    let body = probe.get_json(&url, config.http.timeout()).await?;
    evaluate_gateway(&body, &config.expect)
}

pub async fn backend(probe: &Probe, config: &SmokeConfig) -> Result<String, CheckError> {
    let url = endpoint(&config.endpoints.backend_url, "/api/health");
    let body = probe.get_json(&url, config.http.timeout()).await?;
    evaluate_backend(&body)
}

pub async fn scraper(probe: &Probe, config: &SmokeConfig) -> Result<String, CheckError> {
    let url = endpoint(&config.endpoints.scraper_url, "/health");
    let body = probe.get_json(&url, config.http.timeout()).await?;
    evaluate_scraper(&body, &config.expect)
}

/// Gateway must identify itself, report `ok`, and see its backend as connected.
pub fn evaluate_gateway(body: &Value, expect: &ExpectConfig) -> Result<String, CheckError> {
    let identified = str_field(body, "service") == Some(expect.gateway_service.as_str())
        && str_field(body, "status") == Some("ok");
    if !identified {
        return Err(CheckError::assertion(format!("Invalid response structure: {}", body)));
    }

    match body.get("node_backend") {
        Some(Value::String(s)) if s == "connected" => Ok(format!("Status: {}", body)),
        // Without a value there is nothing to print as Actual
        None | Some(Value::Null) => Err(CheckError::Assertion {
            message: "Node backend not connected: missing".to_string(),
            expected: Some("connected".to_string()),
            actual: None,
        }),
        Some(other) => {
            let actual = match other {
                Value::String(s) => s.clone(),
                v => v.to_string(),
            };
            Err(CheckError::mismatch(
                format!("Node backend not connected: {}", actual),
                "connected",
                actual,
            ))
        }
    }
}

pub fn evaluate_backend(body: &Value) -> Result<String, CheckError> {
    if flag_is_true(body, "ok") {
        Ok(format!("Response: {}", body))
    } else {
        Err(CheckError::assertion(format!("ok != true: {}", body)))
    }
}

pub fn evaluate_scraper(body: &Value, expect: &ExpectConfig) -> Result<String, CheckError> {
    let healthy = flag_is_true(body, "ok")
        && str_field(body, "status") == Some("running")
        && str_field(body, "version") == Some(expect.scraper_version.as_str());

    if healthy {
        Ok(format!("Response: {}", body))
    } else {
        Err(CheckError::mismatch(
            format!("Invalid response: {}", body),
            format!("ok=true, status=running, version={}", expect.scraper_version),
            body.to_string(),
        ))
    }
}

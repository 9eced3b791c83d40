use serde_json::Value;
use url::Url;

use super::{flag_is_true, str_field};
use crate::client::{endpoint, Probe};
use crate::config::{ExpectConfig, ListingConfig, SmokeConfig};
use crate::error::CheckError;

/// Database reachability, judged through the module's stats endpoint
pub async fn stats(probe: &Probe, config: &SmokeConfig) -> Result<String, CheckError> {
    let url = endpoint(&config.endpoints.gateway_url, "/api/connections/stats");
    let body = probe.get_json(&url, config.http.timeout()).await?;
    evaluate_stats(&body, &config.expect)
}

pub async fn module_health(probe: &Probe, config: &SmokeConfig) -> Result<String, CheckError> {
    let url = endpoint(&config.endpoints.gateway_url, "/api/connections/health");
    let body = probe.get_json(&url, config.http.timeout()).await?;
    evaluate_module_health(&body, &config.expect)
}

pub async fn unified(probe: &Probe, config: &SmokeConfig) -> Result<String, CheckError> {
    let url = unified_url(&config.endpoints.gateway_url, &config.listing)?;
    let body = probe.get_json(url.as_str(), config.http.listing_timeout()).await?;
    evaluate_unified(&body, config.listing.min_records)
}

pub fn unified_url(base: &str, listing: &ListingConfig) -> Result<Url, CheckError> {
    let raw = endpoint(base, "/api/connections/unified");
    let mut url = Url::parse(&raw)
        .map_err(|e| CheckError::transport(format!("invalid URL {}: {}", raw, e)))?;
    url.query_pairs_mut()
        .append_pair("facet", &listing.facet)
        .append_pair("limit", &listing.limit.to_string());
    Ok(url)
}

pub fn evaluate_stats(body: &Value, expect: &ExpectConfig) -> Result<String, CheckError> {
    if !flag_is_true(body, "ok") {
        return Err(CheckError::assertion(format!("Stats API failed: {}", body)));
    }

    let stats = match body.get("data") {
        None | Some(Value::Null) => Value::Object(Default::default()),
        Some(v @ Value::Object(_)) => v.clone(),
        Some(other) => return Err(CheckError::payload(format!("stats data is not an object: {}", other))),
    };

    // Only an absent count reads as zero; an explicit null is not a count
    let total_profiles = match stats.get("total_profiles") {
        None => serde_json::Number::from(0),
        Some(Value::Number(n)) => n.clone(),
        Some(other) => {
            return Err(CheckError::payload(format!("total_profiles is not a number: {}", other)))
        }
    };

    let non_negative = total_profiles.as_f64().map_or(false, |n| n >= 0.0);
    if str_field(&stats, "storage") == Some(expect.storage_engine.as_str()) && non_negative {
        Ok(format!("Connected, {} profiles in DB", total_profiles))
    } else {
        Err(CheckError::mismatch(
            format!("Invalid stats: {}", stats),
            format!("storage={}, total_profiles>=0", expect.storage_engine),
            stats.to_string(),
        ))
    }
}

pub fn evaluate_module_health(body: &Value, expect: &ExpectConfig) -> Result<String, CheckError> {
    if flag_is_true(body, "ok") && str_field(body, "module") == Some(expect.module_name.as_str()) {
        Ok(format!("Response: {}", body))
    } else {
        Err(CheckError::assertion(format!("Invalid response: {}", body)))
    }
}

pub fn evaluate_unified(body: &Value, min_records: usize) -> Result<String, CheckError> {
    if !flag_is_true(body, "ok") {
        return Err(CheckError::assertion(format!("API returned ok=false: {}", body)));
    }

    let count = match body.get("data") {
        None | Some(Value::Null) => 0,
        Some(Value::Array(records)) => records.len(),
        Some(other) => return Err(CheckError::payload(format!("data is not a list: {}", other))),
    };

    if count >= min_records {
        Ok(format!("Retrieved {} accounts", count))
    } else {
        Err(CheckError::mismatch(
            format!("Expected at least {} accounts, got {}", min_records, count),
            format!(">= {}", min_records),
            count.to_string(),
        ))
    }
}

use std::time::Duration;

use reqwest::StatusCode;
use serde_json::Value;

use crate::error::CheckError;

/// Thin wrapper over a shared `reqwest::Client` that performs the single GET
/// every check needs and hands back the parsed JSON body.
#[derive(Debug, Clone)]
pub struct Probe {
    client: reqwest::Client,
}

impl Probe {
    pub fn new() -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("connections-smoke/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }

    /// GET `url` and parse the body as JSON. Only a 200 response is parsed;
    /// any other status is reported with the raw body text.
    pub async fn get_json(&self, url: &str, timeout: Duration) -> Result<Value, CheckError> {
        tracing::debug!(%url, ?timeout, "GET");

        let response = self.client.get(url).timeout(timeout).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if status != StatusCode::OK {
            tracing::debug!(%url, status = status.as_u16(), "non-200 response");
            return Err(CheckError::status(status.as_u16(), body));
        }

        Ok(serde_json::from_str(&body)?)
    }
}

/// Join a base URL and an absolute path without doubling slashes
pub fn endpoint(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}

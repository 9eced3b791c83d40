#![allow(dead_code)]

use std::collections::HashMap;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::extract::Query;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::task::JoinHandle;

use connections_smoke::config::SmokeConfig;

/// A stand-in for one of the deployed services, served on a free local port
pub struct MockService {
    pub base_url: String,
    handle: JoinHandle<()>,
}

impl Drop for MockService {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

pub async fn spawn(router: Router) -> Result<MockService> {
    let port = portpicker::pick_unused_port().context("failed to pick free port")?;
    let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
        .await
        .with_context(|| format!("failed to bind 127.0.0.1:{}", port))?;

    let handle = tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });

    Ok(MockService {
        base_url: format!("http://127.0.0.1:{}", port),
        handle,
    })
}

/// Base URL nothing is listening on
pub fn dead_url() -> Result<String> {
    let port = portpicker::pick_unused_port().context("failed to pick free port")?;
    Ok(format!("http://127.0.0.1:{}", port))
}

pub fn config_for(gateway: &str, backend: &str, scraper: &str) -> SmokeConfig {
    let mut config = SmokeConfig::default().with_base_urls(gateway, backend, scraper);
    config.http.timeout_secs = 2;
    config.http.listing_timeout_secs = 2;
    config
}

/// Route that always answers 200 with the given body
pub fn json_route(path: &str, body: Value) -> Router {
    Router::new().route(
        path,
        get(move || {
            let body = body.clone();
            async move { Json(body) }
        }),
    )
}

pub fn status_route(path: &str, status: StatusCode, text: &'static str) -> Router {
    Router::new().route(path, get(move || async move { (status, text) }))
}

pub fn slow_route(path: &str, delay: Duration) -> Router {
    Router::new().route(
        path,
        get(move || async move {
            tokio::time::sleep(delay).await;
            Json(json!({"ok": true}))
        }),
    )
}

pub fn records(count: usize) -> Vec<Value> {
    (0..count).map(|i| json!({"handle": format!("account_{}", i)})).collect()
}

/// Gateway fronting a healthy connections module whose unified listing
/// returns `listing_size` records for the REAL_TWITTER facet.
pub fn healthy_gateway(listing_size: usize) -> Router {
    json_route(
        "/api/health",
        json!({"service": "python-gateway", "status": "ok", "node_backend": "connected"}),
    )
    .merge(json_route(
        "/api/connections/stats",
        json!({"ok": true, "data": {"total_profiles": 42, "storage": "mongodb"}}),
    ))
    .merge(json_route(
        "/api/connections/health",
        json!({"ok": true, "module": "connections"}),
    ))
    .route(
        "/api/connections/unified",
        get(move |Query(params): Query<HashMap<String, String>>| async move {
            if params.get("facet").map(String::as_str) != Some("REAL_TWITTER") {
                return Json(json!({"ok": false, "error": "unknown facet"}));
            }
            let limit = params
                .get("limit")
                .and_then(|l| l.parse::<usize>().ok())
                .unwrap_or(listing_size);
            Json(json!({"ok": true, "data": records(listing_size.min(limit))}))
        }),
    )
}

pub fn healthy_backend() -> Router {
    json_route("/api/health", json!({"ok": true, "service": "node-backend"}))
}

pub fn healthy_scraper() -> Router {
    json_route(
        "/health",
        json!({"ok": true, "status": "running", "version": "2.0-MULTI"}),
    )
}

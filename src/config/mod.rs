use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

pub const DEFAULT_GATEWAY_URL: &str = "https://twscrape-tool.preview.emergentagent.com";
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8003";
pub const DEFAULT_SCRAPER_URL: &str = "http://localhost:5001";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmokeConfig {
    pub endpoints: EndpointConfig,
    pub http: HttpConfig,
    pub expect: ExpectConfig,
    pub listing: ListingConfig,
}

/// Base addresses of the services under test
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointConfig {
    /// Public gateway; also fronts the connections module routes
    pub gateway_url: String,
    /// Backend reached directly, bypassing the gateway
    pub backend_url: String,
    pub scraper_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    pub timeout_secs: u64,
    pub listing_timeout_secs: u64,
}

/// Literal values the health endpoints must report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpectConfig {
    pub gateway_service: String,
    pub scraper_version: String,
    pub storage_engine: String,
    pub module_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingConfig {
    pub facet: String,
    pub limit: u32,
    pub min_records: usize,
}

impl HttpConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn listing_timeout(&self) -> Duration {
        Duration::from_secs(self.listing_timeout_secs)
    }
}

impl Default for SmokeConfig {
    fn default() -> Self {
        Self {
            endpoints: EndpointConfig {
                gateway_url: DEFAULT_GATEWAY_URL.to_string(),
                backend_url: DEFAULT_BACKEND_URL.to_string(),
                scraper_url: DEFAULT_SCRAPER_URL.to_string(),
            },
            http: HttpConfig {
                timeout_secs: 10,
                listing_timeout_secs: 15,
            },
            expect: ExpectConfig {
                gateway_service: "python-gateway".to_string(),
                scraper_version: "2.0-MULTI".to_string(),
                storage_engine: "mongodb".to_string(),
                module_name: "connections".to_string(),
            },
            listing: ListingConfig {
                facet: "REAL_TWITTER".to_string(),
                limit: 10,
                min_records: 10,
            },
        }
    }
}

impl SmokeConfig {
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        // Endpoint overrides
        if let Ok(v) = env::var("SMOKE_GATEWAY_URL") {
            self.endpoints.gateway_url = v;
        }
        if let Ok(v) = env::var("SMOKE_BACKEND_URL") {
            self.endpoints.backend_url = v;
        }
        if let Ok(v) = env::var("SMOKE_SCRAPER_URL") {
            self.endpoints.scraper_url = v;
        }

        // HTTP overrides
        if let Ok(v) = env::var("SMOKE_TIMEOUT_SECS") {
            self.http.timeout_secs = v.parse().unwrap_or(self.http.timeout_secs);
        }
        if let Ok(v) = env::var("SMOKE_LISTING_TIMEOUT_SECS") {
            self.http.listing_timeout_secs = v.parse().unwrap_or(self.http.listing_timeout_secs);
        }

        // Listing overrides
        if let Ok(v) = env::var("SMOKE_LISTING_FACET") {
            self.listing.facet = v;
        }
        if let Ok(v) = env::var("SMOKE_LISTING_LIMIT") {
            self.listing.limit = v.parse().unwrap_or(self.listing.limit);
        }
        if let Ok(v) = env::var("SMOKE_LISTING_MIN_RECORDS") {
            self.listing.min_records = v.parse().unwrap_or(self.listing.min_records);
        }

        self
    }

    /// Point every service at the same base URL (handy for a single mock host)
    pub fn with_base_urls(mut self, gateway: &str, backend: &str, scraper: &str) -> Self {
        self.endpoints.gateway_url = gateway.trim_end_matches('/').to_string();
        self.endpoints.backend_url = backend.trim_end_matches('/').to_string();
        self.endpoints.scraper_url = scraper.trim_end_matches('/').to_string();
        self
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<SmokeConfig> = Lazy::new(SmokeConfig::from_env);

pub fn config() -> &'static SmokeConfig {
    &CONFIG
}

//! Client configuration

use std::time::Duration;

use crate::{ClientError, ClientResult};

/// Default page size when loading the zone catalog
pub const DEFAULT_ZONE_LIMIT: u32 = 100;

/// Client configuration for connecting to the service desk API
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API base URL (e.g., "http://localhost:5000/api")
    pub base_url: String,

    /// Bearer token passed through on every request
    pub token: Option<String>,

    /// Request timeout in seconds
    pub timeout: u64,

    /// Maximum number of zones fetched for the zone catalog
    pub zone_limit: u32,

    /// Where to navigate after a ticket is created
    pub redirect_path: String,

    /// Delay before navigating away after a ticket is created, in milliseconds
    pub redirect_delay_ms: u64,
}

impl ClientConfig {
    /// Create a new client configuration
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: None,
            timeout: 30,
            zone_limit: DEFAULT_ZONE_LIMIT,
            redirect_path: "/admin/tickets".to_string(),
            redirect_delay_ms: 1500,
        }
    }

    /// Load configuration from the environment
    ///
    /// - `DESK_API_URL` (required)
    /// - `DESK_API_TOKEN` (optional)
    /// - `DESK_API_TIMEOUT` seconds (optional, default 30)
    pub fn from_env() -> ClientResult<Self> {
        let base_url = std::env::var("DESK_API_URL")
            .map_err(|_| ClientError::Config("DESK_API_URL must be set".into()))?;

        let mut config = Self::new(base_url);
        if let Some(token) = std::env::var("DESK_API_TOKEN").ok().filter(|t| !t.is_empty()) {
            config = config.with_token(token);
        }
        if let Some(timeout) = std::env::var("DESK_API_TIMEOUT")
            .ok()
            .and_then(|t| t.parse().ok())
        {
            config = config.with_timeout(timeout);
        }
        Ok(config)
    }

    /// Set the bearer token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Set the zone catalog page size
    pub fn with_zone_limit(mut self, limit: u32) -> Self {
        self.zone_limit = limit;
        self
    }

    /// Set the post-submit navigation target and delay
    pub fn with_redirect(mut self, path: impl Into<String>, delay_ms: u64) -> Self {
        self.redirect_path = path.into();
        self.redirect_delay_ms = delay_ms;
        self
    }

    pub fn redirect_delay(&self) -> Duration {
        Duration::from_millis(self.redirect_delay_ms)
    }

    /// Create an HTTP client from this configuration
    pub fn build_http_client(&self) -> ClientResult<super::NetworkHttpClient> {
        super::NetworkHttpClient::new(self)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new("http://localhost:5000/api")
    }
}

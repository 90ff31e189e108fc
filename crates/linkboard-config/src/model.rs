//! Typed configuration models.

use std::fmt::{self, Debug, Formatter};
use std::net::IpAddr;
use std::time::Duration;

use url::Url;

/// Top-level application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Address the HTTP listener binds to.
    pub bind_addr: IpAddr,
    /// Port the HTTP listener binds to.
    pub http_port: u16,
    /// Logging filter applied when `RUST_LOG` is not set.
    pub log_level: String,
    /// External issue store settings.
    pub store: StoreConfig,
}

/// Settings for the external issue store.
#[derive(Clone)]
pub struct StoreConfig {
    /// Base URL of the store's REST API.
    pub api_base: Url,
    /// Repository owner holding the submission records.
    pub owner: String,
    /// Repository name holding the submission records.
    pub repo: String,
    /// Bearer token used for every store request.
    pub token: String,
    /// Per-request timeout applied to every store call.
    pub request_timeout: Duration,
    /// `User-Agent` header sent with every store request.
    pub user_agent: String,
}

impl Debug for StoreConfig {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("StoreConfig")
            .field("api_base", &self.api_base.as_str())
            .field("owner", &self.owner)
            .field("repo", &self.repo)
            .field("token", &"<redacted>")
            .field("request_timeout", &self.request_timeout)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

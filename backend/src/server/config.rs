//! Runtime settings loaded via OrthoConfig and the assembled server config.

use std::net::SocketAddr;
use std::time::Duration;

use actix_web::cookie::{Key, SameSite};
use ortho_config::OrthoConfig;
use serde::Deserialize;

use backend::inbound::http::session_config::SessionSettings;
use pagination::DEFAULT_PAGE_SIZE;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_POOL_SIZE: u32 = 10;
const DEFAULT_IDENTITY_TIMEOUT_SECS: u64 = 10;

/// Settings read from `ASKALOCAL_*` variables, config files and flags.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "ASKALOCAL")]
pub struct AppSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<SocketAddr>,
    /// PostgreSQL connection string; the in-memory store is used without it.
    pub database_url: Option<String>,
    /// Maximum pooled database connections.
    #[ortho_config(default = DEFAULT_POOL_SIZE)]
    pub db_pool_size: u32,
    /// Base URL of the managed auth service.
    pub identity_url: Option<String>,
    /// Project API key sent to the auth service.
    pub identity_api_key: Option<String>,
    /// Request timeout for the auth service.
    #[ortho_config(default = DEFAULT_IDENTITY_TIMEOUT_SECS)]
    pub identity_timeout_secs: u64,
    /// Questions per feed page.
    #[ortho_config(default = DEFAULT_PAGE_SIZE)]
    pub page_size: u64,
}

impl AppSettings {
    /// Listen address, falling back to all interfaces on port 8080.
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
            .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], DEFAULT_PORT)))
    }

    /// Connection pool ceiling.
    pub fn db_pool_size(&self) -> u32 {
        self.db_pool_size.max(1)
    }

    /// Identity service timeout.
    pub fn identity_timeout(&self) -> Duration {
        Duration::from_secs(self.identity_timeout_secs)
    }

    /// Feed page size.
    pub fn page_size(&self) -> u64 {
        self.page_size.max(1)
    }
}

/// Everything `create_server` needs besides the HTTP state.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) bind_addr: SocketAddr,
    #[cfg(feature = "metrics")]
    pub(crate) prometheus: Option<actix_web_prom::PrometheusMetrics>,
}

impl ServerConfig {
    /// Combine session settings with the listen address.
    #[must_use]
    pub fn new(session: SessionSettings, bind_addr: SocketAddr) -> Self {
        let SessionSettings {
            key,
            cookie_secure,
            same_site,
        } = session;
        Self {
            key,
            cookie_secure,
            same_site,
            bind_addr,
            #[cfg(feature = "metrics")]
            prometheus: None,
        }
    }

    #[cfg(feature = "metrics")]
    /// Attach Prometheus middleware.
    #[must_use]
    pub fn with_metrics(mut self, prometheus: actix_web_prom::PrometheusMetrics) -> Self {
        self.prometheus = Some(prometheus);
        self
    }
}

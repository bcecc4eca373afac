//! HTTP server configuration: layered settings and the resolved server config.

use std::net::SocketAddr;
use std::path::PathBuf;

use actix_web::cookie::{Key, SameSite};
use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Settings loaded from CLI flags, `SCORECARD_*` environment variables and
/// configuration files via OrthoConfig.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "SCORECARD")]
pub struct ServerSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// JSON records file mirrored after every write; memory only when unset.
    pub records_path: Option<PathBuf>,
}

/// Errors raised while resolving server settings.
#[derive(Debug, thiserror::Error)]
pub enum ServerSettingsError {
    #[error("invalid bind address '{value}': {source}")]
    InvalidBindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
}

impl ServerSettings {
    /// Configured bind address, falling back to `0.0.0.0:8080`.
    pub fn bind_addr(&self) -> Result<SocketAddr, ServerSettingsError> {
        let value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        value
            .parse()
            .map_err(|source| ServerSettingsError::InvalidBindAddr {
                value: value.to_owned(),
                source,
            })
    }
}

/// Resolved configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) records_path: Option<PathBuf>,
}

impl ServerConfig {
    /// Construct a server configuration from session and listener settings.
    #[must_use]
    pub fn new(key: Key, cookie_secure: bool, same_site: SameSite, bind_addr: SocketAddr) -> Self {
        Self {
            key,
            cookie_secure,
            same_site,
            bind_addr,
            records_path: None,
        }
    }

    /// Mirror the student store to a JSON records file.
    #[must_use]
    pub fn with_records_path(mut self, path: Option<PathBuf>) -> Self {
        self.records_path = path;
        self
    }
}

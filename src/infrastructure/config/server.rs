//! HTTP server configuration.

use std::net::SocketAddr;

use serde::Deserialize;

use crate::error::{ConfigError, Result};

/// Settings for `askdb serve`.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Listen address. Defaults to "127.0.0.1:5000".
    #[serde(default = "default_bind")]
    pub bind: String,

    /// Largest accepted request body, which bounds uploaded database size.
    /// Defaults to 32 MiB.
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}

impl ServerConfig {
    /// Parse [`Self::bind`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if the address does not parse.
    #[allow(clippy::result_large_err)]
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        self.bind.parse().map_err(|e: std::net::AddrParseError| {
            ConfigError::InvalidValue {
                field: "bind",
                reason: e.to_string(),
            }
            .into()
        })
    }
}

fn default_bind() -> String {
    "127.0.0.1:5000".into()
}

const fn default_max_upload_bytes() -> usize {
    32 * 1024 * 1024
}

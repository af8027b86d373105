//! Server configuration from the environment.

use std::net::SocketAddr;
use thiserror::Error;

/// Environment variable holding the listen address.
pub const ADDR_VAR: &str = "WIDGETBOARD_ADDR";

/// Listen address used when `WIDGETBOARD_ADDR` is unset.
pub const DEFAULT_ADDR: SocketAddr = SocketAddr::new(
    std::net::IpAddr::V4(std::net::Ipv4Addr::UNSPECIFIED),
    3030,
);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid WIDGETBOARD_ADDR '{value}': {reason}")]
    InvalidAddr { value: String, reason: String },
}

/// Server configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub addr: SocketAddr,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { addr: DEFAULT_ADDR }
    }
}

impl ServerConfig {
    /// Read configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(value) = lookup(ADDR_VAR) {
            config.addr = value
                .trim()
                .parse()
                .map_err(|e: std::net::AddrParseError| ConfigError::InvalidAddr {
                    value: value.clone(),
                    reason: e.to_string(),
                })?;
        }
        Ok(config)
    }
}

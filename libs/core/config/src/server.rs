use crate::{env_or_default, ConfigError, FromEnv};
use std::env;
use std::net::Ipv4Addr;

const DEFAULT_PORT: u16 = 8080;

/// Server configuration for HTTP APIs
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn new(host: String, port: u16) -> Self {
        Self { host, port }
    }

    /// Get the server address as "host:port"
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl FromEnv for ServerConfig {
    /// - HOST: defaults to 0.0.0.0
    /// - SITE_PORT, then PORT: defaults to 8080. An unparsable value is
    ///   logged and replaced by the default instead of aborting startup.
    fn from_env() -> Result<Self, ConfigError> {
        let host = env_or_default("HOST", &Ipv4Addr::UNSPECIFIED.to_string());
        let port = ["SITE_PORT", "PORT"]
            .iter()
            .find_map(|key| env::var(key).ok().map(|raw| (*key, raw)))
            .map(|(key, raw)| {
                raw.trim().parse().unwrap_or_else(|e| {
                    tracing::warn!(key, value = %raw, error = %e, "invalid port, using {}", DEFAULT_PORT);
                    DEFAULT_PORT
                })
            })
            .unwrap_or(DEFAULT_PORT);

        Ok(Self { host, port })
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: Ipv4Addr::UNSPECIFIED.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

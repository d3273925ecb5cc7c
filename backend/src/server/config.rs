//! Server configuration sourced from the environment.

use std::net::SocketAddr;
use std::time::Duration;

use crate::outbound::persistence::PoolConfig;

/// Default socket address when `BIND_ADDR` is unset.
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Default maximum pool size when `DATABASE_POOL_SIZE` is unset.
pub const DEFAULT_POOL_SIZE: u32 = 10;

/// Configuration problems detected at startup.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// `DATABASE_URL` was not set.
    #[error("DATABASE_URL must be set")]
    MissingDatabaseUrl,
    /// A variable was set but could not be parsed.
    #[error("invalid value for {name}: {value}")]
    InvalidValue {
        /// The offending variable.
        name: &'static str,
        /// The rejected raw value.
        value: String,
    },
}

/// Runtime configuration for the HTTP server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Socket address the listener binds to.
    pub bind_addr: SocketAddr,
    /// PostgreSQL connection string.
    pub database_url: String,
    /// Maximum number of pooled connections.
    pub pool_size: u32,
}

impl ServerConfig {
    /// Load configuration from `BIND_ADDR`, `DATABASE_URL`, and
    /// `DATABASE_POOL_SIZE`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let bind_raw =
            std::env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_owned());
        let bind_addr: SocketAddr = bind_raw.parse().map_err(|_| ConfigError::InvalidValue {
            name: "BIND_ADDR",
            value: bind_raw.clone(),
        })?;

        let database_url =
            std::env::var("DATABASE_URL").map_err(|_| ConfigError::MissingDatabaseUrl)?;

        let pool_size = match std::env::var("DATABASE_POOL_SIZE") {
            Ok(raw) => raw.parse().map_err(|_| ConfigError::InvalidValue {
                name: "DATABASE_POOL_SIZE",
                value: raw.clone(),
            })?,
            Err(_) => DEFAULT_POOL_SIZE,
        };

        Ok(Self {
            bind_addr,
            database_url,
            pool_size,
        })
    }

    /// Pool configuration derived from this server configuration.
    pub fn pool_config(&self) -> PoolConfig {
        PoolConfig::new(self.database_url.clone())
            .with_max_size(self.pool_size)
            .with_connection_timeout(Duration::from_secs(30))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn pool_config_carries_the_size() {
        let config = ServerConfig {
            bind_addr: DEFAULT_BIND_ADDR.parse().expect("valid address"),
            database_url: "postgres://localhost/storefront".into(),
            pool_size: 4,
        };
        let pool = config.pool_config();
        assert_eq!(pool.database_url(), "postgres://localhost/storefront");
    }

    #[rstest]
    #[case("not-an-addr")]
    #[case("8080")]
    fn invalid_bind_addresses_are_reported(#[case] raw: &str) {
        let parsed: Result<SocketAddr, _> = raw.parse();
        assert!(parsed.is_err());
    }
}

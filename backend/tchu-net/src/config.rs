use std::env;
use std::num::ParseIntError;
use thiserror::Error;

pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_PORT: u16 = 5108;

/// Environment variable overriding the host.
pub const HOST_VARIABLE: &str = "TCHU_HOST";
/// Environment variable overriding the port.
pub const PORT_VARIABLE: &str = "TCHU_PORT";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid port {value:?} in {variable}: {source}")]
    InvalidPort {
        variable: &'static str,
        value: String,
        source: ParseIntError,
    },
}

/// Where the proxy of a game listens, and where clients connect.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NetConfig {
    pub host: String,
    pub port: u16,
}

impl Default for NetConfig {
    fn default() -> Self {
        Self {
            host: String::from(DEFAULT_HOST),
            port: DEFAULT_PORT,
        }
    }
}

impl NetConfig {
    /// The default configuration, overridden by `TCHU_HOST` and `TCHU_PORT` when set.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_values(env::var(HOST_VARIABLE).ok(), env::var(PORT_VARIABLE).ok())
    }

    /// The default configuration, overridden by the given values.
    ///
    /// # Example
    /// ```
    /// use tchu_net::config::NetConfig;
    ///
    /// let config = NetConfig::from_values(None, Some(String::from("6000"))).unwrap();
    ///
    /// assert_eq!(config.address(), "localhost:6000");
    /// assert!(NetConfig::from_values(None, Some(String::from("port"))).is_err());
    /// ```
    pub fn from_values(host: Option<String>, port: Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(host) = host {
            config.host = host;
        }
        if let Some(port) = port {
            config.port = port
                .trim()
                .parse()
                .map_err(|source| ConfigError::InvalidPort {
                    variable: PORT_VARIABLE,
                    value: port.clone(),
                    source,
                })?;
        }

        Ok(config)
    }

    /// `host:port`
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

use std::env;

use crate::error::ConfigError;
use crate::lookup_non_blank;

/// Listen address of the HTTP server.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup_non_blank(&lookup, "APP_HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = match lookup_non_blank(&lookup, "APP_PORT") {
            Some(raw) => raw
                .parse()
                .map_err(|_| ConfigError::invalid("APP_PORT", format!("'{raw}' is not a port")))?,
            None => 3000,
        };

        Ok(Self { host, port })
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config.addr(), "0.0.0.0:3000");
    }

    #[test]
    fn test_invalid_port() {
        let result = ServerConfig::from_lookup(|name| (name == "APP_PORT").then(|| "http".into()));
        assert!(matches!(result, Err(ConfigError::Invalid { name: "APP_PORT", .. })));
    }
}

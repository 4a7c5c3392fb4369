use std::env;

use crate::error::ConfigError;
use crate::lookup_non_blank;

/// PostgreSQL settings. Without a `DATABASE_URL` the server falls back to
/// the in-memory store.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub url: Option<String>,
    pub max_connections: u32,
    pub run_migrations: bool,
}

impl DatabaseConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let max_connections = match lookup_non_blank(&lookup, "DATABASE_MAX_CONNECTIONS") {
            Some(raw) => raw.parse().map_err(|_| {
                ConfigError::invalid("DATABASE_MAX_CONNECTIONS", format!("'{raw}' is not a count"))
            })?,
            None => 5,
        };

        let run_migrations = match lookup_non_blank(&lookup, "RUN_MIGRATIONS") {
            Some(raw) => match raw.to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" => true,
                "0" | "false" | "no" => false,
                _ => {
                    return Err(ConfigError::invalid(
                        "RUN_MIGRATIONS",
                        format!("'{raw}' is not a boolean"),
                    ));
                }
            },
            None => true,
        };

        Ok(Self {
            url: lookup_non_blank(&lookup, "DATABASE_URL"),
            max_connections,
            run_migrations,
        })
    }

    /// The URL, or an error naming the missing variable.
    pub fn require_url(&self) -> Result<&str, ConfigError> {
        self.url.as_deref().ok_or(ConfigError::Missing("DATABASE_URL"))
    }
}

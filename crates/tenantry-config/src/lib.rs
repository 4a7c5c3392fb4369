//! # Tenantry Config
//!
//! Configuration types for the Tenantry API.
//!
//! This crate provides configuration structures loaded from environment variables:
//!
//! - [`jwt`]: token signing secret, lifetime and header names
//! - [`cors`]: CORS (Cross-Origin Resource Sharing) configuration
//! - [`database`]: PostgreSQL connection settings
//! - [`server`]: listen address
//!
//! Every loader has a `from_lookup` variant taking a key lookup function so
//! tests do not have to touch the process environment.
//!
//! # Example
//!
//! ```ignore
//! use tenantry_config::{CorsConfig, DatabaseConfig, JwtConfig, ServerConfig};
//!
//! let jwt_config = JwtConfig::from_env()?;
//! let cors_config = CorsConfig::from_env();
//! let database_config = DatabaseConfig::from_env()?;
//! let server_config = ServerConfig::from_env()?;
//! ```

pub mod cors;
pub mod database;
pub mod error;
pub mod jwt;
pub mod server;

// Re-export commonly used types at crate root
pub use cors::CorsConfig;
pub use database::DatabaseConfig;
pub use error::ConfigError;
pub use jwt::{DEFAULT_TOKEN_HEADER, JwtConfig, parse_duration_secs};
pub use server::ServerConfig;

/// Reads a variable, treating blank values as unset.
pub(crate) fn lookup_non_blank<F>(lookup: &F, name: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

//! # Tenantry Auth
//!
//! Token claims and JWT utilities for the Tenantry API.
//!
//! - [`claims`]: the signed payload and the identity it carries
//! - [`jwt`]: issuing, verifying and rotating tokens
//!
//! Tokens are HS256 JWTs over `{userId, role, iat, exp}`. They are never
//! stored server side: the token is the whole session, and every
//! authenticated request trades it for a fresh one via [`rotate_token`].
//!
//! # Example
//!
//! ```ignore
//! use chrono::Utc;
//! use tenantry_auth::{Identity, issue_token, rotate_token, verify_token};
//! use tenantry_config::JwtConfig;
//!
//! let config = JwtConfig::new("secret", 3600);
//! let token = issue_token(&Identity::new("u1", "USER"), Utc::now(), &config)?;
//!
//! let claims = verify_token(&token, &config)?;
//! let renewed = rotate_token(&claims, Utc::now(), &config)?;
//! ```

pub mod claims;
pub mod jwt;

// Re-export commonly used types at crate root
pub use claims::{Claims, Identity};
pub use jwt::{TokenError, issue_token, rotate_token, verify_token};

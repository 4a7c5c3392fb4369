//! Feature modules.
//!
//! - [`accounts`]: tenant account creation and lookup
//! - [`health`]: unauthenticated liveness probe

pub mod accounts;
pub mod health;

//! # Tenantry Models
//!
//! Domain models and DTOs for the Tenantry API.
//!
//! - [`accounts`]: the tenant `Account` resource and its creation DTO
//! - [`roles`]: well-known role names and per-route [`RoleSet`]s
//! - [`users`]: users the role gate looks up
//!
//! # Example
//!
//! ```ignore
//! use tenantry_models::roles::{self, RoleSet};
//!
//! let admins_only = RoleSet::single(roles::ADMIN);
//! assert!(admins_only.contains("ADMIN"));
//! assert!(!admins_only.contains("admin"));
//! ```

pub mod accounts;
pub mod roles;
pub mod users;

// Re-export commonly used types at crate root for convenience
pub use accounts::{Account, CreateAccountDto, NewAccount};
pub use roles::{EmptyRoleSet, RoleSet};
pub use users::{NewUser, User};

//! # Tenantry Core
//!
//! Core types shared by every Tenantry crate.
//!
//! - [`errors`]: the application error type and its HTTP rendering
//!
//! # Example
//!
//! ```ignore
//! use tenantry_core::AppError;
//!
//! fn lookup(found: bool) -> Result<(), AppError> {
//!     if !found {
//!         return Err(AppError::not_found("Account not found"));
//!     }
//!     Ok(())
//! }
//! ```

pub mod errors;

// Re-export commonly used types at crate root
pub use errors::{AppError, ErrorKind, ErrorResponse, FieldError};

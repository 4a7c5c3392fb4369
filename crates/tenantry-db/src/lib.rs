//! # Tenantry DB
//!
//! Persistence collaborators for the Tenantry API.
//!
//! The API talks to storage only through two async traits:
//!
//! - [`UserStore`]: point lookup of a user by id (used by the role gate)
//! - [`AccountStore`]: account create/read/list (used by the handlers)
//!
//! Two implementations are provided:
//!
//! - [`PgStore`]: PostgreSQL via SQLx, with embedded migrations
//! - [`MemoryStore`]: in-process store for tests and database-less runs
//!
//! Both enforce the same unique keys: user email, account company name and
//! account admin email. A violation surfaces as [`StoreError::Conflict`].
//!
//! # Example
//!
//! ```ignore
//! use tenantry_config::DatabaseConfig;
//! use tenantry_db::{PgStore, init_db_pool};
//!
//! let config = DatabaseConfig::from_env()?;
//! let pool = init_db_pool(&config).await?;
//! let store = PgStore::new(pool);
//! store.migrate().await?;
//! ```

pub mod error;
pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use tenantry_models::{Account, NewAccount, NewUser, User};
use uuid::Uuid;

pub use error::StoreError;
pub use memory::MemoryStore;
pub use postgres::{PgStore, init_db_pool};

// Re-export PgPool for convenience
pub use sqlx::PgPool;

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Looks a user up by subject id. Ids that cannot name a stored user
    /// (e.g. not a UUID) yield `Ok(None)`.
    async fn find_user_by_id(&self, id: &str) -> Result<Option<User>, StoreError>;

    async fn insert_user(&self, user: NewUser) -> Result<User, StoreError>;
}

#[async_trait]
pub trait AccountStore: Send + Sync {
    async fn find_account_by_email(&self, email: &str) -> Result<Option<Account>, StoreError>;

    async fn find_account_by_id(&self, id: Uuid) -> Result<Option<Account>, StoreError>;

    async fn insert_account(&self, account: NewAccount) -> Result<Account, StoreError>;

    /// All accounts, oldest first. Ties on creation time are broken by id so
    /// repeated reads return the same order.
    async fn list_accounts(&self) -> Result<Vec<Account>, StoreError>;
}

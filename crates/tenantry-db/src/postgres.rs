//! PostgreSQL store.

use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use tenantry_config::DatabaseConfig;
use tenantry_models::{Account, NewAccount, NewUser, User};
use tracing::instrument;
use uuid::Uuid;

use crate::error::{StoreError, classify};
use crate::{AccountStore, UserStore};

const ACCOUNT_COLUMNS: &str = "id, company_name, admin_name, admin_email, admin_contact_no, \
                               features, created_by, created_at";

/// Opens a connection pool from `config`.
///
/// # Errors
///
/// Fails if `DATABASE_URL` is unset or the database cannot be reached.
pub async fn init_db_pool(config: &DatabaseConfig) -> Result<PgPool, StoreError> {
    let url = config.require_url()?;

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(url)
        .await?;

    Ok(pool)
}

#[derive(Clone, Debug)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Applies the embedded migrations.
    pub async fn migrate(&self) -> Result<(), StoreError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl UserStore for PgStore {
    #[instrument(skip(self))]
    async fn find_user_by_id(&self, id: &str) -> Result<Option<User>, StoreError> {
        let Ok(id) = Uuid::parse_str(id) else {
            return Ok(None);
        };

        let user = sqlx::query_as::<_, User>(
            "SELECT id, name, email, role, created_at FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    #[instrument(skip(self))]
    async fn insert_user(&self, user: NewUser) -> Result<User, StoreError> {
        sqlx::query_as::<_, User>(
            r#"INSERT INTO users (name, email, role)
               VALUES ($1, $2, $3)
               RETURNING id, name, email, role, created_at"#,
        )
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.role)
        .fetch_one(&self.pool)
        .await
        .map_err(classify)
    }
}

#[async_trait]
impl AccountStore for PgStore {
    #[instrument(skip(self))]
    async fn find_account_by_email(&self, email: &str) -> Result<Option<Account>, StoreError> {
        let account = sqlx::query_as::<_, Account>(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE admin_email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(account)
    }

    #[instrument(skip(self))]
    async fn find_account_by_id(&self, id: Uuid) -> Result<Option<Account>, StoreError> {
        let account = sqlx::query_as::<_, Account>(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(account)
    }

    #[instrument(skip(self))]
    async fn insert_account(&self, account: NewAccount) -> Result<Account, StoreError> {
        sqlx::query_as::<_, Account>(&format!(
            r#"INSERT INTO accounts
                   (company_name, admin_name, admin_email, admin_contact_no, features, created_by)
               VALUES ($1, $2, $3, $4, $5, $6)
               RETURNING {ACCOUNT_COLUMNS}"#
        ))
        .bind(&account.company_name)
        .bind(&account.admin_name)
        .bind(&account.admin_email)
        .bind(account.admin_contact_no)
        .bind(&account.features)
        .bind(&account.created_by)
        .fetch_one(&self.pool)
        .await
        .map_err(classify)
    }

    #[instrument(skip(self))]
    async fn list_accounts(&self) -> Result<Vec<Account>, StoreError> {
        let accounts = sqlx::query_as::<_, Account>(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM accounts ORDER BY created_at ASC, id ASC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(accounts)
    }
}

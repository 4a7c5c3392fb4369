use tenantry_config::ConfigError;
use tenantry_core::AppError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    /// A unique key is already taken. Carries the constraint name.
    #[error("unique constraint violated: {0}")]
    Conflict(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("migration failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

impl StoreError {
    pub fn is_conflict(&self) -> bool {
        matches!(self, StoreError::Conflict(_))
    }

    /// Maps a store failure onto the API taxonomy. Conflicts become
    /// `DuplicateResource` with `duplicate_msg`; anything else is internal.
    pub fn into_app_error(self, duplicate_msg: &str) -> AppError {
        match self {
            StoreError::Conflict(_) => AppError::duplicate(duplicate_msg),
            other => AppError::internal(other),
        }
    }
}

/// Turns a unique violation into [`StoreError::Conflict`].
pub(crate) fn classify(err: sqlx::Error) -> StoreError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            StoreError::Conflict(db_err.constraint().unwrap_or("unique").to_string())
        }
        _ => StoreError::Database(err),
    }
}

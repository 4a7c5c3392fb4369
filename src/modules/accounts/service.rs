use tenantry_core::{AppError, FieldError, errors::messages};
use tenantry_db::AccountStore;
use tenantry_models::{Account, CreateAccountDto};
use tracing::{info, instrument};
use uuid::Uuid;

pub struct AccountService;

impl AccountService {
    /// Creates an account owned by `created_by`.
    ///
    /// The admin email is checked up front; the company name is left to
    /// the store's unique key. Both collisions read as "already exists".
    #[instrument(skip(store, dto), fields(company_name = %dto.company_name))]
    pub async fn create_account(
        store: &dyn AccountStore,
        created_by: &str,
        dto: CreateAccountDto,
    ) -> Result<Account, AppError> {
        let existing = store
            .find_account_by_email(&dto.admin_email)
            .await
            .map_err(AppError::internal)?;
        if existing.is_some() {
            return Err(AppError::duplicate(messages::ACCOUNT_EXISTS));
        }

        let new_account = dto.into_new_account(created_by).ok_or_else(|| {
            AppError::validation(vec![FieldError::new(
                "adminContactNo",
                "Admin Contact Number is required",
            )])
        })?;

        let account = store
            .insert_account(new_account)
            .await
            .map_err(|e| e.into_app_error(messages::ACCOUNT_EXISTS))?;

        info!(account_id = %account.id, created_by = %created_by, "Account created");
        Ok(account)
    }

    #[instrument(skip(store))]
    pub async fn list_accounts(store: &dyn AccountStore) -> Result<Vec<Account>, AppError> {
        store.list_accounts().await.map_err(AppError::internal)
    }

    /// Unknown ids and ids that are not UUIDs both read as not found.
    #[instrument(skip(store))]
    pub async fn get_account(store: &dyn AccountStore, account_id: &str) -> Result<Account, AppError> {
        let Ok(id) = Uuid::parse_str(account_id) else {
            return Err(AppError::not_found(messages::ACCOUNT_NOT_FOUND));
        };

        store
            .find_account_by_id(id)
            .await
            .map_err(AppError::internal)?
            .ok_or_else(|| AppError::not_found(messages::ACCOUNT_NOT_FOUND))
    }
}

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;
use tenantry_core::{AppError, ErrorResponse};
use tenantry_models::{Account, CreateAccountDto};
use tracing::instrument;
use utoipa::ToSchema;

use crate::middleware::Authenticated;
use crate::modules::accounts::service::AccountService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// Body of a successful create: `{}`.
#[derive(Debug, Serialize, ToSchema)]
pub struct EmptyResponse {}

#[utoipa::path(
    post,
    path = "/api/account",
    request_body = CreateAccountDto,
    responses(
        (status = 200, description = "Account created", body = EmptyResponse,
            headers(("x-auth-token" = String, description = "Rotated token"))),
        (status = 400, description = "Validation failed or account already exists", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    ),
    tag = "Accounts",
    security(("token_auth" = []))
)]
#[instrument(skip(state))]
pub async fn create_account(
    State(state): State<AppState>,
    caller: Authenticated,
    ValidatedJson(dto): ValidatedJson<CreateAccountDto>,
) -> Result<Json<EmptyResponse>, AppError> {
    AccountService::create_account(state.accounts.as_ref(), caller.user_id(), dto).await?;

    Ok(Json(EmptyResponse {}))
}

#[utoipa::path(
    get,
    path = "/api/account",
    responses(
        (status = 200, description = "All accounts, oldest first", body = Vec<Account>,
            headers(("x-auth-token" = String, description = "Rotated token"))),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    ),
    tag = "Accounts",
    security(("token_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_accounts(
    State(state): State<AppState>,
    _caller: Authenticated,
) -> Result<Json<Vec<Account>>, AppError> {
    let accounts = AccountService::list_accounts(state.accounts.as_ref()).await?;

    Ok(Json(accounts))
}

#[utoipa::path(
    get,
    path = "/api/account/{account_id}",
    params(
        ("account_id" = String, Path, description = "Account ID")
    ),
    responses(
        (status = 200, description = "Account details", body = Account,
            headers(("x-auth-token" = String, description = "Rotated token"))),
        (status = 400, description = "Account not found, or the caller has no user record", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token, or role not permitted (requires USER; reported as 401, not 403)", body = ErrorResponse)
    ),
    tag = "Accounts",
    security(("token_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_account_by_id(
    State(state): State<AppState>,
    _caller: Authenticated,
    Path(account_id): Path<String>,
) -> Result<Json<Account>, AppError> {
    let account = AccountService::get_account(state.accounts.as_ref(), &account_id).await?;

    Ok(Json(account))
}

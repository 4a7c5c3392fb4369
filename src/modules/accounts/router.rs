use axum::{
    Router,
    routing::{get, post},
};
use tenantry_models::roles::{self, RoleSet};

use crate::middleware::Protected;
use crate::state::AppState;

use super::controller::{create_account, get_account_by_id, get_accounts};

pub fn init_accounts_router(state: &AppState) -> Router<AppState> {
    Protected::new(state)
        .route("/", post(create_account).get(get_accounts))
        .route_with_roles(
            "/{account_id}",
            get(get_account_by_id),
            RoleSet::single(roles::USER),
        )
        .into_router()
}

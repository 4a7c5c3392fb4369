//! Role gate.
//!
//! Restricts a route to callers whose stored role is in an allow-list bound
//! at route registration. The caller comes from [`Authenticated`], so the
//! gate can only do its job behind the token gate; a mis-wired route fails
//! with 500 instead of admitting anyone.
//!
//! | Situation | Result |
//! |-----------|--------|
//! | no user with the caller's id | 400 `User not found` |
//! | stored role not in the set | 401 `Unauthorized` |
//! | store failure | 500 `Server Error` |
//! | stored role in the set | downstream runs |

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use tenantry_core::AppError;
use tenantry_db::UserStore;
use tenantry_models::RoleSet;
use tracing::{debug, error, warn};

use crate::middleware::auth::Authenticated;

#[derive(Clone)]
pub struct RoleGate {
    allowed: RoleSet,
    users: Arc<dyn UserStore>,
}

impl RoleGate {
    pub fn new(allowed: RoleSet, users: Arc<dyn UserStore>) -> Self {
        Self { allowed, users }
    }

    /// Looks the caller up and checks the stored role against the set.
    pub async fn admit(&self, caller: &Authenticated) -> Result<(), AppError> {
        let user = self
            .users
            .find_user_by_id(caller.user_id())
            .await
            .map_err(|e| {
                error!(user_id = %caller.user_id(), error = %e, "User lookup failed");
                AppError::internal(e)
            })?
            .ok_or_else(|| {
                warn!(user_id = %caller.user_id(), "Authenticated subject has no user record");
                AppError::user_not_found()
            })?;

        if !self.allowed.contains(&user.role) {
            warn!(
                user_id = %caller.user_id(),
                role = %user.role,
                token_role = %caller.token_role(),
                allowed = %self.allowed,
                "Role not permitted"
            );
            return Err(AppError::forbidden());
        }

        debug!(user_id = %caller.user_id(), role = %user.role, "Role admitted");
        Ok(())
    }
}

impl std::fmt::Debug for RoleGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoleGate")
            .field("allowed", &self.allowed)
            .finish_non_exhaustive()
    }
}

/// Middleware form of [`RoleGate`]. Register it through
/// [`Protected::route_with_roles`](crate::middleware::Protected::route_with_roles)
/// so the token gate is always in front of it.
pub async fn role_gate(
    State(gate): State<RoleGate>,
    caller: Authenticated,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    gate.admit(&caller).await?;
    Ok(next.run(req).await)
}

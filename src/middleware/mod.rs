//! Request gates.
//!
//! - [`auth`]: the token gate, which verifies and rotates `x-auth-token`
//! - [`role`]: the role gate, which checks the caller's stored role
//!
//! # Gate Order
//!
//! The role gate needs the identity the token gate attaches, so the token
//! gate must run first. Routes are therefore registered through
//! [`Protected`], which puts every route behind the token gate and layers
//! the role gate inside it:
//!
//! ```ignore
//! use tenantry_models::roles::{self, RoleSet};
//!
//! let routes = Protected::new(&state)
//!     .route("/", get(list_things))
//!     .route_with_roles("/{id}", get(get_thing), RoleSet::single(roles::USER))
//!     .into_router();
//! ```
//!
//! Handlers take [`Authenticated`] as an extractor to learn who is calling.

pub mod auth;
pub mod role;

use axum::{Router, middleware, routing::MethodRouter};
use tenantry_models::RoleSet;

use crate::state::AppState;

pub use auth::{Authenticated, TokenGate, token_gate};
pub use role::{RoleGate, role_gate};

/// Router builder whose routes all sit behind the token gate.
pub struct Protected {
    router: Router<AppState>,
    state: AppState,
    has_routes: bool,
}

impl Protected {
    pub fn new(state: &AppState) -> Self {
        Self {
            router: Router::new(),
            state: state.clone(),
            has_routes: false,
        }
    }

    /// Adds a route that only needs a valid token.
    pub fn route(mut self, path: &str, method_router: MethodRouter<AppState>) -> Self {
        self.router = self.router.route(path, method_router);
        self.has_routes = true;
        self
    }

    /// Adds a route that also requires the caller's stored role to be in
    /// `roles`.
    pub fn route_with_roles(
        mut self,
        path: &str,
        method_router: MethodRouter<AppState>,
        roles: RoleSet,
    ) -> Self {
        let gate = RoleGate::new(roles, self.state.users.clone());
        let method_router = method_router.route_layer(middleware::from_fn_with_state(gate, role_gate));

        self.router = self.router.route(path, method_router);
        self.has_routes = true;
        self
    }

    /// Wraps everything in the token gate.
    pub fn into_router(self) -> Router<AppState> {
        if !self.has_routes {
            return self.router;
        }

        self.router.route_layer(middleware::from_fn_with_state(
            self.state.token_gate.clone(),
            token_gate,
        ))
    }
}

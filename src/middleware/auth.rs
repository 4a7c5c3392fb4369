//! Token gate.
//!
//! Admits only requests carrying a valid signed token and rotates that
//! token on every successful pass. On success the verified identity is
//! stored in the request extensions as [`Authenticated`], which is the only
//! way handlers and the role gate learn who the caller is.
//!
//! | Situation | Result |
//! |-----------|--------|
//! | header missing or empty | 401 `No token, authorization denied` |
//! | bad signature, malformed, expired | 401 `Token is not valid` |
//! | valid | downstream runs; response carries a fresh token |
//!
//! Rejections never reach downstream and never carry a token header.

use std::sync::Arc;

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{HeaderName, HeaderValue, request::Parts},
    middleware::Next,
    response::Response,
};
use chrono::Utc;
use tenantry_auth::{Claims, Identity, rotate_token, verify_token};
use tenantry_config::{ConfigError, JwtConfig};
use tenantry_core::AppError;
use tracing::{debug, error, warn};

/// Proof that the token gate admitted this request.
///
/// Only the gate can build one, so any code holding an `Authenticated` runs
/// behind it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Authenticated(Identity);

impl Authenticated {
    pub(crate) fn from_claims(claims: Claims) -> Self {
        Self(claims.into())
    }

    pub fn user_id(&self) -> &str {
        &self.0.user_id
    }

    /// Role the token was issued with. The role gate does not trust this
    /// and reads the stored role instead.
    pub fn token_role(&self) -> &str {
        &self.0.role
    }
}

impl<S> FromRequestParts<S> for Authenticated
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts.extensions.get::<Authenticated>().cloned().ok_or_else(|| {
            error!(path = %parts.uri.path(), "Route reached without passing the token gate");
            AppError::internal(anyhow::anyhow!("missing authenticated identity"))
        })
    }
}

/// Token verification and rotation settings, bound once at start-up.
#[derive(Clone, Debug)]
pub struct TokenGate {
    config: Arc<JwtConfig>,
    request_header: HeaderName,
    response_header: HeaderName,
}

impl TokenGate {
    pub fn new(config: JwtConfig) -> Result<Self, ConfigError> {
        let request_header = HeaderName::from_bytes(config.request_header.as_bytes())
            .map_err(|e| ConfigError::invalid("TOKEN_REQUEST_HEADER", e.to_string()))?;
        let response_header = HeaderName::from_bytes(config.response_header.as_bytes())
            .map_err(|e| ConfigError::invalid("TOKEN_RESPONSE_HEADER", e.to_string()))?;

        Ok(Self {
            config: Arc::new(config),
            request_header,
            response_header,
        })
    }

    pub fn config(&self) -> &JwtConfig {
        &self.config
    }

    pub fn request_header(&self) -> &HeaderName {
        &self.request_header
    }

    pub fn response_header(&self) -> &HeaderName {
        &self.response_header
    }

    /// Verifies the presented token and signs its replacement.
    ///
    /// Returns the verified claims and the header value carrying the new
    /// token. Nothing is written anywhere until the caller decides to
    /// continue.
    pub fn admit(&self, presented: Option<&HeaderValue>) -> Result<(Claims, HeaderValue), AppError> {
        let token = presented
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or_else(|| {
                warn!("Request without token rejected");
                AppError::unauthenticated()
            })?;

        let claims = verify_token(token, &self.config).map_err(|e| {
            warn!(reason = %e, "Request with invalid token rejected");
            AppError::invalid_token()
        })?;

        let renewed = rotate_token(&claims, Utc::now(), &self.config).map_err(AppError::internal)?;
        let renewed = HeaderValue::from_str(&renewed).map_err(AppError::internal)?;

        debug!(user_id = %claims.user_id, "Token verified and rotated");
        Ok((claims, renewed))
    }
}

/// Middleware form of [`TokenGate`].
///
/// ```rust,ignore
/// let routes = Router::new()
///     .route("/", get(handler))
///     .route_layer(middleware::from_fn_with_state(state.token_gate.clone(), token_gate));
/// ```
pub async fn token_gate(
    State(gate): State<TokenGate>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (claims, renewed) = gate.admit(req.headers().get(gate.request_header()))?;

    req.extensions_mut().insert(Authenticated::from_claims(claims));

    let mut response = next.run(req).await;
    response
        .headers_mut()
        .insert(gate.response_header().clone(), renewed);

    Ok(response)
}

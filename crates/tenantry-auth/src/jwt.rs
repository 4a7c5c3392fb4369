//! JWT utilities.
//!
//! Tokens are signed with HS256 over a single shared secret. Verification
//! checks the signature and requires `now < exp` with no leeway.
//!
//! [`rotate_token`] is a pure function of the old claims and the current
//! time: same identity, fresh `iat`, `exp = now + lifetime`. Because the
//! gate rotates on every authenticated request, the session slides forward
//! for as long as the client keeps calling.

use chrono::{DateTime, Utc};
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode,
    errors::ErrorKind as JwtErrorKind,
};
use tenantry_config::JwtConfig;
use thiserror::Error;

use crate::claims::{Claims, Identity};

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("token has expired")]
    Expired,

    #[error("token is invalid: {0}")]
    Invalid(#[source] jsonwebtoken::errors::Error),

    #[error("failed to sign token: {0}")]
    Signing(#[source] jsonwebtoken::errors::Error),
}

/// Signs a token for `identity` valid from `now` for the configured lifetime.
pub fn issue_token(
    identity: &Identity,
    now: DateTime<Utc>,
    jwt_config: &JwtConfig,
) -> Result<String, TokenError> {
    let iat = now.timestamp();
    let claims = Claims {
        user_id: identity.user_id.clone(),
        role: identity.role.clone(),
        iat,
        exp: iat + jwt_config.expiration_secs,
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(TokenError::Signing)
}

/// Verifies signature and expiry and returns the embedded claims.
///
/// # Errors
///
/// - [`TokenError::Expired`] when `now >= exp`
/// - [`TokenError::Invalid`] for a bad signature, a malformed token, or a
///   payload missing `userId`/`role`
pub fn verify_token(token: &str, jwt_config: &JwtConfig) -> Result<Claims, TokenError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;

    let claims = decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        JwtErrorKind::ExpiredSignature => TokenError::Expired,
        _ => TokenError::Invalid(e),
    })?;

    // jsonwebtoken accepts exp == now
    if claims.exp <= Utc::now().timestamp() {
        return Err(TokenError::Expired);
    }

    Ok(claims)
}

/// Re-signs the identity in `claims` with a fresh expiration.
pub fn rotate_token(
    claims: &Claims,
    now: DateTime<Utc>,
    jwt_config: &JwtConfig,
) -> Result<String, TokenError> {
    issue_token(&claims.identity(), now, jwt_config)
}

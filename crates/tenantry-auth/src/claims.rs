//! JWT claim structures.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Who the caller is: the subject id and the role it was issued with.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identity {
    pub user_id: String,
    pub role: String,
}

impl Identity {
    pub fn new(user_id: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            role: role.into(),
        }
    }
}

/// Payload of a signed token.
///
/// Serialized with camelCase keys: `{"userId", "role", "iat", "exp"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    /// Subject id of the caller
    pub user_id: String,
    /// Role the token was issued with
    pub role: String,
    /// Issued-at (Unix timestamp, seconds). Optional on input; tokens from
    /// other issuers may omit it.
    #[serde(default)]
    pub iat: i64,
    /// Expiration (Unix timestamp, seconds)
    pub exp: i64,
}

impl Claims {
    pub fn identity(&self) -> Identity {
        Identity::new(self.user_id.clone(), self.role.clone())
    }
}

impl From<Claims> for Identity {
    fn from(claims: Claims) -> Self {
        Identity {
            user_id: claims.user_id,
            role: claims.role,
        }
    }
}

//! Role names and allow-lists.
//!
//! Roles are plain strings compared exactly (case-sensitive). The two
//! well-known roles are [`ADMIN`] and [`USER`]; anything else is stored and
//! compared verbatim.

use thiserror::Error;

pub const ADMIN: &str = "ADMIN";
pub const USER: &str = "USER";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("a role set must contain at least one role")]
pub struct EmptyRoleSet;

/// Ordered, de-duplicated, non-empty set of roles a route accepts.
///
/// Bound once at route registration and shared by every request to that
/// route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleSet(Vec<String>);

impl RoleSet {
    pub fn new<I, S>(roles: I) -> Result<Self, EmptyRoleSet>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set: Vec<String> = Vec::new();
        for role in roles {
            let role = role.into();
            if !set.contains(&role) {
                set.push(role);
            }
        }

        if set.is_empty() {
            return Err(EmptyRoleSet);
        }

        Ok(Self(set))
    }

    pub fn single(role: impl Into<String>) -> Self {
        Self(vec![role.into()])
    }

    pub fn contains(&self, role: &str) -> bool {
        self.0.iter().any(|allowed| allowed == role)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

impl std::fmt::Display for RoleSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.0.join(", "))
    }
}

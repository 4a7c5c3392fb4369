//! Account models and DTOs.
//!
//! An account is a tenant: a company with an administrator contact and the
//! set of features it has enabled. Company name and admin email are unique.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// A tenant account as stored and returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: Uuid,
    pub company_name: String,
    pub admin_name: String,
    pub admin_email: String,
    pub admin_contact_no: i64,
    /// Enabled features, in the order they were submitted
    pub features: Vec<String>,
    /// Subject id of the user who created the account
    pub created_by: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Rejects empty and whitespace-only strings.
fn non_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("required"));
    }
    Ok(())
}

/// Request body for `POST /api/account`.
///
/// Missing string and list fields deserialize as empty so the validation
/// messages below are reported instead of a generic parse error.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateAccountDto {
    #[serde(default)]
    #[validate(custom(function = "non_blank", message = "Company Name is required"))]
    pub company_name: String,

    #[serde(default)]
    #[validate(custom(function = "non_blank", message = "Admin Name is required"))]
    pub admin_name: String,

    #[serde(default)]
    #[validate(
        custom(function = "non_blank", message = "Admin Email is required"),
        email(message = "Admin Email must be a valid email")
    )]
    pub admin_email: String,

    #[validate(required(message = "Admin Contact Number is required"))]
    pub admin_contact_no: Option<i64>,

    #[serde(default)]
    #[validate(length(min = 1, message = "At least one feature should be selected"))]
    pub features: Vec<String>,
}

impl CreateAccountDto {
    /// Converts a validated request into a record owned by `created_by`.
    ///
    /// Returns `None` only if the DTO skipped validation and lacks a contact
    /// number.
    pub fn into_new_account(self, created_by: impl Into<String>) -> Option<NewAccount> {
        Some(NewAccount {
            company_name: self.company_name,
            admin_name: self.admin_name,
            admin_email: self.admin_email,
            admin_contact_no: self.admin_contact_no?,
            features: self.features,
            created_by: created_by.into(),
        })
    }
}

/// Fields of an account about to be inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccount {
    pub company_name: String,
    pub admin_name: String,
    pub admin_email: String,
    pub admin_contact_no: i64,
    pub features: Vec<String>,
    pub created_by: String,
}

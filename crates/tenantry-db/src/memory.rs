//! In-process store.
//!
//! Backs the integration tests and lets the server run without a database.
//! Data lives as long as the process.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tenantry_models::{Account, NewAccount, NewUser, User};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::StoreError;
use crate::{AccountStore, UserStore};

#[derive(Debug, Default)]
struct Tables {
    users: Vec<User>,
    // Insertion order; created_at never decreases along it.
    accounts: Vec<Account>,
}

#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn account_count(&self) -> usize {
        self.tables.read().await.accounts.len()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_user_by_id(&self, id: &str) -> Result<Option<User>, StoreError> {
        let Ok(id) = Uuid::parse_str(id) else {
            return Ok(None);
        };

        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.id == id).cloned())
    }

    async fn insert_user(&self, user: NewUser) -> Result<User, StoreError> {
        let mut tables = self.tables.write().await;
        if tables.users.iter().any(|u| u.email == user.email) {
            return Err(StoreError::Conflict("users_email_key".to_string()));
        }

        let user = User {
            id: Uuid::new_v4(),
            name: user.name,
            email: user.email,
            role: user.role,
            created_at: Utc::now(),
        };
        tables.users.push(user.clone());

        Ok(user)
    }
}

#[async_trait]
impl AccountStore for MemoryStore {
    async fn find_account_by_email(&self, email: &str) -> Result<Option<Account>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .accounts
            .iter()
            .find(|a| a.admin_email == email)
            .cloned())
    }

    async fn find_account_by_id(&self, id: Uuid) -> Result<Option<Account>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.accounts.iter().find(|a| a.id == id).cloned())
    }

    async fn insert_account(&self, account: NewAccount) -> Result<Account, StoreError> {
        let mut tables = self.tables.write().await;

        if tables
            .accounts
            .iter()
            .any(|a| a.company_name == account.company_name)
        {
            return Err(StoreError::Conflict("accounts_company_name_key".to_string()));
        }
        if tables
            .accounts
            .iter()
            .any(|a| a.admin_email == account.admin_email)
        {
            return Err(StoreError::Conflict("accounts_admin_email_key".to_string()));
        }

        let now = Utc::now();
        let created_at = tables
            .accounts
            .last()
            .map_or(now, |last| last.created_at.max(now));

        let account = Account {
            id: Uuid::new_v4(),
            company_name: account.company_name,
            admin_name: account.admin_name,
            admin_email: account.admin_email,
            admin_contact_no: account.admin_contact_no,
            features: account.features,
            created_by: account.created_by,
            created_at,
        };
        tables.accounts.push(account.clone());

        Ok(account)
    }

    async fn list_accounts(&self) -> Result<Vec<Account>, StoreError> {
        Ok(self.tables.read().await.accounts.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_account(company: &str, email: &str) -> NewAccount {
        NewAccount {
            company_name: company.to_string(),
            admin_name: "Jo".to_string(),
            admin_email: email.to_string(),
            admin_contact_no: 555,
            features: vec!["x".to_string()],
            created_by: "u1".to_string(),
        }
    }

    #[tokio::test]
    async fn test_insert_and_find_user() {
        let store = MemoryStore::new();
        let user = store
            .insert_user(NewUser {
                name: "Ada".to_string(),
                email: "ada@example.com".to_string(),
                role: "ADMIN".to_string(),
            })
            .await
            .unwrap();

        let found = store.find_user_by_id(&user.id.to_string()).await.unwrap();
        assert_eq!(found, Some(user));
    }

    #[tokio::test]
    async fn test_find_user_with_non_uuid_id() {
        let store = MemoryStore::new();
        assert_eq!(store.find_user_by_id("not-a-uuid").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_duplicate_user_email_conflicts() {
        let store = MemoryStore::new();
        let user = NewUser {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            role: "USER".to_string(),
        };
        store.insert_user(user.clone()).await.unwrap();

        let err = store.insert_user(user).await.unwrap_err();
        assert!(err.is_conflict());
    }

    #[tokio::test]
    async fn test_account_unique_keys() {
        let store = MemoryStore::new();
        store
            .insert_account(new_account("Acme", "jo@acme.com"))
            .await
            .unwrap();

        let same_company = store
            .insert_account(new_account("Acme", "other@acme.com"))
            .await
            .unwrap_err();
        assert!(matches!(same_company, StoreError::Conflict(ref c) if c == "accounts_company_name_key"));

        let same_email = store
            .insert_account(new_account("Globex", "jo@acme.com"))
            .await
            .unwrap_err();
        assert!(matches!(same_email, StoreError::Conflict(ref c) if c == "accounts_admin_email_key"));

        assert_eq!(store.account_count().await, 1);
    }

    #[tokio::test]
    async fn test_list_accounts_keeps_insertion_order() {
        let store = MemoryStore::new();
        let first = store
            .insert_account(new_account("Acme", "jo@acme.com"))
            .await
            .unwrap();
        let second = store
            .insert_account(new_account("Globex", "hank@globex.com"))
            .await
            .unwrap();

        let listed = store.list_accounts().await.unwrap();
        assert_eq!(listed, vec![first.clone(), second]);
        assert_eq!(
            store.find_account_by_email("jo@acme.com").await.unwrap(),
            Some(first.clone())
        );
        assert_eq!(store.find_account_by_id(first.id).await.unwrap(), Some(first));
    }
}

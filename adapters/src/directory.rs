//! Static credential table implementing [`CredentialDirectory`].
//!
//! Stands in for a real credential-verification service. The table is seeded
//! with one account per role for a given email domain; accounts enrolled at
//! runtime are kept in memory only.

use std::collections::HashMap;

use async_trait::async_trait;
use log::{debug, info};
use tokio::sync::RwLock;

use crate::errors::{AdapterError, AdapterResult};
use crate::models::{Account, Identity, Role};
use crate::CredentialDirectory;

#[derive(Debug)]
pub struct StaticDirectory {
    accounts: RwLock<HashMap<String, Account>>,
}

impl StaticDirectory {
    /// The four demo accounts for `domain`: `<role>@<domain>` with the role
    /// name as password.
    pub fn seeded(domain: &str) -> Self {
        let seed = [
            (1, Role::Admin, "Admin User"),
            (2, Role::Finance, "Finance User"),
            (3, Role::Approver, "Approver User"),
            (4, Role::Employee, "Employee User"),
        ];
        Self::from_accounts(seed.into_iter().map(|(id, role, name)| {
            Account::new(id, format!("{role}@{domain}"), name, role, role.as_str())
        }))
    }

    pub fn from_accounts(accounts: impl IntoIterator<Item = Account>) -> Self {
        Self {
            accounts: RwLock::new(
                accounts
                    .into_iter()
                    .map(|account| (account.identity.email.clone(), account))
                    .collect(),
            ),
        }
    }

    pub async fn len(&self) -> usize {
        self.accounts.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.accounts.read().await.is_empty()
    }
}

#[async_trait]
impl CredentialDirectory for StaticDirectory {
    async fn verify(&self, email: &str, password: &str) -> Option<Identity> {
        let accounts = self.accounts.read().await;
        match accounts.get(email) {
            Some(account) if account.password == password => Some(account.identity.clone()),
            Some(_) => {
                debug!("password mismatch for {email}");
                None
            }
            None => {
                debug!("no account for {email}");
                None
            }
        }
    }

    async fn enroll(&self, email: &str, name: &str, password: &str) -> AdapterResult<Identity> {
        let mut accounts = self.accounts.write().await;
        if accounts.contains_key(email) {
            return Err(AdapterError::EmailTaken(email.to_string()));
        }
        let id = accounts
            .values()
            .map(|account| account.identity.id)
            .max()
            .unwrap_or(0)
            + 1;
        let account = Account::new(id, email, name, Role::Employee, password);
        let identity = account.identity.clone();
        accounts.insert(email.to_string(), account);
        info!("enrolled {email} as {} (id {id})", identity.role);
        Ok(identity)
    }
}

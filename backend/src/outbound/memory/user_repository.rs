//! Account store keyed by username.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{UserAccount, UserPersistenceError, UserRepository};
use crate::domain::{User, UserId, Username};

/// In-memory [`UserRepository`].
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    accounts: Mutex<HashMap<Username, UserAccount>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(
        &self,
    ) -> Result<MutexGuard<'_, HashMap<Username, UserAccount>>, UserPersistenceError> {
        self.accounts
            .lock()
            .map_err(|_| UserPersistenceError::query("user store lock poisoned"))
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, account: &UserAccount) -> Result<(), UserPersistenceError> {
        let mut accounts = self.lock()?;
        let username = account.user.username();
        if accounts.contains_key(username) {
            return Err(UserPersistenceError::duplicate_username(username.as_ref()));
        }
        accounts.insert(username.clone(), account.clone());
        Ok(())
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<UserAccount>, UserPersistenceError> {
        Ok(self.lock()?.get(username).cloned())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        Ok(self
            .lock()?
            .values()
            .find(|account| account.user.id() == id)
            .map(|account| account.user.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PasswordDigest;

    fn account(username: &str) -> UserAccount {
        UserAccount {
            user: User::new(UserId::random(), Username::new(username).expect("username")),
            password: PasswordDigest::create("pw").expect("hash password"),
        }
    }

    #[tokio::test]
    async fn usernames_are_unique() {
        let repo = InMemoryUserRepository::new();
        repo.insert(&account("author")).await.expect("insert");

        let err = repo.insert(&account("author")).await.expect_err("duplicate");

        assert_eq!(err, UserPersistenceError::duplicate_username("author"));
    }

    #[tokio::test]
    async fn lookups_find_stored_account() {
        let repo = InMemoryUserRepository::new();
        let stored = account("author");
        repo.insert(&stored).await.expect("insert");

        let by_name = repo
            .find_by_username(stored.user.username())
            .await
            .expect("lookup");
        let by_id = repo.find_by_id(stored.user.id()).await.expect("lookup");

        assert_eq!(by_name, Some(stored.clone()));
        assert_eq!(by_id, Some(stored.user));
    }
}

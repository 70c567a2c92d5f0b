//! Account registration and login backed by a [`UserRepository`].

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::domain::ports::{
    LoginService, SignupOutcome, SignupService, UserAccount, UserPersistenceError,
    UserRepository,
};
use crate::domain::{
    Error, FieldErrors, LoginCredentials, PasswordDigest, SignupRequest, User, UserId, Username,
};

const INVALID_CREDENTIALS: &str = "invalid credentials";

fn map_repository_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserPersistenceError::DuplicateUsername { username } => {
            Error::conflict(format!("username already exists: {username}"))
        }
    }
}

fn username_taken() -> SignupOutcome {
    let mut errors = FieldErrors::default();
    errors.add("username", "a user with that username already exists");
    SignupOutcome::Rejected(errors)
}

/// Account service implementing [`LoginService`] and [`SignupService`].
#[derive(Clone)]
pub struct AccountService<R> {
    users: Arc<R>,
}

impl<R> AccountService<R> {
    pub fn new(users: Arc<R>) -> Self {
        Self { users }
    }
}

#[async_trait]
impl<R> LoginService for AccountService<R>
where
    R: UserRepository,
{
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error> {
        let Ok(username) = Username::new(credentials.username()) else {
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        };
        let account = self
            .users
            .find_by_username(&username)
            .await
            .map_err(map_repository_error)?;

        match account {
            Some(account) if account.password.verify(credentials.password()) => {
                info!(user = %account.user.id(), "login succeeded");
                Ok(account.user.id().clone())
            }
            _ => {
                warn!(%username, "login rejected");
                Err(Error::unauthorized(INVALID_CREDENTIALS))
            }
        }
    }
}

#[async_trait]
impl<R> SignupService for AccountService<R>
where
    R: UserRepository,
{
    async fn register(&self, request: &SignupRequest) -> Result<SignupOutcome, Error> {
        let existing = self
            .users
            .find_by_username(request.username())
            .await
            .map_err(map_repository_error)?;
        if existing.is_some() {
            return Ok(username_taken());
        }

        let password = PasswordDigest::create(request.password()).map_err(|error| {
            warn!(%error, "password hashing failed");
            Error::internal("unable to create account")
        })?;
        let account = UserAccount {
            user: User::new(UserId::random(), request.username().clone()),
            password,
        };
        match self.users.insert(&account).await {
            Ok(()) => {
                info!(user = %account.user.id(), username = %account.user.username(), "account created");
                Ok(SignupOutcome::Registered(account.user))
            }
            Err(UserPersistenceError::DuplicateUsername { .. }) => Ok(username_taken()),
            Err(error) => Err(map_repository_error(error)),
        }
    }
}

//! Driving port for account registration.

use async_trait::async_trait;

use crate::domain::{Error, FieldErrors, SignupRequest, User};

/// Result of a signup submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignupOutcome {
    /// The account was created.
    Registered(User),
    /// The submission was rejected, for example because the username is taken.
    Rejected(FieldErrors),
}

/// Domain use-case port for creating accounts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SignupService: Send + Sync {
    /// Create an account for the validated request.
    async fn register(&self, request: &SignupRequest) -> Result<SignupOutcome, Error>;
}

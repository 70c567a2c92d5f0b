//! Authentication primitives: login credentials, signup forms, and password
//! digests.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to a port or service.

use std::fmt;

use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::{Algorithm, Argon2};
use rand::RngCore;
use zeroize::Zeroizing;

use super::{FieldErrors, Username};

/// Domain error returned when login payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoginValidationError {
    /// Username was missing or blank once trimmed.
    #[error("username must not be empty")]
    EmptyUsername,
    /// Password was blank.
    #[error("password must not be empty")]
    EmptyPassword,
}

/// Validated login credentials used by authentication services.
///
/// ## Invariants
/// - `username` is trimmed and must not be empty after trimming.
/// - `password` is required to be non-empty but retains caller-provided
///   whitespace to avoid surprising credential comparisons.
///
/// # Examples
/// ```
/// use backend::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts("author", "secret").unwrap();
/// assert_eq!(creds.username(), "author");
/// assert_eq!(creds.password(), "secret");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw username/password inputs.
    pub fn try_from_parts(username: &str, password: &str) -> Result<Self, LoginValidationError> {
        let normalized = username.trim();
        if normalized.is_empty() {
            return Err(LoginValidationError::EmptyUsername);
        }

        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }

        Ok(Self {
            username: normalized.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Username string suitable for user lookups.
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Password string provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Validated signup submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignupRequest {
    username: Username,
    password: Zeroizing<String>,
}

impl SignupRequest {
    /// Validate the raw signup fields.
    ///
    /// Errors are keyed by `username`, `password1`, and `password2`.
    pub fn try_from_parts(
        username: &str,
        password1: &str,
        password2: &str,
    ) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::default();
        let username = Username::new(username);
        if let Err(err) = &username {
            errors.add("username", err.to_string());
        }
        if password1.is_empty() {
            errors.add("password1", "password must not be empty");
        }
        if password2.is_empty() {
            errors.add("password2", "password confirmation must not be empty");
        } else if password1 != password2 {
            errors.add("password2", "the two password fields didn't match");
        }

        match username {
            Ok(username) if errors.is_empty() => Ok(Self {
                username,
                password: Zeroizing::new(password1.to_owned()),
            }),
            _ => Err(errors),
        }
    }

    /// Requested username.
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Requested password.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

const SALT_LEN: usize = 16;

/// Errors raised when creating or decoding a stored digest.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PasswordDigestError {
    /// The encoded value is not a PHC string.
    #[error("password digest is malformed")]
    Malformed,
    /// The PHC algorithm identifier is not Argon2id.
    #[error("unsupported password digest algorithm: {0}")]
    UnsupportedAlgorithm(String),
    /// The hasher rejected its inputs.
    #[error("password hashing failed: {0}")]
    Hash(String),
}

/// Argon2id password digest stored as a PHC string
/// (`$argon2id$v=19$m=..,t=..,p=..$<salt>$<hash>`).
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordDigest {
    phc: String,
}

impl PasswordDigest {
    /// Hash `password` with a fresh random salt.
    pub fn create(password: &str) -> Result<Self, PasswordDigestError> {
        let mut bytes = [0_u8; SALT_LEN];
        rand::thread_rng().fill_bytes(&mut bytes);
        let salt = SaltString::encode_b64(&bytes)
            .map_err(|err| PasswordDigestError::Hash(err.to_string()))?;
        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|err| PasswordDigestError::Hash(err.to_string()))?;
        Ok(Self {
            phc: hash.to_string(),
        })
    }

    /// Decode a digest previously produced by [`PasswordDigest::encode`].
    pub fn decode(encoded: &str) -> Result<Self, PasswordDigestError> {
        let parsed = PasswordHash::new(encoded).map_err(|_| PasswordDigestError::Malformed)?;
        if parsed.algorithm != Algorithm::Argon2id.ident() {
            return Err(PasswordDigestError::UnsupportedAlgorithm(
                parsed.algorithm.to_string(),
            ));
        }
        if parsed.hash.is_none() {
            return Err(PasswordDigestError::Malformed);
        }
        Ok(Self {
            phc: encoded.to_owned(),
        })
    }

    /// Storage encoding.
    pub fn encode(&self) -> String {
        self.phc.clone()
    }

    /// `true` when `password` produces this digest.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::PasswordDigest;
    ///
    /// let digest = PasswordDigest::create("secret").expect("hash");
    /// assert!(digest.verify("secret"));
    /// assert!(!digest.verify("Secret"));
    /// ```
    pub fn verify(&self, password: &str) -> bool {
        PasswordHash::new(&self.phc).is_ok_and(|parsed| {
            Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok()
        })
    }
}

impl fmt::Debug for PasswordDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordDigest(..)")
    }
}

//! Session cookie settings read from the environment.
//!
//! | Variable                  | Meaning                                   |
//! |---------------------------|-------------------------------------------|
//! | `SESSION_KEY_FILE`        | path to the cookie signing key material   |
//! | `SESSION_COOKIE_SECURE`   | mark the cookie `Secure` (`1`/`0`)        |
//! | `SESSION_SAMESITE`        | `Strict`, `Lax`, or `None`                |
//! | `SESSION_ALLOW_EPHEMERAL` | fall back to a random key (debug only)    |
//!
//! Debug builds warn and fall back to defaults; release builds reject
//! missing or malformed values.

use std::path::PathBuf;

use actix_web::cookie::{Key, SameSite};
use mockable::Env;
use tracing::warn;
use zeroize::Zeroize;

const SESSION_KEY_DEFAULT_PATH: &str = "/var/run/secrets/session_key";
const SESSION_KEY_MIN_LEN: usize = 64;
// `Key::derive_from` panics on shorter input.
const SESSION_KEY_DERIVE_MIN_LEN: usize = 32;
const KEY_FILE_ENV: &str = "SESSION_KEY_FILE";
const COOKIE_SECURE_ENV: &str = "SESSION_COOKIE_SECURE";
const SAMESITE_ENV: &str = "SESSION_SAMESITE";
const ALLOW_EPHEMERAL_ENV: &str = "SESSION_ALLOW_EPHEMERAL";
const BOOL_EXPECTED: &str = "1|0|true|false|yes|no|y|n";
const SAMESITE_EXPECTED: &str = "Strict|Lax|None";

/// Build mode for session configuration validation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    /// Tolerate defaults and warn.
    Debug,
    /// Require explicit, valid settings.
    Release,
}

impl BuildMode {
    /// Determine the build mode from `cfg!(debug_assertions)`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use backend::inbound::http::session_config::BuildMode;
    ///
    /// let mode = BuildMode::from_debug_assertions();
    /// assert_eq!(mode == BuildMode::Debug, cfg!(debug_assertions));
    /// ```
    #[must_use]
    pub fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }
}

/// Validated session cookie settings.
pub struct SessionSettings {
    /// Signing and encryption key for cookie sessions.
    pub key: Key,
    pub cookie_secure: bool,
    pub same_site: SameSite,
}

/// Errors raised while validating session configuration.
#[derive(thiserror::Error, Debug)]
pub enum SessionConfigError {
    #[error("missing required environment variable: {name}")]
    MissingEnv { name: &'static str },
    #[error("invalid value for {name}='{value}'; expected {expected}")]
    InvalidEnv {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
    #[error("failed to read session key at {path}: {source}")]
    KeyRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("session key at {path} too short: need >= {min_len} bytes, got {length}")]
    KeyTooShort {
        path: PathBuf,
        length: usize,
        min_len: usize,
    },
    #[error("SESSION_SAMESITE=None requires SESSION_COOKIE_SECURE=1")]
    InsecureSameSiteNone,
    #[error("SESSION_ALLOW_EPHEMERAL must be 0 in release builds")]
    EphemeralNotAllowed,
}

/// Environment reader applying the build mode's strictness.
struct Lookup<'a, E> {
    env: &'a E,
    mode: BuildMode,
}

impl<E: Env> Lookup<'_, E> {
    /// Value of `name`; `None` when unset in a debug build.
    fn required(&self, name: &'static str) -> Result<Option<String>, SessionConfigError> {
        match (self.env.string(name), self.mode) {
            (Some(value), _) => Ok(Some(value)),
            (None, BuildMode::Debug) => {
                warn!(variable = name, "session setting not set; using default");
                Ok(None)
            }
            (None, BuildMode::Release) => Err(SessionConfigError::MissingEnv { name }),
        }
    }

    /// Report an unparsable value: a warning in debug, an error in release.
    fn invalid<T>(
        &self,
        name: &'static str,
        value: String,
        expected: &'static str,
        fallback: T,
    ) -> Result<T, SessionConfigError> {
        match self.mode {
            BuildMode::Debug => {
                warn!(variable = name, value = %value, "invalid session setting; using default");
                Ok(fallback)
            }
            BuildMode::Release => Err(SessionConfigError::InvalidEnv {
                name,
                value,
                expected,
            }),
        }
    }

    fn flag(&self, name: &'static str, fallback: bool) -> Result<bool, SessionConfigError> {
        let Some(value) = self.required(name)? else {
            return Ok(fallback);
        };
        match parse_bool(&value) {
            Some(flag) => Ok(flag),
            None => self.invalid(name, value, BOOL_EXPECTED, fallback),
        }
    }

    fn same_site(&self, cookie_secure: bool) -> Result<SameSite, SessionConfigError> {
        let fallback = match self.mode {
            BuildMode::Debug => SameSite::Lax,
            BuildMode::Release => SameSite::Strict,
        };
        let Some(value) = self.required(SAMESITE_ENV)? else {
            return Ok(fallback);
        };
        match value.to_ascii_lowercase().as_str() {
            "lax" => Ok(SameSite::Lax),
            "strict" => Ok(SameSite::Strict),
            "none" if cookie_secure => Ok(SameSite::None),
            "none" => match self.mode {
                BuildMode::Debug => {
                    warn!("SESSION_SAMESITE=None without a secure cookie; browsers may reject it");
                    Ok(SameSite::None)
                }
                BuildMode::Release => Err(SessionConfigError::InsecureSameSiteNone),
            },
            _ => self.invalid(SAMESITE_ENV, value, SAMESITE_EXPECTED, fallback),
        }
    }

    fn key(&self, allow_ephemeral: bool) -> Result<Key, SessionConfigError> {
        let path = PathBuf::from(
            self.env
                .string(KEY_FILE_ENV)
                .unwrap_or_else(|| SESSION_KEY_DEFAULT_PATH.to_owned()),
        );

        let mut bytes = match std::fs::read(&path) {
            Ok(bytes) => bytes,
            Err(error) if self.mode == BuildMode::Debug || allow_ephemeral => {
                warn!(
                    path = %path.display(),
                    error = %error,
                    "using temporary session key (dev only)"
                );
                return Ok(Key::generate());
            }
            Err(source) => return Err(SessionConfigError::KeyRead { path, source }),
        };

        let length = bytes.len();
        let min_len = match self.mode {
            BuildMode::Debug => SESSION_KEY_DERIVE_MIN_LEN,
            BuildMode::Release => SESSION_KEY_MIN_LEN,
        };
        let result = if length < min_len {
            Err(SessionConfigError::KeyTooShort {
                path,
                length,
                min_len,
            })
        } else {
            Ok(Key::derive_from(&bytes))
        };
        bytes.zeroize();
        result
    }
}

/// Build session settings from environment variables and build mode.
///
/// # Examples
///
/// ```rust
/// use backend::inbound::http::session_config::{BuildMode, session_settings_from_env};
/// use mockable::MockEnv;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let key_path = std::env::temp_dir().join("notes_session_key_example");
/// std::fs::write(&key_path, vec![b'a'; 64])?;
///
/// let key_path = key_path.to_str().expect("valid path").to_string();
/// let mut env = MockEnv::new();
/// env.expect_string().returning(move |name| match name {
///     "SESSION_KEY_FILE" => Some(key_path.clone()),
///     "SESSION_COOKIE_SECURE" => Some("1".to_string()),
///     "SESSION_SAMESITE" => Some("Strict".to_string()),
///     "SESSION_ALLOW_EPHEMERAL" => Some("0".to_string()),
///     _ => None,
/// });
///
/// let settings = session_settings_from_env(&env, BuildMode::Release)?;
/// assert!(settings.cookie_secure);
/// # Ok(())
/// # }
/// ```
pub fn session_settings_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
) -> Result<SessionSettings, SessionConfigError> {
    let lookup = Lookup { env, mode };
    let cookie_secure = lookup.flag(COOKIE_SECURE_ENV, true)?;
    let same_site = lookup.same_site(cookie_secure)?;
    let allow_ephemeral = lookup.flag(ALLOW_EPHEMERAL_ENV, false)?;
    if allow_ephemeral && mode == BuildMode::Release {
        return Err(SessionConfigError::EphemeralNotAllowed);
    }
    let key = lookup.key(allow_ephemeral)?;

    Ok(SessionSettings {
        key,
        cookie_secure,
        same_site,
    })
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" => Some(true),
        "0" | "false" | "no" | "n" => Some(false),
        _ => None,
    }
}

//! Domain primitives, aggregates, and services.
//!
//! Purpose: Define strongly typed domain entities used by the HTTP and
//! persistence layers. Keep types immutable and document invariants and
//! serialisation contracts (serde) in each type's Rustdoc.
//!
//! Public surface:
//! - Error (alias to `error::Error`): API error response payload.
//! - ErrorCode (alias to `error::ErrorCode`): stable error identifier.
//! - Note (alias to `note::Note`): a user's note, addressed by its slug.
//! - NoteSlug (alias to `slug::NoteSlug`): unique URL-safe note identifier.
//! - User (alias to `user::User`): account identity and login name.
//! - NoteService / AccountService: use-case implementations behind ports.

pub mod account_service;
pub mod auth;
pub mod error;
pub mod form;
pub mod note;
pub mod note_service;
pub mod ports;
pub mod slug;
pub mod trace_id;
pub mod user;

pub use self::account_service::AccountService;
pub use self::auth::{
    LoginCredentials, LoginValidationError, PasswordDigest, PasswordDigestError, SignupRequest,
};
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::form::{FieldErrors, NON_FIELD_ERRORS};
pub use self::note::{Note, NoteDraft, NoteSubmission, TITLE_MAX_LEN, duplicate_slug_message};
pub use self::note_service::NoteService;
pub use self::slug::{NoteSlug, SLUG_MAX_LEN, SlugValidationError, slugify};
pub use self::trace_id::TraceId;
pub use self::user::{USERNAME_MAX, User, UserId, UserValidationError, Username};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::not_found("no such note"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;

//! In-process repository adapters.
//!
//! Used when no database URL is configured and by the HTTP integration
//! tests. State lives for the lifetime of the process.

mod note_repository;
mod user_repository;

pub use note_repository::InMemoryNoteRepository;
pub use user_repository::InMemoryUserRepository;

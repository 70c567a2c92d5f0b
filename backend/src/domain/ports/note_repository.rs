//! Port for note persistence adapters.
//!
//! Adapters must enforce slug uniqueness themselves (a unique index or an
//! equivalent check inside one critical section) and report collisions as
//! [`NotePersistenceError::DuplicateSlug`]. The ownership rules are applied by
//! the domain service, not by adapters.

use async_trait::async_trait;

use crate::domain::{Note, NoteSlug, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by note repository adapters.
    pub enum NotePersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "note repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "note repository query failed: {message}",
        /// Another note already uses the slug.
        DuplicateSlug { slug: String } => "note slug already exists: {slug}",
    }
}

/// Driven port over the note store.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NoteRepository: Send + Sync {
    /// Insert a new note.
    async fn insert(&self, note: &Note) -> Result<(), NotePersistenceError>;

    /// Replace the note stored under `current` with `note`, whose slug may
    /// differ. Returns `false` when no note is stored under `current`.
    async fn update(&self, current: &NoteSlug, note: &Note)
    -> Result<bool, NotePersistenceError>;

    /// Remove a note. Returns `false` when it did not exist.
    async fn delete(&self, slug: &NoteSlug) -> Result<bool, NotePersistenceError>;

    /// Fetch a note by slug regardless of author.
    async fn find_by_slug(&self, slug: &NoteSlug) -> Result<Option<Note>, NotePersistenceError>;

    /// Notes written by `author`, oldest first.
    async fn list_by_author(&self, author: &UserId) -> Result<Vec<Note>, NotePersistenceError>;

    /// Number of stored notes using `slug` (zero or one).
    async fn count_by_slug(&self, slug: &NoteSlug) -> Result<usize, NotePersistenceError>;
}

//! Driving port for reading notes through the ownership gate.
//!
//! Inbound adapters use this port to show a user their notes without knowing
//! how notes are stored or how visibility is decided.

use async_trait::async_trait;

use crate::domain::{Error, Note, NoteSlug, UserId};

/// Domain use-case port for note reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotesQuery: Send + Sync {
    /// Notes authored by `viewer`, oldest first.
    async fn list_notes(&self, viewer: &UserId) -> Result<Vec<Note>, Error>;

    /// The note stored under `slug` when `viewer` authored it.
    ///
    /// Missing notes and notes owned by someone else both fail with
    /// [`crate::domain::ErrorCode::NotFound`].
    async fn owned_note(&self, viewer: &UserId, slug: &NoteSlug) -> Result<Note, Error>;
}

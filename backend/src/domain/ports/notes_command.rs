//! Driving port for note mutations.

use async_trait::async_trait;

use crate::domain::{Error, FieldErrors, Note, NoteSlug, NoteSubmission, UserId};

/// Result of a create or edit submission.
///
/// A rejected submission is an expected outcome, not an [`Error`]: callers
/// redisplay the form with the errors and the submitted values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteSubmissionOutcome {
    /// The note was stored.
    Saved(Note),
    /// Validation failed; nothing was stored.
    Rejected(FieldErrors),
}

/// Domain use-case port for creating, editing, and deleting notes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotesCommand: Send + Sync {
    /// Create a note authored by `author`.
    async fn create_note(
        &self,
        author: &UserId,
        submission: &NoteSubmission,
    ) -> Result<NoteSubmissionOutcome, Error>;

    /// Edit the note stored under `slug`; only its author may do so.
    async fn update_note(
        &self,
        editor: &UserId,
        slug: &NoteSlug,
        submission: &NoteSubmission,
    ) -> Result<NoteSubmissionOutcome, Error>;

    /// Delete the note stored under `slug`; only its author may do so.
    async fn delete_note(&self, editor: &UserId, slug: &NoteSlug) -> Result<(), Error>;
}

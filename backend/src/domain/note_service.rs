//! Note domain service.
//!
//! Implements the note driving ports on top of a [`NoteRepository`]. Two
//! policies live here:
//!
//! - the ownership gate: a user only ever sees or mutates notes they wrote,
//!   and everything else looks as if it does not exist;
//! - the slug manager: slugs are derived from titles when omitted and must be
//!   unique across all notes.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{debug, info};

use crate::domain::ports::{
    NotePersistenceError, NoteRepository, NoteSubmissionOutcome, NotesCommand, NotesQuery,
};
use crate::domain::{
    Error, FieldErrors, Note, NoteSlug, NoteSubmission, UserId, duplicate_slug_message,
};

const NOTE_NOT_FOUND: &str = "note not found";

fn map_repository_error(error: NotePersistenceError) -> Error {
    match error {
        NotePersistenceError::Connection { message } => {
            Error::service_unavailable(format!("note repository unavailable: {message}"))
        }
        NotePersistenceError::Query { message } => {
            Error::internal(format!("note repository error: {message}"))
        }
        NotePersistenceError::DuplicateSlug { slug } => {
            Error::conflict(format!("note slug already exists: {slug}"))
        }
    }
}

fn duplicate_slug(slug: &NoteSlug) -> NoteSubmissionOutcome {
    let mut errors = FieldErrors::default();
    errors.add("slug", duplicate_slug_message(slug));
    NoteSubmissionOutcome::Rejected(errors)
}

/// Note service implementing [`NotesQuery`] and [`NotesCommand`].
#[derive(Clone)]
pub struct NoteService<R> {
    notes: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> NoteService<R> {
    /// Create a service over `notes`, stamping new notes with `clock`.
    pub fn new(notes: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { notes, clock }
    }
}

impl<R> NoteService<R>
where
    R: NoteRepository,
{
    async fn owned(&self, viewer: &UserId, slug: &NoteSlug) -> Result<Note, Error> {
        let note = self
            .notes
            .find_by_slug(slug)
            .await
            .map_err(map_repository_error)?;
        match note {
            Some(note) if note.is_owned_by(viewer) => Ok(note),
            Some(_) => {
                debug!(%slug, user = %viewer, "note hidden from non-author");
                Err(Error::not_found(NOTE_NOT_FOUND))
            }
            None => Err(Error::not_found(NOTE_NOT_FOUND)),
        }
    }

    async fn slug_taken(&self, slug: &NoteSlug) -> Result<bool, Error> {
        let count = self
            .notes
            .count_by_slug(slug)
            .await
            .map_err(map_repository_error)?;
        Ok(count > 0)
    }
}

#[async_trait]
impl<R> NotesQuery for NoteService<R>
where
    R: NoteRepository,
{
    async fn list_notes(&self, viewer: &UserId) -> Result<Vec<Note>, Error> {
        self.notes
            .list_by_author(viewer)
            .await
            .map_err(map_repository_error)
    }

    async fn owned_note(&self, viewer: &UserId, slug: &NoteSlug) -> Result<Note, Error> {
        self.owned(viewer, slug).await
    }
}

#[async_trait]
impl<R> NotesCommand for NoteService<R>
where
    R: NoteRepository,
{
    async fn create_note(
        &self,
        author: &UserId,
        submission: &NoteSubmission,
    ) -> Result<NoteSubmissionOutcome, Error> {
        let draft = match submission.validate() {
            Ok(draft) => draft,
            Err(errors) => return Ok(NoteSubmissionOutcome::Rejected(errors)),
        };
        if self.slug_taken(draft.slug()).await? {
            return Ok(duplicate_slug(draft.slug()));
        }

        let note = Note::create(draft, author.clone(), self.clock.utc());
        match self.notes.insert(&note).await {
            Ok(()) => {
                info!(slug = %note.slug(), author = %author, "note created");
                Ok(NoteSubmissionOutcome::Saved(note))
            }
            // Lost a race with a concurrent insert; the store's constraint won.
            Err(NotePersistenceError::DuplicateSlug { .. }) => Ok(duplicate_slug(note.slug())),
            Err(error) => Err(map_repository_error(error)),
        }
    }

    async fn update_note(
        &self,
        editor: &UserId,
        slug: &NoteSlug,
        submission: &NoteSubmission,
    ) -> Result<NoteSubmissionOutcome, Error> {
        let current = self.owned(editor, slug).await?;
        let draft = match submission.validate() {
            Ok(draft) => draft,
            Err(errors) => return Ok(NoteSubmissionOutcome::Rejected(errors)),
        };
        if draft.slug() != current.slug() && self.slug_taken(draft.slug()).await? {
            return Ok(duplicate_slug(draft.slug()));
        }

        let revised = current.revised(draft);
        match self.notes.update(current.slug(), &revised).await {
            Ok(true) => {
                info!(from = %current.slug(), to = %revised.slug(), "note updated");
                Ok(NoteSubmissionOutcome::Saved(revised))
            }
            Ok(false) => Err(Error::not_found(NOTE_NOT_FOUND)),
            Err(NotePersistenceError::DuplicateSlug { .. }) => Ok(duplicate_slug(revised.slug())),
            Err(error) => Err(map_repository_error(error)),
        }
    }

    async fn delete_note(&self, editor: &UserId, slug: &NoteSlug) -> Result<(), Error> {
        let note = self.owned(editor, slug).await?;
        let deleted = self
            .notes
            .delete(note.slug())
            .await
            .map_err(map_repository_error)?;
        if !deleted {
            return Err(Error::not_found(NOTE_NOT_FOUND));
        }
        info!(%slug, "note deleted");
        Ok(())
    }
}

#[cfg(test)]
#[path = "note_service_tests.rs"]
mod tests;

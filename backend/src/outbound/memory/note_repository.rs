//! Note store kept in a mutex-guarded vector.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{NotePersistenceError, NoteRepository};
use crate::domain::{Note, NoteSlug, UserId};

/// In-memory [`NoteRepository`] preserving insertion order.
#[derive(Debug, Default)]
pub struct InMemoryNoteRepository {
    notes: Mutex<Vec<Note>>,
}

impl InMemoryNoteRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<Note>>, NotePersistenceError> {
        self.notes
            .lock()
            .map_err(|_| NotePersistenceError::query("note store lock poisoned"))
    }
}

fn position(notes: &[Note], slug: &NoteSlug) -> Option<usize> {
    notes.iter().position(|note| note.slug() == slug)
}

#[async_trait]
impl NoteRepository for InMemoryNoteRepository {
    async fn insert(&self, note: &Note) -> Result<(), NotePersistenceError> {
        let mut notes = self.lock()?;
        if position(&notes, note.slug()).is_some() {
            return Err(NotePersistenceError::duplicate_slug(note.slug().as_ref()));
        }
        notes.push(note.clone());
        Ok(())
    }

    async fn update(
        &self,
        current: &NoteSlug,
        note: &Note,
    ) -> Result<bool, NotePersistenceError> {
        let mut notes = self.lock()?;
        let Some(index) = position(&notes, current) else {
            return Ok(false);
        };
        if note.slug() != current && position(&notes, note.slug()).is_some() {
            return Err(NotePersistenceError::duplicate_slug(note.slug().as_ref()));
        }
        notes[index] = note.clone();
        Ok(true)
    }

    async fn delete(&self, slug: &NoteSlug) -> Result<bool, NotePersistenceError> {
        let mut notes = self.lock()?;
        match position(&notes, slug) {
            Some(index) => {
                notes.remove(index);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn find_by_slug(&self, slug: &NoteSlug) -> Result<Option<Note>, NotePersistenceError> {
        let notes = self.lock()?;
        Ok(notes.iter().find(|note| note.slug() == slug).cloned())
    }

    async fn list_by_author(&self, author: &UserId) -> Result<Vec<Note>, NotePersistenceError> {
        let notes = self.lock()?;
        Ok(notes
            .iter()
            .filter(|note| note.is_owned_by(author))
            .cloned()
            .collect())
    }

    async fn count_by_slug(&self, slug: &NoteSlug) -> Result<usize, NotePersistenceError> {
        let notes = self.lock()?;
        Ok(notes.iter().filter(|note| note.slug() == slug).count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rstest::{fixture, rstest};

    fn note(slug: &str, author: &UserId) -> Note {
        Note::from_parts(
            NoteSlug::new(slug).expect("valid slug"),
            "Заголовок".into(),
            "Текст".into(),
            author.clone(),
            Utc::now(),
        )
    }

    #[fixture]
    fn repo() -> InMemoryNoteRepository {
        InMemoryNoteRepository::new()
    }

    #[rstest]
    #[tokio::test]
    async fn insert_rejects_duplicate_slug(repo: InMemoryNoteRepository) {
        let author = UserId::random();
        repo.insert(&note("first", &author)).await.expect("insert");

        let err = repo
            .insert(&note("first", &UserId::random()))
            .await
            .expect_err("duplicate");

        assert_eq!(err, NotePersistenceError::duplicate_slug("first"));
        assert_eq!(
            repo.count_by_slug(&NoteSlug::new("first").expect("slug"))
                .await
                .expect("count"),
            1
        );
    }

    #[rstest]
    #[tokio::test]
    async fn list_by_author_keeps_insertion_order(repo: InMemoryNoteRepository) {
        let author = UserId::random();
        let other = UserId::random();
        repo.insert(&note("a", &author)).await.expect("insert");
        repo.insert(&note("b", &other)).await.expect("insert");
        repo.insert(&note("c", &author)).await.expect("insert");

        let slugs: Vec<String> = repo
            .list_by_author(&author)
            .await
            .expect("list")
            .iter()
            .map(|note| note.slug().to_string())
            .collect();

        assert_eq!(slugs, ["a", "c"]);
    }

    #[rstest]
    #[tokio::test]
    async fn update_moves_note_to_new_slug(repo: InMemoryNoteRepository) {
        let author = UserId::random();
        let original = note("old", &author);
        repo.insert(&original).await.expect("insert");

        let moved = note("new", &author);
        assert!(repo.update(original.slug(), &moved).await.expect("update"));

        assert!(repo.find_by_slug(original.slug()).await.expect("find").is_none());
        assert_eq!(
            repo.find_by_slug(moved.slug()).await.expect("find"),
            Some(moved)
        );
    }

    #[rstest]
    #[tokio::test]
    async fn update_refuses_to_overwrite_another_note(repo: InMemoryNoteRepository) {
        let author = UserId::random();
        let first = note("first", &author);
        repo.insert(&first).await.expect("insert");
        repo.insert(&note("second", &author)).await.expect("insert");

        let err = repo
            .update(first.slug(), &note("second", &author))
            .await
            .expect_err("slug collision");

        assert_eq!(err, NotePersistenceError::duplicate_slug("second"));
    }

    #[rstest]
    #[tokio::test]
    async fn delete_reports_whether_a_note_was_removed(repo: InMemoryNoteRepository) {
        let author = UserId::random();
        let stored = note("gone", &author);
        repo.insert(&stored).await.expect("insert");

        assert!(repo.delete(stored.slug()).await.expect("delete"));
        assert!(!repo.delete(stored.slug()).await.expect("delete"));
    }
}

//! PostgreSQL-backed `NoteRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{NotePersistenceError, NoteRepository};
use crate::domain::{Note, NoteSlug, UserId};

use super::diesel_error_mapping::{DieselFailure, classify_diesel_error};
use super::models::{NewNoteRow, NoteChangeset, NoteRow};
use super::pool::{DbPool, PoolError};
use super::schema::notes;

/// Diesel-backed implementation of the note repository port.
#[derive(Clone)]
pub struct DieselNoteRepository {
    pool: DbPool,
}

impl DieselNoteRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> NotePersistenceError {
    NotePersistenceError::connection(error.into_message())
}

/// Map Diesel errors; unique violations are reported against `slug`.
fn map_diesel_error(error: diesel::result::Error, slug: &NoteSlug) -> NotePersistenceError {
    match classify_diesel_error(&error) {
        DieselFailure::UniqueViolation => NotePersistenceError::duplicate_slug(slug.as_ref()),
        DieselFailure::Connection(message) => NotePersistenceError::connection(message),
        DieselFailure::Query(message) => NotePersistenceError::query(message),
    }
}

fn map_read_error(error: diesel::result::Error) -> NotePersistenceError {
    match classify_diesel_error(&error) {
        DieselFailure::Connection(message) => NotePersistenceError::connection(message),
        DieselFailure::Query(message) => NotePersistenceError::query(message),
        DieselFailure::UniqueViolation => NotePersistenceError::query("database error"),
    }
}

fn row_to_note(row: NoteRow) -> Result<Note, NotePersistenceError> {
    let NoteRow {
        slug,
        title,
        text,
        author_id,
        created_at,
    } = row;
    let slug = NoteSlug::new(slug)
        .map_err(|err| NotePersistenceError::query(format!("stored slug is invalid: {err}")))?;
    Ok(Note::from_parts(
        slug,
        title,
        text,
        UserId::from_uuid(author_id),
        created_at,
    ))
}

fn affected(rows: usize) -> bool {
    rows > 0
}

#[async_trait]
impl NoteRepository for DieselNoteRepository {
    async fn insert(&self, note: &Note) -> Result<(), NotePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewNoteRow {
            slug: note.slug().as_ref(),
            title: note.title(),
            text: note.text(),
            author_id: *note.author().as_uuid(),
            created_at: note.created_at(),
        };

        diesel::insert_into(notes::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| map_diesel_error(err, note.slug()))
    }

    async fn update(
        &self,
        current: &NoteSlug,
        note: &Note,
    ) -> Result<bool, NotePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let changes = NoteChangeset {
            slug: note.slug().as_ref(),
            title: note.title(),
            text: note.text(),
        };

        diesel::update(notes::table.filter(notes::slug.eq(current.as_ref())))
            .set(&changes)
            .execute(&mut conn)
            .await
            .map(affected)
            .map_err(|err| map_diesel_error(err, note.slug()))
    }

    async fn delete(&self, slug: &NoteSlug) -> Result<bool, NotePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::delete(notes::table.filter(notes::slug.eq(slug.as_ref())))
            .execute(&mut conn)
            .await
            .map(affected)
            .map_err(map_read_error)
    }

    async fn find_by_slug(&self, slug: &NoteSlug) -> Result<Option<Note>, NotePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = notes::table
            .filter(notes::slug.eq(slug.as_ref()))
            .select(NoteRow::as_select())
            .first::<NoteRow>(&mut conn)
            .await
            .optional()
            .map_err(map_read_error)?;

        row.map(row_to_note).transpose()
    }

    async fn list_by_author(&self, author: &UserId) -> Result<Vec<Note>, NotePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<NoteRow> = notes::table
            .filter(notes::author_id.eq(author.as_uuid()))
            .order(notes::id.asc())
            .select(NoteRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_read_error)?;

        rows.into_iter().map(row_to_note).collect()
    }

    async fn count_by_slug(&self, slug: &NoteSlug) -> Result<usize, NotePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let count: i64 = notes::table
            .filter(notes::slug.eq(slug.as_ref()))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_read_error)?;

        usize::try_from(count)
            .map_err(|_| NotePersistenceError::query(format!("invalid row count: {count}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use diesel::result::{DatabaseErrorKind, Error as DieselError};
    use rstest::rstest;
    use uuid::Uuid;

    fn slug(value: &str) -> NoteSlug {
        NoteSlug::new(value).expect("valid slug")
    }

    #[rstest]
    fn unique_violation_maps_to_duplicate_slug() {
        let err = DieselError::DatabaseError(
            DatabaseErrorKind::UniqueViolation,
            Box::new("duplicate key value violates unique constraint".to_string()),
        );

        assert_eq!(
            map_diesel_error(err, &slug("taken")),
            NotePersistenceError::duplicate_slug("taken")
        );
    }

    #[rstest]
    fn pool_error_maps_to_connection() {
        let err = map_pool_error(PoolError::checkout("timed out"));

        assert_eq!(err, NotePersistenceError::connection("timed out"));
    }

    #[rstest]
    fn row_converts_to_note() {
        let author = Uuid::new_v4();
        let created_at = Utc::now();
        let note = row_to_note(NoteRow {
            slug: "stored".into(),
            title: "Заголовок".into(),
            text: "Текст".into(),
            author_id: author,
            created_at,
        })
        .expect("valid row");

        assert_eq!(note.slug().as_ref(), "stored");
        assert!(note.is_owned_by(&UserId::from_uuid(author)));
        assert_eq!(note.created_at(), created_at);
    }

    #[rstest]
    fn corrupt_row_slug_is_a_query_error() {
        let err = row_to_note(NoteRow {
            slug: "not a slug".into(),
            title: "t".into(),
            text: "t".into(),
            author_id: Uuid::new_v4(),
            created_at: Utc::now(),
        })
        .expect_err("invalid slug");

        assert!(matches!(err, NotePersistenceError::Query { .. }));
    }
}

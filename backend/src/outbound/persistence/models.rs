//! Diesel row types. Internal to the persistence adapters.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{notes, users};

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub username: String,
    pub password_digest: String,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub username: &'a str,
    pub password_digest: &'a str,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = notes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct NoteRow {
    pub slug: String,
    pub title: String,
    pub text: String,
    pub author_id: Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = notes)]
pub(crate) struct NewNoteRow<'a> {
    pub slug: &'a str,
    pub title: &'a str,
    pub text: &'a str,
    pub author_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Editable columns. Author and creation time never change.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = notes)]
pub(crate) struct NoteChangeset<'a> {
    pub slug: &'a str,
    pub title: &'a str,
    pub text: &'a str,
}

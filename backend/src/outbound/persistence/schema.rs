//! Diesel table definitions matching `backend/migrations`.

diesel::table! {
    /// Registered accounts. `username` carries a unique index.
    users (id) {
        id -> Uuid,
        username -> Varchar,
        /// Encoded salted digest, never the raw password.
        password_digest -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Notes in insertion order. `slug` carries a unique index.
    notes (id) {
        id -> Int8,
        slug -> Varchar,
        title -> Varchar,
        text -> Text,
        author_id -> Uuid,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(notes -> users (author_id));
diesel::allow_tables_to_appear_in_same_query!(notes, users);

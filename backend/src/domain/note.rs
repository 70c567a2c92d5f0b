//! Note aggregate and the submission form that creates or edits it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{FieldErrors, NoteSlug, SLUG_MAX_LEN, SlugValidationError, UserId};

/// Maximum length of a note title.
pub const TITLE_MAX_LEN: usize = 100;

/// A short text note owned by exactly one user.
///
/// ## Invariants
/// - `slug` is unique across all notes (enforced by the repository).
/// - `author` never changes after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    slug: NoteSlug,
    title: String,
    text: String,
    author: UserId,
    created_at: DateTime<Utc>,
}

impl Note {
    /// Create a note authored by `author` from a validated draft.
    pub fn create(draft: NoteDraft, author: UserId, created_at: DateTime<Utc>) -> Self {
        let NoteDraft { title, text, slug } = draft;
        Self {
            slug,
            title,
            text,
            author,
            created_at,
        }
    }

    /// Rebuild a note from stored fields.
    pub fn from_parts(
        slug: NoteSlug,
        title: String,
        text: String,
        author: UserId,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            slug,
            title,
            text,
            author,
            created_at,
        }
    }

    /// Copy of this note with the draft's content applied; author and
    /// creation time are kept.
    pub fn revised(&self, draft: NoteDraft) -> Self {
        Self::create(draft, self.author.clone(), self.created_at)
    }

    /// Unique identifier.
    pub fn slug(&self) -> &NoteSlug {
        &self.slug
    }

    /// Title.
    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    /// Body text.
    pub fn text(&self) -> &str {
        self.text.as_str()
    }

    /// Owning user.
    pub fn author(&self) -> &UserId {
        &self.author
    }

    /// `true` when `user` authored this note.
    pub fn is_owned_by(&self, user: &UserId) -> bool {
        &self.author == user
    }

    /// Creation timestamp.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Validated note content ready to persist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteDraft {
    title: String,
    text: String,
    slug: NoteSlug,
}

impl NoteDraft {
    /// Title.
    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    /// Body text.
    pub fn text(&self) -> &str {
        self.text.as_str()
    }

    /// Slug the note will be stored under.
    pub fn slug(&self) -> &NoteSlug {
        &self.slug
    }
}

/// Raw note form fields as submitted by a client.
///
/// Missing fields deserialise as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoteSubmission {
    /// Title field.
    pub title: String,
    /// Body field.
    pub text: String,
    /// Optional explicit slug; blank means derive from the title.
    pub slug: String,
}

impl NoteSubmission {
    /// Form pre-filled from an existing note, as shown on the edit page.
    pub fn from_note(note: &Note) -> Self {
        Self {
            title: note.title().to_owned(),
            text: note.text().to_owned(),
            slug: note.slug().to_string(),
        }
    }

    /// Check field-level rules and resolve the slug.
    ///
    /// Uniqueness is not checked here; it needs the store.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::NoteSubmission;
    ///
    /// let submission = NoteSubmission {
    ///     title: "Новая заметка".into(),
    ///     text: "Какой-то текст".into(),
    ///     slug: String::new(),
    /// };
    /// let draft = submission.validate().expect("valid form");
    /// assert_eq!(draft.slug().as_ref(), "novaya-zametka");
    /// ```
    pub fn validate(&self) -> Result<NoteDraft, FieldErrors> {
        let mut errors = FieldErrors::default();
        let title = self.title.trim();
        let text = self.text.trim();
        let explicit_slug = self.slug.trim();

        if title.is_empty() {
            errors.add("title", "this field is required");
        } else if title.chars().count() > TITLE_MAX_LEN {
            errors.add(
                "title",
                format!("title must be at most {TITLE_MAX_LEN} characters"),
            );
        }
        if text.is_empty() {
            errors.add("text", "this field is required");
        }

        let slug = if explicit_slug.is_empty() {
            // A blank title already carries its own error.
            let derived = NoteSlug::from_title(title);
            if derived.is_none() && !title.is_empty() {
                errors.add(
                    "slug",
                    "a slug cannot be derived from this title; enter one explicitly",
                );
            }
            derived
        } else {
            NoteSlug::new(explicit_slug)
                .map_err(|err| errors.add("slug", slug_error_message(&err)))
                .ok()
        };

        match slug {
            Some(slug) if errors.is_empty() => Ok(NoteDraft {
                title: title.to_owned(),
                text: text.to_owned(),
                slug,
            }),
            _ => Err(errors),
        }
    }
}

fn slug_error_message(err: &SlugValidationError) -> String {
    match err {
        SlugValidationError::TooLong { .. } => {
            format!("slug must be at most {SLUG_MAX_LEN} characters")
        }
        other => other.to_string(),
    }
}

/// Message attached to the slug field when the slug is already in use.
pub fn duplicate_slug_message(slug: &NoteSlug) -> String {
    format!("{slug} is already taken; choose a unique slug")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn submission() -> NoteSubmission {
        NoteSubmission {
            title: "Новая заметка".into(),
            text: "Какой-то текст".into(),
            slug: "new-note".into(),
        }
    }

    #[rstest]
    fn explicit_slug_is_kept(submission: NoteSubmission) {
        let draft = submission.validate().expect("valid");
        assert_eq!(draft.slug().as_ref(), "new-note");
        assert_eq!(draft.title(), "Новая заметка");
    }

    #[rstest]
    fn blank_slug_is_derived_from_title(mut submission: NoteSubmission) {
        submission.slug = "   ".into();
        let draft = submission.validate().expect("valid");
        assert_eq!(draft.slug().as_ref(), "novaya-zametka");
    }

    #[rstest]
    #[case("title", "")]
    #[case("text", "   ")]
    fn required_fields_are_enforced(
        mut submission: NoteSubmission,
        #[case] field: &str,
        #[case] value: &str,
    ) {
        match field {
            "title" => submission.title = value.into(),
            _ => submission.text = value.into(),
        }
        let errors = submission.validate().expect_err("invalid");
        assert!(errors.has(field));
    }

    #[rstest]
    fn overlong_title_is_rejected(mut submission: NoteSubmission) {
        submission.title = "x".repeat(TITLE_MAX_LEN + 1);
        let errors = submission.validate().expect_err("invalid");
        assert!(errors.has("title"));
    }

    #[rstest]
    #[case("not a slug")]
    #[case("слаг")]
    fn malformed_slug_is_rejected(mut submission: NoteSubmission, #[case] slug: &str) {
        submission.slug = slug.into();
        let errors = submission.validate().expect_err("invalid");
        assert!(errors.has("slug"));
    }

    #[rstest]
    fn underivable_title_without_slug_is_rejected(mut submission: NoteSubmission) {
        submission.title = "???".into();
        submission.slug = String::new();
        let errors = submission.validate().expect_err("invalid");
        assert!(errors.has("slug"));
        assert!(!errors.has("title"));
    }

    #[rstest]
    fn revised_note_keeps_author(submission: NoteSubmission) {
        let author = UserId::random();
        let created_at = Utc::now();
        let note = Note::create(submission.validate().expect("valid"), author.clone(), created_at);

        let edit = NoteSubmission {
            title: "Новая".into(),
            text: "Какой-то текст".into(),
            slug: String::new(),
        };
        let revised = note.revised(edit.validate().expect("valid"));

        assert_eq!(revised.title(), "Новая");
        assert_eq!(revised.slug().as_ref(), "novaya");
        assert!(revised.is_owned_by(&author));
        assert_eq!(revised.created_at(), created_at);
    }
}

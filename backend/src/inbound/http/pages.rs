//! Page response model.
//!
//! Every page is a JSON [`PageView`]: the page name plus whichever of the
//! note list, the single note, and the form the page shows.

use actix_web::HttpResponse;
use actix_web::http::header::LOCATION;
use serde::{Deserialize, Serialize};

use crate::domain::{FieldErrors, Note, NoteSubmission};

/// Page identifiers.
pub mod page {
    pub const HOME: &str = "notes/home";
    pub const LIST: &str = "notes/list";
    pub const FORM: &str = "notes/form";
    pub const DETAIL: &str = "notes/detail";
    pub const DELETE: &str = "notes/delete";
    pub const SUCCESS: &str = "notes/success";
    pub const LOGIN: &str = "users/login";
    pub const LOGOUT: &str = "users/logout";
    pub const SIGNUP: &str = "users/signup";
}

/// Rendered page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageView {
    pub page: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object_list: Option<Vec<Note>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object: Option<Note>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub form: Option<FormView>,
}

/// Form shown on a page, with the values to pre-fill and any errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FormView {
    Note {
        title: String,
        text: String,
        slug: String,
        errors: FieldErrors,
    },
    Login {
        username: String,
        errors: FieldErrors,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        next: Option<String>,
    },
    Signup {
        username: String,
        errors: FieldErrors,
    },
}

impl FormView {
    /// Note form echoing `submission`.
    pub fn note(submission: &NoteSubmission, errors: FieldErrors) -> Self {
        Self::Note {
            title: submission.title.clone(),
            text: submission.text.clone(),
            slug: submission.slug.clone(),
            errors,
        }
    }

    /// Errors attached to this form.
    pub fn errors(&self) -> &FieldErrors {
        match self {
            Self::Note { errors, .. } | Self::Login { errors, .. } | Self::Signup { errors, .. } => {
                errors
            }
        }
    }
}

impl PageView {
    pub fn new(page: &str) -> Self {
        Self {
            page: page.to_owned(),
            object_list: None,
            object: None,
            form: None,
        }
    }

    pub fn with_list(mut self, notes: Vec<Note>) -> Self {
        self.object_list = Some(notes);
        self
    }

    pub fn with_object(mut self, note: Note) -> Self {
        self.object = Some(note);
        self
    }

    pub fn with_form(mut self, form: FormView) -> Self {
        self.form = Some(form);
        self
    }

    /// `200 OK` with the page as JSON.
    pub fn render(self) -> HttpResponse {
        HttpResponse::Ok().json(self)
    }
}

/// `302 Found` to `location`.
pub fn redirect(location: impl AsRef<str>) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((LOCATION, location.as_ref()))
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_sections_are_omitted() {
        let value = serde_json::to_value(PageView::new(page::HOME)).expect("serialise");
        assert_eq!(value, json!({ "page": "notes/home" }));
    }

    #[test]
    fn note_form_echoes_submission() {
        let submission = NoteSubmission {
            title: "Заголовок".into(),
            text: String::new(),
            slug: "taken".into(),
        };
        let mut errors = FieldErrors::default();
        errors.add("text", "this field is required");

        let value = serde_json::to_value(
            PageView::new(page::FORM).with_form(FormView::note(&submission, errors)),
        )
        .expect("serialise");

        assert_eq!(
            value,
            json!({
                "page": "notes/form",
                "form": {
                    "kind": "note",
                    "title": "Заголовок",
                    "text": "",
                    "slug": "taken",
                    "errors": { "text": ["this field is required"] }
                }
            })
        );
    }
}

//! Note page handlers.
//!
//! ```text
//! GET  /                home
//! GET  /notes/          list the caller's notes
//! GET  /add/            empty note form
//! POST /add/            create a note
//! GET  /note/{slug}/    note detail
//! GET  /edit/{slug}/    note form pre-filled from the note
//! POST /edit/{slug}/    update a note
//! GET  /delete/{slug}/  delete confirmation
//! POST /delete/{slug}/  delete a note
//! GET  /done/           success page
//! ```
//!
//! Every page except home needs a login. Notes written by someone else, and
//! slugs that are malformed or unknown, all answer `404 Not Found`.

use actix_web::{HttpResponse, web};

use crate::domain::ports::NoteSubmissionOutcome;
use crate::domain::{Error, FieldErrors, NoteSlug, NoteSubmission};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::CurrentUser;
use crate::inbound::http::pages::{FormView, PageView, page, redirect};
use crate::inbound::http::routes::RouteName;
use crate::inbound::http::state::HttpState;

fn parse_slug(raw: &str) -> ApiResult<NoteSlug> {
    NoteSlug::new(raw).map_err(|_| Error::not_found("note not found"))
}

fn submission_response(
    outcome: NoteSubmissionOutcome,
    submission: &NoteSubmission,
) -> HttpResponse {
    match outcome {
        NoteSubmissionOutcome::Saved(_) => redirect(RouteName::Success.reverse(&[])),
        NoteSubmissionOutcome::Rejected(errors) => PageView::new(page::FORM)
            .with_form(FormView::note(submission, errors))
            .render(),
    }
}

/// Public landing page.
pub async fn home() -> HttpResponse {
    PageView::new(page::HOME).render()
}

/// The caller's notes, oldest first.
pub async fn list(user: CurrentUser, state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let notes = state.notes.list_notes(user.id()).await?;
    Ok(PageView::new(page::LIST).with_list(notes).render())
}

/// Empty note form.
pub async fn add_form(_user: CurrentUser) -> HttpResponse {
    PageView::new(page::FORM)
        .with_form(FormView::note(
            &NoteSubmission::default(),
            FieldErrors::default(),
        ))
        .render()
}

/// Create a note, or re-render the form with its errors.
pub async fn add(
    user: CurrentUser,
    state: web::Data<HttpState>,
    form: web::Form<NoteSubmission>,
) -> ApiResult<HttpResponse> {
    let submission = form.into_inner();
    let outcome = state
        .notes_command
        .create_note(user.id(), &submission)
        .await?;
    Ok(submission_response(outcome, &submission))
}

/// One of the caller's notes; 404 for anyone else's.
pub async fn detail(
    user: CurrentUser,
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let slug = parse_slug(&path)?;
    let note = state.notes.owned_note(user.id(), &slug).await?;
    Ok(PageView::new(page::DETAIL).with_object(note).render())
}

/// Note form prefilled from an owned note.
pub async fn edit_form(
    user: CurrentUser,
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let slug = parse_slug(&path)?;
    let note = state.notes.owned_note(user.id(), &slug).await?;
    let form = FormView::note(&NoteSubmission::from_note(&note), FieldErrors::default());
    Ok(PageView::new(page::FORM)
        .with_object(note)
        .with_form(form)
        .render())
}

/// Save changes to an owned note, possibly under a new slug.
pub async fn edit(
    user: CurrentUser,
    state: web::Data<HttpState>,
    path: web::Path<String>,
    form: web::Form<NoteSubmission>,
) -> ApiResult<HttpResponse> {
    let slug = parse_slug(&path)?;
    let submission = form.into_inner();
    let outcome = state
        .notes_command
        .update_note(user.id(), &slug, &submission)
        .await?;
    Ok(submission_response(outcome, &submission))
}

/// Delete confirmation page.
pub async fn delete_confirm(
    user: CurrentUser,
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let slug = parse_slug(&path)?;
    let note = state.notes.owned_note(user.id(), &slug).await?;
    Ok(PageView::new(page::DELETE).with_object(note).render())
}

/// Delete an owned note.
pub async fn delete(
    user: CurrentUser,
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let slug = parse_slug(&path)?;
    state.notes_command.delete_note(user.id(), &slug).await?;
    Ok(redirect(RouteName::Success.reverse(&[])))
}

/// Confirmation shown after a successful add, edit or delete.
pub async fn success(_user: CurrentUser) -> HttpResponse {
    PageView::new(page::SUCCESS).render()
}

#[cfg(test)]
#[path = "notes_tests.rs"]
mod tests;

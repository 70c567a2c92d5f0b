//! Account page handlers.
//!
//! ```text
//! GET  /auth/signup/  signup form
//! POST /auth/signup/  username=..&password1=..&password2=..
//! GET  /auth/login/   login form, optional ?next=/path/
//! POST /auth/login/   username=..&password=..[&next=/path/]
//! GET  /auth/logout/  forget the session
//! ```

use actix_web::{HttpResponse, web};
use serde::{Deserialize, Serialize};

use crate::domain::ports::SignupOutcome;
use crate::domain::{
    ErrorCode, FieldErrors, LoginCredentials, LoginValidationError, SignupRequest,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::is_safe_next;
use crate::inbound::http::pages::{FormView, PageView, page, redirect};
use crate::inbound::http::routes::RouteName;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

const INVALID_LOGIN: &str =
    "please enter a correct username and password; both fields may be case-sensitive";

/// Login form body.
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    pub next: Option<String>,
}

/// Signup form body.
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct SignupForm {
    pub username: String,
    pub password1: String,
    pub password2: String,
}

/// `?next=` on the login page.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct NextQuery {
    pub next: Option<String>,
}

fn login_page(username: &str, errors: FieldErrors, next: Option<String>) -> HttpResponse {
    PageView::new(page::LOGIN)
        .with_form(FormView::Login {
            username: username.to_owned(),
            errors,
            next,
        })
        .render()
}

fn signup_page(username: &str, errors: FieldErrors) -> HttpResponse {
    PageView::new(page::SIGNUP)
        .with_form(FormView::Signup {
            username: username.to_owned(),
            errors,
        })
        .render()
}

fn login_validation_errors(err: &LoginValidationError) -> FieldErrors {
    let mut errors = FieldErrors::default();
    match err {
        LoginValidationError::EmptyUsername => errors.add("username", "this field is required"),
        LoginValidationError::EmptyPassword => errors.add("password", "this field is required"),
    }
    errors
}

/// Empty signup form.
pub async fn signup_form() -> HttpResponse {
    signup_page("", FieldErrors::default())
}

/// Register an account and send the user to the login page.
pub async fn signup(
    state: web::Data<HttpState>,
    form: web::Form<SignupForm>,
) -> ApiResult<HttpResponse> {
    let form = form.into_inner();
    let request =
        match SignupRequest::try_from_parts(&form.username, &form.password1, &form.password2) {
            Ok(request) => request,
            Err(errors) => return Ok(signup_page(&form.username, errors)),
        };

    match state.signup.register(&request).await? {
        SignupOutcome::Registered(_) => Ok(redirect(RouteName::Login.reverse(&[]))),
        SignupOutcome::Rejected(errors) => Ok(signup_page(&form.username, errors)),
    }
}

/// Login form, carrying `next` through.
pub async fn login_form(query: web::Query<NextQuery>) -> HttpResponse {
    login_page("", FieldErrors::default(), query.into_inner().next)
}

/// Authenticate and establish a session.
///
/// A missing or off-site `next` sends the user to the home page.
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<NextQuery>,
    form: web::Form<LoginForm>,
) -> ApiResult<HttpResponse> {
    let LoginForm {
        username,
        password,
        next,
    } = form.into_inner();
    let next = next
        .filter(|value| !value.is_empty())
        .or(query.into_inner().next);

    let credentials = match LoginCredentials::try_from_parts(&username, &password) {
        Ok(credentials) => credentials,
        Err(err) => return Ok(login_page(&username, login_validation_errors(&err), next)),
    };

    let user_id = match state.login.authenticate(&credentials).await {
        Ok(user_id) => user_id,
        Err(err) if err.code() == ErrorCode::Unauthorized => {
            let mut errors = FieldErrors::default();
            errors.add_non_field(INVALID_LOGIN);
            return Ok(login_page(&username, errors, next));
        }
        Err(err) => return Err(err),
    };
    session.persist_user(&user_id)?;

    let target = next
        .filter(|value| is_safe_next(value))
        .unwrap_or_else(|| RouteName::Home.reverse(&[]));
    Ok(redirect(target))
}

/// Clear the session.
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.purge();
    PageView::new(page::LOGOUT).render()
}

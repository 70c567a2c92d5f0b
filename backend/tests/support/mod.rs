//! Shared harness for the notes HTTP suites.
//!
//! Every test builds its own application over fresh in-memory stores and a
//! fresh session key, then drives it through signup and login like a
//! browser would.
#![allow(
    dead_code,
    reason = "each integration test crate uses a different subset of helpers"
)]

use std::sync::Arc;

use actix_web::body::BoxBody;
use actix_web::cookie::{Cookie, Key, SameSite};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::http::header::LOCATION;
use actix_web::{test, web};
use mockable::DefaultClock;
use serde::Serialize;

use backend::domain::ports::NoteRepository;
use backend::domain::{AccountService, Note, NoteService, NoteSlug};
use backend::inbound::http::health::HealthState;
use backend::inbound::http::pages::PageView;
use backend::inbound::http::state::HttpState;
use backend::outbound::memory::{InMemoryNoteRepository, InMemoryUserRepository};
use backend::server::AppDependencies;

pub const PASSWORD: &str = "s3cret-pass";

/// Stores kept alongside the app so tests can inspect persisted state.
pub struct Stores {
    pub notes: Arc<InMemoryNoteRepository>,
    pub users: Arc<InMemoryUserRepository>,
}

impl Stores {
    pub fn new() -> Self {
        Self {
            notes: Arc::new(InMemoryNoteRepository::new()),
            users: Arc::new(InMemoryUserRepository::new()),
        }
    }

    /// Application wiring over these stores.
    pub fn deps(&self) -> AppDependencies {
        let notes = Arc::new(NoteService::new(self.notes.clone(), Arc::new(DefaultClock)));
        let accounts = Arc::new(AccountService::new(self.users.clone()));
        AppDependencies {
            health_state: web::Data::new(HealthState::new()),
            http_state: web::Data::new(HttpState::new(
                notes.clone(),
                notes,
                accounts.clone(),
                accounts,
            )),
            key: Key::generate(),
            cookie_secure: false,
            same_site: SameSite::Lax,
        }
    }

    pub async fn slug_count(&self, slug: &str) -> usize {
        self.notes
            .count_by_slug(&NoteSlug::new(slug).expect("valid slug"))
            .await
            .expect("count slug")
    }

    pub async fn note(&self, slug: &str) -> Option<Note> {
        self.notes
            .find_by_slug(&NoteSlug::new(slug).expect("valid slug"))
            .await
            .expect("find note")
    }
}

/// Spin up the application over `$stores`.
macro_rules! init_app {
    ($stores:expr) => {
        actix_web::test::init_service(backend::server::build_app($stores.deps())).await
    };
}

pub async fn get<S>(app: &S, uri: &str, cookie: Option<&Cookie<'static>>) -> ServiceResponse
where
    S: Service<actix_http::Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error>,
{
    let mut req = test::TestRequest::get().uri(uri);
    if let Some(cookie) = cookie {
        req = req.cookie(cookie.clone());
    }
    test::call_service(app, req.to_request()).await
}

pub async fn post_form<S, T>(
    app: &S,
    uri: &str,
    form: &T,
    cookie: Option<&Cookie<'static>>,
) -> ServiceResponse
where
    S: Service<actix_http::Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error>,
    T: Serialize + ?Sized,
{
    let mut req = test::TestRequest::post().uri(uri).set_form(form);
    if let Some(cookie) = cookie {
        req = req.cookie(cookie.clone());
    }
    test::call_service(app, req.to_request()).await
}

/// Register `username` and log in, returning the session cookie.
pub async fn login_as<S>(app: &S, username: &str) -> Cookie<'static>
where
    S: Service<actix_http::Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error>,
{
    let signup = post_form(
        app,
        "/auth/signup/",
        &[
            ("username", username),
            ("password1", PASSWORD),
            ("password2", PASSWORD),
        ],
        None,
    )
    .await;
    assert_eq!(signup.status(), StatusCode::FOUND, "signup failed");

    let login = post_form(
        app,
        "/auth/login/",
        &[("username", username), ("password", PASSWORD)],
        None,
    )
    .await;
    assert_eq!(login.status(), StatusCode::FOUND, "login failed");
    login
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(|cookie| cookie.into_owned())
        .expect("session cookie set")
}

/// Create a note through the add form and assert it was saved.
pub async fn add_note<S>(app: &S, cookie: &Cookie<'static>, title: &str, slug: &str)
where
    S: Service<actix_http::Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error>,
{
    let res = post_form(
        app,
        "/add/",
        &[("title", title), ("text", "Текст"), ("slug", slug)],
        Some(cookie),
    )
    .await;
    assert_eq!(res.status(), StatusCode::FOUND, "note not saved");
    assert_eq!(location(&res).as_deref(), Some("/done/"));
}

pub fn location(res: &ServiceResponse) -> Option<String> {
    res.headers()
        .get(LOCATION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
}

pub async fn page_view(res: ServiceResponse) -> PageView {
    test::read_body_json(res).await
}

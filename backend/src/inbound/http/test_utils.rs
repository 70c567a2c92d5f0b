//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::body::MessageBody;
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{HttpResponse, test, web};

use crate::domain::ports::{
    MockLoginService, MockNotesCommand, MockNotesQuery, MockSignupService,
};
use crate::domain::{Error, UserId};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Path of the helper route that logs a user in without credentials.
pub const TEST_LOGIN_PATH: &str = "/__test/login/{id}";

/// Build a session middleware configured for tests.
///
/// Generates a fresh key per invocation and disables the `Secure` flag for
/// local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Handler for [`TEST_LOGIN_PATH`].
pub async fn test_login(
    session: SessionContext,
    path: web::Path<String>,
) -> Result<HttpResponse, Error> {
    let id = UserId::new(path.as_str())
        .map_err(|err| Error::invalid_request(format!("bad test user id: {err}")))?;
    session.persist_user(&id)?;
    Ok(HttpResponse::Ok().finish())
}

/// Log `user` in through [`TEST_LOGIN_PATH`] and return the session cookie.
pub async fn login_cookie<S, B>(app: &S, user: &UserId) -> Cookie<'static>
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let uri = TEST_LOGIN_PATH.replace("{id}", user.as_ref());
    let res = test::call_service(app, test::TestRequest::get().uri(&uri).to_request()).await;
    assert!(res.status().is_success(), "test login failed: {}", res.status());
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(|cookie| cookie.into_owned())
        .expect("session cookie set")
}

/// Port mocks used to assemble an [`HttpState`].
#[derive(Default)]
pub struct MockPorts {
    pub notes: MockNotesQuery,
    pub notes_command: MockNotesCommand,
    pub login: MockLoginService,
    pub signup: MockSignupService,
}

impl MockPorts {
    pub fn into_state(self) -> HttpState {
        HttpState::new(
            Arc::new(self.notes),
            Arc::new(self.notes_command),
            Arc::new(self.login),
            Arc::new(self.signup),
        )
    }
}

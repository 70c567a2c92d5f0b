//! Login gate for protected pages.
//!
//! [`CurrentUser`] resolves the session identity. Anonymous requests fail
//! extraction with [`LoginRequired`], which renders as a redirect to the
//! login page carrying the original path in `next`.

use std::fmt;

use actix_web::http::StatusCode;
use actix_web::http::header::LOCATION;
use actix_web::{FromRequest, HttpRequest, HttpResponse, ResponseError, dev::Payload};
use futures_util::future::LocalBoxFuture;

use crate::domain::UserId;

use super::routes::RouteName;
use super::session::SessionContext;

/// Authenticated identity of the current request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser(pub UserId);

impl CurrentUser {
    pub fn id(&self) -> &UserId {
        &self.0
    }
}

/// Anonymous access to a page that needs a login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginRequired {
    next: String,
}

impl LoginRequired {
    pub fn new(next: impl Into<String>) -> Self {
        Self { next: next.into() }
    }

    /// Redirect target: the login page with `next` set.
    ///
    /// # Examples
    /// ```
    /// use backend::inbound::http::auth::LoginRequired;
    ///
    /// assert_eq!(LoginRequired::new("/add/").location(), "/auth/login/?next=/add/");
    /// ```
    pub fn location(&self) -> String {
        login_url(&self.next)
    }
}

/// Login page URL that returns to `next` afterwards.
///
/// Slashes stay readable; everything else is form-encoded.
pub fn login_url(next: &str) -> String {
    let encoded: String = url::form_urlencoded::byte_serialize(next.as_bytes()).collect();
    format!(
        "{}?next={}",
        RouteName::Login.reverse(&[]),
        encoded.replace("%2F", "/")
    )
}

impl fmt::Display for LoginRequired {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "login required for {}", self.next)
    }
}

impl ResponseError for LoginRequired {
    fn status_code(&self) -> StatusCode {
        StatusCode::FOUND
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::Found()
            .insert_header((LOCATION, self.location()))
            .finish()
    }
}

impl FromRequest for CurrentUser {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let session = SessionContext::from_request(req, payload);
        let next = req
            .uri()
            .path_and_query()
            .map_or_else(|| req.path().to_owned(), |value| value.as_str().to_owned());
        Box::pin(async move {
            let session = session.await?;
            match session.user_id()? {
                Some(id) => Ok(CurrentUser(id)),
                None => Err(LoginRequired::new(next).into()),
            }
        })
    }
}

/// `true` when `next` is a path on this site.
///
/// Rejects absolute and scheme-relative URLs so a crafted login link cannot
/// send users elsewhere.
pub fn is_safe_next(next: &str) -> bool {
    next.starts_with('/') && !next.starts_with("//") && !next.contains('\\')
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, test as actix_test, web};
    use rstest::rstest;

    #[rstest]
    #[case("/add/", "/auth/login/?next=/add/")]
    #[case("/note/some-slug/", "/auth/login/?next=/note/some-slug/")]
    #[case("/notes/?page=2", "/auth/login/?next=/notes/%3Fpage%3D2")]
    fn login_url_keeps_slashes(#[case] next: &str, #[case] expected: &str) {
        assert_eq!(login_url(next), expected);
    }

    #[rstest]
    #[case("/notes/", true)]
    #[case("/", true)]
    #[case("//evil.example/", false)]
    #[case("https://evil.example/", false)]
    #[case("/\\evil.example", false)]
    #[case("", false)]
    fn safe_next_only_allows_local_paths(#[case] next: &str, #[case] expected: bool) {
        assert_eq!(is_safe_next(next), expected);
    }

    #[actix_web::test]
    async fn anonymous_request_redirects_to_login() {
        let app = actix_test::init_service(
            App::new()
                .wrap(crate::inbound::http::test_utils::test_session_middleware())
                .route(
                    "/done/",
                    web::get().to(|user: CurrentUser| async move {
                        HttpResponse::Ok().body(user.id().to_string())
                    }),
                ),
        )
        .await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/done/").to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::FOUND);
        assert_eq!(
            res.headers().get(LOCATION).and_then(|v| v.to_str().ok()),
            Some("/auth/login/?next=/done/")
        );
    }
}

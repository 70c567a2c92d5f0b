//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::ServerConfig;
pub use state_builders::{build_http_state, in_memory_http_state};

use actix_session::{
    SessionMiddleware,
    config::{CookieContentSecurity, PersistentSession},
    storage::CookieSessionStore,
};
use actix_web::cookie::{Key, SameSite};
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};

use crate::Trace;
use crate::inbound::http::configure;
use crate::inbound::http::health::{HealthState, live, ready};
use crate::inbound::http::state::HttpState;

const SESSION_COOKIE_NAME: &str = "session";
const SESSION_TTL_HOURS: i64 = 2;

/// Everything [`build_app`] needs to assemble one worker's application.
#[derive(Clone)]
pub struct AppDependencies {
    pub health_state: web::Data<HealthState>,
    pub http_state: web::Data<HttpState>,
    pub key: Key,
    pub cookie_secure: bool,
    pub same_site: SameSite,
}

/// Build the application: probes, session middleware, tracing, and the
/// note and account pages.
///
/// # Examples
/// ```
/// use actix_web::cookie::{Key, SameSite};
/// use actix_web::web;
/// use backend::inbound::http::health::HealthState;
/// use backend::server::{AppDependencies, build_app, in_memory_http_state};
///
/// let _app = build_app(AppDependencies {
///     health_state: web::Data::new(HealthState::new()),
///     http_state: web::Data::new(in_memory_http_state()),
///     key: Key::generate(),
///     cookie_secure: false,
///     same_site: SameSite::Lax,
/// });
/// ```
pub fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        key,
        cookie_secure,
        same_site,
    } = deps;

    let session = SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name(SESSION_COOKIE_NAME.into())
        .cookie_path("/".into())
        .cookie_secure(cookie_secure)
        .cookie_http_only(true)
        .cookie_content_security(CookieContentSecurity::Private)
        .cookie_same_site(same_site)
        .session_lifecycle(
            PersistentSession::default()
                .session_ttl(actix_web::cookie::time::Duration::hours(SESSION_TTL_HOURS)),
        )
        .build();

    App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(session)
        .wrap(Trace)
        .service(ready)
        .service(live)
        .configure(configure)
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// Marks `health_state` ready once the listener is bound.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let http_state = web::Data::new(build_http_state(config.db_pool.as_ref()));
    let ServerConfig {
        key,
        cookie_secure,
        same_site,
        bind_addr,
        db_pool: _,
    } = config;

    let deps = AppDependencies {
        health_state: health_state.clone(),
        http_state,
        key,
        cookie_secure,
        same_site,
    };
    let server = HttpServer::new(move || build_app(deps.clone()))
        .bind(bind_addr)?
        .run();

    health_state.mark_ready();
    Ok(server)
}

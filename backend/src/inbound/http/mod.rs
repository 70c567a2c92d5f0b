//! HTTP inbound adapter serving the note and account pages.

pub mod auth;
pub mod error;
pub mod health;
pub mod notes;
pub mod pages;
pub mod routes;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;

use actix_web::web;

pub use error::ApiResult;

use self::routes::RouteName;

fn resource(route: RouteName) -> actix_web::Resource {
    web::resource(route.pattern()).name(route.name())
}

/// Register every named page route plus the not-found fallback.
///
/// Expects [`state::HttpState`] as app data and a session middleware around
/// the app.
///
/// # Examples
/// ```no_run
/// use actix_web::App;
/// use backend::inbound::http::configure;
///
/// let app = App::new().configure(configure);
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(resource(RouteName::Home).route(web::get().to(notes::home)))
        .service(resource(RouteName::List).route(web::get().to(notes::list)))
        .service(
            resource(RouteName::Add)
                .route(web::get().to(notes::add_form))
                .route(web::post().to(notes::add)),
        )
        .service(resource(RouteName::Detail).route(web::get().to(notes::detail)))
        .service(
            resource(RouteName::Edit)
                .route(web::get().to(notes::edit_form))
                .route(web::post().to(notes::edit)),
        )
        .service(
            resource(RouteName::Delete)
                .route(web::get().to(notes::delete_confirm))
                .route(web::post().to(notes::delete)),
        )
        .service(resource(RouteName::Success).route(web::get().to(notes::success)))
        .service(
            resource(RouteName::Login)
                .route(web::get().to(users::login_form))
                .route(web::post().to(users::login)),
        )
        .service(
            resource(RouteName::Logout)
                .route(web::get().to(users::logout))
                .route(web::post().to(users::logout)),
        )
        .service(
            resource(RouteName::Signup)
                .route(web::get().to(users::signup_form))
                .route(web::post().to(users::signup)),
        )
        .default_service(web::to(error::not_found));
}

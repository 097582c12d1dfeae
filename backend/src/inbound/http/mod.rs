//! HTTP inbound adapter exposing REST endpoints.

use actix_web::web;

pub mod answers;
pub mod auth;
pub mod error;
pub mod health;
pub mod profile;
pub mod questions;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod topics;
pub mod validation;

pub use error::ApiResult;

/// Register every API handler and the extractor error mapping.
///
/// The caller decides the mount point; the server mounts this under `/api`.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use backend::inbound::http::configure;
///
/// let app = App::new().service(web::scope("/api").configure(configure));
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(error::json_config())
        .app_data(error::query_config())
        .app_data(error::path_config())
        .service(questions::list_questions)
        .service(questions::create_question)
        .service(questions::get_question)
        .service(questions::record_view)
        .service(answers::list_answers)
        .service(answers::create_answer)
        .service(topics::list_topics)
        .service(profile::me)
        .service(profile::get_profile)
        .service(profile::update_profile)
        .service(profile::ensure_profile)
        .service(auth::current_user)
        .service(auth::create_session)
        .service(auth::logout);
}

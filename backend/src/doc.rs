//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] gathers every handler under `inbound::http` together with the
//! payload schemas they reference. Swagger UI serves it in debug builds and
//! `cargo run --bin openapi-dump` exports it for client generation.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{
    AnswerSummary, CreatedAnswer, CreatedQuestion, Error, ErrorCode, Identity, QuestionDetail,
    QuestionStatus, QuestionSummary, Role, Topic, TopicSummary,
};
use crate::inbound::http::answers::CreateAnswerBody;
use crate::inbound::http::auth::{CurrentUserResponse, LogoutResponse, SessionRequest};
use crate::inbound::http::profile::{
    EnsureProfileResponse, MeResponse, ProfileResponse, UpdateProfileBody,
};
use crate::inbound::http::questions::{CreateQuestionBody, OkResponse};

/// Adds the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/auth/session.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Ask a Local API",
        description = "Questions from travellers, answers from locals."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::questions::list_questions,
        crate::inbound::http::questions::get_question,
        crate::inbound::http::questions::record_view,
        crate::inbound::http::questions::create_question,
        crate::inbound::http::answers::list_answers,
        crate::inbound::http::answers::create_answer,
        crate::inbound::http::topics::list_topics,
        crate::inbound::http::profile::me,
        crate::inbound::http::profile::get_profile,
        crate::inbound::http::profile::update_profile,
        crate::inbound::http::profile::ensure_profile,
        crate::inbound::http::auth::current_user,
        crate::inbound::http::auth::create_session,
        crate::inbound::http::auth::logout,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        QuestionSummary,
        QuestionDetail,
        QuestionStatus,
        CreatedQuestion,
        CreateQuestionBody,
        OkResponse,
        AnswerSummary,
        CreatedAnswer,
        CreateAnswerBody,
        Topic,
        TopicSummary,
        Identity,
        Role,
        MeResponse,
        ProfileResponse,
        UpdateProfileBody,
        EnsureProfileResponse,
        SessionRequest,
        CurrentUserResponse,
        LogoutResponse,
        Error,
        ErrorCode,
    )),
    tags(
        (name = "questions", description = "Question feed and submission"),
        (name = "answers", description = "Answers to a question"),
        (name = "topics", description = "Topic catalogue"),
        (name = "profile", description = "Signed-in user profile"),
        (name = "auth", description = "Session sign-in and sign-out"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

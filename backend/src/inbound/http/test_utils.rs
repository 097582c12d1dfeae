//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::ServiceResponse;
use pagination::DEFAULT_PAGE_SIZE;

use crate::domain::ports::{
    MockAnswersCommand, MockAnswersQuery, MockLoginService, MockProfileCommand, MockProfileQuery,
    MockQuestionsCommand, MockQuestionsQuery, MockTopicsQuery,
};
use crate::domain::{Identity, UserId};
use crate::inbound::http::state::HttpState;

pub(crate) const SIGNED_IN_USER: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

/// Build a session middleware configured for tests.
///
/// Generates a fresh key per invocation and disables the `Secure` flag so
/// plain HTTP test requests keep the cookie.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// The `session` cookie set on `res`.
pub fn session_cookie<B>(res: &ServiceResponse<B>) -> Cookie<'static> {
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(Cookie::into_owned)
        .expect("session cookie set")
}

pub fn signed_in_identity() -> Identity {
    Identity {
        id: UserId::new(SIGNED_IN_USER).expect("fixture id"),
        email: Some("traveler@example.com".to_owned()),
    }
}

/// Port mocks with no expectations; configure the ones a test touches.
#[derive(Default)]
pub struct MockPorts {
    pub questions: MockQuestionsQuery,
    pub questions_command: MockQuestionsCommand,
    pub answers: MockAnswersQuery,
    pub answers_command: MockAnswersCommand,
    pub topics: MockTopicsQuery,
    pub profile: MockProfileQuery,
    pub profile_command: MockProfileCommand,
    pub login: MockLoginService,
}

impl MockPorts {
    /// Mocks whose login port signs in [`signed_in_identity`] for any token.
    pub fn signed_in() -> Self {
        let mut ports = Self::default();
        ports
            .login
            .expect_sign_in()
            .returning(|_| Ok(signed_in_identity()));
        ports
    }

    pub fn into_state(self) -> HttpState {
        HttpState {
            questions: Arc::new(self.questions),
            questions_command: Arc::new(self.questions_command),
            answers: Arc::new(self.answers),
            answers_command: Arc::new(self.answers_command),
            topics: Arc::new(self.topics),
            profile: Arc::new(self.profile),
            profile_command: Arc::new(self.profile_command),
            login: Arc::new(self.login),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Exchange a token through `POST /auth/session` and return the cookie.
///
/// The app must mount the auth handlers at the root and use a login mock
/// that accepts the token, such as [`MockPorts::signed_in`].
pub async fn sign_in(
    app: &impl actix_web::dev::Service<
        actix_http::Request,
        Response = ServiceResponse,
        Error = actix_web::Error,
    >,
) -> Cookie<'static> {
    let req = actix_web::test::TestRequest::post()
        .uri("/auth/session")
        .set_json(serde_json::json!({ "accessToken": "test-access-token" }))
        .to_request();
    let res = actix_web::test::call_service(app, req).await;
    assert!(res.status().is_success(), "sign-in failed: {}", res.status());
    session_cookie(&res)
}

//! Session exchange endpoints.
//!
//! Sign-in itself happens against the managed auth service. The client
//! hands the resulting access token to `POST /api/auth/session`; the
//! backend resolves it, makes sure a profile exists, and keeps the identity
//! in the cookie session from then on.
//!
//! ```text
//! GET  /api/auth
//! POST /api/auth/session {"accessToken":"..."}
//! POST /api/auth/logout
//! ```

use actix_web::{get, post, web};
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::ToSchema;

use crate::domain::{Error, Identity};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Request body for `POST /api/auth/session`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionRequest {
    /// Access token issued by the auth service.
    pub access_token: Option<String>,
}

/// The signed-in user, or `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CurrentUserResponse {
    /// Session identity, `null` when signed out.
    pub user: Option<Identity>,
}

/// Acknowledgement for `POST /api/auth/logout`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct LogoutResponse {
    /// Always `true`.
    pub success: bool,
}

/// Report who is signed in.
#[utoipa::path(
    get,
    path = "/api/auth",
    responses(
        (status = 200, description = "Current user or null", body = CurrentUserResponse),
        (status = 500, description = "Unreadable session", body = Error)
    ),
    tags = ["auth"],
    operation_id = "currentUser",
    security([])
)]
#[get("/auth")]
pub async fn current_user(session: SessionContext) -> ApiResult<web::Json<CurrentUserResponse>> {
    let user = session.identity()?;
    Ok(web::Json(CurrentUserResponse { user }))
}

/// Trade an access token for a session cookie.
#[utoipa::path(
    post,
    path = "/api/auth/session",
    request_body = SessionRequest,
    responses(
        (status = 200, description = "Signed in", body = CurrentUserResponse,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Missing token", body = Error),
        (status = 401, description = "Token rejected", body = Error),
        (status = 503, description = "Auth service unavailable", body = Error)
    ),
    tags = ["auth"],
    operation_id = "createSession",
    security([])
)]
#[post("/auth/session")]
pub async fn create_session(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<SessionRequest>,
) -> ApiResult<web::Json<CurrentUserResponse>> {
    let token = payload.into_inner().access_token.unwrap_or_default();
    let identity = state.login.sign_in(&token).await?;
    session.persist_identity(&identity)?;
    info!(user_id = %identity.id, "session established");
    Ok(web::Json(CurrentUserResponse {
        user: Some(identity),
    }))
}

/// Drop the session cookie.
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses((status = 200, description = "Signed out", body = LogoutResponse)),
    tags = ["auth"],
    operation_id = "logout",
    security([])
)]
#[post("/auth/logout")]
pub async fn logout(session: SessionContext) -> web::Json<LogoutResponse> {
    session.purge();
    web::Json(LogoutResponse { success: true })
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test};
    use rstest::rstest;
    use serde_json::json;

    use crate::domain::ErrorCode;
    use crate::inbound::http::configure;
    use crate::inbound::http::test_utils::{
        MockPorts, session_cookie, sign_in, signed_in_identity, test_session_middleware,
    };

    fn app(
        ports: MockPorts,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(web::Data::new(ports.into_state()))
            .wrap(test_session_middleware())
            .configure(configure)
    }

    async fn whoami(
        app: &impl actix_web::dev::Service<
            actix_http::Request,
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
        >,
        cookie: Option<actix_web::cookie::Cookie<'static>>,
    ) -> CurrentUserResponse {
        let mut req = actix_test::TestRequest::get().uri("/auth");
        if let Some(cookie) = cookie {
            req = req.cookie(cookie);
        }
        let res = actix_test::call_service(app, req.to_request()).await;
        assert_eq!(res.status(), StatusCode::OK);
        actix_test::read_body_json(res).await
    }

    #[rstest]
    #[actix_web::test]
    async fn anonymous_callers_have_no_user() {
        let app = actix_test::init_service(app(MockPorts::default())).await;

        assert_eq!(whoami(&app, None).await, CurrentUserResponse { user: None });
    }

    #[rstest]
    #[actix_web::test]
    async fn sign_in_round_trips_through_the_cookie() {
        let app = actix_test::init_service(app(MockPorts::signed_in())).await;

        let cookie = sign_in(&app).await;

        assert_eq!(
            whoami(&app, Some(cookie)).await,
            CurrentUserResponse {
                user: Some(signed_in_identity())
            }
        );
    }

    #[rstest]
    #[actix_web::test]
    async fn rejected_tokens_leave_the_caller_signed_out() {
        let mut ports = MockPorts::default();
        ports
            .login
            .expect_sign_in()
            .return_once(|_| Err(Error::unauthorized("Invalid or expired access token")));
        let app = actix_test::init_service(app(ports)).await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/auth/session")
                .set_json(json!({"accessToken": "expired"}))
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        let body: Error = actix_test::read_body_json(res).await;
        assert_eq!(body.code(), ErrorCode::Unauthorized);
    }

    #[rstest]
    #[actix_web::test]
    async fn missing_tokens_reach_the_login_port_as_blank() {
        let mut ports = MockPorts::default();
        ports
            .login
            .expect_sign_in()
            .withf(|token| token.is_empty())
            .return_once(|_| Err(Error::invalid_request("accessToken is required")));
        let app = actix_test::init_service(app(ports)).await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/auth/session")
                .set_json(json!({}))
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[rstest]
    #[actix_web::test]
    async fn logout_purges_the_session() {
        let app = actix_test::init_service(app(MockPorts::signed_in())).await;
        let cookie = sign_in(&app).await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/auth/logout")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let expired = session_cookie(&res);
        let body: LogoutResponse = actix_test::read_body_json(res).await;
        assert_eq!(body, LogoutResponse { success: true });

        assert_eq!(whoami(&app, Some(expired)).await, CurrentUserResponse { user: None });
    }
}

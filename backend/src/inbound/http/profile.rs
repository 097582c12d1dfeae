//! Endpoints for the caller's own profile.
//!
//! ```text
//! GET   /api/me
//! GET   /api/profile
//! PATCH /api/profile {"displayName":"KindPanda123","name":"Minji"}
//! POST  /api/profile/ensure
//! ```

use actix_web::{HttpResponse, get, patch, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Error, ProfileUpdate, Role, UserId, UserProfile, UserValidationError};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Summary of the signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MeResponse {
    /// Stable user identifier.
    #[schema(value_type = String, example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: UserId,
    /// Email from the session identity, if any.
    pub email: Option<String>,
    /// Public nickname.
    #[schema(example = "KindPanda123")]
    pub display_name: String,
    /// Questioner or answerer.
    pub role: Role,
    /// Avatar location, if set.
    pub avatar_url: Option<String>,
}

/// Full profile of the signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    /// Stable user identifier.
    #[schema(value_type = String, example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: UserId,
    /// Email from the session identity, if any.
    pub email: Option<String>,
    /// Private name, never shown to other users.
    pub name: Option<String>,
    /// Public nickname.
    #[schema(example = "KindPanda123")]
    pub display_name: String,
    /// Questioner or answerer.
    pub role: Role,
    /// Avatar location, if set.
    pub avatar_url: Option<String>,
}

impl ProfileResponse {
    fn new(profile: UserProfile, email: Option<String>) -> Self {
        Self {
            id: profile.id,
            email,
            name: profile.name,
            display_name: profile.display_name,
            role: profile.role,
            avatar_url: profile.avatar_url,
        }
    }
}

/// Request body for `PATCH /api/profile`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileBody {
    /// Public nickname, 1 to 20 characters.
    pub display_name: Option<String>,
    /// Private name, at most 20 characters.
    pub name: Option<String>,
}

/// Outcome of `POST /api/profile/ensure`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct EnsureProfileResponse {
    /// Always `true`.
    pub ok: bool,
    /// Whether this call created the profile.
    pub created: bool,
}

fn map_profile_validation_error(err: &UserValidationError) -> Error {
    let field = match err {
        UserValidationError::EmptyDisplayName => "displayName",
        _ => "name",
    };
    Error::invalid_request(err.to_string()).with_details(serde_json::json!({ "field": field }))
}

/// Summary of the signed-in user, or `null` when anonymous.
#[utoipa::path(
    get,
    path = "/api/me",
    responses(
        (status = 200, description = "Signed-in user or null", body = MeResponse),
        (status = 404, description = "Profile missing", body = Error),
        (status = 500, description = "Storage failure", body = Error)
    ),
    tags = ["profile"],
    operation_id = "me",
    security([])
)]
#[get("/me")]
pub async fn me(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Option<MeResponse>>> {
    let Some(identity) = session.identity()? else {
        return Ok(web::Json(None));
    };
    let profile = state.profile.fetch_profile(&identity.id).await?;
    Ok(web::Json(Some(MeResponse {
        id: profile.id,
        email: identity.email,
        display_name: profile.display_name,
        role: profile.role,
        avatar_url: profile.avatar_url,
    })))
}

/// Full profile of the signed-in user.
#[utoipa::path(
    get,
    path = "/api/profile",
    responses(
        (status = 200, description = "Profile", body = ProfileResponse),
        (status = 401, description = "Not signed in", body = Error),
        (status = 404, description = "Profile missing", body = Error),
        (status = 500, description = "Storage failure", body = Error)
    ),
    tags = ["profile"],
    operation_id = "getProfile"
)]
#[get("/profile")]
pub async fn get_profile(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<ProfileResponse>> {
    let identity = session.require_identity()?;
    let profile = state.profile.fetch_profile(&identity.id).await?;
    Ok(web::Json(ProfileResponse::new(profile, identity.email)))
}

/// Edit the signed-in user's names.
#[utoipa::path(
    patch,
    path = "/api/profile",
    request_body = UpdateProfileBody,
    responses(
        (status = 204, description = "Profile updated"),
        (status = 400, description = "Validation failed", body = Error),
        (status = 401, description = "Not signed in", body = Error),
        (status = 404, description = "Profile missing", body = Error),
        (status = 500, description = "Storage failure", body = Error)
    ),
    tags = ["profile"],
    operation_id = "updateProfile"
)]
#[patch("/profile")]
pub async fn update_profile(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<UpdateProfileBody>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let UpdateProfileBody { display_name, name } = payload.into_inner();
    let update = ProfileUpdate::try_new(display_name, name)
        .map_err(|err| map_profile_validation_error(&err))?;
    state.profile_command.update_profile(&user_id, update).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Create the caller's profile when it does not exist yet.
#[utoipa::path(
    post,
    path = "/api/profile/ensure",
    responses(
        (status = 200, description = "Profile present", body = EnsureProfileResponse),
        (status = 401, description = "Not signed in", body = Error),
        (status = 500, description = "Storage failure", body = Error)
    ),
    tags = ["profile"],
    operation_id = "ensureProfile"
)]
#[post("/profile/ensure")]
pub async fn ensure_profile(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<EnsureProfileResponse>> {
    let user_id = session.require_user_id()?;
    let created = state.profile_command.ensure_profile(&user_id).await?;
    Ok(web::Json(EnsureProfileResponse { ok: true, created }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test};
    use chrono::{TimeZone, Utc};
    use rstest::rstest;
    use serde_json::{Value, json};

    use crate::inbound::http::configure;
    use crate::inbound::http::test_utils::{
        MockPorts, SIGNED_IN_USER, sign_in, signed_in_identity, test_session_middleware,
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

    fn stored_profile() -> UserProfile {
        let at = Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).single().expect("valid time");
        UserProfile {
            id: signed_in_identity().id,
            name: Some("Minji".to_owned()),
            display_name: "KindPanda123".to_owned(),
            avatar_url: None,
            role: Role::Answerer,
            created_at: at,
            updated_at: at,
        }
    }

    #[rstest]
    #[actix_web::test]
    async fn me_is_null_for_anonymous_callers() {
        let app = actix_test::init_service(app(MockPorts::default())).await;

        let res =
            actix_test::call_service(&app, actix_test::TestRequest::get().uri("/me").to_request())
                .await;

        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body, Value::Null);
    }

    #[rstest]
    #[actix_web::test]
    async fn me_combines_session_and_profile() {
        let mut ports = MockPorts::signed_in();
        ports
            .profile
            .expect_fetch_profile()
            .return_once(|_| Ok(stored_profile()));
        let app = actix_test::init_service(app(ports)).await;
        let cookie = sign_in(&app).await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/me").cookie(cookie).to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(
            body,
            json!({
                "id": SIGNED_IN_USER,
                "email": "traveler@example.com",
                "displayName": "KindPanda123",
                "role": "ANSWERER",
                "avatarUrl": null
            })
        );
    }

    #[rstest]
    #[actix_web::test]
    async fn profile_requires_a_session() {
        let app = actix_test::init_service(app(MockPorts::default())).await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/profile").to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[rstest]
    #[actix_web::test]
    async fn profile_includes_the_private_name() {
        let mut ports = MockPorts::signed_in();
        ports
            .profile
            .expect_fetch_profile()
            .return_once(|_| Ok(stored_profile()));
        let app = actix_test::init_service(app(ports)).await;
        let cookie = sign_in(&app).await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/profile").cookie(cookie).to_request(),
        )
        .await;

        let body: ProfileResponse = actix_test::read_body_json(res).await;
        assert_eq!(body.name.as_deref(), Some("Minji"));
        assert_eq!(body.role, Role::Answerer);
    }

    #[rstest]
    #[case(json!({"name": "Minji"}), "displayName is required")]
    #[case(json!({"displayName": ""}), "displayName is required")]
    #[case(json!({"displayName": "x".repeat(21)}), "name or displayName too long")]
    #[case(json!({"displayName": "ok", "name": "y".repeat(21)}), "name or displayName too long")]
    #[actix_web::test]
    async fn invalid_edits_are_rejected(#[case] payload: Value, #[case] message: &str) {
        let app = actix_test::init_service(app(MockPorts::signed_in())).await;
        let cookie = sign_in(&app).await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::patch()
                .uri("/profile")
                .cookie(cookie)
                .set_json(payload)
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Error = actix_test::read_body_json(res).await;
        assert_eq!(body.message(), message);
    }

    #[rstest]
    #[actix_web::test]
    async fn valid_edits_return_no_content() {
        let mut ports = MockPorts::signed_in();
        ports
            .profile_command
            .expect_update_profile()
            .withf(|user_id, update| {
                user_id.to_string() == SIGNED_IN_USER
                    && update.display_name().as_ref() == "CalmHeron202"
                    && update.name().is_none()
            })
            .return_once(|_, _| Ok(()));
        let app = actix_test::init_service(app(ports)).await;
        let cookie = sign_in(&app).await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::patch()
                .uri("/profile")
                .cookie(cookie)
                .set_json(json!({"displayName": "CalmHeron202"}))
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::NO_CONTENT);
    }

    #[rstest]
    #[case(true)]
    #[case(false)]
    #[actix_web::test]
    async fn ensure_reports_whether_a_profile_was_created(#[case] created: bool) {
        let mut ports = MockPorts::signed_in();
        ports
            .profile_command
            .expect_ensure_profile()
            .return_once(move |_| Ok(created));
        let app = actix_test::init_service(app(ports)).await;
        let cookie = sign_in(&app).await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/profile/ensure")
                .cookie(cookie)
                .to_request(),
        )
        .await;

        let body: EnsureProfileResponse = actix_test::read_body_json(res).await;
        assert_eq!(body, EnsureProfileResponse { ok: true, created });
    }
}

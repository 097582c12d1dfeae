//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! Wraps the Actix cookie session so handlers deal with the signed-in
//! identity rather than raw keys.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;

use crate::domain::{Error, Identity, UserId};

pub(crate) const USER_ID_KEY: &str = "user_id";
pub(crate) const EMAIL_KEY: &str = "email";

const UNAUTHORIZED_MESSAGE: &str = "Unauthorized";

/// Newtype wrapper that exposes higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Construct a new wrapper from the underlying Actix session.
    #[must_use]
    pub const fn new(session: Session) -> Self {
        Self(session)
    }

    /// Persist the signed-in identity in the session cookie.
    ///
    /// The session id is renewed so a pre-login cookie cannot be replayed.
    ///
    /// # Errors
    ///
    /// Returns `internal_error` when the session cannot be serialised.
    pub fn persist_identity(&self, identity: &Identity) -> Result<(), Error> {
        self.0.renew();
        self.0
            .insert(USER_ID_KEY, identity.id.to_string())
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))?;
        match identity.email.as_deref() {
            Some(email) => self
                .0
                .insert(EMAIL_KEY, email)
                .map_err(|error| Error::internal(format!("failed to persist session: {error}"))),
            None => {
                self.0.remove(EMAIL_KEY);
                Ok(())
            }
        }
    }

    /// Fetch the current user id from the session, if present.
    ///
    /// A value that is not a UUID is treated as signed out.
    ///
    /// # Errors
    ///
    /// Returns `internal_error` when the cookie payload cannot be read.
    pub fn user_id(&self) -> Result<Option<UserId>, Error> {
        let id = self
            .0
            .get::<String>(USER_ID_KEY)
            .map_err(|error| Error::internal(format!("failed to read session: {error}")))?;
        match id {
            Some(raw) => match UserId::new(raw) {
                Ok(id) => Ok(Some(id)),
                Err(error) => {
                    tracing::warn!("invalid user id in session cookie: {error}");
                    Ok(None)
                }
            },
            None => Ok(None),
        }
    }

    /// The signed-in identity, if any.
    ///
    /// # Errors
    ///
    /// Returns `internal_error` when the cookie payload cannot be read.
    pub fn identity(&self) -> Result<Option<Identity>, Error> {
        let Some(id) = self.user_id()? else {
            return Ok(None);
        };
        let email = self
            .0
            .get::<String>(EMAIL_KEY)
            .map_err(|error| Error::internal(format!("failed to read session: {error}")))?;
        Ok(Some(Identity { id, email }))
    }

    /// Require an authenticated user id or return `401 Unauthorized`.
    ///
    /// # Errors
    ///
    /// Returns `unauthorized` when nobody is signed in.
    pub fn require_user_id(&self) -> Result<UserId, Error> {
        self.user_id()?
            .ok_or_else(|| Error::unauthorized(UNAUTHORIZED_MESSAGE))
    }

    /// Require the signed-in identity or return `401 Unauthorized`.
    ///
    /// # Errors
    ///
    /// Returns `unauthorized` when nobody is signed in.
    pub fn require_identity(&self) -> Result<Identity, Error> {
        self.identity()?
            .ok_or_else(|| Error::unauthorized(UNAUTHORIZED_MESSAGE))
    }

    /// Drop every session value and expire the cookie.
    pub fn purge(&self) {
        self.0.purge();
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(Self::new) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, test as actix_test, web};

    use crate::inbound::http::test_utils::{session_cookie, test_session_middleware};

    const USER: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

    fn fixture_identity(email: Option<&str>) -> Identity {
        Identity {
            id: UserId::new(USER).expect("fixture id"),
            email: email.map(str::to_owned),
        }
    }

    fn session_test_app() -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .wrap(test_session_middleware())
            .route(
                "/set",
                web::get().to(|session: SessionContext| async move {
                    session.persist_identity(&fixture_identity(Some("minji@example.com")))?;
                    Ok::<_, Error>(HttpResponse::Ok())
                }),
            )
            .route(
                "/get",
                web::get().to(|session: SessionContext| async move {
                    let identity = session.require_identity()?;
                    Ok::<_, Error>(HttpResponse::Ok().json(identity))
                }),
            )
            .route(
                "/purge",
                web::get().to(|session: SessionContext| async move {
                    session.purge();
                    HttpResponse::Ok()
                }),
            )
    }

    #[actix_web::test]
    async fn round_trips_identity() {
        let app = actix_test::init_service(session_test_app()).await;

        let set_res =
            actix_test::call_service(&app, actix_test::TestRequest::get().uri("/set").to_request()).await;
        assert_eq!(set_res.status(), StatusCode::OK);
        let cookie = session_cookie(&set_res);

        let get_res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/get").cookie(cookie).to_request(),
        )
        .await;
        assert_eq!(get_res.status(), StatusCode::OK);
        let identity: Identity = actix_test::read_body_json(get_res).await;
        assert_eq!(identity, fixture_identity(Some("minji@example.com")));
    }

    #[actix_web::test]
    async fn missing_user_is_unauthorised() {
        let app = actix_test::init_service(session_test_app()).await;

        let res = actix_test::call_service(&app, actix_test::TestRequest::get().uri("/get").to_request()).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        let payload: Error = actix_test::read_body_json(res).await;
        assert_eq!(payload.message(), "Unauthorized");
    }

    #[actix_web::test]
    async fn purged_sessions_are_signed_out() {
        let app = actix_test::init_service(session_test_app()).await;

        let set_res =
            actix_test::call_service(&app, actix_test::TestRequest::get().uri("/set").to_request()).await;
        let cookie = session_cookie(&set_res);
        let purge_res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/purge").cookie(cookie).to_request(),
        )
        .await;
        let expired = session_cookie(&purge_res);

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/get").cookie(expired).to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn tampered_user_id_is_unauthorised() {
        let app = actix_test::init_service(
            session_test_app().route(
                "/set-invalid",
                web::get().to(|session: Session| async move {
                    session
                        .insert(USER_ID_KEY, "not-a-uuid")
                        .expect("set invalid user id");
                    HttpResponse::Ok()
                }),
            ),
        )
        .await;

        let set_res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/set-invalid").to_request(),
        )
        .await;
        let cookie = session_cookie(&set_res);

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/get").cookie(cookie).to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }
}

//! Shared wiring for the integration suites.
//!
//! Every suite drives the real handlers, services and in-memory store; only
//! the identity service is replaced by a token table.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use actix_http::Request;
use actix_session::SessionMiddleware;
use actix_session::config::CookieContentSecurity;
use actix_session::storage::CookieSessionStore;
use actix_web::body::MessageBody;
use actix_web::cookie::{Cookie, Key, SameSite};
use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use async_trait::async_trait;
use chrono::{DateTime, Local, TimeDelta, TimeZone, Utc};
use mockable::Clock;
use serde_json::Value;

use backend::Trace;
use backend::domain::ports::{IdentityProvider, IdentityProviderError, ProfileRepository};
use backend::domain::{Identity, Role, UserId, UserProfile};
use backend::inbound::http::configure;
use backend::inbound::http::state::{HttpState, Repositories};
use backend::outbound::memory::MemoryStore;

pub const QUESTIONER_TOKEN: &str = "questioner-token";
pub const ANSWERER_TOKEN: &str = "answerer-token";
pub const QUESTIONER_ID: &str = "11111111-1111-4111-8111-111111111111";
pub const ANSWERER_ID: &str = "22222222-2222-4222-8222-222222222222";

/// Identity service double resolving a fixed set of tokens.
pub struct TokenIdentityProvider {
    identities: HashMap<String, Identity>,
}

impl TokenIdentityProvider {
    pub fn new() -> Self {
        Self {
            identities: HashMap::new(),
        }
    }

    pub fn with_token(mut self, token: &str, identity: Identity) -> Self {
        self.identities.insert(token.to_owned(), identity);
        self
    }
}

#[async_trait]
impl IdentityProvider for TokenIdentityProvider {
    async fn resolve(&self, access_token: &str) -> Result<Identity, IdentityProviderError> {
        self.identities
            .get(access_token)
            .cloned()
            .ok_or_else(|| IdentityProviderError::invalid_token("Invalid or expired access token"))
    }
}

/// Clock advancing one second per reading so feed order is deterministic.
pub struct SteppingClock(Mutex<DateTime<Utc>>);

impl SteppingClock {
    pub fn starting_at(now: DateTime<Utc>) -> Self {
        Self(Mutex::new(now))
    }
}

impl Clock for SteppingClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        let mut now = match self.0.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        *now += TimeDelta::seconds(1);
        *now
    }
}

pub fn start_of_season() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 4, 1, 8, 0, 0)
        .single()
        .expect("valid fixture time")
}

pub fn identity(id: &str, email: &str) -> Identity {
    Identity {
        id: UserId::new(id).expect("valid user id"),
        email: Some(email.to_owned()),
    }
}

/// Fully wired backend over a seeded in-memory store.
pub struct TestBackend {
    pub store: Arc<MemoryStore>,
    pub state: HttpState,
    key: Key,
}

impl TestBackend {
    pub fn new(page_size: u64) -> Self {
        let store = Arc::new(MemoryStore::seeded(start_of_season()));
        let identities = TokenIdentityProvider::new()
            .with_token(QUESTIONER_TOKEN, identity(QUESTIONER_ID, "traveler@example.com"))
            .with_token(ANSWERER_TOKEN, identity(ANSWERER_ID, "local@example.com"));
        let state = HttpState::from_repositories(
            Repositories::shared(Arc::clone(&store)),
            Arc::new(identities),
            Arc::new(SteppingClock::starting_at(start_of_season())),
            page_size,
        );
        Self {
            store,
            state,
            key: Key::generate(),
        }
    }

    /// Register the answerer's profile ahead of their first sign-in.
    pub async fn register_answerer(&self) {
        let now = start_of_season();
        let profile = UserProfile {
            id: UserId::new(ANSWERER_ID).expect("valid user id"),
            name: Some("Seo-yeon".to_owned()),
            display_name: "HelpfulLocal42".to_owned(),
            avatar_url: None,
            role: Role::Answerer,
            created_at: now,
            updated_at: now,
        };
        let created = self
            .store
            .insert_if_absent(&profile)
            .await
            .expect("profile stored");
        assert!(created, "answerer registered once");
    }

    /// App wired over this backend's state and session key.
    pub fn app(
        &self,
    ) -> App<
        impl ServiceFactory<
            ServiceRequest,
            Config = (),
            Response = ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        > + use<>,
    > {
        test_app(self.state.clone(), self.key.clone())
    }
}

fn test_app(
    state: HttpState,
    key: Key,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let session = SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .cookie_content_security(CookieContentSecurity::Private)
        .cookie_same_site(SameSite::Lax)
        .build();
    App::new()
        .app_data(web::Data::new(state))
        .wrap(Trace)
        .service(web::scope("/api").wrap(session).configure(configure))
}

/// Response status, headers of interest and decoded JSON body.
pub struct Reply {
    pub status: StatusCode,
    pub trace_id: Option<String>,
    pub next_cursor: Option<String>,
    pub body: Value,
}

fn header(response: &ServiceResponse<impl MessageBody>, name: &str) -> Option<String> {
    response
        .headers()
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
}

/// Send `request` and decode the reply; empty bodies decode as `null`.
pub async fn send<S, B>(app: &S, request: Request) -> Reply
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let response = actix_test::call_service(app, request).await;
    let status = response.status();
    let trace_id = header(&response, "trace-id");
    let next_cursor = header(&response, "next-cursor");
    let bytes = actix_test::read_body(response).await;
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("JSON body")
    };
    Reply {
        status,
        trace_id,
        next_cursor,
        body,
    }
}

/// Exchange `token` for a session cookie.
pub async fn sign_in<S, B>(app: &S, token: &str) -> Cookie<'static>
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let request = actix_test::TestRequest::post()
        .uri("/api/auth/session")
        .set_json(serde_json::json!({ "accessToken": token }))
        .to_request();
    let response = actix_test::call_service(app, request).await;
    assert_eq!(response.status(), StatusCode::OK, "sign-in succeeds");
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(Cookie::into_owned)
        .expect("session cookie issued")
}

/// Post a question as the holder of `cookie`, returning its id.
pub async fn ask<S, B>(app: &S, cookie: &Cookie<'static>, title: &str, topic_ids: &[i64]) -> i64
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let request = actix_test::TestRequest::post()
        .uri("/api/questions")
        .cookie(cookie.clone())
        .set_json(serde_json::json!({
            "title": title,
            "body": format!("{title} - details inside"),
            "topicIds": topic_ids,
        }))
        .to_request();
    let reply = send(app, request).await;
    assert_eq!(reply.status, StatusCode::CREATED, "question created: {}", reply.body);
    reply.body["questionId"].as_i64().expect("numeric questionId")
}

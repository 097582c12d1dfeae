//! Tests for HTTP error mapping.

use super::*;
use actix_web::body::to_bytes;
use actix_web::{App, HttpResponse, test as actix_test, web};
use rstest::{fixture, rstest};
use serde::Deserialize;
use serde_json::json;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn expected_trace_id() -> String {
    TRACE_ID.to_owned()
}

#[rstest]
#[case(Error::invalid_request("bad"), StatusCode::BAD_REQUEST)]
#[case(Error::unauthorized("Unauthorized"), StatusCode::UNAUTHORIZED)]
#[case(Error::forbidden("Only Answerer can create answers"), StatusCode::FORBIDDEN)]
#[case(Error::not_found("Question not found"), StatusCode::NOT_FOUND)]
#[case(Error::upstream("relation does not exist"), StatusCode::INTERNAL_SERVER_ERROR)]
#[case(Error::service_unavailable("pool exhausted"), StatusCode::SERVICE_UNAVAILABLE)]
#[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
fn status_code_matches_error_code(#[case] err: Error, #[case] status: StatusCode) {
    assert_eq!(ResponseError::status_code(&err), status);
}

async fn decode_response(error: &Error) -> (StatusCode, Option<String>, Error) {
    let response = ResponseError::error_response(error);
    let status = response.status();
    let header = response
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    let bytes = to_bytes(response.into_body())
        .await
        .expect("reading response body succeeds");
    let payload = serde_json::from_slice(&bytes).expect("error JSON deserialises");
    (status, header, payload)
}

#[rstest]
#[actix_web::test]
async fn internal_errors_are_redacted(expected_trace_id: String) {
    let error = Error::internal("boom")
        .with_trace_id(expected_trace_id.clone())
        .with_details(json!({"secret": "x"}));

    let (status, header, payload) = decode_response(&error).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(header.as_deref(), Some(expected_trace_id.as_str()));
    assert_eq!(payload.code(), ErrorCode::InternalError);
    assert_eq!(payload.message(), "Internal server error");
    assert!(payload.details().is_none());
}

#[rstest]
#[actix_web::test]
async fn upstream_failures_keep_their_message(expected_trace_id: String) {
    let error =
        Error::upstream("duplicate key value violates unique constraint").with_trace_id(expected_trace_id);

    let (status, _, payload) = decode_response(&error).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(payload.code(), ErrorCode::UpstreamFailure);
    assert_eq!(
        payload.message(),
        "duplicate key value violates unique constraint"
    );
}

#[rstest]
#[actix_web::test]
async fn error_without_trace_id_omits_trace_header() {
    let error = Error::invalid_request("Title is required").with_details(json!({"field": "title"}));

    let (status, header, payload) = decode_response(&error).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(header.is_none());
    assert_eq!(payload.trace_id(), None);
    assert_eq!(payload.details(), Some(&json!({"field": "title"})));
}

#[rstest]
fn from_actix_error_is_redacted_internal_error() {
    let err: Error = actix_web::error::ErrorBadRequest("boom").into();

    assert_eq!(err.code(), ErrorCode::InternalError);
    assert_eq!(err.message(), "Internal server error");
    assert_eq!(err.details(), None);
}

#[derive(Debug, Deserialize)]
struct Probe {
    #[expect(dead_code, reason = "only decoded to exercise the extractor")]
    title: String,
}

#[rstest]
#[case("{not json", "application/json", "Invalid JSON body")]
#[case("{\"title\": \"x\"}", "text/plain", "Content-Type must be application/json")]
#[actix_web::test]
async fn malformed_json_bodies_are_invalid_requests(
    #[case] body: &'static str,
    #[case] content_type: &'static str,
    #[case] message: &str,
) {
    let app = actix_test::init_service(App::new().app_data(json_config()).route(
        "/echo",
        web::post().to(|_: web::Json<Probe>| async { HttpResponse::Ok().finish() }),
    ))
    .await;

    let req = actix_test::TestRequest::post()
        .uri("/echo")
        .insert_header(("content-type", content_type))
        .set_payload(body)
        .to_request();
    let res = actix_test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let payload: Error = actix_test::read_body_json(res).await;
    assert_eq!(payload.code(), ErrorCode::InvalidRequest);
    assert_eq!(payload.message(), message);
}

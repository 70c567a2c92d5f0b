//! Tests for HTTP error mapping.

use super::*;
use actix_web::body::to_bytes;
use actix_web::{App, test as actix_test, web};
use rstest::{fixture, rstest};
use serde_json::json;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn internal_error() -> Error {
    Error::internal("pool exhausted")
        .with_trace_id(TRACE_ID)
        .with_details(json!({"secret": "x"}))
}

#[rstest]
#[case(Error::invalid_request("bad"), StatusCode::BAD_REQUEST)]
#[case(Error::unauthorized("no auth"), StatusCode::UNAUTHORIZED)]
#[case(Error::not_found("missing"), StatusCode::NOT_FOUND)]
#[case(Error::conflict("taken"), StatusCode::CONFLICT)]
#[case(Error::service_unavailable("down"), StatusCode::SERVICE_UNAVAILABLE)]
#[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
fn status_code_matches_error_code(#[case] error: Error, #[case] status: StatusCode) {
    assert_eq!(ResponseError::status_code(&error), status);
}

async fn response_parts(error: &Error) -> (StatusCode, Option<String>, Error) {
    let response = ResponseError::error_response(error);
    let status = response.status();
    let trace_id = response
        .headers()
        .get(TRACE_ID_HEADER)
        .map(|value| value.to_str().expect("ascii header").to_owned());
    let bytes = to_bytes(response.into_body())
        .await
        .expect("reading response body succeeds");
    let payload = serde_json::from_slice(&bytes).expect("Error JSON deserialisation succeeds");
    (status, trace_id, payload)
}

#[rstest]
#[actix_web::test]
async fn internal_errors_are_redacted_but_keep_trace_id(internal_error: Error) {
    let (status, trace_id, payload) = response_parts(&internal_error).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(trace_id.as_deref(), Some(TRACE_ID));
    assert_eq!(payload.message(), "Internal server error");
    assert!(payload.details().is_none());
    assert_eq!(payload.trace_id(), Some(TRACE_ID));
}

#[rstest]
#[actix_web::test]
async fn client_errors_keep_message_and_omit_missing_trace_header() {
    let error = Error::not_found("note not found");

    let (status, trace_id, payload) = response_parts(&error).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(trace_id.is_none());
    assert_eq!(payload.code(), ErrorCode::NotFound);
    assert_eq!(payload.message(), "note not found");
}

#[actix_web::test]
async fn unmatched_paths_fall_back_to_not_found() {
    let app = actix_test::init_service(App::new().default_service(web::to(not_found))).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/notes/nonexistent-url/")
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

//! Construction and serialisation of the error envelope.

use rstest::rstest;
use serde_json::json;

use super::*;

#[rstest]
#[case(Error::invalid_request("x"), ErrorCode::InvalidRequest)]
#[case(Error::unauthorized("x"), ErrorCode::Unauthorized)]
#[case(Error::forbidden("x"), ErrorCode::Forbidden)]
#[case(Error::not_found("x"), ErrorCode::NotFound)]
#[case(Error::conflict("x"), ErrorCode::Conflict)]
#[case(Error::service_unavailable("x"), ErrorCode::ServiceUnavailable)]
#[case(Error::internal("x"), ErrorCode::InternalError)]
fn constructors_set_code(#[case] error: Error, #[case] expected: ErrorCode) {
    assert_eq!(error.code(), expected);
}

#[tokio::test]
async fn captures_trace_id_in_scope() {
    let id: TraceId = "00000000-0000-0000-0000-000000000001"
        .parse()
        .expect("valid uuid");
    let error = TraceId::scope(id, async { Error::not_found("gone") }).await;
    assert_eq!(error.trace_id(), Some(id.to_string().as_str()));
}

#[test]
fn serialises_camel_case_and_omits_empty_fields() {
    let value = serde_json::to_value(Error::conflict("taken")).expect("serialise");
    assert_eq!(value, json!({ "code": "conflict", "message": "taken" }));

    let value = serde_json::to_value(
        Error::invalid_request("bad")
            .with_trace_id("t-1")
            .with_details(json!({ "field": "email" })),
    )
    .expect("serialise");
    assert_eq!(
        value,
        json!({
            "code": "invalid_request",
            "message": "bad",
            "traceId": "t-1",
            "details": { "field": "email" }
        })
    );
}

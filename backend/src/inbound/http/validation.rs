//! Shared validation helpers for inbound HTTP adapters.
//!
//! Every rejected field is reported as `400 invalid_request` with
//! `details: {field, code}` so clients can highlight the input.

use std::str::FromStr;

use actix_web::HttpRequest;
use actix_web::error::{JsonPayloadError, PathError, QueryPayloadError};
use serde_json::json;

use crate::domain::{
    CatalogueValidationError, ContactValidationError, Error, LoginValidationError,
    OrderValidationError, PageRequestError, RegistrationValidationError,
};

/// Reason codes surfaced in `details.code`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FieldCode {
    Missing,
    InvalidUuid,
    InvalidNumber,
    OutOfRange,
    Other(&'static str),
}

impl FieldCode {
    fn as_str(self) -> &'static str {
        match self {
            Self::Missing => "missing",
            Self::InvalidUuid => "invalid_uuid",
            Self::InvalidNumber => "invalid_number",
            Self::OutOfRange => "out_of_range",
            Self::Other(code) => code,
        }
    }
}

pub(crate) fn field_error(field: &str, code: FieldCode, message: impl Into<String>) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field,
        "code": code.as_str(),
    }))
}

/// Parse an identifier supplied in a path or query string.
pub(crate) fn parse_id<T: FromStr>(raw: &str, field: &str) -> Result<T, Error> {
    raw.trim().parse().map_err(|_| {
        field_error(
            field,
            FieldCode::InvalidUuid,
            format!("{field} must be a valid UUID"),
        )
    })
}

/// Parse an optional query value, treating an empty string as absent.
pub(crate) fn parse_optional<T: FromStr>(
    raw: Option<&str>,
    field: &str,
    code: FieldCode,
) -> Result<Option<T>, Error> {
    match raw.map(str::trim).filter(|value| !value.is_empty()) {
        None => Ok(None),
        Some(value) => value
            .parse()
            .map(Some)
            .map_err(|_| field_error(field, code, format!("{field} is not valid: {value}"))),
    }
}

pub(crate) fn registration_error(err: RegistrationValidationError) -> Error {
    field_error(err.field(), FieldCode::Other(err.code()), err.to_string())
}

pub(crate) fn login_error(err: LoginValidationError) -> Error {
    let field = match err {
        LoginValidationError::MissingUsername => "username",
        LoginValidationError::MissingPassword => "password",
    };
    field_error(field, FieldCode::Missing, err.to_string())
}

pub(crate) fn catalogue_error(err: CatalogueValidationError) -> Error {
    field_error(err.field(), FieldCode::Other(err.code()), err.to_string())
}

pub(crate) fn page_error(err: PageRequestError) -> Error {
    field_error(err.field(), FieldCode::OutOfRange, err.to_string())
}

pub(crate) fn order_error(err: OrderValidationError) -> Error {
    match err {
        OrderValidationError::Empty => field_error("items", FieldCode::Missing, err.to_string()),
        OrderValidationError::QuantityOutOfRange { index, .. } => Error::invalid_request(
            err.to_string(),
        )
        .with_details(json!({
            "field": "quantity",
            "index": index,
            "code": FieldCode::OutOfRange.as_str(),
        })),
    }
}

pub(crate) fn contact_error(err: ContactValidationError) -> Error {
    let (field, code) = match err {
        ContactValidationError::MissingFields | ContactValidationError::IncompleteMail => {
            return Error::invalid_request(err.to_string());
        }
        ContactValidationError::InvalidEmail => ("email", FieldCode::Other("invalid_format")),
        ContactValidationError::MessageTooLong { .. } => ("message", FieldCode::Other("too_long")),
    };
    field_error(field, code, err.to_string())
}

/// Render malformed JSON bodies as the standard error envelope.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let message = match &err {
        JsonPayloadError::ContentType => "expected an application/json body".to_owned(),
        JsonPayloadError::Overflow { limit } | JsonPayloadError::OverflowKnownLength { limit, .. } => {
            format!("request body exceeds {limit} bytes")
        }
        other => format!("invalid JSON body: {other}"),
    };
    Error::invalid_request(message).into()
}

/// Render malformed query strings as the standard error envelope.
pub fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    Error::invalid_request(format!("invalid query string: {err}")).into()
}

/// Render malformed path segments as the standard error envelope.
pub fn path_error_handler(err: PathError, _req: &HttpRequest) -> actix_web::Error {
    Error::invalid_request(format!("invalid path: {err}")).into()
}

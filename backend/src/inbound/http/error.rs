//! HTTP adapter mapping for domain errors.
//!
//! Purpose: keep the domain error type HTTP-agnostic while allowing actix
//! handlers to turn domain failures into consistent status codes. Error
//! bodies are the shared [`FailureResponse`] envelope, so callers can branch
//! on the HTTP status, the `code` field, or the `success` boolean; all three
//! derive from the same [`Error`].

use actix_web::{HttpResponse, ResponseError, http::StatusCode};

use crate::domain::{Error, ErrorCode};
use crate::inbound::rpc::FailureResponse;

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidArgument | ErrorCode::ValidationFailed => StatusCode::BAD_REQUEST,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Conflict => StatusCode::CONFLICT,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(FailureResponse::from(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::Value;

    #[rstest]
    #[case(Error::invalid_argument("user id must be a positive integer"), StatusCode::BAD_REQUEST)]
    #[case(Error::validation(vec![]), StatusCode::BAD_REQUEST)]
    #[case(Error::not_found("user not found"), StatusCode::NOT_FOUND)]
    #[case(Error::conflict("email already exists"), StatusCode::CONFLICT)]
    #[case(Error::internal("database error"), StatusCode::INTERNAL_SERVER_ERROR)]
    fn codes_map_to_distinct_statuses(#[case] error: Error, #[case] expected: StatusCode) {
        assert_eq!(error.status_code(), expected);
    }

    #[actix_web::test]
    async fn error_body_is_the_shared_failure_envelope() {
        let error = Error::conflict("email already exists");
        let response = error.error_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let body = actix_web::body::to_bytes(response.into_body())
            .await
            .expect("body bytes");
        let value: Value = serde_json::from_slice(&body).expect("error payload");
        assert_eq!(value["success"], Value::from(false));
        assert_eq!(value["message"], Value::from("email already exists"));
        assert_eq!(value["code"], Value::from("conflict"));
    }
}

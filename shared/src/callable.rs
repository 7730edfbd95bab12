//! Callable RPC wire protocol.
//!
//! Requests are `POST`ed as `{"data": ...}`. Results come back as
//! `{"result": ...}` and failures as
//! `{"error": {"status": ..., "message": ..., "details": ...}}`.

use lambda_http::{
    http::{Method, StatusCode},
    Body, Error, Response,
};
use serde::Serialize;
use serde_json::Value;
use crate::errors::CallableError;

#[derive(Serialize)]
struct ResultEnvelope<'a, T: Serialize> {
    result: &'a T,
}

#[derive(Serialize)]
struct ErrorEnvelope<'a> {
    error: ErrorBody<'a>,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    status: &'static str,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<&'a Value>,
}

/// Extract the `data` payload of a callable request
pub fn parse_request(method: &Method, body: &[u8]) -> Result<Value, CallableError> {
    if method != Method::POST {
        tracing::warn!("Callable request with unsupported method: {}", method);
        return Err(CallableError::BadRequest);
    }

    let mut envelope: Value = serde_json::from_slice(body).map_err(|e| {
        tracing::warn!("Failed to parse callable request body: {}", e);
        CallableError::BadRequest
    })?;

    envelope
        .get_mut("data")
        .map(Value::take)
        .ok_or(CallableError::BadRequest)
}

pub fn http_status(err: &CallableError) -> StatusCode {
    match err {
        CallableError::BadRequest | CallableError::InvalidArgument => StatusCode::BAD_REQUEST,
        CallableError::Unauthenticated => StatusCode::UNAUTHORIZED,
        CallableError::PermissionDenied => StatusCode::FORBIDDEN,
        CallableError::Unknown { .. } | CallableError::Internal => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

pub fn success_response<T: Serialize>(result: &T) -> Result<Response<Body>, Error> {
    Ok(Response::builder()
        .status(StatusCode::OK)
        .header("Content-Type", "application/json")
        .header("Access-Control-Allow-Origin", "*")
        .body(serde_json::to_string(&ResultEnvelope { result })?.into())
        .map_err(Box::new)?)
}

pub fn error_response(err: &CallableError) -> Result<Response<Body>, Error> {
    let envelope = ErrorEnvelope {
        error: ErrorBody {
            status: err.status(),
            message: err.to_string(),
            details: err.details(),
        },
    };

    Ok(Response::builder()
        .status(http_status(err))
        .header("Content-Type", "application/json")
        .header("Access-Control-Allow-Origin", "*")
        .body(serde_json::to_string(&envelope)?.into())
        .map_err(Box::new)?)
}

/// CORS preflight
pub fn preflight_response() -> Result<Response<Body>, Error> {
    Ok(Response::builder()
        .status(StatusCode::OK)
        .header("Access-Control-Allow-Origin", "*")
        .header("Access-Control-Allow-Methods", "POST,OPTIONS")
        .header(
            "Access-Control-Allow-Headers",
            "Content-Type,Authorization,X-User-Id",
        )
        .body(Body::Empty)
        .map_err(Box::new)?)
}

pub fn not_found() -> Result<Response<Body>, Error> {
    Ok(Response::builder()
        .status(StatusCode::NOT_FOUND)
        .header("Content-Type", "application/json")
        .header("Access-Control-Allow-Origin", "*")
        .body(serde_json::json!({"error": "Not found"}).to_string().into())
        .map_err(Box::new)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::BackendError;
    use crate::types::DeleteUserResponse;
    use serde_json::json;

    fn body_json(response: &Response<Body>) -> Value {
        serde_json::from_slice(response.body()).unwrap()
    }

    #[test]
    fn test_parse_request_takes_data() {
        let data = parse_request(&Method::POST, br#"{"data":{"uid":"u2"}}"#).unwrap();
        assert_eq!(data, json!({ "uid": "u2" }));

        let data = parse_request(&Method::POST, br#"{"data":{}}"#).unwrap();
        assert_eq!(data, json!({}));
    }

    #[test]
    fn test_parse_request_rejects_malformed_envelopes() {
        assert_eq!(
            parse_request(&Method::GET, br#"{"data":{"uid":"u2"}}"#),
            Err(CallableError::BadRequest)
        );
        assert_eq!(parse_request(&Method::POST, b"not json"), Err(CallableError::BadRequest));
        assert_eq!(parse_request(&Method::POST, b""), Err(CallableError::BadRequest));
        assert_eq!(
            parse_request(&Method::POST, br#"{"uid":"u2"}"#),
            Err(CallableError::BadRequest)
        );
    }

    #[test]
    fn test_success_is_wrapped_in_result() {
        let response = success_response(&DeleteUserResponse::deleted("u2")).unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(&response),
            json!({ "result": { "message": "Successfully deleted user u2" } })
        );
    }

    #[test]
    fn test_error_statuses() {
        let cases = [
            (CallableError::BadRequest, StatusCode::BAD_REQUEST, "INVALID_ARGUMENT"),
            (CallableError::InvalidArgument, StatusCode::BAD_REQUEST, "INVALID_ARGUMENT"),
            (CallableError::Unauthenticated, StatusCode::UNAUTHORIZED, "UNAUTHENTICATED"),
            (CallableError::PermissionDenied, StatusCode::FORBIDDEN, "PERMISSION_DENIED"),
            (CallableError::Internal, StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL"),
        ];

        for (err, http, status) in cases {
            let response = error_response(&err).unwrap();
            assert_eq!(response.status(), http);
            assert_eq!(
                body_json(&response),
                json!({ "error": { "status": status, "message": err.to_string() } })
            );
        }
    }

    #[test]
    fn test_unknown_error_carries_details() {
        let err: CallableError = BackendError::new("User does not exist.")
            .with_code("UserNotFoundException")
            .into();

        let response = error_response(&err).unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(&response),
            json!({
                "error": {
                    "status": "UNKNOWN",
                    "message": "User does not exist.",
                    "details": {
                        "code": "UserNotFoundException",
                        "message": "User does not exist.",
                    },
                }
            })
        );
    }
}

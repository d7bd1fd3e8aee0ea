// API response utility functions module

use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};
use serde::Serialize;

use super::types::Ack;

/// Build JSON response
pub fn json_response<T: Serialize>(status: StatusCode, body: &T) -> Response<Full<Bytes>> {
    let json = match serde_json::to_string(body) {
        Ok(j) => j,
        Err(e) => {
            logger::log_error(&format!("Failed to serialize response: {e}"));
            return Response::builder()
                .status(StatusCode::INTERNAL_SERVER_ERROR)
                .header("Content-Type", "application/json")
                .body(Full::new(Bytes::from(r#"{"ok":false,"error":"serialization failed"}"#)))
                .unwrap_or_else(|_| Response::new(Full::new(Bytes::from("Error"))));
        }
    };

    Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .body(Full::new(Bytes::from(json)))
        .unwrap_or_else(|e| {
            logger::log_error(&format!("Failed to build response: {e}"));
            Response::new(Full::new(Bytes::from("Error")))
        })
}

/// 200 `{"ok":true}`
pub fn ok() -> Response<Full<Bytes>> {
    json_response(StatusCode::OK, &Ack::ok())
}

/// 200 `{"ok":true,"message":...}`
pub fn ok_with_message(message: &'static str) -> Response<Full<Bytes>> {
    json_response(StatusCode::OK, &Ack::ok_with_message(message))
}

/// 500 `{"ok":false,"error":...}`
pub fn internal_error(error: &impl std::fmt::Display) -> Response<Full<Bytes>> {
    logger::log_api_failure(&error.to_string());
    json_response(StatusCode::INTERNAL_SERVER_ERROR, &Ack::failed(error))
}

/// 413 `{"ok":false,"error":"request body too large"}`
pub fn payload_too_large() -> Response<Full<Bytes>> {
    json_response(
        StatusCode::PAYLOAD_TOO_LARGE,
        &Ack::failed("request body too large"),
    )
}

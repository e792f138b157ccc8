//! HTTP response building module
//!
//! Builders for the response shapes this service sends, decoupled from the
//! lookup logic itself.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;

/// Build a 200 response carrying a rendered lookup body.
pub fn build_formatted_response(body: String, content_type: &str) -> Response<Full<Bytes>> {
    let content_length = body.len();
    Response::builder()
        .status(200)
        .header("Content-Type", content_type)
        .header("Content-Length", content_length)
        .body(Full::new(Bytes::from(body)))
        .unwrap_or_else(|e| {
            log_build_error("200", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build a 200 response with no explicit Content-Type.
///
/// The default route reports the bare address without claiming a type.
pub fn build_plain_response(body: String) -> Response<Full<Bytes>> {
    Response::builder()
        .status(200)
        .body(Full::new(Bytes::from(body)))
        .unwrap_or_else(|e| {
            log_build_error("200", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build the validation failure response: 500 with the fixed `invalid ip`
/// body clients match on.
pub fn build_invalid_ip_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(500)
        .body(Full::new(Bytes::from("invalid ip")))
        .unwrap_or_else(|e| {
            log_build_error("500", &e);
            Response::new(Full::new(Bytes::from("invalid ip")))
        })
}

/// Build the unhandled-fault response: 500 carrying the diagnostic trace.
pub fn build_fault_response(trace: String) -> Response<Full<Bytes>> {
    Response::builder()
        .status(500)
        .body(Full::new(Bytes::from(trace)))
        .unwrap_or_else(|e| {
            log_build_error("500", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Log response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}

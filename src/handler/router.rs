//! Request routing dispatch module
//!
//! Entry point for HTTP request processing. Every request resolves in three
//! steps: validate the reported caller address, project the metadata bundle,
//! dispatch on the path prefix. The address check is the only failure a
//! client can trigger; anything else that goes wrong is answered with a 500
//! carrying a diagnostic trace, so misconfigured deployments are visible
//! from the client side.

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::header::HeaderMap;
use hyper::{Request, Response};
use serde_json::Value;

use crate::config::AppState;
use crate::error::HandlerError;
use crate::handler::ip;
use crate::http;
use crate::logger;
use crate::lookup::render::{render, OutputFormat};
use crate::lookup::ConnectionInfo;

/// Main entry point for HTTP request handling
///
/// Never fails: handler errors are turned into 500 responses here. The
/// request body is never read, so any method is served alike.
#[allow(clippy::unused_async)]
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
    remote_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();

    let mut entry = logger::AccessLogEntry::new(
        remote_addr.ip().to_string(),
        req.method().to_string(),
        req.uri().path().to_string(),
    );
    entry.query = req.uri().query().map(ToString::to_string);
    entry.http_version = http_version_label(req.version()).to_string();
    entry.referer = header_value(req.headers(), "referer");
    entry.user_agent = header_value(req.headers(), "user-agent");
    entry.caller_ip = ip::caller_ip(req.headers(), &state.config.trust.ip_header)
        .filter(|candidate| ip::is_dotted_quad(candidate));

    let response = match respond(&req, &state) {
        Ok(response) => response,
        Err(error) if error.is_validation() => {
            logger::log_warning("Caller address missing or malformed");
            http::build_invalid_ip_response()
        }
        Err(error) => {
            let trace = error.diagnostic_trace();
            logger::log_error(&format!("Unhandled lookup fault: {trace}"));
            http::build_fault_response(trace)
        }
    };

    entry.status = response.status().as_u16();
    entry.body_bytes =
        usize::try_from(response.body().size_hint().exact().unwrap_or(0)).unwrap_or(usize::MAX);
    entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);

    if state.config.logging.access_log {
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

/// Resolve a request to its response.
///
/// Step order is observable: a bad caller address wins over a bad bundle,
/// and a bad bundle fails every route, the raw route included.
fn respond<B>(
    req: &Request<B>,
    state: &Arc<AppState>,
) -> Result<Response<Full<Bytes>>, HandlerError> {
    let trust = &state.config.trust;

    // 1. The reported caller address must look like an IPv4 dotted quad
    let ip = ip::caller_ip(req.headers(), &trust.ip_header)
        .filter(|candidate| ip::is_dotted_quad(candidate))
        .ok_or(HandlerError::InvalidAddress)?;

    // 2. Parse the bundle and project the reported field set
    let bundle = metadata_bundle(req.headers(), &trust.metadata_header)?;
    let info = ConnectionInfo::from_bundle(ip, &bundle)?;

    // 3. Dispatch on the path prefix
    let path = req.uri().path();
    let format = query_format(req.uri().query());

    if path.starts_with("/full") {
        let format = OutputFormat::from_query(format.as_deref());
        let body = render(&info, format)?;
        return Ok(http::build_formatted_response(body, format.content_type()));
    }

    if path.starts_with("/raw") {
        let body = serde_json::to_string_pretty(&bundle).map_err(HandlerError::Serialize)?;
        return Ok(http::build_formatted_response(body, "application/json"));
    }

    // Default route: the bare address, compact JSON on request
    let response = match format.as_deref() {
        Some("json") => {
            let body = serde_json::json!({ "ip": info.ip }).to_string();
            http::build_plain_response(body)
        }
        _ => http::build_plain_response(info.ip),
    };
    Ok(response)
}

/// Parse the trusted metadata header into a JSON value.
fn metadata_bundle(headers: &HeaderMap, header_name: &str) -> Result<Value, HandlerError> {
    let value = headers
        .get(header_name)
        .ok_or_else(|| HandlerError::MissingMetadata(header_name.to_string()))?;
    let raw = value.to_str().map_err(HandlerError::MetadataEncoding)?;
    serde_json::from_str(raw).map_err(HandlerError::MetadataParse)
}

/// First `format` value in the query string, when present.
fn query_format(query: Option<&str>) -> Option<String> {
    let query = query?;
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == "format")
        .map(|(_, value)| value.into_owned())
}

fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(ToString::to_string)
}

fn http_version_label(version: hyper::Version) -> &'static str {
    match version {
        hyper::Version::HTTP_09 => "0.9",
        hyper::Version::HTTP_10 => "1.0",
        hyper::Version::HTTP_2 => "2",
        hyper::Version::HTTP_3 => "3",
        _ => "1.1",
    }
}

//! tiny_http server adapter
//!
//! Handles routing, body parsing, and response conversion for tiny_http.

use std::borrow::Cow;
use std::io::{Cursor, Read};
use std::str::FromStr;
use std::sync::Arc;
use std::thread;

use log::{debug, info, warn};
use serde::{Serialize, de::DeserializeOwned};
use tiny_http::{Header, Method, Request, Response, Server, StatusCode};

use crate::api::{
    self, ApiError, ApiResponse, AppContext, CreateAssetRequest, CreateInspectionRequest,
};
use crate::core::models::RequestOrigin;

/// Request bodies above this size are rejected
const MAX_BODY_BYTES: u64 = 1024 * 1024;

/// A routed response, before conversion to tiny_http types
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    /// HTTP status code
    pub status: u16,
    /// JSON body
    pub body: String,
}

impl Reply {
    /// Parse the body as JSON
    pub fn json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::from_str(&self.body)
    }
}

// =============================================================================
// SERVER LOOP
// =============================================================================

/// Serve the API on `addr` with `workers` request threads
///
/// Blocks until every worker exits.
pub fn serve(ctx: Arc<AppContext>, addr: &str, workers: usize) -> anyhow::Result<()> {
    let server = Server::http(addr)
        .map_err(|e| anyhow::anyhow!("Failed to start server on {addr}: {e}"))?;
    let server = Arc::new(server);
    info!("listening on http://{addr} with {workers} worker(s)");

    let handles = (0..workers.max(1))
        .map(|n| {
            let server = Arc::clone(&server);
            let ctx = Arc::clone(&ctx);
            thread::Builder::new()
                .name(format!("http-worker-{n}"))
                .spawn(move || worker_loop(&server, &ctx))
        })
        .collect::<Result<Vec<_>, _>>()?;

    for handle in handles {
        if handle.join().is_err() {
            warn!("http worker panicked");
        }
    }
    Ok(())
}

fn worker_loop(server: &Server, ctx: &AppContext) {
    for mut request in server.incoming_requests() {
        let response = handle_request(ctx, &mut request);
        if let Err(e) = request.respond(response) {
            warn!("failed to send response: {e}");
        }
    }
}

fn handle_request(ctx: &AppContext, request: &mut Request) -> Response<Cursor<Vec<u8>>> {
    let method = request.method().clone();
    let url = request.url().to_string();
    let authorization = header_value(request, "Authorization");
    let origin = RequestOrigin {
        ip_address: request.remote_addr().map(|addr| addr.ip().to_string()),
        device_info: header_value(request, "User-Agent"),
    };

    let reply = match read_body(request.as_reader()) {
        Ok(body) => route(ctx, &method, &url, authorization.as_deref(), &origin, &body),
        Err(e) => error_reply(&e),
    };
    debug!("{method} {url} -> {}", reply.status);
    to_response(reply)
}

fn header_value(request: &Request, name: &'static str) -> Option<String> {
    request
        .headers()
        .iter()
        .find(|h| h.field.equiv(name))
        .map(|h| h.value.as_str().to_string())
}

// =============================================================================
// REQUEST HANDLING
// =============================================================================

/// Route an API request to its handler
///
/// This is the main routing function that maps URL paths to handlers.
#[must_use]
pub fn route(
    ctx: &AppContext,
    method: &Method,
    url: &str,
    authorization: Option<&str>,
    origin: &RequestOrigin,
    body: &str,
) -> Reply {
    let (path, query) = url.split_once('?').unwrap_or((url, ""));

    // Supports both /api/v1/... (versioned) and /api/... (legacy)
    let api_path = path
        .strip_prefix("/api/v1")
        .or_else(|| path.strip_prefix("/api"))
        .unwrap_or(path);
    let api_path = api_path.trim_end_matches('/');

    match (method, api_path) {
        (&Method::Get, "/health") => success_reply(api::health()),
        (&Method::Get, "/assets") => handle_result(api::list_assets(ctx)),
        (&Method::Get, "/inspections/stats") => handle_result(api::get_stats(ctx)),
        (&Method::Get, "/summary") => handle_result(api::get_summary(ctx)),
        (&Method::Get, "/events") => match query_param(query, "since") {
            Ok(since) => success_reply(api::get_events(ctx, since)),
            Err(e) => error_reply(&e),
        },
        (&Method::Get, "/audit") => handle_result(
            query_param(query, "limit")
                .and_then(|limit| api::list_audit(ctx, authorization, limit)),
        ),

        // POST /assets - register asset
        (&Method::Post, "/assets") => match parse_json::<CreateAssetRequest>(body) {
            Ok(req) => handle_result(api::create_asset(ctx, authorization, origin, &req)),
            Err(e) => error_reply(&e),
        },

        // POST /inspections - record inspection
        (&Method::Post, "/inspections") => match parse_json::<CreateInspectionRequest>(body) {
            Ok(req) => handle_result(api::create_inspection(ctx, authorization, origin, &req)),
            Err(e) => error_reply(&e),
        },

        // History: GET /assets/{ref}/inspections
        _ if method == &Method::Get
            && api_path.starts_with("/assets/")
            && api_path.ends_with("/inspections") =>
        {
            let asset_ref = api_path
                .strip_prefix("/assets/")
                .and_then(|s| s.strip_suffix("/inspections"))
                .unwrap_or("");
            handle_result(
                decode_segment(asset_ref).and_then(|r| api::list_inspections(ctx, &r)),
            )
        },

        // Detail: GET /inspections/{id}
        _ if method == &Method::Get && api_path.starts_with("/inspections/") => {
            match single_segment(api_path, "/inspections/") {
                Some(id) => {
                    handle_result(decode_segment(id).and_then(|id| api::get_inspection(ctx, &id)))
                },
                None => not_found_reply(method, api_path),
            }
        },

        // Scan: GET /assets/{ref}
        _ if method == &Method::Get && api_path.starts_with("/assets/") => {
            match single_segment(api_path, "/assets/") {
                Some(asset_ref) => handle_result(
                    decode_segment(asset_ref)
                        .and_then(|r| api::get_asset(ctx, &r, authorization)),
                ),
                None => not_found_reply(method, api_path),
            }
        },

        // Retire: DELETE /assets/{ref}
        _ if method == &Method::Delete && api_path.starts_with("/assets/") => {
            match single_segment(api_path, "/assets/") {
                Some(asset_ref) => handle_result(
                    decode_segment(asset_ref)
                        .and_then(|r| api::delete_asset(ctx, &r, authorization, origin)),
                ),
                None => not_found_reply(method, api_path),
            }
        },

        // 404 for unknown API routes
        _ => not_found_reply(method, api_path),
    }
}

/// The path segment after `prefix`, if it is the last one
fn single_segment<'a>(path: &'a str, prefix: &str) -> Option<&'a str> {
    path.strip_prefix(prefix)
        .filter(|rest| !rest.is_empty() && !rest.contains('/'))
}

/// Percent-decode one path segment (`FE%20001` is `FE 001`)
fn decode_segment(raw: &str) -> Result<Cow<'_, str>, ApiError> {
    urlencoding::decode(raw)
        .map_err(|_| ApiError::bad_request(format!("Invalid path segment: {raw}")))
}

fn query_param<T: FromStr>(query: &str, key: &str) -> Result<Option<T>, ApiError> {
    query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(k, _)| *k == key)
        .map(|(_, value)| {
            value
                .parse()
                .map_err(|_| ApiError::bad_request(format!("Invalid {key}: {value}")))
        })
        .transpose()
}

// =============================================================================
// BODY PARSING
// =============================================================================

/// Read at most [`MAX_BODY_BYTES`]; anything longer is rejected, not cut
fn read_body(reader: impl Read) -> Result<String, ApiError> {
    let mut bytes = Vec::new();
    reader
        .take(MAX_BODY_BYTES + 1)
        .read_to_end(&mut bytes)
        .map_err(|e| ApiError::bad_request(format!("Failed to read request body: {e}")))?;
    if u64::try_from(bytes.len()).unwrap_or(u64::MAX) > MAX_BODY_BYTES {
        return Err(ApiError::payload_too_large(format!(
            "Request body too large (limit {MAX_BODY_BYTES} bytes)"
        )));
    }
    String::from_utf8(bytes)
        .map_err(|_| ApiError::bad_request("Request body is not valid UTF-8"))
}

fn parse_json<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::bad_request(format!("Invalid JSON: {e}")))
}

// =============================================================================
// RESPONSE CONVERSION
// =============================================================================

fn handle_result<T: Serialize>(result: Result<T, ApiError>) -> Reply {
    match result {
        Ok(data) => success_reply(data),
        Err(e) => error_reply(&e),
    }
}

fn success_reply<T: Serialize>(data: T) -> Reply {
    json_reply(&ApiResponse::success(data), 200)
}

fn error_reply(error: &ApiError) -> Reply {
    let response = ApiResponse::<()>::error(error.code.as_str(), &error.message);
    json_reply(&response, error.status_code())
}

fn not_found_reply(method: &Method, api_path: &str) -> Reply {
    error_reply(&ApiError::not_found(format!(
        "API endpoint not found: {method} {api_path}"
    )))
}

fn json_reply<T: Serialize>(data: &T, status: u16) -> Reply {
    let body = serde_json::to_string(data).unwrap_or_else(|_| r#"{"success":false}"#.to_string());
    Reply { status, body }
}

fn to_response(reply: Reply) -> Response<Cursor<Vec<u8>>> {
    let mut response =
        Response::from_data(reply.body.into_bytes()).with_status_code(StatusCode(reply.status));
    for (field, value) in [
        ("Content-Type", "application/json"),
        ("Access-Control-Allow-Origin", "*"),
    ] {
        if let Ok(header) = Header::from_bytes(field, value) {
            response.add_header(header);
        }
    }
    response
}

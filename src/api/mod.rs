// API module entry
// Health check and RFID routing endpoints

mod handlers;
mod path;
mod types;

use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::header::USER_AGENT;
use hyper::{Method, Request, Response, Version};
use std::net::SocketAddr;
use std::time::Instant;

use crate::config::AppState;
use crate::http;
use crate::logger::{self, AccessLogEntry};

pub use path::{match_route, ApiRoute};

const ALLOWED_METHODS: &str = "GET, HEAD";

/// API route handler
///
/// Dispatches on method and path, then writes the access log entry. The body
/// type is generic because no route reads the request body.
pub fn handle_request<B>(
    req: &Request<B>,
    state: &AppState,
    peer_addr: SocketAddr,
) -> Response<Full<Bytes>> {
    let started = Instant::now();
    let method = req.method();
    let path = req.uri().path();
    let is_head = *method == Method::HEAD;
    let method_allowed = is_head || *method == Method::GET;

    let (response, uid) = match match_route(path) {
        None => (handlers::handle_route_not_found(path, is_head), None),
        Some(_) if !method_allowed => {
            logger::log_warning(&format!("Method not allowed: {method} {path}"));
            (http::build_405_response(ALLOWED_METHODS, is_head), None)
        }
        Some(ApiRoute::Health) => (handlers::handle_health(is_head), None),
        Some(ApiRoute::RoutingByRfid(raw_uid)) => {
            let (response, uid) = handlers::handle_routing_by_rfid(state, &raw_uid, is_head);
            (response, Some(uid))
        }
    };

    if state.config.logging.access_log {
        let mut entry = AccessLogEntry::new(
            peer_addr.to_string(),
            method.to_string(),
            req.uri()
                .path_and_query()
                .map_or_else(|| path.to_string(), ToString::to_string),
        );
        entry.http_version = version_label(req.version()).to_string();
        entry.status = response.status().as_u16();
        entry.body_bytes = response.body().size_hint().exact().unwrap_or(0);
        entry.user_agent = req
            .headers()
            .get(USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .map(ToString::to_string);
        entry.uid = uid.map(|u| u.to_string());
        entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    response
}

fn version_label(version: Version) -> &'static str {
    match version {
        Version::HTTP_09 => "0.9",
        Version::HTTP_10 => "1.0",
        Version::HTTP_2 => "2",
        Version::HTTP_3 => "3",
        _ => "1.1",
    }
}

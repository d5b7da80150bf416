// Route handlers

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};

use super::types::{HealthResponse, RouteNotFoundResponse, UnknownUidResponse};
use crate::config::AppState;
use crate::http;
use crate::logger;
use crate::mapping::Uid;

/// Liveness check, independent of the mapping table
pub fn handle_health(is_head: bool) -> Response<Full<Bytes>> {
    http::build_json_response(StatusCode::OK, &HealthResponse::OK, is_head)
}

/// Resolve a UID to its routing destination.
///
/// Returns the response and the normalized UID it was computed for.
pub fn handle_routing_by_rfid(
    state: &AppState,
    raw_uid: &str,
    is_head: bool,
) -> (Response<Full<Bytes>>, Uid) {
    match state.resolver.resolve(raw_uid) {
        Ok(result) => {
            logger::log_debug(&format!(
                "[Routing] {} -> store {} (warehouse {}, angle {})",
                result.uid, result.store, result.warehouse_id, result.servo_angle
            ));
            let response = http::build_json_response(StatusCode::OK, &result, is_head);
            (response, result.uid)
        }
        Err(err) => {
            logger::log_unknown_uid(err.uid.as_str());
            let body = UnknownUidResponse::from(&err);
            let response = http::build_json_response(StatusCode::NOT_FOUND, &body, is_head);
            (response, err.uid)
        }
    }
}

/// Any path outside the API
pub fn handle_route_not_found(path: &str, is_head: bool) -> Response<Full<Bytes>> {
    let body = RouteNotFoundResponse {
        error: "NOT_FOUND",
        path,
    };
    http::build_json_response(StatusCode::NOT_FOUND, &body, is_head)
}

// API response body types

use serde::Serialize;

use crate::error::NotFoundError;

/// `GET /health` body
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

impl HealthResponse {
    pub const OK: Self = Self { status: "ok" };
}

/// 404 body for an unmapped UID
#[derive(Debug, Serialize)]
pub struct UnknownUidResponse {
    pub error: &'static str,
    pub uid: String,
    pub message: String,
}

impl From<&NotFoundError> for UnknownUidResponse {
    fn from(err: &NotFoundError) -> Self {
        Self {
            error: NotFoundError::CODE,
            uid: err.uid.to_string(),
            message: err.to_string(),
        }
    }
}

/// 404 body for any path outside the API
#[derive(Debug, Serialize)]
pub struct RouteNotFoundResponse<'a> {
    pub error: &'static str,
    pub path: &'a str,
}

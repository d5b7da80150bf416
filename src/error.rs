//! Error types
//!
//! `ConfigError` is fatal at startup; `NotFoundError` is the only per-request
//! failure and is turned into a 404 at the API boundary.

use std::path::PathBuf;

use crate::mapping::{StoreCode, Uid};

/// Startup configuration failure. The process must not serve traffic after one.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read mapping file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("mapping source is not a JSON object of UID -> store code: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("mapping key {raw:?} is empty after normalization")]
    EmptyUid { raw: String },

    #[error("UID {uid} maps to an empty store code")]
    EmptyStore { uid: Uid },

    #[error("UID {uid} is mapped more than once (keys {first:?} and {second:?})")]
    DuplicateUid {
        uid: Uid,
        first: String,
        second: String,
    },

    #[error("store code {store} has no entry in the {table} table")]
    MissingRoute {
        store: StoreCode,
        table: &'static str,
    },
}

/// Lookup miss for a normalized UID.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown RFID UID (not mapped).")]
pub struct NotFoundError {
    pub uid: Uid,
}

impl NotFoundError {
    /// Machine-readable error code returned to clients
    pub const CODE: &'static str = "UNKNOWN_UID";
}

//! HTTP protocol layer module
//!
//! Response builders decoupled from the routing logic.

pub mod response;

// Re-export commonly used types
pub use response::{build_405_response, build_json_response};

// Configuration types module
// Defines all configuration-related data structures

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::mapping::StoreCode;
use crate::routing::tables::{default_servo_angles, default_warehouses};
use crate::routing::RoutingTables;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub routing: RoutingConfig,
    pub logging: LoggingConfig,
    pub performance: PerformanceConfig,
}

/// Server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
    /// Listen backlog passed to `listen(2)`
    pub backlog: i32,
}

/// Routing configuration: mapping source plus per-store attributes
#[derive(Debug, Deserialize, Clone)]
pub struct RoutingConfig {
    /// JSON file mapping UID -> store code
    pub mapping_file: String,
    /// Store code -> warehouse id
    #[serde(default = "default_warehouses")]
    pub warehouses: HashMap<StoreCode, u32>,
    /// Store code -> servo angle in degrees
    #[serde(default = "default_servo_angles")]
    pub servo_angles: HashMap<StoreCode, u16>,
}

impl RoutingConfig {
    pub fn tables(&self) -> RoutingTables {
        RoutingTables {
            warehouses: self.warehouses.clone(),
            servo_angles: self.servo_angles.clone(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    /// Minimum level for diagnostic lines (error, warn, info, debug)
    pub level: String,
    pub access_log: bool,
    /// Access log format (combined, common, json)
    #[serde(default = "default_access_log_format")]
    pub access_log_format: String,
    /// Access log file path (optional, stdout if not set)
    #[serde(default)]
    pub access_log_file: Option<String>,
    /// Error log file path (optional, stderr if not set)
    #[serde(default)]
    pub error_log_file: Option<String>,
}

#[allow(clippy::missing_const_for_fn)]
fn default_access_log_format() -> String {
    "combined".to_string()
}

/// Performance configuration
#[derive(Debug, Deserialize, Clone)]
pub struct PerformanceConfig {
    pub keep_alive_timeout: u64,
    pub read_timeout: u64,
    pub write_timeout: u64,
    pub max_connections: Option<u64>,
}

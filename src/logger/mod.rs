//! Logger module
//!
//! Provides logging utilities for the routing service including:
//! - Startup banner and mapping summary
//! - Leveled diagnostic lines (error, warn, info, debug)
//! - Access logging in combined, common or json format
//! - File-based logging support

mod format;
pub mod writer;

pub use format::AccessLogEntry;

use chrono::Local;
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;

use crate::config::{AppState, Config};

/// Diagnostic log level, ordered from most to least severe
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Error,
    Warn,
    Info,
    Debug,
}

impl FromStr for Level {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "error" => Ok(Self::Error),
            "warn" | "warning" => Ok(Self::Warn),
            "info" => Ok(Self::Info),
            "debug" | "trace" => Ok(Self::Debug),
            other => Err(format!("Unknown log level: {other}")),
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Error => "ERROR",
            Self::Warn => "WARN",
            Self::Info => "INFO",
            Self::Debug => "DEBUG",
        };
        f.write_str(name)
    }
}

/// Initialize the logger with configuration
///
/// Should be called once at application startup.
pub fn init(config: &Config) -> std::io::Result<()> {
    let level = config
        .logging
        .level
        .parse::<Level>()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;
    writer::init(
        level,
        config.logging.access_log_file.as_deref(),
        config.logging.error_log_file.as_deref(),
    )
}

fn enabled(level: Level) -> bool {
    writer::get().map_or(level <= Level::Info, |w| level <= w.level())
}

fn write_line(level: Level, message: &str) {
    if !enabled(level) {
        return;
    }
    let line = format!("{} [{level}] {message}", Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z"));
    match (writer::get(), level) {
        (Some(w), Level::Error | Level::Warn) => w.write_error(&line),
        (Some(w), _) => w.write_info(&line),
        (None, Level::Error | Level::Warn) => eprintln!("{line}"),
        (None, _) => println!("{line}"),
    }
}

/// Write to access log specifically
fn write_access(message: &str) {
    match writer::get() {
        Some(w) => w.write_access(message),
        None => println!("{message}"),
    }
}

pub fn log_error(message: &str) {
    write_line(Level::Error, message);
}

pub fn log_warning(message: &str) {
    write_line(Level::Warn, message);
}

pub fn log_info(message: &str) {
    write_line(Level::Info, message);
}

pub fn log_debug(message: &str) {
    write_line(Level::Debug, message);
}

pub fn log_server_start(addr: &SocketAddr, state: &AppState) {
    let config = &state.config;
    let mapping = state.resolver.mapping();
    let stores = mapping
        .store_codes()
        .into_iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");

    log_info("======================================");
    log_info("RFID routing service started");
    log_info(&format!("Listening on: http://{addr}"));
    log_info(&format!(
        "Mapping file: {} ({} UIDs, stores: [{stores}])",
        config.routing.mapping_file,
        mapping.len()
    ));
    log_info(&format!("Log level: {}", config.logging.level));
    if let Some(workers) = config.server.workers {
        log_info(&format!("Worker threads: {workers}"));
    }
    if let Some(max) = config.performance.max_connections {
        log_info(&format!("Max connections: {max}"));
    }
    if let Some(ref path) = config.logging.access_log_file {
        log_info(&format!("Access log: {path}"));
    }
    if let Some(ref path) = config.logging.error_log_file {
        log_info(&format!("Error log: {path}"));
    }
    log_info(&format!("  - GET http://{addr}/health"));
    log_info(&format!("  - GET http://{addr}/api/routing/by-rfid/:uid"));
    log_info("======================================");
}

pub fn log_connection_accepted(peer_addr: &SocketAddr) {
    log_debug(&format!("[Connection] Accepted from: {peer_addr}"));
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    log_error(&format!("Failed to serve connection: {err:?}"));
}

pub fn log_unknown_uid(uid: &str) {
    log_warning(&format!("[Routing] Unknown UID: {uid:?}"));
}

/// Log formatted access log entry
pub fn log_access(entry: &AccessLogEntry, format: &str) {
    write_access(&entry.format(format));
}

pub fn log_shutdown(reason: &str) {
    log_info(&format!("[Shutdown] {reason}, no longer accepting connections"));
}

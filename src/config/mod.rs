// Configuration module entry point
// Loads layered settings and builds the immutable application state

mod state;
mod types;

use std::net::SocketAddr;

// Re-export public types
pub use state::AppState;
pub use types::Config;

/// Default config file name (without extension)
pub const DEFAULT_CONFIG_PATH: &str = "config";

/// Environment variable prefix, e.g. `RFID_ROUTER_SERVER__PORT=3001`
pub const ENV_PREFIX: &str = "RFID_ROUTER";

impl Config {
    /// Load configuration from specified file path (extension optional).
    /// A missing file is not an error; built-in defaults apply.
    pub fn load_from(config_path: &str) -> Result<Self, ::config::ConfigError> {
        Self::load_with_env(config_path, None)
    }

    /// Same as [`Config::load_from`], reading environment overrides from `env`
    /// instead of the process environment when given.
    pub fn load_with_env(
        config_path: &str,
        env: Option<::config::Map<String, String>>,
    ) -> Result<Self, ::config::ConfigError> {
        let settings = ::config::Config::builder()
            .add_source(::config::File::with_name(config_path).required(false))
            .add_source(
                ::config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .source(env),
            )
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            .set_default("server.backlog", 128)?
            .set_default("routing.mapping_file", "./rfid-map.json")?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("performance.keep_alive_timeout", 75)?
            .set_default("performance.read_timeout", 30)?
            .set_default("performance.write_timeout", 30)?
            .build()?;

        settings.try_deserialize()
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::StoreCode;
    use std::io::Write;

    fn write_config(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_defaults_without_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent");
        let cfg = Config::load_from(missing.to_str().unwrap()).unwrap();

        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(cfg.server.port, 3000);
        assert_eq!(cfg.routing.mapping_file, "./rfid-map.json");
        assert_eq!(cfg.logging.level, "info");
        assert_eq!(cfg.logging.access_log_format, "combined");
        assert_eq!(cfg.performance.max_connections, None);

        let tables = cfg.routing.tables();
        assert_eq!(tables.warehouse_id(&StoreCode::new("A")), Some(1));
        assert_eq!(tables.warehouse_id(&StoreCode::new("C")), Some(3));
        assert_eq!(tables.servo_angle(&StoreCode::new("B")), Some(15));
        assert_eq!(cfg.get_socket_addr().unwrap().port(), 3000);
    }

    #[test]
    fn test_file_overrides_defaults() {
        let file = write_config(
            r#"
[server]
host = "127.0.0.1"
port = 8088
workers = 2

[routing]
mapping_file = "/etc/rfid/map.json"

[routing.warehouses]
A = 10
D = 40

[routing.servo_angles]
A = 0
D = 180

[logging]
level = "debug"
access_log = false
access_log_format = "json"

[performance]
max_connections = 64
"#,
        );

        let cfg = Config::load_from(file.path().to_str().unwrap()).unwrap();
        assert_eq!(cfg.server.port, 8088);
        assert_eq!(cfg.server.workers, Some(2));
        assert_eq!(cfg.routing.mapping_file, "/etc/rfid/map.json");
        assert!(!cfg.logging.access_log);
        assert_eq!(cfg.logging.access_log_format, "json");
        assert_eq!(cfg.performance.max_connections, Some(64));
        assert_eq!(cfg.performance.read_timeout, 30);

        let tables = cfg.routing.tables();
        assert_eq!(tables.warehouse_id(&StoreCode::new("D")), Some(40));
        assert_eq!(tables.servo_angle(&StoreCode::new("D")), Some(180));
        // A configured table replaces the default one wholesale
        assert_eq!(tables.warehouse_id(&StoreCode::new("B")), None);
        assert_eq!(tables.servo_angle(&StoreCode::new("B")), None);
    }

    #[test]
    fn test_env_overrides_file_and_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent");
        let env: ::config::Map<String, String> = [
            ("RFID_ROUTER_SERVER__PORT", "3001"),
            ("RFID_ROUTER_ROUTING__WAREHOUSES__A", "9"),
            ("UNRELATED_SERVER__PORT", "4000"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        let cfg = Config::load_with_env(missing.to_str().unwrap(), Some(env)).unwrap();
        assert_eq!(cfg.server.port, 3001);

        let tables = cfg.routing.tables();
        assert_eq!(tables.warehouse_id(&StoreCode::new("A")), Some(9));
        // An env table replaces the default one wholesale
        assert_eq!(tables.warehouse_id(&StoreCode::new("B")), None);
        assert_eq!(tables.servo_angle(&StoreCode::new("B")), Some(15));
    }

    #[test]
    fn test_invalid_address() {
        let file = write_config("[server]\nhost = \"not an ip\"\n");
        let cfg = Config::load_from(file.path().to_str().unwrap()).unwrap();
        assert!(cfg.get_socket_addr().is_err());
    }
}

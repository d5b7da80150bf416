// Application state module
// Immutable state shared by every connection task

use super::types::Config;
use crate::error::ConfigError;
use crate::mapping::MappingTable;
use crate::routing::Resolver;

/// Application state
///
/// Built once at startup and shared behind an `Arc`; nothing in here is
/// written while serving traffic.
#[derive(Debug)]
pub struct AppState {
    pub config: Config,
    pub resolver: Resolver,
}

impl AppState {
    /// Load the mapping file named in the config and validate it against the
    /// routing tables
    pub fn load(config: Config) -> Result<Self, ConfigError> {
        let mapping = MappingTable::load(&config.routing.mapping_file)?;
        let resolver = Resolver::new(mapping, config.routing.tables())?;
        Ok(Self::with_resolver(config, resolver))
    }

    /// Build state around an already constructed resolver
    pub const fn with_resolver(config: Config, resolver: Resolver) -> Self {
        Self { config, resolver }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn config_with_mapping(path: &str) -> Config {
        let dir = tempfile::tempdir().unwrap();
        let mut cfg = Config::load_from(dir.path().join("absent").to_str().unwrap()).unwrap();
        cfg.routing.mapping_file = path.to_string();
        cfg
    }

    #[test]
    fn test_load_builds_resolver() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(br#"{"A1B2": "A"}"#).unwrap();
        file.flush().unwrap();

        let state = AppState::load(config_with_mapping(file.path().to_str().unwrap())).unwrap();
        assert_eq!(state.resolver.mapping().len(), 1);
        assert_eq!(state.resolver.resolve("a1b2").unwrap().warehouse_id, 1);
    }

    #[test]
    fn test_load_fails_on_missing_file() {
        let err = AppState::load(config_with_mapping("/nonexistent/rfid-map.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_load_fails_on_unrouted_store() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(br#"{"A1B2": "Q"}"#).unwrap();
        file.flush().unwrap();

        let err = AppState::load(config_with_mapping(file.path().to_str().unwrap())).unwrap_err();
        assert!(matches!(err, ConfigError::MissingRoute { .. }));
    }
}

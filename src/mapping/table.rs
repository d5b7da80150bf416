// Mapping table module
// Loads the UID -> store code table once at startup

use serde::de::{Deserializer, MapAccess, Visitor};
use serde::Deserialize;
use std::collections::hash_map::Entry;
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::path::Path;

use super::types::{StoreCode, Uid};
use crate::error::ConfigError;

/// Immutable UID -> store code table
#[derive(Debug, Clone, Default)]
pub struct MappingTable {
    entries: HashMap<Uid, StoreCode>,
}

impl MappingTable {
    /// Load the table from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&content)
    }

    /// Parse the table from JSON text of the form `{"A1B2": "A", ...}`
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let RawEntries(raw) = serde_json::from_str(json)?;
        Self::from_entries(raw)
    }

    /// Build the table from raw key/value pairs, normalizing keys.
    ///
    /// Keys that collide after normalization are rejected rather than
    /// silently overwritten.
    pub fn from_entries<I, K, V>(raw: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: AsRef<str>,
    {
        let mut entries = HashMap::new();
        let mut originals: HashMap<Uid, String> = HashMap::new();

        for (key, value) in raw {
            let key = key.into();
            let uid = Uid::normalize(&key);
            if uid.is_empty() {
                return Err(ConfigError::EmptyUid { raw: key });
            }

            let store = StoreCode::new(value.as_ref());
            if store.is_empty() {
                return Err(ConfigError::EmptyStore { uid });
            }

            match originals.entry(uid.clone()) {
                Entry::Occupied(first) => {
                    return Err(ConfigError::DuplicateUid {
                        uid,
                        first: first.get().clone(),
                        second: key,
                    });
                }
                Entry::Vacant(slot) => {
                    slot.insert(key);
                }
            }
            entries.insert(uid, store);
        }

        Ok(Self { entries })
    }

    pub fn lookup(&self, uid: &Uid) -> Option<&StoreCode> {
        self.entries.get(uid)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Distinct store codes referenced by the table, sorted
    pub fn store_codes(&self) -> BTreeSet<&StoreCode> {
        self.entries.values().collect()
    }
}

/// JSON object read as ordered pairs so duplicate keys stay visible
struct RawEntries(Vec<(String, String)>);

impl<'de> Deserialize<'de> for RawEntries {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = RawEntries;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an object mapping UID strings to store code strings")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut pairs = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((key, value)) = map.next_entry::<String, String>()? {
                    pairs.push((key, value));
                }
                Ok(RawEntries(pairs))
            }
        }

        deserializer.deserialize_map(EntriesVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_normalizes_keys() {
        let table = MappingTable::from_json_str(r#"{" a1b2 ": "A", "C3D4": "b"}"#).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(
            table.lookup(&Uid::normalize("A1B2")),
            Some(&StoreCode::new("A"))
        );
        assert_eq!(
            table.lookup(&Uid::normalize("c3d4")),
            Some(&StoreCode::new("B"))
        );
        assert_eq!(table.lookup(&Uid::normalize("ZZZZ")), None);
    }

    #[test]
    fn test_empty_object_is_valid() {
        let table = MappingTable::from_json_str("{}").unwrap();
        assert!(table.is_empty());
        assert!(table.store_codes().is_empty());
    }

    #[test]
    fn test_store_codes_are_distinct() {
        let table =
            MappingTable::from_json_str(r#"{"U1": "A", "U2": "A", "U3": "C"}"#).unwrap();
        let codes: Vec<&str> = table.store_codes().into_iter().map(StoreCode::as_str).collect();
        assert_eq!(codes, vec!["A", "C"]);
    }

    #[test]
    fn test_rejects_exact_duplicate_keys() {
        let err = MappingTable::from_json_str(r#"{"A1B2": "A", "A1B2": "B"}"#).unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateUid { .. }), "got {err:?}");
    }

    #[test]
    fn test_rejects_keys_colliding_after_normalization() {
        let err = MappingTable::from_json_str(r#"{"a1b2": "A", " A1B2": "B"}"#).unwrap_err();
        match err {
            ConfigError::DuplicateUid { uid, first, second } => {
                assert_eq!(uid.as_str(), "A1B2");
                assert_eq!(first, "a1b2");
                assert_eq!(second, " A1B2");
            }
            other => panic!("expected DuplicateUid, got {other:?}"),
        }
    }

    #[test]
    fn test_rejects_blank_key_and_blank_store() {
        assert!(matches!(
            MappingTable::from_json_str(r#"{"  ": "A"}"#),
            Err(ConfigError::EmptyUid { .. })
        ));
        assert!(matches!(
            MappingTable::from_json_str(r#"{"A1B2": ""}"#),
            Err(ConfigError::EmptyStore { .. })
        ));
    }

    #[test]
    fn test_rejects_malformed_json() {
        for bad in ["", "not json", "[]", r#"["A1B2"]"#, r#"{"A1B2": 1}"#, r#"{"A1B2": null}"#] {
            assert!(
                matches!(MappingTable::from_json_str(bad), Err(ConfigError::Parse(_))),
                "accepted {bad:?}"
            );
        }
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(br#"{"A1B2": "A", "E5F6": "C"}"#).unwrap();
        file.flush().unwrap();

        let table = MappingTable::load(file.path()).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(
            table.lookup(&Uid::normalize("e5f6")),
            Some(&StoreCode::new("C"))
        );
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = MappingTable::load(dir.path().join("rfid-map.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
        assert!(err.to_string().contains("rfid-map.json"));
    }
}

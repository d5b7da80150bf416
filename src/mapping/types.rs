// Mapping key and value types
// UIDs and store codes are compared in normalized form only

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// RFID tag identifier in normalized form (trimmed, upper-cased)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Uid(String);

impl Uid {
    /// Normalize raw scanner input. Idempotent.
    pub fn normalize(raw: &str) -> Self {
        Self(
            raw.trim_matches(|c: char| c.is_whitespace() || c == '\u{FEFF}')
                .to_uppercase(),
        )
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Uid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Store code such as `A`, `B` or `C`.
///
/// Codes compare, hash and order case-insensitively so that mapping values and
/// routing table keys agree however the configuration source cases its keys.
/// The configured spelling is kept for display and serialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct StoreCode {
    code: String,
    key: String,
}

impl StoreCode {
    pub fn new(code: &str) -> Self {
        let code = code.trim();
        Self {
            code: code.to_string(),
            key: code.to_uppercase(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.code
    }

    pub fn is_empty(&self) -> bool {
        self.code.is_empty()
    }
}

impl PartialEq for StoreCode {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for StoreCode {}

impl Hash for StoreCode {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl PartialOrd for StoreCode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for StoreCode {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}

impl From<String> for StoreCode {
    fn from(code: String) -> Self {
        Self::new(&code)
    }
}

impl From<StoreCode> for String {
    fn from(code: StoreCode) -> Self {
        code.code
    }
}

impl fmt::Display for StoreCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.code)
    }
}

//! UID resolution
//!
//! Normalizes a scanned UID, looks it up in the mapping table and attaches the
//! routing attributes of the resolved store.

use serde::Serialize;

use super::tables::RoutingTables;
use crate::error::{ConfigError, NotFoundError};
use crate::mapping::{MappingTable, StoreCode, Uid};

/// Successful lookup, serialized as the 200 response body
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutingResult {
    pub uid: Uid,
    pub store: StoreCode,
    pub warehouse_id: u32,
    pub servo_angle: u16,
}

/// Immutable resolver built once at startup and shared by all requests
#[derive(Debug, Clone)]
pub struct Resolver {
    mapping: MappingTable,
    tables: RoutingTables,
}

impl Resolver {
    /// Build a resolver, failing if any mapped store code lacks a warehouse id
    /// or a servo angle.
    pub fn new(mapping: MappingTable, tables: RoutingTables) -> Result<Self, ConfigError> {
        for store in mapping.store_codes() {
            if tables.warehouse_id(store).is_none() {
                return Err(ConfigError::MissingRoute {
                    store: store.clone(),
                    table: "warehouses",
                });
            }
            if tables.servo_angle(store).is_none() {
                return Err(ConfigError::MissingRoute {
                    store: store.clone(),
                    table: "servo_angles",
                });
            }
        }

        Ok(Self { mapping, tables })
    }

    pub fn resolve(&self, raw_uid: &str) -> Result<RoutingResult, NotFoundError> {
        let uid = Uid::normalize(raw_uid);
        let Some(store) = self.mapping.lookup(&uid) else {
            return Err(NotFoundError { uid });
        };

        // Both lookups are guaranteed by the check in `new`.
        match (
            self.tables.warehouse_id(store),
            self.tables.servo_angle(store),
        ) {
            (Some(warehouse_id), Some(servo_angle)) => Ok(RoutingResult {
                uid,
                store: store.clone(),
                warehouse_id,
                servo_angle,
            }),
            _ => Err(NotFoundError { uid }),
        }
    }

    pub fn mapping(&self) -> &MappingTable {
        &self.mapping
    }
}

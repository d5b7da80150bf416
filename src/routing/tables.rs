//! Routing attribute tables
//!
//! Store code -> warehouse id and store code -> servo angle. The defaults are
//! the tables the sorting line shipped with; deployments override them in
//! `config.toml` under `[routing.warehouses]` and `[routing.servo_angles]`.

use std::collections::HashMap;

use crate::mapping::StoreCode;

/// Per-store routing attributes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutingTables {
    pub warehouses: HashMap<StoreCode, u32>,
    pub servo_angles: HashMap<StoreCode, u16>,
}

impl RoutingTables {
    pub fn warehouse_id(&self, store: &StoreCode) -> Option<u32> {
        self.warehouses.get(store).copied()
    }

    pub fn servo_angle(&self, store: &StoreCode) -> Option<u16> {
        self.servo_angles.get(store).copied()
    }
}

impl Default for RoutingTables {
    fn default() -> Self {
        Self {
            warehouses: default_warehouses(),
            servo_angles: default_servo_angles(),
        }
    }
}

pub fn default_warehouses() -> HashMap<StoreCode, u32> {
    [("A", 1), ("B", 2), ("C", 3)]
        .into_iter()
        .map(|(code, id)| (StoreCode::new(code), id))
        .collect()
}

pub fn default_servo_angles() -> HashMap<StoreCode, u16> {
    [("A", 5), ("B", 15), ("C", 25)]
        .into_iter()
        .map(|(code, angle)| (StoreCode::new(code), angle))
        .collect()
}

//! Routing module
//!
//! Resolves RFID UIDs to a store, warehouse and servo angle:
//! - UID normalization and mapping table lookup
//! - Store code -> warehouse id / servo angle tables

mod resolver;
pub(crate) mod tables;

pub use resolver::{Resolver, RoutingResult};
pub use tables::RoutingTables;

// Mapping store module
// UID -> store code table loaded once from a JSON file

mod table;
mod types;

pub use table::MappingTable;
pub use types::{StoreCode, Uid};

pub mod entity;
pub mod invariants;

pub use entity::{InventoryItem, NutritionalFacts, NutritionalValue, QuantityValue};
pub use invariants::validate_inventory_item;

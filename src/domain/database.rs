// src/domain/database.rs
//
// The persisted aggregate root
//
// The whole inventory database is one value: reference food types plus the
// inventory items. It is serialized as a single JSON document under one
// storage key and replaced wholesale on every mutation (read-modify-write,
// single-writer assumption).

use serde::{Deserialize, Serialize};

use crate::domain::food_type::FoodType;
use crate::domain::inventory::InventoryItem;

/// Storage key the aggregate lives under.
pub const STORAGE_KEY: &str = "foodBankDB";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Database {
    #[serde(default)]
    pub food_types: Vec<FoodType>,

    #[serde(default)]
    pub inventory_items: Vec<InventoryItem>,
}

impl Database {
    /// Position of an item record by serial number, if present.
    pub fn item_index(&self, serial_number: &str) -> Option<usize> {
        self.inventory_items
            .iter()
            .position(|item| item.serial_number == serial_number)
    }

    /// Position of a food type record by id, if present.
    pub fn food_type_index(&self, food_type_id: i64) -> Option<usize> {
        self.food_types
            .iter()
            .position(|ft| ft.food_type_id == food_type_id)
    }
}
